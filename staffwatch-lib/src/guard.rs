//! Route access guard.
//!
//! Organization routes are those whose first path segment is a UUID. They
//! require a token whose account is a member of that organization. Dashboard
//! routes only require a token. Every other path is public.

use async_trait::async_trait;
use log::{info, warn};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::model::Membership;

pub const LOGIN_PATH: &str = "/auth/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Where membership lists come from.
#[async_trait]
pub trait MembershipSource: Send + Sync {
    async fn memberships(&self, token: &str) -> Result<Vec<Membership>, ApiError>;
}

#[async_trait]
impl MembershipSource for ApiClient {
    async fn memberships(&self, token: &str) -> Result<Vec<Membership>, ApiError> {
        self.organizations(token).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectLogin,
    RedirectDashboard,
}

impl GuardDecision {
    /// Redirect target, if any.
    pub fn location(self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectDashboard => Some(DASHBOARD_PATH),
        }
    }
}

/// The organization id a path is scoped to, if its first segment is a
/// hyphenated (8-4-4-4-12) UUID. Simple, braced and URN forms do not count.
pub fn org_segment(path: &str) -> Option<Uuid> {
    let first = path.trim_start_matches('/').split('/').next()?;
    let hyphenated = first.len() == 36
        && first
            .char_indices()
            .all(|(i, c)| matches!(i, 8 | 13 | 18 | 23) == (c == '-'));
    if !hyphenated {
        return None;
    }
    Uuid::parse_str(first).ok()
}

pub fn is_dashboard_route(path: &str) -> bool {
    path.starts_with(DASHBOARD_PATH)
}

pub struct RouteGuard<M> {
    source: M,
}

impl<M: MembershipSource> RouteGuard<M> {
    pub fn new(source: M) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &M {
        &self.source
    }

    pub async fn check(&self, path: &str, token: Option<&str>) -> GuardDecision {
        let org = org_segment(path);
        let protected = org.is_some() || is_dashboard_route(path);
        let token = token.filter(|t| !t.is_empty());

        let decision = match (org, token) {
            (_, None) if protected => GuardDecision::RedirectLogin,
            (Some(org), Some(token)) => self.check_membership(org, token).await,
            _ => GuardDecision::Allow,
        };
        info!("guard {} -> {:?}", path, decision);
        decision
    }

    async fn check_membership(&self, org: Uuid, token: &str) -> GuardDecision {
        match self.source.memberships(token).await {
            Ok(memberships) => {
                if memberships.iter().any(|m| belongs_to(m, org)) {
                    GuardDecision::Allow
                } else {
                    GuardDecision::RedirectDashboard
                }
            }
            Err(ApiError::Unauthorized) => GuardDecision::RedirectLogin,
            Err(ApiError::Http { status, .. }) => {
                warn!("membership check answered {}, letting the page decide", status);
                GuardDecision::Allow
            }
            Err(err) => {
                warn!("membership check failed: {}", err);
                GuardDecision::RedirectDashboard
            }
        }
    }
}

fn belongs_to(membership: &Membership, org: Uuid) -> bool {
    membership
        .organization_id()
        .and_then(|id| Uuid::parse_str(id).ok())
        .is_some_and(|id| id == org)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_segment_must_be_a_uuid() {
        let id = "3f2b8c1e-9a4d-4e6f-8b7a-1c2d3e4f5a6b";
        assert!(org_segment(&format!("/{id}/projects")).is_some());
        assert!(org_segment(&format!("/{id}")).is_some());
        assert!(org_segment(&format!("/projects/{id}")).is_none());
        assert!(org_segment("/").is_none());
        assert!(org_segment("").is_none());
    }

    #[test]
    fn only_hyphenated_ids_count_as_org_routes() {
        assert!(org_segment("/0123456789abcdef0123456789abcdef/projects").is_none());
        assert!(org_segment("/{01234567-89ab-cdef-0123-456789abcdef}").is_none());
        assert!(org_segment("/urn:uuid:01234567-89ab-cdef-0123-456789abcdef").is_none());
        assert!(org_segment("/01234567-89AB-cdef-0123-456789abcdef/projects").is_some());
    }

    #[test]
    fn dashboard_prefix() {
        assert!(is_dashboard_route("/dashboard"));
        assert!(is_dashboard_route("/dashboard/members"));
        assert!(!is_dashboard_route("/auth/login"));
    }

    #[test]
    fn locations() {
        assert_eq!(GuardDecision::Allow.location(), None);
        assert_eq!(GuardDecision::RedirectLogin.location(), Some("/auth/login"));
        assert_eq!(GuardDecision::RedirectDashboard.location(), Some("/dashboard"));
    }
}
