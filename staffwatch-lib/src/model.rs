//! Wire types for the entities the console reads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// The caller's membership in one organization, as listed by `GET /organization`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub organization: Option<Organization>,
}

impl Membership {
    pub fn of(organization: Organization) -> Self {
        Self {
            id: None,
            role: None,
            status: None,
            organization: Some(organization),
        }
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization.as_ref().map(|org| org.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A bearer token and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub token: String,
    pub expires: DateTime<Utc>,
}

impl TokenPayload {
    pub fn new(token: impl Into<String>, expires: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    Owner,
    Manager,
    Member,
    Viewer,
}

impl ProjectRole {
    pub const ALL: [ProjectRole; 4] = [
        ProjectRole::Owner,
        ProjectRole::Manager,
        ProjectRole::Member,
        ProjectRole::Viewer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectRole::Owner => "owner",
            ProjectRole::Manager => "manager",
            ProjectRole::Member => "member",
            ProjectRole::Viewer => "viewer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectRole::Owner => "Owner",
            ProjectRole::Manager => "Manager",
            ProjectRole::Member => "Member",
            ProjectRole::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A row of `GET /projects/{id}/members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub role: ProjectRole,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub user: MemberUser,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn project_member_from_wire() {
        let member: ProjectMember = serde_json::from_value(json!({
            "id": "m1",
            "userId": "u1",
            "projectId": "p1",
            "role": "manager",
            "status": "active",
            "createdAt": "2024-03-01T09:30:00Z",
            "user": { "id": "u1", "name": "Ann Lee", "email": "ann@example.com" }
        }))
        .unwrap();
        assert_eq!(member.role, ProjectRole::Manager);
        assert_eq!(member.user.avatar, None);
        assert_eq!(
            member.created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn membership_tolerates_missing_organization() {
        let membership: Membership = serde_json::from_value(json!({ "role": "admin" })).unwrap();
        assert_eq!(membership.organization_id(), None);
    }

    #[test]
    fn token_expiry_is_inclusive() {
        let expires = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let token = TokenPayload::new("t", expires);
        assert!(token.is_expired_at(expires));
        assert!(!token.is_expired_at(expires - chrono::Duration::seconds(1)));
    }
}
