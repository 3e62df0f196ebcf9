use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use staffwatch_lib::model::{Membership, Organization};
use staffwatch_lib::{ApiError, GuardDecision, MembershipSource, RouteGuard};

const ORG: &str = "3f2b8c1e-9a4d-4e6f-8b7a-1c2d3e4f5a6b";
const OTHER: &str = "0b7c2f60-5d1e-4a39-9c8b-7e6f5a4b3c2d";

enum Answer {
    Members(Vec<&'static str>),
    Status(u16),
    Broken,
}

struct FakeSource {
    answer: Answer,
    calls: AtomicUsize,
}

impl FakeSource {
    fn new(answer: Answer) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MembershipSource for FakeSource {
    async fn memberships(&self, token: &str) -> Result<Vec<Membership>, ApiError> {
        assert_eq!(token, "tok");
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Answer::Members(ids) => Ok(ids
                .iter()
                .map(|id| {
                    Membership::of(Organization {
                        id: id.to_string(),
                        name: "Acme".into(),
                        domain: None,
                    })
                })
                .collect()),
            Answer::Status(status) => Err(ApiError::http(*status, "")),
            Answer::Broken => Err(ApiError::parse("expected value")),
        }
    }
}

fn guard(answer: Answer) -> RouteGuard<FakeSource> {
    RouteGuard::new(FakeSource::new(answer))
}

fn org_path() -> String {
    format!("/{ORG}/members")
}

#[tokio::test]
async fn public_routes_pass_without_token() {
    let guard = guard(Answer::Members(vec![]));
    assert_eq!(guard.check("/auth/login", None).await, GuardDecision::Allow);
    assert_eq!(guard.check("/", None).await, GuardDecision::Allow);
    assert_eq!(guard.source().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    let guard = guard(Answer::Members(vec![ORG]));
    assert_eq!(guard.check("/dashboard", None).await, GuardDecision::RedirectLogin);
    assert_eq!(guard.check(&org_path(), None).await, GuardDecision::RedirectLogin);
    assert_eq!(guard.check(&org_path(), Some("")).await, GuardDecision::RedirectLogin);
}

#[tokio::test]
async fn dashboard_with_token_skips_membership() {
    let guard = guard(Answer::Members(vec![]));
    assert_eq!(guard.check("/dashboard/projects", Some("tok")).await, GuardDecision::Allow);
    assert_eq!(guard.source().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn member_is_allowed() {
    let guard = guard(Answer::Members(vec![OTHER, ORG]));
    assert_eq!(guard.check(&org_path(), Some("tok")).await, GuardDecision::Allow);
}

#[tokio::test]
async fn member_match_ignores_uuid_case() {
    let guard = guard(Answer::Members(vec![ORG]));
    let path = format!("/{}", ORG.to_uppercase());
    assert_eq!(guard.check(&path, Some("tok")).await, GuardDecision::Allow);
}

#[tokio::test]
async fn non_member_goes_to_dashboard() {
    let guard = guard(Answer::Members(vec![OTHER]));
    assert_eq!(guard.check(&org_path(), Some("tok")).await, GuardDecision::RedirectDashboard);
}

#[tokio::test]
async fn rejected_token_goes_to_login() {
    let guard = guard(Answer::Status(401));
    assert_eq!(guard.check(&org_path(), Some("tok")).await, GuardDecision::RedirectLogin);
}

#[tokio::test]
async fn other_statuses_are_let_through() {
    let guard = guard(Answer::Status(500));
    assert_eq!(guard.check(&org_path(), Some("tok")).await, GuardDecision::Allow);
}

#[tokio::test]
async fn transport_failure_goes_to_dashboard() {
    let guard = guard(Answer::Broken);
    assert_eq!(guard.check(&org_path(), Some("tok")).await, GuardDecision::RedirectDashboard);
}
