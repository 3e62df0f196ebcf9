//! Where member pages come from.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use staffgrid::SortOrder;
use staffwatch_lib::model::{MemberUser, ProjectMember, ProjectRole};
use staffwatch_lib::{ApiClient, ApiError, Direction, ListQuery, Page};
use tokio::sync::RwLock;

#[async_trait]
pub trait MemberSource: Send + Sync {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<ProjectMember>, ApiError>;

    async fn remove(&self, ids: &[String]) -> Result<usize, ApiError>;

    /// Remote sources order rows themselves; the table sorts only locally held pages.
    fn sorts_remotely(&self) -> bool;

    fn can_remove(&self) -> bool;

    fn describe(&self) -> String;
}

pub fn direction(order: SortOrder) -> Direction {
    match order {
        SortOrder::Asc => Direction::Asc,
        SortOrder::Desc => Direction::Desc,
    }
}

/// The project members endpoint.
pub struct RemoteSource {
    client: ApiClient,
    token: String,
    project_id: String,
}

impl RemoteSource {
    pub fn new(client: ApiClient, token: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            project_id: project_id.into(),
        }
    }
}

#[async_trait]
impl MemberSource for RemoteSource {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<ProjectMember>, ApiError> {
        self.client.project_members(&self.token, &self.project_id, query).await
    }

    async fn remove(&self, _ids: &[String]) -> Result<usize, ApiError> {
        Err(ApiError::http(405, "removing members is not supported by this client"))
    }

    fn sorts_remotely(&self) -> bool {
        true
    }

    fn can_remove(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        format!("{} · project {}", self.client.base_url(), self.project_id)
    }
}

/// Generated members held in memory. Filters and paginates like the server
/// but leaves ordering to the table.
pub struct FixtureSource {
    members: RwLock<Vec<ProjectMember>>,
}

const FIRST_NAMES: [&str; 12] = [
    "Ann", "Bola", "Chen", "Dario", "Eve", "Farah", "Goran", "Hana", "Ivo", "Jun", "Kemal", "Lea",
];
const LAST_NAMES: [&str; 9] = [
    "Lee", "Okafor", "Wei", "Rossi", "Novak", "Haddad", "Petrov", "Sato", "Silva",
];
const STATUSES: [&str; 4] = ["active", "active", "invited", "suspended"];

impl FixtureSource {
    pub fn new(members: Vec<ProjectMember>) -> Self {
        Self {
            members: RwLock::new(members),
        }
    }

    /// `count` deterministic members for project `demo`.
    pub fn generated(count: usize) -> Self {
        let epoch = Utc.with_ymd_and_hms(2023, 1, 9, 9, 0, 0).single().unwrap_or_default();
        let members = (0..count)
            .map(|i| {
                let first = FIRST_NAMES[i % FIRST_NAMES.len()];
                let last = LAST_NAMES[(i / FIRST_NAMES.len() + i) % LAST_NAMES.len()];
                ProjectMember {
                    id: format!("m{:03}", i + 1),
                    user_id: format!("u{:03}", i + 1),
                    project_id: "demo".to_string(),
                    role: ProjectRole::ALL[(i * 7 + 3) % ProjectRole::ALL.len()],
                    status: STATUSES[(i * 5) % STATUSES.len()].to_string(),
                    created_at: epoch + Duration::hours(37 * i as i64),
                    user: MemberUser {
                        id: format!("u{:03}", i + 1),
                        name: format!("{} {}", first, last),
                        email: format!("{}.{}{}@example.com", first, last, i).to_lowercase(),
                        avatar: None,
                    },
                }
            })
            .collect();
        Self::new(members)
    }

    fn matches(member: &ProjectMember, query: &ListQuery) -> bool {
        let search = query.search.as_deref().map(str::trim).unwrap_or_default();
        if !search.is_empty() {
            let needle = search.to_lowercase();
            let hit = member.user.name.to_lowercase().contains(&needle)
                || member.user.email.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        match query.role.as_deref().filter(|r| !r.is_empty()) {
            Some(roles) => roles.split(',').any(|r| r == member.role.as_str()),
            None => true,
        }
    }
}

#[async_trait]
impl MemberSource for FixtureSource {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<ProjectMember>, ApiError> {
        let members = self.members.read().await;
        let filtered: Vec<ProjectMember> = members
            .iter()
            .filter(|m| Self::matches(m, query))
            .cloned()
            .collect();
        Ok(Page::slice(
            &filtered,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(filtered.len().max(1) as u32),
        ))
    }

    async fn remove(&self, ids: &[String]) -> Result<usize, ApiError> {
        let mut members = self.members.write().await;
        let before = members.len();
        members.retain(|m| !ids.contains(&m.id));
        Ok(before - members.len())
    }

    fn sorts_remotely(&self) -> bool {
        false
    }

    fn can_remove(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "offline fixture".to_string()
    }
}
