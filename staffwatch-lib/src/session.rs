//! Authenticated session context.
//!
//! A [`Session`] is built and owned by the caller and handed to whatever
//! needs it. There is no process-wide store.

use chrono::{DateTime, Utc};

use crate::model::{Account, Organization, TokenPayload};

#[derive(Debug, Clone, Default)]
pub struct Session {
    access: Option<TokenPayload>,
    refresh: Option<TokenPayload>,
    account: Option<Account>,
    organization: Option<Organization>,
    permissions: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole context after a successful login.
    pub fn init(
        &mut self,
        access: TokenPayload,
        refresh: TokenPayload,
        account: Account,
        organization: Option<Organization>,
    ) {
        self.access = Some(access);
        self.refresh = Some(refresh);
        self.account = Some(account);
        self.organization = organization;
        self.permissions.clear();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_organization(&mut self, organization: Organization) {
        self.organization = Some(organization);
    }

    pub fn set_permissions(&mut self, permissions: Vec<String>) {
        self.permissions = permissions;
    }

    /// The raw access token, expired or not.
    pub fn access_token(&self) -> Option<&str> {
        self.access.as_ref().map(|t| t.token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh.as_ref().map(|t| t.token.as_str())
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn organization(&self) -> Option<&Organization> {
        self.organization.as_ref()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.access.as_ref().is_some_and(|t| !t.is_expired_at(now))
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    /// The access token only while it is still valid.
    pub fn bearer(&self) -> Option<&str> {
        if self.is_authenticated() {
            self.access_token()
        } else {
            None
        }
    }
}
