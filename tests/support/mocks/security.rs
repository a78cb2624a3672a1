// tests/support/mocks/security.rs
use async_trait::async_trait;
use newsdesk_core::application::{
    ApplicationResult, dto::AuthenticatedUser, error::ApplicationError,
};
use newsdesk_core::domain::user::{Role, UserId};

/// テスト用トークン定数
pub const EDITOR_TOKEN: &str = "editor-token";
pub const OWNER_TOKEN: &str = "owner-token";
pub const OTHER_TOKEN: &str = "other-token";

pub const EDITOR_ID: i64 = 1;
pub const OWNER_ID: i64 = 2;
pub const OTHER_ID: i64 = 3;

fn principal(id: i64, username: &str, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(id).expect("invalid user id"),
        username: username.into(),
        role,
    }
}

pub fn editor() -> AuthenticatedUser {
    principal(EDITOR_ID, "editor", Role::Editor)
}

pub fn owner() -> AuthenticatedUser {
    principal(OWNER_ID, "owner", Role::Authenticated)
}

pub fn other() -> AuthenticatedUser {
    principal(OTHER_ID, "other", Role::Authenticated)
}

#[derive(Clone, Debug, Default)]
pub struct DummyTokenVerifier;

#[async_trait]
impl newsdesk_core::application::ports::security::TokenVerifier for DummyTokenVerifier {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            EDITOR_TOKEN => Ok(editor()),
            OWNER_TOKEN => Ok(owner()),
            OTHER_TOKEN => Ok(other()),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}
