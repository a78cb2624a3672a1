use crate::domain::user::{Role, UserId};

/// The principal behind a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_editor(&self) -> bool {
        self.role.is_editor()
    }
}
