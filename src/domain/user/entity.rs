// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Email, PasswordHash, Role, UserId, Username};

/// Account record as stored by the user collection. Articles only reference
/// it; the password hash and role never leave the service in a response.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: Option<PasswordHash>,
    pub role: Role,
}
