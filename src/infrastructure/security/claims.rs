// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};

/// Builds the principal from `user(id, name)` and `role(name)` facts.
/// A token without a `role` fact is treated as a plain authenticated user.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let ctx = ClaimsContext::from_facts(facts);

    let user_id = ctx
        .user_id
        .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;
    let username = ctx
        .username
        .ok_or_else(|| ApplicationError::unauthorized("missing username"))?;
    let id = UserId::new(user_id).map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

    Ok(AuthenticatedUser {
        id,
        username,
        role: ctx.role.unwrap_or_default(),
    })
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    username: Option<String>,
    role: Option<Role>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply_predicate(&fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: &Predicate) {
        match predicate.name.as_str() {
            "user" => self.handle_user(predicate),
            "role" => self.handle_role(predicate),
            _ => {}
        }
    }

    fn handle_user(&mut self, predicate: &Predicate) {
        if let [Term::Integer(id), Term::Str(name)] = predicate.terms.as_slice() {
            self.user_id = Some(*id);
            self.username = Some(name.clone());
        }
    }

    fn handle_role(&mut self, predicate: &Predicate) {
        if let Some(Term::Str(role_name)) = predicate.terms.first() {
            if let Ok(parsed) = role_name.parse() {
                self.role = Some(parsed);
            }
        }
    }
}
