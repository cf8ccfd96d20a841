use crate::shared::entity::ID;

/// An authenticated user. Users are managed by the identity provider that
/// issues the bearer tokens, this service only knows them by id.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: Option<String>,
}

impl User {
    pub fn new(id: ID) -> Self {
        Self { id, email: None }
    }
}
