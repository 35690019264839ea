use crate::domain::user::UserId;

/// The user on whose behalf a command runs, as asserted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
}

impl Actor {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}
