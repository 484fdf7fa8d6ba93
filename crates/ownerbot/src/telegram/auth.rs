//! Owner-only authorization gate

use teloxide::types::UserId;

/// Outcome of the owner check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        self == Access::Allowed
    }
}

/// Lets exactly one user through. Everyone else gets the same denial.
#[derive(Debug, Clone, Copy)]
pub struct OwnerGate {
    owner_id: UserId,
}

impl OwnerGate {
    pub fn new(owner_id: UserId) -> Self {
        Self { owner_id }
    }

    pub fn check(&self, user_id: UserId) -> Access {
        if user_id == self.owner_id {
            Access::Allowed
        } else {
            log::info!("Access denied for user {}", user_id.0);
            Access::Denied
        }
    }
}
