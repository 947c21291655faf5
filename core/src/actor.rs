//! The minimal shape of "who is calling" that the core's guards need.
//!
//! Full authentication/authorization lives outside this crate; this type
//! exists only so [`crate::result`]'s guard functions have something
//! concrete to pattern-match against.
use crate::ids::{TeamId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Coach,
    Viewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
    /// Set for coaches; the team they are allowed to submit results for.
    pub team_id: Option<TeamId>,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
