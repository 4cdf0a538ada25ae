// src/moderation/principal.rs

use std::collections::HashSet;

/// A role a caller may hold. Compared as a value, never as a raw string, so
/// a misspelled role name fails at the parse boundary instead of silently
/// denying (or granting) access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    /// May delete/restore any comment regardless of authorship.
    /// Does NOT grant edit rights; only the author may edit.
    Moderator,
}

impl Role {
    /// Parses a role name as stored in the database / JWT claims.
    /// Unknown names map to `None` rather than defaulting to `User`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "user" => Some(Role::User),
            "moderator" => Some(Role::Moderator),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
        }
    }
}

/// The resolved identity of the caller making a request.
///
/// Always passed explicitly into the engine; the engine never reads identity
/// from ambient state. `user_id` is `None` for an unauthenticated caller.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: Option<i64>,
    pub roles: HashSet<Role>,
}

impl Principal {
    pub fn new(user_id: Option<i64>, roles: HashSet<Role>) -> Self {
        Self { user_id, roles }
    }

    /// An unauthenticated caller: no id, no roles.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            roles: HashSet::new(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
