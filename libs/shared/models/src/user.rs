use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Patient,
    Doctor,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Patient => write!(f, "patient"),
            UserRole::Doctor => write!(f, "doctor"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// Any signed-in user. Role-specific fields live on the variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum AppUser {
    Patient {
        id: Uuid,
        name: String,
        phone: String,
    },
    Doctor {
        id: Uuid,
        name: String,
        specialty: String,
    },
    Admin {
        id: Uuid,
        name: String,
    },
}

impl AppUser {
    pub fn id(&self) -> Uuid {
        match self {
            AppUser::Patient { id, .. } | AppUser::Doctor { id, .. } | AppUser::Admin { id, .. } => *id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AppUser::Patient { name, .. } | AppUser::Doctor { name, .. } | AppUser::Admin { name, .. } => name,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            AppUser::Patient { .. } => UserRole::Patient,
            AppUser::Doctor { .. } => UserRole::Doctor,
            AppUser::Admin { .. } => UserRole::Admin,
        }
    }
}
