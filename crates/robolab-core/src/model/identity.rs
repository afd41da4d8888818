use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::error::RobolabError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Student => "Student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Student => write!(f, "student"),
        }
    }
}

impl FromStr for Role {
    type Err = RobolabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            other => Err(RobolabError::InvalidInput(format!("unknown role: {other}"))),
        }
    }
}

/// An authenticated actor. Carries no credentials, and its role cannot
/// change once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: UserId,
    username: String,
    name: String,
    role: Role,
}

impl Identity {
    pub fn new(id: UserId, username: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            name: name.into(),
            role,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// School details shown on the admin students screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub grade: String,
    pub joined_on: NaiveDate,
}

/// A rostered student: identity plus profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub identity: Identity,
    pub profile: StudentProfile,
}

/// A fixed roster record. Holds the password, so it is not
/// serializable and its `Debug` output redacts it.
#[derive(Clone)]
pub struct RosterEntry {
    identity: Identity,
    password: String,
    profile: Option<StudentProfile>,
}

impl RosterEntry {
    pub fn admin(id: u64, username: &str, password: &str, name: &str) -> Self {
        Self {
            identity: Identity::new(UserId(id), username, name, Role::Admin),
            password: password.to_string(),
            profile: None,
        }
    }

    pub fn student(
        id: u64,
        username: &str,
        password: &str,
        name: &str,
        profile: StudentProfile,
    ) -> Self {
        Self {
            identity: Identity::new(UserId(id), username, name, Role::Student),
            password: password.to_string(),
            profile: Some(profile),
        }
    }

    /// The roster record with the password stripped.
    pub fn identity(&self) -> Identity {
        self.identity.clone()
    }

    /// Exact, case-sensitive match on both username and password.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.identity.username == username && self.password == password
    }

    pub fn as_student(&self) -> Option<Student> {
        match (self.identity.role, &self.profile) {
            (Role::Student, Some(profile)) => Some(Student {
                identity: self.identity.clone(),
                profile: profile.clone(),
            }),
            _ => None,
        }
    }
}

impl fmt::Debug for RosterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RosterEntry")
            .field("identity", &self.identity)
            .field("password", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}
