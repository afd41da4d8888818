use thiserror::Error;

use crate::model::{ProjectId, UserId};

#[derive(Debug, Error)]
pub enum RobolabError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Student {student} is already assigned to project {project}")]
    AlreadyAssigned { student: UserId, project: ProjectId },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RobolabError {
    /// Returns `true` when the error should be shown to the user as-is
    /// rather than as an internal failure.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::NotFound(_)
                | Self::AlreadyAssigned { .. }
                | Self::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RobolabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_credentials() {
        assert!(RobolabError::InvalidCredentials.is_user_facing());
    }

    #[test]
    fn test_user_facing_duplicate_assignment() {
        let err = RobolabError::AlreadyAssigned {
            student: UserId(2),
            project: ProjectId(1),
        };
        assert!(err.is_user_facing());
        assert_eq!(
            err.to_string(),
            "Student 2 is already assigned to project 1"
        );
    }

    #[test]
    fn test_internal_config() {
        let err = RobolabError::Config("bad latency".into());
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_internal_forbidden() {
        let err = RobolabError::Forbidden("student cannot open admin screens".into());
        assert!(!err.is_user_facing());
    }
}
