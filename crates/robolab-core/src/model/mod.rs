mod assignment;
mod identity;
mod project;

#[cfg(test)]
mod tests;

pub use assignment::*;
pub use identity::*;
pub use project::*;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RobolabError;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = RobolabError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map($name).map_err(|_| {
                    RobolabError::InvalidInput(format!(concat!("invalid ", $what, " id: {}"), s))
                })
            }
        }
    };
}

numeric_id!(
    /// Roster identifier of a user (admin or student).
    UserId,
    "user"
);
numeric_id!(
    /// Catalog identifier of a project. Never reused after deletion.
    ProjectId,
    "project"
);
numeric_id!(AssignmentId, "assignment");
