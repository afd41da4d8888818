use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AssignmentId, ProjectId, UserId};

/// Link between a student and a project they have taken on.
///
/// Completion is a single optional timestamp, so "completed" and "has a
/// completion time" cannot disagree. The serialized form still carries an
/// explicit `completed` flag and is rejected on load if the two differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AssignmentRecord", try_from = "AssignmentRecord")]
pub struct Assignment {
    pub id: AssignmentId,
    pub project_id: ProjectId,
    pub student_id: UserId,
    pub started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn new(
        id: AssignmentId,
        student_id: UserId,
        project_id: ProjectId,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project_id,
            student_id,
            started_at,
            completed_at: None,
        }
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Mark complete at `at`. Returns `false` and keeps the first completion
    /// time if the assignment was already complete.
    pub fn complete(&mut self, at: DateTime<Utc>) -> bool {
        if self.completed_at.is_some() {
            return false;
        }
        self.completed_at = Some(at);
        true
    }

    pub fn links(&self, student_id: UserId, project_id: ProjectId) -> bool {
        self.student_id == student_id && self.project_id == project_id
    }

    pub(crate) fn completed_on(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }
}

#[derive(Serialize, Deserialize)]
struct AssignmentRecord {
    id: AssignmentId,
    project_id: ProjectId,
    student_id: UserId,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    completed: bool,
}

impl From<Assignment> for AssignmentRecord {
    fn from(a: Assignment) -> Self {
        Self {
            completed: a.completed_at.is_some(),
            id: a.id,
            project_id: a.project_id,
            student_id: a.student_id,
            started_at: a.started_at,
            completed_at: a.completed_at,
        }
    }
}

impl TryFrom<AssignmentRecord> for Assignment {
    type Error = String;

    fn try_from(r: AssignmentRecord) -> Result<Self, Self::Error> {
        if r.completed != r.completed_at.is_some() {
            return Err(format!(
                "assignment {}: completed flag disagrees with completion timestamp",
                r.id
            ));
        }
        Ok(Self {
            id: r.id,
            project_id: r.project_id,
            student_id: r.student_id,
            started_at: r.started_at,
            completed_at: r.completed_at,
        })
    }
}
