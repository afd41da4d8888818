use std::future::Future;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use crate::config::LatencyConfig;
use crate::error::{Result, RobolabError};
use crate::model::*;
use crate::seed;

/// Projects and assignments read under one lock, so derived views see a
/// consistent pair.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogSnapshot {
    pub projects: Vec<Project>,
    pub assignments: Vec<Assignment>,
}

impl CatalogSnapshot {
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn assignment(&self, student_id: UserId, project_id: ProjectId) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.links(student_id, project_id))
    }
}

/// Abstract project catalog. `MemoryCatalog` is the only implementation;
/// a network-backed one can slot in behind the same trait.
pub trait CatalogBackend: Send + Sync {
    // -- Projects --

    fn list_projects(&self) -> impl Future<Output = Result<Vec<Project>>> + Send;

    fn get_project(&self, id: ProjectId) -> impl Future<Output = Result<Project>> + Send;

    fn create_project(&self, input: NewProject) -> impl Future<Output = Result<Project>> + Send;

    fn update_project(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> impl Future<Output = Result<Project>> + Send;

    /// Removes the project and every assignment pointing at it.
    /// Unknown ids are a no-op.
    fn delete_project(&self, id: ProjectId) -> impl Future<Output = Result<()>> + Send;

    // -- Assignments --

    fn list_assignments(&self) -> impl Future<Output = Result<Vec<Assignment>>> + Send;

    fn assign_project(
        &self,
        student_id: UserId,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<Assignment>> + Send;

    fn complete_project(
        &self,
        student_id: UserId,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<Assignment>> + Send;

    // -- Views --

    fn snapshot(&self) -> impl Future<Output = Result<CatalogSnapshot>> + Send;
}

#[derive(Debug)]
struct CatalogState {
    projects: Vec<Project>,
    assignments: Vec<Assignment>,
    next_project_id: u64,
    next_assignment_id: u64,
}

impl CatalogState {
    fn new(projects: Vec<Project>, assignments: Vec<Assignment>) -> Self {
        let next_project_id = projects.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        let next_assignment_id = assignments.iter().map(|a| a.id.0).max().unwrap_or(0) + 1;
        Self {
            projects,
            assignments,
            next_project_id,
            next_assignment_id,
        }
    }

    fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            projects: self.projects.clone(),
            assignments: self.assignments.clone(),
        }
    }
}

/// In-process catalog. Every mutation waits `latency.catalog_ms` before
/// taking the write lock; reads are immediate.
#[derive(Debug)]
pub struct MemoryCatalog {
    state: RwLock<CatalogState>,
    delay: Duration,
    initial_load: Duration,
}

impl MemoryCatalog {
    pub fn new(projects: Vec<Project>, assignments: Vec<Assignment>, latency: &LatencyConfig) -> Self {
        Self {
            state: RwLock::new(CatalogState::new(projects, assignments)),
            delay: latency.catalog(),
            initial_load: latency.initial_load(),
        }
    }

    /// Catalog holding the demo projects and assignments.
    pub fn seeded(latency: &LatencyConfig) -> Self {
        Self::new(seed::projects(), seed::assignments(), latency)
    }

    /// Simulated initial fetch: waits `latency.initial_load_ms`, then returns
    /// everything the screens need on first paint.
    pub async fn load(&self) -> Result<CatalogSnapshot> {
        sleep(self.initial_load).await;
        let snapshot = self.read().snapshot();
        tracing::debug!(
            projects = snapshot.projects.len(),
            assignments = snapshot.assignments.len(),
            "catalog loaded"
        );
        Ok(snapshot)
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl CatalogBackend for MemoryCatalog {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.read().projects.clone())
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project> {
        self.read()
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| RobolabError::NotFound(format!("project {id}")))
    }

    async fn create_project(&self, input: NewProject) -> Result<Project> {
        sleep(self.delay).await;
        let mut state = self.write();
        let id = ProjectId(state.next_project_id);
        state.next_project_id += 1;

        let project = input.into_project(id, Utc::now());
        state.projects.push(project.clone());
        tracing::info!(project = %id, title = %project.title, "project created");
        Ok(project)
    }

    async fn update_project(&self, id: ProjectId, patch: ProjectPatch) -> Result<Project> {
        sleep(self.delay).await;
        let mut state = self.write();
        let Some(project) = state.projects.iter_mut().find(|p| p.id == id) else {
            tracing::warn!(project = %id, "update of unknown project");
            return Err(RobolabError::NotFound(format!("project {id}")));
        };

        patch.apply(project);
        tracing::info!(project = %id, "project updated");
        Ok(project.clone())
    }

    async fn delete_project(&self, id: ProjectId) -> Result<()> {
        sleep(self.delay).await;
        let mut state = self.write();
        let before = state.projects.len();
        state.projects.retain(|p| p.id != id);
        if state.projects.len() == before {
            tracing::debug!(project = %id, "delete of unknown project ignored");
            return Ok(());
        }

        let assignments_before = state.assignments.len();
        state.assignments.retain(|a| a.project_id != id);
        tracing::info!(
            project = %id,
            assignments_removed = assignments_before - state.assignments.len(),
            "project deleted"
        );
        Ok(())
    }

    async fn list_assignments(&self) -> Result<Vec<Assignment>> {
        Ok(self.read().assignments.clone())
    }

    async fn assign_project(&self, student_id: UserId, project_id: ProjectId) -> Result<Assignment> {
        sleep(self.delay).await;
        let mut state = self.write();
        if state.assignments.iter().any(|a| a.links(student_id, project_id)) {
            tracing::warn!(student = %student_id, project = %project_id, "duplicate assignment rejected");
            return Err(RobolabError::AlreadyAssigned {
                student: student_id,
                project: project_id,
            });
        }

        let id = AssignmentId(state.next_assignment_id);
        state.next_assignment_id += 1;
        let assignment = Assignment::new(id, student_id, project_id, Utc::now());
        state.assignments.push(assignment.clone());
        tracing::info!(student = %student_id, project = %project_id, "project assigned");
        Ok(assignment)
    }

    async fn complete_project(
        &self,
        student_id: UserId,
        project_id: ProjectId,
    ) -> Result<Assignment> {
        sleep(self.delay).await;
        let mut state = self.write();
        let Some(assignment) = state
            .assignments
            .iter_mut()
            .find(|a| a.links(student_id, project_id))
        else {
            tracing::warn!(student = %student_id, project = %project_id, "completion without assignment");
            return Err(RobolabError::NotFound(format!(
                "assignment of project {project_id} to student {student_id}"
            )));
        };

        if assignment.complete(Utc::now()) {
            tracing::info!(student = %student_id, project = %project_id, "project completed");
        } else {
            tracing::debug!(student = %student_id, project = %project_id, "project already completed");
        }
        Ok(assignment.clone())
    }

    async fn snapshot(&self) -> Result<CatalogSnapshot> {
        Ok(self.read().snapshot())
    }
}
