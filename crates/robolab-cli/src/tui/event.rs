use robolab_core::catalog::CatalogSnapshot;
use robolab_core::model::*;

/// Actions the UI sends to the async worker task.
#[derive(Debug)]
pub enum AsyncAction {
    /// Check for a saved session at startup.
    Restore,
    /// Initial catalog fetch plus the student roster.
    LoadCatalog,
    /// Re-read projects and assignments after a mutation.
    Refresh,
    Login { username: String, password: String },
    Logout,
    CreateProject(NewProject),
    UpdateProject { id: ProjectId, patch: ProjectPatch },
    DeleteProject(ProjectId),
    AssignProject { student: UserId, project: ProjectId },
    CompleteProject { student: UserId, project: ProjectId },
}

/// Results the async worker sends back to the UI.
#[derive(Debug)]
pub enum AsyncResult {
    Restored(Option<Identity>),
    Loaded {
        snapshot: CatalogSnapshot,
        roster: Vec<Student>,
    },
    Snapshot(CatalogSnapshot),
    LoggedIn(Identity),
    LoggedOut,
    ProjectSaved(Box<Project>),
    ProjectDeleted(ProjectId),
    Assigned(Assignment),
    Completed(Assignment),
    /// An operation failed. The message is shown as a toast.
    Error(String),
}
