//! End-to-end flows across the session store, catalog and router.

mod common;

use common::{test_project, test_stores};
use robolab_core::catalog::CatalogBackend;
use robolab_core::error::RobolabError;
use robolab_core::insights::{
    assigned_projects, available_projects, catalog_overview, recommended_projects,
    student_progress, student_stats,
};
use robolab_core::model::{validate_new_project, Category, ProjectId, ProjectPatch, Role};
use robolab_core::router::{route, Navigator, Screen, Subtree};

/// Admin creates a project, a student picks it up and finishes it.
#[tokio::test]
async fn test_admin_creates_student_completes() {
    let (sessions, catalog) = test_stores();

    let admin = sessions.login("admin", "admin123").await.unwrap();
    assert_eq!(admin.role(), Role::Admin);
    assert_eq!(route(&sessions.session()), Subtree::Admin);

    let input = test_project("Cardboard Gripper");
    validate_new_project(&input).unwrap();
    let created = catalog.create_project(input).await.unwrap();
    sessions.logout();

    let student = sessions.login("student4", "123456").await.unwrap();
    let snapshot = catalog.snapshot().await.unwrap();
    let recommended = recommended_projects(&snapshot, student.id(), 10);
    assert!(recommended.iter().any(|p| p.id == created.id));

    catalog.assign_project(student.id(), created.id).await.unwrap();
    catalog
        .complete_project(student.id(), created.id)
        .await
        .unwrap();

    let snapshot = catalog.snapshot().await.unwrap();
    let assigned = assigned_projects(&snapshot, student.id());
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].project.category, Category::Design);
    let progress = student_progress(&assigned);
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.percentage, 100);
    assert!(recommended_projects(&snapshot, student.id(), 10)
        .iter()
        .all(|p| p.id != created.id));
}

#[tokio::test]
async fn test_unavailable_project_hidden_from_students() {
    let (_, catalog) = test_stores();
    catalog
        .update_project(ProjectId(2), ProjectPatch::availability(false))
        .await
        .unwrap();

    let projects = catalog.list_projects().await.unwrap();
    assert_eq!(projects.len(), 3);
    let visible = available_projects(&projects);
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|p| p.id != ProjectId(2)));

    let overview = catalog_overview(&catalog.snapshot().await.unwrap());
    assert_eq!(overview.available_projects, 2);
}

#[tokio::test]
async fn test_delete_updates_student_stats() {
    let (sessions, catalog) = test_stores();
    let roster = sessions.roster_students();

    let before = student_stats(&catalog.snapshot().await.unwrap(), &roster);
    assert_eq!(before[1].progress.completed, 1);

    catalog.delete_project(ProjectId(2)).await.unwrap();
    let after = student_stats(&catalog.snapshot().await.unwrap(), &roster);
    assert_eq!(after[1].progress.assigned, 0);
    assert_eq!(after[1].progress.percentage, 0);
    assert_eq!(after[0].progress.assigned, 1);
}

#[tokio::test]
async fn test_duplicate_assignment_surfaces_error() {
    let (sessions, catalog) = test_stores();
    let student = sessions.login("student1", "123456").await.unwrap();
    let err = catalog
        .assign_project(student.id(), ProjectId(1))
        .await
        .unwrap_err();
    assert!(matches!(err, RobolabError::AlreadyAssigned { .. }));
    assert!(err.is_user_facing());
}

#[tokio::test]
async fn test_navigation_follows_session() {
    let (sessions, _) = test_stores();
    let mut nav = Navigator::new(&sessions.session());
    assert_eq!(nav.current(), Screen::Home);
    nav.push(Screen::Login).unwrap();

    assert!(sessions.login("student2", "bad").await.is_err());
    assert!(!nav.sync(&sessions.session()));
    assert_eq!(nav.current(), Screen::Login);

    sessions.login("student2", "123456").await.unwrap();
    assert!(nav.sync(&sessions.session()));
    nav.switch_tab(Screen::ProjectsList).unwrap();
    nav.push(Screen::ProjectDetail).unwrap();
    assert!(nav.push(Screen::AdminEditProject).is_err());

    sessions.logout();
    assert!(nav.sync(&sessions.session()));
    assert_eq!(nav.current(), Screen::Home);
}
