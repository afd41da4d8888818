//! Views derived from the catalog for the dashboards, profile and
//! statistics screens. Nothing here is stored.

use serde::Serialize;

use crate::catalog::CatalogSnapshot;
use crate::model::*;

/// Browse and management list filters, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub query: String,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        project.matches_query(&self.query)
            && self.category.map_or(true, |c| project.category == c)
            && self.difficulty.map_or(true, |d| project.difficulty == d)
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.category.is_none() && self.difficulty.is_none()
    }
}

pub fn filter_projects<'a>(projects: &'a [Project], filter: &ProjectFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

/// What students can browse.
pub fn available_projects(projects: &[Project]) -> Vec<&Project> {
    projects.iter().filter(|p| p.available).collect()
}

/// An assignment joined to its project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignedProject {
    pub project: Project,
    pub assignment: Assignment,
}

/// A student's assignments with their projects, in assignment order.
/// Assignments whose project no longer exists are skipped.
pub fn assigned_projects(snapshot: &CatalogSnapshot, student: UserId) -> Vec<AssignedProject> {
    snapshot
        .assignments
        .iter()
        .filter(|a| a.student_id == student)
        .filter_map(|a| {
            snapshot.project(a.project_id).map(|p| AssignedProject {
                project: p.clone(),
                assignment: a.clone(),
            })
        })
        .collect()
}

/// Available projects the student has not taken on yet, first `limit`.
pub fn recommended_projects(
    snapshot: &CatalogSnapshot,
    student: UserId,
    limit: usize,
) -> Vec<&Project> {
    snapshot
        .projects
        .iter()
        .filter(|p| p.available)
        .filter(|p| snapshot.assignment(student, p.id).is_none())
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StudentProgress {
    pub assigned: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub percentage: u8,
}

impl StudentProgress {
    pub fn from_assignments<'a>(assignments: impl IntoIterator<Item = &'a Assignment>) -> Self {
        let (assigned, completed) = assignments
            .into_iter()
            .fold((0, 0), |(n, done), a| (n + 1, done + usize::from(a.is_completed())));
        Self {
            assigned,
            completed,
            in_progress: assigned - completed,
            percentage: percentage(completed, assigned),
        }
    }
}

pub fn student_progress(assigned: &[AssignedProject]) -> StudentProgress {
    StudentProgress::from_assignments(assigned.iter().map(|a| &a.assignment))
}

/// `round(part / total * 100)`, 0 when `total` is 0.
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub count: usize,
    pub percentage: u8,
}

/// Per-category share of a student's assignments, for every category.
pub fn category_distribution(assigned: &[AssignedProject]) -> Vec<CategoryShare> {
    Category::ALL
        .iter()
        .map(|&category| {
            let count = assigned
                .iter()
                .filter(|a| a.project.category == category)
                .count();
            CategoryShare {
                category,
                count,
                percentage: percentage(count, assigned.len()),
            }
        })
        .collect()
}

/// Category with the most assignments. Ties go to the earliest category.
pub fn favorite_category(assigned: &[AssignedProject]) -> Option<Category> {
    let mut best: Option<CategoryShare> = None;
    for share in category_distribution(assigned) {
        if share.count > best.map_or(0, |b| b.count) {
            best = Some(share);
        }
    }
    best.map(|b| b.category)
}

/// Admin dashboard numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogOverview {
    pub total_projects: usize,
    pub available_projects: usize,
    pub completed: usize,
    pub in_progress: usize,
}

pub fn catalog_overview(snapshot: &CatalogSnapshot) -> CatalogOverview {
    let completed = snapshot
        .assignments
        .iter()
        .filter(|a| a.is_completed())
        .count();
    CatalogOverview {
        total_projects: snapshot.projects.len(),
        available_projects: snapshot.projects.iter().filter(|p| p.available).count(),
        completed,
        in_progress: snapshot.assignments.len() - completed,
    }
}

/// Projects in a group and how many assignments of them were completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupStats<K> {
    pub key: K,
    pub projects: usize,
    pub completed: usize,
}

fn group_stats<K: Copy + PartialEq>(
    snapshot: &CatalogSnapshot,
    keys: &[K],
    key_of: impl Fn(&Project) -> K,
) -> Vec<GroupStats<K>> {
    keys.iter()
        .map(|&key| {
            let projects = snapshot.projects.iter().filter(|p| key_of(p) == key).count();
            let completed = snapshot
                .assignments
                .iter()
                .filter(|a| a.is_completed())
                .filter(|a| snapshot.project(a.project_id).is_some_and(|p| key_of(p) == key))
                .count();
            GroupStats {
                key,
                projects,
                completed,
            }
        })
        .collect()
}

pub fn category_stats(snapshot: &CatalogSnapshot) -> Vec<GroupStats<Category>> {
    group_stats(snapshot, &Category::ALL, |p| p.category)
}

pub fn difficulty_stats(snapshot: &CatalogSnapshot) -> Vec<GroupStats<Difficulty>> {
    group_stats(snapshot, &Difficulty::ALL, |p| p.difficulty)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentStats {
    pub student: Student,
    pub progress: StudentProgress,
}

/// Progress of every rostered student, in roster order. Counts all of a
/// student's assignments, including ones whose project was deleted.
pub fn student_stats(snapshot: &CatalogSnapshot, roster: &[Student]) -> Vec<StudentStats> {
    roster
        .iter()
        .map(|student| {
            let id = student.identity.id();
            StudentStats {
                student: student.clone(),
                progress: StudentProgress::from_assignments(
                    snapshot.assignments.iter().filter(|a| a.student_id == id),
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::Utc;

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot {
            projects: seed::projects(),
            assignments: seed::assignments(),
        }
    }

    fn assignment(id: u64, student: u64, project: u64, done: bool) -> Assignment {
        let mut a = Assignment::new(
            AssignmentId(id),
            UserId(student),
            ProjectId(project),
            Utc::now(),
        );
        if done {
            a.complete(Utc::now());
        }
        a
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(4, 4), 100);
    }

    #[test]
    fn test_filter_combines_with_and() {
        let projects = seed::projects();
        let filter = ProjectFilter {
            query: "ROBOT".into(),
            ..Default::default()
        };
        assert_eq!(filter_projects(&projects, &filter).len(), 2);

        let filter = ProjectFilter {
            query: "robot".into(),
            category: Some(Category::Mechanics),
            difficulty: None,
        };
        let found = filter_projects(&projects, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Robotic Arm");

        let filter = ProjectFilter {
            difficulty: Some(Difficulty::Advanced),
            category: Some(Category::Mechanics),
            ..Default::default()
        };
        assert!(filter_projects(&projects, &filter).is_empty());
        assert!(ProjectFilter::default().is_empty());
    }

    #[test]
    fn test_available_projects_hides_unavailable() {
        let mut projects = seed::projects();
        projects[1].available = false;
        let ids: Vec<_> = available_projects(&projects).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProjectId(1), ProjectId(3)]);
    }

    #[test]
    fn test_assigned_projects_drops_dangling() {
        let mut snap = snapshot();
        snap.assignments.push(assignment(3, 2, 99, false));
        let assigned = assigned_projects(&snap, UserId(2));
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].project.id, ProjectId(1));
    }

    #[test]
    fn test_recommended_excludes_assigned_and_unavailable() {
        let mut snap = snapshot();
        snap.projects[2].available = false;
        let recommended = recommended_projects(&snap, UserId(2), 3);
        let ids: Vec<_> = recommended.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProjectId(2)]);

        let fresh = snapshot();
        let limited = recommended_projects(&fresh, UserId(5), 2);
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_student_progress_two_of_three() {
        let mut snap = snapshot();
        snap.projects.push(
            NewProject::new("Drone", "Fly it")
                .with_category(Category::Electronics)
                .into_project(ProjectId(4), Utc::now()),
        );
        snap.assignments = vec![
            assignment(1, 2, 1, true),
            assignment(2, 2, 2, true),
            assignment(3, 2, 4, false),
        ];
        let progress = student_progress(&assigned_projects(&snap, UserId(2)));
        assert_eq!(progress.assigned, 3);
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.in_progress, 1);
        assert_eq!(progress.percentage, 67);
    }

    #[test]
    fn test_student_progress_empty() {
        let progress = student_progress(&[]);
        assert_eq!(progress, StudentProgress::default());
    }

    #[test]
    fn test_category_distribution_and_favorite() {
        let mut snap = snapshot();
        snap.assignments = vec![
            assignment(1, 4, 1, false),
            assignment(2, 4, 2, true),
            assignment(3, 4, 3, false),
        ];
        let assigned = assigned_projects(&snap, UserId(4));
        let dist = category_distribution(&assigned);
        assert_eq!(dist.len(), Category::ALL.len());
        let electronics = dist
            .iter()
            .find(|s| s.category == Category::Electronics)
            .unwrap();
        assert_eq!(electronics.count, 1);
        assert_eq!(electronics.percentage, 33);
        // three-way tie: earliest in Category::ALL wins
        assert_eq!(favorite_category(&assigned), Some(Category::Mechanics));

        assert_eq!(favorite_category(&[]), None);
    }

    #[test]
    fn test_catalog_overview() {
        let mut snap = snapshot();
        snap.projects[0].available = false;
        let overview = catalog_overview(&snap);
        assert_eq!(overview.total_projects, 3);
        assert_eq!(overview.available_projects, 2);
        assert_eq!(overview.completed, 1);
        assert_eq!(overview.in_progress, 1);
    }

    #[test]
    fn test_group_stats() {
        let snap = snapshot();
        let by_category = category_stats(&snap);
        let mechanics = by_category
            .iter()
            .find(|s| s.key == Category::Mechanics)
            .unwrap();
        assert_eq!(mechanics.projects, 1);
        assert_eq!(mechanics.completed, 1);
        let design = by_category.iter().find(|s| s.key == Category::Design).unwrap();
        assert_eq!(design.projects, 0);

        let by_difficulty = difficulty_stats(&snap);
        assert_eq!(by_difficulty.len(), 3);
        assert_eq!(by_difficulty.iter().map(|s| s.projects).sum::<usize>(), 3);
        assert_eq!(by_difficulty.iter().map(|s| s.completed).sum::<usize>(), 1);
    }

    #[test]
    fn test_student_stats_covers_roster() {
        let roster: Vec<_> = seed::roster().iter().filter_map(|e| e.as_student()).collect();
        let stats = student_stats(&snapshot(), &roster);
        assert_eq!(stats.len(), 4);
        assert_eq!(stats[0].progress.assigned, 1);
        assert_eq!(stats[0].progress.percentage, 0);
        assert_eq!(stats[1].progress.percentage, 100);
        assert_eq!(stats[3].progress, StudentProgress::default());
    }
}
