//! Role-based screen routing.
//!
//! The current identity decides which subtree of screens is reachable.
//! `route` is the single place that branches on the role; everything else
//! works off the returned [`Subtree`].

use std::fmt;

use crate::error::{Result, RobolabError};
use crate::model::{Identity, Role};

/// The session as the router sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Unauthenticated,
    Admin(Identity),
    Student(Identity),
}

impl From<Option<Identity>> for Session {
    fn from(identity: Option<Identity>) -> Self {
        match identity {
            None => Self::Unauthenticated,
            Some(identity) => match identity.role() {
                Role::Admin => Self::Admin(identity),
                Role::Student => Self::Student(identity),
            },
        }
    }
}

impl Session {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Unauthenticated => None,
            Self::Admin(identity) | Self::Student(identity) => Some(identity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Login,
    AdminDashboard,
    AdminProjects,
    AdminStudents,
    AdminStatistics,
    AdminEditProject,
    ProjectDetail,
    StudentDashboard,
    ProjectsList,
    StudentProfile,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Welcome",
            Self::Login => "Sign in",
            Self::AdminDashboard => "Dashboard",
            Self::AdminProjects => "Projects",
            Self::AdminStudents => "Students",
            Self::AdminStatistics => "Statistics",
            Self::AdminEditProject => "Edit project",
            Self::ProjectDetail => "Project",
            Self::StudentDashboard => "Home",
            Self::ProjectsList => "Projects",
            Self::StudentProfile => "Profile",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subtree {
    Unauthenticated,
    Admin,
    Student,
}

pub fn route(session: &Session) -> Subtree {
    match session {
        Session::Unauthenticated => Subtree::Unauthenticated,
        Session::Admin(_) => Subtree::Admin,
        Session::Student(_) => Subtree::Student,
    }
}

impl Subtree {
    pub fn screens(&self) -> &'static [Screen] {
        match self {
            Self::Unauthenticated => &[Screen::Home, Screen::Login],
            Self::Admin => &[
                Screen::AdminDashboard,
                Screen::AdminProjects,
                Screen::AdminStudents,
                Screen::AdminStatistics,
                Screen::AdminEditProject,
                Screen::ProjectDetail,
            ],
            Self::Student => &[
                Screen::StudentDashboard,
                Screen::ProjectsList,
                Screen::StudentProfile,
                Screen::ProjectDetail,
            ],
        }
    }

    pub fn root(&self) -> Screen {
        match self {
            Self::Unauthenticated => Screen::Home,
            Self::Admin => Screen::AdminDashboard,
            Self::Student => Screen::StudentDashboard,
        }
    }

    /// Top-level screens switchable at any time. Empty when signed out.
    pub fn tabs(&self) -> &'static [Screen] {
        match self {
            Self::Unauthenticated => &[],
            Self::Admin => &[Screen::AdminDashboard, Screen::AdminProjects],
            Self::Student => &[
                Screen::StudentDashboard,
                Screen::ProjectsList,
                Screen::StudentProfile,
            ],
        }
    }

    pub fn contains(&self, screen: Screen) -> bool {
        self.screens().contains(&screen)
    }

    pub fn can_navigate(&self, from: Screen, to: Screen) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        if self.tabs().contains(&to) {
            return true;
        }
        use Screen::*;
        match (self, to) {
            (Self::Unauthenticated, Login) => from == Home,
            (Self::Admin, AdminEditProject) => matches!(from, AdminProjects | ProjectDetail),
            (Self::Admin, ProjectDetail) => from == AdminProjects,
            (Self::Admin, AdminStudents | AdminStatistics) => from == AdminDashboard,
            (Self::Student, ProjectDetail) => from == ProjectsList,
            _ => false,
        }
    }
}

/// Back-stack of screens for the current subtree.
#[derive(Debug, Clone)]
pub struct Navigator {
    subtree: Subtree,
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(&Session::Unauthenticated)
    }
}

impl Navigator {
    pub fn new(session: &Session) -> Self {
        let subtree = route(session);
        Self {
            subtree,
            stack: vec![subtree.root()],
        }
    }

    pub fn subtree(&self) -> Subtree {
        self.subtree
    }

    pub fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(self.subtree.root())
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Re-route after a session change. Returns `true` when the subtree
    /// changed and the stack was reset to its root.
    pub fn sync(&mut self, session: &Session) -> bool {
        let subtree = route(session);
        if subtree == self.subtree {
            return false;
        }
        tracing::debug!(from = ?self.subtree, to = ?subtree, "subtree changed");
        self.subtree = subtree;
        self.stack = vec![subtree.root()];
        true
    }

    pub fn push(&mut self, to: Screen) -> Result<()> {
        let from = self.current();
        if !self.subtree.can_navigate(from, to) {
            return Err(RobolabError::Forbidden(format!(
                "{from:?} -> {to:?} is not reachable"
            )));
        }
        self.stack.push(to);
        Ok(())
    }

    /// Pop one screen. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    pub fn switch_tab(&mut self, tab: Screen) -> Result<()> {
        if !self.subtree.tabs().contains(&tab) {
            return Err(RobolabError::Forbidden(format!("{tab:?} is not a tab")));
        }
        self.stack = if tab == self.subtree.root() {
            vec![tab]
        } else {
            vec![self.subtree.root(), tab]
        };
        Ok(())
    }
}
