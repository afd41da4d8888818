use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use robolab_core::catalog::CatalogSnapshot;
use robolab_core::config::UiConfig;
use robolab_core::error::RobolabError;
use robolab_core::insights::{self, ProjectFilter};
use robolab_core::model::*;
use robolab_core::router::{Navigator, Screen, Session};

use super::event::{AsyncAction, AsyncResult};

/// Input mode within the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Filter,
}

/// A pending yes/no question shown over the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    DeleteProject(ProjectId),
    CompleteProject(ProjectId),
}

impl Confirm {
    pub fn question(&self) -> &'static str {
        match self {
            Self::DeleteProject(_) => {
                "Delete this project? Assignments to it are removed as well."
            }
            Self::CompleteProject(_) => "Mark this project as completed?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub field: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            field: LoginField::Username,
        }
    }
}

impl LoginForm {
    fn input(&mut self) -> &mut String {
        match self.field {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    ImageUrl,
    Duration,
    Category,
    Difficulty,
    Available,
    Materials,
    Steps,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        Self::Title,
        Self::Description,
        Self::ImageUrl,
        Self::Duration,
        Self::Category,
        Self::Difficulty,
        Self::Available,
        Self::Materials,
        Self::Steps,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::ImageUrl => "Image URL (blank for placeholder)",
            Self::Duration => "Duration",
            Self::Category => "Category",
            Self::Difficulty => "Difficulty",
            Self::Available => "Available to students",
            Self::Materials => "Materials (one per line)",
            Self::Steps => "Steps (one per line)",
        }
    }

    /// Fields where Enter inserts a newline.
    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Description | Self::Materials | Self::Steps)
    }
}

/// The project create/edit form.
#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub editing: Option<ProjectId>,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub duration: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub available: bool,
    pub materials: String,
    pub steps: String,
    pub field: usize,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            duration: String::new(),
            category: Category::Electronics,
            difficulty: Difficulty::Beginner,
            available: true,
            materials: String::new(),
            steps: String::new(),
            field: 0,
        }
    }
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            editing: Some(project.id),
            title: project.title.clone(),
            description: project.description.clone(),
            image_url: project.image_url.clone(),
            duration: project.duration.clone(),
            category: project.category,
            difficulty: project.difficulty,
            available: project.available,
            materials: project.materials.join("\n"),
            steps: project.steps.join("\n"),
            field: 0,
        }
    }

    pub fn current_field(&self) -> FormField {
        FormField::ALL[self.field % FormField::ALL.len()]
    }

    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Description => Some(&self.description),
            FormField::ImageUrl => Some(&self.image_url),
            FormField::Duration => Some(&self.duration),
            FormField::Materials => Some(&self.materials),
            FormField::Steps => Some(&self.steps),
            FormField::Category | FormField::Difficulty | FormField::Available => None,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.current_field() {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::ImageUrl => Some(&mut self.image_url),
            FormField::Duration => Some(&mut self.duration),
            FormField::Materials => Some(&mut self.materials),
            FormField::Steps => Some(&mut self.steps),
            FormField::Category | FormField::Difficulty | FormField::Available => None,
        }
    }

    /// Step a selector field. Returns `false` on text fields.
    fn cycle(&mut self, forward: bool) -> bool {
        match self.current_field() {
            FormField::Category => {
                self.category = step(&Category::ALL, self.category, forward);
                true
            }
            FormField::Difficulty => {
                self.difficulty = step(&Difficulty::ALL, self.difficulty, forward);
                true
            }
            FormField::Available => {
                self.available = !self.available;
                true
            }
            _ => false,
        }
    }

    pub fn to_new_project(&self) -> NewProject {
        let mut input = NewProject::new(self.title.trim(), self.description.trim())
            .with_category(self.category)
            .with_difficulty(self.difficulty)
            .with_duration(self.duration.trim())
            .with_materials(lines(&self.materials))
            .with_steps(lines(&self.steps))
            .with_available(self.available);
        if !self.image_url.trim().is_empty() {
            input = input.with_image_url(self.image_url.trim());
        }
        input
    }

    /// Validate and turn the form into the matching store action.
    pub fn submit(&self) -> Result<AsyncAction, RobolabError> {
        let input = self.to_new_project();
        match self.editing {
            Some(id) => {
                let patch = ProjectPatch::from_new(input);
                validate_patch(&patch)?;
                Ok(AsyncAction::UpdateProject { id, patch })
            }
            None => {
                validate_new_project(&input)?;
                Ok(AsyncAction::CreateProject(input))
            }
        }
    }
}

fn lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

fn step<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let pos = all.iter().position(|x| *x == current).unwrap_or(0);
    let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
    all[next]
}

/// Cycle an optional filter value: All -> first -> ... -> last -> All.
fn step_filter<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let options: Vec<Option<T>> = std::iter::once(None)
        .chain(all.iter().copied().map(Some))
        .collect();
    step(&options, current, forward)
}

/// Central application state.
pub struct App {
    pub nav: Navigator,
    pub session: Session,
    pub input_mode: InputMode,
    pub should_quit: bool,
    pub loading: bool,
    pub loaded: bool,
    pub needs_refresh: bool,

    pub snapshot: CatalogSnapshot,
    pub roster: Vec<Student>,

    // -- Login --
    pub login: LoginForm,

    // -- Lists --
    pub selected: usize,
    pub filter: ProjectFilter,

    // -- Detail --
    pub detail_id: Option<ProjectId>,
    pub detail_scroll: u16,

    // -- Edit form --
    pub form: ProjectForm,

    pub confirm: Option<Confirm>,

    // -- Toast --
    pub toast: Option<Toast>,
    pub toast_timer: u8,
    toast_ticks: u8,
    pub recommended_limit: usize,
}

impl App {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            nav: Navigator::default(),
            session: Session::Unauthenticated,
            input_mode: InputMode::Normal,
            should_quit: false,
            loading: true,
            loaded: false,
            needs_refresh: false,

            snapshot: CatalogSnapshot::default(),
            roster: Vec::new(),

            login: LoginForm::default(),

            selected: 0,
            filter: ProjectFilter::default(),

            detail_id: None,
            detail_scroll: 0,

            form: ProjectForm::default(),

            confirm: None,

            toast: None,
            toast_timer: 0,
            toast_ticks: ui.toast_ticks,
            recommended_limit: ui.recommended_limit,
        }
    }

    pub fn screen(&self) -> Screen {
        self.nav.current()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.session, Session::Admin(_))
    }

    /// Process an async result from the worker.
    pub fn handle_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Restored(identity) => {
                self.set_session(Session::from(identity));
            }
            AsyncResult::Loaded { snapshot, roster } => {
                self.snapshot = snapshot;
                self.roster = roster;
                self.loading = false;
                self.loaded = true;
            }
            AsyncResult::Snapshot(snapshot) => {
                self.snapshot = snapshot;
                self.clamp_selection();
                self.loading = false;
            }
            AsyncResult::LoggedIn(identity) => {
                self.login = LoginForm::default();
                self.loading = false;
                self.set_session(Session::from(Some(identity)));
            }
            AsyncResult::LoggedOut => {
                self.loading = false;
                self.set_session(Session::Unauthenticated);
            }
            AsyncResult::ProjectSaved(project) => {
                self.show_toast(ToastKind::Info, format!("Saved \"{}\"", project.title));
                if self.screen() == Screen::AdminEditProject {
                    self.nav.back();
                }
                self.needs_refresh = true;
            }
            AsyncResult::ProjectDeleted(_) => {
                self.show_toast(ToastKind::Info, "Project deleted".to_string());
                self.needs_refresh = true;
            }
            AsyncResult::Assigned(_) => {
                self.show_toast(ToastKind::Info, "Project assigned to you".to_string());
                self.needs_refresh = true;
            }
            AsyncResult::Completed(_) => {
                self.show_toast(ToastKind::Info, "Project completed".to_string());
                self.needs_refresh = true;
            }
            AsyncResult::Error(msg) => {
                self.show_toast(ToastKind::Error, msg);
                self.loading = false;
            }
        }
    }

    fn set_session(&mut self, session: Session) {
        self.session = session;
        if self.nav.sync(&self.session) {
            self.reset_view_state();
        }
    }

    fn reset_view_state(&mut self) {
        self.input_mode = InputMode::Normal;
        self.selected = 0;
        self.filter = ProjectFilter::default();
        self.detail_id = None;
        self.detail_scroll = 0;
        self.confirm = None;
    }

    /// Handle a key event. Returns an optional async action to dispatch.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if let Some(confirm) = self.confirm {
            return self.handle_confirm(confirm, key);
        }

        match (self.screen(), self.input_mode) {
            (Screen::AdminProjects | Screen::ProjectsList, InputMode::Search) => {
                self.handle_search(key);
                None
            }
            (Screen::AdminProjects | Screen::ProjectsList, InputMode::Filter) => {
                self.handle_filter(key);
                None
            }
            (Screen::Home, _) => self.handle_home(key),
            (Screen::Login, _) => self.handle_login(key),
            (Screen::AdminEditProject, _) => self.handle_edit(key),
            (Screen::AdminProjects | Screen::ProjectsList, _) => self.handle_list(key),
            (Screen::ProjectDetail, _) => self.handle_detail(key),
            (Screen::AdminStudents, _) => {
                self.handle_students(key);
                None
            }
            (screen, _) => self.handle_tab_screen(screen, key),
        }
    }

    fn handle_confirm(&mut self, confirm: Confirm, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.confirm = None;
                match confirm {
                    Confirm::DeleteProject(id) => Some(AsyncAction::DeleteProject(id)),
                    Confirm::CompleteProject(project) => {
                        let student = self.identity()?.id();
                        Some(AsyncAction::CompleteProject { student, project })
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.confirm = None;
                None
            }
            _ => None,
        }
    }

    fn handle_home(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('l') => {
                self.navigate(Screen::Login);
            }
            _ => {}
        }
        None
    }

    fn handle_login(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Esc => {
                self.login = LoginForm::default();
                self.nav.back();
                None
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_field();
                None
            }
            KeyCode::Enter => {
                if self.login.field == LoginField::Username {
                    self.login.field = LoginField::Password;
                    return None;
                }
                if self.loading {
                    return None;
                }
                if self.login.username.trim().is_empty() || self.login.password.is_empty() {
                    self.show_toast(
                        ToastKind::Error,
                        "Enter both username and password".to_string(),
                    );
                    return None;
                }
                self.loading = true;
                Some(AsyncAction::Login {
                    username: self.login.username.trim().to_string(),
                    password: self.login.password.clone(),
                })
            }
            KeyCode::Backspace => {
                self.login.input().pop();
                None
            }
            KeyCode::Char(c) => {
                self.login.input().push(c);
                None
            }
            _ => None,
        }
    }

    /// Keys shared by the tab screens: dashboards, profile and statistics.
    fn handle_tab_screen(&mut self, screen: Screen, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.next_tab(true),
            KeyCode::BackTab => self.next_tab(false),
            KeyCode::Esc | KeyCode::Backspace => {
                self.nav.back();
            }
            KeyCode::Char('L') => return self.logout(),
            KeyCode::Char('r') => return Some(self.refresh()),
            KeyCode::Char('s') if screen == Screen::AdminDashboard => {
                self.navigate(Screen::AdminStudents);
            }
            KeyCode::Char('t') if screen == Screen::AdminDashboard => {
                self.navigate(Screen::AdminStatistics);
            }
            KeyCode::Char('p') if screen == Screen::AdminDashboard => {
                self.switch_tab(Screen::AdminProjects);
            }
            KeyCode::Char('b') if screen == Screen::StudentDashboard => {
                self.switch_tab(Screen::ProjectsList);
            }
            _ => {}
        }
        None
    }

    fn handle_students(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Esc | KeyCode::Backspace => {
                self.nav.back();
                self.selected = 0;
            }
            _ => {}
        }
    }

    fn handle_list(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        let admin = self.screen() == Screen::AdminProjects;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => {
                self.selected = self.visible_count().saturating_sub(1);
            }
            KeyCode::PageDown => self.move_selection(20),
            KeyCode::PageUp => self.move_selection(-20),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('f') => self.input_mode = InputMode::Filter,
            KeyCode::Tab => self.next_tab(true),
            KeyCode::BackTab => self.next_tab(false),
            KeyCode::Esc => {
                if self.filter.is_empty() {
                    self.nav.back();
                } else {
                    self.filter = ProjectFilter::default();
                    self.selected = 0;
                }
            }
            KeyCode::Char('r') => return Some(self.refresh()),
            KeyCode::Enter => {
                if let Some(id) = self.selected_project().map(|p| p.id) {
                    self.open_detail(id);
                }
            }
            KeyCode::Char('n') if admin => {
                self.form = ProjectForm::default();
                self.navigate(Screen::AdminEditProject);
            }
            KeyCode::Char('e') if admin => {
                if let Some(project) = self.selected_project() {
                    self.form = ProjectForm::from_project(project);
                    self.navigate(Screen::AdminEditProject);
                }
            }
            KeyCode::Char('d') if admin => {
                if let Some(id) = self.selected_project().map(|p| p.id) {
                    self.confirm = Some(Confirm::DeleteProject(id));
                }
            }
            KeyCode::Char('a') if admin => {
                let (id, available) = self.selected_project().map(|p| (p.id, p.available))?;
                return Some(AsyncAction::UpdateProject {
                    id,
                    patch: ProjectPatch::availability(!available),
                });
            }
            _ => {}
        }
        None
    }

    fn handle_search(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter.query.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.filter.query.pop();
            }
            KeyCode::Char(c) => self.filter.query.push(c),
            _ => return,
        }
        self.selected = 0;
    }

    fn handle_filter(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('f') => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.filter.category = step_filter(&Category::ALL, self.filter.category, true);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.filter.category = step_filter(&Category::ALL, self.filter.category, false);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.filter.difficulty =
                    step_filter(&Difficulty::ALL, self.filter.difficulty, true);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.filter.difficulty =
                    step_filter(&Difficulty::ALL, self.filter.difficulty, false);
            }
            _ => return,
        }
        self.selected = 0;
    }

    fn handle_detail(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => {
                self.nav.back();
                self.detail_id = None;
                self.detail_scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(20),
            KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(20),
            KeyCode::Char('e') if self.is_admin() => {
                if let Some(project) = self.detail_project() {
                    self.form = ProjectForm::from_project(project);
                    self.navigate(Screen::AdminEditProject);
                }
            }
            KeyCode::Char('a') if !self.is_admin() => {
                let project = self.detail_project()?.id;
                let student = self.identity()?.id();
                if self.snapshot.assignment(student, project).is_none() {
                    return Some(AsyncAction::AssignProject { student, project });
                }
            }
            KeyCode::Char('c') if !self.is_admin() => {
                let project = self.detail_project()?.id;
                let student = self.identity()?.id();
                if self
                    .snapshot
                    .assignment(student, project)
                    .is_some_and(|a| !a.is_completed())
                {
                    self.confirm = Some(Confirm::CompleteProject(project));
                }
            }
            _ => {}
        }
        None
    }

    fn handle_edit(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return match self.form.submit() {
                Ok(action) => Some(action),
                Err(e) => {
                    self.show_toast(ToastKind::Error, e.to_string());
                    None
                }
            };
        }

        let field = self.form.current_field();
        match key.code {
            KeyCode::Esc => {
                self.nav.back();
            }
            KeyCode::Tab => {
                self.form.field = (self.form.field + 1) % FormField::ALL.len();
            }
            KeyCode::BackTab => {
                let len = FormField::ALL.len();
                self.form.field = (self.form.field + len - 1) % len;
            }
            KeyCode::Left => {
                self.form.cycle(false);
            }
            KeyCode::Right | KeyCode::Char(' ') if self.form.text(field).is_none() => {
                self.form.cycle(true);
            }
            KeyCode::Enter if field.is_multiline() => {
                if let Some(text) = self.form.text_mut() {
                    text.push('\n');
                }
            }
            KeyCode::Enter => {
                if !self.form.cycle(true) {
                    self.form.field = (self.form.field + 1) % FormField::ALL.len();
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.form.text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.form.text_mut() {
                    text.push(c);
                }
            }
            _ => {}
        }
        None
    }

    fn logout(&mut self) -> Option<AsyncAction> {
        self.loading = true;
        Some(AsyncAction::Logout)
    }

    fn refresh(&mut self) -> AsyncAction {
        self.loading = true;
        AsyncAction::Refresh
    }

    fn navigate(&mut self, to: Screen) {
        if let Err(e) = self.nav.push(to) {
            tracing::debug!("navigation refused: {e}");
        }
    }

    fn switch_tab(&mut self, tab: Screen) {
        if self.nav.switch_tab(tab).is_ok() {
            self.input_mode = InputMode::Normal;
            self.selected = 0;
        }
    }

    fn next_tab(&mut self, forward: bool) {
        let tabs = self.nav.subtree().tabs();
        if tabs.is_empty() {
            return;
        }
        let current = self.screen();
        let next = if tabs.contains(&current) {
            step(tabs, current, forward)
        } else {
            tabs[0]
        };
        self.switch_tab(next);
    }

    fn open_detail(&mut self, id: ProjectId) {
        if self.nav.push(Screen::ProjectDetail).is_ok() {
            self.detail_id = Some(id);
            self.detail_scroll = 0;
        }
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.visible_count();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected as i32;
        let new = (current + delta).clamp(0, len as i32 - 1);
        self.selected = new as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_count();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Projects shown on the current list screen, filters applied.
    /// Students only see available projects.
    pub fn visible_projects(&self) -> Vec<&Project> {
        match self.screen() {
            Screen::AdminProjects => {
                insights::filter_projects(&self.snapshot.projects, &self.filter)
            }
            Screen::ProjectsList => insights::available_projects(&self.snapshot.projects)
                .into_iter()
                .filter(|p| self.filter.matches(p))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// How many rows the current screen lists.
    pub fn visible_count(&self) -> usize {
        match self.screen() {
            Screen::AdminStudents => self.roster.len(),
            _ => self.visible_projects().len(),
        }
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.visible_projects().get(self.selected).copied()
    }

    pub fn detail_project(&self) -> Option<&Project> {
        self.detail_id.and_then(|id| self.snapshot.project(id))
    }

    /// The signed-in student's assignments, joined to their projects.
    pub fn my_projects(&self) -> Vec<insights::AssignedProject> {
        match &self.session {
            Session::Student(identity) => {
                insights::assigned_projects(&self.snapshot, identity.id())
            }
            _ => Vec::new(),
        }
    }

    pub fn show_toast(&mut self, kind: ToastKind, message: String) {
        self.toast = Some(Toast { kind, message });
        self.toast_timer = self.toast_ticks;
    }

    /// Tick the toast timer down.
    pub fn tick_toast(&mut self) {
        if self.toast_timer > 0 {
            self.toast_timer -= 1;
            if self.toast_timer == 0 {
                self.toast = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robolab_core::seed;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(&UiConfig::default());
        let roster: Vec<_> = seed::roster().iter().filter_map(|e| e.as_student()).collect();
        app.handle_result(AsyncResult::Loaded {
            snapshot: CatalogSnapshot {
                projects: seed::projects(),
                assignments: seed::assignments(),
            },
            roster,
        });
        app
    }

    fn admin_app() -> App {
        let mut app = loaded_app();
        app.handle_result(AsyncResult::LoggedIn(Identity::new(
            UserId(1),
            "admin",
            "Administrator",
            Role::Admin,
        )));
        app
    }

    fn student_app(id: u64) -> App {
        let mut app = loaded_app();
        app.handle_result(AsyncResult::LoggedIn(Identity::new(
            UserId(id),
            format!("student{}", id - 1),
            "Student",
            Role::Student,
        )));
        app
    }

    #[test]
    fn test_initial_state() {
        let app = App::new(&UiConfig::default());
        assert_eq!(app.screen(), Screen::Home);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);
        assert!(app.loading);
        assert!(!app.loaded);
    }

    #[test]
    fn test_quit() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = loaded_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_login_form_submits() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen(), Screen::Login);

        type_text(&mut app, "admin");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "admin123");
        assert_eq!(app.login.username, "admin");

        match app.handle_key(key(KeyCode::Enter)) {
            Some(AsyncAction::Login { username, password }) => {
                assert_eq!(username, "admin");
                assert_eq!(password, "admin123");
            }
            other => panic!("expected login action, got {other:?}"),
        }
        assert!(app.loading);
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Tab));
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(app.toast.as_ref().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn test_failed_login_stays_on_login() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_result(AsyncResult::Error("Invalid credentials".into()));
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(app.toast.as_ref().unwrap().message, "Invalid credentials");
        assert!(!app.loading);
    }

    #[test]
    fn test_login_routes_by_role() {
        let app = admin_app();
        assert_eq!(app.screen(), Screen::AdminDashboard);
        assert!(app.is_admin());
        let app = student_app(2);
        assert_eq!(app.screen(), Screen::StudentDashboard);
    }

    #[test]
    fn test_logout_returns_home() {
        let mut app = student_app(2);
        assert!(matches!(
            app.handle_key(key(KeyCode::Char('L'))),
            Some(AsyncAction::Logout)
        ));
        app.handle_result(AsyncResult::LoggedOut);
        assert_eq!(app.screen(), Screen::Home);
        assert!(app.identity().is_none());
    }

    #[test]
    fn test_tab_cycles_student_tabs() {
        let mut app = student_app(2);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.screen(), Screen::ProjectsList);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.screen(), Screen::StudentProfile);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.screen(), Screen::StudentDashboard);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.screen(), Screen::StudentProfile);
    }

    #[test]
    fn test_admin_dashboard_shortcuts() {
        let mut app = admin_app();
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.screen(), Screen::AdminStudents);
        assert_eq!(app.visible_count(), 4);
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.screen(), Screen::AdminStatistics);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen(), Screen::AdminDashboard);
    }

    #[test]
    fn test_selection_navigation() {
        let mut app = admin_app();
        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.screen(), Screen::AdminProjects);
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected, 2);
        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.selected, 1);
        assert_eq!(app.selected_project().unwrap().id, ProjectId(2));
    }

    #[test]
    fn test_student_list_hides_unavailable() {
        let mut app = student_app(2);
        app.snapshot.projects[0].available = false;
        app.handle_key(key(KeyCode::Tab));
        let ids: Vec<_> = app.visible_projects().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProjectId(2), ProjectId(3)]);
    }

    #[test]
    fn test_search_filters_live() {
        let mut app = student_app(2);
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Search);
        type_text(&mut app, "arm");
        assert_eq!(app.visible_count(), 1);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.filter.query, "arm");

        app.handle_key(key(KeyCode::Esc));
        assert!(app.filter.is_empty());
        assert_eq!(app.visible_count(), 3);
    }

    #[test]
    fn test_filter_mode_cycling() {
        let mut app = admin_app();
        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.input_mode, InputMode::Filter);

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.filter.category, Some(Category::Mechanics));
        assert_eq!(app.visible_count(), 1);

        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.filter.category, None);
        // wrap around left
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.filter.category, Some(Category::Science));

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.filter.difficulty, Some(Difficulty::Beginner));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_student_detail_only_from_list() {
        let mut app = student_app(4);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen(), Screen::StudentDashboard);

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen(), Screen::ProjectDetail);
        assert_eq!(app.detail_project().unwrap().id, ProjectId(1));
    }

    #[test]
    fn test_student_assign_and_complete() {
        let mut app = student_app(4);
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));

        match app.handle_key(key(KeyCode::Char('a'))) {
            Some(AsyncAction::AssignProject { student, project }) => {
                assert_eq!(student, UserId(4));
                assert_eq!(project, ProjectId(1));
            }
            other => panic!("expected assign action, got {other:?}"),
        }

        // not assigned yet: nothing to complete
        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.confirm.is_none());

        let assignment = Assignment::new(AssignmentId(3), UserId(4), ProjectId(1), chrono::Utc::now());
        app.snapshot.assignments.push(assignment.clone());
        app.handle_result(AsyncResult::Assigned(assignment));
        assert!(app.needs_refresh);
        assert!(app.handle_key(key(KeyCode::Char('a'))).is_none());

        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(app.confirm, Some(Confirm::CompleteProject(ProjectId(1))));
        match app.handle_key(key(KeyCode::Char('y'))) {
            Some(AsyncAction::CompleteProject { student, project }) => {
                assert_eq!(student, UserId(4));
                assert_eq!(project, ProjectId(1));
            }
            other => panic!("expected complete action, got {other:?}"),
        }
        assert!(app.confirm.is_none());
    }

    #[test]
    fn test_completed_project_has_no_complete_action() {
        let mut app = student_app(3);
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.detail_project().unwrap().id, ProjectId(2));
        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.confirm.is_none());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = admin_app();
        app.handle_key(key(KeyCode::Char('p')));
        assert!(app.handle_key(key(KeyCode::Char('d'))).is_none());
        assert_eq!(app.confirm, Some(Confirm::DeleteProject(ProjectId(1))));

        assert!(app.handle_key(key(KeyCode::Esc)).is_none());
        assert!(app.confirm.is_none());
        assert_eq!(app.screen(), Screen::AdminProjects);

        app.handle_key(key(KeyCode::Char('d')));
        assert!(matches!(
            app.handle_key(key(KeyCode::Enter)),
            Some(AsyncAction::DeleteProject(ProjectId(1)))
        ));
    }

    #[test]
    fn test_toggle_availability() {
        let mut app = admin_app();
        app.handle_key(key(KeyCode::Char('p')));
        match app.handle_key(key(KeyCode::Char('a'))) {
            Some(AsyncAction::UpdateProject { id, patch }) => {
                assert_eq!(id, ProjectId(1));
                assert_eq!(patch, ProjectPatch::availability(false));
            }
            other => panic!("expected update action, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_from_detail() {
        let mut app = admin_app();
        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen(), Screen::ProjectDetail);
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.screen(), Screen::AdminEditProject);
        assert_eq!(app.form.editing, Some(ProjectId(1)));
        assert_eq!(app.form.title, "Line Following Robot");
        assert_eq!(app.form.materials.lines().count(), 5);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen(), Screen::ProjectDetail);
    }

    #[test]
    fn test_new_project_form_validates() {
        let mut app = admin_app();
        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.screen(), Screen::AdminEditProject);
        assert!(app.form.editing.is_none());

        type_text(&mut app, "Bristle Bot");
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(app.handle_key(save).is_none());
        assert_eq!(app.toast.as_ref().map(|t| t.kind), Some(ToastKind::Error));

        app.form.description = "A tiny vibrating robot.".into();
        app.form.duration = "1 hour".into();
        app.form.materials = "Toothbrush head\nVibration motor\n\n".into();
        app.form.steps = "Glue the motor".into();
        match app.handle_key(save) {
            Some(AsyncAction::CreateProject(input)) => {
                assert_eq!(input.title, "Bristle Bot");
                assert_eq!(input.materials, vec!["Toothbrush head", "Vibration motor"]);
                assert!(input.image_url.is_none());
            }
            other => panic!("expected create action, got {other:?}"),
        }
    }

    #[test]
    fn test_form_selectors_cycle() {
        let mut form = ProjectForm::default();
        form.field = 4;
        assert_eq!(form.current_field(), FormField::Category);
        assert!(form.cycle(true));
        assert_eq!(form.category, Category::Programming);
        assert!(form.cycle(false));
        assert!(form.cycle(false));
        assert_eq!(form.category, Category::Mechanics);

        form.field = 6;
        assert!(form.cycle(true));
        assert!(!form.available);

        form.field = 0;
        assert!(!form.cycle(true));
    }

    #[test]
    fn test_edit_submit_builds_patch() {
        let project = seed::projects().remove(1);
        let mut form = ProjectForm::from_project(&project);
        form.available = false;
        match form.submit().unwrap() {
            AsyncAction::UpdateProject { id, patch } => {
                assert_eq!(id, ProjectId(2));
                assert_eq!(patch.available, Some(false));
                assert_eq!(patch.title.as_deref(), Some("Robotic Arm"));
            }
            other => panic!("expected update action, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_submit_rejects_cleared_title() {
        let project = seed::projects().remove(0);
        let mut form = ProjectForm::from_project(&project);
        form.title = "   ".into();
        let err = form.submit().unwrap_err();
        assert!(matches!(err, RobolabError::InvalidInput(_)));

        let mut form = ProjectForm::from_project(&project);
        form.steps = "\n\n".into();
        assert!(form.submit().is_err());
    }

    #[test]
    fn test_saved_project_returns_to_list() {
        let mut app = admin_app();
        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(key(KeyCode::Char('n')));
        let project = seed::projects().remove(0);
        app.handle_result(AsyncResult::ProjectSaved(Box::new(project)));
        assert_eq!(app.screen(), Screen::AdminProjects);
        assert!(app.needs_refresh);
        assert_eq!(app.toast.as_ref().map(|t| t.kind), Some(ToastKind::Info));
    }

    #[test]
    fn test_snapshot_clamps_selection() {
        let mut app = admin_app();
        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(key(KeyCode::Char('G')));
        assert_eq!(app.selected, 2);
        let mut snapshot = app.snapshot.clone();
        snapshot.projects.truncate(1);
        app.handle_result(AsyncResult::Snapshot(snapshot));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_my_projects() {
        let app = student_app(3);
        let mine = app.my_projects();
        assert_eq!(mine.len(), 1);
        assert!(mine[0].assignment.is_completed());
        assert!(admin_app().my_projects().is_empty());
    }

    #[test]
    fn test_toast_timer() {
        let mut app = App::new(&UiConfig::default());
        app.handle_result(AsyncResult::Error("test error".into()));
        assert!(app.toast.is_some());
        assert_eq!(app.toast_timer, 60);

        for _ in 0..59 {
            app.tick_toast();
        }
        assert!(app.toast.is_some());

        app.tick_toast();
        assert!(app.toast.is_none());
        assert_eq!(app.toast_timer, 0);
    }
}
