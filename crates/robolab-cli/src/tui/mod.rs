pub mod app;
pub mod event;
mod views;
mod widgets;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};
use robolab_core::catalog::{CatalogBackend, MemoryCatalog};
use robolab_core::config::RobolabConfig;
use robolab_core::error::RobolabError;
use robolab_core::router::Screen;
use robolab_core::session::SessionStore;
use tokio::sync::mpsc;

use self::app::{App, Confirm, Toast, ToastKind};
use self::event::{AsyncAction, AsyncResult};

/// Entry point for the interactive TUI mode.
pub async fn run_tui(
    config: &RobolabConfig,
    sessions: Arc<SessionStore>,
    catalog: Arc<MemoryCatalog>,
) -> Result<()> {
    // Channels for async communication
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AsyncAction>();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<AsyncResult>();

    // Spawn async worker
    tokio::spawn(async move {
        worker_loop(sessions, catalog, &mut action_rx, &result_tx).await;
    });

    // Startup: saved-session check, then the initial catalog fetch
    action_tx.send(AsyncAction::Restore)?;
    action_tx.send(AsyncAction::LoadCatalog)?;

    let mut terminal = ratatui::init();
    let mut app = App::new(&config.ui);
    let tick = Duration::from_millis(config.ui.tick_ms);

    let result = run_loop(&mut terminal, &mut app, &action_tx, &mut result_rx, tick);

    ratatui::restore();

    result
}

fn run_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    action_tx: &mpsc::UnboundedSender<AsyncAction>,
    result_rx: &mut mpsc::UnboundedReceiver<AsyncResult>,
    tick: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        // Poll for async results (non-blocking)
        while let Ok(result) = result_rx.try_recv() {
            app.handle_result(result);
        }

        // A mutation completed: re-read the catalog
        if app.needs_refresh {
            app.needs_refresh = false;
            let _ = action_tx.send(AsyncAction::Refresh);
        }

        if ct_event::poll(tick)? {
            if let Event::Key(key) = ct_event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app.handle_key(key) {
                        let _ = action_tx.send(action);
                    }
                }
            }
        }

        app.tick_toast();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if !app.loaded {
        views::splash::render(frame, area);
        return;
    }

    match app.screen() {
        Screen::Home => views::home::render(frame, app, area),
        Screen::Login => views::login::render(frame, app, area),
        Screen::AdminDashboard => views::admin_dashboard::render(frame, app, area),
        Screen::AdminProjects | Screen::ProjectsList => views::list::render(frame, app, area),
        Screen::AdminStudents => views::students::render(frame, app, area),
        Screen::AdminStatistics => views::statistics::render(frame, app, area),
        Screen::AdminEditProject => views::edit::render(frame, app, area),
        Screen::ProjectDetail => views::detail::render(frame, app, area),
        Screen::StudentDashboard => views::student_dashboard::render(frame, app, area),
        Screen::StudentProfile => views::profile::render(frame, app, area),
    }

    if let Some(confirm) = app.confirm {
        render_confirm(frame, confirm);
    }

    // Render toast overlay if present
    if let Some(ref toast) = app.toast {
        render_toast(frame, toast);
    }
}

fn render_confirm(frame: &mut Frame, confirm: Confirm) {
    use ratatui::{
        layout::{Constraint, Flex, Layout},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Clear, Paragraph, Wrap},
    };

    let [area] = Layout::horizontal([Constraint::Percentage(50)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::vertical([Constraint::Length(6)])
        .flex(Flex::Center)
        .areas(area);

    let lines = vec![
        Line::from(confirm.question()),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" confirm   "),
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" cancel"),
        ]),
    ];

    frame.render_widget(Clear, area);
    let dialog = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Confirm "),
    );
    frame.render_widget(dialog, area);
}

fn render_toast(frame: &mut Frame, toast: &Toast) {
    use ratatui::{
        layout::{Constraint, Flex, Layout},
        style::{Color, Style},
        widgets::{Block, Borders, Clear, Paragraph},
    };

    let (symbol, color, title) = match toast.kind {
        ToastKind::Info => ("✓", Color::Green, " Done "),
        ToastKind::Error => ("✗", Color::Red, " Error "),
    };

    let area = frame.area();
    let [toast_area] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(area);
    let [toast_area] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::End)
        .areas(toast_area);

    frame.render_widget(Clear, toast_area);
    let widget = Paragraph::new(format!(" {symbol} {}", toast.message))
        .style(Style::default().fg(Color::White).bg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );
    frame.render_widget(widget, toast_area);
}

/// Async worker loop: runs store operations one at a time, in the order
/// the UI sent them.
async fn worker_loop(
    sessions: Arc<SessionStore>,
    catalog: Arc<MemoryCatalog>,
    action_rx: &mut mpsc::UnboundedReceiver<AsyncAction>,
    result_tx: &mpsc::UnboundedSender<AsyncResult>,
) {
    while let Some(action) = action_rx.recv().await {
        let result = match action {
            AsyncAction::Restore => AsyncResult::Restored(sessions.restore().await),
            AsyncAction::LoadCatalog => match catalog.load().await {
                Ok(snapshot) => AsyncResult::Loaded {
                    snapshot,
                    roster: sessions.roster_students(),
                },
                Err(e) => failure("load projects", e),
            },
            AsyncAction::Refresh => match catalog.snapshot().await {
                Ok(snapshot) => AsyncResult::Snapshot(snapshot),
                Err(e) => failure("refresh", e),
            },
            AsyncAction::Login { username, password } => {
                match sessions.login(&username, &password).await {
                    Ok(identity) => AsyncResult::LoggedIn(identity),
                    Err(e) => failure("sign in", e),
                }
            }
            AsyncAction::Logout => {
                sessions.logout();
                AsyncResult::LoggedOut
            }
            AsyncAction::CreateProject(input) => match catalog.create_project(input).await {
                Ok(project) => AsyncResult::ProjectSaved(Box::new(project)),
                Err(e) => failure("create project", e),
            },
            AsyncAction::UpdateProject { id, patch } => {
                match catalog.update_project(id, patch).await {
                    Ok(project) => AsyncResult::ProjectSaved(Box::new(project)),
                    Err(e) => failure("update project", e),
                }
            }
            AsyncAction::DeleteProject(id) => match catalog.delete_project(id).await {
                Ok(()) => AsyncResult::ProjectDeleted(id),
                Err(e) => failure("delete project", e),
            },
            AsyncAction::AssignProject { student, project } => {
                match catalog.assign_project(student, project).await {
                    Ok(assignment) => AsyncResult::Assigned(assignment),
                    Err(e) => failure("assign project", e),
                }
            }
            AsyncAction::CompleteProject { student, project } => {
                match catalog.complete_project(student, project).await {
                    Ok(assignment) => AsyncResult::Completed(assignment),
                    Err(e) => failure("complete project", e),
                }
            }
        };
        if result_tx.send(result).is_err() {
            break; // UI closed
        }
    }
}

/// User-facing errors are shown as-is; anything else gets the operation
/// name in front.
fn failure(operation: &str, err: RobolabError) -> AsyncResult {
    if err.is_user_facing() {
        AsyncResult::Error(err.to_string())
    } else {
        tracing::debug!("failed to {operation}: {err}");
        AsyncResult::Error(format!("Failed to {operation}: {err}"))
    }
}
