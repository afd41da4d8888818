mod tui;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use robolab_core::catalog::{CatalogBackend, CatalogSnapshot, MemoryCatalog};
use robolab_core::config::{LatencyConfig, RobolabConfig};
use robolab_core::insights::{
    self, CatalogOverview, GroupStats, ProjectFilter, StudentStats,
};
use robolab_core::model::*;
use robolab_core::session::SessionStore;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "robolab",
    about = "RoboLab: robotics projects for students",
    version
)]
enum Cli {
    /// Launch the interactive terminal UI (default)
    Tui,
    /// List projects in the catalog
    Projects {
        /// Only projects students can take on
        #[arg(long)]
        available: bool,
        /// Filter by category (mechanics, electronics, programming, design, science)
        #[arg(short, long)]
        category: Option<Category>,
        /// Filter by difficulty (beginner, intermediate, advanced)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        /// Case-insensitive match on title and description
        #[arg(short, long)]
        search: Option<String>,
        /// Output raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show catalog and per-student statistics
    Stats {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .compact()
        .init();

    // No subcommand means the TUI
    let cli = if std::env::args_os().len() <= 1 {
        Cli::Tui
    } else {
        Cli::parse()
    };

    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let config = match RobolabConfig::load(Some(&cwd)) {
        Ok((config, warnings)) => {
            for warning in warnings {
                tracing::warn!("config: {warning}");
            }
            config
        }
        Err(e) => {
            tracing::warn!("using default configuration: {e}");
            RobolabConfig::default_config()
        }
    };

    run(cli, &config).await
}

async fn run(cli: Cli, config: &RobolabConfig) -> Result<()> {
    match cli {
        Cli::Tui => {
            let sessions = Arc::new(SessionStore::seeded(&config.latency));
            let catalog = Arc::new(MemoryCatalog::seeded(&config.latency));
            tui::run_tui(config, sessions, catalog).await
        }
        Cli::Projects {
            available,
            category,
            difficulty,
            search,
            json,
        } => {
            let filter = ProjectFilter {
                query: search.unwrap_or_default(),
                category,
                difficulty,
            };
            cmd_projects(&filter, available, json).await
        }
        Cli::Stats { json } => cmd_stats(json).await,
        Cli::Config => cmd_config(config),
    }
}

/// Non-interactive commands read the seeded catalog without simulated latency.
async fn snapshot() -> Result<CatalogSnapshot> {
    let catalog = MemoryCatalog::seeded(&LatencyConfig::instant());
    catalog
        .snapshot()
        .await
        .context("failed to read the catalog")
}

async fn cmd_projects(filter: &ProjectFilter, available: bool, json: bool) -> Result<()> {
    let snapshot = snapshot().await?;
    let projects: Vec<&Project> = insights::filter_projects(&snapshot.projects, filter)
        .into_iter()
        .filter(|p| !available || p.available)
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&projects)
            .context("failed to serialize projects")?;
        println!("{out}");
        return Ok(());
    }

    if projects.is_empty() {
        println!("{}", "No projects match.".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<4} {:<34} {:<13} {:<13} {:<10} {}",
            "ID", "TITLE", "CATEGORY", "DIFFICULTY", "DURATION", "CREATED"
        )
        .bold()
    );
    for project in &projects {
        let title = format!("{:<34}", truncate(&project.title, 34));
        let title = if project.available {
            title
        } else {
            title.dimmed().to_string()
        };
        println!(
            "{:<4} {} {:<13} {} {:<10} {}",
            project.id.to_string().cyan(),
            title,
            project.category.label(),
            difficulty_label(project.difficulty),
            project.duration,
            project
                .created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d")
                .dimmed(),
        );
    }
    let hidden = projects.iter().filter(|p| !p.available).count();
    let summary = if hidden > 0 {
        format!("{} project(s), {hidden} unavailable", projects.len())
    } else {
        format!("{} project(s)", projects.len())
    };
    println!("\n{}", summary.dimmed());
    Ok(())
}

#[derive(Serialize)]
struct StatsReport {
    overview: CatalogOverview,
    categories: Vec<GroupStats<Category>>,
    difficulties: Vec<GroupStats<Difficulty>>,
    students: Vec<StudentStats>,
}

async fn cmd_stats(json: bool) -> Result<()> {
    let snapshot = snapshot().await?;
    let roster = SessionStore::seeded(&LatencyConfig::instant()).roster_students();
    let report = StatsReport {
        overview: insights::catalog_overview(&snapshot),
        categories: insights::category_stats(&snapshot),
        difficulties: insights::difficulty_stats(&snapshot),
        students: insights::student_stats(&snapshot, &roster),
    };

    if json {
        let out =
            serde_json::to_string_pretty(&report).context("failed to serialize statistics")?;
        println!("{out}");
        return Ok(());
    }

    let o = &report.overview;
    println!("{}", "RoboLab Statistics".bold());
    println!(
        "  {}    {} ({} available)",
        "Projects:".dimmed(),
        o.total_projects.to_string().cyan(),
        o.available_projects
    );
    println!(
        "  {}   {} completed, {} in progress",
        "Progress:".dimmed(),
        o.completed.to_string().green(),
        o.in_progress.to_string().yellow()
    );

    println!("\n{}", "By category".bold());
    for group in &report.categories {
        println!(
            "  {:<13} {:>3} projects  {:>3} completed",
            group.key.label(),
            group.projects,
            group.completed
        );
    }

    println!("\n{}", "By difficulty".bold());
    for group in &report.difficulties {
        println!(
            "  {:<13} {:>3} projects  {:>3} completed",
            group.key.label(),
            group.projects,
            group.completed
        );
    }

    println!("\n{}", "Students".bold());
    for stats in &report.students {
        let p = &stats.progress;
        let pct = format!("{:>3}%", p.percentage);
        let pct = match p.percentage {
            80.. => pct.green().to_string(),
            40..=79 => pct.yellow().to_string(),
            _ => pct.red().to_string(),
        };
        println!(
            "  {:<20} {:<10} {pct}  {} of {} completed",
            stats.student.identity.name(),
            stats.student.profile.grade.dimmed(),
            p.completed,
            p.assigned
        );
    }
    Ok(())
}

fn cmd_config(config: &RobolabConfig) -> Result<()> {
    let out = toml::to_string_pretty(config).context("failed to serialize configuration")?;
    print!("{out}");
    Ok(())
}

/// Padded before coloring so escape codes don't skew the column.
fn difficulty_label(difficulty: Difficulty) -> String {
    let label = format!("{:<13}", difficulty.label());
    match difficulty {
        Difficulty::Beginner => label.green().to_string(),
        Difficulty::Intermediate => label.yellow().to_string(),
        Difficulty::Advanced => label.red().to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("Robot", 10), "Robot");
        assert_eq!(truncate("Señal de línea", 6), "Señal…");
    }

    #[test]
    fn test_cli_parses_projects_filters() {
        let cli = Cli::parse_from([
            "robolab",
            "projects",
            "--category",
            "electronics",
            "--difficulty",
            "beginner",
            "--available",
        ]);
        match cli {
            Cli::Projects {
                available,
                category,
                difficulty,
                ..
            } => {
                assert!(available);
                assert_eq!(category, Some(Category::Electronics));
                assert_eq!(difficulty, Some(Difficulty::Beginner));
            }
            _ => panic!("expected projects"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["robolab", "projects", "--category", "cooking"]).is_err());
    }

    #[tokio::test]
    async fn test_stats_report_covers_roster() {
        let snapshot = snapshot().await.unwrap();
        let roster = SessionStore::seeded(&LatencyConfig::instant()).roster_students();
        let students = insights::student_stats(&snapshot, &roster);
        assert_eq!(students.len(), roster.len());
    }
}
