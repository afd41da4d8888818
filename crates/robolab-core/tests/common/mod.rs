#![allow(dead_code)]

use std::sync::Arc;

use robolab_core::catalog::MemoryCatalog;
use robolab_core::config::LatencyConfig;
use robolab_core::model::{Category, Difficulty, NewProject};
use robolab_core::session::SessionStore;

/// Seeded stores with no simulated latency.
pub fn test_stores() -> (Arc<SessionStore>, Arc<MemoryCatalog>) {
    let latency = LatencyConfig::instant();
    (
        Arc::new(SessionStore::seeded(&latency)),
        Arc::new(MemoryCatalog::seeded(&latency)),
    )
}

pub fn test_project(title: &str) -> NewProject {
    NewProject::new(title, format!("{title} built during an integration test."))
        .with_category(Category::Design)
        .with_difficulty(Difficulty::Intermediate)
        .with_duration("2 hours")
        .with_materials(["Cardboard", "Glue"])
        .with_steps(["Sketch", "Cut", "Assemble"])
}
