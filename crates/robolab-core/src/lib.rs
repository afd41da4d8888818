pub mod catalog;
pub mod config;
pub mod error;
pub mod insights;
pub mod model;
pub mod router;
pub mod seed;
pub mod session;
