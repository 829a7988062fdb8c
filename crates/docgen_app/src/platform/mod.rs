mod app;
mod browser;
pub mod cli;
mod config;
mod effects;
mod ui;

pub use app::run_app;
