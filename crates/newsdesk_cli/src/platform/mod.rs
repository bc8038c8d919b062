mod app;
pub mod config;
pub mod logging;
mod render;
mod terminal;

pub use app::run_app;
