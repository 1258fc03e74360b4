//! Terminal User Interface module
//!
//! A ratatui table of every transaction with a running summary footer.
//! Rows can be browsed, deleted and reloaded from storage.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;
pub mod view;

pub use app::App;
pub use terminal::run_tui;
