pub mod backend;
pub mod config;
pub mod console;
pub mod error;
pub mod session;
pub mod ui;
