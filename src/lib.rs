// Declare all modules as public so they can be used by the binary and tests.
pub mod app;
pub mod config;
pub mod menu;
pub mod platform;
pub mod utils;
