// Core infrastructure modules
pub mod core;

// Session modules
pub mod app;
pub mod config;
pub mod console;
pub mod menu;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod test_utils;
