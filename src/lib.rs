pub mod coach;
pub mod config;
pub mod core;
pub mod error;
pub mod history;
pub mod models;
#[cfg(test)]
pub mod test_helpers;

pub use error::{CoachError, Result};
