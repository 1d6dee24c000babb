pub mod assessment;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod io;
pub mod manager;
pub mod paths;
pub mod render;
pub mod state;
pub mod transition;
pub mod types;

pub use error::{InsightError, Result};
