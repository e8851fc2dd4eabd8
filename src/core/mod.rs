//! Core module - application infrastructure shared by every front end
//!
//! # Module Structure
//!
//! - `settings` - [`Settings`] and their JSON persistence
//! - `logging` - `tracing` subscriber setup
//! - `error` - [`CoreError`] and [`CoreResult`]

pub mod error;
pub mod logging;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use settings::Settings;
