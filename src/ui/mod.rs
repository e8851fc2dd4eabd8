//! User interfaces
//!
//! - **console**: line-oriented text front end with an 8x8 board diagram

pub mod console;

pub use console::{render_board, Command, Console};
