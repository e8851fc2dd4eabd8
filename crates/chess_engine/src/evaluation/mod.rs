//! Position evaluation with piece-square tables
//!
//! Evaluates chess positions using:
//! - Material count (piece values)
//! - Positional bonuses (piece-square tables)
//! - Mobility (number of pseudo-legal moves)
//!
//! ## Module Organization
//!
//! - `pst` - Piece-square tables for positional evaluation
//! - `material` - Material balance evaluation
//! - `position` - Full position evaluation (material + positional + mobility)

mod material;
mod position;
mod pst;

pub use material::evaluate_material;
pub use position::{evaluate_for, evaluate_position};
