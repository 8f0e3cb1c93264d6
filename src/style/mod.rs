//! Structured style output.
//!
//! This module provides the values every builder produces:
//!
//! - [`Declaration`]: a `property: value` pair
//! - [`MediaRule`]: declarations guarded by a `max-width` query
//! - [`StyleRule`]: either of the above
//! - [`ResolvedStyleBlock`]: an ordered list of rules with CSS serialization
//!   and cascade evaluation

mod block;
mod rule;

pub use block::ResolvedStyleBlock;
pub use rule::{Declaration, MediaRule, StyleRule};
