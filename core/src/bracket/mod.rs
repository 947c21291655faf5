//! Bracket Engine.
//!
//! A bracket is a complete binary tree addressed by 1-indexed
//! "bracket_position" integers: position 1 is the final, 2-3 the
//! semi-finals, 4-7 the quarter-finals, and so on; `p`'s parent is `p/2`,
//! its children `2p` and `2p+1`.
pub mod advance;
pub mod cup;
pub mod knockout;
pub mod position;
