//! Scheduling algorithms: round-robin fixtures (C3) and the group draw (C4).
pub mod group_draw;
pub mod round_robin;
