//! Small cross-cutting helpers shared by the domain types.
pub mod serde_date;
