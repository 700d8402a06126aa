//! Cross-crate integration flows.

pub mod edit_flow;
pub mod populate_flow;
pub mod sync_flow;
