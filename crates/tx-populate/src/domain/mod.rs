//! # Domain Layer
//!
//! Intent value types, hint pairs and population errors.

pub mod errors;
pub mod intent;

pub use errors::PopulateError;
pub use intent::{HintTrial, IntentKind, Neighbors, PopulatedIntent};
