//! # Application Layer
//!
//! The hint finder and the populator orchestrating validation, hints,
//! gas headroom and submission.

pub mod hint_finder;
pub mod populator;

pub use hint_finder::HintFinder;
pub use populator::Populator;
