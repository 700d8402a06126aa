//! # Domain Layer
//!
//! Status state machine, receipts and error classification.

pub mod errors;
pub mod receipt;
pub mod status;

pub use errors::{SubmitError, WaitError};
pub use receipt::{Receipt, ReceiptStatus};
pub use status::TxStatus;
