//! Transaction decoding and encoding.
//!
//! # Data Flow
//! ```text
//! broadcast response body
//!     → optional `result` envelope unwrapped
//!     → scalar fields + expiration timestamp
//!     → operations decoded through an OperationRegistry
//!     → Transaction
//!
//! Transaction::to_value
//!     → key-sorted object under `result`
//! ```
//!
//! # Design Decisions
//! - Decode then encode reproduces the wire payload field for field
//! - Unknown operations are dropped, never fatal

pub mod transaction;

pub use transaction::Transaction;
