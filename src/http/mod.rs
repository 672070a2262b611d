//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! operations
//!     → broadcaster.rs ({"operations": [...]} payload)
//!     → client.rs (bearer auth, JSON headers, timeout)
//!     → response.rs (status, reason, headers, JSON or text body)
//!     → BroadcastResponse → Transaction
//! ```
//!
//! # Design Decisions
//! - Non-2xx broadcast answers are typed ResponseErrors, transport failures Client errors
//! - No retries; failure handling belongs to the caller

pub mod broadcaster;
pub mod client;
pub mod response;

pub use broadcaster::Broadcaster;
pub use client::HttpClient;
pub use response::{BroadcastResponse, HttpResponse, ResponseBody};
