//! Operation building subsystem.
//!
//! # Data Flow
//! ```text
//! fluent setters (Vote, Comment, Follow, ...)
//!     → parameters.rs (dotted-path ParameterStore)
//!     → serializer.rs (JSON fields string-encoded)
//!     → [name, parameters] wire pair
//!
//! wire pair from a transaction
//!     → registry.rs (discriminant lookup, unknown entries dropped)
//!     → Box<dyn Operation>
//! ```
//!
//! # Design Decisions
//! - Variants compose a BaseOperation instead of inheriting from it
//! - Follow and Reblog wrap CustomJson with a fixed sub-operation tag
//! - The decode table is a value callers can extend

pub mod base;
pub mod comment;
pub mod comment_options;
pub mod custom_json;
pub mod follow;
pub mod parameters;
pub mod reblog;
pub mod registry;
pub mod serializer;
pub mod sub_operation;
pub mod text;
pub mod vote;

pub use base::{BaseOperation, Operation};
pub use comment::Comment;
pub use comment_options::CommentOptions;
pub use custom_json::CustomJson;
pub use follow::Follow;
pub use parameters::ParameterStore;
pub use reblog::Reblog;
pub use registry::{OperationFactory, OperationRegistry};
pub use serializer::JsonFields;
pub use sub_operation::SubOperation;
pub use vote::Vote;
