//! `millbook-core`: shared building blocks for the mill workspace.
//!
//! Pure values only: error model, typed identifiers and the numeric input
//! boundary. Nothing in here performs IO.

pub mod error;
pub mod id;
pub mod input;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{OwnerId, RecordId};
pub use input::{non_negative_or_zero, parse_non_negative_decimal, try_parse_non_negative_decimal};
pub use value_object::ValueObject;
