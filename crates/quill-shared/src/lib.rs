//! # Quill Shared
//!
//! Types shared across the API layers: the response envelopes every
//! endpoint speaks, pagination metadata, and the field-validation
//! building blocks used by the versioned request types.

pub mod envelope;
pub mod validate;

pub use envelope::{
    CollectionEnvelope, ErrorEnvelope, MessageEnvelope, PageLinks, PageMeta, ResourceEnvelope,
};
pub use validate::ValidationErrors;
