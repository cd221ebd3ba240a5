//! # Quill Core
//!
//! The domain layer of the Quill blogging API.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod version;

pub use error::DomainError;
pub use version::ApiVersion;
