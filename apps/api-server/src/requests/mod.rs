//! Versioned request types and their validation rules.

pub mod v1_0;
