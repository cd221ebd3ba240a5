//! Versioned resource shapers - entities to public JSON shapes.

pub mod v1_0;
