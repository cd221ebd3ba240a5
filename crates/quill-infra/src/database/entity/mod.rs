//! SeaORM entities mirroring the domain model.

pub mod comment;
pub mod like;
pub mod post;
pub mod user;
