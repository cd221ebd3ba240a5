//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SeaORM-backed repositories over Postgres, JWT token issuance with
//! per-token revocation, and Argon2 password hashing.

pub mod auth;
pub mod database;

pub use sea_orm::{DbConn, DbErr};

pub use auth::{Argon2PasswordService, InMemoryRevocationStore, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, SeaOrmCommentRepository, SeaOrmLikeRepository, SeaOrmPostRepository,
    SeaOrmUserRepository, connect,
};
