//! Database connection management and repositories.

mod base;
mod connections;
pub mod entity;
mod repos;

pub use base::SeaOrmRepository;
pub use connections::{DatabaseConfig, connect};
pub use repos::{
    SeaOrmCommentRepository, SeaOrmLikeRepository, SeaOrmPostRepository, SeaOrmUserRepository,
};

#[cfg(test)]
mod tests;
