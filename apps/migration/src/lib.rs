pub use sea_orm_migration::prelude::*;

mod m20260115_000001_create_users_table;
mod m20260115_000002_create_posts_table;
mod m20260115_000003_create_post_comments_table;
mod m20260115_000004_create_post_likes_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260115_000001_create_users_table::Migration),
            Box::new(m20260115_000002_create_posts_table::Migration),
            Box::new(m20260115_000003_create_post_comments_table::Migration),
            Box::new(m20260115_000004_create_post_likes_table::Migration),
        ]
    }
}
