//! Concrete repositories over the generic SeaORM base.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use quill_core::domain::{CommentDetail, Like, Post, PostDetail, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    CommentRepository, LikeRepository, Page, PostQuery, PostRepository, PostSortKey, SortOrder,
    UserQuery, UserRepository, UserSortKey,
};

use super::base::{SeaOrmRepository, map_db_err};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

/// SeaORM user repository.
pub type SeaOrmUserRepository = SeaOrmRepository<UserEntity>;

/// SeaORM post repository.
pub type SeaOrmPostRepository = SeaOrmRepository<PostEntity>;

/// SeaORM comment repository.
pub type SeaOrmCommentRepository = SeaOrmRepository<CommentEntity>;

/// SeaORM like repository.
pub type SeaOrmLikeRepository = SeaOrmRepository<LikeEntity>;

fn direction(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

fn post_sort_column(sort: PostSortKey) -> post::Column {
    match sort {
        PostSortKey::CreatedAt => post::Column::CreatedAt,
        PostSortKey::Title => post::Column::Title,
        PostSortKey::Status => post::Column::Status,
        PostSortKey::PublishDate => post::Column::PublishDate,
    }
}

fn user_sort_column(sort: UserSortKey) -> user::Column {
    match sort {
        UserSortKey::CreatedAt => user::Column::CreatedAt,
        UserSortKey::Name => user::Column::Name,
        UserSortKey::Email => user::Column::Email,
    }
}

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            if local.len() > 1 {
                format!("{}***{}", &local[..1], domain)
            } else {
                format!("***{domain}")
            }
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        let mut query = UserEntity::find().filter(user::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(user::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn list(&self, query: &UserQuery) -> Result<Page<User>, RepoError> {
        let mut select = UserEntity::find();
        if let Some(term) = &query.search {
            select = select.filter(user::Column::Name.contains(term));
        }
        let select =
            select.order_by(user_sort_column(query.sort), direction(query.order));

        let page = query.page.page.max(1);
        let per_page = query.page.per_page.max(1);

        let paginator = select.paginate(&self.db, per_page);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(map_db_err)?;

        Ok(Page {
            items: items.into_iter().map(Into::into).collect(),
            total,
            page,
            per_page,
        })
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Page<Post>, RepoError> {
        let mut select = PostEntity::find();
        if let Some(author_id) = query.author_id {
            select = select.filter(post::Column::UserId.eq(author_id));
        }
        if let Some(term) = &query.search {
            select = select.filter(post::Column::Title.contains(term));
        }
        if let Some(featured) = query.featured {
            select = select.filter(post::Column::IsFeatured.eq(featured));
        }
        let select =
            select.order_by(post_sort_column(query.sort), direction(query.order));

        let page = query.page.page.max(1);
        let per_page = query.page.per_page.max(1);

        let paginator = select.paginate(&self.db, per_page);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(map_db_err)?;

        Ok(Page {
            items: items.into_iter().map(Into::into).collect(),
            total,
            page,
            per_page,
        })
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let author = model
            .find_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        let comments = model
            .find_related(CommentEntity)
            .find_also_related(UserEntity)
            .order_by(comment::Column::CreatedAt, Order::Asc)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let likes = model
            .find_related(LikeEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let comments = comments
            .into_iter()
            .map(|(comment, commentator)| CommentDetail {
                comment: comment.into(),
                commentator: commentator.map(Into::into),
            })
            .collect();

        Ok(Some(PostDetail {
            total_likes: Some(likes.len() as u64),
            author: author.map(Into::into),
            comments: Some(comments),
            post: model.into(),
        }))
    }

    async fn title_exists(&self, title: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        let mut query = PostEntity::find().filter(post::Column::Title.eq(title));
        if let Some(id) = exclude {
            query = query.filter(post::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {}

#[async_trait]
impl LikeRepository for SeaOrmLikeRepository {
    async fn insert(&self, like: Like) -> Result<Like, RepoError> {
        let active_model: like::ActiveModel = like.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }
}
