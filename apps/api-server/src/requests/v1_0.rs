//! v1.0 request bodies and query parameters.
//!
//! Each body type declares its rule set in `validate()`, which either
//! yields a typed, validated value or the per-field messages for the
//! 422 envelope. Uniqueness rules need the database and stay in the
//! handlers, which merge their messages into the same map.

use chrono::NaiveDateTime;
use serde::Deserialize;

use quill_core::domain::PostStatus;
use quill_core::ports::{PageRequest, PostQuery, PostSortKey, SortOrder, UserQuery, UserSortKey};
use quill_shared::ValidationErrors;
use quill_shared::validate;

/// Body of `POST /posts`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostStoreRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub publish_date: Option<String>,
}

/// A `PostStoreRequest` that passed every field rule.
#[derive(Debug, Clone)]
pub struct ValidPostStore {
    pub title: String,
    pub body: String,
    pub status: PostStatus,
    pub is_featured: bool,
    pub publish_date: NaiveDateTime,
}

impl PostStoreRequest {
    pub fn validate(&self) -> Result<ValidPostStore, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = validate::required(&mut errors, "title", self.title.as_deref());
        if let Some(title) = title {
            validate::max_len(&mut errors, "title", title, 255);
        }

        let body = validate::required(&mut errors, "body", self.body.as_deref());

        let status = validate::required(&mut errors, "status", self.status.as_deref())
            .and_then(|s| match PostStatus::parse(s) {
                Some(status) => Some(status),
                None => {
                    errors.add("status", "The selected status is invalid.");
                    None
                }
            });

        let publish_date =
            validate::required(&mut errors, "publish_date", self.publish_date.as_deref())
                .and_then(|raw| validate::datetime(&mut errors, "publish_date", raw));

        match (title, body, status, publish_date) {
            (Some(title), Some(body), Some(status), Some(publish_date)) if errors.is_empty() => {
                Ok(ValidPostStore {
                    title: title.to_owned(),
                    body: body.to_owned(),
                    status,
                    is_featured: self.is_featured.unwrap_or(false),
                    publish_date,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Body of `PATCH /posts/{id}`. Every field is optional; omitted fields
/// keep their stored values.
#[derive(Debug, Clone, Deserialize)]
pub struct PostUpdateRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub publish_date: Option<String>,
}

/// A `PostUpdateRequest` with present fields validated.
#[derive(Debug, Clone, Default)]
pub struct ValidPostUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<PostStatus>,
    pub is_featured: Option<bool>,
    pub publish_date: Option<NaiveDateTime>,
}

impl PostUpdateRequest {
    pub fn validate(&self) -> Result<ValidPostUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut valid = ValidPostUpdate {
            is_featured: self.is_featured,
            ..Default::default()
        };

        if let Some(title) = self.title.as_deref() {
            if title.trim().is_empty() {
                errors.add("title", "The title field is required.");
            } else {
                validate::max_len(&mut errors, "title", title, 255);
                valid.title = Some(title.to_owned());
            }
        }

        if let Some(body) = self.body.as_deref() {
            if body.trim().is_empty() {
                errors.add("body", "The body field is required.");
            } else {
                valid.body = Some(body.to_owned());
            }
        }

        if let Some(status) = self.status.as_deref() {
            match PostStatus::parse(status) {
                Some(status) => valid.status = Some(status),
                None => errors.add("status", "The selected status is invalid."),
            }
        }

        if let Some(raw) = self.publish_date.as_deref() {
            valid.publish_date = validate::datetime(&mut errors, "publish_date", raw);
        }

        errors.into_result().map(|_| valid)
    }
}

/// Body of `POST /users` (public registration).
#[derive(Debug, Clone, Deserialize)]
pub struct UserStoreRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidUserStore {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserStoreRequest {
    pub fn validate(&self) -> Result<ValidUserStore, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = validate::required(&mut errors, "name", self.name.as_deref());
        if let Some(name) = name {
            validate::max_len(&mut errors, "name", name, 255);
        }

        let email = validate::required(&mut errors, "email", self.email.as_deref());
        if let Some(email) = email {
            validate::email_format(&mut errors, "email", email);
            validate::max_len(&mut errors, "email", email, 255);
        }

        let password = validate::required(&mut errors, "password", self.password.as_deref());
        if let Some(password) = password {
            validate::password_policy(&mut errors, "password", password);
        }

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) if errors.is_empty() => Ok(ValidUserStore {
                name: name.to_owned(),
                email: email.to_owned(),
                password: password.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PATCH /users/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidUserUpdate {
    pub name: String,
    pub email: String,
}

impl UserUpdateRequest {
    pub fn validate(&self) -> Result<ValidUserUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = validate::required(&mut errors, "name", self.name.as_deref());
        if let Some(name) = name {
            validate::max_len(&mut errors, "name", name, 255);
        }

        let email = validate::required(&mut errors, "email", self.email.as_deref());
        if let Some(email) = email {
            validate::email_format(&mut errors, "email", email);
            validate::max_len(&mut errors, "email", email, 255);
        }

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(ValidUserUpdate {
                name: name.to_owned(),
                email: email.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `POST /frontend/posts/comment/{post_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentStoreRequest {
    pub comment: Option<String>,
}

impl CommentStoreRequest {
    pub fn validate(&self) -> Result<String, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match validate::required(&mut errors, "comment", self.comment.as_deref()) {
            Some(comment) => Ok(comment.to_owned()),
            None => Err(errors),
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidLogin {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<ValidLogin, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = validate::required(&mut errors, "email", self.email.as_deref());
        let password = validate::required(&mut errors, "password", self.password.as_deref());

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(ValidLogin {
                email: email.to_owned(),
                password: password.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

/// Listing query parameters shared by every collection endpoint.
///
/// `orderBy` is checked against the per-resource set of sortable
/// columns instead of being forwarded into query construction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    pub order: Option<String>,
    pub is_featured: Option<bool>,
}

impl ListParams {
    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page).max(1),
            per_page: self.limit.unwrap_or(defaults.per_page).max(1),
        }
    }

    fn sort_order(&self, errors: &mut ValidationErrors) -> SortOrder {
        match self.order.as_deref() {
            None => SortOrder::default(),
            Some(raw) => SortOrder::parse(raw).unwrap_or_else(|| {
                errors.add("order", "The selected order is invalid.");
                SortOrder::default()
            }),
        }
    }

    /// Build a post listing query; the author and featured filters are
    /// the caller's business.
    pub fn post_query(&self) -> Result<PostQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let sort = match self.order_by.as_deref() {
            None => PostSortKey::default(),
            Some(raw) => PostSortKey::parse(raw).unwrap_or_else(|| {
                errors.add("orderBy", "The selected orderBy is invalid.");
                PostSortKey::default()
            }),
        };
        let order = self.sort_order(&mut errors);

        errors.into_result().map(|_| PostQuery {
            author_id: None,
            search: self.search.clone(),
            featured: self.is_featured,
            sort,
            order,
            page: self.page_request(),
        })
    }

    pub fn user_query(&self) -> Result<UserQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let sort = match self.order_by.as_deref() {
            None => UserSortKey::default(),
            Some(raw) => UserSortKey::parse(raw).unwrap_or_else(|| {
                errors.add("orderBy", "The selected orderBy is invalid.");
                UserSortKey::default()
            }),
        };
        let order = self.sort_order(&mut errors);

        errors.into_result().map(|_| UserQuery {
            search: self.search.clone(),
            sort,
            order,
            page: self.page_request(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_request() -> PostStoreRequest {
        PostStoreRequest {
            title: Some("First Post".to_string()),
            body: Some("Here goes the content".to_string()),
            status: Some("draft".to_string()),
            is_featured: None,
            publish_date: Some("2023-04-02 09:12:40".to_string()),
        }
    }

    #[test]
    fn post_store_accepts_a_complete_body() {
        let valid = store_request().validate().unwrap();
        assert_eq!(valid.title, "First Post");
        assert_eq!(valid.status, PostStatus::Draft);
        assert!(!valid.is_featured);
    }

    #[test]
    fn post_store_rejects_missing_fields_per_field() {
        let request = PostStoreRequest {
            title: None,
            body: None,
            status: None,
            is_featured: None,
            publish_date: None,
        };
        let errors = request.validate().unwrap_err();
        for field in ["title", "body", "status", "publish_date"] {
            assert!(errors.has(field), "expected an error on {field}");
        }
    }

    #[test]
    fn post_store_rejects_unknown_status_and_bad_date() {
        let mut request = store_request();
        request.status = Some("deleted".to_string());
        request.publish_date = Some("2023-04-02".to_string());

        let errors = request.validate().unwrap_err();
        assert!(errors.has("status"));
        assert!(errors.has("publish_date"));
    }

    #[test]
    fn post_update_keeps_omitted_fields_absent() {
        let request = PostUpdateRequest {
            title: Some("New Title".to_string()),
            body: None,
            status: None,
            is_featured: None,
            publish_date: None,
        };
        let valid = request.validate().unwrap();
        assert_eq!(valid.title.as_deref(), Some("New Title"));
        assert!(valid.body.is_none());
        assert!(valid.status.is_none());
        assert!(valid.is_featured.is_none());
        assert!(valid.publish_date.is_none());
    }

    #[test]
    fn post_update_still_validates_present_fields() {
        let request = PostUpdateRequest {
            title: None,
            body: None,
            status: Some("bogus".to_string()),
            is_featured: None,
            publish_date: None,
        };
        assert!(request.validate().unwrap_err().has("status"));
    }

    #[test]
    fn user_store_applies_the_password_policy() {
        let base = UserStoreRequest {
            name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            password: None,
        };

        for bad in ["Password", "P@ssw0"] {
            let request = UserStoreRequest {
                password: Some(bad.to_string()),
                ..base.clone()
            };
            assert!(
                request.validate().unwrap_err().has("password"),
                "{bad} should fail the policy"
            );
        }

        let request = UserStoreRequest {
            password: Some("P@ssw0rd".to_string()),
            ..base
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn comment_body_is_required() {
        let missing = CommentStoreRequest { comment: None };
        assert!(missing.validate().unwrap_err().has("comment"));

        let present = CommentStoreRequest {
            comment: Some("Nice blog post bro".to_string()),
        };
        assert_eq!(present.validate().unwrap(), "Nice blog post bro");
    }

    #[test]
    fn list_params_default_to_created_at_ascending_page_one() {
        let query = ListParams::default().post_query().unwrap();
        assert_eq!(query.sort, PostSortKey::CreatedAt);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(query.page.page, 1);
        assert_eq!(query.page.per_page, 10);
    }

    #[test]
    fn list_params_reject_unknown_sort_columns() {
        let params = ListParams {
            order_by: Some("password_hash".to_string()),
            ..Default::default()
        };
        assert!(params.post_query().unwrap_err().has("orderBy"));
        assert!(params.user_query().unwrap_err().has("orderBy"));
    }

    #[test]
    fn list_params_accept_allow_listed_sorts() {
        let params = ListParams {
            order_by: Some("title".to_string()),
            order: Some("desc".to_string()),
            ..Default::default()
        };
        let query = params.post_query().unwrap();
        assert_eq!(query.sort, PostSortKey::Title);
        assert_eq!(query.order, SortOrder::Desc);
    }
}
