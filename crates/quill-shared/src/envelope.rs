//! Response envelopes.
//!
//! Every endpoint answers in one of four stable shapes: a single
//! resource (`{data}`), a collection (`{data, links, meta}`), a plain
//! confirmation (`{message}`) or an error (`{code, message}` with an
//! optional per-field map for validation failures).

use std::collections::BTreeMap;

use serde::Serialize;

/// Single-resource wrapper: `{"data": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceEnvelope<T> {
    pub data: T,
}

impl<T> ResourceEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Collection wrapper with pagination: `{"data": [...], "links": {...}, "meta": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionEnvelope<T> {
    pub data: Vec<T>,
    pub links: PageLinks,
    pub meta: PageMeta,
}

/// Plain confirmation: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageEnvelope {
    pub message: String,
}

impl MessageEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Uniform error shape: `{"code": ..., "message": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub message: String,
    /// Per-field messages, present on validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorEnvelope {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_fields(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Pagination metadata for a collection response.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub current_page: u64,
    /// 1-based index of the first item on this page, absent when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    pub last_page: u64,
    pub per_page: u64,
    /// 1-based index of the last item on this page, absent when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
    pub total: u64,
}

impl PageMeta {
    pub fn new(page: u64, per_page: u64, total: u64, on_page: u64) -> Self {
        let last_page = if total == 0 {
            1
        } else {
            total.div_ceil(per_page.max(1))
        };
        let (from, to) = if on_page == 0 {
            (None, None)
        } else {
            let first = (page - 1) * per_page + 1;
            (Some(first), Some(first + on_page - 1))
        };
        Self {
            current_page: page,
            from,
            last_page,
            per_page,
            to,
            total,
        }
    }
}

/// Navigation links for a collection response.
#[derive(Debug, Clone, Serialize)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl PageLinks {
    /// Build page links for `path`, preserving the page size parameter.
    pub fn new(path: &str, page: u64, per_page: u64, last_page: u64) -> Self {
        let link = |p: u64| format!("{path}?page={p}&limit={per_page}");
        Self {
            first: link(1),
            last: link(last_page),
            prev: (page > 1).then(|| link(page - 1)),
            next: (page < last_page).then(|| link(page + 1)),
        }
    }
}

impl<T> CollectionEnvelope<T> {
    /// Wrap one page of shaped resources.
    pub fn new(data: Vec<T>, path: &str, page: u64, per_page: u64, total: u64) -> Self {
        let meta = PageMeta::new(page, per_page, total, data.len() as u64);
        let links = PageLinks::new(path, page, per_page, meta.last_page);
        Self { data, links, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_math_for_a_middle_page() {
        let meta = PageMeta::new(2, 10, 35, 10);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.last_page, 4);
        assert_eq!(meta.from, Some(11));
        assert_eq!(meta.to, Some(20));
        assert_eq!(meta.total, 35);
    }

    #[test]
    fn meta_math_for_an_empty_listing() {
        let meta = PageMeta::new(1, 10, 0, 0);
        assert_eq!(meta.last_page, 1);
        assert_eq!(meta.from, None);
        assert_eq!(meta.to, None);
    }

    #[test]
    fn links_omit_prev_on_first_and_next_on_last() {
        let links = PageLinks::new("/api/v1.0/posts", 1, 10, 3);
        assert_eq!(links.first, "/api/v1.0/posts?page=1&limit=10");
        assert!(links.prev.is_none());
        assert_eq!(links.next.as_deref(), Some("/api/v1.0/posts?page=2&limit=10"));

        let links = PageLinks::new("/api/v1.0/posts", 3, 10, 3);
        assert!(links.next.is_none());
        assert_eq!(links.prev.as_deref(), Some("/api/v1.0/posts?page=2&limit=10"));
    }

    #[test]
    fn error_envelope_serializes_fields_only_when_present() {
        let plain = serde_json::to_value(ErrorEnvelope::new(404, "Not found")).unwrap();
        assert!(plain.get("errors").is_none());

        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), vec!["taken".to_string()]);
        let with = serde_json::to_value(ErrorEnvelope::new(422, "Invalid").with_fields(fields))
            .unwrap();
        assert_eq!(with["errors"]["title"][0], "taken");
    }
}
