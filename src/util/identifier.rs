//! Translation of external identifier strings into store filters.

use bson::{doc, oid::ObjectId, Document};

pub fn parse_object_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw.trim()).ok()
}

/// `_id` filter for entities keyed purely by store id.
pub fn object_id_filter(raw: &str) -> Option<Document> {
    parse_object_id(raw).map(|oid| doc! { "_id": oid })
}

/// `_id` filter that falls back to matching the raw string when the input
/// does not parse as an ObjectId.
pub fn store_id_filter(raw: &str) -> Document {
    match parse_object_id(raw) {
        Some(oid) => doc! { "_id": oid },
        None => doc! { "_id": raw },
    }
}

/// Ordered lookups for entities carrying both an application `id` and a
/// store `_id`: app id, then parsed ObjectId, then `_id` as a raw string.
pub fn dual_identity_chain(raw: &str) -> Vec<Document> {
    let mut chain = vec![doc! { "id": raw }];
    if let Some(oid) = parse_object_id(raw) {
        chain.push(doc! { "_id": oid });
    }
    chain.push(doc! { "_id": raw });
    chain
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestaurantKey {
    /// All ASCII digits; `None` when too large for an i64
    Numeric(Option<i64>),
    Slug(String),
}

impl RestaurantKey {
    pub fn classify(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            RestaurantKey::Numeric(raw.parse().ok())
        } else {
            RestaurantKey::Slug(raw.to_string())
        }
    }
}

/// Lower-case, ASCII-alphanumeric words joined by single hyphens.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
