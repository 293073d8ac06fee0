//! Resource Registry
//!
//! The content types managed by the admin, each with its REST path and
//! schema.

use std::sync::OnceLock;

use crate::schema::{FieldSpec, Schema, SchemaError};

/// A named collection reachable under one path prefix
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Route segment, e.g. `site-notes`
    pub slug: String,
    /// Plural heading, e.g. `Site notes`
    pub label: String,
    /// Lowercase singular used in messages, e.g. `site note`
    pub singular: String,
    /// Collection path on the API, e.g. `/api/site-notes`
    pub path: String,
    pub schema: Schema,
}

impl Resource {
    pub fn new(slug: &str, label: &str, singular: &str, schema: Schema) -> Self {
        Self {
            slug: slug.to_string(),
            label: label.to_string(),
            singular: singular.to_string(),
            path: format!("/api/{}", slug),
            schema,
        }
    }

    /// Lowercase plural used in messages
    pub fn noun(&self) -> String {
        self.label.to_lowercase()
    }
}

static RESOURCES: OnceLock<Vec<Resource>> = OnceLock::new();

/// All built-in resources, in navigation order
pub fn all() -> &'static [Resource] {
    RESOURCES.get_or_init(|| builtin().expect("built-in schemas are valid"))
}

pub fn find(slug: &str) -> Option<&'static Resource> {
    all().iter().find(|r| r.slug == slug)
}

fn builtin() -> Result<Vec<Resource>, SchemaError> {
    Ok(vec![
        Resource::new(
            "quotes",
            "Quotes",
            "quote",
            Schema::builder()
                .field(FieldSpec::long_text("content", "Quote"))
                .field(FieldSpec::text("author", "Author"))
                .field(FieldSpec::text("source", "Source"))
                .field(FieldSpec::boolean("is_active", "Show in carousel"))
                .title("content")
                .build()?,
        ),
        Resource::new(
            "site-notes",
            "Site notes",
            "site note",
            Schema::builder()
                .field(FieldSpec::long_text("content", "Content"))
                .field(FieldSpec::boolean("is_active", "Active"))
                .build()?,
        ),
        Resource::new(
            "library",
            "Library",
            "library item",
            Schema::builder()
                .field(FieldSpec::text("title", "Title"))
                .field(FieldSpec::text("author", "Author"))
                .field(FieldSpec::url("url", "URL"))
                .field(FieldSpec::text("category", "Category"))
                .field(FieldSpec::long_text("description", "Description"))
                .field(FieldSpec::tag_list("tags", "Tags"))
                .field(FieldSpec::boolean("is_public", "Public"))
                .build()?,
        ),
        Resource::new(
            "work",
            "Work",
            "work entry",
            Schema::builder()
                .field(FieldSpec::text("company", "Company"))
                .field(FieldSpec::text("role", "Role"))
                .field(FieldSpec::text("location", "Location"))
                .field(FieldSpec::text("start_date", "Start"))
                .field(FieldSpec::text("end_date", "End"))
                .field(FieldSpec::long_text("description", "Description"))
                .field(FieldSpec::link_list("links", "Links"))
                .field(FieldSpec::integer("sort_order", "Sort order"))
                .build()?,
        ),
        Resource::new(
            "projects",
            "Projects",
            "project",
            Schema::builder()
                .field(FieldSpec::text("title", "Title"))
                .field(FieldSpec::text("summary", "Summary"))
                .field(FieldSpec::long_text("description", "Description"))
                .field(FieldSpec::tag_list("technologies", "Technologies"))
                .field(FieldSpec::link_list("links", "Links"))
                .field(FieldSpec::boolean("featured", "Featured"))
                .field(FieldSpec::integer("sort_order", "Sort order"))
                .build()?,
        ),
        Resource::new(
            "books",
            "Books",
            "book",
            Schema::builder()
                .field(FieldSpec::text("title", "Title"))
                .field(FieldSpec::text("author", "Author"))
                .field(FieldSpec::integer("year", "Year"))
                .field(FieldSpec::integer("rating", "Rating"))
                .field(FieldSpec::long_text("notes", "Notes"))
                .field(FieldSpec::boolean("is_reading", "Currently reading"))
                .build()?,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    #[test]
    fn test_builtin_registry() {
        let slugs: Vec<_> = all().iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["quotes", "site-notes", "library", "work", "projects", "books"]);
        assert_eq!(find("books").map(|r| r.path.as_str()), Some("/api/books"));
        assert!(find("users").is_none());
    }

    #[test]
    fn test_site_note_draft() {
        let notes = find("site-notes").unwrap();
        let draft = notes.schema.default_draft();
        assert_eq!(draft.get("content"), Some(&FieldValue::Text(String::new())));
        assert_eq!(draft.get("is_active"), Some(&FieldValue::Bool(false)));
        assert_eq!(notes.noun(), "site notes");
    }
}
