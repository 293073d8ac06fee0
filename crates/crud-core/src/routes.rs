//! Admin Routes
//!
//! Hash routes for the admin: `#/quotes`, `#/quotes/new`, `#/quotes/3/edit`.

use crate::record::{EntityId, Record};
use crate::resources;

/// Entity handed from a list row to its edit form, tagged with the
/// resource it came from
#[derive(Debug, Clone, PartialEq)]
pub struct EditTarget {
    pub slug: String,
    pub record: Record,
}

impl EditTarget {
    pub fn new(slug: impl Into<String>, record: Record) -> Self {
        Self {
            slug: slug.into(),
            record,
        }
    }

    /// Same resource and same id
    pub fn matches(&self, slug: &str, id: EntityId) -> bool {
        self.slug == slug && self.record.id == Some(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRoute {
    List(String),
    New(String),
    Edit(String, EntityId),
}

impl AdminRoute {
    pub fn slug(&self) -> &str {
        match self {
            AdminRoute::List(slug) | AdminRoute::New(slug) | AdminRoute::Edit(slug, _) => slug,
        }
    }

    /// Hash path, including the leading `#`
    pub fn path(&self) -> String {
        match self {
            AdminRoute::List(slug) => format!("#/{}", slug),
            AdminRoute::New(slug) => format!("#/{}/new", slug),
            AdminRoute::Edit(slug, id) => format!("#/{}/{}/edit", slug, id),
        }
    }

    /// Accepts the hash with or without `#` and the leading slash
    pub fn parse(hash: &str) -> Option<Self> {
        let path = hash.trim().trim_start_matches('#').trim_matches('/');
        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            [slug] if is_slug(slug) => Some(AdminRoute::List(slug.to_string())),
            [slug, "new"] if is_slug(slug) => Some(AdminRoute::New(slug.to_string())),
            [slug, id, "edit"] if is_slug(slug) => {
                let id = id.parse().ok()?;
                Some(AdminRoute::Edit(slug.to_string(), id))
            }
            _ => None,
        }
    }

    /// Same resource, list view
    pub fn to_list(&self) -> Self {
        AdminRoute::List(self.slug().to_string())
    }

    /// Route the app can render. Unknown resources go to the default list;
    /// an edit route without its entity (same resource, same id) in hand
    /// goes to that resource's list.
    pub fn resolve(self, editing: Option<&EditTarget>) -> Self {
        if resources::find(self.slug()).is_none() {
            return Self::default();
        }
        match self {
            AdminRoute::Edit(slug, id) if !editing.is_some_and(|t| t.matches(&slug, id)) => AdminRoute::List(slug),
            other => other,
        }
    }
}

impl Default for AdminRoute {
    /// First resource's list
    fn default() -> Self {
        let slug = resources::all().first().map(|r| r.slug.clone()).unwrap_or_default();
        AdminRoute::List(slug)
    }
}

fn is_slug(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(AdminRoute::List("quotes".into()).path(), "#/quotes");
        assert_eq!(AdminRoute::New("quotes".into()).path(), "#/quotes/new");
        assert_eq!(AdminRoute::Edit("quotes".into(), 3).path(), "#/quotes/3/edit");
    }

    #[test]
    fn test_parse() {
        assert_eq!(AdminRoute::parse("#/site-notes"), Some(AdminRoute::List("site-notes".into())));
        assert_eq!(AdminRoute::parse("books/new/"), Some(AdminRoute::New("books".into())));
        assert_eq!(AdminRoute::parse("#/work/12/edit"), Some(AdminRoute::Edit("work".into(), 12)));
        assert_eq!(
            AdminRoute::parse("#/work/12/edit").map(|r| r.to_list()),
            Some(AdminRoute::List("work".into()))
        );
    }

    #[test]
    fn test_resolve() {
        let mut record = Record::draft(crate::record::FieldMap::new());
        record.id = Some(3);
        let quote = EditTarget::new("quotes", record);

        assert_eq!(AdminRoute::List("users".into()).resolve(None), AdminRoute::List("quotes".into()));
        assert_eq!(AdminRoute::New("books".into()).resolve(None), AdminRoute::New("books".into()));
        assert_eq!(AdminRoute::Edit("quotes".into(), 3).resolve(None), AdminRoute::List("quotes".into()));
        assert_eq!(
            AdminRoute::Edit("quotes".into(), 4).resolve(Some(&quote)),
            AdminRoute::List("quotes".into())
        );
        assert_eq!(
            AdminRoute::Edit("quotes".into(), 3).resolve(Some(&quote)),
            AdminRoute::Edit("quotes".into(), 3)
        );
    }

    #[test]
    fn test_resolve_requires_same_resource() {
        let mut record = Record::draft(crate::record::FieldMap::new());
        record.id = Some(3);
        let quote = EditTarget::new("quotes", record);

        // Quote #3 in hand must not open book #3
        assert_eq!(
            AdminRoute::Edit("books".into(), 3).resolve(Some(&quote)),
            AdminRoute::List("books".into())
        );
        assert!(quote.matches("quotes", 3));
        assert!(!quote.matches("books", 3));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(AdminRoute::parse(""), None);
        assert_eq!(AdminRoute::parse("#/"), None);
        assert_eq!(AdminRoute::parse("#/Quotes"), None);
        assert_eq!(AdminRoute::parse("#/work/abc/edit"), None);
        assert_eq!(AdminRoute::parse("#/work/1/delete"), None);
    }
}
