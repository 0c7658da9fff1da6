//! Seam over the ambient host page.
//!
//! The overlay never owns the document it decorates: reads are best-effort
//! lookups against whatever the host serves, and the only mutations are the
//! two idempotent inserts the widget needs. Authoritative mount state lives
//! in the document itself (fixed element identities), never in memory, so a
//! stale in-flight result against a torn-down page is a natural no-op.

use scraper::{ElementRef, Html, Selector};

/// Load state reported by the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Complete,
}

/// Access to the host page: reads plus the two mutations the overlay
/// performs.
pub trait HostDocument {
    fn ready_state(&self) -> ReadyState;

    /// The document cookie string, `name=value` pairs separated by `; `.
    fn cookies(&self) -> String;

    /// Attribute value of the element with the given id, if both exist.
    fn element_attribute(&self, element_id: &str, attribute: &str) -> Option<String>;

    /// Whether any element with the given id exists.
    fn has_element(&self, element_id: &str) -> bool;

    /// Insert `html` as the immediately preceding sibling of the element
    /// with `anchor_id`, registering the new node under `element_id`.
    /// Returns false when the anchor is absent (nothing inserted).
    fn insert_before(&mut self, anchor_id: &str, element_id: &str, html: &str) -> bool;

    /// Append a style block to the document head under `element_id`.
    fn append_head_style(&mut self, element_id: &str, css: &str);
}

/// Fragment recorded by [`StaticDocument::insert_before`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedFragment {
    pub anchor_id: String,
    pub element_id: String,
    pub html: String,
}

/// In-memory document over a parsed HTML snapshot.
///
/// Reads go against the snapshot; mutations are recorded so element
/// existence reflects them. Serves tests and embedding hosts that hand the
/// overlay a static copy of the page.
pub struct StaticDocument {
    html: Html,
    cookies: String,
    ready_state: ReadyState,
    fragments: Vec<InsertedFragment>,
    styles: Vec<(String, String)>,
}

impl StaticDocument {
    pub fn parse(document: &str) -> Self {
        Self {
            html: Html::parse_document(document),
            cookies: String::new(),
            ready_state: ReadyState::Complete,
            fragments: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = cookies.into();
        self
    }

    pub fn with_ready_state(mut self, ready_state: ReadyState) -> Self {
        self.ready_state = ready_state;
        self
    }

    /// Mark the document as finished loading.
    pub fn finish_loading(&mut self) {
        self.ready_state = ReadyState::Complete;
    }

    /// Fragments inserted so far, in insertion order.
    pub fn inserted_fragments(&self) -> &[InsertedFragment] {
        &self.fragments
    }

    /// Style blocks appended so far, as (element id, css) pairs.
    pub fn appended_styles(&self) -> &[(String, String)] {
        &self.styles
    }

    fn select_by_id(&self, element_id: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(&format!(r#"[id="{element_id}"]"#)).ok()?;
        self.html.select(&selector).next()
    }
}

impl HostDocument for StaticDocument {
    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn cookies(&self) -> String {
        self.cookies.clone()
    }

    fn element_attribute(&self, element_id: &str, attribute: &str) -> Option<String> {
        self.select_by_id(element_id)
            .and_then(|element| element.value().attr(attribute).map(str::to_string))
    }

    fn has_element(&self, element_id: &str) -> bool {
        self.select_by_id(element_id).is_some()
            || self.fragments.iter().any(|f| f.element_id == element_id)
            || self.styles.iter().any(|(id, _)| id == element_id)
    }

    fn insert_before(&mut self, anchor_id: &str, element_id: &str, html: &str) -> bool {
        if self.select_by_id(anchor_id).is_none() {
            return false;
        }
        self.fragments.push(InsertedFragment {
            anchor_id: anchor_id.to_string(),
            element_id: element_id.to_string(),
            html: html.to_string(),
        });
        true
    }

    fn append_head_style(&mut self, element_id: &str, css: &str) {
        self.styles.push((element_id.to_string(), css.to_string()));
    }
}
