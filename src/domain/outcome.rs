//! Render outcomes reported by the widget renderer.

use serde::{Deserialize, Serialize};

/// Result of one widget render attempt against the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderOutcome {
    /// The widget container was inserted before the anchor element.
    Inserted,
    /// A widget with the fixed identity already exists; nothing inserted.
    SkippedAlreadyMounted,
    /// The anchor element is absent from the host layout.
    SkippedNoAnchor,
    /// Every price field carried the sentinel; nothing worth showing.
    SkippedNoData,
}
