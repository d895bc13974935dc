use serde::{Deserialize, Serialize};

use super::render::Mutation;

pub const TRACK_ID: &str = "image-grid";
pub const PREV_BUTTON_ID: &str = "prev-btn";
pub const NEXT_BUTTON_ID: &str = "next-btn";
pub const PREVIEW_ID: &str = "active-card-display";
pub const SLIDE_ATTRIBUTE: &str = "data-index";

/// Containers a carousel cannot run without, in lookup order.
pub const REQUIRED_ELEMENTS: [&str; 4] = [TRACK_ID, PREV_BUTTON_ID, NEXT_BUTTON_ID, PREVIEW_ID];

/// What a slide shows; opaque to the controller, copied into the preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidePayload {
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(flatten)]
    pub payload: SlidePayload,
    /// Rendered width in px.
    pub width: f64,
}

/// Things a click can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    Previous,
    Next,
    Slide(usize),
}

/// The page a carousel lives in: element lookup, click wiring and style output.
pub trait CarouselHost {
    fn has_element(&self, id: &str) -> bool;

    /// Elements carrying `attribute`, in document order.
    fn slides(&self, attribute: &str) -> Vec<Slide>;

    fn bind_click(&mut self, target: ClickTarget);

    /// Apply one batch of style changes. Batches are never split.
    fn apply(&mut self, batch: &[Mutation]);
}
