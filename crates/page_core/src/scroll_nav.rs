//! Highlights the header link of whichever page section is under the header.

use std::time::{Duration, Instant};

/// Distance from the top of the viewport to where a section counts as "in view".
pub const HEADER_OFFSET_PX: f64 = 150.0;
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkPlacement {
    Desktop,
    Mobile,
}

impl LinkPlacement {
    pub fn color(self, active: bool) -> &'static str {
        match (self, active) {
            (LinkPlacement::Desktop, true) => "#E4E9FF",
            (LinkPlacement::Desktop, false) => "#ACBCF5",
            (LinkPlacement::Mobile, true) => "white",
            (LinkPlacement::Mobile, false) => "#7780A3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub section_id: String,
    pub placement: LinkPlacement,
}

impl NavLink {
    pub fn new(section_id: impl Into<String>, placement: LinkPlacement) -> Self {
        Self {
            section_id: section_id.into(),
            placement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStyle {
    pub link: NavLink,
    pub color: &'static str,
}

/// Section under the header at `scroll_y`. Later sections win on overlap.
pub fn active_section(sections: &[Section], scroll_y: f64) -> Option<&str> {
    let position = scroll_y + HEADER_OFFSET_PX;
    sections
        .iter()
        .rev()
        .find(|section| section.contains(position))
        .map(|section| section.id.as_str())
}

/// Scroll-driven link highlighter with a trailing debounce.
#[derive(Debug, Clone)]
pub struct ScrollNav {
    sections: Vec<Section>,
    links: Vec<NavLink>,
    debounce: Duration,
    last_scroll: Option<Instant>,
}

impl ScrollNav {
    pub fn new(sections: Vec<Section>, links: Vec<NavLink>) -> Self {
        Self {
            sections,
            links,
            debounce: SCROLL_DEBOUNCE,
            last_scroll: None,
        }
    }

    /// Build the highlighter and the link colors for the page's current
    /// scroll position, so links are styled before the first scroll event.
    pub fn setup(sections: Vec<Section>, links: Vec<NavLink>, scroll_y: f64) -> (Self, Vec<LinkStyle>) {
        let nav = Self::new(sections, links);
        let initial = nav.highlight(scroll_y);
        (nav, initial)
    }

    /// Link colors for `scroll_y`, computed immediately.
    pub fn highlight(&self, scroll_y: f64) -> Vec<LinkStyle> {
        let active = active_section(&self.sections, scroll_y);
        self.links
            .iter()
            .map(|link| LinkStyle {
                color: link
                    .placement
                    .color(active == Some(link.section_id.as_str())),
                link: link.clone(),
            })
            .collect()
    }

    /// Note a scroll event; the highlight refreshes once scrolling pauses.
    pub fn on_scroll(&mut self, now: Instant) {
        self.last_scroll = Some(now);
    }

    /// Fresh link colors if the debounce window has passed since the last scroll.
    pub fn poll(&mut self, now: Instant, scroll_y: f64) -> Option<Vec<LinkStyle>> {
        let last = self.last_scroll?;
        if now.saturating_duration_since(last) < self.debounce {
            return None;
        }
        self.last_scroll = None;
        Some(self.highlight(scroll_y))
    }
}
