use std::time::Duration;

use super::{config::Transition, host::SlidePayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavButton {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Pointer,
    NotAllowed,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Pointer => "pointer",
            Cursor::NotAllowed => "not-allowed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub disabled: bool,
    pub opacity: f32,
    pub cursor: Cursor,
    pub transition: Transition,
}

/// One style change issued to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SlideOpacity {
        index: usize,
        opacity: f32,
        delay: Duration,
    },
    PreviewOpacity {
        opacity: f32,
        transition: Option<Transition>,
    },
    PreviewPayload(SlidePayload),
    Button {
        button: NavButton,
        style: ButtonStyle,
    },
    TrackOffset {
        offset_px: f64,
        transition: Transition,
    },
}
