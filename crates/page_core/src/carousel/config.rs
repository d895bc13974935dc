use std::{fmt, time::Duration};

/// CSS timing function names used by the carousel's transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Ease,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn as_css(self) -> &'static str {
        match self {
            Easing::Ease => "ease",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

/// A timed style transition, rendered like a CSS `transition` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}s {}",
            self.duration.as_secs_f64(),
            self.easing.as_css()
        )
    }
}

/// Timing and styling knobs for a carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Horizontal gap between slides on the track, in px.
    pub gap_px: f64,
    /// Reveal delay added per slide of distance from the active one.
    pub stagger_unit: Duration,
    /// How long a transition holds the navigation gate closed.
    pub transition_duration: Duration,
    /// Delay between fading the preview out and swapping its payload.
    pub fade_duration: Duration,
    /// Fade-in applied to the preview once the payload is swapped.
    pub preview_fade_in: Transition,
    pub button_transition: Transition,
    pub track_easing: Easing,
    pub active_opacity: f32,
    pub inactive_opacity: f32,
    pub disabled_opacity: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            gap_px: 24.0,
            stagger_unit: Duration::from_millis(50),
            transition_duration: Duration::from_millis(500),
            fade_duration: Duration::from_millis(100),
            preview_fade_in: Transition::new(Duration::from_secs(1), Easing::EaseInOut),
            button_transition: Transition::new(Duration::from_millis(300), Easing::Ease),
            track_easing: Easing::EaseOut,
            active_opacity: 1.0,
            inactive_opacity: 0.5,
            disabled_opacity: 0.4,
        }
    }
}

impl CarouselConfig {
    pub fn track_transition(&self) -> Transition {
        Transition::new(self.transition_duration, self.track_easing)
    }
}
