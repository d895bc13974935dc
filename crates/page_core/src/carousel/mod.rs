//! Image carousel: slide index, navigation gate and the visual batch each
//! transition pushes to the page.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info};

pub mod config;
pub mod host;
pub mod render;
pub mod runtime;
pub mod state;

pub use config::{CarouselConfig, Easing, Transition};
pub use host::{CarouselHost, ClickTarget, Slide, SlidePayload};
pub use render::{ButtonStyle, Cursor, Mutation, NavButton};
pub use runtime::{spawn_carousel, CarouselHandle, TokioScheduler};
pub use state::{CarouselState, Navigation, NavigationError, Phase};

use host::{REQUIRED_ELEMENTS, SLIDE_ATTRIBUTE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("missing required elements: {}", .0.join(", "))]
    MissingElement(Vec<&'static str>),
    #[error("no carousel slides found")]
    NoSlides,
}

/// Deferred work a transition asks the host loop to run later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselTimer {
    /// Swap the preview to slide `index` and fade it back in.
    PreviewFadeIn { index: usize },
    /// Reopen the navigation gate.
    TransitionSettled,
}

/// Fire-and-forget timers; the host hands each one back via
/// [`CarouselController::on_timer`] once `delay` has elapsed.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, timer: CarouselTimer);
}

pub struct CarouselController<H, S> {
    host: H,
    scheduler: S,
    config: CarouselConfig,
    slides: Vec<Slide>,
    stride_px: f64,
    state: CarouselState,
}

/// Build a carousel on `host`, logging and swallowing any setup failure.
pub fn mount<H, S>(host: H, scheduler: S, config: CarouselConfig) -> Option<CarouselController<H, S>>
where
    H: CarouselHost,
    S: Scheduler,
{
    match CarouselController::init(host, scheduler, config) {
        Ok(controller) => {
            info!(slides = controller.slide_count(), "carousel mounted");
            Some(controller)
        }
        Err(error) => {
            error!(%error, "carousel not mounted");
            None
        }
    }
}

impl<H, S> CarouselController<H, S>
where
    H: CarouselHost,
    S: Scheduler,
{
    /// Look up the carousel's elements, bind its clicks and render slide 0.
    ///
    /// Nothing is bound unless every lookup succeeds.
    pub fn init(mut host: H, scheduler: S, config: CarouselConfig) -> Result<Self, CarouselError> {
        let missing: Vec<&'static str> = REQUIRED_ELEMENTS
            .into_iter()
            .filter(|id| !host.has_element(id))
            .collect();
        if !missing.is_empty() {
            return Err(CarouselError::MissingElement(missing));
        }

        let slides = host.slides(SLIDE_ATTRIBUTE);
        let Some(first) = slides.first() else {
            return Err(CarouselError::NoSlides);
        };
        let stride_px = first.width + config.gap_px;

        host.bind_click(ClickTarget::Previous);
        host.bind_click(ClickTarget::Next);
        for index in 0..slides.len() {
            host.bind_click(ClickTarget::Slide(index));
        }

        let mut controller = Self {
            host,
            scheduler,
            config,
            state: CarouselState::new(slides.len()),
            slides,
            stride_px,
        };
        controller.transition_to(0);
        Ok(controller)
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.phase() == Phase::Transitioning
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Track offset for the current slide, in px.
    pub fn track_offset(&self) -> f64 {
        -(self.state.current_index() as f64) * self.stride_px
    }

    pub fn navigate_previous(&mut self) -> Result<usize, NavigationError> {
        self.navigate(Navigation::Previous)
    }

    pub fn navigate_next(&mut self) -> Result<usize, NavigationError> {
        self.navigate(Navigation::Next)
    }

    pub fn navigate_to_card(&mut self, index: usize) -> Result<usize, NavigationError> {
        self.navigate(Navigation::ToCard(index))
    }

    /// Move to the slide `navigation` names and start a transition.
    ///
    /// Rejected requests leave state and page untouched; they are not queued.
    pub fn navigate(&mut self, navigation: Navigation) -> Result<usize, NavigationError> {
        let target = self.state.resolve(navigation)?;
        self.transition_to(target);
        Ok(target)
    }

    pub fn handle_click(&mut self, target: ClickTarget) -> Result<usize, NavigationError> {
        let navigation = match target {
            ClickTarget::Previous => Navigation::Previous,
            ClickTarget::Next => Navigation::Next,
            ClickTarget::Slide(index) => Navigation::ToCard(index),
        };
        self.navigate(navigation)
    }

    pub fn on_timer(&mut self, timer: CarouselTimer) {
        match timer {
            CarouselTimer::PreviewFadeIn { index } => {
                let Some(slide) = self.slides.get(index) else {
                    return;
                };
                let batch = [
                    Mutation::PreviewPayload(slide.payload.clone()),
                    Mutation::PreviewOpacity {
                        opacity: self.config.active_opacity,
                        transition: Some(self.config.preview_fade_in),
                    },
                ];
                self.host.apply(&batch);
            }
            CarouselTimer::TransitionSettled => {
                self.state.settle();
                debug!(index = self.state.current_index(), "carousel transition settled");
            }
        }
    }

    fn transition_to(&mut self, index: usize) {
        self.state.begin(index);
        debug!(index, "carousel transition started");

        let batch = self.transition_batch();
        self.host.apply(&batch);

        self.scheduler
            .schedule(self.config.fade_duration, CarouselTimer::PreviewFadeIn { index });
        self.scheduler
            .schedule(self.config.transition_duration, CarouselTimer::TransitionSettled);
    }

    fn transition_batch(&self) -> Vec<Mutation> {
        let current = self.state.current_index();
        let mut batch = Vec::with_capacity(self.slides.len() + 4);

        for index in 0..self.slides.len() {
            let distance = index.abs_diff(current) as u32;
            let opacity = if index == current {
                self.config.active_opacity
            } else {
                self.config.inactive_opacity
            };
            batch.push(Mutation::SlideOpacity {
                index,
                opacity,
                delay: self.config.stagger_unit * distance,
            });
        }

        batch.push(Mutation::PreviewOpacity {
            opacity: 0.0,
            transition: None,
        });
        batch.push(Mutation::Button {
            button: NavButton::Previous,
            style: self.button_style(self.state.is_first()),
        });
        batch.push(Mutation::Button {
            button: NavButton::Next,
            style: self.button_style(self.state.is_last()),
        });
        batch.push(Mutation::TrackOffset {
            offset_px: self.track_offset(),
            transition: self.config.track_transition(),
        });
        batch
    }

    fn button_style(&self, disabled: bool) -> ButtonStyle {
        ButtonStyle {
            disabled,
            opacity: if disabled {
                self.config.disabled_opacity
            } else {
                self.config.active_opacity
            },
            cursor: if disabled {
                Cursor::NotAllowed
            } else {
                Cursor::Pointer
            },
            transition: self.config.button_transition,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
