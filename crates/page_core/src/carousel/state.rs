use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Transitioning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    ToCard(usize),
}

/// Why a navigation request was dropped. None of these reach the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("already at the first slide")]
    AtStart,
    #[error("already at the last slide")]
    AtEnd,
    #[error("slide {index} is out of range for {slide_count} slides")]
    OutOfRange { index: usize, slide_count: usize },
    #[error("slide {0} is already active")]
    AlreadyActive(usize),
    #[error("a transition is still running")]
    Transitioning,
}

/// Position and gate of one carousel. `current_index < slide_count` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    current_index: usize,
    slide_count: usize,
    phase: Phase,
}

impl CarouselState {
    /// `slide_count` must be non-zero; the controller checks before building one.
    pub(crate) fn new(slide_count: usize) -> Self {
        debug_assert!(slide_count > 0);
        Self {
            current_index: 0,
            slide_count,
            phase: Phase::Idle,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.slide_count
    }

    /// Index `navigation` would move to, without touching state.
    pub fn resolve(&self, navigation: Navigation) -> Result<usize, NavigationError> {
        let target = match navigation {
            Navigation::Previous if self.is_first() => return Err(NavigationError::AtStart),
            Navigation::Previous => self.current_index - 1,
            Navigation::Next if self.is_last() => return Err(NavigationError::AtEnd),
            Navigation::Next => self.current_index + 1,
            Navigation::ToCard(index) if index >= self.slide_count => {
                return Err(NavigationError::OutOfRange {
                    index,
                    slide_count: self.slide_count,
                })
            }
            Navigation::ToCard(index) if index == self.current_index => {
                return Err(NavigationError::AlreadyActive(index))
            }
            Navigation::ToCard(index) => index,
        };

        if self.phase == Phase::Transitioning {
            return Err(NavigationError::Transitioning);
        }
        Ok(target)
    }

    /// Idle -> Transitioning at `index`. Callers resolve first.
    pub(crate) fn begin(&mut self, index: usize) {
        debug_assert!(index < self.slide_count);
        self.current_index = index;
        self.phase = Phase::Transitioning;
    }

    /// Transitioning -> Idle.
    pub(crate) fn settle(&mut self) {
        self.phase = Phase::Idle;
    }
}
