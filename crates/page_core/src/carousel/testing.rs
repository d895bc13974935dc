use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use super::{
    host::REQUIRED_ELEMENTS, ButtonStyle, CarouselHost, CarouselTimer, ClickTarget, Mutation,
    NavButton, Scheduler, Slide, SlidePayload,
};

pub(crate) const SLIDE_WIDTH: f64 = 320.0;

#[derive(Default)]
struct PageRecord {
    present: HashSet<&'static str>,
    slides: Vec<Slide>,
    bindings: Vec<ClickTarget>,
    batches: Vec<Vec<Mutation>>,
}

/// In-memory page that records everything the carousel does to it.
#[derive(Clone, Default)]
pub(crate) struct FakePage {
    record: Arc<Mutex<PageRecord>>,
}

impl FakePage {
    pub(crate) fn with_slides(count: usize) -> Self {
        let slides = (0..count)
            .map(|index| Slide {
                payload: SlidePayload {
                    background_image: Some(format!("url(\"/img/slide-{index}.jpg\")")),
                    content: format!("slide {index}"),
                },
                width: SLIDE_WIDTH,
            })
            .collect();
        let page = Self::default();
        {
            let mut record = page.record.lock().expect("page lock");
            record.present = REQUIRED_ELEMENTS.into_iter().collect();
            record.slides = slides;
        }
        page
    }

    pub(crate) fn without(self, id: &'static str) -> Self {
        self.record.lock().expect("page lock").present.remove(id);
        self
    }

    pub(crate) fn bindings(&self) -> Vec<ClickTarget> {
        self.record.lock().expect("page lock").bindings.clone()
    }

    pub(crate) fn batches(&self) -> Vec<Vec<Mutation>> {
        self.record.lock().expect("page lock").batches.clone()
    }

    pub(crate) fn batch_count(&self) -> usize {
        self.record.lock().expect("page lock").batches.len()
    }

    /// Every mutation applied so far, flattened in order.
    pub(crate) fn mutations(&self) -> Vec<Mutation> {
        self.batches().into_iter().flatten().collect()
    }

    pub(crate) fn slide_opacities(&self, count: usize) -> Vec<f32> {
        let mut opacities = vec![f32::NAN; count];
        for mutation in self.mutations() {
            if let Mutation::SlideOpacity { index, opacity, .. } = mutation {
                opacities[index] = opacity;
            }
        }
        opacities
    }

    pub(crate) fn last_button(&self, which: NavButton) -> Option<ButtonStyle> {
        self.mutations().into_iter().rev().find_map(|mutation| match mutation {
            Mutation::Button { button, style } if button == which => Some(style),
            _ => None,
        })
    }

    pub(crate) fn last_track_offset(&self) -> Option<f64> {
        self.mutations().into_iter().rev().find_map(|mutation| match mutation {
            Mutation::TrackOffset { offset_px, .. } => Some(offset_px),
            _ => None,
        })
    }

    pub(crate) fn preview_payload(&self) -> Option<SlidePayload> {
        self.mutations().into_iter().rev().find_map(|mutation| match mutation {
            Mutation::PreviewPayload(payload) => Some(payload),
            _ => None,
        })
    }
}

impl CarouselHost for FakePage {
    fn has_element(&self, id: &str) -> bool {
        self.record.lock().expect("page lock").present.contains(id)
    }

    fn slides(&self, _attribute: &str) -> Vec<Slide> {
        self.record.lock().expect("page lock").slides.clone()
    }

    fn bind_click(&mut self, target: ClickTarget) {
        self.record.lock().expect("page lock").bindings.push(target);
    }

    fn apply(&mut self, batch: &[Mutation]) {
        self.record
            .lock()
            .expect("page lock")
            .batches
            .push(batch.to_vec());
    }
}

/// Scheduler that only records; tests fire timers by hand.
#[derive(Clone, Default)]
pub(crate) struct ManualScheduler {
    scheduled: Arc<Mutex<Vec<(Duration, CarouselTimer)>>>,
}

impl ManualScheduler {
    pub(crate) fn scheduled(&self) -> Vec<(Duration, CarouselTimer)> {
        self.scheduled.lock().expect("scheduler lock").clone()
    }

    /// Remove and return everything scheduled so far, shortest delay first.
    pub(crate) fn drain(&self) -> Vec<CarouselTimer> {
        let mut scheduled = std::mem::take(&mut *self.scheduled.lock().expect("scheduler lock"));
        scheduled.sort_by_key(|(delay, _)| *delay);
        scheduled.into_iter().map(|(_, timer)| timer).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, timer: CarouselTimer) {
        self.scheduled
            .lock()
            .expect("scheduler lock")
            .push((delay, timer));
    }
}
