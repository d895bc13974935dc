use super::testing::{FakePage, ManualScheduler, SLIDE_WIDTH};
use super::*;

type TestCarousel = CarouselController<FakePage, ManualScheduler>;

fn mounted(slides: usize) -> (TestCarousel, FakePage, ManualScheduler) {
    let page = FakePage::with_slides(slides);
    let scheduler = ManualScheduler::default();
    let mut carousel =
        CarouselController::init(page.clone(), scheduler.clone(), CarouselConfig::default())
            .expect("carousel mounts");
    settle(&mut carousel, &scheduler);
    (carousel, page, scheduler)
}

fn settle(carousel: &mut TestCarousel, scheduler: &ManualScheduler) {
    for timer in scheduler.drain() {
        carousel.on_timer(timer);
    }
}

fn stride() -> f64 {
    SLIDE_WIDTH + CarouselConfig::default().gap_px
}

#[test]
fn mount_binds_every_click_target_and_renders_slide_zero() {
    let page = FakePage::with_slides(3);
    let scheduler = ManualScheduler::default();
    let carousel =
        CarouselController::init(page.clone(), scheduler.clone(), CarouselConfig::default())
            .expect("carousel mounts");

    assert_eq!(
        page.bindings(),
        vec![
            ClickTarget::Previous,
            ClickTarget::Next,
            ClickTarget::Slide(0),
            ClickTarget::Slide(1),
            ClickTarget::Slide(2),
        ]
    );
    assert_eq!(carousel.current_index(), 0);
    assert!(carousel.is_transitioning());
    assert_eq!(page.batch_count(), 1);
    assert_eq!(page.slide_opacities(3), vec![1.0, 0.5, 0.5]);
    assert!(page.last_button(NavButton::Previous).expect("prev").disabled);
    assert!(!page.last_button(NavButton::Next).expect("next").disabled);
    assert_eq!(
        scheduler.scheduled(),
        vec![
            (
                Duration::from_millis(100),
                CarouselTimer::PreviewFadeIn { index: 0 }
            ),
            (Duration::from_millis(500), CarouselTimer::TransitionSettled),
        ]
    );
}

#[test]
fn mount_aborts_without_bindings_when_next_button_is_missing() {
    let page = FakePage::with_slides(5).without(host::NEXT_BUTTON_ID);
    let carousel = mount(page.clone(), ManualScheduler::default(), CarouselConfig::default());

    assert!(carousel.is_none());
    assert!(page.bindings().is_empty());
    assert_eq!(page.batch_count(), 0);
}

#[test]
fn init_reports_every_missing_element() {
    let page = FakePage::with_slides(2)
        .without(host::TRACK_ID)
        .without(host::PREVIEW_ID);
    let err = CarouselController::init(page, ManualScheduler::default(), CarouselConfig::default())
        .err()
        .expect("init fails");
    assert_eq!(
        err,
        CarouselError::MissingElement(vec![host::TRACK_ID, host::PREVIEW_ID])
    );
}

#[test]
fn init_fails_without_slides() {
    let page = FakePage::with_slides(0);
    let err = CarouselController::init(page.clone(), ManualScheduler::default(), CarouselConfig::default())
        .err()
        .expect("init fails");
    assert_eq!(err, CarouselError::NoSlides);
    assert!(page.bindings().is_empty());
}

#[test]
fn next_clamps_at_the_last_slide() {
    for slide_count in 1..=5 {
        for presses in 0..8 {
            let (mut carousel, _page, scheduler) = mounted(slide_count);
            for _ in 0..presses {
                let _ = carousel.navigate_next();
                settle(&mut carousel, &scheduler);
            }
            assert_eq!(
                carousel.current_index(),
                presses.min(slide_count - 1),
                "{presses} presses over {slide_count} slides"
            );
        }
    }
}

#[test]
fn previous_at_first_slide_changes_nothing() {
    let (mut carousel, page, scheduler) = mounted(4);
    let batches_before = page.batch_count();

    assert_eq!(carousel.navigate_previous(), Err(NavigationError::AtStart));
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(page.batch_count(), batches_before);
    assert!(scheduler.scheduled().is_empty());
}

#[test]
fn reselecting_the_active_slide_is_a_no_op() {
    let (mut carousel, page, scheduler) = mounted(4);
    carousel.navigate_to_card(2).expect("jump");
    settle(&mut carousel, &scheduler);
    let batches_before = page.batch_count();

    assert_eq!(
        carousel.navigate_to_card(2),
        Err(NavigationError::AlreadyActive(2))
    );
    assert_eq!(page.batch_count(), batches_before);
    assert!(scheduler.scheduled().is_empty());
}

#[test]
fn out_of_range_jump_is_a_no_op() {
    let (mut carousel, page, scheduler) = mounted(4);
    let batches_before = page.batch_count();

    assert!(matches!(
        carousel.navigate_to_card(4),
        Err(NavigationError::OutOfRange { index: 4, .. })
    ));
    assert!(carousel.navigate_to_card(usize::MAX).is_err());
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(page.batch_count(), batches_before);
    assert!(scheduler.scheduled().is_empty());
}

#[test]
fn requests_during_a_transition_are_dropped_not_queued() {
    let (mut carousel, page, scheduler) = mounted(5);
    carousel.navigate_next().expect("first move");
    let batches_before = page.batch_count();

    assert_eq!(carousel.navigate_next(), Err(NavigationError::Transitioning));
    assert_eq!(
        carousel.navigate_to_card(4),
        Err(NavigationError::Transitioning)
    );
    assert_eq!(carousel.current_index(), 1);
    assert_eq!(page.batch_count(), batches_before);

    settle(&mut carousel, &scheduler);
    assert!(!carousel.is_transitioning());
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn exactly_one_slide_is_active_after_each_transition() {
    let (mut carousel, page, scheduler) = mounted(5);
    for target in [3, 0, 4, 1] {
        carousel.navigate_to_card(target).expect("jump");
        settle(&mut carousel, &scheduler);

        let opacities = page.slide_opacities(5);
        let active: Vec<usize> = opacities
            .iter()
            .enumerate()
            .filter(|(_, opacity)| **opacity == 1.0)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(active, vec![target]);
        assert!(opacities
            .iter()
            .enumerate()
            .all(|(index, opacity)| index == target || *opacity == 0.5));
    }
}

#[test]
fn stagger_grows_with_distance_from_the_active_slide() {
    let (mut carousel, page, _scheduler) = mounted(5);
    carousel.navigate_to_card(2).expect("jump");

    let batch = page.batches().pop().expect("batch");
    let delays: Vec<Duration> = batch
        .iter()
        .filter_map(|mutation| match mutation {
            Mutation::SlideOpacity { delay, .. } => Some(*delay),
            _ => None,
        })
        .collect();
    assert_eq!(
        delays,
        [100, 50, 0, 50, 100].map(Duration::from_millis).to_vec()
    );
}

#[test]
fn button_state_tracks_the_edges_for_every_index() {
    let (mut carousel, page, scheduler) = mounted(4);
    for index in [1, 2, 3, 0] {
        carousel.navigate_to_card(index).expect("jump");
        settle(&mut carousel, &scheduler);

        let prev = page.last_button(NavButton::Previous).expect("prev");
        let next = page.last_button(NavButton::Next).expect("next");
        assert_eq!(prev.disabled, index == 0);
        assert_eq!(next.disabled, index == 3);
        for style in [prev, next] {
            if style.disabled {
                assert_eq!(style.opacity, 0.4);
                assert_eq!(style.cursor, Cursor::NotAllowed);
            } else {
                assert_eq!(style.opacity, 1.0);
                assert_eq!(style.cursor, Cursor::Pointer);
            }
        }
    }
}

#[test]
fn three_nexts_over_five_slides() {
    let (mut carousel, page, scheduler) = mounted(5);
    for _ in 0..3 {
        carousel.navigate_next().expect("move");
        settle(&mut carousel, &scheduler);
    }

    assert_eq!(carousel.current_index(), 3);
    assert!(!page.last_button(NavButton::Previous).expect("prev").disabled);
    assert!(!page.last_button(NavButton::Next).expect("next").disabled);
    assert_eq!(page.last_track_offset(), Some(-3.0 * stride()));
    assert_eq!(carousel.track_offset(), -3.0 * stride());
}

#[test]
fn next_at_the_last_slide_keeps_next_disabled() {
    let (mut carousel, page, scheduler) = mounted(5);
    carousel.navigate_to_card(4).expect("jump");
    settle(&mut carousel, &scheduler);
    let batches_before = page.batch_count();

    assert_eq!(carousel.navigate_next(), Err(NavigationError::AtEnd));
    assert_eq!(carousel.current_index(), 4);
    assert_eq!(page.batch_count(), batches_before);
    assert!(page.last_button(NavButton::Next).expect("next").disabled);
}

#[test]
fn preview_fades_out_then_swaps_payload() {
    let (mut carousel, page, scheduler) = mounted(3);
    carousel.navigate_to_card(2).expect("jump");

    let batch = page.batches().pop().expect("batch");
    assert!(batch.contains(&Mutation::PreviewOpacity {
        opacity: 0.0,
        transition: None
    }));
    assert_eq!(page.preview_payload().map(|p| p.content), Some("slide 0".into()));

    settle(&mut carousel, &scheduler);
    let swap = page.batches().pop().expect("fade-in batch");
    assert_eq!(
        swap,
        vec![
            Mutation::PreviewPayload(SlidePayload {
                background_image: Some("url(\"/img/slide-2.jpg\")".into()),
                content: "slide 2".into(),
            }),
            Mutation::PreviewOpacity {
                opacity: 1.0,
                transition: Some(CarouselConfig::default().preview_fade_in),
            },
        ]
    );
}

#[test]
fn clicks_map_to_navigation() {
    let (mut carousel, _page, scheduler) = mounted(3);
    assert_eq!(carousel.handle_click(ClickTarget::Slide(2)), Ok(2));
    settle(&mut carousel, &scheduler);
    assert_eq!(carousel.handle_click(ClickTarget::Previous), Ok(1));
    settle(&mut carousel, &scheduler);
    assert_eq!(carousel.handle_click(ClickTarget::Next), Ok(2));
}
