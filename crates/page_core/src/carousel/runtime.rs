use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use super::{
    mount, CarouselConfig, CarouselController, CarouselHost, CarouselState, CarouselTimer,
    ClickTarget, Scheduler,
};

/// Schedules carousel timers as detached tokio sleeps that post back into the event loop.
#[derive(Clone)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<CarouselTimer>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CarouselTimer>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, timer: CarouselTimer) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(timer);
        });
    }
}

/// Click intake for a carousel running on its own task.
pub struct CarouselHandle {
    clicks: mpsc::UnboundedSender<ClickTarget>,
    task: JoinHandle<CarouselState>,
}

impl CarouselHandle {
    /// Queue a click. Returns false once the carousel task has stopped.
    pub fn click(&self, target: ClickTarget) -> bool {
        self.clicks.send(target).is_ok()
    }

    /// Stop the event loop and return the carousel's final state.
    pub async fn close(self) -> Option<CarouselState> {
        drop(self.clicks);
        self.task.await.ok()
    }
}

/// Mount a carousel on `host` and drive it from a single tokio task.
///
/// Returns `None` when mounting fails; the failure is logged, not raised.
/// Must be called from within a tokio runtime.
pub fn spawn_carousel<H>(host: H, config: CarouselConfig) -> Option<CarouselHandle>
where
    H: CarouselHost + Send + 'static,
{
    let (scheduler, timers) = TokioScheduler::new();
    let controller = mount(host, scheduler, config)?;
    let (clicks, click_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_event_loop(controller, click_rx, timers));
    Some(CarouselHandle { clicks, task })
}

async fn run_event_loop<H>(
    mut controller: CarouselController<H, TokioScheduler>,
    mut clicks: mpsc::UnboundedReceiver<ClickTarget>,
    mut timers: mpsc::UnboundedReceiver<CarouselTimer>,
) -> CarouselState
where
    H: CarouselHost,
{
    loop {
        tokio::select! {
            click = clicks.recv() => match click {
                Some(target) => {
                    if let Err(reason) = controller.handle_click(target) {
                        debug!(?target, %reason, "carousel click ignored");
                    }
                }
                None => break,
            },
            Some(timer) = timers.recv() => controller.on_timer(timer),
        }
    }
    controller.state().clone()
}
