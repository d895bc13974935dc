use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use page_core::{
    carousel::{spawn_carousel, CarouselConfig, CarouselHost, ClickTarget, Mutation, Slide, SlidePayload},
    FormMessage, FormView, WaitlistClient, WaitlistForm,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

const SUBMIT_LABEL: &str = "Join the waitlist";
const DEFAULT_SLIDE_WIDTH: f64 = 320.0;
const SETTLE_MARGIN: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(about = "Waitlist page tools")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit an address to the subscription endpoint.
    Join {
        #[arg(long)]
        endpoint: Url,
        #[arg(long)]
        email: String,
        #[arg(long)]
        form_location: Option<String>,
    },
    /// Run the carousel against a terminal page and replay clicks on it.
    Carousel {
        /// JSON array of slides; five placeholder slides when omitted.
        #[arg(long)]
        slides: Option<PathBuf>,
        #[arg(long, default_value_t = 5)]
        count: usize,
        /// `next`, `prev`, or a slide index.
        #[arg(value_parser = parse_click)]
        clicks: Vec<ClickTarget>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().command {
        Command::Join {
            endpoint,
            email,
            form_location,
        } => join(endpoint, &email, form_location).await,
        Command::Carousel {
            slides,
            count,
            clicks,
        } => carousel(slides, count, clicks).await,
    }
}

async fn join(endpoint: Url, email: &str, form_location: Option<String>) -> Result<()> {
    info!(%endpoint, "submitting waitlist form");
    let form = WaitlistForm::new(
        WaitlistClient::new(endpoint),
        TerminalForm,
        form_location,
        SUBMIT_LABEL,
    );
    let message = form.submit(email).await;
    if !message.is_success() {
        bail!("{}", message.text);
    }
    Ok(())
}

async fn carousel(path: Option<PathBuf>, count: usize, clicks: Vec<ClickTarget>) -> Result<()> {
    let slides = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<Vec<Slide>>(&raw)
                .with_context(|| format!("{} is not a slide list", path.display()))?
        }
        None => placeholder_slides(count),
    };

    let config = CarouselConfig::default();
    let settle = config.transition_duration + SETTLE_MARGIN;
    let Some(handle) = spawn_carousel(TerminalPage { slides }, config) else {
        bail!("carousel could not be mounted");
    };

    // Clicks during a transition are dropped, so let each one settle.
    tokio::time::sleep(settle).await;
    for target in clicks {
        println!("click {target:?}");
        if !handle.click(target) {
            break;
        }
        tokio::time::sleep(settle).await;
    }

    if let Some(state) = handle.close().await {
        println!(
            "stopped on slide {} of {}",
            state.current_index(),
            state.slide_count()
        );
    }
    Ok(())
}

fn placeholder_slides(count: usize) -> Vec<Slide> {
    (0..count)
        .map(|index| Slide {
            payload: SlidePayload {
                background_image: None,
                content: format!("Slide {}", index + 1),
            },
            width: DEFAULT_SLIDE_WIDTH,
        })
        .collect()
}

fn parse_click(raw: &str) -> std::result::Result<ClickTarget, String> {
    match raw {
        "next" => Ok(ClickTarget::Next),
        "prev" | "previous" => Ok(ClickTarget::Previous),
        other => other
            .parse()
            .map(ClickTarget::Slide)
            .map_err(|_| format!("expected next, prev or a slide index, got {other:?}")),
    }
}

struct TerminalForm;

impl FormView for TerminalForm {
    fn show_message(&self, message: &FormMessage) {
        println!("[{:?}] {}", message.kind, message.text);
    }

    fn clear_message(&self) {}

    fn set_submit_button(&self, enabled: bool, label: &str) {
        info!(enabled, label, "submit button");
    }

    fn reset(&self) {}
}

/// A page whose every required element exists and whose styles are printed.
struct TerminalPage {
    slides: Vec<Slide>,
}

impl CarouselHost for TerminalPage {
    fn has_element(&self, _id: &str) -> bool {
        true
    }

    fn slides(&self, _attribute: &str) -> Vec<Slide> {
        self.slides.clone()
    }

    fn bind_click(&mut self, _target: ClickTarget) {}

    fn apply(&mut self, batch: &[Mutation]) {
        for mutation in batch {
            match mutation {
                Mutation::SlideOpacity {
                    index,
                    opacity,
                    delay,
                } => println!("  slide {index}: opacity {opacity} after {}ms", delay.as_millis()),
                Mutation::PreviewOpacity { opacity, transition } => match transition {
                    Some(transition) => println!("  preview: opacity {opacity} ({transition})"),
                    None => println!("  preview: opacity {opacity}"),
                },
                Mutation::PreviewPayload(payload) => println!("  preview: {}", payload.content),
                Mutation::Button { button, style } => println!(
                    "  {button:?}: disabled={} opacity {} cursor {}",
                    style.disabled,
                    style.opacity,
                    style.cursor.as_css()
                ),
                Mutation::TrackOffset {
                    offset_px,
                    transition,
                } => println!("  track: translateX({offset_px}px) ({transition})"),
            }
        }
    }
}
