use std::time::{Duration, Instant};

use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};
use once_cell::sync::Lazy;

use crate::mode::ProgressMode;
use crate::state::{Cadence, ProgressState, format_clock};

pub trait Tracker<Inc> {
    fn step(&mut self, step: Inc) -> &mut Self;
    fn finish(self);
}

const BAR_STYLE: &str = "{prefix} downloading [{bar:20}] {binary_bytes_per_sec} {percent}% {eta}";

const METER_STYLE: &str = "{prefix} {msg}";

const BAR_CHARS: &str = "=-";

const METER_INTERVAL: Duration = Duration::from_millis(100);

static BAR_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(BAR_STYLE)
        .ok()
        .map(|style| style.progress_chars(BAR_CHARS))
});

static METER_TEMPLATE: Lazy<Option<ProgressStyle>> =
    Lazy::new(|| ProgressStyle::with_template(METER_STYLE).ok());

/// The progress renderer attached to one download.
///
/// Draws wherever its target points; downloads use stdout. A template that
/// fails to parse falls back to indicatif's default style rather than
/// surfacing an error.
pub enum Instrument {
    Silent,
    Bar {
        pb: ProgressBar,
        state: ProgressState,
    },
    Meter {
        pb: ProgressBar,
        state: ProgressState,
        cadence: Cadence,
    },
}

impl Instrument {
    pub fn with_target(mode: ProgressMode, label: &str, target: ProgressDrawTarget) -> Self {
        match mode {
            ProgressMode::Silent => Instrument::Silent,
            ProgressMode::Determinate { total } => {
                let pb = ProgressBar::with_draw_target(Some(total), target);
                let pb = styled(pb, &BAR_TEMPLATE);
                pb.set_prefix(label.to_string());
                Instrument::Bar {
                    pb,
                    state: ProgressState::new(Some(total)),
                }
            }
            ProgressMode::Indeterminate => {
                let pb = ProgressBar::with_draw_target(None, target);
                let pb = styled(pb, &METER_TEMPLATE);
                pb.set_prefix(label.to_string());
                Instrument::Meter {
                    pb,
                    state: ProgressState::new(None),
                    cadence: Cadence::new(METER_INTERVAL),
                }
            }
        }
    }

    pub fn mode(&self) -> ProgressMode {
        match self {
            Instrument::Silent => ProgressMode::Silent,
            Instrument::Bar { state, .. } => ProgressMode::Determinate {
                total: state.total().unwrap_or_default(),
            },
            Instrument::Meter { .. } => ProgressMode::Indeterminate,
        }
    }

    pub fn state(&self) -> Option<&ProgressState> {
        match self {
            Instrument::Silent => None,
            Instrument::Bar { state, .. } | Instrument::Meter { state, .. } => Some(state),
        }
    }

    /// Stop drawing without marking the download complete.
    pub fn abandon(self) {
        match self {
            Instrument::Silent => {}
            Instrument::Bar { pb, .. } | Instrument::Meter { pb, .. } => pb.abandon(),
        }
    }
}

impl Tracker<u64> for Instrument {
    fn step(&mut self, len: u64) -> &mut Self {
        match self {
            Instrument::Silent => {}
            Instrument::Bar { pb, state } => {
                state.advance(len);
                pb.inc(len);
            }
            Instrument::Meter { pb, state, cadence } => {
                state.advance(len);
                let now = Instant::now();
                if cadence.due(now) {
                    pb.set_message(meter_line(state, now));
                    pb.tick();
                }
            }
        }
        self
    }

    fn finish(self) {
        match self {
            Instrument::Silent => {}
            Instrument::Bar { pb, .. } => pb.finish(),
            Instrument::Meter { pb, state, .. } => {
                pb.finish_with_message(meter_line(&state, Instant::now()));
            }
        }
    }
}

fn styled(pb: ProgressBar, template: &Lazy<Option<ProgressStyle>>) -> ProgressBar {
    match template.as_ref() {
        Some(style) => pb.with_style(style.clone()),
        None => pb,
    }
}

fn meter_line(state: &ProgressState, now: Instant) -> String {
    format!(
        "Running: {} ({}) {}/s",
        format_clock(state.elapsed_at(now)),
        HumanBytes(state.transferred()),
        HumanBytes(state.throughput_at(now) as u64),
    )
}
