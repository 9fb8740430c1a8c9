//! Stash plugin log framing.
//!
//! External plugins report to Stash over stderr, one line per message:
//! `\x01<level>\x02<text>\n`, where level is one of `t d i w e`, or `p` with a
//! progress fraction in `[0, 1]` as the text.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer};

/// Events carrying this field are framed as progress updates.
pub const PROGRESS_FIELD: &str = "progress";

const START: char = '\x01';
const END: char = '\x02';

/// Layer that writes events in Stash's plugin log format.
pub struct StashLogLayer<W = fn() -> io::Stderr> {
    make_writer: W,
}

impl StashLogLayer {
    pub fn stderr() -> Self {
        Self {
            make_writer: io::stderr,
        }
    }
}

impl<W> StashLogLayer<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    pub fn with_writer(make_writer: W) -> Self {
        Self { make_writer }
    }
}

fn level_marker(level: &Level) -> char {
    match *level {
        Level::TRACE => 't',
        Level::DEBUG => 'd',
        Level::INFO => 'i',
        Level::WARN => 'w',
        Level::ERROR => 'e',
    }
}

/// Frame one message. Multi-line text becomes one frame per line so every
/// line Stash reads carries a level.
pub fn frame(marker: char, text: &str) -> String {
    let mut out = String::new();
    let mut lines = text.lines().peekable();
    if lines.peek().is_none() {
        let _ = writeln!(out, "{START}{marker}{END}");
    }
    for line in lines {
        let _ = writeln!(out, "{START}{marker}{END}{line}");
    }
    out
}

impl<S, W> Layer<S> for StashLogLayer<W>
where
    S: Subscriber,
    W: for<'a> MakeWriter<'a> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FrameVisitor::default();
        event.record(&mut visitor);

        let framed = match visitor.progress {
            Some(progress) => frame('p', &clamp_progress(progress).to_string()),
            None => frame(level_marker(event.metadata().level()), &visitor.text()),
        };

        let mut writer = self.make_writer.make_writer();
        let _ = writer.write_all(framed.as_bytes());
        let _ = writer.flush();
    }
}

/// Clamp to `[0, 1]`; NaN counts as no progress.
pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Default)]
struct FrameVisitor {
    message: String,
    fields: String,
    progress: Option<f64>,
}

impl FrameVisitor {
    fn text(&self) -> String {
        format!("{}{}", self.message, self.fields)
    }
}

impl Visit for FrameVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == PROGRESS_FIELD {
            self.progress = Some(value);
        } else {
            self.record_debug(field, &value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}
