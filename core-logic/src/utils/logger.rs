use anyhow::{Context, Result};
use chrono::Local;
use nu_ansi_term::{Color, Style};
use std::fmt;
use std::path::Path;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    prelude::*,
    registry::LookupSpan,
    EnvFilter, Layer,
};

/// Installs the global subscriber: hourly rolling file under `log_dir` plus a
/// coloured console layer.
///
/// `RUST_LOG` overrides the file filter (default `info`). The console only
/// shows warnings and errors. The returned guard must outlive the program's
/// logging.
pub fn setup_logger(log_dir: impl AsRef<Path>) -> Result<WorkerGuard> {
    let log_dir = log_dir.as_ref();
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

    let file_appender = tracing_appender::rolling::hourly(log_dir, "app");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .event_format(FileFormatter)
        .with_filter(file_filter);

    let console_filter =
        tracing_subscriber::filter::Targets::new().with_default(tracing::Level::WARN);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .event_format(TerminalFormatter)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to set global subscriber")?;

    Ok(guard)
}

// --- Formatters ---

#[derive(Default)]
struct EventVisitor {
    message: String,
    context: Option<String>,
}

impl tracing::field::Visit for EventVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            "context" => self.context = Some(format!("{:?}", value)),
            _ => {}
        }
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "context" => self.context = Some(value.to_string()),
            _ => {}
        }
    }
}

impl EventVisitor {
    fn line(&self) -> String {
        match self.context.as_deref() {
            Some(context) if !context.is_empty() => format!("[{}] {}", context, self.message),
            _ => self.message.clone(),
        }
    }
}

pub struct TerminalFormatter;

impl<S, N> FormatEvent<S, N> for TerminalFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let msg = visitor.line();

        let colored_msg = if msg.contains("SUCCESS") || msg.contains("Succeeded") {
            let green_text = Style::new().fg(Color::LightGreen).bold();
            msg.replace("SUCCESS", &format!("{}", green_text.paint("SUCCESS")))
                .replace("Succeeded", &format!("{}", green_text.paint("Succeeded")))
        } else if msg.contains("FAILED") || msg.contains("failed") {
            let red_text = Style::new().fg(Color::LightRed).bold();
            msg.replace("FAILED", &format!("{}", red_text.paint("FAILED")))
                .replace("failed", &format!("{}", red_text.paint("failed")))
        } else {
            msg
        };

        writeln!(writer, "{}", colored_msg)
    }
}

pub struct FileFormatter;

impl<S, N> FormatEvent<S, N> for FileFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let level = event.metadata().level();

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        writeln!(writer, "{} [{}] {}", timestamp, level, visitor.line())
    }
}
