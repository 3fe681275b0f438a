//! Log output.
//!
//! Every event is printed to stdout as one line:
//! `[2026-10-14T09:05:03] [INFO ] message key=value`

use std::fmt;

use chrono::{Local, NaiveDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event formatter producing `[<timestamp>] [<LEVEL>] <message>` lines.
pub struct LogLine;

impl<S, N> FormatEvent<S, N> for LogLine
where
  S: Subscriber + for<'a> LookupSpan<'a>,
  N: for<'a> FormatFields<'a> + 'static,
{
  fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
    write!(writer, "{}", prefix(&Local::now().naive_local(), event.metadata().level()))?;
    ctx.field_format().format_fields(writer.by_ref(), event)?;
    writeln!(writer)
  }
}

/// Local time to the second, level upper-cased and padded to five columns.
pub fn prefix(timestamp: &NaiveDateTime, level: &Level) -> String {
  format!(
    "[{}] [{:<5}] ",
    timestamp.format("%Y-%m-%dT%H:%M:%S"),
    level.to_string().to_uppercase()
  )
}

/// Install the global subscriber.
///
/// `RUST_LOG` picks the filter unless `verbose` forces `debug`; the default is `info`.
pub fn init(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stdout)
    .with_ansi(false)
    .event_format(LogLine)
    .init();
}
