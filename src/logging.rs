use colored::Colorize;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
	EnvFilter,
	fmt::{self, FmtContext, FormatEvent, FormatFields},
	registry::LookupSpan,
};

pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	N: for<'a> FormatFields<'a> + 'static,
{
	fn format_event(
		&self,
		ctx: &FmtContext<'_, S, N>,
		mut writer: fmt::format::Writer<'_>,
		event: &Event<'_>,
	) -> std::fmt::Result {
		let meta = event.metadata();

		let level_str = match *meta.level() {
			Level::ERROR => "ERROR".red(),
			Level::WARN => "WARN".yellow(),
			Level::INFO => "INFO".green(),
			Level::DEBUG => "DEBUG".blue(),
			Level::TRACE => "TRACE".purple(),
		};
		write!(writer, "[{level_str}] ")?;
		write!(writer, "[{}]: ", meta.target())?;

		ctx.field_format().format_fields(writer.by_ref(), event)?;

		writeln!(writer)
	}
}

/// Installs the stderr subscriber. `RUST_LOG` wins when set; otherwise `verbose` picks
/// between `debug` and `warn`.
pub fn init(verbose: bool) {
	let fallback = if verbose { "docrag=debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.event_format(CustomFormatter)
		.init();
}
