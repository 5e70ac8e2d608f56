use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing if the named environment variable holds a valid filter.
pub fn setup(var_name: &str) {
	// Create the env layer.
	let targets_layer = std::env::var(var_name)
		.ok()
		.and_then(|filter| filter.parse::<tracing_subscriber::filter::Targets>().ok());

	// Traces go to stderr so they never mix with the forwarded build output.
	if let Some(targets_layer) = targets_layer {
		let format_layer = tracing_subscriber::fmt::layer()
			.compact()
			.with_ansi(false)
			.with_span_events(tracing_subscriber::fmt::format::FmtSpan::NEW)
			.with_writer(std::io::stderr);
		let subscriber = tracing_subscriber::registry()
			.with(targets_layer)
			.with(format_layer);
		subscriber.init();
	}
}
