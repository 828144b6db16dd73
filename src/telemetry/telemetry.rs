use std::collections::HashMap;
use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

/// Builds the bunyan JSON subscriber writing to `sink`. The binary passes stderr so
/// stdout only ever carries response bodies.
///
/// Every line carries the crate version, `RUST_LOG` overrides `env_filter`.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let default_fields = HashMap::from([(
        "version".to_string(),
        serde_json::Value::from(env!("CARGO_PKG_VERSION")),
    )]);
    let formatting_layer = BunyanFormattingLayer::with_default_fields(name, sink, default_fields);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs the subscriber globally and routes `log` records (reqwest, hyper) into it.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    if let Err(e) = LogTracer::init() {
        eprintln!("Failed to set logger: {}", e);
    }
    set_global_default(subscriber).expect("Failed to set subscriber");
}
