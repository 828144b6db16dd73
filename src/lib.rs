pub mod configuration;
pub mod dispatcher;
pub mod fixtures;
pub mod notifications;
pub mod payload;
pub mod telemetry;
pub mod traits;
