#[allow(clippy::module_inception)]
mod notifications;

pub use notifications::*;
