#[allow(clippy::module_inception)]
mod payload;

pub use payload::*;
