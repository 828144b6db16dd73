#[allow(clippy::module_inception)]
mod fixtures;

pub use fixtures::*;
