#[cfg(feature = "axum-impl")]
mod axum;
mod model;
mod ops;

pub use model::*;
pub use ops::*;
