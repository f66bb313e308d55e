#[macro_use]
extern crate log;

pub mod ratelimiter;

#[cfg(feature = "axum")]
pub mod axum;
