pub mod classifier;
pub mod push;
