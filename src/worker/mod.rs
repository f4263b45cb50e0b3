//! Producer and consumer workers for the block handoff protocol

pub mod consumer;
pub mod producer;

pub use consumer::Consumer;
pub use producer::Producer;
