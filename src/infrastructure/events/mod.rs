//! Pipeline Events

mod publisher;

pub use publisher::{EventPublisher, PipelineEvent};
