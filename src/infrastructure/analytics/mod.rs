//! Analytics and error sinks

mod error_recorder;
mod view_counter;

pub use error_recorder::TracingErrorRecorder;
pub use view_counter::InMemoryViewCounter;
