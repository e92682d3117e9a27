//! Upstream collaborators the gateway depends on

mod catalog;
mod metadata;
mod sinks;

pub use catalog::VideoCatalogSource;
pub use metadata::MetadataSource;
pub use sinks::{ErrorRecorder, ViewRecorder};

#[cfg(test)]
pub use catalog::MockVideoCatalogSource;
#[cfg(test)]
pub use metadata::MockMetadataSource;
