mod discovery;
mod types;

pub use discovery::{compile_exclusions, discover_workspace};
pub use types::{DirectoryId, DiscoveredDirectory, DiscoveryError, DiscoveryOptions, Workspace};
