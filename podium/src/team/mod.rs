//! Teams and the registry that derives them from raw participant records.

pub mod models;
pub mod registry;

pub use models::{Team, TeamId};
pub use registry::{Normalized, PLACEHOLDER_PREFIX, TeamRegistry};
