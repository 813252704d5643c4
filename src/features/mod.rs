//! Feature schemas and projection into classifier feature space.

mod projector;
mod schema;

pub use projector::{FeatureProjector, ProjectError};
pub use schema::{FeatureKind, FeatureMeta, FeatureSchema};
