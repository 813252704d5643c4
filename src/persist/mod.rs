//! Model artifact serialization.
//!
//! Payload structs mirror the runtime types but are shaped for compact
//! postcard storage; the enum tag versions the format so newer readers
//! can detect artifacts they do not understand.

mod payload;

pub use payload::{
    ArtifactError, ModelPayload, Payload, SchemaPayload, TargetPayload, TreePayload,
};

use std::path::Path;

use crate::model::TrainedModel;

/// Serialize a trained model to postcard bytes.
pub fn to_bytes(model: &TrainedModel) -> Result<Vec<u8>, ArtifactError> {
    let payload = Payload::V1(ModelPayload::from_model(model));
    Ok(postcard::to_allocvec(&payload)?)
}

/// Deserialize a trained model from postcard bytes.
pub fn from_bytes(bytes: &[u8]) -> Result<TrainedModel, ArtifactError> {
    let payload: Payload = postcard::from_bytes(bytes)?;
    match payload {
        Payload::V1(model) => model.into_model(),
    }
}

/// Write a model artifact to a file.
pub fn write_file(model: &TrainedModel, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
    let bytes = to_bytes(model)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Read a model artifact from a file.
pub fn read_file(path: impl AsRef<Path>) -> Result<TrainedModel, ArtifactError> {
    let bytes = std::fs::read(path)?;
    from_bytes(&bytes)
}
