//! Categorical label encoding.
//!
//! Training fits one [`LabelEncoder`] per categorical column; the
//! resulting [`EncoderRegistry`] travels with the trained model so
//! inference re-encodes raw values with exactly the training-time codes.

mod encoder;
mod error;
mod registry;

pub use encoder::LabelEncoder;
pub use error::EncodeError;
pub use registry::EncoderRegistry;
