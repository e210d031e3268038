use binary_mesh::{Mesh, Serializable};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors while converting a [Mesh] to JSON.
#[derive(Error, Debug)]
pub enum JsonError {
    /// JSON numbers cannot represent NaN or infinity.
    #[error("Property {name:?} contains the non-finite value {value} at index {index}.")]
    NonFiniteValue {
        name: String,
        index: usize,
        value: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A float type for [Mesh] property values that can be stored in JSON.
pub trait JsonFloat: Serializable + Serialize + DeserializeOwned + std::fmt::Display + Copy {
    /// Returns `true` if the value has no JSON representation.
    /// serde_json writes these values as `null`, which can't be read back.
    fn is_lossy(self) -> bool;
}

impl JsonFloat for f32 {
    fn is_lossy(self) -> bool {
        !self.is_finite()
    }
}

impl JsonFloat for f64 {
    fn is_lossy(self) -> bool {
        !self.is_finite()
    }
}

impl JsonFloat for half::f16 {
    // Half precision values are stored as their raw bits.
    fn is_lossy(self) -> bool {
        false
    }
}

/// Converts `mesh` to pretty printed JSON.
/// Fails instead of writing `null` for values that wouldn't survive converting back to binary.
pub fn mesh_to_json<F: JsonFloat>(mesh: &Mesh<F>) -> Result<String, JsonError> {
    for (name, property) in &mesh.properties {
        if let Some((index, value)) = property
            .values
            .iter()
            .enumerate()
            .find(|(_, v)| v.is_lossy())
        {
            return Err(JsonError::NonFiniteValue {
                name: name.clone(),
                index,
                value: value.to_string(),
            });
        }
    }

    serde_json::to_string_pretty(mesh).map_err(Into::into)
}
