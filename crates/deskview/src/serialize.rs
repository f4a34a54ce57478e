//! Structured serialization of list views.

use serde::Serialize;
use thiserror::Error;

use crate::output::OutputMode;

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0:?} is not a structured output mode")]
    NotStructured(OutputMode),
}

/// Serializes data in the format named by `mode`.
pub fn serialize_structured<T: Serialize>(
    data: &T,
    mode: OutputMode,
) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Json => to_json(data),
        OutputMode::Yaml => to_yaml(data),
        other => Err(SerializeError::NotStructured(other)),
    }
}

pub fn to_json<T: Serialize>(data: &T) -> Result<String, SerializeError> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn to_yaml<T: Serialize>(data: &T) -> Result<String, SerializeError> {
    Ok(serde_yaml::to_string(data)?)
}
