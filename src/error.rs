//! Error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A value could not make the round trip through the snapshot codec.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("snapshot could not be serialized")]
    Serialize(#[source] serde_json::Error),

    /// Typically a non-finite float that came back as `null`.
    #[error("snapshot did not survive the round trip")]
    Deserialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("invalid shortcut: {0}")]
    Shortcut(String),
}

/// A diagram mutation was rejected. The diagram and its history are unchanged.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("node already exists: {0}")]
    DuplicateNode(String),

    #[error("node not found: {0}")]
    UnknownNode(String),

    #[error("edge already exists: {0}")]
    DuplicateEdge(String),

    #[error("edge not found: {0}")]
    UnknownEdge(String),

    #[error("edge {edge} references missing node {node}")]
    DanglingEdge { edge: String, node: String },

    #[error(transparent)]
    Codec(#[from] CodecError),
}
