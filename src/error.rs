//! Crate-level error types.

use std::fmt;

use crate::scene::NodeId;

/// Errors produced by the view-controls crate.
#[derive(Debug)]
pub enum ViewError {
    /// A node id that does not (or no longer) exist in the scene graph.
    UnknownNode(NodeId),
    /// Reparenting would make a node its own ancestor.
    InvalidParent {
        /// Node being moved.
        node: NodeId,
        /// Requested new parent.
        parent: NodeId,
    },
    /// The scene root cannot be removed or reparented.
    RootRemoval,
    /// A triangle index points past the end of the vertex list.
    InvalidMesh {
        /// Offending index.
        index: u32,
        /// Number of vertices available.
        vertex_count: usize,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown scene node {id}"),
            Self::InvalidParent { node, parent } => {
                write!(f, "cannot parent node {node} under its descendant {parent}")
            }
            Self::RootRemoval => {
                write!(f, "the scene root cannot be removed or reparented")
            }
            Self::InvalidMesh {
                index,
                vertex_count,
            } => write!(
                f,
                "triangle index {index} out of range for {vertex_count} vertices"
            ),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
