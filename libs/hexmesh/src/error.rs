//! # Mesh Errors
//!
//! Error types for mesh construction. Every failure aborts the current
//! construction call; whatever was created before it stays in the mesh.

use crate::element::ElementType;
use crate::node::{Axis, ElementId, NodeId};
use config::constants::ConfigError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while building a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Node group size or geometry does not fit the element type
    #[error("Malformed {element_type} element: {message}")]
    MalformedElement {
        element_type: ElementType,
        message: String,
    },

    /// Element type / axis combination without a construction rule
    #[error("Unsupported element type {element_type} for {operation}")]
    UnsupportedElementType {
        element_type: ElementType,
        operation: String,
    },

    /// Axis name outside x/y/z, or the same axis used for two roles
    #[error("Invalid axis specification: {message}")]
    InvalidAxis { message: String },

    /// Grid extent that cannot be tiled by transition cells
    #[error("Transition sizing: {count} nodes is not 3^{order} * k + 1")]
    TransitionSizing { count: usize, order: u32 },

    /// Node label not owned by this mesh
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// Element label not owned by this mesh
    #[error("Unknown element {0}")]
    UnknownElement(ElementId),

    /// Node or element set that was never created
    #[error("Unknown set '{0}'")]
    UnknownSet(String),

    /// Explicit label that is already taken
    #[error("Duplicate label {0}")]
    DuplicateLabel(u32),

    /// Lattice counts or spacing that cannot form a block
    #[error("Invalid dimensions: {message}")]
    InvalidDimensions { message: String },

    /// Explicit or automatic label with no successor left for the counter
    #[error("Label {0} leaves no room for further labels")]
    LabelOverflow(u32),

    /// Boundary plane whose shape does not match the face it is attached to
    #[error("Plane shape {found:?} does not match face {expected:?}")]
    PlaneShape {
        expected: [usize; 3],
        found: [usize; 3],
    },

    /// Grid slot that must hold a node before the operation runs
    #[error("Missing node at grid slot {slot:?} ({message})")]
    IncompleteWindow { slot: [usize; 3], message: String },

    /// Invalid mesh configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl MeshError {
    /// Creates a malformed element error.
    pub fn malformed(element_type: ElementType, message: impl Into<String>) -> Self {
        Self::MalformedElement {
            element_type,
            message: message.into(),
        }
    }

    /// Creates an unsupported element type error.
    pub fn unsupported(element_type: ElementType, operation: impl Into<String>) -> Self {
        Self::UnsupportedElementType {
            element_type,
            operation: operation.into(),
        }
    }

    /// Creates an invalid axis error.
    pub fn invalid_axis(message: impl Into<String>) -> Self {
        Self::InvalidAxis {
            message: message.into(),
        }
    }

    /// Creates an invalid dimensions error.
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            message: message.into(),
        }
    }

    /// Creates a missing grid node error.
    pub fn incomplete(slot: [usize; 3], message: impl Into<String>) -> Self {
        Self::IncompleteWindow {
            slot,
            message: message.into(),
        }
    }

    /// Axis used twice where two distinct axes are required.
    pub(crate) fn same_axis(axis: Axis) -> Self {
        Self::invalid_axis(format!("axis {axis} used for two roles"))
    }
}
