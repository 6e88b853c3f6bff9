//! Error types for splinter.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while validating or partitioning a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A sub-mesh index buffer does not describe whole triangles.
    #[error("submesh {submesh} has {len} indices, which is not a multiple of 3")]
    InvalidInput {
        /// The sub-mesh index.
        submesh: usize,
        /// Length of the offending index buffer.
        len: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error(
        "submesh {submesh} triangle {triangle} references vertex {index}, \
         but the mesh has {num_vertices} vertices"
    )]
    IndexOutOfRange {
        /// The sub-mesh index.
        submesh: usize,
        /// The triangle index within the sub-mesh.
        triangle: usize,
        /// The invalid vertex index.
        index: usize,
        /// Number of vertices in the mesh.
        num_vertices: usize,
    },

    /// A triangle repeats a vertex index.
    #[error("submesh {submesh} triangle {triangle} is degenerate (has duplicate vertices)")]
    DegenerateTriangle {
        /// The sub-mesh index.
        submesh: usize,
        /// The triangle index within the sub-mesh.
        triangle: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MeshError::InvalidInput { submesh: 1, len: 7 };
        assert_eq!(
            err.to_string(),
            "submesh 1 has 7 indices, which is not a multiple of 3"
        );

        let err = MeshError::invalid_param("weld tolerance", -1.0, "must be non-negative");
        assert_eq!(
            err.to_string(),
            "invalid parameter: weld tolerance = -1 (must be non-negative)"
        );
    }
}
