//! # Elements
//!
//! The fixed catalogue of element kinds and the corner-sorting rule that
//! turns loosely ordered node groups into correctly wound elements.
//!
//! ## Corner Ordering
//!
//! Node groups arrive as one or two planar groups of corners (two for
//! hexahedra and wedges, one for quads). Each plane is sorted by polar
//! angle about its centroid in a frame whose normal points from the first
//! plane to the second (quads use +Z). The second plane is rotated to the
//! alignment whose corners twist least, summed over all corners, against
//! the first plane's. The resulting
//! first face is counter-clockwise seen from the second face.

use std::cmp::Ordering;
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::node::{ElementId, NodeId};

/// Topological shape of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementShape {
    /// Eight-node hexahedron
    Hex8,
    /// Six-node wedge
    Wedge6,
    /// Four-node quadrilateral
    Quad4,
}

impl ElementShape {
    /// Number of corner planes the node list is split into.
    #[inline]
    pub fn plane_count(self) -> usize {
        match self {
            ElementShape::Hex8 | ElementShape::Wedge6 => 2,
            ElementShape::Quad4 => 1,
        }
    }

    /// Number of corners in each plane.
    #[inline]
    pub fn corners_per_plane(self) -> usize {
        match self {
            ElementShape::Hex8 | ElementShape::Quad4 => 4,
            ElementShape::Wedge6 => 3,
        }
    }

    /// Total node count.
    #[inline]
    pub fn node_count(self) -> usize {
        self.plane_count() * self.corners_per_plane()
    }
}

/// Supported element kinds, named by their solver keyword.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum ElementType {
    /// 3D stress hexahedron, full integration
    C3D8,
    /// 3D stress hexahedron, reduced integration
    #[default]
    C3D8R,
    /// 3D diffusion hexahedron
    DC3D8,
    /// 3D stress wedge
    C3D6,
    /// 3D diffusion wedge
    DC3D6,
    /// Axisymmetric stress quad, full integration
    CAX4,
    /// Axisymmetric stress quad, reduced integration
    CAX4R,
    /// Axisymmetric diffusion quad
    DCAX4,
}

impl ElementType {
    /// Every supported type.
    pub const ALL: [ElementType; 8] = [
        ElementType::C3D8,
        ElementType::C3D8R,
        ElementType::DC3D8,
        ElementType::C3D6,
        ElementType::DC3D6,
        ElementType::CAX4,
        ElementType::CAX4R,
        ElementType::DCAX4,
    ];

    /// Shape of the element.
    pub fn shape(self) -> ElementShape {
        match self {
            ElementType::C3D8 | ElementType::C3D8R | ElementType::DC3D8 => ElementShape::Hex8,
            ElementType::C3D6 | ElementType::DC3D6 => ElementShape::Wedge6,
            ElementType::CAX4 | ElementType::CAX4R | ElementType::DCAX4 => ElementShape::Quad4,
        }
    }

    /// Expected node count.
    #[inline]
    pub fn node_count(self) -> usize {
        self.shape().node_count()
    }

    /// True for axisymmetric (2D) types.
    #[inline]
    pub fn is_axisymmetric(self) -> bool {
        self.shape() == ElementShape::Quad4
    }

    /// Solver keyword of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::C3D8 => "C3D8",
            ElementType::C3D8R => "C3D8R",
            ElementType::DC3D8 => "DC3D8",
            ElementType::C3D6 => "C3D6",
            ElementType::DC3D6 => "DC3D6",
            ElementType::CAX4 => "CAX4",
            ElementType::CAX4R => "CAX4R",
            ElementType::DCAX4 => "DCAX4",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for element keywords outside the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element type '{0}'")]
pub struct UnknownElementType(pub String);

impl FromStr for ElementType {
    type Err = UnknownElementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownElementType(s.to_string()))
    }
}

/// An element: label, type and ordered corner nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    label: ElementId,
    pub(crate) element_type: ElementType,
    nodes: Vec<NodeId>,
}

impl Element {
    pub(crate) fn new(label: ElementId, element_type: ElementType, nodes: Vec<NodeId>) -> Self {
        Self {
            label,
            element_type,
            nodes,
        }
    }

    /// Element label.
    #[inline]
    pub fn label(&self) -> ElementId {
        self.label
    }

    /// Current type tag.
    #[inline]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Corner nodes in solver order.
    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

// =============================================================================
// CORNER SORTING
// =============================================================================

/// Computes the corner permutation for `points`, given in input order.
///
/// Returns indices into `points` in solver order.
pub(crate) fn corner_order(
    element_type: ElementType,
    points: &[DVec3],
    tolerance: f64,
) -> MeshResult<Vec<usize>> {
    let shape = element_type.shape();
    let per_plane = shape.corners_per_plane();
    if points.len() != shape.node_count() {
        return Err(MeshError::malformed(
            element_type,
            format!(
                "expected {} nodes ({} plane(s) of {}), got {}",
                shape.node_count(),
                shape.plane_count(),
                per_plane,
                points.len()
            ),
        ));
    }

    let planes: Vec<Vec<usize>> = (0..shape.plane_count())
        .map(|p| (p * per_plane..(p + 1) * per_plane).collect())
        .collect();
    let centroids: Vec<DVec3> = planes
        .iter()
        .map(|plane| plane.iter().map(|&i| points[i]).sum::<DVec3>() / per_plane as f64)
        .collect();

    let normal = if planes.len() == 2 {
        let axis = centroids[1] - centroids[0];
        if axis.length() <= tolerance {
            return Err(MeshError::malformed(
                element_type,
                "corner planes share a centroid",
            ));
        }
        axis.normalize()
    } else {
        DVec3::Z
    };
    let (u, _) = normal.any_orthonormal_pair();
    let v = normal.cross(u);

    let angle_of = |i: usize, centroid: DVec3| {
        let d = points[i] - centroid;
        d.dot(v).atan2(d.dot(u))
    };

    let mut order = Vec::with_capacity(points.len());
    let mut first: Vec<f64> = Vec::new();
    for (p, plane) in planes.iter().enumerate() {
        let mut sorted: Vec<(usize, f64)> = plane
            .iter()
            .map(|&i| (i, angle_of(i, centroids[p])))
            .collect();
        sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        if p == 0 {
            first = sorted.iter().map(|&(_, a)| a).collect();
        } else {
            // Rotation with the least summed twist against the first plane
            let twist = |k: usize| -> f64 {
                first
                    .iter()
                    .enumerate()
                    .map(|(n, &a)| angular_distance(sorted[(k + n) % per_plane].1, a))
                    .sum()
            };
            let start = (0..per_plane)
                .map(|k| (k, twist(k)))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
                .map(|(k, _)| k)
                .unwrap_or(0);
            sorted.rotate_left(start);
        }
        order.extend(sorted.into_iter().map(|(i, _)| i));
    }
    Ok(order)
}

fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}
