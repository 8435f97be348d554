//! # Nodes and Axes
//!
//! Labels, node records and the coordinate-axis vocabulary shared by the
//! block builder, the transforms and the transition cells.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Mesh-scoped node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Mesh-scoped element label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mesh node: immutable label, mutable position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    label: NodeId,
    /// Coordinates; rewritten in place by transforms
    pub position: DVec3,
}

impl Node {
    pub(crate) fn new(label: NodeId, position: DVec3) -> Self {
        Self { label, position }
    }

    /// Returns the node label.
    #[inline]
    pub fn label(&self) -> NodeId {
        self.label
    }

    /// Returns the coordinate along `axis`.
    #[inline]
    pub fn coord(&self, axis: Axis) -> f64 {
        self.position[axis.index()]
    }
}

// =============================================================================
// AXES
// =============================================================================

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of the axis (x = 0, y = 1, z = 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the axis.
    #[inline]
    pub fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }

    /// The two remaining axes in index order.
    ///
    /// ```rust
    /// use hexmesh::Axis;
    /// assert_eq!(Axis::Y.others(), (Axis::X, Axis::Z));
    /// ```
    pub fn others(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// The axis that is neither `self` nor `other`.
    pub fn third(self, other: Axis) -> Result<Axis, MeshError> {
        if self == other {
            return Err(MeshError::same_axis(self));
        }
        Ok(Axis::from_index(3 - self.index() - other.index()))
    }

    fn from_index(index: usize) -> Axis {
        Axis::ALL[index]
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            other => Err(MeshError::invalid_axis(format!("unknown axis '{other}'"))),
        }
    }
}

/// Sign of a growth direction along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Positive,
    Negative,
}

impl Direction {
    /// `1.0` or `-1.0`.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

/// Permutation of coordinate components used when copying element sets.
///
/// The name lists which source component lands in x, y and z: `Yzx` maps
/// `(x, y, z)` to `(y, z, x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisOrder {
    #[default]
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl AxisOrder {
    /// Applies the permutation to a position.
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use hexmesh::AxisOrder;
    /// let p = AxisOrder::Zxy.apply(DVec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(p, DVec3::new(3.0, 1.0, 2.0));
    /// ```
    pub fn apply(self, p: DVec3) -> DVec3 {
        match self {
            AxisOrder::Xyz => p,
            AxisOrder::Xzy => DVec3::new(p.x, p.z, p.y),
            AxisOrder::Yxz => DVec3::new(p.y, p.x, p.z),
            AxisOrder::Yzx => DVec3::new(p.y, p.z, p.x),
            AxisOrder::Zxy => DVec3::new(p.z, p.x, p.y),
            AxisOrder::Zyx => DVec3::new(p.z, p.y, p.x),
        }
    }
}

impl FromStr for AxisOrder {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xyz" => Ok(AxisOrder::Xyz),
            "xzy" => Ok(AxisOrder::Xzy),
            "yxz" => Ok(AxisOrder::Yxz),
            "yzx" => Ok(AxisOrder::Yzx),
            "zxy" => Ok(AxisOrder::Zxy),
            "zyx" => Ok(AxisOrder::Zyx),
            other => Err(MeshError::invalid_axis(format!(
                "'{other}' is not a permutation of xyz"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_parse() {
        assert_eq!("x".parse::<Axis>().unwrap(), Axis::X);
        assert_eq!("Z".parse::<Axis>().unwrap(), Axis::Z);
        assert!(matches!("w".parse::<Axis>(), Err(MeshError::InvalidAxis { .. })));
    }

    #[test]
    fn test_axis_third() {
        assert_eq!(Axis::X.third(Axis::Y).unwrap(), Axis::Z);
        assert_eq!(Axis::Z.third(Axis::X).unwrap(), Axis::Y);
        assert!(Axis::Y.third(Axis::Y).is_err());
    }

    #[test]
    fn test_axis_order_permutations() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(AxisOrder::Xyz.apply(p), p);
        assert_eq!(AxisOrder::Yzx.apply(p), DVec3::new(2.0, 3.0, 1.0));
        assert_eq!(AxisOrder::Zyx.apply(p), DVec3::new(3.0, 2.0, 1.0));
        assert_eq!("xzy".parse::<AxisOrder>().unwrap(), AxisOrder::Xzy);
        assert!("xxy".parse::<AxisOrder>().is_err());
    }
}
