//! # Geometric Transforms
//!
//! In-place warps of a node set about a rotation axis. Each transform works
//! in the plane spanned by the radial axis (`n1`) and the remaining third
//! axis (`n2`); the coordinate along the rotation axis is never touched.
//!
//! Transforms are not idempotent: running one twice on the same set warps
//! the already-warped coordinates again. A node listed twice in a set is
//! still moved once per call.

use std::collections::BTreeSet;
use std::f64::consts::FRAC_PI_2;

use config::constants::approx_equal;
use glam::DVec3;
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::node::{Axis, NodeId};

/// Rotation axis plus the in-plane radial axis of a warp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationFrame {
    rotation_axis: Axis,
    radial_axis: Axis,
    tangential_axis: Axis,
}

impl RotationFrame {
    /// Builds a frame; the two axes must differ.
    ///
    /// ```rust
    /// use hexmesh::{Axis, RotationFrame};
    /// let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
    /// assert_eq!(frame.tangential_axis(), Axis::Y);
    /// assert!(RotationFrame::new(Axis::Y, Axis::Y).is_err());
    /// ```
    pub fn new(rotation_axis: Axis, radial_axis: Axis) -> MeshResult<Self> {
        let tangential_axis = rotation_axis.third(radial_axis)?;
        Ok(Self {
            rotation_axis,
            radial_axis,
            tangential_axis,
        })
    }

    pub fn rotation_axis(&self) -> Axis {
        self.rotation_axis
    }

    pub fn radial_axis(&self) -> Axis {
        self.radial_axis
    }

    /// The axis that is neither the rotation nor the radial axis.
    pub fn tangential_axis(&self) -> Axis {
        self.tangential_axis
    }

    #[inline]
    fn split(&self, p: DVec3) -> (f64, f64) {
        (p[self.radial_axis.index()], p[self.tangential_axis.index()])
    }

    #[inline]
    fn join(&self, mut p: DVec3, n1: f64, n2: f64) -> DVec3 {
        p[self.radial_axis.index()] = n1;
        p[self.tangential_axis.index()] = n2;
        p
    }
}

/// Distinct nodes of a set with their current positions.
fn load_set(mesh: &Mesh, node_set: &str) -> MeshResult<Vec<(NodeId, DVec3)>> {
    let members = mesh.node_set(node_set)?;
    if members.is_empty() {
        return Err(MeshError::UnknownSet(node_set.to_string()));
    }
    let mut seen = BTreeSet::new();
    members
        .iter()
        .filter(|id| seen.insert(**id))
        .map(|&id| Ok((id, mesh.position(id)?)))
        .collect()
}

/// Target of the square-to-arc mapping for in-plane coordinates `(n1, n2)`.
///
/// The angle is the larger coordinate over the smaller one times half the
/// opening angle; points with a zero smaller coordinate map to angle 0.
fn arc_target(n1: f64, n2: f64, angle: f64) -> (f64, f64) {
    let (small, large) = if n1 > n2 { (n2, n1) } else { (n1, n2) };
    let r = n1.hypot(n2);
    let theta = if small == 0.0 {
        0.0
    } else {
        large / small * angle / 2.0
    };
    (r * theta.cos(), r * theta.sin())
}

/// Bends a square patch towards a cylinder with a radial blend.
///
/// Each node's full warp displacement is scaled by `(r / r_max)^f`, so the
/// region near the rotation axis stays close to Cartesian. `blend_exponent`
/// falls back to the mesh configuration when `None`.
///
/// A zero `angle` leaves the set untouched. The warp is not continuous
/// there: for any nonzero `angle`, however small, the arc target of a node
/// off the radial axis collapses towards `(r, 0)`, so a node at `(3, 4)` on
/// the outer radius lands near `(5, 0)`.
pub fn transform_square_to_cylinder(
    mesh: &mut Mesh,
    node_set: &str,
    frame: RotationFrame,
    angle: f64,
    blend_exponent: Option<f64>,
) -> MeshResult<()> {
    let nodes = load_set(mesh, node_set)?;
    if approx_equal(angle, 0.0) {
        return Ok(());
    }
    let f = blend_exponent.unwrap_or(mesh.config().blend_exponent);
    let r_max = nodes
        .iter()
        .map(|&(_, p)| {
            let (n1, n2) = frame.split(p);
            n1.hypot(n2)
        })
        .fold(0.0_f64, f64::max);
    if r_max <= mesh.config().tolerance {
        return Ok(());
    }

    for (id, p) in nodes.iter().copied() {
        let (n1, n2) = frame.split(p);
        let (t1, t2) = arc_target(n1, n2, angle);
        let k = (n1.hypot(n2) / r_max).powf(f);
        mesh.set_position(id, frame.join(p, n1 + (t1 - n1) * k, n2 + (t2 - n2) * k))?;
    }
    debug!(
        "Cylinder warp of '{}' ({} nodes, angle {}, f {})",
        node_set,
        nodes.len(),
        angle,
        f
    );
    Ok(())
}

/// Maps a square patch onto a circular sector with full displacement.
///
/// Like [`transform_square_to_cylinder`], a zero `angle` is skipped while
/// a tiny nonzero one flattens the patch onto the radial axis.
///
/// ```rust
/// use glam::DVec3;
/// use hexmesh::{transform_square_to_sector, Axis, Mesh, RotationFrame};
///
/// let mut mesh = Mesh::new();
/// let n = mesh.create_node(DVec3::new(3.0, 4.0, 0.0), Some("patch"), None).unwrap();
/// let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
/// transform_square_to_sector(&mut mesh, "patch", frame, std::f64::consts::PI).unwrap();
/// let p = mesh.position(n).unwrap();
/// assert!((p.length() - 5.0).abs() < 1e-12);
/// ```
pub fn transform_square_to_sector(
    mesh: &mut Mesh,
    node_set: &str,
    frame: RotationFrame,
    angle: f64,
) -> MeshResult<()> {
    let nodes = load_set(mesh, node_set)?;
    if approx_equal(angle, 0.0) {
        return Ok(());
    }
    for (id, p) in nodes.iter().copied() {
        let (n1, n2) = frame.split(p);
        let (t1, t2) = arc_target(n1, n2, angle);
        mesh.set_position(id, frame.join(p, t1, t2))?;
    }
    debug!("Sector warp of '{}' ({} nodes)", node_set, nodes.len());
    Ok(())
}

/// Sweeps a cross-section around the rotation axis.
///
/// A node at `(n1, n2)` moves to radius `|n1|` at angle
/// `n2 / l_max * angle`, where `l_max` is the largest `|n2|` in the set.
/// Nodes with `n2 == 0` go to a right angle.
pub fn sweep_block(
    mesh: &mut Mesh,
    node_set: &str,
    frame: RotationFrame,
    angle: f64,
) -> MeshResult<()> {
    let nodes = load_set(mesh, node_set)?;
    let l_max = nodes
        .iter()
        .map(|&(_, p)| frame.split(p).1.abs())
        .fold(0.0_f64, f64::max);

    for (id, p) in nodes.iter().copied() {
        let (n1, n2) = frame.split(p);
        let r = n1.abs();
        let theta = if n2 == 0.0 || l_max == 0.0 {
            FRAC_PI_2
        } else {
            n2 / l_max * angle
        };
        mesh.set_position(id, frame.join(p, r * theta.cos(), r * theta.sin()))?;
    }
    debug!(
        "Swept '{}' about {} ({} nodes, angle {})",
        node_set,
        frame.rotation_axis(),
        nodes.len(),
        angle
    );
    Ok(())
}

#[cfg(test)]
mod tests;
