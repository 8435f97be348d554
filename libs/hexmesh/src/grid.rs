//! # Node Grids
//!
//! Dense `(i, j, k)`-indexed containers of node references. Structured
//! blocks return them, boundary planes are passed as them, and transition
//! cells work on 4×4×4 windows of them. A slot is either empty or holds a
//! node label; cells fill empty slots and reuse filled ones, which is how
//! neighbouring cells end up sharing boundary nodes.

use crate::error::{MeshError, MeshResult};
use crate::node::{Axis, NodeId};

/// Dense 3D grid of optional node references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGrid {
    dims: [usize; 3],
    slots: Vec<Option<NodeId>>,
}

impl NodeGrid {
    /// Creates an empty grid.
    pub fn new(dims: [usize; 3]) -> Self {
        Self {
            dims,
            slots: vec![None; dims[0] * dims[1] * dims[2]],
        }
    }

    /// Builds a line of nodes along `axis`.
    ///
    /// ```rust
    /// use hexmesh::{Axis, NodeGrid, NodeId};
    /// let line = NodeGrid::line(Axis::Y, &[NodeId(1), NodeId(2)]);
    /// assert_eq!(line.dims(), [1, 2, 1]);
    /// assert_eq!(line.get([0, 1, 0]), Some(NodeId(2)));
    /// ```
    pub fn line(axis: Axis, nodes: &[NodeId]) -> Self {
        let mut dims = [1; 3];
        dims[axis.index()] = nodes.len();
        let mut grid = Self::new(dims);
        for (n, &id) in nodes.iter().enumerate() {
            let mut idx = [0; 3];
            idx[axis.index()] = n;
            grid.set(idx, id);
        }
        grid
    }

    /// Grid extents.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Number of filled slots.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[inline]
    fn offset(&self, idx: [usize; 3]) -> usize {
        debug_assert!(self.contains(idx), "slot {idx:?} outside {:?}", self.dims);
        (idx[0] * self.dims[1] + idx[1]) * self.dims[2] + idx[2]
    }

    /// True when `idx` lies inside the grid.
    #[inline]
    pub fn contains(&self, idx: [usize; 3]) -> bool {
        idx[0] < self.dims[0] && idx[1] < self.dims[1] && idx[2] < self.dims[2]
    }

    /// Node at `idx`, if the slot is inside and filled.
    #[inline]
    pub fn get(&self, idx: [usize; 3]) -> Option<NodeId> {
        if self.contains(idx) {
            self.slots[self.offset(idx)]
        } else {
            None
        }
    }

    /// Node at `idx`, or an error naming the slot.
    pub fn require(&self, idx: [usize; 3]) -> MeshResult<NodeId> {
        self.get(idx)
            .ok_or_else(|| MeshError::incomplete(idx, format!("grid {:?}", self.dims)))
    }

    /// Stores `id` at `idx`.
    ///
    /// # Panics
    ///
    /// Panics when `idx` is outside the grid.
    pub fn set(&mut self, idx: [usize; 3], id: NodeId) {
        assert!(self.contains(idx), "slot {idx:?} outside {:?}", self.dims);
        let offset = self.offset(idx);
        self.slots[offset] = Some(id);
    }

    /// Iterates filled slots in `(i, j, k)` order.
    pub fn iter(&self) -> impl Iterator<Item = ([usize; 3], NodeId)> + '_ {
        let [_, ny, nz] = self.dims;
        self.slots.iter().enumerate().filter_map(move |(o, s)| {
            s.map(|id| ([o / (ny * nz), (o / nz) % ny, o % nz], id))
        })
    }

    /// Filled node labels in `(i, j, k)` order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.iter().map(|(_, id)| id).collect()
    }

    /// Copies the plane at `index` along `axis` into a grid whose extent
    /// along `axis` is 1.
    pub fn face(&self, axis: Axis, index: usize) -> NodeGrid {
        let mut dims = self.dims;
        dims[axis.index()] = 1;
        let mut plane = NodeGrid::new(dims);
        for i in 0..dims[0] {
            for j in 0..dims[1] {
                for k in 0..dims[2] {
                    let mut src = [i, j, k];
                    src[axis.index()] = index;
                    if let Some(id) = self.get(src) {
                        plane.set([i, j, k], id);
                    }
                }
            }
        }
        plane
    }

    /// Writes the filled slots of `plane` into the plane at `index` along
    /// `axis`.
    pub fn set_face(&mut self, axis: Axis, index: usize, plane: &NodeGrid) -> MeshResult<()> {
        let mut expected = self.dims;
        expected[axis.index()] = 1;
        if plane.dims != expected {
            return Err(MeshError::PlaneShape {
                expected,
                found: plane.dims,
            });
        }
        for (mut idx, id) in plane.iter() {
            idx[axis.index()] = index;
            self.set(idx, id);
        }
        Ok(())
    }

    /// Copies the sub-grid starting at `origin` with extents `dims`.
    pub fn window(&self, origin: [usize; 3], dims: [usize; 3]) -> NodeGrid {
        let mut out = NodeGrid::new(dims);
        for i in 0..dims[0] {
            for j in 0..dims[1] {
                for k in 0..dims[2] {
                    let src = [origin[0] + i, origin[1] + j, origin[2] + k];
                    if let Some(id) = self.get(src) {
                        out.set([i, j, k], id);
                    }
                }
            }
        }
        out
    }

    /// Takes every `step`-th slot along each axis (`step` per axis).
    ///
    /// ```rust
    /// use hexmesh::{Axis, NodeGrid, NodeId};
    /// let ids: Vec<NodeId> = (1..=7).map(NodeId).collect();
    /// let coarse = NodeGrid::line(Axis::X, &ids).sample([3, 1, 1]);
    /// assert_eq!(coarse.nodes(), vec![NodeId(1), NodeId(4), NodeId(7)]);
    /// ```
    pub fn sample(&self, step: [usize; 3]) -> NodeGrid {
        let dims = [
            (self.dims[0] + step[0] - 1) / step[0],
            (self.dims[1] + step[1] - 1) / step[1],
            (self.dims[2] + step[2] - 1) / step[2],
        ];
        let mut out = NodeGrid::new(dims);
        for i in 0..dims[0] {
            for j in 0..dims[1] {
                for k in 0..dims[2] {
                    if let Some(id) = self.get([i * step[0], j * step[1], k * step[2]]) {
                        out.set([i, j, k], id);
                    }
                }
            }
        }
        out
    }

    /// Returns the grid with its axes permuted so that source axis
    /// `order[n]` becomes axis `n`.
    pub fn permuted(&self, order: [Axis; 3]) -> NodeGrid {
        let dims = [
            self.dims[order[0].index()],
            self.dims[order[1].index()],
            self.dims[order[2].index()],
        ];
        let mut out = NodeGrid::new(dims);
        for (src, id) in self.iter() {
            out.set(
                [
                    src[order[0].index()],
                    src[order[1].index()],
                    src[order[2].index()],
                ],
                id,
            );
        }
        out
    }
}
