//! # Export View
//!
//! Read-only, serialisable snapshot of a mesh for external writers. No file
//! format is produced here; writers consume [`MeshExport`] directly or
//! through serde.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::ElementType;
use crate::mesh::Mesh;
use crate::node::{ElementId, NodeId};

/// One node: label and coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub label: NodeId,
    pub coords: [f64; 3],
}

/// One element inside a type block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportElement {
    pub label: ElementId,
    pub nodes: Vec<NodeId>,
}

/// All elements of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBlock {
    pub element_type: ElementType,
    pub elements: Vec<ExportElement>,
}

/// Snapshot of a mesh in label order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshExport {
    pub nodes: Vec<ExportNode>,
    pub element_blocks: Vec<ElementBlock>,
    pub node_sets: BTreeMap<String, Vec<NodeId>>,
    pub element_sets: BTreeMap<String, Vec<ElementId>>,
}

impl Mesh {
    /// Builds the export view.
    pub fn export(&self) -> MeshExport {
        let nodes = self
            .nodes()
            .map(|n| ExportNode {
                label: n.label(),
                coords: n.position.to_array(),
            })
            .collect();

        let element_blocks = self
            .elements_by_type()
            .iter()
            .map(|(&element_type, ids)| ElementBlock {
                element_type,
                elements: ids
                    .iter()
                    .filter_map(|&id| self.element(id).ok())
                    .map(|e| ExportElement {
                        label: e.label(),
                        nodes: e.nodes().to_vec(),
                    })
                    .collect(),
            })
            .collect();

        MeshExport {
            nodes,
            element_blocks,
            node_sets: self.node_sets.clone(),
            element_sets: self.element_sets.clone(),
        }
    }
}
