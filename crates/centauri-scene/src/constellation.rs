//! The home page constellation: fixed star positions and the edges between them.

use glam::DVec3;
use rustc_hash::FxHashMap;

/// A fixed star of the constellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstellationNode {
    /// Id referenced by [`EDGES`]; also de-phases the node's pulse.
    pub id: u32,
    /// Position before the group scale is applied.
    pub position: DVec3,
}

const fn node(id: u32, x: f64, y: f64, z: f64) -> ConstellationNode {
    ConstellationNode {
        id,
        position: DVec3::new(x, y, z),
    }
}

/// Every star, in draw order.
pub const NODES: [ConstellationNode; 14] = [
    node(1, -1.2, -0.9, -0.25),
    node(2, -0.8, -0.35, 0.3),
    node(5, -0.35, -0.05, -0.1),
    node(7, -0.55, 0.1, 0.35),
    node(11, -0.15, 0.55, -0.2),
    node(12, -0.15, 0.25, 0.25),
    node(3, -0.25, 0.85, 0.1),
    node(9, 0.2, 0.9, -0.3),
    node(4, 0.4, 0.25, 0.28),
    node(8, 0.65, 0.15, -0.22),
    node(13, 0.85, -0.25, 0.18),
    node(14, 0.48, 0.05, -0.26),
    node(6, -0.75, 0.35, 0.22),
    node(10, -1.05, 0.3, -0.18),
];

/// Connections between node ids.
pub const EDGES: [(u32, u32); 15] = [
    (1, 2),
    (2, 5),
    (5, 7),
    (7, 11),
    (11, 9),
    (7, 12),
    (12, 11),
    (7, 4),
    (4, 8),
    (8, 13),
    (4, 14),
    (14, 8),
    (6, 10),
    (6, 7),
    (3, 11),
];

/// Id → position lookup over [`NODES`], built once and never mutated.
#[derive(Debug, Clone)]
pub struct ConstellationTable {
    by_id: FxHashMap<u32, DVec3>,
}

impl ConstellationTable {
    /// Index the built-in constellation.
    #[must_use]
    pub fn new() -> Self {
        let by_id = NODES.iter().map(|n| (n.id, n.position)).collect();
        Self { by_id }
    }

    /// All nodes in draw order.
    #[must_use]
    pub fn nodes(&self) -> &'static [ConstellationNode] {
        &NODES
    }

    /// Position of a node, if the id exists.
    #[must_use]
    pub fn position(&self, id: u32) -> Option<DVec3> {
        self.by_id.get(&id).copied()
    }

    /// Endpoints of every edge whose ids both resolve.
    pub fn edge_segments(&self) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
        EDGES
            .iter()
            .filter_map(|&(a, b)| Some((self.position(a)?, self.position(b)?)))
    }

    /// Number of indexed nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the table holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl Default for ConstellationTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let table = ConstellationTable::new();
        assert_eq!(table.len(), NODES.len());
    }

    #[test]
    fn test_every_edge_resolves() {
        let table = ConstellationTable::new();
        assert_eq!(table.edge_segments().count(), EDGES.len());
    }

    #[test]
    fn test_lookup_by_id() {
        let table = ConstellationTable::new();
        let p = table.position(9).unwrap();
        assert!((p - DVec3::new(0.2, 0.9, -0.3)).length() < 1e-12);
        assert!(table.position(99).is_none());
    }

    #[test]
    fn test_constellation_fits_camera_orbit() {
        // Every node must stay well inside the default camera distance.
        let table = ConstellationTable::new();
        for n in table.nodes() {
            assert!(n.position.length() < 2.0, "node {} too far out", n.id);
        }
    }
}
