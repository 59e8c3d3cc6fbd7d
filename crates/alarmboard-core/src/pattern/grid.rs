use serde::{Deserialize, Serialize};

use super::sequence::{PatternSequence, NODE_COUNT};

/// Point in the pattern pad's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Geometry of the 3x3 pad: nodes sit at the centres of square cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternGrid {
    pub cell_size: f32,
    pub hit_radius: f32,
}

impl Default for PatternGrid {
    fn default() -> Self {
        Self {
            cell_size: 80.0,
            hit_radius: 28.0,
        }
    }
}

impl PatternGrid {
    pub fn node_center(&self, node: u8) -> Point {
        let col = f32::from(node % 3);
        let row = f32::from(node / 3);
        Point::new((col + 0.5) * self.cell_size, (row + 0.5) * self.cell_size)
    }

    /// Node whose hit circle contains `p`, if any.
    pub fn node_at(&self, p: Point) -> Option<u8> {
        let r2 = self.hit_radius * self.hit_radius;
        (0..NODE_COUNT).find(|&node| {
            let c = self.node_center(node);
            let (dx, dy) = (p.x - c.x, p.y - c.y);
            dx * dx + dy * dy <= r2
        })
    }
}

/// One drag over the pad. Nodes are appended as the pointer enters them;
/// revisiting a node adds nothing.
#[derive(Debug, Clone, Default)]
pub struct PatternCapture {
    grid: PatternGrid,
    path: PatternSequence,
    active: bool,
}

impl PatternCapture {
    pub fn new(grid: PatternGrid) -> Self {
        Self {
            grid,
            path: PatternSequence::default(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn path(&self) -> &PatternSequence {
        &self.path
    }

    /// Pointer down. Clears any previous path.
    pub fn begin(&mut self, p: Point) -> Option<u8> {
        self.path = PatternSequence::default();
        self.active = true;
        self.track(p)
    }

    /// Pointer move. Returns the node appended by this move, if any.
    pub fn track(&mut self, p: Point) -> Option<u8> {
        if !self.active {
            return None;
        }
        let node = self.grid.node_at(p)?;
        self.path.push_unvisited(node).then_some(node)
    }

    /// Pointer up. Returns the captured path and resets for the next drag.
    pub fn end(&mut self) -> PatternSequence {
        self.active = false;
        std::mem::take(&mut self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_at_hits_centres_and_misses_gaps() {
        let grid = PatternGrid::default();
        for node in 0..NODE_COUNT {
            assert_eq!(grid.node_at(grid.node_center(node)), Some(node));
        }
        // halfway between node 0 and node 1
        assert_eq!(grid.node_at(Point::new(80.0, 40.0)), None);
    }

    #[test]
    fn drag_records_distinct_nodes_in_order() {
        let grid = PatternGrid::default();
        let mut capture = PatternCapture::new(grid);
        capture.begin(grid.node_center(0));
        capture.track(Point::new(80.0, 40.0));
        capture.track(grid.node_center(4));
        capture.track(grid.node_center(0));
        capture.track(grid.node_center(8));
        assert_eq!(capture.end().nodes(), &[0, 4, 8]);
        assert!(!capture.is_active());
        assert!(capture.path().is_empty());
    }

    #[test]
    fn moves_without_begin_are_ignored() {
        let grid = PatternGrid::default();
        let mut capture = PatternCapture::new(grid);
        assert_eq!(capture.track(grid.node_center(2)), None);
        assert!(capture.end().is_empty());
    }
}
