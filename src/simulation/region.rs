//! Axis-aligned squares used as quadtree node extents.
//!
//! Child order is fixed as NW, NE, SW, SE. Points on the vertical midline go
//! east (`x >= cx`), points on the horizontal midline go north (`y >= cy`).
//! `split` and `child_index` share the same center so a body bucketed into a
//! child is always inside that child's square.

use crate::simulation::states::NVec2;

pub const NW: usize = 0;
pub const NE: usize = 1;
pub const SW: usize = 2;
pub const SE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub origin: NVec2, // lower-left corner
    pub side: f64,
}

impl Region {
    pub fn new(origin: NVec2, side: f64) -> Self {
        Self { origin, side }
    }

    pub fn center(&self) -> NVec2 {
        let half = 0.5 * self.side;
        NVec2::new(self.origin.x + half, self.origin.y + half)
    }

    /// Half-open membership: `[x0, x0 + side) x [y0, y0 + side)`
    pub fn contains(&self, p: &NVec2) -> bool {
        p.x >= self.origin.x
            && p.x < self.origin.x + self.side
            && p.y >= self.origin.y
            && p.y < self.origin.y + self.side
    }

    /// Four equal sub-squares in NW, NE, SW, SE order
    pub fn split(&self) -> [Region; 4] {
        let half = 0.5 * self.side;
        let c = self.center();
        let (x0, y0) = (self.origin.x, self.origin.y);
        [
            Region::new(NVec2::new(x0, c.y), half),  // nw
            Region::new(NVec2::new(c.x, c.y), half), // ne
            Region::new(NVec2::new(x0, y0), half),   // sw
            Region::new(NVec2::new(c.x, y0), half),  // se
        ]
    }

    /// Index of the sub-square of `split()` holding `p`
    pub fn child_index(&self, p: &NVec2) -> usize {
        let c = self.center();
        match (p.y >= c.y, p.x >= c.x) {
            (true, false) => NW,
            (true, true) => NE,
            (false, false) => SW,
            (false, true) => SE,
        }
    }
}
