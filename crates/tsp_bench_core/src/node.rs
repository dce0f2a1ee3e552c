/// Planar input point. `id` is the zero-based parse position and is
/// what tours, candidate lists, and heap entries refer to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub id: usize,
}

impl Point {
    pub fn new(x: f64, y: f64, id: usize) -> Self {
        Self { x, y, id }
    }

    /// Numbers a coordinate list in parse order.
    pub fn from_coords(coords: &[(f64, f64)]) -> Vec<Self> {
        coords
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Self::new(x, y, id))
            .collect()
    }

    pub fn dist(self, rhs: &Self) -> f64 {
        let dx = self.x - rhs.x;
        let dy = self.y - rhs.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
