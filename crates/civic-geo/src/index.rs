use civic_core::models::GeoPoint;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// Input point tagged with its position in the caller's slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint {
    /// Position in the input sequence
    pub index: usize,

    /// `[lat, lng]` in degrees
    pub coords: [f64; 2],
}

impl IndexedPoint {
    pub fn new(index: usize, point: &GeoPoint) -> Self {
        Self { index, coords: point.to_array() }
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

impl PointDistance for IndexedPoint {
    /// Squared Euclidean distance in degree space
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.coords[0] - point[0];
        let dlng = self.coords[1] - point[1];
        dlat * dlat + dlng * dlng
    }
}

/// R-tree over complaint coordinates for radius queries
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
}

impl PointIndex {
    /// Bulk-load an index; each entry keeps its slice position
    pub fn from_points(points: &[GeoPoint]) -> Self {
        let indexed: Vec<IndexedPoint> =
            points.iter().enumerate().map(|(i, p)| IndexedPoint::new(i, p)).collect();

        Self { tree: RTree::bulk_load(indexed) }
    }

    /// Positions of all points within `radius` of `center` (inclusive), ascending
    pub fn within_radius(&self, center: &GeoPoint, radius: f64) -> Vec<usize> {
        let mut hits: Vec<usize> = self
            .tree
            .locate_within_distance(center.to_array(), radius * radius)
            .map(|p| p.index)
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Get the total number of points in the index
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
