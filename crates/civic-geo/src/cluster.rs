//! Density-based clustering over degree-space coordinates.
//!
//! Labelling follows the usual DBSCAN conventions: a point's neighbourhood
//! includes the point itself, the radius is inclusive, clusters are seeded
//! from core points in input order and numbered from zero in that order, and
//! a border point belongs to the first cluster that reaches it.

use civic_core::models::GeoPoint;
use thiserror::Error;

use crate::index::PointIndex;

/// Result type for clustering
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Failures inside one clustering run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("Non-finite coordinate at index {index}: ({lat}, {lng})")]
    NonFiniteCoordinate { index: usize, lat: f64, lng: f64 },

    #[error("Invalid clustering parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Numeric overflow while summarising cluster {label}")]
    NumericOverflow { label: usize },
}

/// Label assigned to one input point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointLabel {
    Noise,
    Cluster(usize),
}

impl PointLabel {
    pub fn is_noise(&self) -> bool {
        matches!(self, PointLabel::Noise)
    }

    pub fn cluster(&self) -> Option<usize> {
        match self {
            PointLabel::Noise => None,
            PointLabel::Cluster(label) => Some(*label),
        }
    }
}

/// Per-point labels from one run, aligned with the input slice
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAssignment {
    labels: Vec<PointLabel>,
    cluster_count: usize,
}

impl ClusterAssignment {
    pub fn labels(&self) -> &[PointLabel] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<PointLabel> {
        self.labels.get(index).copied()
    }

    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_noise()).count()
    }

    /// Input positions carrying `label`, in input order
    pub fn members(&self, label: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == PointLabel::Cluster(label))
            .map(|(i, _)| i)
            .collect()
    }

    /// Members of every cluster, indexed by label
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.cluster_count];
        for (i, label) in self.labels.iter().enumerate() {
            if let PointLabel::Cluster(c) = label {
                groups[*c].push(i);
            }
        }
        groups
    }
}

/// DBSCAN with a fixed radius (degrees) and core threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dbscan {
    radius: f64,
    min_points: usize,
}

impl Dbscan {
    pub fn new(radius: f64, min_points: usize) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ClusterError::InvalidParameter {
                name: "radius".to_string(),
                reason: format!("must be a finite non-negative number, got {}", radius),
            });
        }
        if min_points == 0 {
            return Err(ClusterError::InvalidParameter {
                name: "min_points".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self { radius, min_points })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// Label every point. Non-finite coordinates abort the run.
    pub fn fit(&self, points: &[GeoPoint]) -> Result<ClusterAssignment> {
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(ClusterError::NonFiniteCoordinate { index, lat: p.lat, lng: p.lng });
        }

        let index = PointIndex::from_points(points);
        let neighbourhoods: Vec<Vec<usize>> =
            points.iter().map(|p| index.within_radius(p, self.radius)).collect();
        let is_core: Vec<bool> =
            neighbourhoods.iter().map(|n| n.len() >= self.min_points).collect();

        let mut labels = vec![PointLabel::Noise; points.len()];
        let mut next_label = 0;
        let mut stack = Vec::new();

        for seed in 0..points.len() {
            if !labels[seed].is_noise() || !is_core[seed] {
                continue;
            }

            labels[seed] = PointLabel::Cluster(next_label);
            stack.push(seed);

            while let Some(current) = stack.pop() {
                if !is_core[current] {
                    continue;
                }
                for &neighbour in &neighbourhoods[current] {
                    if labels[neighbour].is_noise() {
                        labels[neighbour] = PointLabel::Cluster(next_label);
                        stack.push(neighbour);
                    }
                }
            }

            next_label += 1;
        }

        tracing::debug!(
            points = points.len(),
            clusters = next_label,
            radius = self.radius,
            min_points = self.min_points,
            "DBSCAN labelling complete"
        );

        Ok(ClusterAssignment { labels, cluster_count: next_label })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(origin: GeoPoint, n: usize, side: f64) -> Vec<GeoPoint> {
        (0..n)
            .map(|i| {
                let t = i as f64 / n as f64;
                GeoPoint::new(origin.lat + side * t, origin.lng + side * (1.0 - t))
            })
            .collect()
    }

    #[test]
    fn test_dense_group_is_one_cluster() {
        let points = square(GeoPoint::new(28.6, 77.2), 6, 0.001);
        let assignment = Dbscan::new(0.003, 2).unwrap().fit(&points).unwrap();

        assert_eq!(assignment.cluster_count(), 1);
        assert_eq!(assignment.noise_count(), 0);
        assert_eq!(assignment.members(0), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sparse_points_are_noise() {
        let points =
            [GeoPoint::new(10.0, 10.0), GeoPoint::new(12.0, 10.0), GeoPoint::new(10.0, 12.0)];
        let assignment = Dbscan::new(0.003, 2).unwrap().fit(&points).unwrap();

        assert_eq!(assignment.cluster_count(), 0);
        assert!(assignment.labels().iter().all(PointLabel::is_noise));
    }

    #[test]
    fn test_labels_follow_input_order() {
        let points = [
            GeoPoint::new(5.0, 5.0),
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(5.0, 5.001),
            GeoPoint::new(0.0, 0.001),
        ];
        let assignment = Dbscan::new(0.003, 2).unwrap().fit(&points).unwrap();

        assert_eq!(assignment.label(0), Some(PointLabel::Cluster(0)));
        assert_eq!(assignment.label(1), Some(PointLabel::Cluster(1)));
        assert_eq!(assignment.clusters(), vec![vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn test_border_point_joins_first_cluster() {
        // Two dense groups with a non-core point in reach of both
        let points = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.0003),
            GeoPoint::new(0.0, 0.0006),
            GeoPoint::new(0.0, 0.001),
            GeoPoint::new(0.0, 0.0028),
            GeoPoint::new(0.0, 0.0046),
            GeoPoint::new(0.0, 0.005),
            GeoPoint::new(0.0, 0.0053),
            GeoPoint::new(0.0, 0.0056),
        ];
        let assignment = Dbscan::new(0.002, 4).unwrap().fit(&points).unwrap();

        assert_eq!(assignment.cluster_count(), 2);
        assert_eq!(assignment.label(4), Some(PointLabel::Cluster(0)));
        assert_eq!(assignment.members(0), vec![0, 1, 2, 3, 4]);
        assert_eq!(assignment.members(1), vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_later_cluster_can_fall_below_min_points() {
        // Point 4 is taken by cluster 0, leaving cluster 1 with three members
        let points = [0.0, 0.3, 0.6, 1.0, 2.0, 3.0, 3.5, 4.0].map(|x| GeoPoint::new(0.0, x));
        let assignment = Dbscan::new(1.05, 4).unwrap().fit(&points).unwrap();

        assert_eq!(assignment.cluster_count(), 2);
        assert_eq!(assignment.label(4), Some(PointLabel::Cluster(0)));
        assert_eq!(assignment.members(0), vec![0, 1, 2, 3, 4]);
        assert_eq!(assignment.members(1), vec![5, 6, 7]);
        assert_eq!(assignment.noise_count(), 0);
    }

    #[test]
    fn test_min_points_one_makes_singletons() {
        let points = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        let assignment = Dbscan::new(0.003, 1).unwrap().fit(&points).unwrap();
        assert_eq!(assignment.cluster_count(), 2);
        assert_eq!(assignment.noise_count(), 0);
    }

    #[test]
    fn test_empty_input() {
        let assignment = Dbscan::new(0.003, 2).unwrap().fit(&[]).unwrap();
        assert_eq!(assignment.cluster_count(), 0);
        assert!(assignment.labels().is_empty());
    }

    #[test]
    fn test_non_finite_coordinate_is_rejected() {
        let points = [GeoPoint::new(0.0, 0.0), GeoPoint::new(f64::NAN, 0.0)];
        let err = Dbscan::new(0.003, 2).unwrap().fit(&points).unwrap_err();
        assert!(matches!(err, ClusterError::NonFiniteCoordinate { index: 1, .. }));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Dbscan::new(f64::INFINITY, 2).is_err());
        assert!(Dbscan::new(-0.1, 2).is_err());
        assert!(Dbscan::new(0.003, 0).is_err());
    }
}
