//! Hotspot views produced by the clustering engine.
//!
//! Hotspots are recomputed on every call from the current complaint snapshot
//! and have no identity beyond that call.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::geometry::GeoPoint;

/// Hotspot urgency tier, derived from member count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Tier for a cluster of `count` members.
    ///
    /// `>= 10` critical, `5..=9` high, `2..=4` medium. A single-member cluster
    /// (only possible with `min_points = 1`) is low.
    pub fn from_count(count: usize) -> Self {
        match count {
            c if c >= 10 => Severity::Critical,
            c if c >= 5 => Severity::High,
            c if c >= 2 => Severity::Medium,
            _ => Severity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A spatially dense group of complaints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Cluster label + 1
    pub id: u32,

    /// Most frequent location prefix (text before the first comma)
    pub area_name: String,

    /// Zone of the first member
    pub zone: String,

    pub complaint_count: usize,
    pub dominant_category: String,
    pub severity: Severity,

    /// Arithmetic mean of member latitudes and longitudes
    pub centroid: GeoPoint,
}

/// Ordering applied among hotspots with equal member counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep cluster-label order (depends on input order)
    #[default]
    ClusterOrder,
    /// Area name, then centroid latitude, then centroid longitude
    AreaThenCentroid,
}

/// Tuning for one clustering run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterParams {
    /// Neighbourhood radius in degrees (Euclidean, degree space)
    pub radius_deg: f64,

    /// Neighbours (self included) needed for a core point
    pub min_points: usize,

    /// Maximum hotspots returned
    pub top_n: usize,

    pub tie_break: TieBreak,
}

impl ClusterParams {
    pub const DEFAULT_RADIUS_DEG: f64 = 0.003;
    pub const DEFAULT_MIN_POINTS: usize = 2;
    pub const DEFAULT_TOP_N: usize = 5;

    pub fn with_radius(mut self, radius_deg: f64) -> Self {
        self.radius_deg = radius_deg;
        self
    }

    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            radius_deg: Self::DEFAULT_RADIUS_DEG,
            min_points: Self::DEFAULT_MIN_POINTS,
            top_n: Self::DEFAULT_TOP_N,
            tie_break: TieBreak::default(),
        }
    }
}

/// Whether a hotspot list reflects a completed computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HotspotStatus {
    Computed,
    /// Clustering failed and the result was replaced by an empty list
    Degraded { reason: String },
}

/// Hotspots plus enough context to tell "none found" from "not available"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotReport {
    #[serde(flatten)]
    pub status: HotspotStatus,
    pub hotspots: Vec<Hotspot>,

    /// Input points that landed in some cluster
    pub clustered_points: usize,

    /// Input points labelled noise
    pub noise_points: usize,
}

impl HotspotReport {
    pub fn empty() -> Self {
        Self {
            status: HotspotStatus::Computed,
            hotspots: Vec::new(),
            clustered_points: 0,
            noise_points: 0,
        }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Self { status: HotspotStatus::Degraded { reason: reason.into() }, ..Self::empty() }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, HotspotStatus::Degraded { .. })
    }
}
