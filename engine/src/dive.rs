//! Dive records and the validated trajectory store.

use serde::{Deserialize, Serialize};

/// One sample along a dive path. `depth` is positive downward in source
/// data; render space inverts the sign (see `geometry`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// East-west coordinate in meters.
    pub x: f32,
    /// Depth below the surface in meters (positive down).
    pub depth: f32,
    /// North-south coordinate in meters.
    pub z: f32,
}

/// One recorded or synthesized movement trajectory.
///
/// Immutable once loaded. `path` is temporal: point i precedes point
/// i+1. `twistiness` is index-aligned with `path` and drives color only,
/// never geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dive {
    /// Positive id, unique within a store, stable for the record's lifetime.
    pub id: u32,
    /// Time-ordered 3D samples, length >= 2.
    pub path: Vec<PathPoint>,
    /// Per-point behavioral-complexity scalar in [0,1], same length as `path`.
    pub twistiness: Vec<f32>,
    /// Deepest point reached in meters (informational only).
    #[serde(default, rename = "maxDepth")]
    pub max_depth_m: f32,
    /// Dive duration in seconds (informational only).
    #[serde(default, rename = "duration")]
    pub duration_s: f32,
    /// Start timestamp string (informational only).
    #[serde(default, rename = "startTime")]
    pub start_time: String,
}

/// Shape violations that make a single dive unrenderable.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DataShapeError {
    /// `path` and `twistiness` lengths disagree.
    #[error("dive {id}: path has {path_len} points but twistiness has {twist_len}")]
    LengthMismatch {
        /// Id of the offending dive.
        id: u32,
        /// Number of path points.
        path_len: usize,
        /// Number of twistiness values.
        twist_len: usize,
    },
    /// Fewer than two points cannot form a line.
    #[error("dive {id}: path has {len} points, need at least 2")]
    PathTooShort {
        /// Id of the offending dive.
        id: u32,
        /// Number of path points.
        len: usize,
    },
}

impl Dive {
    /// Check the path/twistiness shape invariants.
    ///
    /// Violating dives are rejected outright rather than clamped: a
    /// truncated twistiness array would silently recolor the tail of a
    /// trajectory, which is worse than dropping the record.
    pub fn validate(&self) -> Result<(), DataShapeError> {
        if self.path.len() != self.twistiness.len() {
            return Err(DataShapeError::LengthMismatch {
                id: self.id,
                path_len: self.path.len(),
                twist_len: self.twistiness.len(),
            });
        }
        if self.path.len() < 2 {
            return Err(DataShapeError::PathTooShort { id: self.id, len: self.path.len() });
        }
        Ok(())
    }
}

/// Ordered collection of validated dives, source-agnostic (fetched,
/// cached, or synthesized upstream).
#[derive(Debug, Default)]
pub struct DiveStore {
    dives: Vec<Dive>,
    dropped: Vec<(u32, DataShapeError)>,
}

impl DiveStore {
    /// Build a store from raw records.
    ///
    /// Malformed dives are rejected individually (partial degradation,
    /// not total failure) and each dropped id is logged.
    pub fn from_records(records: Vec<Dive>) -> Self {
        let mut dives = Vec::with_capacity(records.len());
        let mut dropped = Vec::new();
        for d in records {
            match d.validate() {
                Ok(()) => dives.push(d),
                Err(e) => {
                    log::warn!("[store] dropping dive {}: {}", d.id, e);
                    dropped.push((d.id, e));
                }
            }
        }
        Self { dives, dropped }
    }

    /// Validated dives in load order.
    pub fn dives(&self) -> &[Dive] {
        &self.dives
    }

    /// Number of renderable dives.
    pub fn len(&self) -> usize {
        self.dives.len()
    }

    /// True when no dive survived validation.
    pub fn is_empty(&self) -> bool {
        self.dives.is_empty()
    }

    /// Ids rejected during construction, with the reason.
    pub fn dropped(&self) -> &[(u32, DataShapeError)] {
        &self.dropped
    }
}
