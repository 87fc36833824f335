//! Timeline types: clips, lanes, placement descriptions, ripple results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::RationalTime;

/// Store-assigned clip identifier, unique within one `ClipStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClipId(pub u64);

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable, process-run-independent identifier handle for an external asset.
///
/// The core never dereferences this; it is resolved to real media by the
/// caller and used here only as a registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A placed media reference on one lane of the timeline.
///
/// `(offset, offset + duration)` is a half-open interval on the clip's lane.
/// Lane 0 is the primary storyline; other lanes are connected tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,
    pub asset: AssetRef,
    /// Position on the timeline.
    pub offset: RationalTime,
    /// Always positive.
    pub duration: RationalTime,
    /// Trim point into the source media, never negative.
    pub source_start: RationalTime,
    pub lane: i32,
    pub name: Option<String>,
}

impl Clip {
    /// Exclusive end of the clip's interval.
    pub fn end(&self) -> RationalTime {
        self.offset + self.duration
    }

    /// Half-open interval overlap against `[start, end)` on any lane.
    pub fn overlaps(&self, start: RationalTime, end: RationalTime) -> bool {
        self.offset < end && self.end() > start
    }
}

/// Caller-side description of a clip to place: what to play, for how long,
/// from which trim point, under which display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSource {
    pub asset: AssetRef,
    pub duration: RationalTime,
    pub source_start: RationalTime,
    pub name: Option<String>,
}

impl ClipSource {
    pub fn new(asset: impl Into<AssetRef>, duration: RationalTime) -> Self {
        Self {
            asset: asset.into(),
            duration,
            source_start: RationalTime::ZERO,
            name: None,
        }
    }

    /// Set the trim point into the source media.
    pub fn with_source_start(mut self, source_start: RationalTime) -> Self {
        self.source_start = source_start;
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Inclusive span of lanes currently present in a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneRange {
    pub lower: i32,
    pub upper: i32,
}

/// Which lanes a ripple insert pushes downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RippleScope {
    /// Every lane shifts.
    AllLanes,
    /// Only the given lane shifts.
    SingleLane(i32),
    /// Lanes within the inclusive range shift.
    LaneRange { lower: i32, upper: i32 },
}

impl RippleScope {
    pub(crate) fn contains(&self, lane: i32) -> bool {
        match *self {
            RippleScope::AllLanes => true,
            RippleScope::SingleLane(n) => lane == n,
            RippleScope::LaneRange { lower, upper } => (lower..=upper).contains(&lane),
        }
    }
}

/// One clip moved by a ripple insert: where it was and where it ended up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipShift {
    pub id: ClipId,
    pub lane: i32,
    pub from: RationalTime,
    pub to: RationalTime,
}

impl ClipShift {
    /// How far the clip moved. Always the inserted clip's duration.
    pub fn amount(&self) -> RationalTime {
        self.to - self.from
    }
}

/// Outcome of a ripple insert, returned for caller feedback and not
/// persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RippleResult {
    pub inserted: Clip,
    pub shifted: Vec<ClipShift>,
}
