//! Line-of-sight sensing port and backends.
//!
//! Pursuit behaviors ask "can `from` see `to`?" before chasing, stalking, or
//! shooting.  The engine ships three backends:
//!
//! - [`OpenField`] — nothing blocks sight; useful for open maps and tests.
//! - [`Blindfold`] — nothing is ever visible.  The fail-safe stand-in when no
//!   occlusion data is wired up: behaviors that require sight simply never
//!   fire rather than seeing through walls.
//! - [`ObstacleField`] — axis-aligned rectangular occluders in an R-tree,
//!   with segment-vs-box intersection per candidate.

use npc_core::{Rect, Vec2};
use rstar::{AABB, RTree, RTreeObject};

/// Sight query port.
pub trait SensingPort {
    /// Whether an unobstructed straight segment exists from `from` to `to`.
    fn is_visible(&self, from: Vec2, to: Vec2) -> bool;
}

/// Always-visible backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenField;

impl SensingPort for OpenField {
    fn is_visible(&self, _from: Vec2, _to: Vec2) -> bool {
        true
    }
}

/// Never-visible backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blindfold;

impl SensingPort for Blindfold {
    fn is_visible(&self, _from: Vec2, _to: Vec2) -> bool {
        false
    }
}

// ── Obstacle-backed sensing ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Obstacle {
    rect: Rect,
}

impl RTreeObject for Obstacle {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.rect.min.x, self.rect.min.y],
            [self.rect.max.x, self.rect.max.y],
        )
    }
}

/// Static rectangular occluders, bulk-loaded into an R-tree.
///
/// Sight checks first narrow candidates to obstacles whose envelope overlaps
/// the segment's bounding box, then run an exact slab test per candidate.
#[derive(Debug)]
pub struct ObstacleField {
    tree: RTree<Obstacle>,
}

impl ObstacleField {
    pub fn new(rects: impl IntoIterator<Item = Rect>) -> Self {
        let obstacles = rects.into_iter().map(|rect| Obstacle { rect }).collect();
        ObstacleField { tree: RTree::bulk_load(obstacles) }
    }

    pub fn obstacle_count(&self) -> usize {
        self.tree.size()
    }
}

impl SensingPort for ObstacleField {
    fn is_visible(&self, from: Vec2, to: Vec2) -> bool {
        let envelope = AABB::from_corners(
            [from.x.min(to.x), from.y.min(to.y)],
            [from.x.max(to.x), from.y.max(to.y)],
        );
        !self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .any(|obstacle| segment_hits_rect(from, to, obstacle.rect))
    }
}

/// Slab test: clip the parametric segment `a + t(b - a)`, `t` in [0, 1],
/// against the box on each axis and check a non-empty interval survives.
fn segment_hits_rect(a: Vec2, b: Vec2, rect: Rect) -> bool {
    let delta = b - a;
    let mut t_min = 0.0_f32;
    let mut t_max = 1.0_f32;

    for (origin, dir, lo, hi) in [
        (a.x, delta.x, rect.min.x, rect.max.x),
        (a.y, delta.y, rect.min.y, rect.max.y),
    ] {
        if dir.abs() <= f32::EPSILON {
            if origin < lo || origin > hi {
                return false;
            }
        } else {
            let inv = 1.0 / dir;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
    }
    true
}
