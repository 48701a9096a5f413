//! The `World` perception trait and the bundled `StaticWorld`.
//!
//! # Determinism
//!
//! `query_radius` must return candidates in a deterministic order — the
//! sensor acquires the *first* candidate, and two runs with identical state
//! must acquire the same target.  `StaticWorld` sorts by squared distance
//! and breaks ties by ascending `TargetId`.

use bgx_core::{TargetId, Vec2};
use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

// ── LayerMask ─────────────────────────────────────────────────────────────────

/// A bit set of host-defined collision/perception layers.
///
/// Layer meanings belong to the host (players, projectiles, noise sources…);
/// the sensor only intersects masks.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL:  LayerMask = LayerMask(u32::MAX);

    /// Mask with a single bit set.
    #[inline]
    pub fn single(bit: u8) -> LayerMask {
        LayerMask(1 << bit)
    }

    #[inline]
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

// ── World trait ───────────────────────────────────────────────────────────────

/// Host-side perception queries.
///
/// All lookups are weak: a `TargetId` whose actor has despawned resolves to
/// `None`, which the sensor treats as a lost target.
pub trait World {
    /// First mask-compatible actor hit by a ray from `origin` along `dir`
    /// (unit vector), no farther than `max_dist`.
    fn raycast(&self, origin: Vec2, dir: Vec2, max_dist: f32, mask: LayerMask)
    -> Option<TargetId>;

    /// All mask-compatible actors overlapping the circle at `center`, in a
    /// deterministic order (nearest first).
    fn query_radius(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<TargetId>;

    /// Current position of an actor, or `None` once it no longer exists.
    fn position_of(&self, target: TargetId) -> Option<Vec2>;
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the spatial index: a 2-D point with the actor's id and
/// perception layers.
#[derive(Clone, PartialEq)]
struct BodyEntry {
    point:  [f32; 2],
    id:     TargetId,
    layers: LayerMask,
}

impl RTreeObject for BodyEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for BodyEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── StaticWorld ───────────────────────────────────────────────────────────────

/// The bundled [`World`] implementation: point bodies with one shared body
/// radius, indexed by an R-tree.
///
/// Supports insert/remove/reposition, so headless hosts and tests can move
/// actors between ticks without rebuilding the world.
pub struct StaticWorld {
    tree:  RTree<BodyEntry>,
    by_id: FxHashMap<TargetId, BodyEntry>,
    /// Radius every body presents to rays and overlap queries.
    body_radius: f32,
}

impl StaticWorld {
    /// Empty world.  `body_radius` is the collision radius of every actor.
    pub fn new(body_radius: f32) -> Self {
        Self {
            tree:        RTree::new(),
            by_id:       FxHashMap::default(),
            body_radius: body_radius.max(0.0),
        }
    }

    /// Empty world with a 0.5-unit body radius.
    pub fn empty() -> Self {
        Self::new(0.5)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Insert or replace an actor.
    pub fn insert(&mut self, id: TargetId, pos: Vec2, layers: LayerMask) {
        self.remove(id);
        let entry = BodyEntry { point: [pos.x, pos.y], id, layers };
        self.tree.insert(entry.clone());
        self.by_id.insert(id, entry);
    }

    /// Remove an actor.  Lookups for it resolve to `None` afterwards.
    pub fn remove(&mut self, id: TargetId) {
        if let Some(entry) = self.by_id.remove(&id) {
            self.tree.remove(&entry);
        }
    }

    /// Move an existing actor.  No-op for unknown ids.
    pub fn move_to(&mut self, id: TargetId, pos: Vec2) {
        if let Some(entry) = self.by_id.get(&id) {
            let layers = entry.layers;
            self.insert(id, pos, layers);
        }
    }
}

impl World for StaticWorld {
    fn raycast(
        &self,
        origin: Vec2,
        dir: Vec2,
        max_dist: f32,
        mask: LayerMask,
    ) -> Option<TargetId> {
        let r = self.body_radius;
        let end = origin + dir.scale(max_dist);

        // Prune with the ray's inflated bounding box, then test each
        // candidate circle against the segment.
        let envelope = AABB::from_corners(
            [origin.x.min(end.x) - r, origin.y.min(end.y) - r],
            [origin.x.max(end.x) + r, origin.y.max(end.y) + r],
        );

        let mut best: Option<(f32, TargetId)> = None;
        for entry in self.tree.locate_in_envelope_intersecting(&envelope) {
            if !entry.layers.intersects(mask) {
                continue;
            }
            let p = Vec2::new(entry.point[0], entry.point[1]);
            let along = (p - origin).dot(dir);
            if along < 0.0 || along > max_dist {
                continue;
            }
            let perp_sq = origin.distance_sq(p) - along * along;
            if perp_sq > r * r {
                continue;
            }
            // Nearest hit along the ray wins; ties resolve to the lowest id.
            let better = match best {
                None => true,
                Some((t, id)) => along < t || (along == t && entry.id < id),
            };
            if better {
                best = Some((along, entry.id));
            }
        }
        best.map(|(_, id)| id)
    }

    fn query_radius(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<TargetId> {
        let reach = radius + self.body_radius;
        let mut hits: Vec<(f32, TargetId)> = self
            .tree
            .locate_within_distance([center.x, center.y], reach * reach)
            .filter(|e| e.layers.intersects(mask))
            .map(|e| (e.distance_2(&[center.x, center.y]), e.id))
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.into_iter().map(|(_, id)| id).collect()
    }

    fn position_of(&self, target: TargetId) -> Option<Vec2> {
        self.by_id
            .get(&target)
            .map(|e| Vec2::new(e.point[0], e.point[1]))
    }
}
