//! Sight/hearing target acquisition and the forget rule.

use bgx_core::{Facing, TargetId, Vec2};

use crate::error::{SensorError, SensorResult};
use crate::world::{LayerMask, World};

// ── SensorConfig ──────────────────────────────────────────────────────────────

/// Authored perception parameters for one actor archetype.
///
/// Offsets are authored for a right-facing actor; the sensor mirrors the
/// hearing offset by the actual facing at query time.  The sight ray is
/// horizontal (along the facing), lifted by `sight_y_offset`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorConfig {
    /// Length of the forward sight ray.
    pub sight_distance: f32,
    /// Vertical offset of the sight ray's origin (eye height).
    pub sight_y_offset: f32,
    /// Radius of the hearing overlap query.
    pub hearing_radius: f32,
    /// Center of the hearing query relative to the actor, mirrored by facing.
    pub hearing_offset: Vec2,
    /// An acquired target farther than this is forgotten.
    pub max_target_distance: f32,
    /// Layers the sight ray can hit.
    pub sight_mask: LayerMask,
    /// Layers the hearing query can detect.
    pub hearing_mask: LayerMask,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sight_distance:      12.0,
            sight_y_offset:      0.5,
            hearing_radius:      4.0,
            hearing_offset:      Vec2::ZERO,
            max_target_distance: 25.0,
            sight_mask:          LayerMask::ALL,
            hearing_mask:        LayerMask::ALL,
        }
    }
}

impl SensorConfig {
    /// Reject configurations that would silently disable perception.
    pub fn validate(&self) -> SensorResult<()> {
        if self.sight_distance < 0.0 {
            return Err(SensorError::Config(format!(
                "sight_distance must be >= 0, got {}",
                self.sight_distance
            )));
        }
        if self.hearing_radius < 0.0 {
            return Err(SensorError::Config(format!(
                "hearing_radius must be >= 0, got {}",
                self.hearing_radius
            )));
        }
        if self.max_target_distance <= 0.0 {
            return Err(SensorError::Config(format!(
                "max_target_distance must be > 0, got {}",
                self.max_target_distance
            )));
        }
        Ok(())
    }
}

// ── Sensor ────────────────────────────────────────────────────────────────────

/// Per-actor acquisition state: the config plus the currently acquired
/// target (a weak handle, re-validated on every check).
#[derive(Debug)]
pub struct Sensor {
    config: SensorConfig,
    target: Option<TargetId>,
}

impl Sensor {
    pub fn new(config: SensorConfig) -> SensorResult<Self> {
        config.validate()?;
        Ok(Self { config, target: None })
    }

    #[inline]
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// The currently acquired target, if any.
    #[inline]
    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    /// Drop the acquired target.
    #[inline]
    pub fn clear(&mut self) {
        self.target = None;
    }

    /// Run one acquisition check.  Returns whether a target is acquired
    /// afterwards.
    ///
    /// With a target already acquired, only the forget rule runs: the target
    /// is dropped if it despawned or moved beyond `max_target_distance`.
    /// Re-acquisition waits for the next check.  With no target, sight is
    /// tried first, then hearing; acquiring one is a stored side effect even
    /// when the caller is a read-only exit-condition probe.
    pub fn check(&mut self, origin: Vec2, facing: Facing, world: &impl World) -> bool {
        let cfg = &self.config;

        if let Some(target) = self.target {
            match world.position_of(target) {
                None => {
                    tracing::debug!(%target, "target despawned; dropping");
                    self.target = None;
                }
                Some(pos) if origin.distance(pos) > cfg.max_target_distance => {
                    tracing::debug!(%target, "target out of range; dropping");
                    self.target = None;
                }
                Some(_) => {}
            }
            return self.target.is_some();
        }

        // Sight: forward ray from eye height.
        let eye = origin + Vec2::new(0.0, cfg.sight_y_offset);
        if let Some(seen) = world.raycast(eye, facing.dir(), cfg.sight_distance, cfg.sight_mask) {
            tracing::debug!(target = %seen, "target sighted");
            self.target = Some(seen);
            return true;
        }

        // Hearing: overlap around the facing-mirrored offset; the query
        // returns candidates in deterministic order, take the first.
        let ear = origin + cfg.hearing_offset.mirrored(facing);
        if let Some(&heard) = world
            .query_radius(ear, cfg.hearing_radius, cfg.hearing_mask)
            .first()
        {
            tracing::debug!(target = %heard, "target heard");
            self.target = Some(heard);
            return true;
        }

        false
    }
}
