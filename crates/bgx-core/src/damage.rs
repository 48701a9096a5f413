//! The damage record exchanged between host and executor.

use crate::TargetId;

/// One incoming damage event.
///
/// The host passes this to `Executor::apply_damage` and must apply the
/// *returned* record, never the original — the graph's damage-interrupt
/// filter chain may have rewritten it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageInfo {
    /// Damage amount in the host's health units.  Never negative after
    /// filtering; the chain floors the result at zero.
    pub amount: f32,

    /// The actor that dealt the damage, if known.  Weak — resolved through
    /// the `World` trait, may be gone by the time anyone looks.
    pub source: Option<TargetId>,
}

impl DamageInfo {
    #[inline]
    pub fn new(amount: f32) -> Self {
        Self { amount, source: None }
    }

    #[inline]
    pub fn from_source(amount: f32, source: TargetId) -> Self {
        Self { amount, source: Some(source) }
    }
}
