//! Interrupt entry points.
//!
//! Each interrupt kind has one entry point: timers and health run inside
//! `decide`, the rest fire when the host delivers the corresponding event
//! (`set_counter`, `post_message`, `apply_damage`).  All of them share the
//! per-tick commit guard with the normal exit scan, so a fired interrupt
//! preempts this tick's transition and nothing else can commit after it.
//!
//! Every loop over cached interrupt ids re-checks the active phase between
//! firings: an interrupt whose exit switched the phase invalidated the rest
//! of the list, and a fault deactivated the executor outright.

use bgx_core::{DamageInfo, Dice};
use bgx_graph::{DamageFilter, Interrupt};

use crate::executor::Executor;
use crate::host::Host;

impl<D: Dice> Executor<D> {
    /// Tick the timer interrupts of the active phase.
    ///
    /// An expired countdown is re-seeded (looped) or retired (one-shot)
    /// before its probability roll, so a failed roll never replays the same
    /// expiry next tick.
    pub(crate) fn run_timer_interrupts<H: Host>(&mut self, host: &mut H) {
        let phase = self.phase_id();
        let phases = self.shared_phases();
        let timer_ids = &phases.graph(phase).interrupts().timers;

        for (slot, &id) in timer_ids.iter().enumerate() {
            if self.is_faulted_or_switched(phase) {
                return;
            }
            if self.timer_countdown(slot) > 0.0 {
                continue;
            }

            let &Interrupt::Timer { period_secs, looped, percent } =
                phases.graph(phase).interrupt(id)
            else {
                continue;
            };

            let next = if looped { period_secs } else { f32::INFINITY };
            self.set_timer_countdown(slot, next);

            if self.dice_mut().roll_percent() < percent {
                self.fire_interrupt(id, host);
            }
        }
    }

    /// Check the health interrupts of the active phase against the host's
    /// current health.  Each latch fires once per phase, on the first tick
    /// health is at or below its trigger.
    pub(crate) fn run_health_interrupts<H: Host>(&mut self, host: &mut H) {
        let phase = self.phase_id();
        let phases = self.shared_phases();
        let health_ids = &phases.graph(phase).interrupts().health;
        let (current, _) = host.health();

        for (slot, &id) in health_ids.iter().enumerate() {
            if self.is_faulted_or_switched(phase) {
                return;
            }
            if *self.health_latch(slot) {
                continue;
            }

            let &Interrupt::Health { trigger } = phases.graph(phase).interrupt(id) else {
                continue;
            };
            if current <= trigger {
                *self.health_latch(slot) = true;
                self.fire_interrupt(id, host);
            }
        }
    }

    /// Write the general-purpose counter and fire any counter interrupts
    /// the write crosses.
    ///
    /// `or_above` interrupts fire on any write crossing from below the
    /// trigger to at or above it; exact interrupts fire only when the write
    /// lands on the trigger (and the counter was not already there).
    pub fn set_counter<H: Host>(&mut self, host: &mut H, value: i32) {
        let old = self.counter();
        *self.counter_mut() = value;
        if !self.is_active() || value == old {
            return;
        }

        let phase = self.phase_id();
        let phases = self.shared_phases();
        let counter_ids = phases.graph(phase).interrupts().counters.clone();

        for id in counter_ids {
            if self.is_faulted_or_switched(phase) {
                return;
            }
            let &Interrupt::Counter { trigger, or_above } = phases.graph(phase).interrupt(id)
            else {
                continue;
            };
            let fired = if or_above {
                old < trigger && value >= trigger
            } else {
                value == trigger && old != trigger
            };
            if fired {
                self.fire_interrupt(id, host);
            }
        }
    }

    /// Deliver a keyed message; every message interrupt whose key matches
    /// exactly fires.
    pub fn post_message<H: Host>(&mut self, host: &mut H, key: &str) {
        if !self.is_active() {
            return;
        }
        let phase = self.phase_id();
        let phases = self.shared_phases();
        let message_ids = phases.graph(phase).interrupts().messages.clone();

        let mut any = false;
        for id in message_ids {
            if self.is_faulted_or_switched(phase) {
                return;
            }
            let Interrupt::Message { key: wanted } = phases.graph(phase).interrupt(id) else {
                continue;
            };
            if wanted == key {
                any = true;
                self.fire_interrupt(id, host);
            }
        }
        if !any {
            tracing::debug!(key, "message matched no interrupt");
        }
    }

    /// Deliver incoming damage.
    ///
    /// Counts the hit, rewrites the amount through the first damage
    /// interrupt whose state matcher covers the current state, fires that
    /// interrupt, and returns the (possibly rewritten) damage for the host
    /// to apply.  With no matching interrupt the damage passes through
    /// unchanged.
    pub fn apply_damage<H: Host>(&mut self, host: &mut H, hit: DamageInfo) -> DamageInfo {
        if !self.is_active() {
            return hit;
        }
        self.bump_hit_count();

        let state = self.state();
        let phase = self.phase_id();
        let phases = self.shared_phases();

        let matched = phases
            .graph(phase)
            .interrupts()
            .damage
            .iter()
            .find_map(|&id| match phases.graph(phase).interrupt(id) {
                Interrupt::Damage { states, filters } if states.matches(state) => {
                    Some((id, filters.as_slice()))
                }
                _ => None,
            });

        let Some((id, filters)) = matched else {
            return hit;
        };

        let filtered = DamageFilter::apply_chain(filters, hit);
        self.fire_interrupt(id, host);
        filtered
    }
}
