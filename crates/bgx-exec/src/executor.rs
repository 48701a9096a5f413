//! The `Executor` — one actor's runtime over a shared phase table.

use std::sync::Arc;

use bgx_core::{ActorRng, Dice, NodeId, PhaseId, StateTag};
use bgx_graph::{ExitCondition, Graph, NodeKind, PhaseTable};
use bgx_sensor::{Sensor, World};

use crate::error::{ExecError, ExecResult};
use crate::host::Host;
use crate::tick::TickPhase;

/// Upper bound on structural hops (`ChangePhase` redirects, `RandomChoice`
/// resolutions) within one transition.  An authored cycle that exceeds it
/// is a configuration fault, not something to spin on.
const MAX_HOPS: u8 = 16;

/// Why an exit is being walked — decides which guard note a commit leaves.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Cause {
    Normal,
    Interrupt,
}

/// What walking an exit did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum ExitOutcome {
    /// The port has no connections — nothing to do this tick.
    NoConnections,
    /// Actions ran but no behavioral node was connected (void transition).
    Void,
    /// A transition already committed this tick; only actions ran.
    Blocked,
    /// The active graph changed; the original transition was abandoned.
    PhaseChanged,
    /// A behavioral node was committed as current.
    Committed,
    /// A configuration fault deactivated the executor.
    Faulted,
}

// ── Executor ──────────────────────────────────────────────────────────────────

/// Per-actor graph runtime.
///
/// Generic over its randomness source so replays and tests can script draws
/// ([`SequenceDice`][bgx_core::SequenceDice]); production actors use the
/// default [`ActorRng`].  The phase table is shared immutably across every
/// executor spawned from it.
pub struct Executor<D: Dice = ActorRng> {
    phases: Arc<PhaseTable>,
    dice:   D,
    sensor: Sensor,

    current_phase: PhaseId,
    current_node:  Option<NodeId>,

    /// Seconds since the current node was entered.
    state_timer: f32,
    /// General-purpose counter; writes can fire Counter interrupts.
    counter: i32,
    /// Damage events received while in the current state.
    hit_count: u32,
    /// Movement refused to relinquish control; `decide` holds still.
    locked: bool,
    /// Host signaled movement completion; consumed by the first
    /// `MoveComplete` exit check that reads it.
    move_complete: bool,

    /// Countdowns parallel to the active graph's timer interrupts.
    /// `f32::INFINITY` marks a consumed one-shot.
    timer_countdowns: Vec<f32>,
    /// Fired latches parallel to the active graph's health interrupts.
    health_fired: Vec<bool>,

    tick: TickPhase,
    sensed_this_tick: bool,
    /// Target reported by the previous `sense` call, for change detection.
    prev_sense_target: Option<bgx_core::TargetId>,

    active: bool,
    /// Opaque blob for serialization collaborators; never interpreted here.
    extra_save_data: String,

    /// Behavioral commits since `begin_tick` — test hook for the
    /// at-most-one-transition-per-tick invariant.
    pub(crate) commits_this_tick: u32,
}

impl<D: Dice> Executor<D> {
    /// Build an executor over a shared phase table.
    ///
    /// The table must be non-empty; its first phase is the starting phase.
    /// Call [`activate`][Self::activate] before the first tick.
    pub fn new(phases: Arc<PhaseTable>, sensor: Sensor, dice: D) -> ExecResult<Self> {
        if phases.is_empty() {
            return Err(ExecError::EmptyPhaseTable);
        }
        Ok(Self {
            phases,
            dice,
            sensor,
            current_phase: PhaseId(0),
            current_node: None,
            state_timer: 0.0,
            counter: 0,
            hit_count: 0,
            locked: false,
            move_complete: false,
            timer_countdowns: Vec::new(),
            health_fired: Vec::new(),
            tick: TickPhase::Fresh,
            sensed_this_tick: false,
            prev_sense_target: None,
            active: true,
            extra_save_data: String::new(),
            commits_this_tick: 0,
        })
    }

    /// Enter the default phase and walk its entry to the first behavioral
    /// node, running any edge actions on the way.
    ///
    /// Returns `false` if the walk hit a configuration fault; the executor
    /// is deactivated and the host should despawn or idle the actor.
    pub fn activate<H: Host>(&mut self, host: &mut H) -> bool {
        // new() rejected empty tables, so the default phase exists.
        self.enter_phase(PhaseId(0), Cause::Normal, host, 0);
        self.active
    }

    // ── Per-tick entry points ─────────────────────────────────────────────

    /// Start a new tick: reset the per-tick guards and advance all timers
    /// by `dt` seconds.
    pub fn begin_tick(&mut self, dt: f32) {
        self.tick = TickPhase::Fresh;
        self.sensed_this_tick = false;
        self.commits_this_tick = 0;
        if !self.active {
            return;
        }
        self.state_timer += dt;
        for countdown in &mut self.timer_countdowns {
            if countdown.is_finite() {
                *countdown -= dt;
            }
        }
    }

    /// Make this tick's decision and report the active behavioral state.
    ///
    /// Idempotent within a tick.  While `locked`, returns the current state
    /// without evaluating anything.  Otherwise runs the sensor (memoized),
    /// the timer and health interrupts, and finally the current node's exit
    /// conditions in declaration order — the first true condition takes its
    /// exit, and nothing further is checked this tick.
    pub fn decide<H: Host, W: World>(&mut self, host: &mut H, world: &W) -> StateTag {
        if self.tick.has_decided() || !self.active {
            return self.state();
        }
        self.tick.note_decided();

        if self.locked {
            return self.state();
        }
        let Some(node_id) = self.current_node else {
            tracing::warn!("decide called before activation");
            return self.state();
        };

        self.run_sensor(host, world);
        self.run_timer_interrupts(host);
        self.run_health_interrupts(host);

        // An interrupt that committed (or faulted) owns this tick.
        if self.tick.has_committed() || !self.active {
            return self.state();
        }

        let phases = Arc::clone(&self.phases);
        let node = phases.graph(self.current_phase).node(node_id);
        for (port, condition) in node.exit_slots().iter().enumerate() {
            if self.condition_met(condition, host, world) {
                self.walk_exit(node_id, port as u8, Cause::Normal, false, host, 0);
                break;
            }
        }
        self.state()
    }

    /// Run the sensor (memoized per tick) and report whether the acquired
    /// target changed since the previous `sense` call.
    ///
    /// Hosts use this as a cheap "is `decide` worth calling?" probe while
    /// otherwise idle.
    pub fn sense<H: Host, W: World>(&mut self, host: &H, world: &W) -> bool {
        self.run_sensor(host, world);
        let now = self.sensor.target();
        let changed = now != self.prev_sense_target;
        self.prev_sense_target = now;
        changed
    }

    // ── Host feedback ─────────────────────────────────────────────────────

    /// Movement for the current state finished.  Feeds the `MoveComplete`
    /// exit condition; consumed by the first check that reads it.
    pub fn notify_move_complete(&mut self) {
        self.move_complete = true;
    }

    /// The host's movement accepted the last reported state.
    pub fn notify_transition_accepted(&mut self) {
        self.locked = false;
    }

    /// The host's movement cannot relinquish control yet; `decide` returns
    /// the current state unchanged until accepted.
    pub fn notify_transition_rejected(&mut self) {
        self.locked = true;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The behavioral-state tag of the current node, or `StateTag::INVALID`
    /// before activation.
    pub fn state(&self) -> StateTag {
        match self.current_node {
            Some(id) => self.graph().node(id).state_tag().unwrap_or_default(),
            None => StateTag::INVALID,
        }
    }

    /// `false` once a configuration fault has deactivated this executor.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn current_phase(&self) -> PhaseId {
        self.current_phase
    }

    pub fn phase_name(&self) -> &str {
        self.phases.name(self.current_phase)
    }

    #[inline]
    pub fn counter(&self) -> i32 {
        self.counter
    }

    /// Damage events received since entering the current state.
    #[inline]
    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    /// The sensor, including the currently acquired target.
    #[inline]
    pub fn sensor(&self) -> &Sensor {
        &self.sensor
    }

    /// Opaque blob for serialization collaborators.  Snapshot/restore only;
    /// the executor passes it through uninterpreted.
    pub fn extra_save_data(&self) -> &str {
        &self.extra_save_data
    }

    pub fn set_extra_save_data(&mut self, data: String) {
        self.extra_save_data = data;
    }

    // ── Internals shared with the interrupt catalogue ─────────────────────

    #[inline]
    pub(crate) fn graph(&self) -> &Graph {
        self.phases.graph(self.current_phase)
    }

    pub(crate) fn shared_phases(&self) -> Arc<PhaseTable> {
        Arc::clone(&self.phases)
    }

    pub(crate) fn phase_id(&self) -> PhaseId {
        self.current_phase
    }

    pub(crate) fn is_faulted_or_switched(&self, phase_at_start: PhaseId) -> bool {
        !self.active || self.current_phase != phase_at_start
    }

    pub(crate) fn bump_hit_count(&mut self) {
        self.hit_count = self.hit_count.saturating_add(1);
    }

    pub(crate) fn counter_mut(&mut self) -> &mut i32 {
        &mut self.counter
    }

    pub(crate) fn timer_countdown(&self, idx: usize) -> f32 {
        self.timer_countdowns[idx]
    }

    pub(crate) fn set_timer_countdown(&mut self, idx: usize, value: f32) {
        self.timer_countdowns[idx] = value;
    }

    pub(crate) fn health_latch(&mut self, idx: usize) -> &mut bool {
        &mut self.health_fired[idx]
    }

    pub(crate) fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    pub(crate) fn fire_interrupt<H: Host>(&mut self, node: NodeId, host: &mut H) {
        self.walk_exit(node, 0, Cause::Interrupt, false, host, 0);
    }

    fn run_sensor<H: Host, W: World>(&mut self, host: &H, world: &W) {
        if self.sensed_this_tick {
            return;
        }
        self.sensed_this_tick = true;
        self.sensor.check(host.position(), host.facing(), world);
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    // ── Exit-condition evaluation ─────────────────────────────────────────

    fn condition_met<H: Host, W: World>(
        &mut self,
        condition: &ExitCondition,
        host:      &H,
        world:     &W,
    ) -> bool {
        match *condition {
            ExitCondition::Timer { secs } => self.state_timer >= secs,

            ExitCondition::TimerPlusRandom { secs, percent } => {
                if self.state_timer < secs {
                    return false;
                }
                // The timer resets on every crossing, win or lose — this
                // condition is a periodic re-roll, not a one-shot.
                self.state_timer = 0.0;
                self.dice.roll_percent() < percent
            }

            ExitCondition::MoveComplete => std::mem::take(&mut self.move_complete),

            ExitCondition::NumberOfHits { count } => self.hit_count >= count,

            ExitCondition::CounterReaches { count } => self.counter >= count,

            ExitCondition::HealthPercentage { percent } => {
                let (current, starting) = host.health();
                starting > 0.0 && current / starting <= percent / 100.0
            }

            ExitCondition::SensePlayer => {
                self.run_sensor(host, world);
                self.sensor.target().is_some()
            }

            ExitCondition::LostPlayerTarget => {
                // Deliberately bypasses the per-tick memo: losing a target
                // must be noticed in the same tick it happens.
                let acquired = self.sensor.check(host.position(), host.facing(), world);
                self.sensed_this_tick = true;
                !acquired
            }

            ExitCondition::TargetWithinRange { range } => {
                let Some(target) = self.sensor.target() else {
                    return false;
                };
                let Some(pos) = world.position_of(target) else {
                    return false;
                };
                if range == 0.0 {
                    return true;
                }
                let dist = host.position().distance(pos);
                // Negative range encodes "at least this far away".
                if range > 0.0 { dist <= range } else { dist >= -range }
            }

            ExitCondition::Always => true,

            ExitCondition::Disabled => false,
        }
    }

    // ── The exit pipeline ─────────────────────────────────────────────────

    /// Walk the connections leaving `(from, port)`.
    ///
    /// 1. No connections → no-op.
    /// 2. Run every connected action node, in connection order.
    /// 3. A connected `ChangePhase` aborts the transition and restarts in
    ///    the named phase (unregistered name → fault).
    /// 4. If a transition already committed this tick, stop (skipped for
    ///    the entry walk of a fresh phase — the reset makes its commit
    ///    mandatory).
    /// 5. Commit the single connected behavioral node; a `RandomChoice`
    ///    target is resolved transparently before returning.
    /// 6. No behavioral node and no phase change → void (actions only).
    pub(crate) fn walk_exit<H: Host>(
        &mut self,
        from:        NodeId,
        port:        u8,
        cause:       Cause,
        phase_entry: bool,
        host:        &mut H,
        depth:       u8,
    ) -> ExitOutcome {
        if depth >= MAX_HOPS {
            tracing::error!(node = %from, "hop limit exceeded; deactivating actor");
            self.deactivate();
            return ExitOutcome::Faulted;
        }

        let phases = Arc::clone(&self.phases);
        let graph = phases.graph(self.current_phase);
        let connections = graph.connections_from(from, port);
        if connections.is_empty() {
            return ExitOutcome::NoConnections;
        }

        for &cid in connections {
            if let NodeKind::Action(spec) = graph.node(graph.connection(cid).to) {
                host.perform(spec);
            }
        }

        for &cid in connections {
            if let NodeKind::ChangePhase { phase } = graph.node(graph.connection(cid).to) {
                return match phases.lookup(phase) {
                    Some(next) => {
                        self.enter_phase(next, cause, host, depth + 1);
                        ExitOutcome::PhaseChanged
                    }
                    None => {
                        tracing::error!(
                            phase = %phase,
                            "change-phase target not registered; deactivating actor"
                        );
                        self.deactivate();
                        ExitOutcome::Faulted
                    }
                };
            }
        }

        if !phase_entry && self.tick.has_committed() {
            return ExitOutcome::Blocked;
        }

        let target = connections
            .iter()
            .map(|&cid| graph.connection(cid).to)
            .find(|&to| graph.node(to).is_behavioral());

        match target {
            None => ExitOutcome::Void,
            Some(to) => {
                self.commit(to, cause);
                if matches!(graph.node(to), NodeKind::RandomChoice { .. }) {
                    self.resolve_random(cause, host, depth + 1);
                }
                if self.active { ExitOutcome::Committed } else { ExitOutcome::Faulted }
            }
        }
    }

    /// Commit `node` as current: per-state counters reset, the per-tick
    /// guard records who committed.
    fn commit(&mut self, node: NodeId, cause: Cause) {
        self.settle(node);
        match cause {
            Cause::Normal    => self.tick.note_transition(),
            Cause::Interrupt => self.tick.note_interrupt(),
        }
        self.commits_this_tick += 1;
    }

    /// Replace the current node without recording a new commit — random
    /// resolution is part of the transition that landed on the random node.
    fn settle(&mut self, node: NodeId) {
        self.current_node = Some(node);
        self.state_timer = 0.0;
        self.hit_count = 0;
        self.move_complete = false;
    }

    /// Resolve a just-committed `RandomChoice` so the host never observes
    /// it as a steady state.  Loops because the resolved target may itself
    /// be random; bounded by the hop cap.
    fn resolve_random<H: Host>(&mut self, cause: Cause, host: &mut H, depth: u8) {
        let mut hops = depth;
        loop {
            if hops >= MAX_HOPS {
                tracing::error!("random-choice chain exceeded hop limit; deactivating actor");
                self.deactivate();
                return;
            }
            hops += 1;

            let Some(node_id) = self.current_node else {
                return;
            };
            let phases = Arc::clone(&self.phases);
            let graph = phases.graph(self.current_phase);
            let NodeKind::RandomChoice { exit_count, .. } = graph.node(node_id) else {
                return;
            };

            let port = self.dice.roll_index(*exit_count as usize) as u8;
            let connections = graph.connections_from(node_id, port);
            if connections.is_empty() {
                // Compile-time validation makes this unreachable for loaded
                // tables; fail loud for hand-assembled ones.
                tracing::error!(
                    node = %node_id, port,
                    "random exit has no connection; deactivating actor"
                );
                self.deactivate();
                return;
            }

            for &cid in connections {
                if let NodeKind::Action(spec) = graph.node(graph.connection(cid).to) {
                    host.perform(spec);
                }
            }

            for &cid in connections {
                if let NodeKind::ChangePhase { phase } = graph.node(graph.connection(cid).to) {
                    match phases.lookup(phase) {
                        Some(next) => self.enter_phase(next, cause, host, hops),
                        None => {
                            tracing::error!(
                                phase = %phase,
                                "change-phase target not registered; deactivating actor"
                            );
                            self.deactivate();
                        }
                    }
                    return;
                }
            }

            let target = connections
                .iter()
                .map(|&cid| graph.connection(cid).to)
                .find(|&to| graph.node(to).is_behavioral());

            match target {
                Some(to) => self.settle(to),
                None => {
                    // A random exit that resolves to nothing would leave the
                    // random node observable — an authoring bug.
                    tracing::error!(
                        node = %node_id, port,
                        "random exit resolves to no behavioral node; deactivating actor"
                    );
                    self.deactivate();
                    return;
                }
            }
        }
    }

    // ── Phase switching ───────────────────────────────────────────────────

    /// Switch the active graph and restart from its entry.
    ///
    /// Resets the per-phase state (`counter`, `hit_count`, timers, health
    /// latches) and re-seeds timer-interrupt countdowns from the new
    /// graph's declared periods, then walks the new entry through the full
    /// exit pipeline — nested phase changes and random resolution included.
    pub(crate) fn enter_phase<H: Host>(
        &mut self,
        phase: PhaseId,
        cause: Cause,
        host:  &mut H,
        depth: u8,
    ) {
        self.current_phase = phase;
        self.current_node = None;
        self.counter = 0;
        self.hit_count = 0;
        self.state_timer = 0.0;
        self.move_complete = false;

        let (countdowns, health_count, entry) = {
            let graph = self.phases.graph(phase);
            let countdowns: Vec<f32> = graph
                .interrupts()
                .timers
                .iter()
                .map(|&id| match graph.interrupt(id) {
                    bgx_graph::Interrupt::Timer { period_secs, .. } => *period_secs,
                    _ => f32::INFINITY,
                })
                .collect();
            (countdowns, graph.interrupts().health.len(), graph.entry())
        };
        self.timer_countdowns = countdowns;
        self.health_fired = vec![false; health_count];

        tracing::debug!(phase = %self.phases.name(phase), "entering phase");

        self.walk_exit(entry, 0, cause, true, host, depth);

        if self.active && self.current_node.is_none() {
            tracing::error!(
                phase = %self.phases.name(phase),
                "phase entry selected no behavioral node; deactivating actor"
            );
            self.deactivate();
        }
    }
}
