//! Unit and scenario tests for the composite behaviors.

use npc_core::{AgentId, AgentRng, GameClock, Vec2};
use npc_task::{Priority, Task, TaskCtx, TaskStatus};
use npc_world::{
    AgentStore, Event, HintCatalog, ItemRegistry, OpenField, RecordingOverlay, RecordingSink,
    SensingPort,
};

/// World fixture with swappable sensing; `ctx(agent)` borrows everything into
/// a `TaskCtx` for one call.
struct Fixture {
    clock: GameClock,
    rng: AgentRng,
    store: AgentStore,
    items: ItemRegistry,
    sensing: Box<dyn SensingPort>,
    events: RecordingSink,
    overlay: RecordingOverlay,
    hints: HintCatalog,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            clock: GameClock::new(0.1),
            rng: AgentRng::new(42, AgentId(0)),
            store: AgentStore::new(),
            items: ItemRegistry::new(),
            sensing: Box::new(OpenField),
            events: RecordingSink::new(),
            overlay: RecordingOverlay::new(),
            hints: HintCatalog::default(),
        }
    }

    fn add_agent(&mut self, position: Vec2) -> AgentId {
        self.store.add_agent(position, Vec2::ZERO)
    }

    fn ctx(&mut self, agent: AgentId) -> TaskCtx<'_> {
        TaskCtx {
            agent,
            clock: &self.clock,
            rng: &mut self.rng,
            store: &mut self.store,
            items: &mut self.items,
            sensing: &*self.sensing,
            events: &mut self.events,
            overlay: &mut self.overlay,
            hints: &self.hints,
        }
    }

    /// Update `task` for `agent` once and advance time.
    fn step(&mut self, agent: AgentId, task: &mut dyn Task) {
        self.store.begin_tick();
        task.update(&mut self.ctx(agent));
        self.clock.advance();
    }
}

#[cfg(test)]
mod wander {
    use super::*;
    use crate::{CompassWanderTask, WanderIdleTask, WanderTask};
    use npc_core::Rect;

    #[test]
    fn spawn_pause_plays_once() {
        let mut fixture = Fixture::new();
        let agent = fixture.add_agent(Vec2::ZERO);
        let mut task = WanderTask::new(Vec2::new(4.0, 4.0), 0.5, 1.0);
        task.bind(agent);

        task.start(&mut fixture.ctx(agent));
        assert_eq!(fixture.events.count(Event::SpawnStart), 1);

        // Agent holds still through the spawn pause.
        for _ in 0..10 {
            fixture.step(agent, &mut task);
        }
        assert_eq!(fixture.store.position(agent), Vec2::ZERO);

        task.stop(&mut fixture.ctx(agent));
        task.start(&mut fixture.ctx(agent));
        assert_eq!(fixture.events.count(Event::SpawnStart), 1);
    }

    #[test]
    fn stays_inside_the_wander_rectangle() {
        let mut fixture = Fixture::new();
        let agent = fixture.add_agent(Vec2::ZERO);
        let rect = Rect::centered(Vec2::ZERO, Vec2::new(4.0, 4.0));
        let mut task = WanderTask::new(Vec2::new(4.0, 4.0), 0.2, 2.0);
        task.bind(agent);

        task.start(&mut fixture.ctx(agent));
        for _ in 0..1_000 {
            fixture.step(agent, &mut task);
            let pos = fixture.store.position(agent);
            assert!(rect.contains(pos), "agent escaped to {pos}");
        }
        // Sanity: the agent did actually move around.
        assert!(fixture.events.count(Event::WanderLeft) + fixture.events.count(Event::WanderRight) > 5);
    }

    #[test]
    fn leg_direction_is_relative_to_anchor() {
        let mut fixture = Fixture::new();
        let agent = fixture.add_agent(Vec2::ZERO);
        let mut task = WanderTask::new(Vec2::new(4.0, 4.0), 0.2, 2.0);
        task.bind(agent);

        task.start(&mut fixture.ctx(agent));
        for _ in 0..200 {
            fixture.step(agent, &mut task);
        }
        // Over many legs both directions show up.
        assert!(fixture.events.count(Event::WanderLeft) > 0);
        assert!(fixture.events.count(Event::WanderRight) > 0);
    }

    #[test]
    fn idle_task_announces_then_times_out() {
        let mut fixture = Fixture::new();
        let agent = fixture.add_agent(Vec2::ZERO);
        let mut task = WanderIdleTask::new(0.25);
        task.bind(agent);

        task.start(&mut fixture.ctx(agent));
        assert_eq!(fixture.events.count(Event::Idle), 1);
        assert_eq!(task.status(), TaskStatus::Active);

        fixture.step(agent, &mut task);
        fixture.step(agent, &mut task);
        assert_eq!(task.status(), TaskStatus::Active);
        fixture.step(agent, &mut task);
        assert_eq!(task.status(), TaskStatus::Inactive);
        assert_eq!(fixture.events.count(Event::Idle), 1);
    }

    #[test]
    fn compass_variant_emits_run_headings() {
        let mut fixture = Fixture::new();
        let agent = fixture.add_agent(Vec2::ZERO);
        let mut task = CompassWanderTask::new(Vec2::new(4.0, 4.0), 0.2, 2.0);
        task.bind(agent);

        task.start(&mut fixture.ctx(agent));
        for _ in 0..300 {
            fixture.step(agent, &mut task);
        }
        let runs = fixture
            .events
            .log
            .iter()
            .filter(|(_, e)| matches!(e, Event::Run(_)))
            .count();
        assert!(runs > 0, "no run-direction events over 300 ticks");
    }
}

#[cfg(test)]
mod pursuit {
    use super::*;
    use crate::{ChaseTask, FleeTask, PullTask};
    use npc_world::Blindfold;

    #[test]
    fn chase_hysteresis_band() {
        let mut fixture = Fixture::new();
        let chaser = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(6.0, 0.0));
        let mut task = ChaseTask::new(target, 10, 5.0, 8.0, 1.0);
        task.bind(chaser);

        // Inside the band but not yet chasing: not eligible.
        assert_eq!(task.priority(&fixture.ctx(chaser)).unwrap(), Priority::NONE);

        // Close enough to engage.
        fixture.store.set_position(target, Vec2::new(3.0, 0.0));
        assert_eq!(task.priority(&fixture.ctx(chaser)).unwrap(), Priority(10));
        task.start(&mut fixture.ctx(chaser));

        // Back inside the band while chasing: still eligible.
        fixture.store.set_position(target, Vec2::new(6.0, 0.0));
        assert_eq!(task.priority(&fixture.ctx(chaser)).unwrap(), Priority(10));

        // Past the give-up distance: drops out.
        fixture.store.set_position(target, Vec2::new(9.0, 0.0));
        assert_eq!(task.priority(&fixture.ctx(chaser)).unwrap(), Priority::NONE);
    }

    #[test]
    fn chase_requires_line_of_sight() {
        let mut fixture = Fixture::new();
        fixture.sensing = Box::new(Blindfold);
        let chaser = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(1.0, 0.0));
        let mut task = ChaseTask::new(target, 10, 5.0, 8.0, 1.0);
        task.bind(chaser);

        assert_eq!(task.priority(&fixture.ctx(chaser)).unwrap(), Priority::NONE);
    }

    #[test]
    fn chase_closes_on_a_moving_target() {
        let mut fixture = Fixture::new();
        let chaser = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(3.0, 0.0));
        let mut task = ChaseTask::new(target, 10, 5.0, 8.0, 2.0);
        task.bind(chaser);

        task.start(&mut fixture.ctx(chaser));
        let before = fixture.store.position(chaser).distance(fixture.store.position(target));
        for _ in 0..10 {
            fixture.step(chaser, &mut task);
            // Target drifts away slower than the chaser moves.
            let t = fixture.store.position(target);
            fixture.store.set_position(target, t + Vec2::new(0.05, 0.0));
        }
        let after = fixture.store.position(chaser).distance(fixture.store.position(target));
        assert!(after < before, "chaser did not gain ground: {before} -> {after}");
        assert_eq!(fixture.events.count(Event::ChaseStart), 1);
    }

    #[test]
    fn flee_runs_to_the_mirror_point() {
        let mut fixture = Fixture::new();
        let runner = fixture.add_agent(Vec2::ZERO);
        let threat = fixture.add_agent(Vec2::new(1.0, 0.0));
        let mut task = FleeTask::new(threat, 10, 3.0, 6.0, 2.0);
        task.bind(runner);

        task.start(&mut fixture.ctx(runner));
        for _ in 0..10 {
            fixture.step(runner, &mut task);
        }
        let pos = fixture.store.position(runner);
        assert!(pos.x < 0.0, "runner fled the wrong way: {pos}");
        assert_eq!(fixture.events.count(Event::FleeStart), 1);
    }

    #[test]
    fn flee_gives_up_when_sight_breaks() {
        let mut fixture = Fixture::new();
        let runner = fixture.add_agent(Vec2::ZERO);
        let threat = fixture.add_agent(Vec2::new(1.0, 0.0));
        let mut task = FleeTask::new(threat, 10, 3.0, 6.0, 2.0);
        task.bind(runner);

        assert_eq!(task.priority(&fixture.ctx(runner)).unwrap(), Priority(10));
        task.start(&mut fixture.ctx(runner));

        // The threat is still well inside the give-up distance, but an unseen
        // threat is no threat at all.
        fixture.sensing = Box::new(Blindfold);
        assert_eq!(task.priority(&fixture.ctx(runner)).unwrap(), Priority::NONE);
    }

    #[test]
    fn pull_drags_the_target_inward() {
        let mut fixture = Fixture::new();
        let puller = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(2.0, 0.0));
        let mut task = PullTask::new(target, 10, 4.5, 3.0, 4.0);
        task.bind(puller);

        assert_eq!(task.priority(&fixture.ctx(puller)).unwrap(), Priority(10));
        task.start(&mut fixture.ctx(puller));
        for _ in 0..3 {
            fixture.step(puller, &mut task);
        }
        let pulled = fixture.store.position(target);
        // 4.0 units/s * 0.1 s * 3 ticks = 1.2 closer.
        assert!((pulled.x - 0.8).abs() < 1e-3, "target at {pulled}");
        // Puller itself never moved.
        assert_eq!(fixture.store.position(puller), Vec2::ZERO);

        fixture.store.set_position(target, Vec2::new(5.0, 0.0));
        assert_eq!(task.priority(&fixture.ctx(puller)).unwrap(), Priority::NONE);
    }

    #[test]
    fn pull_reaches_only_inside_the_pull_radius() {
        let mut fixture = Fixture::new();
        let puller = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(4.0, 0.0));
        let mut task = PullTask::new(target, 10, 4.5, 3.0, 4.0);
        task.bind(puller);

        // In view, so the task bids; out of pull range, so nothing moves.
        assert_eq!(task.priority(&fixture.ctx(puller)).unwrap(), Priority(10));
        task.start(&mut fixture.ctx(puller));
        fixture.step(puller, &mut task);
        assert_eq!(fixture.store.position(target), Vec2::new(4.0, 0.0));

        // Once inside the radius the drag kicks in.
        fixture.store.set_position(target, Vec2::new(2.0, 0.0));
        fixture.step(puller, &mut task);
        assert!(fixture.store.position(target).x < 2.0);
    }

    #[test]
    fn pull_requires_line_of_sight() {
        let mut fixture = Fixture::new();
        fixture.sensing = Box::new(Blindfold);
        let puller = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(2.0, 0.0));
        let mut task = PullTask::new(target, 10, 4.5, 3.0, 4.0);
        task.bind(puller);

        assert_eq!(task.priority(&fixture.ctx(puller)).unwrap(), Priority::NONE);
    }
}

#[cfg(test)]
mod arbitration {
    use super::*;
    use crate::{ChaseTask, WanderTask};
    use npc_task::TaskScheduler;

    fn wander_chase_scheduler(target: AgentId) -> TaskScheduler {
        TaskScheduler::new()
            .with_task(WanderTask::new(Vec2::new(2.0, 2.0), 0.5, 1.0))
            .with_task(ChaseTask::new(target, 10, 5.0, 8.0, 0.5))
    }

    #[test]
    fn chase_preempts_wander_and_hands_back() {
        let mut fixture = Fixture::new();
        let npc = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(20.0, 0.0));
        let mut scheduler = wander_chase_scheduler(target);
        scheduler.bind(npc);

        // Far target: wandering only.
        for _ in 0..5 {
            fixture.store.begin_tick();
            scheduler.update(&mut fixture.ctx(npc));
            fixture.clock.advance();
        }
        assert_eq!(fixture.events.count(Event::ChaseStart), 0);
        assert_eq!(fixture.events.count(Event::WanderStart), 1);

        // Target steps inside the view distance: chase takes over.
        let near = fixture.store.position(npc) + Vec2::new(3.0, 0.0);
        fixture.store.set_position(target, near);
        fixture.store.begin_tick();
        scheduler.update(&mut fixture.ctx(npc));
        fixture.clock.advance();
        assert_eq!(fixture.events.count(Event::ChaseStart), 1);

        // In the hysteresis band: chase keeps running.
        let banded = fixture.store.position(npc) + Vec2::new(6.0, 0.0);
        fixture.store.set_position(target, banded);
        fixture.store.begin_tick();
        scheduler.update(&mut fixture.ctx(npc));
        fixture.clock.advance();
        assert_eq!(fixture.events.count(Event::WanderStart), 1, "wander restarted inside the band");

        // Past the give-up distance: wander resumes.
        let gone = fixture.store.position(npc) + Vec2::new(9.0, 0.0);
        fixture.store.set_position(target, gone);
        fixture.store.begin_tick();
        scheduler.update(&mut fixture.ctx(npc));
        fixture.clock.advance();
        assert_eq!(fixture.events.count(Event::WanderStart), 2);
    }

    #[test]
    fn band_distance_never_engages_a_cold_chase() {
        let mut fixture = Fixture::new();
        let npc = fixture.add_agent(Vec2::ZERO);
        // Between view (5) and give-up (8) from the start.
        let target = fixture.add_agent(Vec2::new(6.0, 0.0));
        let mut scheduler = wander_chase_scheduler(target);
        scheduler.bind(npc);

        for _ in 0..40 {
            fixture.store.begin_tick();
            scheduler.update(&mut fixture.ctx(npc));
            fixture.clock.advance();
            // Keep the target parked in the band relative to the wanderer.
            let parked = fixture.store.position(npc) + Vec2::new(6.0, 0.0);
            fixture.store.set_position(target, parked);
        }
        assert_eq!(fixture.events.count(Event::ChaseStart), 0);
        assert_eq!(fixture.events.count(Event::WanderStart), 1);
    }
}

#[cfg(test)]
mod stalk {
    use super::*;
    use crate::StalkTask;

    #[test]
    fn only_senses_a_still_target() {
        let mut fixture = Fixture::new();
        let bear = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(2.0, 0.0));
        let mut task = StalkTask::new(target, 8, 5.0, Vec2::new(3.0, 3.0), 0.3, 1.0);
        task.bind(bear);

        fixture.store.begin_tick();
        assert_eq!(task.priority(&fixture.ctx(bear)).unwrap(), Priority(8));

        // A moving target vanishes from its senses.
        fixture.store.set_position(target, Vec2::new(2.1, 0.0));
        assert_eq!(task.priority(&fixture.ctx(bear)).unwrap(), Priority::NONE);

        // Standing still again restores the scent.
        fixture.store.begin_tick();
        assert_eq!(task.priority(&fixture.ctx(bear)).unwrap(), Priority(8));
    }

    #[test]
    fn far_target_is_ignored() {
        let mut fixture = Fixture::new();
        let bear = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(50.0, 0.0));
        let mut task = StalkTask::new(target, 8, 5.0, Vec2::new(3.0, 3.0), 0.3, 1.0);
        task.bind(bear);

        fixture.store.begin_tick();
        assert_eq!(task.priority(&fixture.ctx(bear)).unwrap(), Priority::NONE);
    }
}

#[cfg(test)]
mod avoid {
    use super::*;
    use crate::AvoidTask;
    use npc_world::Blindfold;

    #[test]
    fn retreats_while_the_threat_is_close() {
        let mut fixture = Fixture::new();
        let agent = fixture.add_agent(Vec2::ZERO);
        let threat = fixture.add_agent(Vec2::new(2.0, 0.0));
        let mut task = AvoidTask::new(threat, 12, 3.0, 4.0, 1.0);
        task.bind(agent);

        assert_eq!(task.priority(&fixture.ctx(agent)).unwrap(), Priority(12));

        task.start(&mut fixture.ctx(agent));
        assert_eq!(fixture.events.count(Event::AvoidStart), 1);
        for _ in 0..5 {
            fixture.step(agent, &mut task);
        }
        // Threat to the east, so the escape leg heads west.
        assert!(fixture.store.position(agent).x < 0.0);

        // Outside the trigger distance the bid drops to the sentinel.
        fixture.store.set_position(threat, Vec2::new(20.0, 0.0));
        assert_eq!(task.priority(&fixture.ctx(agent)).unwrap(), Priority::NONE);
    }

    #[test]
    fn unseen_threat_is_not_avoided() {
        let mut fixture = Fixture::new();
        fixture.sensing = Box::new(Blindfold);
        let agent = fixture.add_agent(Vec2::ZERO);
        let threat = fixture.add_agent(Vec2::new(2.0, 0.0));
        let mut task = AvoidTask::new(threat, 12, 3.0, 4.0, 1.0);
        task.bind(agent);

        assert_eq!(task.priority(&fixture.ctx(agent)).unwrap(), Priority::NONE);
    }

    #[test]
    fn overlapping_threat_falls_back_east() {
        let mut fixture = Fixture::new();
        let agent = fixture.add_agent(Vec2::new(5.0, 5.0));
        let threat = fixture.add_agent(Vec2::new(5.0, 5.0));
        let mut task = AvoidTask::new(threat, 12, 3.0, 4.0, 1.0);
        task.bind(agent);

        task.start(&mut fixture.ctx(agent));
        fixture.step(agent, &mut task);
        let pos = fixture.store.position(agent);
        assert!(pos.x > 5.0, "expected an eastward step, got {pos}");
        assert!((pos.y - 5.0).abs() < 1e-6);
    }
}

#[cfg(test)]
mod ranged {
    use super::*;
    use crate::{ProjectileTask, RangedChaseTask, ShootTask, SkirmishTask};
    use npc_core::{Compass8, Rect};
    use npc_world::Blindfold;

    #[test]
    fn ranged_chase_always_fires_the_first_shot() {
        let mut fixture = Fixture::new();
        let boss = fixture.add_agent(Vec2::ZERO);
        // Target well outside fire range (2.0) but inside view.
        let target = fixture.add_agent(Vec2::new(4.0, 0.0));
        let mut task = RangedChaseTask::new(target, 10, 5.0, 8.0, 2.0, 1.0, 1.0);
        task.bind(boss);

        task.start(&mut fixture.ctx(boss));
        fixture.step(boss, &mut task);
        assert_eq!(fixture.events.count(Event::ShotFired), 1);

        // Still out of range and on cooldown: no second shot.
        fixture.step(boss, &mut task);
        assert_eq!(fixture.events.count(Event::ShotFired), 1);
    }

    #[test]
    fn shoot_task_honors_its_cooldown() {
        let mut fixture = Fixture::new();
        let turret = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(1.0, 0.0));
        let mut task = ShootTask::new(target, 10, 3.0, 0.25);
        task.bind(turret);

        task.start(&mut fixture.ctx(turret));
        for _ in 0..10 {
            fixture.step(turret, &mut task);
        }
        // Shots at t = 0.0, 0.3, 0.6, 0.9 with dt 0.1.
        assert_eq!(fixture.events.count(Event::ShotFired), 4);
    }

    #[test]
    fn shoot_task_fires_blind() {
        let mut fixture = Fixture::new();
        fixture.sensing = Box::new(Blindfold);
        let turret = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(3.0, 0.0));
        let mut task = ShootTask::new(target, 10, 3.0, 0.25);
        task.bind(turret);

        // A lobbed shot needs proximity, not line of sight; the boundary
        // distance still counts as in range.
        assert_eq!(task.priority(&fixture.ctx(turret)).unwrap(), Priority(10));

        fixture.store.set_position(target, Vec2::new(3.1, 0.0));
        assert_eq!(task.priority(&fixture.ctx(turret)).unwrap(), Priority::NONE);
    }

    #[test]
    fn skirmisher_retreats_within_bounds() {
        let mut fixture = Fixture::new();
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let griffin = fixture.add_agent(Vec2::new(1.0, 5.0));
        let target = fixture.add_agent(Vec2::new(2.0, 5.0));
        let mut task = SkirmishTask::new(target, 10, 6.0, bounds, 2.0, 4.0, 1.0);
        task.bind(griffin);

        task.start(&mut fixture.ctx(griffin));
        for _ in 0..40 {
            fixture.step(griffin, &mut task);
            let pos = fixture.store.position(griffin);
            assert!(bounds.contains(pos), "skirmisher escaped to {pos}");
        }
        // Retreated away from the target, pinned at the west wall.
        assert!(fixture.store.position(griffin).x < 1.0);
    }

    #[test]
    fn skirmisher_fires_when_the_target_is_out_of_range() {
        let mut fixture = Fixture::new();
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let griffin = fixture.add_agent(Vec2::new(50.0, 50.0));
        let target = fixture.add_agent(Vec2::new(58.0, 50.0));
        // Long cooldown; the shots below come from the range rule.
        let mut task = SkirmishTask::new(target, 10, 6.0, bounds, 0.0, 4.0, 100.0);
        task.bind(griffin);

        task.start(&mut fixture.ctx(griffin));
        for _ in 0..3 {
            fixture.step(griffin, &mut task);
        }
        assert_eq!(fixture.events.count(Event::ShotFired), 3);
    }

    #[test]
    fn projectile_flies_and_disposes_itself() {
        let mut fixture = Fixture::new();
        let shot = fixture.add_agent(Vec2::ZERO);
        let mut task = ProjectileTask::new(Vec2::new(0.5, 0.0), 10, 1.0);
        task.bind(shot);

        task.start(&mut fixture.ctx(shot));
        assert_eq!(
            fixture.events.events_for(shot),
            vec![Event::ProjectileMove { heading: Compass8::East }]
        );

        for _ in 0..6 {
            fixture.step(shot, &mut task);
        }
        assert!(!fixture.store.is_alive(shot));
        assert_eq!(fixture.events.count(Event::ProjectileDone), 1);
        assert_eq!(task.priority(&fixture.ctx(shot)).unwrap(), Priority::NONE);
    }
}

#[cfg(test)]
mod pause {
    use super::*;
    use crate::PauseTask;

    fn pause_task(target: AgentId) -> PauseTask {
        // pause 1 < view 4 < disengage 6, speed 1.
        PauseTask::new(target, 10, 1.0, 4.0, 6.0, 1.0)
    }

    #[test]
    fn approaches_then_pauses_with_an_overlay() {
        let mut fixture = Fixture::new();
        let npc = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(3.0, 0.0));
        let mut task = pause_task(target);
        task.bind(npc);

        task.start(&mut fixture.ctx(npc));
        for _ in 0..25 {
            fixture.step(npc, &mut task);
        }
        assert_eq!(fixture.events.count(Event::Paused), 1);
        assert_eq!(fixture.overlay.open_count(), 1);
        // Walked up to the pause ring and stopped there.
        let gap = fixture.store.position(npc).distance(fixture.store.position(target));
        assert!(gap <= 1.05, "npc stopped {gap} away");
    }

    #[test]
    fn walking_away_dismisses_the_overlay() {
        let mut fixture = Fixture::new();
        let npc = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(0.5, 0.0));
        let mut task = pause_task(target);
        task.bind(npc);

        task.start(&mut fixture.ctx(npc));
        fixture.step(npc, &mut task);
        assert_eq!(fixture.overlay.open_count(), 1);

        fixture.store.set_position(target, Vec2::new(3.0, 0.0));
        fixture.step(npc, &mut task);
        assert_eq!(fixture.overlay.open_count(), 0);
        assert_eq!(fixture.events.count(Event::PauseEnd), 1);
    }

    #[test]
    fn preemption_dismisses_the_overlay() {
        let mut fixture = Fixture::new();
        let npc = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(0.5, 0.0));
        let mut task = pause_task(target);
        task.bind(npc);

        task.start(&mut fixture.ctx(npc));
        fixture.step(npc, &mut task);
        assert_eq!(fixture.overlay.open_count(), 1);

        task.stop(&mut fixture.ctx(npc));
        assert_eq!(fixture.overlay.open_count(), 0);
        assert_eq!(fixture.events.count(Event::PauseEnd), 1);
    }

    #[test]
    fn disengage_band_keeps_a_running_pause_eligible() {
        let mut fixture = Fixture::new();
        let npc = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(5.0, 0.0));
        let mut task = pause_task(target);
        task.bind(npc);

        // Cold at 5.0 (> view 4): not eligible.
        assert_eq!(task.priority(&fixture.ctx(npc)).unwrap(), Priority::NONE);

        fixture.store.set_position(target, Vec2::new(3.0, 0.0));
        task.start(&mut fixture.ctx(npc));
        fixture.store.set_position(target, Vec2::new(5.0, 0.0));
        // Running at 5.0 (< disengage 6): still eligible.
        assert_eq!(task.priority(&fixture.ctx(npc)).unwrap(), Priority(10));

        fixture.store.set_position(target, Vec2::new(7.0, 0.0));
        assert_eq!(task.priority(&fixture.ctx(npc)).unwrap(), Priority::NONE);
    }
}

#[cfg(test)]
mod items {
    use super::*;
    use crate::{ItemPickupTask, TimedUseTask};

    #[test]
    fn pickup_transfers_once_and_goes_inert() {
        let mut fixture = Fixture::new();
        let observer = fixture.add_agent(Vec2::ZERO);
        let item_agent = fixture.add_agent(Vec2::new(0.5, 0.0));
        let item = fixture.items.register(item_agent);

        let mut task = ItemPickupTask::new(observer, item, 5, 1.0);
        task.bind(item_agent);
        task.start(&mut fixture.ctx(item_agent));

        fixture.step(item_agent, &mut task);
        assert_eq!(fixture.events.count(Event::PromptShown), 1);

        fixture.store.signal(item_agent);
        fixture.step(item_agent, &mut task);
        assert!(task.is_taken());
        assert_eq!(fixture.store.inventory(observer), &[item]);
        assert!(fixture.items.is_empty());
        assert!(!fixture.store.is_alive(item_agent));
        assert_eq!(fixture.events.count(Event::ItemPickedUp { item }), 1);
        assert_eq!(fixture.overlay.open_count(), 0);

        // A second activation changes nothing.
        fixture.store.signal(item_agent);
        fixture.step(item_agent, &mut task);
        assert_eq!(fixture.store.inventory(observer), &[item]);
        assert_eq!(fixture.events.count(Event::ItemPickedUp { item }), 1);
    }

    #[test]
    fn signal_out_of_range_does_nothing() {
        let mut fixture = Fixture::new();
        let observer = fixture.add_agent(Vec2::ZERO);
        let item_agent = fixture.add_agent(Vec2::new(10.0, 0.0));
        let item = fixture.items.register(item_agent);

        let mut task = ItemPickupTask::new(observer, item, 5, 1.0);
        task.bind(item_agent);
        task.start(&mut fixture.ctx(item_agent));

        fixture.store.signal(item_agent);
        fixture.step(item_agent, &mut task);
        assert!(!task.is_taken());
        assert_eq!(fixture.items.len(), 1);
    }

    #[test]
    fn timed_use_applies_and_expires() {
        let mut fixture = Fixture::new();
        let eater = fixture.add_agent(Vec2::ZERO);
        let item_agent = fixture.add_agent(Vec2::new(0.2, 0.0));
        let item = fixture.items.register(item_agent);

        let mut task = TimedUseTask::new(item, 5, 0.5);
        task.bind(eater);

        // Nothing pending: not eligible.
        assert_eq!(task.priority(&fixture.ctx(eater)).unwrap(), Priority::NONE);

        fixture.store.signal(eater);
        assert_eq!(task.priority(&fixture.ctx(eater)).unwrap(), Priority(5));
        task.start(&mut fixture.ctx(eater));
        fixture.step(eater, &mut task);

        assert!(task.is_effect_active());
        assert!(fixture.items.is_empty());
        assert!(!fixture.store.is_alive(item_agent));
        assert_eq!(fixture.events.count(Event::EffectApplied), 1);

        for _ in 0..6 {
            fixture.step(eater, &mut task);
        }
        assert!(!task.is_effect_active());
        assert_eq!(fixture.events.count(Event::EffectExpired), 1);
        assert_eq!(task.status(), TaskStatus::Inactive);
        assert_eq!(task.priority(&fixture.ctx(eater)).unwrap(), Priority::NONE);
    }
}

#[cfg(test)]
mod steal {
    use super::*;
    use crate::StealTask;

    #[test]
    fn full_cycle_grabs_and_returns_home() {
        let mut fixture = Fixture::new();
        let thief = fixture.add_agent(Vec2::ZERO);
        let carrier = fixture.add_agent(Vec2::new(1.0, 0.0));
        let item = fixture.items.register(carrier);

        let mut task = StealTask::new(0.3, 0.5, 1.0);
        task.bind(thief);
        task.start(&mut fixture.ctx(thief));

        for _ in 0..60 {
            fixture.step(thief, &mut task);
        }

        assert!(fixture.items.is_empty(), "item still registered");
        assert_eq!(fixture.store.inventory(thief), &[item]);
        assert!(!fixture.store.is_alive(carrier));
        assert_eq!(fixture.events.count(Event::ItemStolen { item }), 1);
        // Back home within the arrival tolerance.
        let home_gap = fixture.store.position(thief).distance(Vec2::ZERO);
        assert!(home_gap < 0.1, "thief ended {home_gap} from home");
    }

    #[test]
    fn empty_registry_keeps_waiting() {
        let mut fixture = Fixture::new();
        let thief = fixture.add_agent(Vec2::ZERO);
        let mut task = StealTask::new(0.2, 0.2, 1.0);
        task.bind(thief);
        task.start(&mut fixture.ctx(thief));

        for _ in 0..30 {
            fixture.step(thief, &mut task);
        }
        assert_eq!(fixture.store.position(thief), Vec2::ZERO);
        assert!(fixture.store.inventory(thief).is_empty());
    }

    #[test]
    fn vanished_item_aborts_the_leg() {
        let mut fixture = Fixture::new();
        let thief = fixture.add_agent(Vec2::ZERO);
        let carrier = fixture.add_agent(Vec2::new(2.0, 0.0));
        let item = fixture.items.register(carrier);

        let mut task = StealTask::new(0.2, 10.0, 1.0);
        task.bind(thief);
        task.start(&mut fixture.ctx(thief));

        // Let the seek leg begin, then yank the item away mid-walk.
        for _ in 0..5 {
            fixture.step(thief, &mut task);
        }
        fixture.items.remove(item);
        for _ in 0..30 {
            fixture.step(thief, &mut task);
        }
        assert!(fixture.store.inventory(thief).is_empty());
        assert_eq!(fixture.events.count(Event::ItemStolen { item }), 0);
    }
}

#[cfg(test)]
mod spawn {
    use super::*;
    use crate::{HiveTask, MinionSpawnTask, SpawnTask};

    #[test]
    fn spawn_plays_once_then_yields() {
        let mut fixture = Fixture::new();
        let agent = fixture.add_agent(Vec2::ZERO);
        let mut task = SpawnTask::new(20, 0.3);
        task.bind(agent);

        assert_eq!(task.priority(&fixture.ctx(agent)).unwrap(), Priority(20));
        task.start(&mut fixture.ctx(agent));
        assert_eq!(fixture.events.count(Event::SpawnStart), 1);

        for _ in 0..4 {
            fixture.step(agent, &mut task);
        }
        assert_eq!(task.status(), TaskStatus::Inactive);
        assert_eq!(task.priority(&fixture.ctx(agent)).unwrap(), Priority::NONE);
    }

    #[test]
    fn hive_respects_the_live_ceiling_and_replaces_losses() {
        let mut fixture = Fixture::new();
        let hive = fixture.add_agent(Vec2::new(5.0, 5.0));
        let mut task = HiveTask::new(3, 0.2, 2, Vec2::new(2.0, 2.0));
        task.bind(hive);
        task.start(&mut fixture.ctx(hive));

        for _ in 0..10 {
            fixture.step(hive, &mut task);
        }
        let spawned: Vec<AgentId> = fixture
            .events
            .log
            .iter()
            .filter_map(|(_, e)| match e {
                Event::OffspringSpawned { agent } => Some(*agent),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 2, "hive overshot its ceiling");

        // Losing one offspring frees a slot.
        fixture.store.dispose(spawned[0]);
        for _ in 0..5 {
            fixture.step(hive, &mut task);
        }
        assert_eq!(fixture.events.count(Event::OffspringSpawned { agent: spawned[0] }), 1);
        let total: usize = fixture
            .events
            .log
            .iter()
            .filter(|(_, e)| matches!(e, Event::OffspringSpawned { .. }))
            .count();
        assert_eq!(total, 3);
    }

    #[test]
    fn minion_spawner_caps_out() {
        let mut fixture = Fixture::new();
        let kangaroo = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(1.0, 0.0));
        let mut task = MinionSpawnTask::new(target, 9, 3.0, 5.0, 0.3, 2);
        task.bind(kangaroo);

        assert_eq!(task.priority(&fixture.ctx(kangaroo)).unwrap(), Priority(9));
        task.start(&mut fixture.ctx(kangaroo));
        for _ in 0..20 {
            fixture.step(kangaroo, &mut task);
        }
        assert_eq!(task.spawned_count(), 2);
        let minions = fixture
            .events
            .log
            .iter()
            .filter(|(_, e)| matches!(e, Event::MinionSpawned { .. }))
            .count();
        assert_eq!(minions, 2);

        // Spent spawner stops bidding entirely.
        assert_eq!(task.priority(&fixture.ctx(kangaroo)).unwrap(), Priority::NONE);
    }

    #[test]
    fn minion_spawner_hysteresis() {
        let mut fixture = Fixture::new();
        let kangaroo = fixture.add_agent(Vec2::ZERO);
        let target = fixture.add_agent(Vec2::new(4.0, 0.0));
        let mut task = MinionSpawnTask::new(target, 9, 3.0, 5.0, 0.3, 10);
        task.bind(kangaroo);

        // Cold at 4.0 (> trigger 3): not eligible.
        assert_eq!(task.priority(&fixture.ctx(kangaroo)).unwrap(), Priority::NONE);

        fixture.store.set_position(target, Vec2::new(2.0, 0.0));
        assert_eq!(task.priority(&fixture.ctx(kangaroo)).unwrap(), Priority(9));
        task.start(&mut fixture.ctx(kangaroo));

        // Running at 4.0 (< release 5): still eligible.
        fixture.store.set_position(target, Vec2::new(4.0, 0.0));
        assert_eq!(task.priority(&fixture.ctx(kangaroo)).unwrap(), Priority(9));

        fixture.store.set_position(target, Vec2::new(6.0, 0.0));
        assert_eq!(task.priority(&fixture.ctx(kangaroo)).unwrap(), Priority::NONE);
    }
}
