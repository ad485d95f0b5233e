//! paddock — smallest example for the npc behavior engine.
//!
//! A 40×30 field with a handful of creatures wired to the stock behaviors:
//! a hero the player would steer, a wandering cow, a wolf that chases the
//! hero, a rabbit that flees the wolf, a guide that pauses to chat, and a
//! magpie that steals a gem.  Two barn rectangles occlude line of sight.
//! Every behavior event is recorded to a CSV for inspection.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use npc_behavior::{ChaseTask, CompassWanderTask, FleeTask, PauseTask, StealTask, WanderTask};
use npc_core::{Rect, SimConfig, Tick, Vec2};
use npc_sim::{CsvEventRecorder, SimBuilder, SimObserver};
use npc_task::TaskScheduler;
use npc_world::{AgentStore, HintCatalog, ItemRegistry, ObstacleField};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:           u64 = 42;
const DT_SECS:        f32 = 1.0 / 30.0;
const TOTAL_TICKS:    u64 = 3_600; // two minutes of game time
const PROGRESS_TICKS: u64 = 600;

const WALK:  f32 = 1.2;
const TROT:  f32 = 2.0;
const SNEAK: f32 = 0.8;

// ── Progress observer ─────────────────────────────────────────────────────────

struct ProgressObserver {
    updated_total: u64,
}

impl SimObserver for ProgressObserver {
    fn on_tick_end(&mut self, tick: Tick, updated: usize, _agents: &AgentStore) {
        self.updated_total += updated as u64;
        if (tick.0 + 1) % PROGRESS_TICKS == 0 {
            println!("  tick {:>5} / {TOTAL_TICKS}", tick.0 + 1);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== paddock — npc behavior engine ===");
    println!("Ticks: {TOTAL_TICKS}  |  dt: {DT_SECS:.4} s  |  Seed: {SEED}");
    println!();

    // 1. Populate the field.  Half-sizes give each creature a footprint so
    //    centers (not corners) drive distance checks.
    let mut store = AgentStore::new();
    let hero   = store.add_agent(Vec2::new(20.0, 15.0), Vec2::new(0.5, 0.5));
    let cow    = store.add_agent(Vec2::new(8.0, 22.0), Vec2::new(1.0, 0.7));
    let wolf   = store.add_agent(Vec2::new(34.0, 4.0), Vec2::new(0.6, 0.4));
    let rabbit = store.add_agent(Vec2::new(30.0, 8.0), Vec2::new(0.2, 0.2));
    let guide  = store.add_agent(Vec2::new(12.0, 6.0), Vec2::new(0.5, 0.5));
    let gem    = store.add_agent(Vec2::new(25.0, 25.0), Vec2::new(0.1, 0.1));
    let magpie = store.add_agent(Vec2::new(5.0, 28.0), Vec2::new(0.2, 0.2));

    let mut items = ItemRegistry::new();
    items.register(gem);

    let mut hints = HintCatalog::new(vec!["...".to_string()]);
    hints.set(
        guide,
        vec![
            "Welcome to the paddock.".to_string(),
            "Mind the wolf by the barns.".to_string(),
        ],
    );

    // 2. One scheduler per agent, in id order.  The hero wanders so the
    //    others have something to react to; the gem carrier just sits there.
    let schedulers = vec![
        TaskScheduler::new().with_task(WanderTask::new(Vec2::new(30.0, 20.0), 1.5, WALK)),
        TaskScheduler::new().with_task(CompassWanderTask::new(Vec2::new(10.0, 8.0), 3.0, WALK)),
        TaskScheduler::new()
            .with_task(WanderTask::new(Vec2::new(8.0, 8.0), 2.0, WALK))
            .with_task(ChaseTask::new(hero, 10, 6.0, 10.0, TROT)),
        TaskScheduler::new()
            .with_task(WanderTask::new(Vec2::new(6.0, 6.0), 1.0, WALK))
            .with_task(FleeTask::new(wolf, 20, 5.0, 9.0, TROT)),
        TaskScheduler::new().with_task(PauseTask::new(hero, 15, 1.5, 4.0, 6.0, SNEAK)),
        TaskScheduler::new(),
        TaskScheduler::new().with_task(StealTask::new(4.0, 6.0, TROT)),
    ];

    // 3. Two barns block sight lines across the middle of the field.
    let barns = ObstacleField::new([
        Rect::new(Vec2::new(14.0, 10.0), Vec2::new(18.0, 14.0)),
        Rect::new(Vec2::new(24.0, 16.0), Vec2::new(29.0, 19.0)),
    ]);
    println!("Obstacles: {} barns", barns.obstacle_count());

    // 4. Events go to a CSV next to the binary.
    std::fs::create_dir_all("output/paddock")?;
    let csv_path = Path::new("output/paddock/events.csv");
    let recorder = CsvEventRecorder::create(csv_path)?;

    let config = SimConfig { dt_secs: DT_SECS, total_ticks: TOTAL_TICKS, seed: SEED };
    let mut sim = SimBuilder::new(config, store)
        .schedulers(schedulers)
        .items(items)
        .sensing(barns)
        .hints(hints)
        .events(recorder)
        .build()?;

    // 5. Run.
    let t0 = Instant::now();
    let mut observer = ProgressObserver { updated_total: 0 };
    sim.run(&mut observer);
    let elapsed = t0.elapsed();
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  agent updates: {}", observer.updated_total);

    // 6. Final positions and loot.
    println!();
    println!("{:<8} {:<20} {:<6}", "Agent", "Position", "Items");
    println!("{}", "-".repeat(36));
    let names = [
        (hero, "hero"),
        (cow, "cow"),
        (wolf, "wolf"),
        (rabbit, "rabbit"),
        (guide, "guide"),
        (gem, "gem"),
        (magpie, "magpie"),
    ];
    for (agent, name) in names {
        if !sim.store().is_alive(agent) {
            println!("{name:<8} {:<20} {:<6}", "(gone)", "");
            continue;
        }
        let pos = sim.store().position(agent);
        let loot = sim.store().inventory(agent).len();
        println!("{name:<8} ({:>6.2}, {:>6.2})     {loot:<6}", pos.x, pos.y);
    }

    // 7. Event tally from the recorded CSV.
    sim.into_events().finish()?;
    let contents = std::fs::read_to_string(csv_path)?;
    let mut tally: BTreeMap<String, usize> = BTreeMap::new();
    for line in contents.lines().skip(1) {
        if let Some(event) = line.splitn(3, ',').nth(2) {
            // Payload-carrying events are quoted; the leading word is the kind.
            let kind = event
                .split(|c: char| !c.is_ascii_alphanumeric())
                .find(|s| !s.is_empty())
                .unwrap_or(event);
            *tally.entry(kind.to_string()).or_default() += 1;
        }
    }
    println!();
    println!("Events recorded to {}:", csv_path.display());
    for (kind, count) in &tally {
        println!("  {kind:<18} {count}");
    }

    Ok(())
}
