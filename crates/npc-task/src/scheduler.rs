//! Per-agent priority arbitration.

use npc_core::AgentId;
use npc_world::Event;

use crate::{Priority, Task, TaskCtx, TaskStatus};

/// Ordered task list plus the arbitration loop that runs one of them per tick.
///
/// Registration order is the tie-break key: when two tasks bid the same
/// priority, the earlier-registered one wins.  Each update:
///
/// 1. collect every task's bid (an erroring bid counts as `NONE`);
/// 2. pick the highest eligible bid, earliest registration on ties;
/// 3. if the winner differs from the incumbent, `stop` the incumbent first,
///    then `start` the winner;
/// 4. `update` the active task;
/// 5. if the active task reports `Inactive`, clear the active slot.
///
/// Step 3's ordering is what keeps shared collaborators (overlays, movement
/// state) consistent across a preemption: the outgoing task releases before
/// the incoming one acquires.
#[derive(Default)]
pub struct TaskScheduler {
    tasks: Vec<Box<dyn Task>>,
    active: Option<usize>,
    /// Set after the first update in which nothing was eligible, so the idle
    /// event fires once per idle stretch rather than every tick.
    idled: bool,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task, keeping builder-style chaining available.
    pub fn with_task(mut self, task: impl Task + 'static) -> Self {
        self.add_task(task);
        self
    }

    pub fn add_task(&mut self, task: impl Task + 'static) {
        self.tasks.push(Box::new(task));
    }

    /// Bind every registered task to `owner`.  Called once at wiring time.
    pub fn bind(&mut self, owner: AgentId) {
        for task in &mut self.tasks {
            task.bind(owner);
        }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Index of the currently active task, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Run one arbitration round and update the winner.
    pub fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        let winner = self.select(ctx);

        if winner != self.active {
            if let Some(old) = self.active {
                self.tasks[old].stop(ctx);
            }
            self.active = winner;
            match winner {
                Some(new) => {
                    self.idled = false;
                    self.tasks[new].start(ctx);
                }
                None => {
                    if !self.idled {
                        self.idled = true;
                        ctx.trigger(Event::Idle);
                    }
                }
            }
        } else if winner.is_none() && !self.idled {
            self.idled = true;
            ctx.trigger(Event::Idle);
        }

        if let Some(current) = self.active {
            self.tasks[current].update(ctx);
            if self.tasks[current].status() == TaskStatus::Inactive {
                self.active = None;
            }
        }
    }

    /// Highest eligible bidder, earliest registration on ties.
    fn select(&self, ctx: &TaskCtx<'_>) -> Option<usize> {
        let mut best: Option<(usize, Priority)> = None;
        for (index, task) in self.tasks.iter().enumerate() {
            let bid = task.priority(ctx).unwrap_or(Priority::NONE);
            if !bid.is_eligible() {
                continue;
            }
            // Strict comparison keeps the earliest index on equal bids.
            if best.is_none_or(|(_, top)| bid > top) {
                best = Some((index, bid));
            }
        }
        best.map(|(index, _)| index)
    }
}
