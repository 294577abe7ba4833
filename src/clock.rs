//! Fixed-tick scheduling over virtual milliseconds.
//!
//! [`Scheduler`] is a plain one-shot timer queue with no cancellation.
//! [`Simulation`] registers the periodic game tasks on it and re-arms each one
//! after it runs, unless the task found the game over, in which case it simply
//! is not re-armed.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::config::GameConfig;
use crate::game::{Game, Step};
use crate::surface::Surface;

/// Everything the clock can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Task {
    Update,
    MoveBullets,
    Shoot,
    Spawn,
    /// One-shot, armed by the tick that ends the game
    ClosePrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due_ms: u64,
    /// Registration order breaks ties between tasks due at the same instant
    seq: u64,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` once at `due_ms`.
    pub fn schedule(&mut self, due_ms: u64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry { due_ms, seq, task }));
    }

    /// Pops the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, Task)> {
        let due = self
            .queue
            .peek()
            .is_some_and(|Reverse(entry)| entry.due_ms <= now_ms);
        if !due {
            return None;
        }
        self.queue
            .pop()
            .map(|Reverse(entry)| (entry.due_ms, entry.task))
    }

    pub fn is_scheduled(&self, task: Task) -> bool {
        self.queue.iter().any(|Reverse(entry)| entry.task == task)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// A game plus the clock that drives it.
pub struct Simulation<S: Surface> {
    game: Game<S>,
    scheduler: Scheduler,
    now_ms: u64,
}

impl<S: Surface> Simulation<S> {
    /// Registers every periodic task, all first due immediately.
    pub fn new(game: Game<S>) -> Self {
        let mut scheduler = Scheduler::new();
        for task in [Task::Update, Task::MoveBullets, Task::Shoot, Task::Spawn] {
            scheduler.schedule(0, task);
        }
        Self {
            game,
            scheduler,
            now_ms: 0,
        }
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game<S> {
        &mut self.game
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Moves the clock forward by `elapsed_ms` from where it stands.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.advance_to(self.now_ms.saturating_add(elapsed_ms));
    }

    /// Runs every task due up to `target_ms`, in due order.
    pub fn advance_to(&mut self, target_ms: u64) {
        while let Some((due_ms, task)) = self.scheduler.pop_due(target_ms) {
            self.now_ms = self.now_ms.max(due_ms);
            self.run(task);
        }
        self.now_ms = self.now_ms.max(target_ms);
    }

    fn run(&mut self, task: Task) {
        let step = match task {
            Task::Update => self.game.update(),
            Task::MoveBullets => self.game.move_bullets(),
            Task::Shoot => self.game.shoot(),
            Task::Spawn => self.game.spawn_wave(),
            Task::ClosePrompt => {
                self.game.show_close_prompt();
                return;
            }
        };

        let config = self.game.config();
        match step {
            Step::Advanced => {
                if let Some(period_ms) = period_ms(config, task) {
                    self.scheduler.schedule(self.now_ms + period_ms, task);
                }
            }
            Step::GameOver => {
                log::debug!("{:?} ended the game at {} ms", task, self.now_ms);
                let due_ms = self.now_ms + config.close_prompt_delay_ms;
                self.scheduler.schedule(due_ms, Task::ClosePrompt);
            }
            Step::Frozen => log::trace!("{:?} stopped, game is over", task),
        }
    }
}

/// Re-arm interval of a periodic task; None for one-shots.
fn period_ms(config: &GameConfig, task: Task) -> Option<u64> {
    match task {
        Task::Update => Some(config.update_period_ms),
        Task::MoveBullets => Some(config.bullet_period_ms),
        Task::Shoot => Some(config.shoot_period_ms),
        Task::Spawn => Some(config.spawn_period_ms),
        Task::ClosePrompt => None,
    }
}
