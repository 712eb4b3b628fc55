use crate::{Blackboard, Scheduler, SchedulerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrainConfig {
    pub think_every_ticks: u32,
    pub think_offset_ticks: u32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            think_every_ticks: 1,
            think_offset_ticks: 0,
        }
    }
}

impl BrainConfig {
    /// Spreads agents that think every `think_every_ticks` across ticks by their id.
    pub fn staggered(agent_id: u64, think_every_ticks: u32) -> Self {
        let every = think_every_ticks.max(1);
        let offset = (agent_id % (every as u64)) as u32;
        Self {
            think_every_ticks: every,
            think_offset_ticks: offset,
        }
    }

    pub fn should_think(&self, tick: u64) -> bool {
        let every = self.think_every_ticks.max(1) as u64;
        ((tick + (self.think_offset_ticks as u64)) % every) == 0
    }
}

/// One agent: a blackboard plus the schedulers that share it.
///
/// Schedulers run in registration order within a tick. Delta from ticks skipped by
/// [`BrainConfig`] is carried into the next thinking tick.
pub struct Brain {
    pub config: BrainConfig,
    pub blackboard: Blackboard,
    schedulers: Vec<Box<dyn Scheduler>>,
    tick: u64,
    pending_dt: f32,
}

impl Default for Brain {
    fn default() -> Self {
        Self::new()
    }
}

impl Brain {
    pub fn new() -> Self {
        Self {
            config: BrainConfig::default(),
            blackboard: Blackboard::new(),
            schedulers: Vec::new(),
            tick: 0,
            pending_dt: 0.0,
        }
    }

    pub fn with_config(mut self, config: BrainConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_scheduler(mut self, scheduler: impl Scheduler) -> Self {
        self.add_scheduler(Box::new(scheduler));
        self
    }

    /// Returns the scheduler's index.
    pub fn add_scheduler(&mut self, scheduler: Box<dyn Scheduler>) -> usize {
        self.schedulers.push(scheduler);
        self.schedulers.len() - 1
    }

    pub fn scheduler(&self, index: usize) -> Option<&dyn Scheduler> {
        self.schedulers.get(index).map(|s| s.as_ref())
    }

    pub fn schedulers(&self) -> impl Iterator<Item = &dyn Scheduler> {
        self.schedulers.iter().map(|s| s.as_ref())
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn tick(&mut self, dt_seconds: f32) -> Result<(), SchedulerError> {
        let tick = self.tick;
        self.tick += 1;
        self.pending_dt += dt_seconds;

        if !self.config.should_think(tick) {
            return Ok(());
        }

        let dt = std::mem::take(&mut self.pending_dt);
        for scheduler in self.schedulers.iter_mut() {
            scheduler.update(dt, &mut self.blackboard)?;
        }
        Ok(())
    }
}
