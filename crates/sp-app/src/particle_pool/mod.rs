//! Object pool for particle descriptors.
//! 粒子描述对象池。
//!
//! Descriptors are handed out by value. The pool remembers which ids are
//! checked out and keeps one bounded free list per category; a descriptor
//! only goes back on a free list if it was checked out from this pool.

mod batches;

use std::collections::{HashMap, HashSet};

use sp_core::config::ParticlePoolConfig;
use sp_core::metrics::rate;
use sp_core::particle::{
    Bounds, ParticleCategory, ParticleConfig, ParticleDescriptor, ParticleId, PoolStats, Position,
};
use sp_core::ports::RandomSourcePort;
use tracing::debug;

/// What happened to a descriptor handed back through
/// [`ParticlePool::return_particle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// Reset and pushed onto its category's free list.
    Pooled,
    /// Free list was full; the descriptor was dropped.
    Discarded,
    /// Not checked out from this pool (double return or unpooled).
    NotActive,
}

pub struct ParticlePool {
    config: ParticlePoolConfig,
    random: Box<dyn RandomSourcePort>,
    free: HashMap<ParticleCategory, Vec<ParticleDescriptor>>,
    active: HashSet<ParticleId>,
    next_id: u64,
    total_created: u64,
    total_reused: u64,
}

impl ParticlePool {
    pub fn new(config: ParticlePoolConfig, random: Box<dyn RandomSourcePort>) -> Self {
        Self {
            config,
            random,
            free: empty_free_lists(),
            active: HashSet::new(),
            next_id: 0,
            total_created: 0,
            total_reused: 0,
        }
    }

    /// Check out a descriptor for `config.category` (default `star`).
    ///
    /// Reuses the most recently returned descriptor of that category when
    /// one is free, overwriting the fields `config` carries.
    pub fn get_particle(&mut self, config: ParticleConfig) -> ParticleDescriptor {
        let category = config.category_or_default();

        let descriptor = match self.free.get_mut(&category).and_then(Vec::pop) {
            Some(mut reused) => {
                reused.apply(config);
                self.total_reused += 1;
                reused
            }
            None => {
                let id = self.allocate_id();
                self.total_created += 1;
                ParticleDescriptor::from_config(id, config)
            }
        };

        self.active.insert(descriptor.id());
        descriptor
    }

    pub fn return_particle(&mut self, mut descriptor: ParticleDescriptor) -> ReturnOutcome {
        if !self.active.remove(&descriptor.id()) {
            return ReturnOutcome::NotActive;
        }

        let cap = self.config.per_category_cap();
        let free = self.free.entry(descriptor.category()).or_default();
        if free.len() >= cap {
            return ReturnOutcome::Discarded;
        }

        descriptor.reset();
        free.push(descriptor);
        ReturnOutcome::Pooled
    }

    /// Batch for `category`. Categories without a batch constructor
    /// (nebula, constellation) yield nothing.
    pub fn create_batch(
        &mut self,
        category: ParticleCategory,
        count: usize,
        bounds: Bounds,
    ) -> Vec<ParticleDescriptor> {
        match category {
            ParticleCategory::Star => self.create_star_batch(count, bounds),
            ParticleCategory::Orb => self.create_orb_batch(count, bounds),
            ParticleCategory::ShootingTrail => self.create_shooting_batch(count, bounds),
            ParticleCategory::Nebula | ParticleCategory::Constellation => Vec::new(),
        }
    }

    /// Descriptors built without touching the free lists or the active set.
    ///
    /// Used when pooling is switched off. They carry only a category and a
    /// random position; handing them back is a no-op.
    pub fn create_unpooled_batch(
        &mut self,
        category: ParticleCategory,
        count: usize,
        bounds: Bounds,
    ) -> Vec<ParticleDescriptor> {
        (0..count)
            .map(|_| {
                let position = Position::new(
                    self.random.next_f64() * bounds.width,
                    self.random.next_f64() * bounds.height,
                );
                let id = self.allocate_id();
                ParticleDescriptor::from_config(
                    id,
                    ParticleConfig::new(category).with_position(position),
                )
            })
            .collect()
    }

    pub fn get_stats(&self) -> PoolStats {
        PoolStats {
            total_created: self.total_created,
            total_reused: self.total_reused,
            active_particles: self.active.len(),
            pooled_particles: self.free.values().map(Vec::len).sum(),
            reuse_rate: rate(self.total_reused, self.total_created + self.total_reused),
        }
    }

    /// Drop every free list and forget every checked-out id.
    ///
    /// Descriptors still held by consumers become unknown to the pool, so
    /// returning them later is a no-op.
    pub fn clear_pools(&mut self) {
        self.free = empty_free_lists();
        self.active.clear();
        self.total_created = 0;
        self.total_reused = 0;
    }

    /// Trim each free list to half its cap. Returns how many were dropped.
    pub fn optimize_pools(&mut self) -> usize {
        let target = self.config.idle_target();
        let mut dropped = 0;
        for (category, free) in self.free.iter_mut() {
            if free.len() > target {
                dropped += free.len() - target;
                free.truncate(target);
                debug!(%category, target, "Trimmed particle free list");
            }
        }
        dropped
    }

    pub fn free_len(&self, category: ParticleCategory) -> usize {
        self.free.get(&category).map_or(0, Vec::len)
    }

    pub fn is_active(&self, id: ParticleId) -> bool {
        self.active.contains(&id)
    }

    pub fn config(&self) -> &ParticlePoolConfig {
        &self.config
    }

    fn allocate_id(&mut self) -> ParticleId {
        self.next_id += 1;
        ParticleId::new(self.next_id)
    }
}

fn empty_free_lists() -> HashMap<ParticleCategory, Vec<ParticleDescriptor>> {
    ParticleCategory::ALL
        .into_iter()
        .map(|category| (category, Vec::new()))
        .collect()
}
