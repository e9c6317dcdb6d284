//! Bounded trajectory history for mass points.

use crate::config::TrailConfig;
use crate::float::Float;
use crate::vec::Vec2;
use alloc::vec::Vec;

/// Ring buffer of past positions; once full, each new sample replaces the
/// oldest.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail<F: Float> {
    samples: Vec<Vec2<F>>,
    capacity: usize,
    next: usize,
}

impl<F: Float> Trail<F> {
    pub fn new(capacity: usize) -> Self {
        Trail { samples: Vec::with_capacity(capacity), capacity, next: 0 }
    }

    pub fn push(&mut self, position: Vec2<F>) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() < self.capacity {
            self.samples.push(position);
        } else {
            self.samples[self.next] = position;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.next = 0;
    }

    pub fn len(&self) -> usize { self.samples.len() }
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }
    pub fn capacity(&self) -> usize { self.capacity }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Vec2<F>> + '_ {
        let split = if self.samples.len() < self.capacity { 0 } else { self.next };
        let (newer, older) = self.samples.split_at(split);
        older.iter().chain(newer.iter()).copied()
    }

    pub fn latest(&self) -> Option<Vec2<F>> {
        if self.samples.is_empty() {
            return None;
        }
        let idx = (self.next + self.capacity - 1) % self.capacity;
        self.samples.get(idx).copied()
    }
}

/// One [`Trail`] per mass point, sampled every few frames.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailSet<F: Float> {
    trails: Vec<Trail<F>>,
    sample_every: u64,
}

impl<F: Float> TrailSet<F> {
    pub fn new(points: usize, config: TrailConfig) -> Self {
        TrailSet {
            trails: (0..points).map(|_| Trail::new(config.capacity)).collect(),
            sample_every: config.sample_every,
        }
    }

    /// Record `positions` if `frame` falls on the sampling period.
    pub fn record(&mut self, frame: u64, positions: impl Iterator<Item = Vec2<F>>) {
        if self.sample_every == 0 || frame % self.sample_every != 0 {
            return;
        }
        for (trail, pos) in self.trails.iter_mut().zip(positions) {
            trail.push(pos);
        }
    }

    pub fn get(&self, index: usize) -> Option<&Trail<F>> {
        self.trails.get(index)
    }

    pub fn clear(&mut self) {
        self.trails.iter_mut().for_each(Trail::clear);
    }
}
