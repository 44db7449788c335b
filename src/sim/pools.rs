//! Entity pools
//!
//! Every pool is a flat ordered `Vec`. Removal during a pass always walks
//! indices in descending order so earlier indices stay valid.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{BurstParticle, LaserBeam};
use crate::consts::*;

/// Default particle cap when settings don't say otherwise
pub const MAX_PARTICLES: usize = 512;

/// Flat, ordered entity container
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Remove and return the entry at `index`, keeping order
    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Walk from the last entry to the first, dropping those where `f` returns true.
    /// Returns how many were removed.
    pub fn remove_where(&mut self, mut f: impl FnMut(&mut T) -> bool) -> usize {
        let mut removed = 0;
        for i in (0..self.items.len()).rev() {
            if f(&mut self.items[i]) {
                self.items.remove(i);
                removed += 1;
            }
        }
        removed
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Burst particle pool with a size cap (oldest evicted first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstPool {
    pub particles: Pool<BurstParticle>,
    pub cap: usize,
}

impl Default for BurstPool {
    fn default() -> Self {
        Self::with_cap(MAX_PARTICLES)
    }
}

impl BurstPool {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            particles: Pool::new(),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Throw a ball of debris out of `pos`
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, pos: Vec3, color: u32) {
        if self.cap == 0 {
            return;
        }
        for _ in 0..BURST_COUNT {
            if self.particles.len() >= self.cap {
                self.particles.remove(0);
            }
            let vel = Vec3::new(
                (rng.random::<f32>() - 0.5) * 2.0,
                rng.random::<f32>() * 1.2,
                (rng.random::<f32>() - 0.5) * 2.0,
            );
            let life = 0.65 + rng.random::<f32>() * 0.35;
            self.particles.push(BurstParticle {
                pos,
                vel,
                life,
                ttl: life,
                color,
            });
        }
    }

    /// Age every particle, dropping the spent ones
    pub fn update(&mut self, dt: f32) {
        self.particles.remove_where(|p| {
            p.life -= dt;
            if p.life <= 0.0 {
                return true;
            }
            p.pos += p.vel * (dt * 4.0);
            false
        });
    }
}

/// Age beams, dropping expired ones
pub fn update_lasers(lasers: &mut Pool<LaserBeam>, dt: f32) {
    lasers.remove_where(|beam| {
        beam.ttl -= dt;
        beam.ttl <= 0.0
    });
}
