//! Test utilities and mock collaborators for Strata development.
//!
//! Provides mock implementations of the collaborator traits
//! ([`PositionSource`], [`HasPosition`]), deterministic position scattering,
//! and a one-call tracing subscriber for tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;
use std::sync::Once;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use strata_core::{EntityIndex, HasPosition, PositionSource, Vec3};

/// Sparse body storage keyed by entity index.
///
/// Unlike a `Vec<Vec3>`, indices may have gaps, which lets tests exercise
/// the missing-entity path. Populate with [`insert`](MockBodyStore::insert).
#[derive(Debug, Default)]
pub struct MockBodyStore {
    positions: HashMap<EntityIndex, Vec3>,
}

impl MockBodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or move) an entity.
    pub fn insert(&mut self, index: usize, position: Vec3) {
        self.positions.insert(EntityIndex(index), position);
    }

    /// Remove an entity; later lookups return `None`.
    pub fn remove(&mut self, index: usize) -> Option<Vec3> {
        self.positions.remove(&EntityIndex(index))
    }

    /// Stored indices in ascending order.
    pub fn indices(&self) -> Vec<EntityIndex> {
        let mut out: Vec<EntityIndex> = self.positions.keys().copied().collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl PositionSource for MockBodyStore {
    fn position(&self, index: EntityIndex) -> Option<Vec3> {
        self.positions.get(&index).copied()
    }
}

/// A body handle carrying only a position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MockBody {
    pub id: u64,
    pub pos: Vec3,
}

impl MockBody {
    pub fn new(id: u64, pos: Vec3) -> Self {
        Self { id, pos }
    }

    /// Point at `coord` on the Z axis, zero elsewhere.
    pub fn on_z(id: u64, coord: f64) -> Self {
        Self::new(id, Vec3::new(0.0, 0.0, coord))
    }
}

impl HasPosition for MockBody {
    fn position(&self) -> Vec3 {
        self.pos
    }
}

/// `count` positions drawn uniformly from `[lo, hi)` per axis.
///
/// Every axis must have `hi > lo`.
///
/// Deterministic for a given `seed`, so every rank in a multi-rank test
/// scatters the same bodies.
pub fn scatter_positions(seed: u64, count: usize, lo: Vec3, hi: Vec3) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.random_range(lo.x..hi.x),
                rng.random_range(lo.y..hi.y),
                rng.random_range(lo.z..hi.z),
            )
        })
        .collect()
}

static TRACING: Once = Once::new();

/// Install a test-writer `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
