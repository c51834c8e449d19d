//! Per-step bucketing of entities by region state.
//!
//! The exchange protocol that ships bodies between ranks lives outside
//! this workspace. [`ExchangePlan`] is what it consumes: every local entity
//! index grouped by its [`RegionState`] for one synchronisation step, in
//! the order the entities were visited.

use indexmap::IndexMap;
use std::fmt;
use strata_core::{ClassifyError, EntityIndex, PositionSource, Rank, RegionState};
use strata_space::RegionClassifier;

/// Entity indices grouped by region state for one synchronisation step.
///
/// # Examples
///
/// ```
/// use strata_core::{EntityIndex, Rank, RegionState, Vec3};
/// use strata_engine::ExchangePlan;
/// use strata_space::{Aabb, Partition, RegionClassifier};
///
/// let global = Aabb::from_bounds(0.0, 30.0, 0.0, 1.0, 0.0, 1.0).unwrap();
/// let partition = Partition::build(global, 3).unwrap();
/// let classifier = RegionClassifier::new(&partition, Rank(1), 1.0).unwrap();
///
/// let bodies = vec![Vec3::new(15.0, 0.0, 0.0), Vec3::new(19.5, 0.0, 0.0)];
/// let plan = ExchangePlan::build(&classifier, &bodies, (0..2).map(EntityIndex)).unwrap();
///
/// assert_eq!(plan.entities(RegionState::Owned), &[EntityIndex(0)]);
/// assert_eq!(plan.entities(RegionState::SharedUp), &[EntityIndex(1)]);
/// assert_eq!(plan.send_target(RegionState::SharedUp), Some(Rank(2)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ExchangePlan {
    rank: Rank,
    rank_count: u32,
    buckets: IndexMap<RegionState, Vec<EntityIndex>>,
}

impl ExchangePlan {
    /// Classify every index in `indices` against `positions`.
    ///
    /// Undefined classifications are kept in their own bucket (see
    /// [`undefined`](Self::undefined)) and logged; they are never merged
    /// into another state. Returns `Err(ClassifyError::EntityNotFound)` on
    /// the first index missing from `positions`.
    pub fn build<S, I>(
        classifier: &RegionClassifier,
        positions: &S,
        indices: I,
    ) -> Result<Self, ClassifyError>
    where
        S: PositionSource + ?Sized,
        I: IntoIterator<Item = EntityIndex>,
    {
        let mut plan = Self {
            rank: classifier.rank(),
            rank_count: classifier.rank_count(),
            buckets: IndexMap::new(),
        };
        for index in indices {
            let state = classifier.classify_entity(positions, index)?;
            plan.buckets.entry(state).or_default().push(index);
        }
        let undefined = plan.count(RegionState::Undefined);
        if undefined > 0 {
            tracing::error!(
                rank = plan.rank.0,
                undefined,
                "entities could not be classified"
            );
        }
        tracing::debug!(rank = plan.rank.0, total = plan.total(), "exchange plan built");
        Ok(plan)
    }

    /// Rank the plan was built for.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Indices classified as `state`, in visit order.
    pub fn entities(&self, state: RegionState) -> &[EntityIndex] {
        self.buckets.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of entities classified as `state`.
    pub fn count(&self, state: RegionState) -> usize {
        self.entities(state).len()
    }

    /// Non-empty buckets in the order their state was first encountered.
    ///
    /// Two ranks visiting the same entities in the same order produce the
    /// same sequence, so an exchange layer can pack messages from this
    /// directly.
    pub fn iter(&self) -> impl Iterator<Item = (RegionState, &[EntityIndex])> + '_ {
        self.buckets.iter().map(|(&state, v)| (state, v.as_slice()))
    }

    /// Number of entities classified.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Entities no rule matched. Non-empty means an invariant was broken.
    pub fn undefined(&self) -> &[EntityIndex] {
        self.entities(RegionState::Undefined)
    }

    /// Rank that should receive entities in `state`, if it exists.
    ///
    /// Shared entities go to the neighbour that mirrors them; unowned
    /// entities go to the neighbour they moved towards. Owned, ghost, and
    /// undefined states have no target.
    pub fn send_target(&self, state: RegionState) -> Option<Rank> {
        if state.is_shared() || state.is_unowned() {
            state.neighbour_rank(self.rank, self.rank_count)
        } else {
            None
        }
    }

    /// Per-state counts in [`RegionState::ALL`] order, zero counts included.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            rank: self.rank,
            counts: RegionState::ALL.map(|s| (s, self.count(s))),
        }
    }
}

/// Per-state entity counts for one rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanSummary {
    /// Rank the counts belong to.
    pub rank: Rank,
    /// `(state, count)` for every state.
    pub counts: [(RegionState, usize); 8],
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rank {}:", self.rank)?;
        for (state, n) in self.counts {
            write!(f, " {state}={n}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Vec3;
    use strata_space::{Aabb, Partition};
    use strata_test_utils::{init_tracing, MockBodyStore};

    fn classifier(rank: u32) -> RegionClassifier {
        let global = Aabb::from_bounds(0.0, 1.0, 0.0, 1.0, 0.0, 30.0).unwrap();
        let p = Partition::build(global, 3).unwrap();
        RegionClassifier::new(&p, Rank(rank), 1.0).unwrap()
    }

    fn store(zs: &[f64]) -> MockBodyStore {
        let mut s = MockBodyStore::new();
        for (i, &z) in zs.iter().enumerate() {
            s.insert(i, Vec3::new(0.5, 0.5, z));
        }
        s
    }

    #[test]
    fn buckets_keep_visit_order() {
        init_tracing();
        let s = store(&[15.0, 10.5, 12.0, 20.5, 10.2, 35.0]);
        let plan = ExchangePlan::build(&classifier(1), &s, s.indices()).unwrap();
        assert_eq!(plan.entities(RegionState::Owned), &[EntityIndex(0), EntityIndex(2)]);
        assert_eq!(
            plan.entities(RegionState::SharedDown),
            &[EntityIndex(1), EntityIndex(4)]
        );
        assert_eq!(plan.entities(RegionState::GhostUp), &[EntityIndex(3)]);
        assert_eq!(plan.entities(RegionState::UnownedUp), &[EntityIndex(5)]);
        assert!(plan.entities(RegionState::GhostDown).is_empty());
        assert_eq!(plan.total(), 6);
        assert!(plan.undefined().is_empty());
    }

    #[test]
    fn iter_yields_states_in_first_seen_order() {
        let s = store(&[20.5, 15.0, 10.5, 12.0, 19.5, 20.2]);
        let plan = ExchangePlan::build(&classifier(1), &s, s.indices()).unwrap();
        let order: Vec<_> = plan.iter().map(|(state, ids)| (state, ids.len())).collect();
        assert_eq!(
            order,
            vec![
                (RegionState::GhostUp, 2),
                (RegionState::Owned, 2),
                (RegionState::SharedDown, 1),
                (RegionState::SharedUp, 1),
            ]
        );
        let (_, ghosts) = plan.iter().next().unwrap();
        assert_eq!(ghosts, &[EntityIndex(0), EntityIndex(5)]);
    }

    #[test]
    fn undefined_gets_its_own_bucket() {
        init_tracing();
        let s = store(&[15.0, f64::NAN]);
        let plan = ExchangePlan::build(&classifier(1), &s, s.indices()).unwrap();
        assert_eq!(plan.undefined(), &[EntityIndex(1)]);
        assert_eq!(plan.count(RegionState::Owned), 1);
    }

    #[test]
    fn missing_entity_aborts_build() {
        let s = store(&[15.0]);
        let err = ExchangePlan::build(&classifier(1), &s, [EntityIndex(0), EntityIndex(7)])
            .unwrap_err();
        assert_eq!(
            err,
            ClassifyError::EntityNotFound {
                index: EntityIndex(7)
            }
        );
    }

    #[test]
    fn send_targets_follow_direction() {
        let plan = ExchangePlan::build(&classifier(0), &store(&[]), []).unwrap();
        assert_eq!(plan.send_target(RegionState::SharedUp), Some(Rank(1)));
        assert_eq!(plan.send_target(RegionState::UnownedUp), Some(Rank(1)));
        assert_eq!(plan.send_target(RegionState::UnownedDown), None);
        assert_eq!(plan.send_target(RegionState::GhostUp), None);
        assert_eq!(plan.send_target(RegionState::Owned), None);
    }

    #[test]
    fn summary_lists_every_state() {
        let s = store(&[15.0, 19.5]);
        let plan = ExchangePlan::build(&classifier(1), &s, s.indices()).unwrap();
        let text = plan.summary().to_string();
        assert_eq!(
            text,
            "Rank 1: OWNED=1 SHARED_UP=1 SHARED_DOWN=0 GHOST_UP=0 GHOST_DOWN=0 \
             UNOWNED_UP=0 UNOWNED_DOWN=0 UNDEFINED=0"
        );
    }
}
