//! The per-rank domain partitioner.
//!
//! [`DomainPartitioner`] owns the one-time split of the global domain and
//! answers classification queries against it. The split is guarded: once
//! [`set_domain`](DomainPartitioner::set_domain) succeeds, any further
//! attempt fails with [`PartitionError::AlreadySplit`] and leaves the
//! existing partition untouched.

use crate::config::PartitionerConfig;
use crate::report::DomainReport;
use strata_core::{
    Axis, ClassifyError, EntityIndex, HasPosition, PartitionError, PositionSource, Rank,
    RankTopology, RegionState, Vec3,
};
use strata_space::{Aabb, Partition, RegionClassifier};

/// Largest ghost width that keeps classification unambiguous, if any
/// neighbours exist.
///
/// Interior slabs lose a strip on both faces, so the halo must stay below
/// half a slab; with two ranks each slab only loses one face.
fn ghost_width_limit(rank_count: u32, slab_width: f64) -> Option<f64> {
    match rank_count {
        0 | 1 => None,
        2 => Some(slab_width),
        _ => Some(slab_width / 2.0),
    }
}

fn unsplit() -> RegionState {
    tracing::error!("classification requested before domain split");
    RegionState::Undefined
}

/// Splits the global domain among ranks and classifies positions for
/// this rank.
///
/// # Examples
///
/// ```
/// use strata_core::{Axis, RegionState, Vec3};
/// use strata_engine::{DomainPartitioner, PartitionerConfig};
///
/// let mut dp = DomainPartitioner::new(PartitionerConfig::new(1, 4, 1.0)).unwrap();
/// dp.set_domain(Vec3::new(-5.0, -5.0, 0.0), Vec3::new(5.0, 5.0, 100.0)).unwrap();
///
/// assert_eq!(dp.split_axis().unwrap(), Axis::Z);
/// assert_eq!(dp.classify_point(&Vec3::new(0.0, 0.0, 30.0)), RegionState::Owned);
/// assert_eq!(dp.classify_point(&Vec3::new(0.0, 0.0, 50.0)), RegionState::GhostUp);
///
/// // The split happens exactly once.
/// assert!(dp.set_domain(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct DomainPartitioner {
    config: PartitionerConfig,
    split: Option<Split>,
}

#[derive(Clone, Debug)]
struct Split {
    partition: Partition,
    classifier: RegionClassifier,
}

impl DomainPartitioner {
    /// Create an unsplit partitioner.
    ///
    /// Returns the first configuration error from
    /// [`PartitionerConfig::validate`].
    pub fn new(config: PartitionerConfig) -> Result<Self, PartitionError> {
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "invalid partitioner configuration");
            return Err(e);
        }
        Ok(Self {
            config,
            split: None,
        })
    }

    /// Create an unsplit partitioner taking rank identity from `topology`.
    pub fn from_topology(
        topology: &dyn RankTopology,
        ghost_width: f64,
    ) -> Result<Self, PartitionError> {
        Self::new(PartitionerConfig::from_topology(topology, ghost_width))
    }

    /// The configuration this partitioner was built with.
    pub fn config(&self) -> &PartitionerConfig {
        &self.config
    }

    /// This process's rank.
    pub fn rank(&self) -> Rank {
        self.config.rank
    }

    /// `true` once the domain has been split.
    pub fn is_split(&self) -> bool {
        self.split.is_some()
    }

    /// Set the global domain `[lo, hi)` and split it among the ranks.
    ///
    /// Fails with [`PartitionError::AlreadySplit`] if called a second time,
    /// and with [`PartitionError::InvalidExtent`] or
    /// [`PartitionError::NonFiniteBound`] for a degenerate box. Every error
    /// here is fatal: the caller must not continue the run.
    pub fn set_domain(&mut self, lo: Vec3, hi: Vec3) -> Result<(), PartitionError> {
        if self.split.is_some() {
            tracing::error!(rank = self.config.rank.0, "attempted to re-split domain");
            return Err(PartitionError::AlreadySplit);
        }
        let built = Aabb::new(lo, hi)
            .and_then(|global| Partition::build(global, self.config.rank_count))
            .and_then(|partition| {
                RegionClassifier::new(&partition, self.config.rank, self.config.ghost_width)
                    .map(|classifier| Split {
                        partition,
                        classifier,
                    })
            });
        let split = match built {
            Ok(split) => split,
            Err(e) => {
                tracing::error!(rank = self.config.rank.0, error = %e, "invalid domain");
                return Err(e);
            }
        };

        let width = split.partition.slab_width();
        if let Some(limit) = ghost_width_limit(self.config.rank_count, width) {
            if self.config.ghost_width >= limit {
                tracing::warn!(
                    ghost_width = self.config.ghost_width,
                    slab_width = width,
                    limit,
                    "ghost width too large for slab; classification may be ambiguous"
                );
            }
        }
        let empty: Vec<u32> = split.partition.empty_slabs().map(|r| r.0).collect();
        if !empty.is_empty() {
            tracing::warn!(
                slab_width = width,
                ranks = ?empty,
                "slab width below float spacing; some ranks own an empty slab"
            );
        }
        let (low, high) = split.classifier.interval();
        tracing::info!(
            rank = self.config.rank.0,
            rank_count = self.config.rank_count,
            axis = %split.partition.split_axis(),
            slab_width = width,
            low,
            high,
            "domain split"
        );
        self.split = Some(split);
        Ok(())
    }

    /// Per-axis form of [`set_domain`](Self::set_domain).
    pub fn set_sim_domain(
        &mut self,
        xlo: f64,
        xhi: f64,
        ylo: f64,
        yhi: f64,
        zlo: f64,
        zhi: f64,
    ) -> Result<(), PartitionError> {
        self.set_domain(Vec3::new(xlo, ylo, zlo), Vec3::new(xhi, yhi, zhi))
    }

    fn built(&self) -> Result<&Split, PartitionError> {
        self.split.as_ref().ok_or(PartitionError::NotSplit)
    }

    /// The full partition table.
    pub fn partition(&self) -> Result<&Partition, PartitionError> {
        self.built().map(|s| &s.partition)
    }

    /// Axis the domain was split along.
    pub fn split_axis(&self) -> Result<Axis, PartitionError> {
        self.built().map(|s| s.partition.split_axis())
    }

    /// The global box.
    pub fn global_domain(&self) -> Result<Aabb, PartitionError> {
        self.built().map(|s| *s.partition.global())
    }

    /// `(lo, hi)` corners of `rank`'s subdomain.
    pub fn subdomain_bounds(&self, rank: Rank) -> Result<(Vec3, Vec3), PartitionError> {
        let sub = self.built()?.partition.subdomain(rank)?;
        Ok((sub.lo(), sub.hi()))
    }

    /// This rank's subdomain.
    pub fn local_subdomain(&self) -> Result<Aabb, PartitionError> {
        self.built()?
            .partition
            .subdomain(self.config.rank)
            .copied()
    }

    /// A copyable classifier for this rank, for handing to worker threads.
    pub fn classifier(&self) -> Result<RegionClassifier, PartitionError> {
        self.built().map(|s| s.classifier)
    }

    /// Classify a split-axis coordinate.
    ///
    /// Returns [`RegionState::Undefined`] (and logs an error) if no rule
    /// matched or the domain has not been split.
    pub fn classify(&self, coord: f64) -> RegionState {
        match &self.split {
            Some(s) => s.classifier.classify_coord(coord),
            None => unsplit(),
        }
    }

    fn active(&self) -> Result<&RegionClassifier, ClassifyError> {
        self.split
            .as_ref()
            .map(|s| &s.classifier)
            .ok_or(ClassifyError::NotSplit)
    }

    /// Classify a split-axis coordinate, reporting `Undefined` as an error.
    pub fn try_classify(&self, coord: f64) -> Result<RegionState, ClassifyError> {
        self.active()?.try_classify_coord(coord)
    }

    /// Classify a 3-D point by its split-axis component.
    pub fn classify_point(&self, point: &Vec3) -> RegionState {
        match &self.split {
            Some(s) => s.classifier.classify_point(point),
            None => unsplit(),
        }
    }

    /// Classify a body handle by its current position.
    pub fn classify_body<B: HasPosition + ?Sized>(&self, body: &B) -> RegionState {
        self.classify_point(&body.position())
    }

    /// Like [`classify_point`](Self::classify_point), reporting `Undefined`
    /// or an unsplit domain as an error.
    pub fn try_classify_point(&self, point: &Vec3) -> Result<RegionState, ClassifyError> {
        self.active()?.try_classify_point(point)
    }

    /// Like [`classify_body`](Self::classify_body), reporting `Undefined`
    /// or an unsplit domain as an error.
    pub fn try_classify_body<B: HasPosition + ?Sized>(
        &self,
        body: &B,
    ) -> Result<RegionState, ClassifyError> {
        self.active()?.try_classify_body(body)
    }

    /// Classify the entity at `index` in `positions`.
    pub fn classify_entity<S: PositionSource + ?Sized>(
        &self,
        positions: &S,
        index: EntityIndex,
    ) -> Result<RegionState, ClassifyError> {
        self.active()?.classify_entity(positions, index)
    }

    /// Like [`classify_entity`](Self::classify_entity), also reporting
    /// `Undefined` as an error.
    pub fn try_classify_entity<S: PositionSource + ?Sized>(
        &self,
        positions: &S,
        index: EntityIndex,
    ) -> Result<RegionState, ClassifyError> {
        self.active()?.try_classify_entity(positions, index)
    }

    /// Snapshot of the global box and this rank's subdomain.
    pub fn report(&self) -> Result<DomainReport, PartitionError> {
        let s = self.built()?;
        Ok(DomainReport::new(
            *s.partition.global(),
            self.config.rank,
            *s.partition.subdomain(self.config.rank)?,
        ))
    }

    /// Render the domain report as text.
    pub fn describe_domain(&self) -> Result<String, PartitionError> {
        self.report().map(|r| r.to_string())
    }

    /// Emit the domain report at info level. Does nothing before the split.
    pub fn log_domain(&self) {
        if let Ok(report) = self.report() {
            tracing::info!(rank = self.config.rank.0, "\n{report}");
        }
    }
}
