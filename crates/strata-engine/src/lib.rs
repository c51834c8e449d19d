//! Per-rank domain partitioning for distributed Strata simulations.
//!
//! Provides the stateful [`DomainPartitioner`] that each rank builds once
//! at setup: it validates its [`PartitionerConfig`], splits the global
//! domain exactly once, and then answers classification queries for the
//! rest of the run. [`DomainReport`] renders the split for diagnostics and
//! [`ExchangePlan`] groups entities by region state for the exchange layer.
//!
//! Nothing here communicates with other ranks. Consistency depends on every
//! rank being configured with identical bounds, rank count, and ghost width.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod exchange;
pub mod partitioner;
pub mod report;

pub use config::PartitionerConfig;
pub use exchange::{ExchangePlan, PlanSummary};
pub use partitioner::DomainPartitioner;
pub use report::DomainReport;
