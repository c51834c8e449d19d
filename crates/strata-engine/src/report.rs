//! Human-readable domain report.

use std::fmt;
use strata_core::Rank;
use strata_space::Aabb;

/// The global box and one rank's subdomain, for diagnostics.
///
/// Renders as:
///
/// ```text
/// Domain:
/// Box:
///     X: -5 to 5
///     Y: -5 to 5
///     Z: 0 to 100
/// Subdomain: Rank 1
///     X: -5 to 5
///     Y: -5 to 5
///     Z: 25 to 50
/// ```
///
/// (axis lines are tab-indented).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainReport {
    /// The global box.
    pub global: Aabb,
    /// Rank the subdomain belongs to.
    pub rank: Rank,
    /// That rank's subdomain.
    pub subdomain: Aabb,
}

impl DomainReport {
    /// Create a report.
    pub fn new(global: Aabb, rank: Rank, subdomain: Aabb) -> Self {
        Self {
            global,
            rank,
            subdomain,
        }
    }
}

impl fmt::Display for DomainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Domain:")?;
        writeln!(f, "Box:")?;
        write!(f, "{}", self.global)?;
        writeln!(f, "Subdomain: Rank {}", self.rank)?;
        write!(f, "{}", self.subdomain)
    }
}
