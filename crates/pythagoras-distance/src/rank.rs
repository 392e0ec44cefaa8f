//! Ranking of targets by distance from a source token.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DistanceResult, GridConfig, Token, measure};

/// How a ranking orders its pairs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankOrder {
    /// Nearest first by Euclidean distance. Ties keep target order.
    #[default]
    Euclidean,
    /// Targets in the order they were given.
    Insertion,
}

/// One measured (source, target) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedPair<'a> {
    /// The token distances are measured from.
    pub source: &'a Token,
    /// The token distances are measured to.
    pub target: &'a Token,
    /// All three measurements for this pair.
    pub distances: DistanceResult,
}

/// Measure `source` against every target and order the pairs.
///
/// Every pair is fully measured before any ordering happens. An empty
/// `targets` slice yields an empty ranking.
pub fn rank_targets<'a>(
    source: &'a Token,
    targets: &'a [Token],
    grid: &GridConfig,
    order: RankOrder,
) -> Vec<RankedPair<'a>> {
    let mut pairs: Vec<RankedPair<'a>> = targets
        .iter()
        .map(|target| RankedPair {
            source,
            target,
            distances: measure(source.position, target.position, grid),
        })
        .collect();

    if order == RankOrder::Euclidean {
        // Stable, so equidistant targets stay in their given order.
        pairs.sort_by(|a, b| a.distances.euclid.total_cmp(&b.distances.euclid));
    }
    pairs
}
