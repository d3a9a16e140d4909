//! Neighbor evaluation shared by the local searches.

use rayon::prelude::*;

use crate::encoding::ResourceOrder;
use crate::graph::{DecodeError, DisjunctiveGraph};
use crate::neighborhood::Swap;

/// Makespan of `order` after each swap, in swap order.
///
/// Each candidate re-links one machine of `graph` (the graph of `order`).
/// With `parallel`, candidates are spread over the rayon pool; the output
/// order is the same either way.
pub(super) fn evaluate_swaps(
    graph: &DisjunctiveGraph<'_>,
    order: &ResourceOrder,
    swaps: &[Swap],
    parallel: bool,
) -> Result<Vec<i64>, DecodeError> {
    let evaluate = |swap: &Swap| {
        graph
            .swapped(order, swap.machine, swap.first, swap.second)
            .makespan()
    };
    if parallel {
        swaps.par_iter().map(evaluate).collect()
    } else {
        swaps.iter().map(evaluate).collect()
    }
}

/// Index and value of the smallest makespan; the first one on ties.
pub(super) fn select_best(makespans: &[i64]) -> Option<(usize, i64)> {
    makespans
        .iter()
        .copied()
        .enumerate()
        .min_by_key(|&(_, makespan)| makespan)
}
