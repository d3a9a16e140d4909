//! Nowicki–Smutnicki neighborhood.
//!
//! Restricts swaps to the boundary pairs of critical blocks: the first two
//! and the last two operations of each block. Swapping operations strictly
//! inside a block cannot shorten the current critical path, so this small
//! set keeps every potentially improving single swap on the path.
//!
//! # Reference
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job
//! Shop Problem", Management Science 42(6)

use super::{critical_blocks, Neighborhood, Swap};
use crate::encoding::ResourceOrder;
use crate::models::Operation;

/// Boundary swaps of critical blocks.
///
/// Per block of length `L`: one swap for `L == 2`, two for `L > 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NowickiSmutnicki;

impl Neighborhood for NowickiSmutnicki {
    fn name(&self) -> &'static str {
        "Nowicki-Smutnicki"
    }

    fn swaps_on_path(&self, order: &ResourceOrder, critical_path: &[Operation]) -> Vec<Swap> {
        let mut swaps = Vec::new();
        for block in critical_blocks(order, critical_path) {
            let first = block.first_position;
            let last = block.last_position();
            swaps.push(Swap::new(block.machine, first, first + 1));
            if block.len() > 2 {
                swaps.push(Swap::new(block.machine, last - 1, last));
            }
        }
        swaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DisjunctiveGraph;
    use crate::models::Instance;
    use std::sync::Arc;

    const FT06: &str = "\
6 6
2 1 0 3 1 6 3 7 5 3 4 6
1 8 2 5 4 10 5 10 0 10 3 4
2 5 3 4 5 8 0 9 1 1 4 7
1 5 0 5 2 5 3 3 4 8 5 9
2 9 1 3 4 5 5 4 0 3 3 1
1 3 3 3 5 9 0 10 4 4 2 1
";

    fn ft06_by_job() -> ResourceOrder {
        let inst: Arc<Instance> = Arc::new(FT06.parse().unwrap());
        ResourceOrder::from_dispatch_sequence(Arc::clone(&inst), inst.operations().collect::<Vec<_>>())
    }

    #[test]
    fn test_two_by_two_serial() {
        let inst =
            Arc::new(Instance::from_jobs(vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]]).unwrap());
        let order =
            ResourceOrder::from_dispatch_sequence(Arc::clone(&inst), inst.operations().collect::<Vec<_>>());
        let swaps = NowickiSmutnicki.swaps(&order).unwrap();
        assert_eq!(swaps, vec![Swap::new(1, 0, 1)]);
        let neighbor = swaps[0].apply(&order);
        assert_eq!(neighbor.makespan().unwrap(), 7);
    }

    #[test]
    fn test_long_block_boundaries() {
        // four single-operation jobs on one machine form one block of 4
        let inst = Arc::new(
            Instance::from_jobs(vec![vec![(0, 1)], vec![(0, 2)], vec![(0, 3)], vec![(0, 4)]])
                .unwrap(),
        );
        let order =
            ResourceOrder::from_dispatch_sequence(Arc::clone(&inst), inst.operations().collect::<Vec<_>>());
        let swaps = NowickiSmutnicki.swaps(&order).unwrap();
        assert_eq!(swaps, vec![Swap::new(0, 0, 1), Swap::new(0, 2, 3)]);
    }

    #[test]
    fn test_neighborhood_size_matches_blocks() {
        let order = ft06_by_job();
        let graph = DisjunctiveGraph::new(&order);
        let starts = graph.longest_paths().unwrap();
        let path = graph.critical_path(&starts);
        let expected: usize = critical_blocks(&order, &path)
            .iter()
            .map(|b| if b.len() == 2 { 1 } else { 2 })
            .sum();
        assert_eq!(NowickiSmutnicki.swaps(&order).unwrap().len(), expected);
    }

    #[test]
    fn test_neighbors_parallel_to_swaps() {
        let order = ft06_by_job();
        let swaps = NowickiSmutnicki.swaps(&order).unwrap();
        let neighbors = NowickiSmutnicki.neighbors(&order).unwrap();
        assert_eq!(swaps.len(), neighbors.len());
        for (swap, neighbor) in swaps.iter().zip(&neighbors) {
            assert_eq!(neighbor.swap, *swap);
            assert_eq!(swap.apply(&order), neighbor.order);
            // self-inverse
            assert_eq!(swap.apply(&neighbor.order), order);
        }
    }

    #[test]
    fn test_no_duplicate_swaps() {
        let order = ft06_by_job();
        let swaps = NowickiSmutnicki.swaps(&order).unwrap();
        for (i, a) in swaps.iter().enumerate() {
            assert!(swaps[i + 1..].iter().all(|b| b != a));
        }
    }
}
