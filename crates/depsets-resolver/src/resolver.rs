//! Set graph resolution: breadth-first discovery of every set reachable
//! through `extends`, then a topological sort that places each set after the
//! sets it extends, breaking ties by discovery order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use depsets_core::catalog::{Catalog, DependencySetDef, SetId};
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while ordering dependency sets.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ResolveError {
    /// An `extends` chain leads back to a set that is still being ordered.
    #[error("Dependency sets extend each other in a cycle: {}", format_cycle(.cycle))]
    #[diagnostic(
        code(depsets::cyclic_extends),
        help("Remove one of the `extends` entries along the cycle")
    )]
    CyclicExtends { cycle: Vec<SetId> },
}

fn format_cycle(cycle: &[SetId]) -> String {
    cycle
        .iter()
        .map(SetId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// The output of set graph resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetResolution {
    /// Sets to apply, each after every set it extends.
    pub ordered: Vec<SetId>,
    /// Requested or extended ids with no catalog entry, in discovery order.
    pub unknown: Vec<SetId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Resolve `requested` against `catalog`.
///
/// Unknown ids never fail resolution; they are reported once each in
/// [`SetResolution::unknown`]. Only a cyclic `extends` chain is an error.
pub fn resolve(catalog: &Catalog, requested: &[SetId]) -> Result<SetResolution, ResolveError> {
    let mut queue: VecDeque<&SetId> = requested.iter().collect();
    let mut visited: HashSet<&SetId> = HashSet::new();
    let mut index: HashMap<&SetId, usize> = HashMap::new();
    let mut discovered: Vec<(&SetId, &DependencySetDef)> = Vec::new();
    let mut unknown: Vec<SetId> = Vec::new();

    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        let Some(def) = catalog.get(id) else {
            tracing::debug!("dependency set `{id}` is not in the catalog");
            unknown.push(id.clone());
            continue;
        };
        index.insert(id, discovered.len());
        discovered.push((id, def));
        queue.extend(def.extends.iter());
    }

    // Extended sets of each discovered set, by discovery index.
    let extends: Vec<Vec<usize>> = discovered
        .iter()
        .map(|(_, def)| {
            def.extends
                .iter()
                .filter_map(|target| index.get(target).copied())
                .collect()
        })
        .collect();

    let order = linearize(&extends).map_err(|cycle| ResolveError::CyclicExtends {
        cycle: cycle.into_iter().map(|i| discovered[i].0.clone()).collect(),
    })?;

    let ordered: Vec<SetId> = order.into_iter().map(|i| discovered[i].0.clone()).collect();
    tracing::debug!(
        "resolved {} requested set(s) to {} set(s), {} unknown",
        requested.len(),
        ordered.len(),
        unknown.len()
    );
    Ok(SetResolution { ordered, unknown })
}

/// Topological order over `extends`: a set becomes ready once every set it
/// extends has been placed, and ready sets are taken lowest index first.
///
/// Returns the node indices with every node after the nodes it extends, or
/// the cycle (first node repeated at the end) when some nodes never become
/// ready.
fn linearize(extends: &[Vec<usize>]) -> Result<Vec<usize>, Vec<usize>> {
    let mut pending: Vec<usize> = extends.iter().map(Vec::len).collect();
    let mut extended_by: Vec<Vec<usize>> = vec![Vec::new(); extends.len()];
    for (node, targets) in extends.iter().enumerate() {
        for &target in targets {
            extended_by[target].push(node);
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = pending
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == 0)
        .map(|(node, _)| Reverse(node))
        .collect();
    let mut order = Vec::with_capacity(extends.len());

    while let Some(Reverse(node)) = ready.pop() {
        order.push(node);
        for &dependent in &extended_by[node] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    if order.len() == extends.len() {
        return Ok(order);
    }
    let placed: HashSet<usize> = order.into_iter().collect();
    Err(find_cycle(extends, &placed))
}

/// Depth-first search over the nodes `linearize` could not place. Every such
/// node extends another unplaced node, so the walk always closes a cycle.
fn find_cycle(extends: &[Vec<usize>], placed: &HashSet<usize>) -> Vec<usize> {
    let mut marks = vec![Mark::Unvisited; extends.len()];

    for root in (0..extends.len()).filter(|n| !placed.contains(n)) {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::InProgress;
        // (node, position of the next extended set to visit)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            let next = extends[node].get(top.1).copied();
            top.1 += 1;

            match next {
                Some(target) if placed.contains(&target) => {}
                Some(target) => match marks[target] {
                    Mark::Unvisited => {
                        marks[target] = Mark::InProgress;
                        stack.push((target, 0));
                    }
                    Mark::InProgress => {
                        let start = stack
                            .iter()
                            .position(|&(n, _)| n == target)
                            .unwrap_or(0);
                        let mut cycle: Vec<usize> =
                            stack[start..].iter().map(|&(n, _)| n).collect();
                        cycle.push(target);
                        return cycle;
                    }
                    Mark::Done => {}
                },
                None => {
                    marks[node] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsets_core::dependency::DependencySpec;

    fn set(deps: &[&str], extends: &[&str]) -> DependencySetDef {
        DependencySetDef::new(
            deps.iter()
                .map(|d| DependencySpec::parse(d).unwrap())
                .collect(),
        )
        .extending(extends.iter().copied())
    }

    fn ids(names: &[&str]) -> Vec<SetId> {
        names.iter().map(|n| SetId::from(*n)).collect()
    }

    #[test]
    fn extended_set_comes_first() {
        let catalog: Catalog = [
            (SetId::from("a"), set(&["org.x:x:1"], &[])),
            (SetId::from("b"), set(&["org.y:y:1"], &["a"])),
        ]
        .into_iter()
        .collect();

        let res = resolve(&catalog, &ids(&["b"])).unwrap();
        assert_eq!(res.ordered, ids(&["a", "b"]));
        assert!(res.unknown.is_empty());
    }

    #[test]
    fn empty_request_resolves_to_nothing() {
        let catalog: Catalog = [(SetId::from("a"), set(&[], &[]))].into_iter().collect();
        let res = resolve(&catalog, &[]).unwrap();
        assert_eq!(res, SetResolution::default());
    }

    #[test]
    fn independent_sets_keep_request_order() {
        let catalog: Catalog = [
            (SetId::from("alpha"), set(&[], &[])),
            (SetId::from("zeta"), set(&[], &[])),
        ]
        .into_iter()
        .collect();

        let res = resolve(&catalog, &ids(&["zeta", "alpha"])).unwrap();
        assert_eq!(res.ordered, ids(&["zeta", "alpha"]));
    }

    #[test]
    fn diamond_applies_shared_base_once() {
        // top extends left and right, both extend base
        let catalog: Catalog = [
            (SetId::from("base"), set(&[], &[])),
            (SetId::from("left"), set(&[], &["base"])),
            (SetId::from("right"), set(&[], &["base"])),
            (SetId::from("top"), set(&[], &["left", "right"])),
        ]
        .into_iter()
        .collect();

        let res = resolve(&catalog, &ids(&["top"])).unwrap();
        assert_eq!(res.ordered, ids(&["base", "left", "right", "top"]));
    }

    #[test]
    fn duplicates_in_request_are_idempotent() {
        let catalog: Catalog = [
            (SetId::from("a"), set(&[], &[])),
            (SetId::from("b"), set(&[], &["a"])),
        ]
        .into_iter()
        .collect();

        let res = resolve(&catalog, &ids(&["b", "a", "b"])).unwrap();
        assert_eq!(res.ordered, ids(&["a", "b"]));
    }

    #[test]
    fn unknown_ids_reported_once() {
        let catalog: Catalog = [
            (SetId::from("a"), set(&[], &["ghost"])),
            (SetId::from("b"), set(&[], &["ghost", "a"])),
        ]
        .into_iter()
        .collect();

        let res = resolve(&catalog, &ids(&["ghost", "b", "phantom", "ghost"])).unwrap();
        assert_eq!(res.unknown, ids(&["ghost", "phantom"]));
        assert_eq!(res.ordered, ids(&["a", "b"]));
    }

    #[test]
    fn resolving_twice_is_identical() {
        let catalog: Catalog = [
            (SetId::from("a"), set(&[], &[])),
            (SetId::from("b"), set(&[], &["a", "missing"])),
            (SetId::from("c"), set(&[], &["b"])),
        ]
        .into_iter()
        .collect();
        let request = ids(&["c", "a", "nope"]);

        assert_eq!(
            resolve(&catalog, &request).unwrap(),
            resolve(&catalog, &request).unwrap()
        );
    }

    #[test]
    fn two_set_cycle_is_reported() {
        let catalog: Catalog = [
            (SetId::from("a"), set(&[], &["b"])),
            (SetId::from("b"), set(&[], &["a"])),
        ]
        .into_iter()
        .collect();

        let err = resolve(&catalog, &ids(&["a"])).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CyclicExtends {
                cycle: ids(&["a", "b", "a"])
            }
        );
        assert!(err.to_string().contains("a -> b -> a"), "got: {err}");
    }

    #[test]
    fn self_extension_is_a_cycle() {
        let catalog: Catalog = [(SetId::from("loop"), set(&[], &["loop"]))]
            .into_iter()
            .collect();

        let err = resolve(&catalog, &ids(&["loop"])).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CyclicExtends {
                cycle: ids(&["loop", "loop"])
            }
        );
    }

    #[test]
    fn cycle_below_an_acyclic_entry_is_named_without_the_entry() {
        let catalog: Catalog = [
            (SetId::from("entry"), set(&[], &["x"])),
            (SetId::from("x"), set(&[], &["y"])),
            (SetId::from("y"), set(&[], &["z"])),
            (SetId::from("z"), set(&[], &["x"])),
        ]
        .into_iter()
        .collect();

        let err = resolve(&catalog, &ids(&["entry"])).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CyclicExtends {
                cycle: ids(&["x", "y", "z", "x"])
            }
        );
    }

    #[test]
    fn sets_extending_nothing_keep_discovery_order() {
        // discovery order is x, y, z; y and z extend nothing
        let catalog: Catalog = [
            (SetId::from("x"), set(&["org.x:x:1"], &["z"])),
            (SetId::from("y"), set(&["org.shared:lib:2"], &[])),
            (SetId::from("z"), set(&["org.shared:lib:1"], &[])),
        ]
        .into_iter()
        .collect();

        let res = resolve(&catalog, &ids(&["x", "y"])).unwrap();
        assert_eq!(res.ordered, ids(&["y", "z", "x"]));
    }

    #[test]
    fn linearize_orders_chain() {
        // 0 extends 1, 1 extends 2
        let order = linearize(&[vec![1], vec![2], vec![]]).unwrap();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn linearize_takes_ready_nodes_lowest_index_first() {
        // 0 extends 2; 1 and 2 extend nothing
        let order = linearize(&[vec![2], vec![], vec![]]).unwrap();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn linearize_names_cycle_behind_an_unplaced_entry() {
        // 0 extends 1, 1 and 2 extend each other, 3 is free
        let cycle = linearize(&[vec![1], vec![2], vec![1], vec![]]).unwrap_err();
        assert_eq!(cycle, vec![1, 2, 1]);
    }
}
