//! Dependency ordering over a flat list of assignments.
//!
//! Both sorts work off the same dependency graph — an edge from an
//! assignment to every other assignment whose `reference_name()` appears
//! in its own `references()` — but answer different questions:
//! `topological_sort` demands an acyclic graph and fails otherwise;
//! `dependency_sort` copes with cycles by bundling each strongly connected
//! component into one bucket. Both emit dependencies before their
//! dependents.
//!
//! Both are iterative rather than recursive (an explicit work stack
//! standing in for the call stack) so a pathologically deep reference
//! chain can't blow the stack.

use std::collections::{BTreeMap, HashMap};

use crate::error::SemaError;
use crate::node::SemaNode;
use crate::Result;

fn name_index(assignments: &[SemaNode]) -> BTreeMap<String, usize> {
    let mut map = BTreeMap::new();
    for (i, assignment) in assignments.iter().enumerate() {
        if let Some(name) = assignment.reference_name() {
            map.insert(name.to_owned(), i);
        }
    }
    map
}

fn dependencies_of(assignment: &SemaNode, names: &BTreeMap<String, usize>, self_name: &str) -> Vec<usize> {
    assignment
        .references()
        .into_iter()
        .filter(|r| r != self_name)
        .filter_map(|r| names.get(&r).copied())
        .collect()
}

/// Order `assignments` so that every entry appears *after* everything it
/// transitively depends on. Fails with `SemaError::CyclicReferences` if
/// the dependency graph has a cycle.
pub fn topological_sort(assignments: &[SemaNode]) -> Result<Vec<SemaNode>> {
    let names = name_index(assignments);
    let total = names.len();

    let mut own_deps: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut remaining_deps: HashMap<usize, usize> = HashMap::new();
    let mut dependents: HashMap<usize, Vec<usize>> = HashMap::new();
    for &i in names.values() {
        dependents.insert(i, Vec::new());
    }
    for &i in names.values() {
        let self_name = assignments[i].reference_name().expect("indexed by name");
        let deps = dependencies_of(&assignments[i], &names, self_name);
        remaining_deps.insert(i, deps.len());
        for &dep in &deps {
            dependents.get_mut(&dep).expect("dep indexed by name").push(i);
        }
        own_deps.insert(i, deps);
    }

    let mut roots: Vec<usize> = names
        .values()
        .copied()
        .filter(|i| remaining_deps[i] == 0)
        .collect();
    roots.sort_unstable();
    let mut queue: std::collections::VecDeque<usize> = roots.into();

    let mut order = Vec::with_capacity(total);
    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &dependent in &dependents[&i] {
            let count = remaining_deps.get_mut(&dependent).expect("dependent indexed by name");
            *count -= 1;
            if *count == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() != total {
        let emitted: std::collections::HashSet<usize> = order.iter().copied().collect();
        let mut residual_graph = BTreeMap::new();
        for &i in names.values() {
            if !emitted.contains(&i) {
                let name = assignments[i].reference_name().unwrap_or("?").to_owned();
                let deps = own_deps[&i]
                    .iter()
                    .filter(|d| !emitted.contains(d))
                    .map(|&d| assignments[d].reference_name().unwrap_or("?").to_owned())
                    .collect();
                residual_graph.insert(name, deps);
            }
        }
        return Err(SemaError::CyclicReferences { residual_graph });
    }

    Ok(order.into_iter().map(|i| assignments[i].clone()).collect())
}

/// Tarjan's strongly connected components algorithm, iterative. Groups
/// `assignments` into buckets, each a single mutually-cyclic component (or
/// one acyclic entry); every component appears only after all the
/// components it depends on have already appeared (dependencies first).
pub fn dependency_sort(assignments: &[SemaNode]) -> Vec<Vec<SemaNode>> {
    let names = name_index(assignments);
    let n = assignments.len();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, assignment) in assignments.iter().enumerate() {
        if let Some(self_name) = assignment.reference_name() {
            adjacency[i] = dependencies_of(assignment, &names, self_name);
        }
    }

    let mut index: Vec<Option<usize>> = vec![None; n];
    let mut lowlink: Vec<usize> = vec![0; n];
    let mut on_stack: Vec<bool> = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index = 0usize;
    let mut sccs: Vec<Vec<usize>> = Vec::new();

    // Visit roots in alphabetical reference-name order for determinism.
    let roots: Vec<usize> = names.values().copied().collect();

    for start in roots {
        if index[start].is_some() {
            continue;
        }

        let mut work: Vec<(usize, usize)> = vec![(start, 0)];
        index[start] = Some(next_index);
        lowlink[start] = next_index;
        next_index += 1;
        stack.push(start);
        on_stack[start] = true;

        while let Some(&mut (v, pos)) = work.last_mut() {
            if pos < adjacency[v].len() {
                let w = adjacency[v][pos];
                work.last_mut().expect("just matched Some").1 += 1;

                if index[w].is_none() {
                    index[w] = Some(next_index);
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    work.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w].expect("checked is_some above"));
                }
            } else {
                work.pop();
                if let Some(parent) = work.last() {
                    let p = parent.0;
                    lowlink[p] = lowlink[p].min(lowlink[v]);
                }

                if lowlink[v] == index[v].expect("v was indexed on discovery") {
                    let mut component = Vec::new();
                    loop {
                        let w = stack.pop().expect("v's own SCC is still on the stack");
                        on_stack[w] = false;
                        component.push(w);
                        if w == v {
                            break;
                        }
                    }
                    sccs.push(component);
                }
            }
        }
    }

    sccs.into_iter()
        .map(|indices| indices.into_iter().map(|i| assignments[i].clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{
        ComponentType, ConstructedKind, ConstructedType, DefinedType, SemaNode, SimpleType, TypeAssignment,
    };

    fn defined(name: &str) -> SemaNode {
        SemaNode::DefinedType(DefinedType {
            module_name: None,
            type_name: name.to_owned(),
            constraint: None,
        })
    }

    fn type_assignment(name: &str, references: Vec<&str>) -> SemaNode {
        let type_decl = match references.as_slice() {
            [] => SemaNode::SimpleType(SimpleType {
                type_name: "INTEGER".to_owned(),
                constraint: None,
            }),
            [single] => defined(single),
            many => {
                let components = many
                    .iter()
                    .map(|reference| {
                        SemaNode::ComponentType(Box::new(ComponentType {
                            identifier: Some(format!("f{}", reference)),
                            type_decl: Some(Box::new(defined(reference))),
                            default_value: None,
                            optional: false,
                            components_of_type: None,
                        }))
                    })
                    .collect();
                SemaNode::ConstructedType(Box::new(ConstructedType {
                    kind: ConstructedKind::Sequence,
                    type_name: "SEQUENCE".to_owned(),
                    components,
                }))
            }
        };
        SemaNode::TypeAssignment(Box::new(TypeAssignment {
            type_name: name.to_owned(),
            type_decl: Box::new(type_decl),
        }))
    }

    #[test]
    fn acyclic_graph_orders_dependencies_first() {
        let assignments = vec![
            type_assignment("A", vec!["B"]),
            type_assignment("B", vec!["C"]),
            type_assignment("C", vec![]),
        ];

        let sorted = topological_sort(&assignments).unwrap();
        let names: Vec<&str> = sorted.iter().map(|a| a.reference_name().unwrap()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn diamond_shaped_graph_orders_each_dependency_before_its_dependents() {
        let assignments = vec![
            type_assignment("A", vec!["B"]),
            type_assignment("B", vec![]),
            type_assignment("C", vec!["A"]),
        ];

        let sorted = topological_sort(&assignments).unwrap();
        let names: Vec<&str> = sorted.iter().map(|a| a.reference_name().unwrap()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn cyclic_graph_is_rejected() {
        let assignments = vec![type_assignment("A", vec!["B"]), type_assignment("B", vec!["A"])];
        let err = topological_sort(&assignments).unwrap_err();
        assert!(matches!(err, SemaError::CyclicReferences { .. }));
    }

    #[test]
    fn dependency_sort_bundles_a_cycle_into_one_component() {
        let assignments = vec![
            type_assignment("A", vec!["B"]),
            type_assignment("B", vec!["A"]),
            type_assignment("C", vec![]),
        ];

        let sccs = dependency_sort(&assignments);
        let sizes: Vec<usize> = sccs.iter().map(Vec::len).collect();
        assert!(sizes.contains(&2));
        assert!(sizes.contains(&1));
    }
}
