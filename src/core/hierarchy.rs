//! Forest construction from flat parent-linked activity lists.

use crate::core::Activity;
use std::collections::{HashMap, HashSet};

/// Link a flat activity list into a forest using `parent_id` references.
///
/// Activities with no parent — or a parent id that does not exist in the
/// input — become roots; partial or corrupted imports still render rather
/// than erroring. Insertion order is preserved per parent. Activities
/// trapped in parent-reference cycles are unreachable from any root, so
/// they are promoted to roots in input order instead of being dropped.
pub fn build_hierarchy(activities: Vec<Activity>) -> Vec<Activity> {
    let known: HashSet<String> = activities.iter().map(|a| a.id.clone()).collect();

    let mut roots: Vec<Activity> = Vec::new();
    let mut pending: HashMap<String, Vec<Activity>> = HashMap::new();
    let mut parent_order: Vec<String> = Vec::new();

    for activity in activities {
        let resolved_parent = activity
            .parent_id
            .as_ref()
            .filter(|p| known.contains(*p) && **p != activity.id)
            .cloned();
        match resolved_parent {
            Some(parent) => {
                if !pending.contains_key(&parent) {
                    parent_order.push(parent.clone());
                }
                pending.entry(parent).or_default().push(activity);
            }
            None => roots.push(activity),
        }
    }

    for root in &mut roots {
        attach_children(root, &mut pending);
    }

    if !pending.is_empty() {
        let stranded: usize = pending.values().map(Vec::len).sum();
        log::debug!("{stranded} activities in parent cycles, promoting to roots");
        for parent in parent_order {
            if let Some(children) = pending.remove(&parent) {
                for mut child in children {
                    attach_children(&mut child, &mut pending);
                    roots.push(child);
                }
            }
        }
    }

    roots
}

fn attach_children(node: &mut Activity, pending: &mut HashMap<String, Vec<Activity>>) {
    if let Some(mut children) = pending.remove(&node.id) {
        for child in &mut children {
            attach_children(child, pending);
        }
        node.children = children;
    }
}

/// Depth-first flat list of the non-group nodes of a forest, in insertion
/// order. This is the canonical input to the aggregator and the curve
/// generator: group containers carry no weight of their own and are
/// skipped, so they can never double count against their descendants.
pub fn flatten_leaves(forest: &[Activity]) -> Vec<Activity> {
    let mut leaves = Vec::new();
    collect_leaves(forest, &mut leaves);
    leaves
}

fn collect_leaves(nodes: &[Activity], out: &mut Vec<Activity>) {
    for node in nodes {
        if !node.is_group {
            let mut leaf = node.clone();
            leaf.children = Vec::new();
            out.push(leaf);
        }
        collect_leaves(&node.children, out);
    }
}

/// Total node count of a forest, groups included.
pub fn count_nodes(forest: &[Activity]) -> usize {
    forest
        .iter()
        .map(|node| 1 + count_nodes(&node.children))
        .sum()
}
