//! Generic traversal of tree-shaped values.
//!
//! A node's children are discovered from its mirror: any immediate child
//! whose value has the node's own type name, is a present optional holding
//! such a value, or is a non-empty sequence of such values, is a child
//! node. Inputs must be acyclic.

use std::fmt::Display;

use fieldkit_mirror::{from_value, snapshot, Result, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Marks a type as taking part in tree traversal.
///
/// ```rust
/// use fieldkit_ops::{tree_dfs, TreeLike};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Node { value: i32, children: Vec<Node> }
/// impl TreeLike for Node {}
///
/// let tree = Node { value: 1, children: vec![Node { value: 2, children: vec![] }] };
/// let order: Vec<i32> = tree_dfs(&tree).unwrap().iter().map(|n| n.value).collect();
/// assert_eq!(order, vec![1, 2]);
/// ```
pub trait TreeLike: Serialize + DeserializeOwned {}

fn node_name(value: &Value) -> Option<&'static str> {
    match value.peeled() {
        Value::Record { name, .. }
        | Value::TupleRecord { name, .. }
        | Value::Variant { name, .. } => Some(*name),
        _ => None,
    }
}

fn is_node(value: &Value, name: &str) -> bool {
    node_name(value) == Some(name)
}

/// Child nodes of `node`, in declaration order.
fn child_nodes(node: &Value, name: &str) -> Vec<Value> {
    let mut nodes = Vec::new();
    for child in node.children() {
        match child.value {
            value if is_node(&value, name) => nodes.push(value.into_peeled()),
            Value::Optional(Some(inner)) if is_node(&inner, name) => {
                nodes.push((*inner).into_peeled())
            }
            Value::Seq(items) if !items.is_empty() && items.iter().all(|v| is_node(v, name)) => {
                nodes.extend(items.into_iter().map(Value::into_peeled))
            }
            _ => {}
        }
    }
    nodes
}

fn dfs_values(node: Value, name: &str, out: &mut Vec<Value>) {
    let children = child_nodes(&node, name);
    out.push(node);
    for child in children {
        dfs_values(child, name, out);
    }
}

/// Nodes in pre-order: the root, then each child subtree in declaration
/// order.
pub fn tree_dfs<T: TreeLike>(root: &T) -> Result<Vec<T>> {
    let root = snapshot(root);
    let mut values = Vec::new();
    match node_name(&root) {
        Some(name) => dfs_values(root, name, &mut values),
        None => values.push(root),
    }
    values.iter().map(from_value).collect()
}

/// Nodes grouped by depth. Level 0 holds only the root.
pub fn tree_levels<T: TreeLike>(root: &T) -> Result<Vec<Vec<T>>> {
    let root = snapshot(root);
    let name = node_name(&root);

    let mut levels = Vec::new();
    let mut current = vec![root];
    while !current.is_empty() {
        let next: Vec<Value> = match name {
            Some(name) => current
                .iter()
                .flat_map(|node| child_nodes(node, name))
                .collect(),
            None => Vec::new(),
        };
        levels.push(
            current
                .iter()
                .map(from_value)
                .collect::<Result<Vec<T>>>()?,
        );
        current = next;
    }
    Ok(levels)
}

/// Graphviz DOT for a tree, naming nodes by their `Display` rendering.
pub fn dot_graph<T: TreeLike + Display>(root: &T) -> Result<String> {
    dot_graph_with(root, |node| node.to_string())
}

/// Graphviz DOT for a tree, naming nodes with `label`.
///
/// One `"parent" -> "child";` edge per line, in pre-order. Names are not
/// escaped.
pub fn dot_graph_with<T, F>(root: &T, mut label: F) -> Result<String>
where
    T: TreeLike,
    F: FnMut(&T) -> String,
{
    let mut lines = vec!["digraph G {".to_string()];
    let root_value = snapshot(root);
    if let Some(name) = node_name(&root_value) {
        let root_label = label(root);
        dot_edges::<T, F>(&root_value, &root_label, name, &mut label, &mut lines)?;
    }
    lines.push("}".to_string());
    Ok(lines.join("\n"))
}

fn dot_edges<T, F>(
    node: &Value,
    node_label: &str,
    name: &str,
    label: &mut F,
    lines: &mut Vec<String>,
) -> Result<()>
where
    T: TreeLike,
    F: FnMut(&T) -> String,
{
    for child in child_nodes(node, name) {
        let child_label = label(&from_value(&child)?);
        lines.push(format!("  \"{}\" -> \"{}\";", node_label, child_label));
        dot_edges::<T, F>(&child, &child_label, name, label, lines)?;
    }
    Ok(())
}
