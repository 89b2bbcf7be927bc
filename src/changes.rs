//! Generic node and edge mutations reported by the UI.
//!
//! The toolkit owns drag physics, clicks and the delete key. It reports the
//! outcome as [`NodeChange`] / [`EdgeChange`] values and the functions here
//! apply them to the models without adding any policy of their own.

use crate::graph::{CanvasEdge, CanvasNode, GraphLogic};
use crate::ids::{EdgeId, NodeId};
use crate::selection::SelectionManager;
use slint::{Model, VecModel};

#[derive(Clone, Debug, PartialEq)]
pub enum NodeChange {
    /// Move one node to an absolute canvas position.
    Position { id: NodeId, x: f32, y: f32 },
    /// Move every selected node by a delta (end of a group drag).
    Translate { dx: f32, dy: f32 },
    /// Click on a node, optionally with shift held.
    Click { id: NodeId, shift: bool },
    /// Set one node's selection flag.
    Select { id: NodeId, selected: bool },
    /// Replace the whole selection (box select).
    SelectOnly(Vec<NodeId>),
    /// Delete a node and every edge touching it.
    Remove { id: NodeId },
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgeChange {
    Select { id: EdgeId, selected: bool },
    Remove { id: EdgeId },
}

/// Apply a node change. Returns `false` if it referred to an unknown node
/// or otherwise changed nothing.
pub fn apply_node_change(
    nodes: &VecModel<CanvasNode>,
    edges: &VecModel<CanvasEdge>,
    selection: &mut SelectionManager,
    change: &NodeChange,
) -> bool {
    match change {
        NodeChange::Position { id, x, y } => match GraphLogic::find_node_by_id(nodes, *id) {
            Some((row, mut node)) => {
                node.x = *x;
                node.y = *y;
                nodes.set_row_data(row, node);
                true
            }
            None => ignored(change),
        },
        NodeChange::Translate { dx, dy } => {
            if selection.is_empty() {
                return false;
            }
            GraphLogic::commit_drag(nodes, selection, *dx, *dy);
            true
        }
        NodeChange::Click { id, shift } => {
            if GraphLogic::find_node_by_id(nodes, *id).is_none() {
                return ignored(change);
            }
            selection.handle_interaction(*id, *shift);
            sync_selection_flags(nodes, selection);
            true
        }
        NodeChange::Select { id, selected } => {
            if GraphLogic::find_node_by_id(nodes, *id).is_none() {
                return ignored(change);
            }
            selection.set_selected(*id, *selected);
            sync_selection_flags(nodes, selection);
            true
        }
        NodeChange::SelectOnly(ids) => {
            let known = ids
                .iter()
                .copied()
                .filter(|id| GraphLogic::find_node_by_id(nodes, *id).is_some());
            selection.replace_selection(known);
            sync_selection_flags(nodes, selection);
            true
        }
        NodeChange::Remove { id } => {
            if GraphLogic::remove_rows(nodes, |n| n.id == *id) == 0 {
                return ignored(change);
            }
            selection.set_selected(*id, false);
            let attached = GraphLogic::find_edges_connected_to_node(*id, edges.iter());
            let dropped = GraphLogic::remove_rows(edges, |e| attached.contains(&e.id));
            log::debug!("removed node {} and {} attached edge(s)", id, dropped);
            true
        }
    }
}

/// Apply an edge change. Returns `false` for unknown edges.
pub fn apply_edge_change(edges: &VecModel<CanvasEdge>, change: &EdgeChange) -> bool {
    match change {
        EdgeChange::Select { id, selected } => {
            match GraphLogic::find_row(edges, |e| e.id == *id) {
                Some((row, mut edge)) => {
                    edge.selected = *selected;
                    edges.set_row_data(row, edge);
                    true
                }
                None => ignored(change),
            }
        }
        EdgeChange::Remove { id } => {
            GraphLogic::remove_rows(edges, |e| e.id == *id) > 0 || ignored(change)
        }
    }
}

/// Write the selection into each row's `selected` flag, touching only rows
/// whose flag actually changes.
pub fn sync_selection_flags(nodes: &VecModel<CanvasNode>, selection: &SelectionManager) {
    for i in 0..nodes.row_count() {
        if let Some(mut node) = nodes.row_data(i) {
            let selected = selection.contains(node.id);
            if node.selected != selected {
                node.selected = selected;
                nodes.set_row_data(i, node);
            }
        }
    }
}

fn ignored(change: &impl std::fmt::Debug) -> bool {
    log::debug!("ignoring change for unknown item: {:?}", change);
    false
}
