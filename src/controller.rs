//! High-level controller for block canvas applications.
//!
//! The [`CanvasController`] owns the node and edge models the UI renders and
//! implements the canvas callbacks: palette drag start, drop, connection
//! attempts, generic node/edge changes and the node context menu.
//!
//! # Example
//!
//! The `.slint` file declares its own row structs with plain fields, e.g.
//! `struct BlockData { id: int, kind: string, label: string, x: length,
//! y: length, selected: bool }`. The controller's models are handed over
//! through a conversion into those generated types:
//!
//! ```ignore
//! use slint_block_canvas::{CanvasController, EdgeMarker};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = CanvasController::new();
//!
//!     window.set_nodes(ctrl.nodes_model_as(|n| BlockData {
//!         id: n.id.get(),
//!         kind: n.kind.as_str().into(),
//!         label: n.label,
//!         x: n.x,
//!         y: n.y,
//!         selected: n.selected,
//!     }));
//!     window.set_edges(ctrl.edges_model_as(|e| EdgeData {
//!         id: e.id.get(),
//!         source: e.source.get(),
//!         target: e.target.get(),
//!         arrow: e.marker_end == EdgeMarker::ArrowClosed,
//!         color: e.color,
//!         selected: e.selected,
//!     }));
//!
//!     // Palette chip pressed, then released over the canvas
//!     window.on_palette_drag_started(ctrl.palette_drag_started_callback());
//!     window.on_canvas_drop(ctrl.drop_callback());
//!
//!     // Connection drawing
//!     window.on_validate_connection(ctrl.validate_connection_callback());
//!     window.on_connection_requested(ctrl.connect_callback());
//!
//!     // Node interaction
//!     window.on_node_drag_ended(ctrl.node_drag_ended_callback());
//!     window.on_node_clicked(ctrl.node_clicked_callback());
//!     window.on_node_context_menu(ctrl.context_menu_callback());
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::changes::{apply_edge_change, apply_node_change, EdgeChange, NodeChange};
use crate::config::EditorConfig;
use crate::graph::{
    CanvasEdge, CanvasNode, CompositeValidator, GraphLogic, KindCompatibilityValidator,
    LinkValidator, NoDuplicatesValidator, ValidationError, ValidationResult,
};
use crate::ids::{EdgeId, IdAllocator, NodeId};
use crate::kind::NodeKind;
use crate::notice::{LogNotices, Notice, NoticeSink};
use crate::palette::DragPayload;
use crate::render::NodeStyle;
use crate::selection::SelectionManager;
use slint::{MapModel, Model, ModelRc, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Controller that manages canvas state and provides callback implementations.
///
/// This provides a high-level API that handles:
/// - Node creation from palette drops, with monotonic node ids
/// - Connection validation against the kind compatibility table
/// - Passthrough of move/select/delete changes reported by the UI
/// - User-facing notices for refused connections and context menus
///
/// All state lives behind `Rc`, so cloning is cheap and every clone sees
/// the same canvas. Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct CanvasController {
    config: Rc<EditorConfig>,
    nodes: Rc<VecModel<CanvasNode>>,
    edges: Rc<VecModel<CanvasEdge>>,
    node_ids: Rc<RefCell<IdAllocator>>,
    edge_ids: Rc<RefCell<IdAllocator>>,
    selection: Rc<RefCell<SelectionManager>>,
    validator: Rc<RefCell<CompositeValidator>>,
    notices: Rc<dyn NoticeSink>,
    pending_drag: Rc<RefCell<Option<DragPayload>>>,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasController {
    /// Create a controller for the built-in two-block editor.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an empty canvas with the given configuration.
    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_seed_nodes(config, Vec::new())
    }

    /// Create a canvas that starts with `seed` nodes already placed.
    ///
    /// New node ids continue after the highest numeric id used by the
    /// palette or the seed nodes.
    pub fn with_seed_nodes(config: EditorConfig, seed: Vec<CanvasNode>) -> Self {
        let taken = config
            .palette
            .max_numeric_id()
            .into_iter()
            .chain(seed.iter().map(|n| n.id.get()));
        let node_ids = IdAllocator::after_existing(taken);

        let mut validator = CompositeValidator::new()
            .add(KindCompatibilityValidator::new(config.compatibility.clone()));
        if !config.allow_duplicate_edges {
            validator = validator.add(NoDuplicatesValidator);
        }

        Self {
            config: Rc::new(config),
            nodes: Rc::new(VecModel::from(seed)),
            edges: Rc::new(VecModel::from(Vec::new())),
            node_ids: Rc::new(RefCell::new(node_ids)),
            edge_ids: Rc::new(RefCell::new(IdAllocator::new())),
            selection: Rc::new(RefCell::new(SelectionManager::new())),
            validator: Rc::new(RefCell::new(validator)),
            notices: Rc::new(LogNotices),
            pending_drag: Rc::new(RefCell::new(None)),
        }
    }

    /// Route notices to `sink` instead of the log.
    ///
    /// Call before cloning the controller into callbacks; existing clones
    /// keep the previous sink.
    pub fn with_notice_sink(mut self, sink: impl NoticeSink + 'static) -> Self {
        self.notices = Rc::new(sink);
        self
    }

    /// Append a validator that runs after the built-in checks.
    pub fn add_validator<V>(&self, validator: V)
    where
        V: LinkValidator<CanvasNode, CanvasEdge> + 'static,
    {
        let mut current = self.validator.borrow_mut();
        let composite = std::mem::take(&mut *current);
        *current = composite.add(validator);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Style the UI should use for nodes of `kind`.
    pub fn style_for(&self, kind: &NodeKind) -> NodeStyle {
        self.config.renderers.style_for(kind)
    }

    // === Models ===

    pub fn nodes_model(&self) -> Rc<VecModel<CanvasNode>> {
        self.nodes.clone()
    }

    pub fn edges_model(&self) -> Rc<VecModel<CanvasEdge>> {
        self.edges.clone()
    }

    /// Read-only view of the nodes converted to the UI's row type.
    ///
    /// The view follows every change to the underlying model.
    pub fn nodes_model_as<T, F>(&self, convert: F) -> ModelRc<T>
    where
        T: Clone + 'static,
        F: Fn(CanvasNode) -> T + 'static,
    {
        ModelRc::new(MapModel::new(self.nodes.clone(), convert))
    }

    /// Read-only view of the edges converted to the UI's row type.
    pub fn edges_model_as<T, F>(&self, convert: F) -> ModelRc<T>
    where
        T: Clone + 'static,
        F: Fn(CanvasEdge) -> T + 'static,
    {
        ModelRc::new(MapModel::new(self.edges.clone(), convert))
    }

    /// Snapshot of the current nodes.
    pub fn nodes(&self) -> Vec<CanvasNode> {
        self.nodes.iter().collect()
    }

    /// Snapshot of the current edges, in creation order.
    pub fn edges(&self) -> Vec<CanvasEdge> {
        self.edges.iter().collect()
    }

    pub fn node(&self, id: NodeId) -> Option<CanvasNode> {
        GraphLogic::find_node_by_id(&self.nodes, id).map(|(_, node)| node)
    }

    /// Currently selected node ids, ascending.
    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.selection.borrow().sorted()
    }

    // === Palette drag and drop ===

    /// Drag started on a palette chip. Returns `false` for unknown chips.
    pub fn handle_palette_drag_started(&self, archetype_id: &str) -> bool {
        let payload = self.config.palette.drag_start(archetype_id);
        let known = payload.is_some();
        *self.pending_drag.borrow_mut() = payload;
        known
    }

    /// Drag left the canvas or was aborted.
    pub fn handle_drag_cancelled(&self) {
        self.pending_drag.borrow_mut().take();
    }

    /// Drop of a palette drag at pointer `(pointer_x, pointer_y)`.
    ///
    /// A payload without a kind tag is ignored silently. Otherwise a node is
    /// appended at the pointer minus the configured drop offset and its id
    /// returned.
    pub fn handle_drop(
        &self,
        payload: &DragPayload,
        pointer_x: f32,
        pointer_y: f32,
    ) -> Option<NodeId> {
        let kind = payload.kind()?;
        if !self.config.renderers.contains(&kind) {
            log::debug!("dropped kind '{}' has no registered style, using fallback", kind);
        }

        let Some(id) = self.node_ids.borrow_mut().next_node_id() else {
            log::warn!("node ids exhausted, drop of '{}' ignored", kind);
            return None;
        };
        let (x, y) = self.config.drop_offset.apply(pointer_x, pointer_y);
        self.nodes.push(CanvasNode::new(id, kind, x, y, payload.label()));
        log::debug!("created node {} at ({}, {})", id, x, y);
        Some(id)
    }

    /// Drop of the drag started by [`handle_palette_drag_started`](Self::handle_palette_drag_started).
    pub fn handle_pending_drop(&self, pointer_x: f32, pointer_y: f32) -> Option<NodeId> {
        let payload = self.pending_drag.borrow_mut().take()?;
        self.handle_drop(&payload, pointer_x, pointer_y)
    }

    // === Connections ===

    /// Check a candidate edge without creating it.
    pub fn validate_connection(&self, source: NodeId, target: NodeId) -> ValidationResult {
        let nodes: Vec<CanvasNode> = self.nodes.iter().collect();
        let edges: Vec<CanvasEdge> = self.edges.iter().collect();
        self.validator.borrow().validate(source, target, &nodes, &edges)
    }

    /// Connection attempt from `source` to `target`.
    ///
    /// On success the edge is appended with a closed arrowhead. On failure
    /// (including running out of edge ids) nothing changes and a
    /// [`Notice::ConnectionRejected`] is sent.
    pub fn handle_connect(
        &self,
        source: NodeId,
        target: NodeId,
    ) -> Result<EdgeId, ValidationError> {
        let allocated = self
            .validate_connection(source, target)
            .into_result()
            .and_then(|()| {
                self.edge_ids
                    .borrow_mut()
                    .next_edge_id()
                    .ok_or(ValidationError::IdsExhausted)
            });

        let id = match allocated {
            Ok(id) => id,
            Err(reason) => {
                self.notices.notify(&Notice::ConnectionRejected {
                    source,
                    target,
                    reason: reason.clone(),
                    message: self.config.message_for(&reason),
                });
                return Err(reason);
            }
        };
        self.edges.push(CanvasEdge::arrow_closed(id, source, target));
        log::debug!("created edge {}: {} -> {}", id, source, target);
        Ok(id)
    }

    // === Change passthrough ===

    pub fn handle_node_change(&self, change: &NodeChange) -> bool {
        apply_node_change(&self.nodes, &self.edges, &mut self.selection.borrow_mut(), change)
    }

    /// Apply a batch of node changes; returns how many had an effect.
    pub fn handle_node_changes<'a, I>(&self, changes: I) -> usize
    where
        I: IntoIterator<Item = &'a NodeChange>,
    {
        changes
            .into_iter()
            .filter(|change| self.handle_node_change(change))
            .count()
    }

    pub fn handle_edge_change(&self, change: &EdgeChange) -> bool {
        apply_edge_change(&self.edges, change)
    }

    /// Apply a batch of edge changes; returns how many had an effect.
    pub fn handle_edge_changes<'a, I>(&self, changes: I) -> usize
    where
        I: IntoIterator<Item = &'a EdgeChange>,
    {
        changes
            .into_iter()
            .filter(|change| self.handle_edge_change(change))
            .count()
    }

    // === Context menu ===

    /// Right-click on a node: send the placeholder acknowledgment.
    pub fn handle_context_menu(&self, node_id: NodeId) -> Option<Notice> {
        let node = self.node(node_id)?;
        let notice = self.config.renderers.context_menu(&node);
        self.notices.notify(&notice);
        Some(notice)
    }

    // === Callback factories ===

    /// Returns a callback for `palette-drag-started(archetype-id)`.
    pub fn palette_drag_started_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |archetype_id| {
            if !ctrl.handle_palette_drag_started(archetype_id.as_str()) {
                log::debug!("drag started on unknown palette entry '{}'", archetype_id);
            }
        }
    }

    /// Returns a callback for `canvas-drop(x, y) -> int`.
    ///
    /// Yields the new node id, or -1 if nothing was created.
    pub fn drop_callback(&self) -> impl Fn(f32, f32) -> i32 {
        let ctrl = self.clone();
        move |x, y| ctrl.handle_pending_drop(x, y).map_or(-1, NodeId::get)
    }

    /// Returns a callback for `validate-connection(source, target) -> bool`.
    pub fn validate_connection_callback(&self) -> impl Fn(i32, i32) -> bool {
        let ctrl = self.clone();
        move |source, target| ctrl.validate_connection(NodeId(source), NodeId(target)).is_valid()
    }

    /// Returns a callback for `connection-requested(source, target)`.
    pub fn connect_callback(&self) -> impl Fn(i32, i32) {
        let ctrl = self.clone();
        move |source, target| {
            // Refusals are already reported through the notice sink.
            let _ = ctrl.handle_connect(NodeId(source), NodeId(target));
        }
    }

    /// Returns a callback for `node-drag-ended(delta-x, delta-y)`.
    pub fn node_drag_ended_callback(&self) -> impl Fn(f32, f32) {
        let ctrl = self.clone();
        move |dx, dy| {
            ctrl.handle_node_change(&NodeChange::Translate { dx, dy });
        }
    }

    /// Returns a callback for `node-clicked(node-id, shift)`.
    pub fn node_clicked_callback(&self) -> impl Fn(i32, bool) {
        let ctrl = self.clone();
        move |id, shift| {
            ctrl.handle_node_change(&NodeChange::Click { id: NodeId(id), shift });
        }
    }

    /// Returns a callback for `node-context-menu(node-id)`.
    pub fn context_menu_callback(&self) -> impl Fn(i32) {
        let ctrl = self.clone();
        move |id| {
            ctrl.handle_context_menu(NodeId(id));
        }
    }
}
