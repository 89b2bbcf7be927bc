//! Test harness standing in for a Slint window.
//!
//! Wires a [`CanvasController`] to the same callback factories a real window
//! would use, wrapped with tracking, and offers helpers for simulating user
//! interactions (drag a chip, drop it, draw a connection).

#![allow(dead_code)]

use super::{init_logging, CallbackTracker};
use slint::{Model, SharedString};
use slint_block_canvas::{
    CanvasController, CanvasEdge, CanvasNode, EditorConfig, NodeId, NoticeLog,
};

/// Callbacks as the UI holds them after wiring.
pub struct WiredCallbacks {
    pub palette_drag_started: Box<dyn Fn(SharedString)>,
    pub canvas_drop: Box<dyn Fn(f32, f32) -> i32>,
    pub validate_connection: Box<dyn Fn(i32, i32) -> bool>,
    pub connection_requested: Box<dyn Fn(i32, i32)>,
    pub node_drag_ended: Box<dyn Fn(f32, f32)>,
    pub node_clicked: Box<dyn Fn(i32, bool)>,
    pub node_context_menu: Box<dyn Fn(i32)>,
}

/// Test harness for the block canvas.
pub struct CanvasTestHarness {
    pub ctrl: CanvasController,
    pub notices: NoticeLog,
    pub tracker: CallbackTracker,
    pub ui: WiredCallbacks,
}

impl CanvasTestHarness {
    /// Built-in palette ("1" = Block A emitter, "2" = Block B receiver), empty canvas.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_seed_nodes(config, Vec::new())
    }

    pub fn with_seed_nodes(config: EditorConfig, seed: Vec<CanvasNode>) -> Self {
        init_logging();
        let notices = NoticeLog::new();
        let ctrl =
            CanvasController::with_seed_nodes(config, seed).with_notice_sink(notices.clone());
        let tracker = CallbackTracker::new();

        let ui = WiredCallbacks {
            palette_drag_started: Box::new({
                let inner = ctrl.palette_drag_started_callback();
                let tracker = tracker.clone();
                move |id: SharedString| {
                    tracker.palette_drag_started.borrow_mut().push(id.to_string());
                    inner(id);
                }
            }),
            canvas_drop: Box::new({
                let inner = ctrl.drop_callback();
                let tracker = tracker.clone();
                move |x, y| {
                    let id = inner(x, y);
                    tracker.canvas_drop.borrow_mut().push((x, y, id));
                    id
                }
            }),
            validate_connection: Box::new(ctrl.validate_connection_callback()),
            connection_requested: Box::new({
                let inner = ctrl.connect_callback();
                let tracker = tracker.clone();
                move |source, target| {
                    tracker.connection_requested.borrow_mut().push((source, target));
                    inner(source, target);
                }
            }),
            node_drag_ended: Box::new({
                let inner = ctrl.node_drag_ended_callback();
                let tracker = tracker.clone();
                move |dx, dy| {
                    tracker.node_drag_ended.borrow_mut().push((dx, dy));
                    inner(dx, dy);
                }
            }),
            node_clicked: Box::new(ctrl.node_clicked_callback()),
            node_context_menu: Box::new({
                let inner = ctrl.context_menu_callback();
                let tracker = tracker.clone();
                move |id| {
                    tracker.node_context_menu.borrow_mut().push(id);
                    inner(id);
                }
            }),
        };

        Self { ctrl, notices, tracker, ui }
    }

    /// Drag the palette chip `archetype_id` and drop it at `(x, y)`.
    /// Returns the UI-level result (-1 if nothing was created).
    pub fn drag_and_drop(&self, archetype_id: &str, x: f32, y: f32) -> i32 {
        (self.ui.palette_drag_started)(SharedString::from(archetype_id));
        (self.ui.canvas_drop)(x, y)
    }

    /// Like [`drag_and_drop`](Self::drag_and_drop) but panics if no node was created.
    pub fn place(&self, archetype_id: &str, x: f32, y: f32) -> NodeId {
        let id = self.drag_and_drop(archetype_id, x, y);
        assert!(id > 0, "drop of '{}' should create a node", archetype_id);
        NodeId(id)
    }

    /// Draw a connection from `source` to `target`.
    pub fn connect(&self, source: NodeId, target: NodeId) {
        (self.ui.connection_requested)(source.get(), target.get());
    }

    pub fn node_count(&self) -> usize {
        self.ctrl.nodes_model().row_count()
    }

    pub fn edge_count(&self) -> usize {
        self.ctrl.edges_model().row_count()
    }

    pub fn node(&self, id: NodeId) -> CanvasNode {
        self.ctrl.node(id).expect("node should exist")
    }

    pub fn edges(&self) -> Vec<CanvasEdge> {
        self.ctrl.edges()
    }
}
