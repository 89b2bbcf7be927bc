//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use std::cell::RefCell;
use std::rc::Rc;

/// Initialize `env_logger` once per test binary. Output is captured by the
/// test runner; set `RUST_LOG=debug` to see it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tracks callback invocations for testing.
///
/// Each field records calls to the corresponding callback with their arguments.
#[derive(Default, Clone)]
pub struct CallbackTracker {
    /// (archetype_id,)
    pub palette_drag_started: Rc<RefCell<Vec<String>>>,
    /// (x, y, returned node id)
    pub canvas_drop: Rc<RefCell<Vec<(f32, f32, i32)>>>,
    /// (source, target)
    pub connection_requested: Rc<RefCell<Vec<(i32, i32)>>>,
    /// (delta_x, delta_y)
    pub node_drag_ended: Rc<RefCell<Vec<(f32, f32)>>>,
    /// (node_id,)
    pub node_context_menu: Rc<RefCell<Vec<i32>>>,
}

impl CallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded callbacks.
    pub fn clear(&self) {
        self.palette_drag_started.borrow_mut().clear();
        self.canvas_drop.borrow_mut().clear();
        self.connection_requested.borrow_mut().clear();
        self.node_drag_ended.borrow_mut().clear();
        self.node_context_menu.borrow_mut().clear();
    }
}
