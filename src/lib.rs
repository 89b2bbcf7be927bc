//! # Slint Block Canvas
//!
//! The logic behind a small node-link diagram editor: a palette of block
//! archetypes that can be dragged onto a canvas, and connections between
//! blocks that are only accepted when the block kinds are compatible.
//!
//! Rendering, hit-testing, drag physics, pan/zoom and the minimap belong to
//! the UI (Slint). This crate owns the node and edge models the UI renders
//! and implements the callbacks it fires.
//!
//! ## Features
//!
//! - **Palette drag and drop** - Drop a chip to create a node with a fresh id
//! - **Declarative compatibility** - Kind pairs allowed via [`CompatibilityTable`]
//! - **Composable validation** - [`LinkValidator`] trait with [`CompositeValidator`]
//! - **Change passthrough** - Move, select and delete reported by the UI
//! - **Per-kind styles** - Colors and connection handles via [`RendererRegistry`]
//! - **JSON configuration** - Palettes and rules loaded with [`EditorConfig`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use slint_block_canvas::{CanvasController, NodeId};
//!
//! let ctrl = CanvasController::new();
//!
//! ctrl.handle_palette_drag_started("1");
//! let a = ctrl.handle_pending_drop(260.0, 140.0).unwrap(); // NodeId(3) at (10, 100)
//! ctrl.handle_palette_drag_started("2");
//! let b = ctrl.handle_pending_drop(400.0, 200.0).unwrap(); // NodeId(4) at (150, 160)
//!
//! assert!(ctrl.handle_connect(a, b).is_ok());
//! assert!(ctrl.handle_connect(b, a).is_err());
//! ```
//!
//! The models are bound to a window through
//! [`CanvasController::nodes_model_as`] and
//! [`CanvasController::edges_model_as`], which convert each row into the
//! struct generated from the `.slint` file. See [`CanvasController`] for
//! wiring the models and callbacks to a Slint window.

pub mod changes;
pub mod compat;
pub mod config;
pub mod controller;
pub mod graph;
pub mod ids;
pub mod kind;
pub mod notice;
pub mod palette;
pub mod render;
pub mod selection;

pub use changes::{
    apply_edge_change, apply_node_change, sync_selection_flags, EdgeChange, NodeChange,
};
pub use compat::CompatibilityTable;
pub use config::{ConfigError, DropOffset, EditorConfig};
pub use controller::CanvasController;
pub use graph::{
    CanvasEdge, CanvasNode, EdgeMarker, GraphLogic, LinkModel, MovableNode, NodeModel,
    // Connection validation framework
    validate_link, CompositeValidator, KindCompatibilityValidator, LinkValidator,
    NoDuplicatesValidator, ValidationError, ValidationResult,
};
pub use ids::{EdgeId, IdAllocator, NodeId};
pub use kind::NodeKind;
pub use notice::{LogNotices, Notice, NoticeLog, NoticeSink};
pub use palette::{BlockArchetype, DragPayload, Palette};
pub use render::{
    parse_hex_color, HandleDirection, HandleSide, HandleSpec, NodeStyle, RendererRegistry,
};
pub use selection::SelectionManager;
