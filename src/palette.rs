//! The block palette and the drag payload it produces.

use crate::kind::NodeKind;
use slint::{Color, SharedString};
use std::collections::BTreeMap;

/// A creatable block type shown in the palette.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockArchetype {
    pub id: SharedString,
    pub kind: NodeKind,
    pub label: SharedString,
    /// Chip color in the palette; matches the node style of the kind.
    pub color: Color,
}

impl BlockArchetype {
    pub fn new(
        id: impl Into<SharedString>,
        kind: impl Into<NodeKind>,
        label: impl Into<SharedString>,
        color: Color,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            label: label.into(),
            color,
        }
    }

    /// Numeric value of the id, if it is one.
    pub fn numeric_id(&self) -> Option<i32> {
        self.id.as_str().trim().parse().ok()
    }

    /// Payload to attach when the user starts dragging this chip.
    pub fn drag_payload(&self) -> DragPayload {
        DragPayload::new()
            .with_data(DragPayload::KIND_FORMAT, self.kind.as_str())
            .with_data(DragPayload::LABEL_FORMAT, self.label.as_str())
    }
}

/// Static, ordered list of archetypes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Palette {
    archetypes: Vec<BlockArchetype>,
}

impl Palette {
    pub fn new(archetypes: Vec<BlockArchetype>) -> Self {
        Self { archetypes }
    }

    /// "Block A" (emitter) and "Block B" (receiver).
    pub fn builtin() -> Self {
        Self::new(vec![
            BlockArchetype::new(
                "1",
                NodeKind::emitter(),
                "Block A",
                Color::from_rgb_u8(0xb9, 0xfb, 0xc0),
            ),
            BlockArchetype::new(
                "2",
                NodeKind::receiver(),
                "Block B",
                Color::from_rgb_u8(0xff, 0xe0, 0x66),
            ),
        ])
    }

    pub fn archetypes(&self) -> &[BlockArchetype] {
        &self.archetypes
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BlockArchetype> {
        self.archetypes.iter().find(|a| a.id.as_str() == id)
    }

    pub fn by_kind(&self, kind: &NodeKind) -> Option<&BlockArchetype> {
        self.archetypes.iter().find(|a| &a.kind == kind)
    }

    /// Display label for a kind, falling back to the kind tag itself.
    pub fn label_for(&self, kind: &NodeKind) -> SharedString {
        self.by_kind(kind)
            .map(|a| a.label.clone())
            .unwrap_or_else(|| kind.as_str().into())
    }

    /// Drag start on the chip with the given archetype id.
    pub fn drag_start(&self, id: &str) -> Option<DragPayload> {
        self.get(id).map(BlockArchetype::drag_payload)
    }

    /// Highest numeric archetype id, used to seed node ids.
    pub fn max_numeric_id(&self) -> Option<i32> {
        self.archetypes.iter().filter_map(BlockArchetype::numeric_id).max()
    }
}

/// Data carried from a palette chip to the canvas during drag and drop.
///
/// Modeled on platform drag payloads: string values keyed by format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragPayload {
    data: BTreeMap<String, String>,
}

impl DragPayload {
    /// Format carrying the kind tag.
    pub const KIND_FORMAT: &'static str = "application/x-block-kind";
    /// Format carrying the display label.
    pub const LABEL_FORMAT: &'static str = "label";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, format: &str, value: impl Into<String>) -> Self {
        self.set_data(format, value);
        self
    }

    pub fn set_data(&mut self, format: &str, value: impl Into<String>) {
        self.data.insert(format.to_string(), value.into());
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.data.get(format).map(String::as_str)
    }

    /// Kind tag, or `None` if missing or empty.
    pub fn kind(&self) -> Option<NodeKind> {
        self.get_data(Self::KIND_FORMAT)
            .filter(|tag| !tag.is_empty())
            .map(NodeKind::from)
    }

    /// Display label; empty if missing.
    pub fn label(&self) -> &str {
        self.get_data(Self::LABEL_FORMAT).unwrap_or_default()
    }
}
