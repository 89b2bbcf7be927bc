//! Per-kind presentation.
//!
//! The UI toolkit draws nodes; this module only declares *how* each kind
//! looks: background color, border, and which single connection handle the
//! node exposes. Styles are registered once in a [`RendererRegistry`] and
//! never change afterwards.

use crate::config::ConfigError;
use crate::graph::CanvasNode;
use crate::kind::NodeKind;
use crate::notice::Notice;
use serde::Deserialize;
use slint::Color;
use std::collections::HashMap;

/// Direction of a connection handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleDirection {
    /// Edges may only start here.
    Output,
    /// Edges may only end here.
    Input,
}

/// Side of the node the handle is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleSide {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleSpec {
    pub direction: HandleDirection,
    pub side: HandleSide,
    pub color: Color,
}

impl HandleSpec {
    /// Default placement for a direction: outputs right, inputs left.
    pub fn for_direction(direction: HandleDirection) -> Self {
        match direction {
            HandleDirection::Output => Self::output(),
            HandleDirection::Input => Self::input(),
        }
    }

    /// Output handle on the right edge.
    pub fn output() -> Self {
        Self {
            direction: HandleDirection::Output,
            side: HandleSide::Right,
            color: Color::from_rgb_u8(0x55, 0x55, 0x55),
        }
    }

    /// Input handle on the left edge.
    pub fn input() -> Self {
        Self {
            direction: HandleDirection::Input,
            side: HandleSide::Left,
            color: Color::from_rgb_u8(0x55, 0x55, 0x55),
        }
    }
}

/// Visual description of one node kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    pub background: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub border_radius: f32,
    pub padding: f32,
    pub handle: HandleSpec,
}

impl NodeStyle {
    pub fn new(background: Color, handle: HandleSpec) -> Self {
        Self {
            background,
            border_color: Color::from_rgb_u8(0x33, 0x33, 0x33),
            border_width: 1.0,
            border_radius: 5.0,
            padding: 10.0,
            handle,
        }
    }

    /// Green block with an output handle.
    pub fn emitter() -> Self {
        Self::new(Color::from_rgb_u8(0xb9, 0xfb, 0xc0), HandleSpec::output())
    }

    /// Yellow block with an input handle.
    pub fn receiver() -> Self {
        Self::new(Color::from_rgb_u8(0xff, 0xe0, 0x66), HandleSpec::input())
    }

    /// Style for kinds nobody registered.
    pub fn fallback() -> Self {
        Self::new(Color::from_rgb_u8(0xff, 0xff, 0xff), HandleSpec::output())
    }
}

/// Kind → style lookup.
#[derive(Clone, Debug, Default)]
pub struct RendererRegistry {
    styles: HashMap<NodeKind, NodeStyle>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the emitter and receiver styles.
    pub fn with_builtin_kinds() -> Self {
        Self::new()
            .register(NodeKind::emitter(), NodeStyle::emitter())
            .register(NodeKind::receiver(), NodeStyle::receiver())
    }

    pub fn register(mut self, kind: impl Into<NodeKind>, style: NodeStyle) -> Self {
        self.styles.insert(kind.into(), style);
        self
    }

    pub fn contains(&self, kind: &NodeKind) -> bool {
        self.styles.contains_key(kind)
    }

    pub fn get(&self, kind: &NodeKind) -> Option<&NodeStyle> {
        self.styles.get(kind)
    }

    /// Style for `kind`, or [`NodeStyle::fallback`] if unregistered.
    pub fn style_for(&self, kind: &NodeKind) -> NodeStyle {
        self.styles.get(kind).copied().unwrap_or_else(NodeStyle::fallback)
    }

    /// Right-click on a node. Only acknowledges the event.
    pub fn context_menu(&self, node: &CanvasNode) -> Notice {
        Notice::ContextMenu {
            node: node.id,
            kind: node.kind.clone(),
        }
    }
}

/// Parse `#rrggbb` / `#rgb` (leading `#` optional) into a color.
pub fn parse_hex_color(text: &str) -> Result<Color, ConfigError> {
    let invalid = || ConfigError::InvalidColor(text.to_string());
    let hex = text.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match hex.len() {
        6 => Ok(Color::from_rgb_u8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            // #abc == #aabbcc
            let r = channel(&hex[0..1])? * 17;
            let g = channel(&hex[1..2])? * 17;
            let b = channel(&hex[2..3])? * 17;
            Ok(Color::from_rgb_u8(r, g, b))
        }
        _ => Err(invalid()),
    }
}
