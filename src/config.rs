//! Editor configuration.
//!
//! [`EditorConfig::default`] is the built-in two-block editor. A JSON file
//! can describe other palettes and connection rules:
//!
//! ```json
//! {
//!   "palette": [
//!     { "id": "1", "kind": "emitter",  "label": "Block A", "color": "#b9fbc0", "handle": "output" },
//!     { "id": "2", "kind": "receiver", "label": "Block B", "color": "#ffe066", "handle": "input" }
//!   ],
//!   "connections": [ { "from": "emitter", "to": "receiver" } ],
//!   "drop_offset": { "x": 250, "y": 40 },
//!   "allow_duplicate_edges": true
//! }
//! ```

use crate::compat::CompatibilityTable;
use crate::graph::ValidationError;
use crate::kind::NodeKind;
use crate::palette::{BlockArchetype, Palette};
use crate::render::{parse_hex_color, HandleDirection, HandleSpec, NodeStyle, RendererRegistry};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Color string is not `#rgb` or `#rrggbb`
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Two palette entries share an id
    #[error("Duplicate archetype id: {0}")]
    DuplicateArchetype(String),

    /// Numeric archetype id at `i32::MAX`, leaving no id for nodes
    #[error("Archetype id {0} leaves no room for node ids")]
    ArchetypeIdTooLarge(String),

    /// Palette entry with an empty kind tag
    #[error("Archetype {0} has an empty kind")]
    EmptyKind(String),

    /// Connection rule names a kind that no palette entry creates
    #[error("Connection rule references unknown kind: {0}")]
    UnknownKind(NodeKind),
}

/// Fixed correction subtracted from the pointer position on drop.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct DropOffset {
    pub x: f32,
    pub y: f32,
}

impl Default for DropOffset {
    fn default() -> Self {
        Self { x: 250.0, y: 40.0 }
    }
}

impl DropOffset {
    /// Canvas position for a pointer position.
    pub fn apply(&self, pointer_x: f32, pointer_y: f32) -> (f32, f32) {
        (pointer_x - self.x, pointer_y - self.y)
    }
}

#[derive(Clone, Debug)]
pub struct EditorConfig {
    pub palette: Palette,
    pub compatibility: CompatibilityTable,
    pub renderers: RendererRegistry,
    pub drop_offset: DropOffset,
    /// When false, a second edge between the same two nodes is refused.
    pub allow_duplicate_edges: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            palette: Palette::builtin(),
            compatibility: CompatibilityTable::emitter_to_receiver(),
            renderers: RendererRegistry::with_builtin_kinds(),
            drop_offset: DropOffset::default(),
            allow_duplicate_edges: true,
        }
    }
}

#[derive(Deserialize)]
struct RawConfig {
    palette: Vec<RawArchetype>,
    #[serde(default)]
    connections: Vec<RawRule>,
    #[serde(default)]
    drop_offset: DropOffset,
    #[serde(default = "default_true")]
    allow_duplicate_edges: bool,
}

#[derive(Deserialize)]
struct RawArchetype {
    id: String,
    kind: NodeKind,
    label: String,
    color: String,
    #[serde(default = "default_handle")]
    handle: HandleDirection,
}

#[derive(Deserialize)]
struct RawRule {
    from: NodeKind,
    to: NodeKind,
    #[serde(default = "default_true")]
    allowed: bool,
}

fn default_true() -> bool {
    true
}

fn default_handle() -> HandleDirection {
    HandleDirection::Output
}

impl EditorConfig {
    /// Parse and check a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        let mut archetypes = Vec::with_capacity(raw.palette.len());
        let mut renderers = RendererRegistry::new();

        for entry in raw.palette {
            if !seen.insert(entry.id.clone()) {
                return Err(ConfigError::DuplicateArchetype(entry.id));
            }
            if entry.kind.is_empty() {
                return Err(ConfigError::EmptyKind(entry.id));
            }
            let color = parse_hex_color(&entry.color)?;
            renderers = renderers.register(
                entry.kind.clone(),
                NodeStyle::new(color, HandleSpec::for_direction(entry.handle)),
            );
            let archetype = BlockArchetype::new(entry.id, entry.kind, entry.label, color);
            if archetype.numeric_id() == Some(i32::MAX) {
                return Err(ConfigError::ArchetypeIdTooLarge(archetype.id.to_string()));
            }
            archetypes.push(archetype);
        }

        let palette = Palette::new(archetypes);
        let mut compatibility = CompatibilityTable::new();
        for rule in raw.connections {
            for kind in [&rule.from, &rule.to] {
                if palette.by_kind(kind).is_none() {
                    return Err(ConfigError::UnknownKind(kind.clone()));
                }
            }
            compatibility.set(rule.from, rule.to, rule.allowed);
        }

        Ok(Self {
            palette,
            compatibility,
            renderers,
            drop_offset: raw.drop_offset,
            allow_duplicate_edges: raw.allow_duplicate_edges,
        })
    }

    /// Read a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Text shown when a connection is refused for `reason`.
    ///
    /// Kind mismatches list the allowed pairs; every other reason is
    /// described as-is.
    pub fn message_for(&self, reason: &ValidationError) -> String {
        match reason {
            ValidationError::KindMismatch { .. } => self.rejection_message(),
            other => other.to_string(),
        }
    }

    /// Text listing the allowed pairs by palette label.
    pub fn rejection_message(&self) -> String {
        let pairs = self.compatibility.allowed_pairs();
        match pairs.as_slice() {
            [] => "No connections are allowed".to_string(),
            [(source, target)] => format!(
                "Only {} can connect to {}",
                self.palette.label_for(source),
                self.palette.label_for(target)
            ),
            _ => {
                let listed: Vec<String> = pairs
                    .iter()
                    .map(|(s, t)| {
                        format!("{} -> {}", self.palette.label_for(s), self.palette.label_for(t))
                    })
                    .collect();
                format!("Allowed connections: {}", listed.join(", "))
            }
        }
    }
}
