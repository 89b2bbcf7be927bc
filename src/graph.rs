use crate::compat::CompatibilityTable;
use crate::ids::{EdgeId, NodeId};
use crate::kind::NodeKind;
use crate::selection::SelectionManager;
use slint::{Color, Model, SharedString, VecModel};
use thiserror::Error;

/// Trait for node data that the canvas logic needs to look at.
///
/// Implement this for your own node row type if [`CanvasNode`] does not fit.
pub trait NodeModel {
    /// Unique identifier for the node
    fn id(&self) -> NodeId;
    /// Immutable kind of the node
    fn kind(&self) -> &NodeKind;
}

/// Trait for edge data to support graph topology and rendering operations.
///
/// # Example
///
/// ```ignore
/// struct MyEdge {
///     id: EdgeId,
///     from: NodeId,
///     to: NodeId,
///     weight: f32,  // custom field
/// }
///
/// impl LinkModel for MyEdge {
///     fn id(&self) -> EdgeId { self.id }
///     fn source(&self) -> NodeId { self.from }
///     fn target(&self) -> NodeId { self.to }
/// }
/// ```
pub trait LinkModel {
    /// Unique identifier for the edge
    fn id(&self) -> EdgeId;
    /// Node the edge starts at (an emitter for the built-in kinds)
    fn source(&self) -> NodeId;
    /// Node the edge ends at (a receiver for the built-in kinds)
    fn target(&self) -> NodeId;
    /// Color for rendering the edge (default: dark grey)
    fn color(&self) -> Color {
        Color::from_rgb_u8(0xb1, 0xb1, 0xb7)
    }
}

/// Trait for nodes that can be moved (dragged) in the editor.
/// This allows generic logic to update node positions.
pub trait MovableNode: NodeModel + Clone + 'static {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn set_x(&mut self, x: f32);
    fn set_y(&mut self, y: f32);
}

/// A node row as handed to the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub x: f32,
    pub y: f32,
    pub label: SharedString,
    pub selected: bool,
}

impl CanvasNode {
    pub fn new(id: NodeId, kind: NodeKind, x: f32, y: f32, label: impl Into<SharedString>) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            label: label.into(),
            selected: false,
        }
    }
}

impl NodeModel for CanvasNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

impl MovableNode for CanvasNode {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }

    fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    fn set_y(&mut self, y: f32) {
        self.y = y;
    }
}

/// Arrowhead drawn at the end of an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeMarker {
    #[default]
    None,
    ArrowClosed,
}

/// An edge row as handed to the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub marker_end: EdgeMarker,
    pub color: Color,
    pub selected: bool,
}

impl CanvasEdge {
    /// Edge with a closed arrowhead at the target end.
    pub fn arrow_closed(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            marker_end: EdgeMarker::ArrowClosed,
            color: Color::from_rgb_u8(0xb1, 0xb1, 0xb7),
            selected: false,
        }
    }
}

impl LinkModel for CanvasEdge {
    fn id(&self) -> EdgeId {
        self.id
    }

    fn source(&self) -> NodeId {
        self.source
    }

    fn target(&self) -> NodeId {
        self.target
    }

    fn color(&self) -> Color {
        self.color
    }
}

/// Helper functions for graph operations
pub struct GraphLogic;

impl GraphLogic {
    /// Find all edges that start or end at a specific node
    pub fn find_edges_connected_to_node<I, L>(node_id: NodeId, edges: I) -> Vec<EdgeId>
    where
        I: IntoIterator<Item = L>,
        L: LinkModel,
    {
        edges
            .into_iter()
            .filter(|edge| edge.source() == node_id || edge.target() == node_id)
            .map(|edge| edge.id())
            .collect()
    }

    /// Apply a drag translation to selected nodes in a model
    pub fn commit_drag<T>(
        model: &VecModel<T>,
        selection: &SelectionManager,
        delta_x: f32,
        delta_y: f32,
    ) where
        T: MovableNode,
    {
        for i in 0..model.row_count() {
            if let Some(mut node) = model.row_data(i) {
                if selection.contains(node.id()) {
                    node.set_x(node.x() + delta_x);
                    node.set_y(node.y() + delta_y);
                    model.set_row_data(i, node);
                }
            }
        }
    }

    /// Check if an edge with the given direction already exists
    pub fn duplicate_edge_exists<I, L>(source: NodeId, target: NodeId, edges: I) -> bool
    where
        I: IntoIterator<Item = L>,
        L: LinkModel,
    {
        edges
            .into_iter()
            .any(|edge| edge.source() == source && edge.target() == target)
    }

    /// Find the first row matching `predicate`, with its index
    pub fn find_row<T, F>(model: &VecModel<T>, predicate: F) -> Option<(usize, T)>
    where
        T: Clone + 'static,
        F: Fn(&T) -> bool,
    {
        (0..model.row_count())
            .filter_map(|i| model.row_data(i).map(|row| (i, row)))
            .find(|(_, row)| predicate(row))
    }

    /// Find a node by ID in a VecModel
    ///
    /// # Example
    /// ```ignore
    /// let (index, node) = GraphLogic::find_node_by_id(&nodes_model, NodeId(3)).unwrap();
    /// ```
    pub fn find_node_by_id<T>(model: &VecModel<T>, id: NodeId) -> Option<(usize, T)>
    where
        T: NodeModel + Clone + 'static,
    {
        Self::find_row(model, |node| node.id() == id)
    }

    /// Remove every row matching `predicate`; returns how many were removed
    pub fn remove_rows<T, F>(model: &VecModel<T>, predicate: F) -> usize
    where
        T: Clone + 'static,
        F: Fn(&T) -> bool,
    {
        let mut removed = 0;
        // Back to front so indices stay valid.
        for i in (0..model.row_count()).rev() {
            if model.row_data(i).is_some_and(|row| predicate(&row)) {
                model.remove(i);
                removed += 1;
            }
        }
        removed
    }
}

// ============================================================================
// Connection Validation Framework
// ============================================================================

/// Result of connection validation with optional rejection reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Connection is valid
    Valid,
    /// Connection is invalid with a reason
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Check if the result is valid
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Combine two results (AND logic): returns first error if any
    pub fn and(self, other: ValidationResult) -> ValidationResult {
        match self {
            ValidationResult::Valid => other,
            invalid => invalid,
        }
    }

    /// Convert into a `Result` for use with `?`
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(err) => Err(err),
        }
    }
}

/// Reasons why a connection was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Node does not exist in the node collection
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),
    /// The compatibility table does not allow this kind pair
    #[error("Cannot connect {source_kind} to {target_kind}")]
    KindMismatch {
        source_kind: NodeKind,
        target_kind: NodeKind,
    },
    /// An edge between these nodes already exists
    #[error("Edge already exists")]
    DuplicateEdge,
    /// The canvas has handed out every available id
    #[error("No ids left")]
    IdsExhausted,
    /// Custom validation failure
    #[error("{0}")]
    Custom(String),
}

/// Trait for custom connection validation logic.
///
/// Implement this to add custom rules. Use with [`validate_link`] or
/// compose with [`CompositeValidator`].
///
/// The trait is generic over:
/// - `N`: The node type (must implement [`NodeModel`] to be useful)
/// - `L`: The edge type for accessing existing edges
///
/// # Example
///
/// ```ignore
/// struct NoSelfLoops;
///
/// impl<N, L> LinkValidator<N, L> for NoSelfLoops {
///     fn validate(&self, source: NodeId, target: NodeId, _: &[N], _: &[L]) -> ValidationResult {
///         if source == target {
///             ValidationResult::Invalid(ValidationError::Custom("no loops".into()))
///         } else {
///             ValidationResult::Valid
///         }
///     }
/// }
/// ```
pub trait LinkValidator<N = CanvasNode, L = CanvasEdge> {
    /// Check if an edge from `source` to `target` is allowed.
    ///
    /// Must not have side effects: callers use it for hover feedback as
    /// well as before committing.
    fn validate(
        &self,
        source: NodeId,
        target: NodeId,
        nodes: &[N],
        edges: &[L],
    ) -> ValidationResult;
}

/// Validator backed by a [`CompatibilityTable`].
///
/// 1. Both nodes must exist
/// 2. `(source kind, target kind)` must be allowed by the table
#[derive(Clone, Debug)]
pub struct KindCompatibilityValidator {
    table: CompatibilityTable,
}

impl KindCompatibilityValidator {
    pub fn new(table: CompatibilityTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CompatibilityTable {
        &self.table
    }
}

impl Default for KindCompatibilityValidator {
    fn default() -> Self {
        Self::new(CompatibilityTable::emitter_to_receiver())
    }
}

impl<N, L> LinkValidator<N, L> for KindCompatibilityValidator
where
    N: NodeModel,
{
    fn validate(
        &self,
        source: NodeId,
        target: NodeId,
        nodes: &[N],
        _edges: &[L],
    ) -> ValidationResult {
        let kind_of = move |id: NodeId| nodes.iter().find(|n| n.id() == id).map(|n| n.kind());

        let source_kind = match kind_of(source) {
            Some(k) => k,
            None => return ValidationResult::Invalid(ValidationError::NodeNotFound(source)),
        };
        let target_kind = match kind_of(target) {
            Some(k) => k,
            None => return ValidationResult::Invalid(ValidationError::NodeNotFound(target)),
        };

        if self.table.is_allowed(source_kind, target_kind) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::KindMismatch {
                source_kind: source_kind.clone(),
                target_kind: target_kind.clone(),
            })
        }
    }
}

/// Validator that prevents duplicate edges
///
/// This wraps [`GraphLogic::duplicate_edge_exists`].
#[derive(Clone, Debug, Default)]
pub struct NoDuplicatesValidator;

impl<N, L> LinkValidator<N, L> for NoDuplicatesValidator
where
    L: LinkModel + Clone,
{
    fn validate(
        &self,
        source: NodeId,
        target: NodeId,
        _nodes: &[N],
        edges: &[L],
    ) -> ValidationResult {
        if GraphLogic::duplicate_edge_exists(source, target, edges.iter().cloned()) {
            ValidationResult::Invalid(ValidationError::DuplicateEdge)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Composite validator that combines multiple validators
///
/// All validators must return Valid for the edge to be valid (AND logic).
/// Returns the first error encountered (short-circuits on failure).
///
/// # Example
///
/// ```ignore
/// let validator = CompositeValidator::new()
///     .add(KindCompatibilityValidator::default())
///     .add(NoDuplicatesValidator);
///
/// let result = validator.validate(source, target, &nodes, &edges);
/// ```
pub struct CompositeValidator<N = CanvasNode, L = CanvasEdge> {
    validators: Vec<Box<dyn LinkValidator<N, L>>>,
}

impl<N, L> Default for CompositeValidator<N, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, L> CompositeValidator<N, L> {
    /// Create a new empty composite validator
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Add a validator to the composite
    ///
    /// Validators are checked in the order they were added.
    pub fn add<V: LinkValidator<N, L> + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<N, L> LinkValidator<N, L> for CompositeValidator<N, L> {
    fn validate(
        &self,
        source: NodeId,
        target: NodeId,
        nodes: &[N],
        edges: &[L],
    ) -> ValidationResult {
        for v in &self.validators {
            let result = v.validate(source, target, nodes, edges);
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}

/// Convenience function to validate an edge with any validator
///
/// # Example
///
/// ```ignore
/// match validate_link(source, target, &nodes, &edges, &validator) {
///     ValidationResult::Valid => { /* create edge */ }
///     ValidationResult::Invalid(err) => log::warn!("Cannot connect: {}", err),
/// }
/// ```
pub fn validate_link<V, N, L>(
    source: NodeId,
    target: NodeId,
    nodes: &[N],
    edges: &[L],
    validator: &V,
) -> ValidationResult
where
    V: LinkValidator<N, L>,
{
    validator.validate(source, target, nodes, edges)
}

// ============================================================================
// Tests
// ============================================================================
