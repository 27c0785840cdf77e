//! Retained widget tree.
//!
//! Widgets live in an arena ([`WidgetTree`]) keyed by [`WidgetId`]. Each
//! [`WidgetNode`] carries the attributes a host toolkit exposes on its base
//! widget type: visibility, padding, layout parameters, minimum height,
//! background, click notification and the geometry realized by the last
//! layout pass. Containers additionally hold an ordered child list.

use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use crate::error::{HostError, HostResult};
use crate::geometry::{Color, Insets, Rect};
use crate::gravity::Gravity;
use crate::logging::targets;
use crate::resources::DrawableRes;
use crate::signal::Signal;

new_key_type! {
    /// A stable handle to a widget in a [`WidgetTree`].
    ///
    /// Ids become invalid when the widget is destroyed.
    pub struct WidgetId;
}

/// Widget visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Drawn and occupies space.
    #[default]
    Visible,
    /// Not drawn but still occupies space.
    Invisible,
    /// Not drawn and takes no space.
    Gone,
}

/// A declared width or height.
///
/// A dimension is either one of the two sizing sentinels or an explicit
/// magnitude, never both.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Explicit size in device pixels, padding included.
    Exact(f32),
    /// Size to content.
    #[default]
    WrapContent,
    /// Fill the space offered by the parent.
    MatchParent,
}

impl Dimension {
    /// An explicit magnitude; negative values clamp to zero.
    pub fn exact(px: f32) -> Self {
        Self::Exact(px.max(0.0))
    }

    /// Whether this is `WrapContent` or `MatchParent`.
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Exact(_))
    }

    /// Add `extra` to an explicit magnitude; sentinels pass through unchanged.
    pub fn grow(self, extra: f32) -> Self {
        match self {
            Self::Exact(px) => Self::Exact(px + extra),
            sentinel => sentinel,
        }
    }
}

/// Per-widget layout parameters consumed by the parent container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutParams {
    pub width: Dimension,
    pub height: Dimension,
    pub margins: Insets,
    pub gravity: Gravity,
}

impl LayoutParams {
    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self {
            width,
            height,
            margins: Insets::ZERO,
            gravity: Gravity::NONE,
        }
    }

    pub fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }
}

/// Stacking direction of a linear container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// How a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContainerLayout {
    /// Children stacked one after another with `spacing` between them.
    Linear { orientation: Orientation, spacing: f32 },
    /// Children placed independently by gravity and margins, possibly overlapping.
    Frame,
}

impl ContainerLayout {
    /// A top-to-bottom stack.
    pub fn vertical() -> Self {
        Self::Linear {
            orientation: Orientation::Vertical,
            spacing: 0.0,
        }
    }

    /// A left-to-right stack.
    pub fn horizontal() -> Self {
        Self::Linear {
            orientation: Orientation::Horizontal,
            spacing: 0.0,
        }
    }

    /// Whether this is a linear container of either orientation.
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::Linear { .. })
    }

    /// Parameters assumed for a child that has none of its own.
    pub fn default_layout_params(&self) -> LayoutParams {
        match self {
            Self::Frame => LayoutParams::new(Dimension::MatchParent, Dimension::MatchParent),
            Self::Linear {
                orientation: Orientation::Vertical,
                ..
            } => LayoutParams::new(Dimension::MatchParent, Dimension::WrapContent),
            Self::Linear {
                orientation: Orientation::Horizontal,
                ..
            } => LayoutParams::new(Dimension::WrapContent, Dimension::WrapContent),
        }
    }
}

/// Content of a text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    pub text: String,
    /// Text size in scale-independent pixels.
    pub text_size: f32,
    pub color: Color,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            text_size: 14.0,
            color: Color::BLACK,
        }
    }
}

/// Content of an image widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageContent {
    pub source: Option<DrawableRes>,
}

/// What a widget is.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// A plain widget with no content of its own.
    View,
    /// A text-display widget.
    Label(TextContent),
    /// An image-display widget.
    Image(ImageContent),
    /// A widget holding ordered children.
    Container(ContainerLayout),
}

impl WidgetKind {
    /// Short name used in diagnostics and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Label(_) => "label",
            Self::Image(_) => "image",
            Self::Container(ContainerLayout::Frame) => "frame",
            Self::Container(ContainerLayout::Linear { .. }) => "linear container",
        }
    }
}

/// Layered background: the color is drawn beneath the drawable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Background {
    pub color: Option<Color>,
    pub drawable: Option<DrawableRes>,
}

/// A single widget in the tree.
pub struct WidgetNode {
    name: String,
    kind: WidgetKind,
    visibility: Visibility,
    padding: Insets,
    layout_params: Option<LayoutParams>,
    minimum_height: f32,
    background: Background,
    geometry: Rect,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    clicked: Arc<Signal<WidgetId>>,
}

impl WidgetNode {
    fn new(kind: WidgetKind) -> Self {
        Self {
            name: String::new(),
            kind,
            visibility: Visibility::Visible,
            padding: Insets::ZERO,
            layout_params: None,
            minimum_height: 0.0,
            background: Background::default(),
            geometry: Rect::ZERO,
            parent: None,
            children: Vec::new(),
            clicked: Arc::new(Signal::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut WidgetKind {
        &mut self.kind
    }

    /// The container layout, if this widget is a container.
    pub fn container_layout(&self) -> Option<ContainerLayout> {
        match self.kind {
            WidgetKind::Container(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn layout_params(&self) -> Option<&LayoutParams> {
        self.layout_params.as_ref()
    }

    pub fn layout_params_mut(&mut self) -> Option<&mut LayoutParams> {
        self.layout_params.as_mut()
    }

    pub fn set_layout_params(&mut self, params: LayoutParams) {
        self.layout_params = Some(params);
    }

    pub fn minimum_height(&self) -> f32 {
        self.minimum_height
    }

    pub fn set_minimum_height(&mut self, height: f32) {
        self.minimum_height = height.max(0.0);
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn background_mut(&mut self) -> &mut Background {
        &mut self.background
    }

    /// Geometry realized by the last layout pass, relative to the parent.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub(crate) fn set_geometry(&mut self, geometry: Rect) {
        self.geometry = geometry;
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// The click notification signal of this widget.
    pub fn clicked(&self) -> &Arc<Signal<WidgetId>> {
        &self.clicked
    }
}

/// Arena of widgets with parent-child relationships.
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Create a detached widget.
    pub fn create(&mut self, kind: WidgetKind) -> WidgetId {
        let kind_name = kind.name();
        let id = self.nodes.insert(WidgetNode::new(kind));
        tracing::trace!(target: targets::OBJECT, ?id, kind = kind_name, "created widget");
        id
    }

    /// Destroy a widget and its whole subtree.
    pub fn destroy(&mut self, id: WidgetId) -> HostResult<()> {
        let doomed = self.collect_subtree(id)?;
        self.detach(id)?;
        for widget in doomed {
            self.nodes.remove(widget);
        }
        tracing::trace!(target: targets::OBJECT, ?id, "destroyed widget subtree");
        Ok(())
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: WidgetId) -> HostResult<&WidgetNode> {
        self.nodes.get(id).ok_or(HostError::InvalidWidgetId(id))
    }

    pub fn get_mut(&mut self, id: WidgetId) -> HostResult<&mut WidgetNode> {
        self.nodes.get_mut(id).ok_or(HostError::InvalidWidgetId(id))
    }

    /// Insert `child` into `parent` at `index`, shifting later children.
    ///
    /// A child that already has a parent is detached from it first.
    pub fn insert_child(&mut self, parent: WidgetId, index: usize, child: WidgetId) -> HostResult<()> {
        self.get(child)?;
        let parent_node = self.get(parent)?;
        if parent_node.container_layout().is_none() {
            return Err(HostError::NotAContainer(parent));
        }
        if self.is_ancestor_or_self(child, parent)? {
            return Err(HostError::CircularParentage(child));
        }

        let old_parent = self.get(child)?.parent;
        let mut len = self.get(parent)?.children.len();
        if old_parent == Some(parent) {
            len -= 1;
        }
        if index > len {
            return Err(HostError::IndexOutOfBounds { index, len });
        }

        if let Some(old_parent) = old_parent {
            tracing::debug!(target: targets::OBJECT, ?child, ?old_parent, new_parent = ?parent, "reparenting widget");
        }
        self.detach(child)?;
        self.get_mut(parent)?.children.insert(index, child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Append `child` as the last child of `parent`.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> HostResult<()> {
        let len = self.child_count(parent)?;
        self.insert_child(parent, len, child)
    }

    /// Remove `child` from its parent, if any.
    pub fn detach(&mut self, child: WidgetId) -> HostResult<()> {
        if let Some(parent) = self.get_mut(child)?.parent.take() {
            let parent_node = self.get_mut(parent)?;
            parent_node.children.retain(|&c| c != child);
        }
        Ok(())
    }

    pub fn child_count(&self, parent: WidgetId) -> HostResult<usize> {
        let node = self.get(parent)?;
        if node.container_layout().is_none() {
            return Err(HostError::NotAContainer(parent));
        }
        Ok(node.children.len())
    }

    /// The child at `index`, or `None` when the container has fewer children.
    pub fn child_at(&self, parent: WidgetId, index: usize) -> HostResult<Option<WidgetId>> {
        let node = self.get(parent)?;
        if node.container_layout().is_none() {
            return Err(HostError::NotAContainer(parent));
        }
        Ok(node.children.get(index).copied())
    }

    pub fn children(&self, parent: WidgetId) -> HostResult<&[WidgetId]> {
        Ok(&self.get(parent)?.children)
    }

    pub fn parent(&self, id: WidgetId) -> HostResult<Option<WidgetId>> {
        Ok(self.get(id)?.parent)
    }

    /// Walk up to the widget with no parent.
    pub fn root_of(&self, id: WidgetId) -> HostResult<WidgetId> {
        let mut current = id;
        while let Some(parent) = self.get(current)?.parent {
            current = parent;
        }
        Ok(current)
    }

    /// Every widget without a parent.
    pub fn roots(&self) -> Vec<WidgetId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether `ancestor` is `id` itself or one of its ancestors.
    /// Whether `id` is `ancestor` or lies somewhere below it.
    pub fn is_ancestor_or_self(&self, ancestor: WidgetId, id: WidgetId) -> HostResult<bool> {
        let mut current = Some(id);
        while let Some(widget) = current {
            if widget == ancestor {
                return Ok(true);
            }
            current = self.get(widget)?.parent;
        }
        Ok(false)
    }

    fn collect_subtree(&self, id: WidgetId) -> HostResult<Vec<WidgetId>> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(widget) = stack.pop() {
            result.push(widget);
            stack.extend(self.get(widget)?.children.iter().copied());
        }
        Ok(result)
    }
}
