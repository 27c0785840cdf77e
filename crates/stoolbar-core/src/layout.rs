//! Measurement and arrangement of a widget subtree.
//!
//! Declared `Exact` sizes include padding. `WrapContent` sizes are the
//! content size plus padding. `MatchParent` takes whatever the parent offers
//! after its own padding and the child's margins. Minimum height is applied
//! last.

use crate::error::HostResult;
use crate::geometry::{Rect, Size};
use crate::gravity::{HorizontalPlacement, VerticalPlacement};
use crate::logging::targets;
use crate::metrics::DisplayMetrics;
use crate::object::{
    ContainerLayout, Dimension, LayoutParams, Orientation, Visibility, WidgetId, WidgetKind,
    WidgetTree,
};
use crate::resources::Resources;

/// Width of one glyph relative to the text size.
const GLYPH_WIDTH_RATIO: f32 = 0.5;
/// Line height relative to the text size.
const LINE_HEIGHT_RATIO: f32 = 1.2;

pub(crate) struct LayoutEngine<'a> {
    tree: &'a mut WidgetTree,
    resources: &'a Resources,
    metrics: &'a DisplayMetrics,
}

impl<'a> LayoutEngine<'a> {
    pub(crate) fn new(
        tree: &'a mut WidgetTree,
        resources: &'a Resources,
        metrics: &'a DisplayMetrics,
    ) -> Self {
        Self {
            tree,
            resources,
            metrics,
        }
    }

    /// Measure and arrange the subtree rooted at `root` inside `available`.
    pub(crate) fn run(&mut self, root: WidgetId, available: Size) -> HostResult<Size> {
        let params = self.effective_params(root)?;
        let size = self.measure(root, available)?;
        let origin_x = params.margins.left;
        let origin_y = params.margins.top;
        self.arrange(root, Rect::new(origin_x, origin_y, size.width, size.height))?;
        Ok(size)
    }

    /// Layout parameters of `id`, falling back to the parent's defaults.
    fn effective_params(&self, id: WidgetId) -> HostResult<LayoutParams> {
        let node = self.tree.get(id)?;
        if let Some(params) = node.layout_params() {
            return Ok(*params);
        }
        let parent_layout = match node.parent() {
            Some(parent) => self.tree.get(parent)?.container_layout(),
            None => None,
        };
        Ok(parent_layout
            .map(|layout| layout.default_layout_params())
            .unwrap_or_else(|| LayoutParams::new(Dimension::MatchParent, Dimension::MatchParent)))
    }

    /// Outer size of `id` (margins excluded) given the space its parent offers.
    fn measure(&self, id: WidgetId, available: Size) -> HostResult<Size> {
        let node = self.tree.get(id)?;
        if node.visibility() == Visibility::Gone {
            return Ok(Size::ZERO);
        }
        let params = self.effective_params(id)?;
        let padding = node.padding();
        let offered = Size::new(
            (available.width - params.margins.horizontal()).max(0.0),
            (available.height - params.margins.vertical()).max(0.0),
        );

        let needs_content = matches!(params.width, Dimension::WrapContent)
            || matches!(params.height, Dimension::WrapContent);
        let content = if needs_content {
            let inner = Size::new(
                (offered.width - padding.horizontal()).max(0.0),
                (offered.height - padding.vertical()).max(0.0),
            );
            self.content_size(id, inner)?
        } else {
            Size::ZERO
        };

        let width = match params.width {
            Dimension::Exact(px) => px,
            Dimension::MatchParent => offered.width,
            Dimension::WrapContent => content.width + padding.horizontal(),
        };
        let height = match params.height {
            Dimension::Exact(px) => px,
            Dimension::MatchParent => offered.height,
            Dimension::WrapContent => content.height + padding.vertical(),
        };
        Ok(Size::new(width.max(0.0), height.max(node.minimum_height()).max(0.0)))
    }

    /// Size of the content of `id`, padding excluded.
    fn content_size(&self, id: WidgetId, inner: Size) -> HostResult<Size> {
        let node = self.tree.get(id)?;
        match node.kind() {
            WidgetKind::View => Ok(Size::ZERO),
            WidgetKind::Label(text) => {
                let px = self.metrics.sp_to_px(text.text_size);
                let glyphs = text.text.chars().count() as f32;
                Ok(Size::new(
                    (glyphs * px * GLYPH_WIDTH_RATIO).ceil(),
                    (px * LINE_HEIGHT_RATIO).ceil(),
                ))
            }
            WidgetKind::Image(image) => match image.source {
                Some(source) => match self.resources.drawable(source) {
                    Ok(drawable) => Ok(drawable.intrinsic_size),
                    Err(err) => {
                        tracing::warn!(target: targets::LAYOUT, ?id, %err, "image source missing, measuring as empty");
                        Ok(Size::ZERO)
                    }
                },
                None => Ok(Size::ZERO),
            },
            WidgetKind::Container(layout) => {
                let layout = *layout;
                let children: Vec<WidgetId> = node.children().to_vec();
                self.container_content_size(layout, &children, inner)
            }
        }
    }

    fn container_content_size(
        &self,
        layout: ContainerLayout,
        children: &[WidgetId],
        inner: Size,
    ) -> HostResult<Size> {
        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;
        let mut placed = 0usize;

        for &child in children {
            if self.tree.get(child)?.visibility() == Visibility::Gone {
                continue;
            }
            let margins = self.effective_params(child)?.margins;
            let size = self.measure(child, inner)?;
            let outer_w = size.width + margins.horizontal();
            let outer_h = size.height + margins.vertical();
            match layout {
                ContainerLayout::Linear {
                    orientation: Orientation::Vertical,
                    ..
                } => {
                    width = width.max(outer_w);
                    height += outer_h;
                }
                ContainerLayout::Linear {
                    orientation: Orientation::Horizontal,
                    ..
                } => {
                    width += outer_w;
                    height = height.max(outer_h);
                }
                ContainerLayout::Frame => {
                    width = width.max(outer_w);
                    height = height.max(outer_h);
                }
            }
            placed += 1;
        }

        if let ContainerLayout::Linear {
            orientation,
            spacing,
        } = layout
        {
            let gaps = placed.saturating_sub(1) as f32 * spacing;
            match orientation {
                Orientation::Vertical => height += gaps,
                Orientation::Horizontal => width += gaps,
            }
        }
        Ok(Size::new(width, height))
    }

    /// Assign `rect` (parent coordinates) to `id` and lay out its children.
    fn arrange(&mut self, id: WidgetId, rect: Rect) -> HostResult<()> {
        self.tree.get_mut(id)?.set_geometry(rect);

        let node = self.tree.get(id)?;
        let Some(layout) = node.container_layout() else {
            return Ok(());
        };
        let padding = node.padding();
        let children: Vec<WidgetId> = node.children().to_vec();
        let inner = Size::new(
            (rect.width() - padding.horizontal()).max(0.0),
            (rect.height() - padding.vertical()).max(0.0),
        );

        let mut cursor = match layout {
            ContainerLayout::Linear {
                orientation: Orientation::Vertical,
                ..
            } => padding.top,
            _ => padding.left,
        };

        for child in children {
            if self.tree.get(child)?.visibility() == Visibility::Gone {
                self.tree.get_mut(child)?.set_geometry(Rect::ZERO);
                continue;
            }
            let params = self.effective_params(child)?;
            let margins = params.margins;
            let size = self.measure(child, inner)?;

            let x_in = |placement: HorizontalPlacement| match placement {
                HorizontalPlacement::Left => padding.left + margins.left,
                HorizontalPlacement::Center => {
                    padding.left + (inner.width - size.width) / 2.0 + margins.left - margins.right
                }
                HorizontalPlacement::Right => {
                    padding.left + inner.width - size.width - margins.right
                }
            };
            let y_in = |placement: VerticalPlacement| match placement {
                VerticalPlacement::Top => padding.top + margins.top,
                VerticalPlacement::Center => {
                    padding.top + (inner.height - size.height) / 2.0 + margins.top - margins.bottom
                }
                VerticalPlacement::Bottom => {
                    padding.top + inner.height - size.height - margins.bottom
                }
            };

            let child_rect = match layout {
                ContainerLayout::Linear {
                    orientation: Orientation::Vertical,
                    spacing,
                } => {
                    let y = cursor + margins.top;
                    cursor = y + size.height + margins.bottom + spacing;
                    Rect::new(x_in(params.gravity.horizontal()), y, size.width, size.height)
                }
                ContainerLayout::Linear {
                    orientation: Orientation::Horizontal,
                    spacing,
                } => {
                    let x = cursor + margins.left;
                    cursor = x + size.width + margins.right + spacing;
                    Rect::new(x, y_in(params.gravity.vertical()), size.width, size.height)
                }
                ContainerLayout::Frame => Rect::new(
                    x_in(params.gravity.horizontal()),
                    y_in(params.gravity.vertical()),
                    size.width,
                    size.height,
                ),
            };
            self.arrange(child, child_rect)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Insets;
    use crate::gravity::Gravity;
    use crate::object::TextContent;

    fn run(tree: &mut WidgetTree, root: WidgetId, available: Size) -> Size {
        let resources = Resources::new();
        let metrics = DisplayMetrics::default();
        LayoutEngine::new(tree, &resources, &metrics)
            .run(root, available)
            .unwrap()
    }

    fn fixed_view(tree: &mut WidgetTree, width: f32, height: f32) -> WidgetId {
        let id = tree.create(WidgetKind::View);
        tree.get_mut(id)
            .unwrap()
            .set_layout_params(LayoutParams::new(Dimension::Exact(width), Dimension::Exact(height)));
        id
    }

    #[test]
    fn test_vertical_stack_places_children_in_order() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Container(ContainerLayout::vertical()));
        let a = fixed_view(&mut tree, 50.0, 20.0);
        let b = fixed_view(&mut tree, 50.0, 30.0);
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        run(&mut tree, root, Size::new(200.0, 400.0));

        assert_eq!(tree.get(a).unwrap().geometry(), Rect::new(0.0, 0.0, 50.0, 20.0));
        assert_eq!(tree.get(b).unwrap().geometry(), Rect::new(0.0, 20.0, 50.0, 30.0));
    }

    #[test]
    fn test_horizontal_spacing_and_wrap() {
        let mut tree = WidgetTree::new();
        let row = tree.create(WidgetKind::Container(ContainerLayout::Linear {
            orientation: Orientation::Horizontal,
            spacing: 10.0,
        }));
        tree.get_mut(row)
            .unwrap()
            .set_layout_params(LayoutParams::new(Dimension::WrapContent, Dimension::WrapContent));
        let a = fixed_view(&mut tree, 20.0, 20.0);
        let b = fixed_view(&mut tree, 30.0, 40.0);
        tree.add_child(row, a).unwrap();
        tree.add_child(row, b).unwrap();

        let size = run(&mut tree, row, Size::new(500.0, 500.0));

        assert_eq!(size, Size::new(60.0, 40.0));
        assert_eq!(tree.get(b).unwrap().geometry().x(), 30.0);
    }

    #[test]
    fn test_frame_honors_top_margin() {
        let mut tree = WidgetTree::new();
        let frame = tree.create(WidgetKind::Container(ContainerLayout::Frame));
        let content = tree.create(WidgetKind::View);
        tree.get_mut(content).unwrap().set_layout_params(
            LayoutParams::new(Dimension::MatchParent, Dimension::MatchParent)
                .with_margins(Insets::new(0.0, 48.0, 0.0, 0.0)),
        );
        tree.add_child(frame, content).unwrap();

        run(&mut tree, frame, Size::new(300.0, 600.0));

        assert_eq!(
            tree.get(content).unwrap().geometry(),
            Rect::new(0.0, 48.0, 300.0, 552.0)
        );
    }

    #[test]
    fn test_frame_gravity_centers_child() {
        let mut tree = WidgetTree::new();
        let frame = tree.create(WidgetKind::Container(ContainerLayout::Frame));
        let child = tree.create(WidgetKind::View);
        tree.get_mut(child).unwrap().set_layout_params(
            LayoutParams::new(Dimension::Exact(40.0), Dimension::Exact(20.0))
                .with_gravity(Gravity::CENTER),
        );
        tree.add_child(frame, child).unwrap();

        run(&mut tree, frame, Size::new(100.0, 100.0));

        assert_eq!(tree.get(child).unwrap().geometry(), Rect::new(30.0, 40.0, 40.0, 20.0));
    }

    #[test]
    fn test_label_measures_from_text() {
        let mut tree = WidgetTree::new();
        let label = tree.create(WidgetKind::Label(TextContent {
            text: "abcd".into(),
            text_size: 10.0,
            ..Default::default()
        }));
        tree.get_mut(label).unwrap().set_layout_params(LayoutParams::new(
            Dimension::WrapContent,
            Dimension::WrapContent,
        ));
        tree.get_mut(label).unwrap().set_padding(Insets::uniform(2.0));

        let size = run(&mut tree, label, Size::new(500.0, 500.0));

        assert_eq!(size, Size::new(24.0, 16.0));
    }

    #[test]
    fn test_gone_children_take_no_space_and_minimum_height_applies() {
        let mut tree = WidgetTree::new();
        let column = tree.create(WidgetKind::Container(ContainerLayout::vertical()));
        tree.get_mut(column)
            .unwrap()
            .set_layout_params(LayoutParams::new(Dimension::WrapContent, Dimension::WrapContent));
        tree.get_mut(column).unwrap().set_minimum_height(5.0);
        let hidden = fixed_view(&mut tree, 10.0, 10.0);
        tree.get_mut(hidden).unwrap().set_visibility(Visibility::Gone);
        tree.add_child(column, hidden).unwrap();

        let size = run(&mut tree, column, Size::new(100.0, 100.0));

        assert_eq!(size, Size::new(0.0, 5.0));
    }
}
