//! The composite toolbar widget.
//!
//! A [`Toolbar`] is a frame holding three horizontal regions:
//!
//! - the **left menu**, pinned to the left edge and centered vertically
//! - the **title**, placed by the title alignment (centered at the top by default)
//! - the **right menu**, pinned to the right edge and centered vertically
//!
//! Items inside a region are laid out left to right in insertion order, with
//! the sub-item interval between neighbours. [`Builder`](crate::Builder)
//! populates a toolbar region by region, but every population operation is
//! public so a toolbar can be assembled by hand as well.
//!
//! # Example
//!
//! ```
//! use stoolbar::options::TextOptions;
//! use stoolbar::Toolbar;
//! use stoolbar_core::{Color, UiContext};
//!
//! let ctx = UiContext::default();
//! let toolbar = Toolbar::new(&ctx)?;
//! toolbar.set_background_color(Color::BLUE)?;
//! toolbar.add_title_text(&TextOptions::builder().text("Inbox").build())?;
//! toolbar.add_right_menu_view(ctx.create_view(), None)?;
//!
//! assert_eq!(toolbar.title_items()?.len(), 1);
//! assert_eq!(toolbar.right_menu_items()?.len(), 1);
//! # Ok::<(), stoolbar::Error>(())
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use stoolbar_core::{
    Background, Color, ContainerLayout, Dimension, DrawableRes, Gravity, LayoutParams,
    Orientation, StatusBarStyle, UiContext, WidgetId,
};

use crate::error::Result;
use crate::logging::targets;
use crate::options::{ImageOptions, Options, TextOptions};

/// Alignment of the title region when none is configured.
pub const DEFAULT_TITLE_ALIGNMENT: Gravity = Gravity::CENTER_HORIZONTAL.union(Gravity::TOP);

/// One of the three item regions of a toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Title,
    LeftMenu,
    RightMenu,
}

impl Region {
    /// Regions in the order a builder populates them.
    pub const POPULATION_ORDER: [Region; 3] = [Region::Title, Region::LeftMenu, Region::RightMenu];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::LeftMenu => "left menu",
            Self::RightMenu => "right menu",
        }
    }
}

#[derive(Debug)]
struct ToolbarState {
    status_bar_style: StatusBarStyle,
    /// Extra top padding currently reserved for the status bar.
    status_bar_inset: f32,
    title_alignment: Gravity,
    sub_item_interval: f32,
}

/// Handle to a toolbar widget and its three regions.
///
/// Cloning the handle does not clone the widget.
#[derive(Clone)]
pub struct Toolbar {
    ctx: UiContext,
    id: WidgetId,
    title: WidgetId,
    left_menu: WidgetId,
    right_menu: WidgetId,
    state: Arc<Mutex<ToolbarState>>,
}

impl std::fmt::Debug for Toolbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolbar")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("left_menu", &self.left_menu)
            .field("right_menu", &self.right_menu)
            .field("state", &*self.state.lock())
            .finish()
    }
}

impl Toolbar {
    /// Create an empty, detached toolbar.
    #[tracing::instrument(skip(ctx), target = "stoolbar::toolbar", level = "debug")]
    pub fn new(ctx: &UiContext) -> Result<Self> {
        let id = ctx.create_container(ContainerLayout::Frame);
        let left_menu = ctx.create_container(ContainerLayout::horizontal());
        let title = ctx.create_container(ContainerLayout::horizontal());
        let right_menu = ctx.create_container(ContainerLayout::horizontal());

        let region_params = |gravity| {
            LayoutParams::new(Dimension::WrapContent, Dimension::WrapContent).with_gravity(gravity)
        };
        ctx.with_tree_mut(|tree| -> stoolbar_core::HostResult<()> {
            tree.get_mut(id)?.set_name("toolbar");
            for (region, name, gravity) in [
                (left_menu, "left menu", Gravity::LEFT | Gravity::CENTER_VERTICAL),
                (title, "title", DEFAULT_TITLE_ALIGNMENT),
                (right_menu, "right menu", Gravity::RIGHT | Gravity::CENTER_VERTICAL),
            ] {
                let node = tree.get_mut(region)?;
                node.set_name(name);
                node.set_layout_params(region_params(gravity));
                tree.add_child(id, region)?;
            }
            Ok(())
        })?;

        tracing::debug!(target: targets::TOOLBAR, ?id, "created toolbar");
        Ok(Self {
            ctx: ctx.clone(),
            id,
            title,
            left_menu,
            right_menu,
            state: Arc::new(Mutex::new(ToolbarState {
                status_bar_style: StatusBarStyle::Default,
                status_bar_inset: 0.0,
                title_alignment: DEFAULT_TITLE_ALIGNMENT,
                sub_item_interval: 0.0,
            })),
        })
    }

    pub fn context(&self) -> &UiContext {
        &self.ctx
    }

    /// The toolbar's outer widget.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The container widget backing `region`.
    pub fn region(&self, region: Region) -> WidgetId {
        match region {
            Region::Title => self.title,
            Region::LeftMenu => self.left_menu,
            Region::RightMenu => self.right_menu,
        }
    }

    // =========================================================================
    // Region population
    // =========================================================================

    /// Append `widget` to `region`, applying `options` onto it first.
    ///
    /// The widget is detached from any previous parent.
    pub fn add_item(&self, region: Region, widget: WidgetId, options: Option<&Options>) -> Result<()> {
        if let Some(options) = options {
            options.apply(&self.ctx, widget)?;
        }
        self.ctx.add_child(self.region(region), widget)?;
        tracing::trace!(target: targets::TOOLBAR, region = region.name(), ?widget, "added item");
        Ok(())
    }

    /// Build the canonical widget for `options`, style it and append it to
    /// `region`.
    pub fn add_generated_item(&self, region: Region, options: &Options) -> Result<WidgetId> {
        let widget = options.create_widget(&self.ctx)?;
        if let Err(err) = self.add_item(region, widget, Some(options)) {
            self.ctx.destroy(widget)?;
            return Err(err);
        }
        Ok(widget)
    }

    pub fn add_title(&self, widget: WidgetId, options: Option<&Options>) -> Result<()> {
        self.add_item(Region::Title, widget, options)
    }

    /// Append a label built from `options` to the title region.
    pub fn add_title_text(&self, options: &TextOptions) -> Result<WidgetId> {
        self.add_generated_item(Region::Title, &Options::Text(options.clone()))
    }

    /// Append an image built from `options` to the title region.
    pub fn add_title_image(&self, options: &ImageOptions) -> Result<WidgetId> {
        self.add_generated_item(Region::Title, &Options::Image(options.clone()))
    }

    pub fn add_left_menu_view(&self, widget: WidgetId, options: Option<&Options>) -> Result<()> {
        self.add_item(Region::LeftMenu, widget, options)
    }

    pub fn add_left_menu_text(&self, options: &TextOptions) -> Result<WidgetId> {
        self.add_generated_item(Region::LeftMenu, &Options::Text(options.clone()))
    }

    pub fn add_left_menu_image(&self, options: &ImageOptions) -> Result<WidgetId> {
        self.add_generated_item(Region::LeftMenu, &Options::Image(options.clone()))
    }

    pub fn add_right_menu_view(&self, widget: WidgetId, options: Option<&Options>) -> Result<()> {
        self.add_item(Region::RightMenu, widget, options)
    }

    pub fn add_right_menu_text(&self, options: &TextOptions) -> Result<WidgetId> {
        self.add_generated_item(Region::RightMenu, &Options::Text(options.clone()))
    }

    pub fn add_right_menu_image(&self, options: &ImageOptions) -> Result<WidgetId> {
        self.add_generated_item(Region::RightMenu, &Options::Image(options.clone()))
    }

    /// Items of `region` in left-to-right order.
    pub fn items(&self, region: Region) -> Result<Vec<WidgetId>> {
        Ok(self.ctx.children(self.region(region))?)
    }

    pub fn title_items(&self) -> Result<Vec<WidgetId>> {
        self.items(Region::Title)
    }

    pub fn left_menu_items(&self) -> Result<Vec<WidgetId>> {
        self.items(Region::LeftMenu)
    }

    pub fn right_menu_items(&self) -> Result<Vec<WidgetId>> {
        self.items(Region::RightMenu)
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    /// Set the color layer of the background. The drawable layer, if any,
    /// stays on top.
    pub fn set_background_color(&self, color: Color) -> Result<()> {
        self.ctx
            .with_widget_mut(self.id, |node| node.background_mut().color = Some(color))?;
        Ok(())
    }

    /// Set the drawable layer of the background, drawn over the color layer.
    pub fn set_background_drawable(&self, drawable: DrawableRes) -> Result<()> {
        self.ctx
            .with_widget_mut(self.id, |node| node.background_mut().drawable = Some(drawable))?;
        Ok(())
    }

    pub fn background(&self) -> Result<Background> {
        Ok(self.ctx.with_widget(self.id, |node| node.background())?)
    }

    /// Minimum height in device pixels.
    pub fn set_minimum_height(&self, px: f32) -> Result<()> {
        self.ctx
            .with_widget_mut(self.id, |node| node.set_minimum_height(px))?;
        Ok(())
    }

    pub fn minimum_height(&self) -> Result<f32> {
        Ok(self.ctx.with_widget(self.id, |node| node.minimum_height())?)
    }

    /// Horizontal gap between neighbouring items of every region, in device
    /// pixels.
    pub fn set_sub_item_interval(&self, px: f32) -> Result<()> {
        self.ctx.with_tree_mut(|tree| -> stoolbar_core::HostResult<()> {
            for region in [self.left_menu, self.title, self.right_menu] {
                *tree.get_mut(region)?.kind_mut() = stoolbar_core::WidgetKind::Container(
                    ContainerLayout::Linear {
                        orientation: Orientation::Horizontal,
                        spacing: px,
                    },
                );
            }
            Ok(())
        })?;
        self.state.lock().sub_item_interval = px;
        Ok(())
    }

    pub fn sub_item_interval(&self) -> f32 {
        self.state.lock().sub_item_interval
    }

    /// Record the status bar style the toolbar sits under.
    ///
    /// Styles that draw content under the status bar reserve its height as
    /// extra top padding; switching back releases it.
    pub fn set_status_bar_style(&self, style: StatusBarStyle) -> Result<()> {
        let mut state = self.state.lock();
        let inset = if style.draws_under_status_bar() {
            self.ctx.metrics().status_bar_height
        } else {
            0.0
        };
        let delta = inset - state.status_bar_inset;
        if delta != 0.0 {
            self.ctx.with_widget_mut(self.id, |node| {
                let mut padding = node.padding();
                padding.top += delta;
                node.set_padding(padding);
            })?;
        }
        state.status_bar_style = style;
        state.status_bar_inset = inset;
        tracing::debug!(target: targets::TOOLBAR, ?style, inset, "status bar style set");
        Ok(())
    }

    pub fn status_bar_style(&self) -> StatusBarStyle {
        self.state.lock().status_bar_style
    }

    /// Placement of the title region inside the toolbar.
    pub fn set_title_alignment(&self, alignment: Gravity) -> Result<()> {
        self.ctx.with_widget_mut(self.title, |node| match node.layout_params_mut() {
            Some(params) => params.gravity = alignment,
            None => node.set_layout_params(
                LayoutParams::new(Dimension::WrapContent, Dimension::WrapContent)
                    .with_gravity(alignment),
            ),
        })?;
        self.state.lock().title_alignment = alignment;
        Ok(())
    }

    pub fn title_alignment(&self) -> Gravity {
        self.state.lock().title_alignment
    }

    /// Realized height of the toolbar after the last layout pass.
    pub fn height(&self) -> Result<f32> {
        Ok(self.ctx.geometry(self.id)?.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use stoolbar_core::{
        DisplayMetrics, HostError, Insets, Size, TextContent, Visibility, WidgetKind,
    };

    #[test]
    fn test_new_toolbar_has_three_ordered_regions() {
        let ctx = UiContext::default();
        let toolbar = Toolbar::new(&ctx).unwrap();

        assert_eq!(
            ctx.children(toolbar.id()).unwrap(),
            vec![
                toolbar.region(Region::LeftMenu),
                toolbar.region(Region::Title),
                toolbar.region(Region::RightMenu),
            ]
        );
        assert!(toolbar.title_items().unwrap().is_empty());
        assert_eq!(toolbar.title_alignment(), DEFAULT_TITLE_ALIGNMENT);
        assert_eq!(toolbar.status_bar_style(), StatusBarStyle::Default);
    }

    #[test]
    fn test_default_title_alignment_is_top_center() {
        assert_eq!(DEFAULT_TITLE_ALIGNMENT, Gravity::CENTER_HORIZONTAL | Gravity::TOP);
    }

    #[test]
    fn test_add_item_keeps_insertion_order() {
        let ctx = UiContext::default();
        let toolbar = Toolbar::new(&ctx).unwrap();
        let a = ctx.create_view();
        let b = ctx.create_view();

        toolbar.add_right_menu_view(a, None).unwrap();
        let c = toolbar
            .add_right_menu_text(&TextOptions::builder().text("c").build())
            .unwrap();
        toolbar.add_right_menu_view(b, None).unwrap();

        assert_eq!(toolbar.right_menu_items().unwrap(), vec![a, c, b]);
    }

    #[test]
    fn test_add_item_with_mismatched_options_leaves_region_empty() {
        let ctx = UiContext::default();
        let toolbar = Toolbar::new(&ctx).unwrap();
        let view = ctx.create_view();
        let options = Options::from(TextOptions::builder().text("x").build());

        let err = toolbar.add_title(view, Some(&options)).unwrap_err();

        assert!(matches!(err, Error::Host(HostError::KindMismatch { .. })));
        assert!(toolbar.title_items().unwrap().is_empty());
        assert_eq!(ctx.parent(view).unwrap(), None);
    }

    #[test]
    fn test_generated_title_text_is_styled_label() {
        let ctx = UiContext::default();
        let toolbar = Toolbar::new(&ctx).unwrap();
        let options = TextOptions::builder()
            .text("Title")
            .text_size(18.0)
            .visibility(Visibility::Invisible)
            .build();

        let label = toolbar.add_title_text(&options).unwrap();

        ctx.with_widget(label, |node| {
            assert_eq!(
                node.kind(),
                &WidgetKind::Label(TextContent {
                    text: "Title".into(),
                    text_size: 18.0,
                    color: Color::WHITE,
                })
            );
            assert_eq!(node.visibility(), Visibility::Invisible);
            assert_eq!(node.parent(), Some(toolbar.region(Region::Title)));
        })
        .unwrap();
    }

    #[test]
    fn test_background_layers_are_independent() {
        let ctx = UiContext::default();
        let toolbar = Toolbar::new(&ctx).unwrap();

        toolbar.set_background_drawable(DrawableRes(4)).unwrap();
        toolbar.set_background_color(Color::RED).unwrap();

        assert_eq!(
            toolbar.background().unwrap(),
            Background {
                color: Some(Color::RED),
                drawable: Some(DrawableRes(4)),
            }
        );
    }

    #[test]
    fn test_sub_item_interval_applies_to_every_region() {
        let ctx = UiContext::default();
        let toolbar = Toolbar::new(&ctx).unwrap();

        toolbar.set_sub_item_interval(12.0).unwrap();

        for region in Region::POPULATION_ORDER {
            let layout = ctx
                .with_widget(toolbar.region(region), |n| n.container_layout())
                .unwrap();
            assert_eq!(
                layout,
                Some(ContainerLayout::Linear {
                    orientation: Orientation::Horizontal,
                    spacing: 12.0,
                })
            );
        }
        assert_eq!(toolbar.sub_item_interval(), 12.0);
    }

    #[test]
    fn test_status_bar_style_reserves_inset_once() {
        let ctx = UiContext::new(DisplayMetrics::default().with_status_bar_height(30.0));
        let toolbar = Toolbar::new(&ctx).unwrap();
        let top = |t: &Toolbar| ctx.with_widget(t.id(), |n| n.padding().top).unwrap();

        toolbar.set_status_bar_style(StatusBarStyle::Transparent).unwrap();
        assert_eq!(top(&toolbar), 30.0);

        toolbar.set_status_bar_style(StatusBarStyle::Translucent).unwrap();
        assert_eq!(top(&toolbar), 30.0);

        toolbar.set_status_bar_style(StatusBarStyle::Hidden).unwrap();
        assert_eq!(top(&toolbar), 0.0);
        assert_eq!(toolbar.status_bar_style(), StatusBarStyle::Hidden);
    }

    #[test]
    fn test_regions_are_placed_by_gravity() {
        let ctx = UiContext::default();
        let toolbar = Toolbar::new(&ctx).unwrap();
        ctx.with_widget_mut(toolbar.id(), |n| {
            n.set_layout_params(LayoutParams::new(Dimension::MatchParent, Dimension::WrapContent))
        })
        .unwrap();
        let fixed = |w: f32, h: f32| {
            let view = ctx.create_view();
            ctx.with_widget_mut(view, |n| {
                n.set_layout_params(LayoutParams::new(Dimension::Exact(w), Dimension::Exact(h)))
            })
            .unwrap();
            view
        };
        toolbar.add_left_menu_view(fixed(20.0, 20.0), None).unwrap();
        toolbar.add_title(fixed(100.0, 40.0), None).unwrap();
        toolbar.add_right_menu_view(fixed(30.0, 10.0), None).unwrap();
        toolbar.set_title_alignment(Gravity::CENTER).unwrap();

        ctx.layout(toolbar.id(), Size::new(300.0, 500.0)).unwrap();

        assert_eq!(toolbar.height().unwrap(), 40.0);
        let left = ctx.geometry(toolbar.region(Region::LeftMenu)).unwrap();
        let title = ctx.geometry(toolbar.region(Region::Title)).unwrap();
        let right = ctx.geometry(toolbar.region(Region::RightMenu)).unwrap();
        assert_eq!((left.x(), left.y()), (0.0, 10.0));
        assert_eq!((title.x(), title.y()), (100.0, 0.0));
        assert_eq!((right.x(), right.y()), (270.0, 15.0));
        assert_eq!(ctx.with_widget(toolbar.id(), |n| n.padding()).unwrap(), Insets::ZERO);
    }
}
