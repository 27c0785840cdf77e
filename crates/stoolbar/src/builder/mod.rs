//! Fluent toolbar construction.
//!
//! A [`Builder`] records toolbar-level settings and, per region, the ordered
//! list of [`Entity`] values the caller supplied. Nothing touches the widget
//! tree until [`build`](Builder::build) or [`apply`](Builder::apply):
//!
//! - `build()` creates a detached, fully populated [`Toolbar`]
//! - `apply()` builds, inserts the toolbar as the first child of the target
//!   container and queues a post-layout pass that moves the existing content
//!   below it
//!
//! The builder is not consumed by either call, so the same configuration can
//! produce several independent toolbars.
//!
//! # Example
//!
//! ```
//! use stoolbar::options::TextOptions;
//! use stoolbar::{Builder, StatusBarStyle};
//! use stoolbar_core::{Color, ContainerLayout, Size, UiContext, Window};
//!
//! let ctx = UiContext::default();
//! let window = Window::new(&ctx)?;
//! window.set_content_view(ctx.create_container(ContainerLayout::vertical()))?;
//!
//! let toolbar = Builder::new(&window)?
//!     .with_status_bar_style(StatusBarStyle::Transparent)
//!     .with_background_color(Color::BLUE)
//!     .add_title_label("Inbox", None, None)
//!     .add_right_menu_text(TextOptions::builder().text("Edit").build())
//!     .apply()?;
//!
//! window.layout(Size::new(360.0, 640.0))?;
//! assert_eq!(ctx.child_at(window.content(), 0)?, Some(toolbar.id()));
//! # Ok::<(), stoolbar::Error>(())
//! ```

mod entity;
mod reconcile;

use std::sync::Arc;

use stoolbar_core::{
    Color, ColorRes, Dimension, DrawableRes, Gravity, HostContext, HostResult, LayoutParams,
    StatusBarStyle, UiContext, WidgetId, Window,
};

use crate::error::{Error, Result};
use crate::logging::targets;
use crate::options::{
    ClickHandler, ImageOptions, Options, TextOptions, DEFAULT_MENU_TEXT_SIZE, DEFAULT_TEXT_COLOR,
    DEFAULT_TITLE_TEXT_SIZE,
};
use crate::toolbar::{Region, Toolbar, DEFAULT_TITLE_ALIGNMENT};

pub use entity::Entity;
pub use reconcile::{reconcile, Adjustment};

use entity::Resolution;

#[derive(Debug, Clone, Copy, PartialEq)]
enum BackgroundColor {
    Value(Color),
    Resource(ColorRes),
}

/// Toolbar-level settings; `None` means "not configured".
#[derive(Debug, Clone, Default)]
struct Settings {
    minimum_height_dp: Option<f32>,
    item_interval_dp: Option<f32>,
    status_bar_style: StatusBarStyle,
    background_color: Option<BackgroundColor>,
    background_drawable: Option<DrawableRes>,
    title_alignment: Option<Gravity>,
}

/// Fluent configuration for a [`Toolbar`].
#[derive(Debug, Clone)]
pub struct Builder {
    ctx: UiContext,
    window: Option<Window>,
    container: WidgetId,
    settings: Settings,
    title: Vec<Entity>,
    left_menu: Vec<Entity>,
    right_menu: Vec<Entity>,
}

impl Builder {
    /// Create a builder that targets the content frame of a window.
    ///
    /// Fails with [`Error::InvalidArgument`] for a context that has no window.
    pub fn new(host: impl Into<HostContext>) -> Result<Self> {
        match host.into() {
            HostContext::Window(window) => {
                let ctx = window.context().clone();
                let container = window.content();
                Ok(Self::with_target(ctx, Some(window), container))
            }
            HostContext::Application(_) => Err(Error::invalid_argument(
                "a toolbar builder needs a window; got an application context",
            )),
        }
    }

    /// Create a builder that targets `container`, which must be a linear
    /// container.
    pub fn for_container(ctx: &UiContext, container: WidgetId) -> Result<Self> {
        let (layout, kind) =
            ctx.with_widget(container, |node| (node.container_layout(), node.kind().name()))?;
        match layout {
            Some(layout) if layout.is_linear() => Ok(Self::with_target(ctx.clone(), None, container)),
            _ => Err(Error::invalid_argument(format!(
                "toolbar target must be a linear container, got a {kind} ({container:?})"
            ))),
        }
    }

    fn with_target(ctx: UiContext, window: Option<Window>, container: WidgetId) -> Self {
        Self {
            ctx,
            window,
            container,
            settings: Settings::default(),
            title: Vec::new(),
            left_menu: Vec::new(),
            right_menu: Vec::new(),
        }
    }

    pub fn context(&self) -> &UiContext {
        &self.ctx
    }

    /// The container [`apply`](Self::apply) inserts into.
    pub fn container(&self) -> WidgetId {
        self.container
    }

    /// The window this builder was created from, if any.
    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    /// Entities recorded for `region`, in insertion order.
    pub fn entities(&self, region: Region) -> &[Entity] {
        match region {
            Region::Title => &self.title,
            Region::LeftMenu => &self.left_menu,
            Region::RightMenu => &self.right_menu,
        }
    }

    // =========================================================================
    // Toolbar settings
    // =========================================================================

    /// Gap between neighbouring items of a region, in dp.
    pub fn with_item_horizontal_interval(mut self, dp: f32) -> Self {
        self.settings.item_interval_dp = Some(dp);
        self
    }

    /// Minimum toolbar height, in dp.
    pub fn with_minimum_height(mut self, dp: f32) -> Self {
        self.settings.minimum_height_dp = Some(dp);
        self
    }

    pub fn with_status_bar_style(mut self, style: StatusBarStyle) -> Self {
        self.settings.status_bar_style = style;
        self
    }

    /// Background color layer. Replaces a previously configured color
    /// resource.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.settings.background_color = Some(BackgroundColor::Value(color));
        self
    }

    /// Background color layer from a color resource, looked up at build time.
    pub fn with_background_color_res(mut self, color: ColorRes) -> Self {
        self.settings.background_color = Some(BackgroundColor::Resource(color));
        self
    }

    /// Background drawable layer, drawn over the color layer.
    pub fn with_background_drawable(mut self, drawable: DrawableRes) -> Self {
        self.settings.background_drawable = Some(drawable);
        self
    }

    pub fn with_title_alignment(mut self, alignment: Gravity) -> Self {
        self.settings.title_alignment = Some(alignment);
        self
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Append an entity to `region`.
    pub fn add_entity(mut self, region: Region, entity: Entity) -> Self {
        match region {
            Region::Title => self.title.push(entity),
            Region::LeftMenu => self.left_menu.push(entity),
            Region::RightMenu => self.right_menu.push(entity),
        }
        self
    }

    pub fn add_title_view(self, widget: WidgetId) -> Self {
        self.add_entity(Region::Title, Entity::widget(widget))
    }

    pub fn add_title_view_with(self, widget: WidgetId, options: impl Into<Options>) -> Self {
        self.add_entity(Region::Title, Entity::styled(widget, options))
    }

    pub fn add_title_text(self, options: TextOptions) -> Self {
        self.add_entity(Region::Title, Entity::options(options))
    }

    pub fn add_title_image(self, options: ImageOptions) -> Self {
        self.add_entity(Region::Title, Entity::options(options))
    }

    /// Title label from raw text. Size (sp) and color fall back to the title
    /// defaults.
    pub fn add_title_label(
        self,
        text: impl Into<String>,
        text_size: Option<f32>,
        color: Option<Color>,
    ) -> Self {
        let options = text_options(text, text_size.unwrap_or(DEFAULT_TITLE_TEXT_SIZE), color);
        self.add_title_text(options)
    }

    /// Title image from a drawable. Width and height are in dp; `None` sizes
    /// to content.
    pub fn add_title_drawable(
        self,
        drawable: DrawableRes,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Self {
        let options = self.image_options(drawable, width, height);
        self.add_title_image(options)
    }

    pub fn add_left_menu_view(self, widget: WidgetId) -> Self {
        self.add_entity(Region::LeftMenu, Entity::widget(widget))
    }

    pub fn add_left_menu_view_with(self, widget: WidgetId, options: impl Into<Options>) -> Self {
        self.add_entity(Region::LeftMenu, Entity::styled(widget, options))
    }

    pub fn add_left_menu_text(self, options: TextOptions) -> Self {
        self.add_entity(Region::LeftMenu, Entity::options(options))
    }

    pub fn add_left_menu_image(self, options: ImageOptions) -> Self {
        self.add_entity(Region::LeftMenu, Entity::options(options))
    }

    pub fn add_left_menu_label(
        self,
        text: impl Into<String>,
        text_size: Option<f32>,
        color: Option<Color>,
    ) -> Self {
        let options = text_options(text, text_size.unwrap_or(DEFAULT_MENU_TEXT_SIZE), color);
        self.add_left_menu_text(options)
    }

    pub fn add_left_menu_drawable(
        self,
        drawable: DrawableRes,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Self {
        let options = self.image_options(drawable, width, height);
        self.add_left_menu_image(options)
    }

    /// Append a back icon to the left menu that closes the hosting window
    /// when clicked.
    ///
    /// The window is the one this builder was created from, or else the one
    /// containing the target container at click time.
    pub fn add_back_icon(self, drawable: DrawableRes) -> Self {
        let handler = self.close_action();
        self.add_back_icon_shared(drawable, handler)
    }

    /// Append a back icon to the left menu with a caller-supplied handler.
    pub fn add_back_icon_with<F>(self, drawable: DrawableRes, handler: F) -> Self
    where
        F: Fn(&WidgetId) + Send + Sync + 'static,
    {
        self.add_back_icon_shared(drawable, Arc::new(handler))
    }

    fn add_back_icon_shared(self, drawable: DrawableRes, handler: ClickHandler) -> Self {
        let options = ImageOptions::builder()
            .drawable(drawable)
            .on_click_shared(handler)
            .build();
        self.add_left_menu_image(options)
    }

    pub fn add_right_menu_view(self, widget: WidgetId) -> Self {
        self.add_entity(Region::RightMenu, Entity::widget(widget))
    }

    pub fn add_right_menu_view_with(self, widget: WidgetId, options: impl Into<Options>) -> Self {
        self.add_entity(Region::RightMenu, Entity::styled(widget, options))
    }

    pub fn add_right_menu_text(self, options: TextOptions) -> Self {
        self.add_entity(Region::RightMenu, Entity::options(options))
    }

    pub fn add_right_menu_image(self, options: ImageOptions) -> Self {
        self.add_entity(Region::RightMenu, Entity::options(options))
    }

    pub fn add_right_menu_label(
        self,
        text: impl Into<String>,
        text_size: Option<f32>,
        color: Option<Color>,
    ) -> Self {
        let options = text_options(text, text_size.unwrap_or(DEFAULT_MENU_TEXT_SIZE), color);
        self.add_right_menu_text(options)
    }

    pub fn add_right_menu_drawable(
        self,
        drawable: DrawableRes,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Self {
        let options = self.image_options(drawable, width, height);
        self.add_right_menu_image(options)
    }

    fn image_options(&self, drawable: DrawableRes, width: Option<f32>, height: Option<f32>) -> ImageOptions {
        let to_dimension =
            |dp: Option<f32>| dp.map_or(Dimension::WrapContent, |dp| Dimension::Exact(self.ctx.dp_to_px(dp)));
        ImageOptions::builder()
            .drawable(drawable)
            .width(to_dimension(width))
            .height(to_dimension(height))
            .build()
    }

    fn close_action(&self) -> ClickHandler {
        let ctx = self.ctx.downgrade();
        let anchor = self
            .window
            .as_ref()
            .map_or(self.container, |window| window.decor());
        Arc::new(move |_: &WidgetId| {
            let Some(ctx) = ctx.upgrade() else {
                return;
            };
            match ctx.window_of(anchor) {
                Ok(Some(window)) => window.finish(),
                Ok(None) => {
                    tracing::warn!(target: targets::BUILDER, ?anchor, "back icon clicked outside any window")
                }
                Err(err) => {
                    tracing::warn!(target: targets::BUILDER, ?anchor, %err, "back icon cannot find its window")
                }
            }
        })
    }

    // =========================================================================
    // Materialization
    // =========================================================================

    /// Create a detached toolbar from the recorded configuration.
    ///
    /// Every entity is validated before any widget is created. If populating
    /// the toolbar fails anyway, no toolbar is left behind and supplied
    /// widgets go back to their previous parents. Options already applied to
    /// a supplied widget are not rolled back.
    #[tracing::instrument(skip(self), target = "stoolbar::builder", level = "debug")]
    pub fn build(&self) -> Result<Toolbar> {
        self.build_tracked().map(|(toolbar, _)| toolbar)
    }

    fn build_tracked(&self) -> Result<(Toolbar, Vec<Origin>)> {
        let resolution = Resolution::plan(
            &self.ctx,
            Region::POPULATION_ORDER.map(|region| (region, self.entities(region))),
        )?;
        let background_color = match self.settings.background_color {
            Some(BackgroundColor::Value(color)) => Some(color),
            Some(BackgroundColor::Resource(id)) => Some(self.ctx.color(id)?),
            None => None,
        };
        let origins = self.supplied_origins()?;

        let toolbar = Toolbar::new(&self.ctx)?;
        let items = resolution.len();
        if let Err(err) = self.populate(&toolbar, background_color, resolution) {
            self.discard(&toolbar, &origins);
            return Err(err);
        }
        tracing::debug!(target: targets::BUILDER, toolbar = ?toolbar.id(), items, "built toolbar");
        Ok((toolbar, origins))
    }

    fn populate(
        &self,
        toolbar: &Toolbar,
        background_color: Option<Color>,
        resolution: Resolution<'_>,
    ) -> Result<()> {
        let settings = &self.settings;
        self.ctx.with_widget_mut(toolbar.id(), |node| {
            node.set_layout_params(LayoutParams::new(Dimension::MatchParent, Dimension::WrapContent))
        })?;
        if let Some(dp) = settings.minimum_height_dp {
            toolbar.set_minimum_height(self.ctx.dp_to_px(dp))?;
        }
        if let Some(dp) = settings.item_interval_dp {
            toolbar.set_sub_item_interval(self.ctx.dp_to_px(dp))?;
        }
        if settings.status_bar_style != StatusBarStyle::Default {
            toolbar.set_status_bar_style(settings.status_bar_style)?;
            if let Some(window) = &self.window {
                window.set_status_bar_style(settings.status_bar_style);
            }
        }
        if let Some(color) = background_color {
            toolbar.set_background_color(color)?;
        }
        if let Some(drawable) = settings.background_drawable {
            toolbar.set_background_drawable(drawable)?;
        }
        toolbar.set_title_alignment(settings.title_alignment.unwrap_or(DEFAULT_TITLE_ALIGNMENT))?;
        resolution.realize(toolbar)
    }

    /// Where each supplied widget sits before the toolbar takes it.
    fn supplied_origins(&self) -> Result<Vec<Origin>> {
        let origins = self.ctx.with_tree(|tree| -> HostResult<Vec<Origin>> {
            let mut origins: Vec<Origin> = Vec::new();
            for widget in Region::POPULATION_ORDER
                .iter()
                .flat_map(|&region| self.entities(region))
                .filter_map(Entity::supplied_widget)
            {
                if origins.iter().any(|origin| origin.widget == widget) {
                    continue;
                }
                let slot = match tree.parent(widget)? {
                    Some(parent) => {
                        let index = tree
                            .children(parent)?
                            .iter()
                            .position(|&child| child == widget)
                            .unwrap_or_default();
                        Some((parent, index))
                    }
                    None => None,
                };
                origins.push(Origin { widget, slot });
            }
            Ok(origins)
        })?;
        Ok(origins)
    }

    /// Destroy a partially built toolbar and put the caller's own widgets
    /// back where they were.
    fn discard(&self, toolbar: &Toolbar, origins: &[Origin]) {
        self.ctx.with_tree_mut(|tree| {
            for origin in origins {
                if let Err(err) = tree.detach(origin.widget) {
                    tracing::warn!(target: targets::BUILDER, widget = ?origin.widget, %err, "failed to detach item");
                }
            }
            let mut slotted: Vec<_> = origins
                .iter()
                .filter_map(|origin| origin.slot.map(|(parent, index)| (parent, index, origin.widget)))
                .collect();
            slotted.sort_by_key(|&(_, index, _)| index);
            for (parent, index, widget) in slotted {
                let restored = tree
                    .child_count(parent)
                    .and_then(|len| tree.insert_child(parent, index.min(len), widget));
                if let Err(err) = restored {
                    tracing::warn!(target: targets::BUILDER, ?widget, ?parent, %err, "failed to restore item");
                }
            }
            if let Err(err) = tree.destroy(toolbar.id()) {
                tracing::warn!(target: targets::BUILDER, toolbar = ?toolbar.id(), %err, "failed to discard toolbar");
            }
        });
    }

    /// Build a toolbar and insert it as the first child of the target
    /// container.
    ///
    /// After the next layout pass the content that follows the toolbar is
    /// moved below it, unless the container is linear.
    #[tracing::instrument(skip(self), target = "stoolbar::builder", level = "debug")]
    pub fn apply(&self) -> Result<Toolbar> {
        let container = self.container;
        self.ctx.child_count(container)?;

        let (toolbar, origins) = self.build_tracked()?;
        let bar = toolbar.id();
        if let Err(err) = self.ctx.insert_child(container, 0, bar) {
            self.discard(&toolbar, &origins);
            return Err(err.into());
        }
        self.ctx.post_after_layout(bar, move |ctx| {
            if let Err(err) = reconcile(ctx, container, bar) {
                tracing::debug!(target: targets::RECONCILE, ?container, %err, "reconciliation skipped");
            }
        })?;
        Ok(toolbar)
    }
}

/// A supplied widget and its `(parent, index)` before population.
#[derive(Debug, Clone, Copy)]
struct Origin {
    widget: WidgetId,
    slot: Option<(WidgetId, usize)>,
}

fn text_options(text: impl Into<String>, text_size: f32, color: Option<Color>) -> TextOptions {
    TextOptions::builder()
        .text(text)
        .text_size(text_size)
        .text_color(color.unwrap_or(DEFAULT_TEXT_COLOR))
        .build()
}
