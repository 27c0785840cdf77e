//! Declarative option bundles.
//!
//! An option bundle describes how a widget should look without being the
//! widget. [`Options`] is a closed set of variants that share the common
//! [`WidgetOptions`] record:
//!
//! - [`Options::Base`]: widget-generic attributes only
//! - [`Options::Text`]: adds text, text size and text color ([`TextOptions`])
//! - [`Options::Image`]: adds an image source ([`ImageOptions`])
//!
//! Every bundle is immutable once built. To change one attribute, open a new
//! builder from an existing bundle with `derive()`, which copies every field
//! before the override is applied.
//!
//! # Example
//!
//! ```
//! use stoolbar::options::{Options, TextOptions};
//! use stoolbar_core::{Color, UiContext};
//!
//! let ctx = UiContext::default();
//! let title = TextOptions::builder()
//!     .text("Inbox")
//!     .text_color(Color::WHITE)
//!     .padding_left(8.0)
//!     .build();
//! let subtitle = title.derive().text("Archive").build();
//! assert_eq!(subtitle.base().padding().left, 8.0);
//!
//! let options = Options::from(subtitle);
//! let label = options.create_widget(&ctx)?;
//! options.apply(&ctx, label)?;
//! # Ok::<(), stoolbar::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use stoolbar_core::{Dimension, Insets, LayoutParams, UiContext, Visibility, WidgetId};

use crate::error::{Error, Result};

/// Generates the widget-generic setters on an option builder whose base
/// record is reachable as `self.$($base).+`.
macro_rules! widget_option_setters {
    ($($base:ident).+) => {
        /// Visibility applied to the widget.
        pub fn visibility(mut self, visibility: stoolbar_core::Visibility) -> Self {
            self.$($base).+.visibility = visibility;
            self
        }

        /// Padding on all four sides, in pixels.
        pub fn padding(mut self, padding: stoolbar_core::Insets) -> Self {
            self.$($base).+.padding = padding;
            self
        }

        /// Left padding, in pixels.
        pub fn padding_left(mut self, px: f32) -> Self {
            self.$($base).+.padding.left = px;
            self
        }

        /// Top padding, in pixels.
        pub fn padding_top(mut self, px: f32) -> Self {
            self.$($base).+.padding.top = px;
            self
        }

        /// Right padding, in pixels.
        pub fn padding_right(mut self, px: f32) -> Self {
            self.$($base).+.padding.right = px;
            self
        }

        /// Bottom padding, in pixels.
        pub fn padding_bottom(mut self, px: f32) -> Self {
            self.$($base).+.padding.bottom = px;
            self
        }

        /// Width excluding padding.
        pub fn width(mut self, width: stoolbar_core::Dimension) -> Self {
            self.$($base).+.width = width;
            self
        }

        /// Height excluding padding.
        pub fn height(mut self, height: stoolbar_core::Dimension) -> Self {
            self.$($base).+.height = height;
            self
        }

        /// Click handler connected to the widget.
        pub fn on_click<F>(mut self, handler: F) -> Self
        where
            F: Fn(&stoolbar_core::WidgetId) + Send + Sync + 'static,
        {
            self.$($base).+.on_click = Some(std::sync::Arc::new(handler));
            self
        }

        /// Click handler that is already shared, such as one reused across
        /// several items.
        pub fn on_click_shared(mut self, handler: $crate::options::ClickHandler) -> Self {
            self.$($base).+.on_click = Some(handler);
            self
        }
    };
}

pub(crate) use widget_option_setters;

mod image;
mod text;

pub use image::{ImageOptions, ImageOptionsBuilder};
pub use text::{
    TextOptions, TextOptionsBuilder, DEFAULT_MENU_TEXT_SIZE, DEFAULT_TEXT_COLOR,
    DEFAULT_TITLE_TEXT_SIZE,
};

/// Shared click handler; receives the id of the clicked widget.
pub type ClickHandler = Arc<dyn Fn(&WidgetId) + Send + Sync>;

/// Attributes common to every option variant.
///
/// `width` and `height` are declared excluding padding. When applied, padding
/// is added back onto explicit magnitudes because the host's layout
/// parameters are padding-inclusive.
#[derive(Clone, Default)]
pub struct WidgetOptions {
    visibility: Visibility,
    padding: Insets,
    width: Dimension,
    height: Dimension,
    on_click: Option<ClickHandler>,
}

impl fmt::Debug for WidgetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetOptions")
            .field("visibility", &self.visibility)
            .field("padding", &self.padding)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl WidgetOptions {
    pub fn builder() -> WidgetOptionsBuilder {
        WidgetOptionsBuilder::default()
    }

    /// Open a builder pre-filled with every field of `self`.
    pub fn derive(&self) -> WidgetOptionsBuilder {
        WidgetOptionsBuilder {
            options: self.copy_all(),
        }
    }

    /// Field-by-field copy, handler included.
    pub(crate) fn copy_all(&self) -> WidgetOptions {
        WidgetOptions {
            visibility: self.visibility,
            padding: self.padding,
            width: self.width,
            height: self.height,
            on_click: self.on_click.clone(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Declared width, padding excluded.
    pub fn width(&self) -> Dimension {
        self.width
    }

    /// Declared height, padding excluded.
    pub fn height(&self) -> Dimension {
        self.height
    }

    pub fn on_click(&self) -> Option<&ClickHandler> {
        self.on_click.as_ref()
    }

    /// Width and height as written into layout parameters.
    pub fn effective_size(&self) -> (Dimension, Dimension) {
        (
            self.width.grow(self.padding.horizontal()),
            self.height.grow(self.padding.vertical()),
        )
    }

    /// Apply the widget-generic attributes onto `widget`.
    ///
    /// Order: visibility, padding, layout size (creating layout parameters if
    /// the widget has none), then the click handler.
    pub fn apply(&self, ctx: &UiContext, widget: WidgetId) -> Result<()> {
        let (width, height) = self.effective_size();
        ctx.with_widget_mut(widget, |node| {
            node.set_visibility(self.visibility);
            node.set_padding(self.padding);
            match node.layout_params_mut() {
                Some(params) => {
                    params.width = width;
                    params.height = height;
                }
                None => node.set_layout_params(LayoutParams::new(width, height)),
            }
            if let Some(handler) = &self.on_click {
                node.clicked().connect_shared(handler.clone());
            }
        })?;
        Ok(())
    }
}

/// Fluent builder for [`WidgetOptions`].
#[derive(Debug, Clone, Default)]
pub struct WidgetOptionsBuilder {
    options: WidgetOptions,
}

impl WidgetOptionsBuilder {
    widget_option_setters!(options);

    pub fn build(self) -> WidgetOptions {
        self.options
    }
}

/// Which variant an [`Options`] value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionsKind {
    Base,
    Text,
    Image,
}

/// A declarative option bundle of any variant.
#[derive(Debug, Clone)]
pub enum Options {
    /// Widget-generic attributes only; cannot create a widget on its own.
    Base(WidgetOptions),
    /// Attributes for a text-display widget.
    Text(TextOptions),
    /// Attributes for an image-display widget.
    Image(ImageOptions),
}

impl Options {
    pub fn kind(&self) -> OptionsKind {
        match self {
            Self::Base(_) => OptionsKind::Base,
            Self::Text(_) => OptionsKind::Text,
            Self::Image(_) => OptionsKind::Image,
        }
    }

    /// The shared attribute record.
    pub fn base(&self) -> &WidgetOptions {
        match self {
            Self::Base(base) => base,
            Self::Text(text) => text.base(),
            Self::Image(image) => image.base(),
        }
    }

    /// Apply every attribute of this bundle onto `widget`.
    ///
    /// Typed variants require a widget of the matching kind; the check happens
    /// before anything is modified.
    pub fn apply(&self, ctx: &UiContext, widget: WidgetId) -> Result<()> {
        self.check_target(ctx, widget)?;
        self.base().apply(ctx, widget)?;
        match self {
            Self::Base(_) => Ok(()),
            Self::Text(text) => text.apply_content(ctx, widget),
            Self::Image(image) => image.apply_content(ctx, widget),
        }
    }

    /// Verify `widget` can receive this bundle without modifying it.
    pub fn check_target(&self, ctx: &UiContext, widget: WidgetId) -> Result<()> {
        match self {
            Self::Base(_) => {
                ctx.kind_name(widget)?;
                Ok(())
            }
            Self::Text(_) => text::check_label(ctx, widget),
            Self::Image(_) => image::check_image(ctx, widget),
        }
    }

    /// Whether [`create_widget`](Self::create_widget) can succeed.
    pub fn can_create_widget(&self) -> bool {
        !matches!(self, Self::Base(_))
    }

    /// Construct the canonical widget for this variant, unstyled.
    ///
    /// Fails for [`Options::Base`], which does not say what to build.
    pub fn create_widget(&self, ctx: &UiContext) -> Result<WidgetId> {
        match self {
            Self::Base(base) => Err(Error::missing_reference(format!(
                "options cannot generate a widget on their own: {base:?}"
            ))),
            Self::Text(text) => Ok(text.create_widget(ctx)),
            Self::Image(image) => Ok(image.create_widget(ctx)),
        }
    }
}

impl From<WidgetOptions> for Options {
    fn from(options: WidgetOptions) -> Self {
        Self::Base(options)
    }
}

impl From<TextOptions> for Options {
    fn from(options: TextOptions) -> Self {
        Self::Text(options)
    }
}

impl From<ImageOptions> for Options {
    fn from(options: ImageOptions) -> Self {
        Self::Image(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stoolbar_core::{Gravity, HostError};

    #[test]
    fn test_apply_sets_visibility_padding_and_size() {
        let ctx = UiContext::default();
        let view = ctx.create_view();
        let options = WidgetOptions::builder()
            .visibility(Visibility::Invisible)
            .padding(Insets::new(1.0, 2.0, 3.0, 4.0))
            .width(Dimension::Exact(20.0))
            .height(Dimension::WrapContent)
            .build();

        options.apply(&ctx, view).unwrap();

        ctx.with_widget(view, |node| {
            assert_eq!(node.visibility(), Visibility::Invisible);
            assert_eq!(node.padding(), Insets::new(1.0, 2.0, 3.0, 4.0));
            let params = node.layout_params().unwrap();
            assert_eq!(params.width, Dimension::Exact(24.0));
            assert_eq!(params.height, Dimension::WrapContent);
        })
        .unwrap();
    }

    #[test]
    fn test_apply_mutates_existing_layout_params_in_place() {
        let ctx = UiContext::default();
        let view = ctx.create_view();
        ctx.with_widget_mut(view, |node| {
            node.set_layout_params(
                LayoutParams::new(Dimension::MatchParent, Dimension::MatchParent)
                    .with_margins(Insets::uniform(5.0))
                    .with_gravity(Gravity::RIGHT),
            )
        })
        .unwrap();

        WidgetOptions::builder()
            .width(Dimension::Exact(10.0))
            .height(Dimension::MatchParent)
            .build()
            .apply(&ctx, view)
            .unwrap();

        let params = ctx.with_widget(view, |n| *n.layout_params().unwrap()).unwrap();
        assert_eq!(params.width, Dimension::Exact(10.0));
        assert_eq!(params.height, Dimension::MatchParent);
        assert_eq!(params.margins, Insets::uniform(5.0));
        assert_eq!(params.gravity, Gravity::RIGHT);
    }

    #[test]
    fn test_apply_attaches_click_handler() {
        let ctx = UiContext::default();
        let view = ctx.create_view();
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = clicks.clone();
        let options = WidgetOptions::builder()
            .on_click(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        options.apply(&ctx, view).unwrap();
        ctx.click(view).unwrap();

        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_derive_copies_every_field() {
        let original = WidgetOptions::builder()
            .visibility(Visibility::Gone)
            .padding(Insets::uniform(3.0))
            .width(Dimension::Exact(7.0))
            .height(Dimension::MatchParent)
            .on_click(|_| {})
            .build();

        let derived = original.derive().padding_top(9.0).build();

        assert_eq!(derived.visibility(), Visibility::Gone);
        assert_eq!(derived.padding(), Insets::new(3.0, 9.0, 3.0, 3.0));
        assert_eq!(derived.width(), Dimension::Exact(7.0));
        assert_eq!(derived.height(), Dimension::MatchParent);
        assert!(derived.on_click().is_some());
        assert_eq!(original.padding(), Insets::uniform(3.0));
    }

    #[test]
    fn test_base_options_cannot_create_widget() {
        let ctx = UiContext::default();
        let options = Options::from(WidgetOptions::default());

        assert!(!options.can_create_widget());
        assert!(matches!(
            options.create_widget(&ctx),
            Err(Error::MissingReference(_))
        ));
    }

    #[test]
    fn test_apply_to_destroyed_widget_fails() {
        let ctx = UiContext::default();
        let view = ctx.create_view();
        ctx.destroy(view).unwrap();

        let err = Options::from(WidgetOptions::default())
            .apply(&ctx, view)
            .unwrap_err();
        assert_eq!(err, Error::Host(HostError::InvalidWidgetId(view)));
    }
}
