//! stoolbar - a fluent builder for composite title/menu toolbars.
//!
//! A toolbar has three regions: a title, a left menu and a right menu. The
//! [`Builder`] collects items for each region, either as pre-built widgets,
//! as declarative [option bundles](options), or both, and turns them into a
//! [`Toolbar`]. [`Builder::apply`] also inserts the toolbar in front of the
//! existing content of a window or linear container and, once the next
//! layout pass has sized the toolbar, moves that content below it.
//!
//! The widget tree, layout pass and resources come from [`stoolbar_core`],
//! re-exported here as [`host`].
//!
//! # Example
//!
//! ```
//! use stoolbar::prelude::*;
//!
//! let ctx = UiContext::default();
//! ctx.register_color(ColorRes(1), Color::from_rgb8(0x30, 0x3F, 0x9F));
//! let window = Window::new(&ctx)?;
//! let content = ctx.create_view();
//! window.set_content_view(content)?;
//!
//! let toolbar = Builder::new(&window)?
//!     .with_background_color_res(ColorRes(1))
//!     .with_minimum_height(56.0)
//!     .add_back_icon(DrawableRes(1))
//!     .add_title_label("Inbox", None, None)
//!     .add_right_menu_text(TextOptions::builder().text("Edit").build())
//!     .apply()?;
//!
//! window.layout(Size::new(360.0, 640.0))?;
//! let offset = ctx.with_widget(content, |n| n.layout_params().map(|p| p.margins.top))?;
//! assert_eq!(offset, Some(toolbar.height()?));
//! # Ok::<(), stoolbar::Error>(())
//! ```

pub mod builder;
mod error;
pub mod logging;
pub mod options;
pub mod toolbar;

pub use builder::{reconcile, Adjustment, Builder, Entity};
pub use error::{Error, Result};
pub use options::{ImageOptions, Options, OptionsKind, TextOptions, WidgetOptions};
pub use stoolbar_core::StatusBarStyle;
pub use toolbar::{Region, Toolbar};

/// The host toolkit.
pub mod host {
    pub use stoolbar_core::*;
}

/// Commonly used types.
pub mod prelude {
    pub use crate::builder::{Builder, Entity};
    pub use crate::error::{Error, Result};
    pub use crate::options::{ImageOptions, Options, TextOptions, WidgetOptions};
    pub use crate::toolbar::{Region, Toolbar};
    pub use stoolbar_core::{
        Color, ColorRes, ContainerLayout, Dimension, DisplayMetrics, Drawable, DrawableRes,
        Gravity, Insets, Size, StatusBarStyle, UiContext, Visibility, WidgetId, Window,
    };
}

static_assertions::assert_impl_all!(Toolbar: Send, Sync, Clone);
static_assertions::assert_impl_all!(Builder: Send, Sync, Clone);
static_assertions::assert_impl_all!(Options: Send, Sync, Clone);
