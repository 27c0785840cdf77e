//! Host model for stoolbar.
//!
//! This crate provides a small, headless widget toolkit that the toolbar
//! builder in the `stoolbar` crate drives:
//!
//! - **Widget tree**: arena-backed widgets with stable [`WidgetId`]s, ordered
//!   children, padding, layout parameters and layered backgrounds
//! - **Layout pass**: measurement and arrangement of linear stacks and frames
//! - **Post-layout tasks**: one-shot callbacks that run after the next pass
//! - **Signals**: click notification and window lifecycle events
//! - **Resources**: integer-keyed colors and drawables, density conversion
//! - **Windows**: an activity-like host with a content frame
//!
//! # Example
//!
//! ```
//! use stoolbar_core::{ContainerLayout, Size, UiContext, Window};
//!
//! let ctx = UiContext::default();
//! let window = Window::new(&ctx)?;
//! let content = ctx.create_container(ContainerLayout::vertical());
//! window.set_content_view(content)?;
//!
//! ctx.post_after_layout(content, move |ctx| {
//!     if let Ok(rect) = ctx.geometry(content) {
//!         println!("content laid out at {rect:?}");
//!     }
//! })?;
//! window.layout(Size::new(360.0, 640.0))?;
//! # Ok::<(), stoolbar_core::HostError>(())
//! ```

mod context;
mod error;
mod geometry;
mod gravity;
mod layout;
pub mod logging;
mod metrics;
pub mod object;
mod resources;
pub mod signal;
mod task;
mod window;

pub use context::{UiContext, WeakUiContext};
pub use error::{HostError, HostResult};
pub use geometry::{Color, Insets, Point, Rect, Size};
pub use gravity::{Gravity, HorizontalPlacement, VerticalPlacement};
pub use logging::{TreeFormatOptions, TreeStyle, WidgetTreeDebug};
pub use metrics::DisplayMetrics;
pub use object::{
    Background, ContainerLayout, Dimension, ImageContent, LayoutParams, Orientation, TextContent,
    Visibility, WidgetId, WidgetKind, WidgetNode, WidgetTree,
};
pub use resources::{ColorRes, Drawable, DrawableRes, Resources};
pub use signal::{ConnectionId, Signal};
pub use task::TaskId;
pub use window::{HostContext, StatusBarStyle, Window};

static_assertions::assert_impl_all!(UiContext: Send, Sync, Clone);
static_assertions::assert_impl_all!(WeakUiContext: Send, Sync, Clone);
static_assertions::assert_impl_all!(Window: Send, Sync, Clone);
static_assertions::assert_impl_all!(Signal<WidgetId>: Send, Sync);
