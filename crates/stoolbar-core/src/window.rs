//! Top-level windows.
//!
//! A [`Window`] owns a decor frame whose only child is the content frame.
//! Application content goes into the content frame, which is a free-form
//! frame rather than a linear stack, so anything inserted in front of the
//! existing content overlaps it until offsets are adjusted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::UiContext;
use crate::error::HostResult;
use crate::geometry::Size;
use crate::logging::targets;
use crate::object::{ContainerLayout, Dimension, LayoutParams, WidgetId};
use crate::signal::Signal;

/// Appearance of the system status bar above a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusBarStyle {
    /// Leave the status bar as the system draws it.
    #[default]
    Default,
    /// Draw window content under a fully transparent status bar.
    Transparent,
    /// Draw window content under a translucent status bar.
    Translucent,
    /// Hide the status bar.
    Hidden,
}

impl StatusBarStyle {
    /// Whether window content extends under the status bar.
    pub fn draws_under_status_bar(&self) -> bool {
        matches!(self, Self::Transparent | Self::Translucent)
    }
}

pub(crate) struct WindowState {
    pub(crate) decor: WidgetId,
    pub(crate) content: WidgetId,
    finishing: AtomicBool,
    close_requested: Signal<()>,
    status_bar_style: Mutex<StatusBarStyle>,
}

/// An activity-like host: a decor frame, a content frame and a lifecycle.
#[derive(Clone)]
pub struct Window {
    ctx: UiContext,
    state: Arc<WindowState>,
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("decor", &self.state.decor)
            .field("content", &self.state.content)
            .field("finishing", &self.is_finishing())
            .finish()
    }
}

impl Window {
    /// Create a window with an empty content frame.
    pub fn new(ctx: &UiContext) -> HostResult<Self> {
        let decor = ctx.create_container(ContainerLayout::Frame);
        let content = ctx.create_container(ContainerLayout::Frame);
        let fill = LayoutParams::new(Dimension::MatchParent, Dimension::MatchParent);
        ctx.with_tree_mut(|tree| -> HostResult<()> {
            tree.get_mut(decor)?.set_name("decor");
            tree.get_mut(decor)?.set_layout_params(fill);
            tree.get_mut(content)?.set_name("content");
            tree.get_mut(content)?.set_layout_params(fill);
            tree.add_child(decor, content)
        })?;

        let state = Arc::new(WindowState {
            decor,
            content,
            finishing: AtomicBool::new(false),
            close_requested: Signal::new(),
            status_bar_style: Mutex::new(StatusBarStyle::Default),
        });
        ctx.register_window(state.clone());
        tracing::debug!(target: targets::WINDOW, ?decor, ?content, "created window");
        Ok(Self {
            ctx: ctx.clone(),
            state,
        })
    }

    pub(crate) fn from_state(ctx: UiContext, state: Arc<WindowState>) -> Self {
        Self { ctx, state }
    }

    pub fn context(&self) -> &UiContext {
        &self.ctx
    }

    /// The outermost frame of the window.
    pub fn decor(&self) -> WidgetId {
        self.state.decor
    }

    /// The frame that holds application content.
    pub fn content(&self) -> WidgetId {
        self.state.content
    }

    /// Replace the content frame's children with `view`.
    pub fn set_content_view(&self, view: WidgetId) -> HostResult<()> {
        let content = self.state.content;
        self.ctx.with_tree_mut(|tree| {
            tree.get(view)?;
            let previous: Vec<WidgetId> = tree.children(content)?.to_vec();
            for child in previous {
                if child != view {
                    tree.destroy(child)?;
                }
            }
            tree.insert_child(content, 0, view)
        })
    }

    /// Request that the window close.
    ///
    /// Emits [`close_requested`](Self::close_requested) the first time only.
    pub fn finish(&self) {
        if !self.state.finishing.swap(true, Ordering::SeqCst) {
            tracing::debug!(target: targets::WINDOW, decor = ?self.state.decor, "window finishing");
            self.state.close_requested.emit(());
        }
    }

    pub fn is_finishing(&self) -> bool {
        self.state.finishing.load(Ordering::SeqCst)
    }

    /// Emitted once when [`finish`](Self::finish) is first called.
    pub fn close_requested(&self) -> &Signal<()> {
        &self.state.close_requested
    }

    pub fn status_bar_style(&self) -> StatusBarStyle {
        *self.state.status_bar_style.lock()
    }

    pub fn set_status_bar_style(&self, style: StatusBarStyle) {
        *self.state.status_bar_style.lock() = style;
    }

    /// Run a layout pass over the whole window.
    pub fn layout(&self, size: Size) -> HostResult<Size> {
        self.ctx.layout(self.state.decor, size)
    }

    /// Whether two handles refer to the same window.
    pub fn ptr_eq(&self, other: &Window) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

/// The kind of context a caller hands to code that needs a host.
#[derive(Debug, Clone)]
pub enum HostContext {
    /// An activity-like window.
    Window(Window),
    /// A bare application context with no window attached.
    Application(UiContext),
}

impl HostContext {
    pub fn ui_context(&self) -> &UiContext {
        match self {
            Self::Window(window) => window.context(),
            Self::Application(ctx) => ctx,
        }
    }
}

impl From<Window> for HostContext {
    fn from(window: Window) -> Self {
        Self::Window(window)
    }
}

impl From<&Window> for HostContext {
    fn from(window: &Window) -> Self {
        Self::Window(window.clone())
    }
}

impl From<UiContext> for HostContext {
    fn from(ctx: UiContext) -> Self {
        Self::Application(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_window_structure() {
        let ctx = UiContext::default();
        let window = Window::new(&ctx).unwrap();

        assert_eq!(ctx.children(window.decor()).unwrap(), vec![window.content()]);
        assert_eq!(ctx.child_count(window.content()).unwrap(), 0);
        assert!(ctx
            .with_widget(window.content(), |n| n.container_layout() == Some(ContainerLayout::Frame))
            .unwrap());
    }

    #[test]
    fn test_finish_emits_once() {
        let ctx = UiContext::default();
        let window = Window::new(&ctx).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        window.close_requested().connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        window.finish();
        window.finish();

        assert!(window.is_finishing());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_window_of_finds_owning_window() {
        let ctx = UiContext::default();
        let window = Window::new(&ctx).unwrap();
        let view = ctx.create_view();
        window.set_content_view(view).unwrap();

        let found = ctx.window_of(view).unwrap().unwrap();
        assert!(found.ptr_eq(&window));

        let stray = ctx.create_view();
        assert!(ctx.window_of(stray).unwrap().is_none());
    }

    #[test]
    fn test_set_content_view_replaces_previous() {
        let ctx = UiContext::default();
        let window = Window::new(&ctx).unwrap();
        let first = ctx.create_view();
        let second = ctx.create_view();

        window.set_content_view(first).unwrap();
        window.set_content_view(second).unwrap();

        assert_eq!(ctx.children(window.content()).unwrap(), vec![second]);
        assert!(!ctx.contains(first));
    }

    #[test]
    fn test_status_bar_style() {
        assert!(StatusBarStyle::Transparent.draws_under_status_bar());
        assert!(StatusBarStyle::Translucent.draws_under_status_bar());
        assert!(!StatusBarStyle::Hidden.draws_under_status_bar());
        assert!(!StatusBarStyle::Default.draws_under_status_bar());
    }
}
