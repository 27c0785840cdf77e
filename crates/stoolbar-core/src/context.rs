//! The shared UI context.
//!
//! [`UiContext`] is a cheap-to-clone handle to one widget tree together with
//! its display metrics, resource tables, post-layout queue and the windows
//! created on it. All tree access goes through it.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::error::{HostError, HostResult};
use crate::geometry::{Color, Rect, Size};
use crate::layout::LayoutEngine;
use crate::logging::targets;
use crate::metrics::DisplayMetrics;
use crate::object::{
    ContainerLayout, ImageContent, TextContent, WidgetId, WidgetKind, WidgetNode, WidgetTree,
};
use crate::resources::{ColorRes, Drawable, DrawableRes, Resources};
use crate::task::{PostLayoutQueue, TaskId};
use crate::window::{Window, WindowState};

struct ContextInner {
    tree: RwLock<WidgetTree>,
    resources: RwLock<Resources>,
    post_layout: Mutex<PostLayoutQueue>,
    windows: RwLock<HashMap<WidgetId, Arc<WindowState>>>,
    metrics: DisplayMetrics,
}

/// Handle to a widget tree and the services around it.
#[derive(Clone)]
pub struct UiContext {
    inner: Arc<ContextInner>,
}

/// Non-owning counterpart of [`UiContext`].
#[derive(Clone, Default)]
pub struct WeakUiContext {
    inner: Weak<ContextInner>,
}

impl WeakUiContext {
    /// The context, if it is still alive.
    pub fn upgrade(&self) -> Option<UiContext> {
        self.inner.upgrade().map(|inner| UiContext { inner })
    }
}

impl std::fmt::Debug for WeakUiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakUiContext")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new(DisplayMetrics::default())
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("widgets", &self.inner.tree.read().len())
            .field("metrics", &self.inner.metrics)
            .finish()
    }
}

impl UiContext {
    /// Create a context with empty resource tables.
    pub fn new(metrics: DisplayMetrics) -> Self {
        Self::with_resources(metrics, Resources::new())
    }

    /// Create a context with preloaded resources.
    pub fn with_resources(metrics: DisplayMetrics, resources: Resources) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                tree: RwLock::new(WidgetTree::new()),
                resources: RwLock::new(resources),
                post_layout: Mutex::new(PostLayoutQueue::new()),
                windows: RwLock::new(HashMap::new()),
                metrics,
            }),
        }
    }

    /// Whether two handles refer to the same context.
    pub fn ptr_eq(&self, other: &UiContext) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// A handle that does not keep the context alive.
    ///
    /// Closures stored inside the tree (click handlers, for instance) should
    /// hold one of these instead of a `UiContext` to avoid a reference cycle.
    pub fn downgrade(&self) -> WeakUiContext {
        WeakUiContext {
            inner: Arc::downgrade(&self.inner),
        }
    }

    // =========================================================================
    // Metrics and resources
    // =========================================================================

    pub fn metrics(&self) -> DisplayMetrics {
        self.inner.metrics
    }

    pub fn dp_to_px(&self, dp: f32) -> f32 {
        self.inner.metrics.dp_to_px(dp)
    }

    pub fn sp_to_px(&self, sp: f32) -> f32 {
        self.inner.metrics.sp_to_px(sp)
    }

    pub fn register_color(&self, id: ColorRes, color: Color) {
        self.inner.resources.write().insert_color(id, color);
    }

    pub fn register_drawable(&self, id: DrawableRes, drawable: Drawable) {
        self.inner.resources.write().insert_drawable(id, drawable);
    }

    pub fn color(&self, id: ColorRes) -> HostResult<Color> {
        self.inner.resources.read().color(id)
    }

    pub fn drawable(&self, id: DrawableRes) -> HostResult<Drawable> {
        self.inner.resources.read().drawable(id).cloned()
    }

    // =========================================================================
    // Widget creation and access
    // =========================================================================

    pub fn create_widget(&self, kind: WidgetKind) -> WidgetId {
        self.inner.tree.write().create(kind)
    }

    pub fn create_view(&self) -> WidgetId {
        self.create_widget(WidgetKind::View)
    }

    pub fn create_label(&self, content: TextContent) -> WidgetId {
        self.create_widget(WidgetKind::Label(content))
    }

    pub fn create_image(&self, content: ImageContent) -> WidgetId {
        self.create_widget(WidgetKind::Image(content))
    }

    pub fn create_container(&self, layout: ContainerLayout) -> WidgetId {
        self.create_widget(WidgetKind::Container(layout))
    }

    /// Destroy a widget and its subtree.
    pub fn destroy(&self, id: WidgetId) -> HostResult<()> {
        self.inner.tree.write().destroy(id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.inner.tree.read().contains(id)
    }

    /// Number of live widgets.
    pub fn widget_count(&self) -> usize {
        self.inner.tree.read().len()
    }

    /// Read a widget.
    pub fn with_widget<R>(&self, id: WidgetId, f: impl FnOnce(&WidgetNode) -> R) -> HostResult<R> {
        let tree = self.inner.tree.read();
        Ok(f(tree.get(id)?))
    }

    /// Modify a widget.
    pub fn with_widget_mut<R>(
        &self,
        id: WidgetId,
        f: impl FnOnce(&mut WidgetNode) -> R,
    ) -> HostResult<R> {
        let mut tree = self.inner.tree.write();
        Ok(f(tree.get_mut(id)?))
    }

    /// Read the whole tree.
    pub fn with_tree<R>(&self, f: impl FnOnce(&WidgetTree) -> R) -> R {
        f(&self.inner.tree.read())
    }

    /// Modify the whole tree.
    pub fn with_tree_mut<R>(&self, f: impl FnOnce(&mut WidgetTree) -> R) -> R {
        f(&mut self.inner.tree.write())
    }

    /// The widget's kind name, for diagnostics.
    pub fn kind_name(&self, id: WidgetId) -> HostResult<&'static str> {
        self.with_widget(id, |node| node.kind().name())
    }

    /// Geometry realized by the last layout pass.
    pub fn geometry(&self, id: WidgetId) -> HostResult<Rect> {
        self.with_widget(id, |node| node.geometry())
    }

    // =========================================================================
    // Children
    // =========================================================================

    pub fn insert_child(&self, parent: WidgetId, index: usize, child: WidgetId) -> HostResult<()> {
        self.inner.tree.write().insert_child(parent, index, child)
    }

    pub fn add_child(&self, parent: WidgetId, child: WidgetId) -> HostResult<()> {
        self.inner.tree.write().add_child(parent, child)
    }

    pub fn child_count(&self, parent: WidgetId) -> HostResult<usize> {
        self.inner.tree.read().child_count(parent)
    }

    pub fn child_at(&self, parent: WidgetId, index: usize) -> HostResult<Option<WidgetId>> {
        self.inner.tree.read().child_at(parent, index)
    }

    pub fn children(&self, parent: WidgetId) -> HostResult<Vec<WidgetId>> {
        self.inner.tree.read().children(parent).map(<[WidgetId]>::to_vec)
    }

    pub fn parent(&self, id: WidgetId) -> HostResult<Option<WidgetId>> {
        self.inner.tree.read().parent(id)
    }

    // =========================================================================
    // Click notification
    // =========================================================================

    /// Deliver a click to `id`, invoking its connected click handlers.
    ///
    /// Handlers run after the tree lock is released.
    pub fn click(&self, id: WidgetId) -> HostResult<()> {
        let signal = self.with_widget(id, |node| node.clicked().clone())?;
        tracing::debug!(target: targets::INPUT, ?id, handlers = signal.connection_count(), "click");
        signal.emit(id);
        Ok(())
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Queue `task` to run once after the next completed layout pass.
    ///
    /// The task is dropped without running if `anchor` is destroyed first.
    pub fn post_after_layout<F>(&self, anchor: WidgetId, task: F) -> HostResult<TaskId>
    where
        F: FnOnce(&UiContext) + Send + 'static,
    {
        if !self.contains(anchor) {
            return Err(HostError::InvalidWidgetId(anchor));
        }
        let id = self.inner.post_layout.lock().post(anchor, Box::new(task));
        tracing::trace!(target: targets::TASK, ?anchor, task = id.as_u64(), "posted post-layout task");
        Ok(id)
    }

    /// Number of tasks waiting for the next layout pass.
    pub fn pending_post_layout_tasks(&self) -> usize {
        self.inner.post_layout.lock().pending_count()
    }

    /// Measure and arrange the subtree rooted at `root`, then run the
    /// post-layout tasks queued before the pass started whose anchor lies in
    /// that subtree.
    ///
    /// Tasks anchored elsewhere stay queued for a pass that covers them.
    #[tracing::instrument(skip(self), target = "stoolbar_core::layout", level = "debug")]
    pub fn layout(&self, root: WidgetId, available: Size) -> HostResult<Size> {
        let pending = self.inner.post_layout.lock().take_pending();

        let size = {
            let mut tree = self.inner.tree.write();
            let resources = self.inner.resources.read();
            LayoutEngine::new(&mut tree, &resources, &self.inner.metrics).run(root, available)
        };

        let size = match size {
            Ok(size) => size,
            Err(err) => {
                // Requeue so the tasks still see a completed pass later.
                let mut queue = self.inner.post_layout.lock();
                for task in pending {
                    queue.requeue(task);
                }
                return Err(err);
            }
        };

        let mut ready = Vec::with_capacity(pending.len());
        {
            let tree = self.inner.tree.read();
            let mut queue = self.inner.post_layout.lock();
            for task in pending {
                match tree.is_ancestor_or_self(root, task.anchor) {
                    Ok(true) => ready.push(task),
                    Ok(false) => {
                        tracing::trace!(target: targets::TASK, task = task.id.as_u64(), "anchor outside laid out subtree, keeping task");
                        queue.requeue(task);
                    }
                    Err(_) => {
                        tracing::debug!(target: targets::TASK, task = task.id.as_u64(), "anchor destroyed, dropping post-layout task");
                    }
                }
            }
        }

        for task in ready {
            if !self.contains(task.anchor) {
                tracing::debug!(target: targets::TASK, task = task.id.as_u64(), "anchor destroyed, dropping post-layout task");
                continue;
            }
            tracing::trace!(target: targets::TASK, task = task.id.as_u64(), "running post-layout task");
            (task.task)(self);
        }
        Ok(size)
    }

    // =========================================================================
    // Windows
    // =========================================================================

    pub(crate) fn register_window(&self, state: Arc<WindowState>) {
        self.inner.windows.write().insert(state.decor, state);
    }

    /// The window whose tree contains `id`, if any.
    pub fn window_of(&self, id: WidgetId) -> HostResult<Option<Window>> {
        let root = self.inner.tree.read().root_of(id)?;
        Ok(self
            .inner
            .windows
            .read()
            .get(&root)
            .cloned()
            .map(|state| Window::from_state(self.clone(), state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Dimension, LayoutParams};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_weak_context_does_not_keep_tree_alive() {
        let ctx = UiContext::default();
        let weak = ctx.downgrade();
        assert!(weak.upgrade().is_some_and(|upgraded| upgraded.ptr_eq(&ctx)));

        drop(ctx);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_post_layout_task_runs_once_after_pass() {
        let ctx = UiContext::default();
        let root = ctx.create_container(ContainerLayout::Frame);
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        ctx.post_after_layout(root, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        ctx.layout(root, Size::new(100.0, 100.0)).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        ctx.layout(root, Size::new(100.0, 100.0)).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_task_posted_during_drain_waits_for_next_pass() {
        let ctx = UiContext::default();
        let root = ctx.create_container(ContainerLayout::Frame);
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        ctx.post_after_layout(root, move |ctx| {
            let counter = counter.clone();
            ctx.post_after_layout(root, move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        })
        .unwrap();

        ctx.layout(root, Size::new(10.0, 10.0)).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.pending_post_layout_tasks(), 1);

        ctx.layout(root, Size::new(10.0, 10.0)).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_task_dropped_when_anchor_destroyed() {
        let ctx = UiContext::default();
        let root = ctx.create_container(ContainerLayout::Frame);
        let anchor = ctx.create_view();
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        ctx.post_after_layout(anchor, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        ctx.destroy(anchor).unwrap();

        ctx.layout(root, Size::new(10.0, 10.0)).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_task_waits_for_pass_covering_its_anchor() {
        let ctx = UiContext::default();
        let laid_out = ctx.create_container(ContainerLayout::Frame);
        let other = ctx.create_container(ContainerLayout::Frame);
        let anchor = ctx.create_view();
        ctx.add_child(other, anchor).unwrap();
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        ctx.post_after_layout(anchor, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        ctx.layout(laid_out, Size::new(10.0, 10.0)).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.pending_post_layout_tasks(), 1);

        ctx.layout(other, Size::new(10.0, 10.0)).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.pending_post_layout_tasks(), 0);
    }

    #[test]
    fn test_click_handler_may_touch_tree() {
        let ctx = UiContext::default();
        let button = ctx.create_view();
        let hits = Arc::new(AtomicUsize::new(0));

        let handler_ctx = ctx.clone();
        let counter = hits.clone();
        ctx.with_widget(button, |node| {
            node.clicked().connect(move |id| {
                handler_ctx
                    .with_widget_mut(*id, |node| {
                        node.set_layout_params(LayoutParams::new(
                            Dimension::Exact(1.0),
                            Dimension::Exact(1.0),
                        ))
                    })
                    .unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
            });
        })
        .unwrap();

        ctx.click(button).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(ctx.with_widget(button, |n| n.layout_params().is_some()).unwrap());
    }

    #[test]
    fn test_post_after_layout_rejects_unknown_anchor() {
        let ctx = UiContext::default();
        let view = ctx.create_view();
        ctx.destroy(view).unwrap();
        assert!(matches!(
            ctx.post_after_layout(view, |_| {}),
            Err(HostError::InvalidWidgetId(_))
        ));
    }
}
