//! Post-layout offset adjustment after a toolbar is inserted.
//!
//! Linear containers lay the toolbar out next to the existing content, so
//! they are left alone. In a frame the content keeps its position and ends up
//! under the toolbar, so once the toolbar has a realized height the content at
//! index 1 is moved down by that height.

use stoolbar_core::{HostResult, UiContext, WidgetId};

use crate::logging::targets;

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// The container is linear; nothing to do.
    LinearContainer,
    /// The container has no content after the toolbar.
    NoContent,
    /// The content's top margin grew by `offset`.
    Shifted { content: WidgetId, offset: f32 },
}

/// Shift the content following `toolbar` in `container` below it.
///
/// Only the top margin of the content widget changes. Content without layout
/// parameters receives the container's defaults first.
pub fn reconcile(ctx: &UiContext, container: WidgetId, toolbar: WidgetId) -> HostResult<Adjustment> {
    let layout = ctx.with_widget(container, |node| node.container_layout())?;
    let Some(layout) = layout else {
        return Err(stoolbar_core::HostError::NotAContainer(container));
    };
    if layout.is_linear() {
        tracing::debug!(target: targets::RECONCILE, ?container, "linear container, no adjustment needed");
        return Ok(Adjustment::LinearContainer);
    }
    let Some(content) = ctx.child_at(container, 1)? else {
        tracing::debug!(target: targets::RECONCILE, ?container, "no content after toolbar");
        return Ok(Adjustment::NoContent);
    };

    let offset = ctx.geometry(toolbar)?.height();
    ctx.with_widget_mut(content, |node| {
        let mut params = node
            .layout_params()
            .copied()
            .unwrap_or_else(|| layout.default_layout_params());
        params.margins.top += offset;
        node.set_layout_params(params);
    })?;
    tracing::debug!(target: targets::RECONCILE, ?container, ?content, offset, "shifted content below toolbar");
    Ok(Adjustment::Shifted { content, offset })
}
