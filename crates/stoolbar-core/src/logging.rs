//! Logging and debugging facilities.
//!
//! stoolbar uses the `tracing` crate for instrumentation. Install a subscriber
//! in your application to see the events:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("stoolbar=debug,stoolbar_core=info")
//!     .init();
//! ```
//!
//! [`WidgetTreeDebug`] renders a widget subtree as text for inspection.

use std::fmt::Write as FmtWrite;

use crate::context::UiContext;
use crate::error::HostResult;
use crate::object::{Visibility, WidgetId, WidgetTree};

/// Target names for log filtering.
pub mod targets {
    /// Widget tree target.
    pub const OBJECT: &str = "stoolbar_core::object";
    /// Signal/slot target.
    pub const SIGNAL: &str = "stoolbar_core::signal";
    /// Layout pass target.
    pub const LAYOUT: &str = "stoolbar_core::layout";
    /// Post-layout task target.
    pub const TASK: &str = "stoolbar_core::task";
    /// Click delivery target.
    pub const INPUT: &str = "stoolbar_core::input";
    /// Window lifecycle target.
    pub const WINDOW: &str = "stoolbar_core::window";
}

/// Style of tree branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for [`WidgetTreeDebug`].
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Whether to show widget ids.
    pub show_ids: bool,
    /// Whether to show the realized geometry.
    pub show_geometry: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_geometry: true,
            max_depth: None,
        }
    }
}

/// Renders a widget subtree as an indented tree.
#[derive(Debug, Clone, Default)]
pub struct WidgetTreeDebug {
    options: TreeFormatOptions,
}

impl WidgetTreeDebug {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree(&self, ctx: &UiContext, root: WidgetId) -> HostResult<String> {
        ctx.with_tree(|tree| {
            let mut output = String::new();
            self.format_into(tree, root, &mut Vec::new(), &mut output)?;
            Ok(output)
        })
    }

    fn format_into(
        &self,
        tree: &WidgetTree,
        id: WidgetId,
        last_flags: &mut Vec<bool>,
        output: &mut String,
    ) -> HostResult<()> {
        let depth = last_flags.len();
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        let node = tree.get(id)?;

        output.push_str(&self.prefix(last_flags));
        output.push_str(node.kind().name());
        if !node.name().is_empty() {
            let _ = write!(output, " \"{}\"", node.name());
        }
        if self.options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if self.options.show_geometry {
            let g = node.geometry();
            let _ = write!(output, " @({}, {}) {}x{}", g.x(), g.y(), g.width(), g.height());
        }
        match node.visibility() {
            Visibility::Visible => {}
            Visibility::Invisible => output.push_str(" (invisible)"),
            Visibility::Gone => output.push_str(" (gone)"),
        }
        output.push('\n');

        let children = node.children();
        for (i, &child) in children.iter().enumerate() {
            last_flags.push(i + 1 == children.len());
            self.format_into(tree, child, last_flags, output)?;
            last_flags.pop();
        }
        Ok(())
    }

    fn prefix(&self, last_flags: &[bool]) -> String {
        let Some((&is_last, ancestors)) = last_flags.split_last() else {
            return String::new();
        };
        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|   ", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}   ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
        };
        let mut prefix = String::new();
        for &ancestor_last in ancestors {
            prefix.push_str(if ancestor_last { "    " } else { branch });
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ContainerLayout;

    #[test]
    fn test_format_subtree_ascii() {
        let ctx = UiContext::default();
        let root = ctx.create_container(ContainerLayout::Frame);
        let a = ctx.create_view();
        let b = ctx.create_view();
        ctx.add_child(root, a).unwrap();
        ctx.add_child(root, b).unwrap();
        ctx.with_widget_mut(b, |n| n.set_name("second")).unwrap();
        ctx.with_widget_mut(a, |n| n.set_visibility(Visibility::Gone))
            .unwrap();

        let debug = WidgetTreeDebug::with_options(TreeFormatOptions {
            style: TreeStyle::Ascii,
            show_geometry: false,
            ..Default::default()
        });
        let text = debug.format_subtree(&ctx, root).unwrap();

        assert_eq!(text, "frame\n+-- view (gone)\n`-- view \"second\"\n");
    }

    #[test]
    fn test_max_depth_limits_output() {
        let ctx = UiContext::default();
        let root = ctx.create_container(ContainerLayout::Frame);
        let child = ctx.create_container(ContainerLayout::vertical());
        let grandchild = ctx.create_view();
        ctx.add_child(root, child).unwrap();
        ctx.add_child(child, grandchild).unwrap();

        let debug = WidgetTreeDebug::with_options(TreeFormatOptions {
            max_depth: Some(1),
            show_geometry: false,
            ..Default::default()
        });
        let text = debug.format_subtree(&ctx, root).unwrap();

        assert_eq!(text.lines().count(), 2);
    }
}
