//! Options for text-display widgets.

use stoolbar_core::{Color, HostError, TextContent, UiContext, WidgetId, WidgetKind};

use super::{widget_option_setters, WidgetOptions};
use crate::error::Result;

/// Text size of title items, in scale-independent pixels.
pub const DEFAULT_TITLE_TEXT_SIZE: f32 = 18.0;
/// Text size of menu items, in scale-independent pixels.
pub const DEFAULT_MENU_TEXT_SIZE: f32 = 14.0;
/// Text color used when none is given.
pub const DEFAULT_TEXT_COLOR: Color = Color::WHITE;

/// Attributes for a text-display widget.
#[derive(Debug, Clone)]
pub struct TextOptions {
    base: WidgetOptions,
    text: String,
    text_size: f32,
    text_color: Color,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            base: WidgetOptions::default(),
            text: String::new(),
            text_size: DEFAULT_MENU_TEXT_SIZE,
            text_color: DEFAULT_TEXT_COLOR,
        }
    }
}

impl TextOptions {
    pub fn builder() -> TextOptionsBuilder {
        TextOptionsBuilder::default()
    }

    /// Open a builder pre-filled with every field of `self`.
    pub fn derive(&self) -> TextOptionsBuilder {
        TextOptionsBuilder {
            options: TextOptions {
                base: self.base.copy_all(),
                text: self.text.clone(),
                text_size: self.text_size,
                text_color: self.text_color,
            },
        }
    }

    pub fn base(&self) -> &WidgetOptions {
        &self.base
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text size in scale-independent pixels.
    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// The content this bundle writes into a label.
    pub fn content(&self) -> TextContent {
        TextContent {
            text: self.text.clone(),
            text_size: self.text_size,
            color: self.text_color,
        }
    }

    pub(crate) fn create_widget(&self, ctx: &UiContext) -> WidgetId {
        ctx.create_label(TextContent::default())
    }

    pub(crate) fn apply_content(&self, ctx: &UiContext, widget: WidgetId) -> Result<()> {
        let content = self.content();
        ctx.with_widget_mut(widget, |node| match node.kind_mut() {
            WidgetKind::Label(label) => {
                *label = content;
                Ok(())
            }
            other => Err(HostError::KindMismatch {
                id: widget,
                expected: "label",
                actual: other.name(),
            }),
        })??;
        Ok(())
    }
}

pub(super) fn check_label(ctx: &UiContext, widget: WidgetId) -> Result<()> {
    let actual = ctx.kind_name(widget)?;
    if actual != "label" {
        return Err(HostError::KindMismatch {
            id: widget,
            expected: "label",
            actual,
        }
        .into());
    }
    Ok(())
}

/// Fluent builder for [`TextOptions`].
#[derive(Debug, Clone, Default)]
pub struct TextOptionsBuilder {
    options: TextOptions,
}

impl TextOptionsBuilder {
    widget_option_setters!(options.base);

    /// Label text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.options.text = text.into();
        self
    }

    /// Text size in scale-independent pixels.
    pub fn text_size(mut self, sp: f32) -> Self {
        self.options.text_size = sp;
        self
    }

    /// Text color; white unless set.
    pub fn text_color(mut self, color: Color) -> Self {
        self.options.text_color = color;
        self
    }

    pub fn build(self) -> TextOptions {
        self.options
    }
}
