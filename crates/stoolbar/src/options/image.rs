//! Options for image-display widgets.

use stoolbar_core::{DrawableRes, HostError, ImageContent, UiContext, WidgetId, WidgetKind};

use super::{widget_option_setters, WidgetOptions};
use crate::error::Result;

/// Attributes for an image-display widget.
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    base: WidgetOptions,
    source: Option<DrawableRes>,
}

impl ImageOptions {
    pub fn builder() -> ImageOptionsBuilder {
        ImageOptionsBuilder::default()
    }

    /// Open a builder pre-filled with every field of `self`.
    pub fn derive(&self) -> ImageOptionsBuilder {
        ImageOptionsBuilder {
            options: ImageOptions {
                base: self.base.copy_all(),
                source: self.source,
            },
        }
    }

    pub fn base(&self) -> &WidgetOptions {
        &self.base
    }

    /// The drawable shown by the image, if any.
    pub fn source(&self) -> Option<DrawableRes> {
        self.source
    }

    pub(crate) fn create_widget(&self, ctx: &UiContext) -> WidgetId {
        ctx.create_image(ImageContent::default())
    }

    pub(crate) fn apply_content(&self, ctx: &UiContext, widget: WidgetId) -> Result<()> {
        let source = self.source;
        ctx.with_widget_mut(widget, |node| match node.kind_mut() {
            WidgetKind::Image(image) => {
                image.source = source;
                Ok(())
            }
            other => Err(HostError::KindMismatch {
                id: widget,
                expected: "image",
                actual: other.name(),
            }),
        })??;
        Ok(())
    }
}

pub(super) fn check_image(ctx: &UiContext, widget: WidgetId) -> Result<()> {
    let actual = ctx.kind_name(widget)?;
    if actual != "image" {
        return Err(HostError::KindMismatch {
            id: widget,
            expected: "image",
            actual,
        }
        .into());
    }
    Ok(())
}

/// Fluent builder for [`ImageOptions`].
#[derive(Debug, Clone, Default)]
pub struct ImageOptionsBuilder {
    options: ImageOptions,
}

impl ImageOptionsBuilder {
    widget_option_setters!(options.base);

    /// Drawable shown by the image.
    pub fn drawable(mut self, drawable: DrawableRes) -> Self {
        self.options.source = Some(drawable);
        self
    }

    pub fn build(self) -> ImageOptions {
        self.options
    }
}
