//! Entities and their resolution into toolbar items.

use stoolbar_core::{UiContext, WidgetId};

use crate::error::{Error, Result};
use crate::options::Options;
use crate::toolbar::{Region, Toolbar};

/// One slot of a region: a pre-built widget, an option bundle, or both.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    widget: Option<WidgetId>,
    options: Option<Options>,
}

impl Entity {
    pub fn new(widget: Option<WidgetId>, options: Option<Options>) -> Self {
        Self { widget, options }
    }

    /// A pre-built widget inserted as-is.
    pub fn widget(widget: WidgetId) -> Self {
        Self::new(Some(widget), None)
    }

    /// A widget generated from `options`.
    pub fn options(options: impl Into<Options>) -> Self {
        Self::new(None, Some(options.into()))
    }

    /// A pre-built widget styled by `options`.
    pub fn styled(widget: WidgetId, options: impl Into<Options>) -> Self {
        Self::new(Some(widget), Some(options.into()))
    }

    pub fn supplied_widget(&self) -> Option<WidgetId> {
        self.widget
    }

    pub fn supplied_options(&self) -> Option<&Options> {
        self.options.as_ref()
    }

    /// Decide how this entity becomes an item, without touching the tree.
    ///
    /// Fails if the entity is empty, if its options cannot generate a widget,
    /// or if a supplied widget cannot receive its options.
    pub(crate) fn plan(&self, ctx: &UiContext) -> Result<Placement<'_>> {
        match (self.widget, self.options.as_ref()) {
            (Some(widget), Some(options)) => {
                options.check_target(ctx, widget)?;
                Ok(Placement::Styled { widget, options })
            }
            (None, Some(options)) => {
                if !options.can_create_widget() {
                    return Err(Error::missing_reference(format!(
                        "options cannot generate a widget on their own: {options:?}"
                    )));
                }
                Ok(Placement::Generated { options })
            }
            (Some(widget), None) => {
                ctx.kind_name(widget)?;
                Ok(Placement::Verbatim { widget })
            }
            (None, None) => Err(Error::missing_reference(
                "entity has neither a widget nor options",
            )),
        }
    }
}

/// The resolved form of an [`Entity`].
#[derive(Debug, Clone, Copy)]
pub(crate) enum Placement<'a> {
    /// Apply the options onto the supplied widget, then insert it.
    Styled { widget: WidgetId, options: &'a Options },
    /// Build the canonical widget for the options, style it, insert it.
    Generated { options: &'a Options },
    /// Insert the supplied widget unmodified.
    Verbatim { widget: WidgetId },
}

impl Placement<'_> {
    /// Insert the item into `region` of `toolbar`.
    pub(crate) fn realize(self, toolbar: &Toolbar, region: Region) -> Result<WidgetId> {
        match self {
            Self::Styled { widget, options } => {
                toolbar.add_item(region, widget, Some(options))?;
                Ok(widget)
            }
            Self::Generated { options } => toolbar.add_generated_item(region, options),
            Self::Verbatim { widget } => {
                toolbar.add_item(region, widget, None)?;
                Ok(widget)
            }
        }
    }
}

/// Validated plan for every region, in population order.
#[derive(Debug)]
pub(crate) struct Resolution<'a> {
    steps: Vec<(Region, Placement<'a>)>,
}

impl<'a> Resolution<'a> {
    /// Plan every entity of every region. Nothing is created or modified, so
    /// a failure here leaves the tree untouched.
    pub(crate) fn plan(
        ctx: &UiContext,
        regions: impl IntoIterator<Item = (Region, &'a [Entity])>,
    ) -> Result<Self> {
        let mut steps = Vec::new();
        for (region, entities) in regions {
            for (index, entity) in entities.iter().enumerate() {
                let placement = entity.plan(ctx).map_err(|err| match err {
                    Error::MissingReference(message) => Error::MissingReference(format!(
                        "{} item {index}: {message}",
                        region.name()
                    )),
                    other => other,
                })?;
                steps.push((region, placement));
            }
        }
        Ok(Self { steps })
    }

    pub(crate) fn len(&self) -> usize {
        self.steps.len()
    }

    /// Populate `toolbar` in plan order.
    pub(crate) fn realize(self, toolbar: &Toolbar) -> Result<()> {
        for (region, placement) in self.steps {
            placement.realize(toolbar, region)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ImageOptions, TextOptions, WidgetOptions};
    use stoolbar_core::{DrawableRes, HostError, TextContent};

    #[test]
    fn test_plan_covers_all_four_cases() {
        let ctx = UiContext::default();
        let label = ctx.create_label(TextContent::default());
        let view = ctx.create_view();

        let styled = Entity::styled(label, TextOptions::builder().text("a").build());
        let generated = Entity::options(ImageOptions::builder().drawable(DrawableRes(1)).build());
        let verbatim = Entity::widget(view);
        let empty = Entity::default();

        assert!(matches!(styled.plan(&ctx), Ok(Placement::Styled { widget, .. }) if widget == label));
        assert!(matches!(generated.plan(&ctx), Ok(Placement::Generated { .. })));
        assert!(matches!(verbatim.plan(&ctx), Ok(Placement::Verbatim { widget }) if widget == view));
        assert!(matches!(empty.plan(&ctx), Err(Error::MissingReference(_))));
    }

    #[test]
    fn test_base_options_without_widget_cannot_be_planned() {
        let ctx = UiContext::default();
        let entity = Entity::options(WidgetOptions::default());

        assert!(matches!(entity.plan(&ctx), Err(Error::MissingReference(_))));
    }

    #[test]
    fn test_base_options_style_any_supplied_widget() {
        let ctx = UiContext::default();
        let view = ctx.create_view();
        let entity = Entity::styled(view, WidgetOptions::default());

        assert!(matches!(entity.plan(&ctx), Ok(Placement::Styled { .. })));
    }

    #[test]
    fn test_plan_rejects_destroyed_widget() {
        let ctx = UiContext::default();
        let view = ctx.create_view();
        ctx.destroy(view).unwrap();

        let err = Entity::widget(view).plan(&ctx).unwrap_err();
        assert_eq!(err, Error::Host(HostError::InvalidWidgetId(view)));
    }

    #[test]
    fn test_resolution_names_failing_slot() {
        let ctx = UiContext::default();
        let title = [Entity::options(TextOptions::default())];
        let right = [Entity::widget(ctx.create_view()), Entity::default()];

        let err = Resolution::plan(
            &ctx,
            [(Region::Title, &title[..]), (Region::RightMenu, &right[..])],
        )
        .unwrap_err();

        let Error::MissingReference(message) = err else {
            panic!("expected a missing reference, got {err:?}");
        };
        assert!(message.starts_with("right menu item 1"), "{message}");
    }

    #[test]
    fn test_resolution_realizes_in_plan_order() {
        let ctx = UiContext::default();
        let toolbar = Toolbar::new(&ctx).unwrap();
        let a = ctx.create_view();
        let b = ctx.create_view();
        let left = [Entity::widget(b), Entity::options(TextOptions::default())];
        let title = [Entity::widget(a)];

        let resolution =
            Resolution::plan(&ctx, [(Region::Title, &title[..]), (Region::LeftMenu, &left[..])])
                .unwrap();
        assert_eq!(resolution.len(), 3);
        resolution.realize(&toolbar).unwrap();

        assert_eq!(toolbar.title_items().unwrap(), vec![a]);
        let left_items = toolbar.left_menu_items().unwrap();
        assert_eq!(left_items.len(), 2);
        assert_eq!(left_items[0], b);
        assert_eq!(ctx.kind_name(left_items[1]).unwrap(), "label");
    }
}
