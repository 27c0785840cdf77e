//! Builds a toolbar over a window's content and prints the resulting tree.
//!
//! Run with:
//! ```text
//! RUST_LOG=stoolbar=debug cargo run --example window_toolbar
//! ```

use stoolbar::host::{Resources, TreeFormatOptions, WidgetTreeDebug};
use stoolbar::prelude::*;
use tracing_subscriber::EnvFilter;

const COLOR_ACCENT: ColorRes = ColorRes(1);
const ICON_BACK: DrawableRes = DrawableRes(1);
const ICON_RIGHT: DrawableRes = DrawableRes(2);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let resources = Resources::new()
        .with_color(COLOR_ACCENT, Color::from_rgb8(0xFF, 0x40, 0x81))
        .with_drawable(ICON_BACK, Drawable::new("icon_back", Size::new(24.0, 24.0)))
        .with_drawable(ICON_RIGHT, Drawable::new("icon_right", Size::new(24.0, 24.0)));
    let ctx = UiContext::with_resources(DisplayMetrics::default().with_density(2.0), resources);
    let window = Window::new(&ctx)?;
    window.close_requested().connect(|_| println!("window closing"));

    let content = ctx.create_container(ContainerLayout::Frame);
    window.set_content_view(content)?;

    let title = ctx.create_label(Default::default());
    let toolbar = Builder::new(&window)?
        .with_status_bar_style(StatusBarStyle::Transparent)
        .with_background_color_res(COLOR_ACCENT)
        .with_item_horizontal_interval(10.0)
        .add_title_view_with(title, TextOptions::builder().text("Custom title").build())
        .add_back_icon(ICON_BACK)
        .add_left_menu_text(
            TextOptions::builder()
                .text("left")
                .on_click(|_| println!("U click left text"))
                .build(),
        )
        .add_right_menu_text(
            TextOptions::builder()
                .text("right")
                .on_click(|_| println!("U click right text"))
                .build(),
        )
        .add_right_menu_image(
            ImageOptions::builder()
                .drawable(ICON_RIGHT)
                .on_click(|_| println!("U click right image"))
                .build(),
        )
        .apply()?;

    window.layout(Size::new(720.0, 1280.0))?;

    let tree = WidgetTreeDebug::with_options(TreeFormatOptions::default())
        .format_subtree(&ctx, window.decor())?;
    println!("{tree}");

    for item in toolbar.right_menu_items()? {
        ctx.click(item)?;
    }
    ctx.click(toolbar.left_menu_items()?[0])?;
    println!("finishing: {}", window.is_finishing());
    Ok(())
}
