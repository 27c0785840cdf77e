//! Integer-keyed color and drawable resources.

use std::collections::HashMap;

use crate::error::{HostError, HostResult};
use crate::geometry::{Color, Size};

/// Identifier of a color resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRes(pub u32);

/// Identifier of a drawable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableRes(pub u32);

/// A registered drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Human-readable name for diagnostics.
    pub name: String,
    /// Size the drawable reports when nothing else constrains it.
    pub intrinsic_size: Size,
}

impl Drawable {
    pub fn new(name: impl Into<String>, intrinsic_size: Size) -> Self {
        Self {
            name: name.into(),
            intrinsic_size,
        }
    }
}

/// Resource tables owned by a [`UiContext`](crate::UiContext).
#[derive(Debug, Clone, Default)]
pub struct Resources {
    colors: HashMap<ColorRes, Color>,
    drawables: HashMap<DrawableRes, Drawable>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a color.
    pub fn insert_color(&mut self, id: ColorRes, color: Color) {
        self.colors.insert(id, color);
    }

    /// Register (or replace) a drawable.
    pub fn insert_drawable(&mut self, id: DrawableRes, drawable: Drawable) {
        self.drawables.insert(id, drawable);
    }

    /// Builder-style color registration.
    pub fn with_color(mut self, id: ColorRes, color: Color) -> Self {
        self.insert_color(id, color);
        self
    }

    /// Builder-style drawable registration.
    pub fn with_drawable(mut self, id: DrawableRes, drawable: Drawable) -> Self {
        self.insert_drawable(id, drawable);
        self
    }

    /// Look up a color.
    pub fn color(&self, id: ColorRes) -> HostResult<Color> {
        self.colors
            .get(&id)
            .copied()
            .ok_or(HostError::ResourceNotFound {
                kind: "color",
                id: id.0,
            })
    }

    /// Look up a drawable.
    pub fn drawable(&self, id: DrawableRes) -> HostResult<&Drawable> {
        self.drawables.get(&id).ok_or(HostError::ResourceNotFound {
            kind: "drawable",
            id: id.0,
        })
    }
}
