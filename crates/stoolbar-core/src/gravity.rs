//! Placement of a widget within the space its container gives it.

use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of gravity flags.
///
/// Horizontal and vertical flags are combined with `|`. When several flags of
/// the same axis are present, center wins over an edge, and an edge flag wins
/// over no flag.
///
/// # Example
///
/// ```
/// use stoolbar_core::{Gravity, HorizontalPlacement, VerticalPlacement};
///
/// let gravity = Gravity::CENTER_HORIZONTAL | Gravity::TOP;
/// assert_eq!(gravity.horizontal(), HorizontalPlacement::Center);
/// assert_eq!(gravity.vertical(), VerticalPlacement::Top);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Gravity(u8);

impl Gravity {
    /// No placement preference (start/top).
    pub const NONE: Gravity = Gravity(0);
    /// Stick to the left edge.
    pub const LEFT: Gravity = Gravity(1 << 0);
    /// Stick to the right edge.
    pub const RIGHT: Gravity = Gravity(1 << 1);
    /// Center horizontally.
    pub const CENTER_HORIZONTAL: Gravity = Gravity(1 << 2);
    /// Stick to the top edge.
    pub const TOP: Gravity = Gravity(1 << 3);
    /// Stick to the bottom edge.
    pub const BOTTOM: Gravity = Gravity(1 << 4);
    /// Center vertically.
    pub const CENTER_VERTICAL: Gravity = Gravity(1 << 5);
    /// Center on both axes.
    pub const CENTER: Gravity = Gravity((1 << 2) | (1 << 5));

    /// Both sets of flags; the `const` counterpart of `|`.
    pub const fn union(self, other: Gravity) -> Gravity {
        Gravity(self.0 | other.0)
    }

    /// Check if all flags in `other` are set.
    pub fn contains(&self, other: Gravity) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if no flag is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Resolve the horizontal placement.
    pub fn horizontal(&self) -> HorizontalPlacement {
        if self.contains(Self::CENTER_HORIZONTAL) {
            HorizontalPlacement::Center
        } else if self.contains(Self::RIGHT) {
            HorizontalPlacement::Right
        } else {
            HorizontalPlacement::Left
        }
    }

    /// Resolve the vertical placement.
    pub fn vertical(&self) -> VerticalPlacement {
        if self.contains(Self::CENTER_VERTICAL) {
            VerticalPlacement::Center
        } else if self.contains(Self::BOTTOM) {
            VerticalPlacement::Bottom
        } else {
            VerticalPlacement::Top
        }
    }
}

impl BitOr for Gravity {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Gravity(self.0 | rhs.0)
    }
}

impl BitOrAssign for Gravity {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Gravity {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Gravity(self.0 & rhs.0)
    }
}

/// Resolved horizontal placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalPlacement {
    Left,
    Center,
    Right,
}

/// Resolved vertical placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalPlacement {
    Top,
    Center,
    Bottom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_center_contains_both_axes() {
        assert!(Gravity::CENTER.contains(Gravity::CENTER_HORIZONTAL));
        assert!(Gravity::CENTER.contains(Gravity::CENTER_VERTICAL));
        assert_eq!(Gravity::CENTER.horizontal(), HorizontalPlacement::Center);
        assert_eq!(Gravity::CENTER.vertical(), VerticalPlacement::Center);
    }

    #[test]
    fn test_gravity_defaults_to_top_left() {
        assert!(Gravity::NONE.is_empty());
        assert_eq!(Gravity::NONE.horizontal(), HorizontalPlacement::Left);
        assert_eq!(Gravity::NONE.vertical(), VerticalPlacement::Top);
    }

    #[test]
    fn test_gravity_edges() {
        let gravity = Gravity::RIGHT | Gravity::BOTTOM;
        assert_eq!(gravity.horizontal(), HorizontalPlacement::Right);
        assert_eq!(gravity.vertical(), VerticalPlacement::Bottom);
        assert_eq!(gravity & Gravity::RIGHT, Gravity::RIGHT);
    }
}
