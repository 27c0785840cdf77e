//! Error types for the host model.

use thiserror::Error;

use crate::object::WidgetId;

/// Errors produced by widget tree, layout and resource operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The widget id is invalid or the widget has been destroyed.
    #[error("invalid or destroyed widget id {0:?}")]
    InvalidWidgetId(WidgetId),

    /// The widget exists but cannot hold children.
    #[error("widget {0:?} is not a container")]
    NotAContainer(WidgetId),

    /// A child index was outside the container's child list.
    #[error("child index {index} out of bounds for container with {len} children")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Attempted to make a widget its own ancestor.
    #[error("cannot insert widget {0:?} into its own subtree")]
    CircularParentage(WidgetId),

    /// No resource is registered under the requested id.
    #[error("{kind} resource {id} not found")]
    ResourceNotFound { kind: &'static str, id: u32 },

    /// The widget is not of the kind an operation requires.
    #[error("widget {id:?} is a {actual}, expected a {expected}")]
    KindMismatch {
        id: WidgetId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Result type for host operations.
pub type HostResult<T> = std::result::Result<T, HostError>;
