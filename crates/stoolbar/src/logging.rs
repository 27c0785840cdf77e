//! Tracing targets used by this crate.
//!
//! Host-side targets live in [`stoolbar_core::logging::targets`].

/// Target names for log filtering.
pub mod targets {
    /// Toolbar construction and region population.
    pub const TOOLBAR: &str = "stoolbar::toolbar";
    /// Builder configuration and entity resolution.
    pub const BUILDER: &str = "stoolbar::builder";
    /// Post-layout offset adjustment.
    pub const RECONCILE: &str = "stoolbar::reconcile";
}
