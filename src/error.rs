//! Error kinds surfaced by the navigation runtime.

use thiserror::Error;

use crate::views::Perspective;

/// Boxed root cause attached to controller load failures.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong between a `navigate` call and an activated
/// view.
///
/// Load-path failures (`RouteNotFound`, `ControllerLoad`) are reportable but
/// non-fatal: the container delivers them to
/// [`NavigationHost::on_load_failed`](crate::NavigationHost::on_load_failed)
/// and returns to idle rather than letting them escape to the `navigate`
/// caller. `ViewNotRegistered` is the exception: it indicates a host wiring
/// bug and is both delivered to the failure hook and propagated as an `Err`.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// No navigation-map entry matches the requested URI.
    #[error("no route matches `{uri}`")]
    RouteNotFound { uri: String },

    /// A controller loaded successfully but no view is registered for its
    /// (model tag, perspective) pair. Fatal configuration error.
    #[error("no view registered for model `{model_tag}` with perspective `{perspective}`")]
    ViewNotRegistered {
        model_tag: String,
        perspective: Perspective,
    },

    /// A failure raised inside `Controller::load`, with the original cause
    /// attached.
    #[error("controller load failed for `{uri}`")]
    ControllerLoad {
        uri: String,
        #[source]
        source: BoxedCause,
    },

    /// A load observed its cancellation token and bailed out. The container
    /// treats the superseded navigation as a silent no-op: no failure hook,
    /// no success path, no history entry.
    #[error("load was cancelled")]
    Cancelled,

    /// A second `navigate` was issued while one is still in flight.
    /// `redirect` is the supported way to pre-empt an in-flight load.
    #[error("a navigation is already in flight")]
    Busy,

    /// Back navigation was requested with fewer than two history entries.
    #[error("navigation history holds fewer than two entries")]
    CannotGoBack,
}
