//! The controller contract: the single application-logic extension point.

use thiserror::Error;

use crate::cancel::CancelToken;
use crate::error::{BoxedCause, NavigationError};
use crate::pattern::Params;
use crate::views::{Perspective, SharedModel};

/// A failure raised inside [`Controller::load`].
///
/// Carries the original cause so the container can attach it to the
/// [`NavigationError::ControllerLoad`](crate::NavigationError::ControllerLoad)
/// it delivers to the failure hook. A failed load never yields a null or
/// partial model to the view layer; the success path is simply not taken.
#[derive(Debug, Error)]
#[error("{cause}")]
pub struct LoadError {
    #[source]
    cause: BoxedCause,
}

impl LoadError {
    /// Wrap an underlying error.
    pub fn new(cause: impl Into<BoxedCause>) -> Self {
        LoadError {
            cause: cause.into(),
        }
    }

    /// Build a load error from a plain message.
    pub fn message(message: impl Into<String>) -> Self {
        LoadError {
            cause: message.into().into(),
        }
    }

    /// The conventional early-out for a load that observed its
    /// [`CancelToken`]. The container recognizes this and treats the
    /// navigation as a silent no-op instead of a failure.
    pub fn cancelled() -> Self {
        LoadError {
            cause: Box::new(NavigationError::Cancelled),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self.cause.downcast_ref::<NavigationError>(),
            Some(NavigationError::Cancelled)
        )
    }

    pub(crate) fn into_cause(self) -> BoxedCause {
        self.cause
    }
}

/// A stateful singleton that loads a model in response to a route.
///
/// Controllers are created once at host startup, registered with a
/// [`NavigationMap`](crate::NavigationMap), and reused for every navigation
/// that resolves to them. The runtime wraps each controller in a coarse
/// mutex, so concurrent navigations to the same controller serialize on the
/// lock and the held model is last-write-wins across them. There is no
/// per-navigation isolation.
///
/// [`load`](Self::load) is the extension point: it must fully populate the
/// held model (fetch, transform, validate) before returning the perspective
/// that should present it.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use crossnav::{CancelToken, Controller, LoadError, Params, Perspective, SharedModel};
///
/// #[derive(Default)]
/// struct Category {
///     name: String,
///     books: Vec<String>,
/// }
///
/// struct CategoryController {
///     model: Arc<Category>,
/// }
///
/// impl Controller for CategoryController {
///     fn model_tag(&self) -> &'static str {
///         "category"
///     }
///
///     fn model(&self) -> SharedModel {
///         self.model.clone()
///     }
///
///     fn load(
///         &mut self,
///         _uri: &str,
///         params: &Params,
///         cancel: &CancelToken,
///     ) -> Result<Perspective, LoadError> {
///         if cancel.is_cancelled() {
///             return Err(LoadError::cancelled());
///         }
///         let name = params
///             .get("Category")
///             .ok_or_else(|| LoadError::message("missing Category parameter"))?;
///         self.model = Arc::new(Category {
///             name: name.clone(),
///             books: vec!["0001".to_string()],
///         });
///         Ok(Perspective::default())
///     }
/// }
/// ```
pub trait Controller: Send {
    /// The stable tag identifying the model type this controller owns.
    ///
    /// Decided at startup and used verbatim as the
    /// [`ViewMap`](crate::ViewMap) lookup key; no runtime type introspection
    /// is involved.
    fn model_tag(&self) -> &'static str;

    /// A handle to the currently held model.
    fn model(&self) -> SharedModel;

    /// Populate the held model for `uri` and return the perspective that
    /// should present it.
    ///
    /// `params` merges route-extracted placeholders with caller-supplied
    /// parameters (caller-supplied win on collision). Long-running loads
    /// should poll `cancel` at their own suspension points and return
    /// [`LoadError::cancelled`] when it trips.
    fn load(
        &mut self,
        uri: &str,
        params: &Params,
        cancel: &CancelToken,
    ) -> Result<Perspective, LoadError>;
}
