//! The ordered route-pattern → controller table.

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;

use crate::controller::Controller;
use crate::error::NavigationError;
use crate::pattern::{CaseSensitivity, Params, RoutePattern};

/// A controller singleton shared across navigations.
///
/// The coarse mutex is the runtime's whole shared-state policy: concurrent
/// navigations to the same controller serialize on it, and the held model is
/// last-write-wins across them.
pub type SharedController = Arc<Mutex<dyn Controller>>;

/// An ordered collection of (route pattern, controller) entries.
///
/// Resolution is first-match-wins in registration order, with no specificity
/// scoring: register more specific literal patterns before more general
/// placeholder ones, or the general entry will shadow them.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use crossnav::{
///     CancelToken, Controller, LoadError, NavigationMap, Params, Perspective, SharedModel,
/// };
///
/// struct NullController(&'static str);
///
/// impl Controller for NullController {
///     fn model_tag(&self) -> &'static str { self.0 }
///     fn model(&self) -> SharedModel { Arc::new(()) }
///     fn load(&mut self, _: &str, _: &Params, _: &CancelToken) -> Result<Perspective, LoadError> {
///         Ok(Perspective::default())
///     }
/// }
///
/// let mut routes = NavigationMap::new();
/// routes.add("", NullController("index"));
/// routes.add("{Category}", NullController("category"));
/// routes.add("{Category}/{Book}", NullController("book"));
///
/// let (controller, params) = routes.resolve("fiction/0001").unwrap();
/// assert_eq!(controller.lock().model_tag(), "book");
/// assert_eq!(params["Category"], "fiction");
/// assert_eq!(params["Book"], "0001");
///
/// assert!(routes.resolve("a/b/c").is_err());
/// ```
pub struct NavigationMap {
    case: CaseSensitivity,
    entries: Vec<(RoutePattern, SharedController)>,
}

impl NavigationMap {
    /// An empty map with case-sensitive literal matching.
    pub fn new() -> Self {
        NavigationMap::with_case(CaseSensitivity::Sensitive)
    }

    /// An empty map with the given literal-matching policy, applied
    /// uniformly to every pattern.
    pub fn with_case(case: CaseSensitivity) -> Self {
        NavigationMap {
            case,
            entries: Vec::new(),
        }
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case
    }

    /// Append an entry, taking ownership of the controller singleton.
    pub fn add(&mut self, template: &str, controller: impl Controller + 'static) {
        self.add_shared(template, Arc::new(Mutex::new(controller)));
    }

    /// Append an entry backed by an already-shared controller, for hosts
    /// that route several patterns to one singleton.
    pub fn add_shared(&mut self, template: &str, controller: SharedController) {
        self.entries.push((RoutePattern::parse(template), controller));
    }

    /// Find the first entry (in registration order) whose pattern matches
    /// `uri`, returning its controller and the extracted parameters.
    pub fn resolve(&self, uri: &str) -> Result<(SharedController, Params), NavigationError> {
        for (pattern, controller) in &self.entries {
            if let Some(params) = pattern.match_uri(uri, self.case) {
                debug!("resolved `{uri}` via pattern `{}`", pattern.template());
                return Ok((controller.clone(), params));
            }
        }
        warn!("no route matches `{uri}`");
        Err(NavigationError::RouteNotFound {
            uri: uri.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NavigationMap {
    fn default() -> Self {
        NavigationMap::new()
    }
}
