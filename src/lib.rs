//! A standalone MVC navigation runtime: one set of controllers drives
//! platform-specific views through a shared, URL-keyed navigation map.
//!
//! The runtime resolves a route string to a [`Controller`], runs its load
//! (synchronously or on a background worker), resolves the loaded model and
//! returned [`Perspective`] to a registered view factory, and hands the
//! activated [`View`] to the host's [`NavigationHost`] hooks. Rendering,
//! widget layout, and everything else platform-specific stays on the host's
//! side of the seam.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use crossnav::{
//!     CancelToken, Controller, LoadError, LoadMode, NavigationContainer, NavigationError,
//!     NavigationHost, NavigationMap, Params, Perspective, SharedModel, View, ViewMap,
//! };
//!
//! #[derive(Default)]
//! struct Shelf {
//!     category: String,
//!     titles: Vec<String>,
//! }
//!
//! struct ShelfController {
//!     shelf: Arc<Shelf>,
//! }
//!
//! impl Controller for ShelfController {
//!     fn model_tag(&self) -> &'static str {
//!         "shelf"
//!     }
//!
//!     fn model(&self) -> SharedModel {
//!         self.shelf.clone()
//!     }
//!
//!     fn load(
//!         &mut self,
//!         _uri: &str,
//!         params: &Params,
//!         cancel: &CancelToken,
//!     ) -> Result<Perspective, LoadError> {
//!         if cancel.is_cancelled() {
//!             return Err(LoadError::cancelled());
//!         }
//!         let category = params
//!             .get("Category")
//!             .ok_or_else(|| LoadError::message("missing Category"))?;
//!         self.shelf = Arc::new(Shelf {
//!             category: category.clone(),
//!             titles: vec!["0001".to_string(), "0002".to_string()],
//!         });
//!         Ok(Perspective::default())
//!     }
//! }
//!
//! struct ShelfView {
//!     model: Option<SharedModel>,
//! }
//!
//! impl View for ShelfView {
//!     fn model_tag(&self) -> &'static str {
//!         "shelf"
//!     }
//!
//!     fn set_model(&mut self, model: SharedModel) {
//!         self.model = Some(model);
//!     }
//!
//!     fn model(&self) -> Option<&SharedModel> {
//!         self.model.as_ref()
//!     }
//!
//!     fn render(&mut self) {
//!         if let Some(shelf) = self.model.as_ref().and_then(|m| m.downcast_ref::<Shelf>()) {
//!             println!("{}: {} titles", shelf.category, shelf.titles.len());
//!         }
//!     }
//! }
//!
//! struct ConsoleHost;
//!
//! impl NavigationHost for ConsoleHost {
//!     fn on_load_complete(
//!         &self,
//!         _from_view: Option<&str>,
//!         mut view: Box<dyn View>,
//!         _perspective: &Perspective,
//!     ) {
//!         // A real host pushes the view into its UI layer; the console
//!         // host just renders in place.
//!         view.render();
//!     }
//!
//!     fn on_load_failed(&self, error: &NavigationError) {
//!         eprintln!("navigation failed: {error}");
//!     }
//! }
//!
//! let mut routes = NavigationMap::new();
//! routes.add(
//!     "{Category}",
//!     ShelfController { shelf: Arc::new(Shelf::default()) },
//! );
//!
//! let mut views = ViewMap::new();
//! views.register_default("shelf", || Box::new(ShelfView { model: None }));
//!
//! let mut container =
//!     NavigationContainer::new(routes, views, ConsoleHost, LoadMode::Synchronous);
//!
//! container.navigate(None, "fiction", None).unwrap();
//! assert_eq!(container.history().len(), 1);
//! ```

// Module declarations
mod cancel;
mod container;
mod controller;
mod error;
mod history;
mod navigation;
mod pattern;
mod session;
mod views;

// Public re-exports
pub use cancel::CancelToken;
pub use container::{ContainerState, LoadMode, NavigationContainer, NavigationHost, Spawner};
pub use controller::{Controller, LoadError};
pub use error::{BoxedCause, NavigationError};
pub use history::History;
pub use navigation::{NavigationMap, SharedController};
pub use pattern::{CaseSensitivity, Params, RoutePattern};
pub use session::SessionStore;
pub use views::{Perspective, SharedModel, View, ViewFactory, ViewMap};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use container::{sync_spawner, CompletionRecord, FailureKind, HostRecord, TestHost};
