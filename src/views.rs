//! The view contract, perspectives, and the (model tag, perspective) → view
//! factory table.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::error::NavigationError;

/// The opaque model handle crossing the controller/view boundary.
///
/// The container never inspects the model; views downcast it back to the
/// concrete type their controller produces.
pub type SharedModel = Arc<dyn Any + Send + Sync>;

/// A named view variant for a model type (e.g. read vs. edit).
///
/// Perspectives are opaque string discriminators. The canonical default is
/// `"Default"`, and the empty string is an alias for it: constructing a
/// perspective from `""` yields [`Perspective::default()`].
///
/// # Example
///
/// ```rust
/// use crossnav::Perspective;
///
/// assert_eq!(Perspective::new(""), Perspective::default());
/// assert_eq!(Perspective::default().as_str(), "Default");
/// assert_eq!(Perspective::new("Read").as_str(), "Read");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Perspective(String);

impl Perspective {
    /// The canonical default perspective name.
    pub const DEFAULT_NAME: &'static str = "Default";

    /// Construct a perspective, canonicalizing the empty string to
    /// [`Perspective::DEFAULT_NAME`].
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Perspective::default()
        } else {
            Perspective(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Perspective(Perspective::DEFAULT_NAME.to_string())
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Perspective {
    fn from(name: &str) -> Self {
        Perspective::new(name)
    }
}

/// The capability set a platform view exposes to the runtime.
///
/// The container instantiates a view through its registered factory, hands
/// it the freshly loaded model via [`set_model`](Self::set_model), and passes
/// it to the host's activation hook. The container never calls
/// [`render`](Self::render); the host does, at the appropriate point in its
/// own lifecycle (after its native "view created" callback, for instance).
pub trait View {
    /// The stable model tag this view presents.
    fn model_tag(&self) -> &'static str;

    /// Attach the loaded model. Called exactly once per activation, before
    /// the view reaches the host.
    fn set_model(&mut self, model: SharedModel);

    /// The currently attached model, if any.
    fn model(&self) -> Option<&SharedModel>;

    /// Draw the view using whatever the platform provides. Host-invoked.
    fn render(&mut self);
}

/// Factory producing a fresh view instance per activation.
pub type ViewFactory = Box<dyn Fn() -> Box<dyn View> + Send + Sync>;

/// Maps (model tag, perspective) pairs to view factories.
///
/// Lookup is exact: the map never infers a view from a related tag or falls
/// back across perspectives. Registering the same pair twice is
/// deterministic: the last registration wins.
///
/// # Example
///
/// ```rust
/// use crossnav::{Perspective, SharedModel, View, ViewMap};
///
/// struct BookView(Option<SharedModel>);
///
/// impl View for BookView {
///     fn model_tag(&self) -> &'static str { "book" }
///     fn set_model(&mut self, model: SharedModel) { self.0 = Some(model); }
///     fn model(&self) -> Option<&SharedModel> { self.0.as_ref() }
///     fn render(&mut self) {}
/// }
///
/// let mut views = ViewMap::new();
/// views.register_default("book", || Box::new(BookView(None)));
///
/// assert!(views.resolve("book", &Perspective::default()).is_ok());
/// assert!(views.resolve("book", &Perspective::new("Edit")).is_err());
/// ```
#[derive(Default)]
pub struct ViewMap {
    entries: HashMap<(String, Perspective), ViewFactory>,
}

impl ViewMap {
    pub fn new() -> Self {
        ViewMap::default()
    }

    /// Register a view factory for a (model tag, perspective) pair.
    ///
    /// Last registration wins on duplicates.
    pub fn register<F>(&mut self, model_tag: &str, perspective: Perspective, factory: F)
    where
        F: Fn() -> Box<dyn View> + Send + Sync + 'static,
    {
        let key = (model_tag.to_string(), perspective);
        if self.entries.insert(key.clone(), Box::new(factory)).is_some() {
            debug!(
                "replaced view registration for model `{}` perspective `{}`",
                key.0, key.1
            );
        }
    }

    /// Register a view factory under the default perspective.
    pub fn register_default<F>(&mut self, model_tag: &str, factory: F)
    where
        F: Fn() -> Box<dyn View> + Send + Sync + 'static,
    {
        self.register(model_tag, Perspective::default(), factory);
    }

    /// Resolve the factory for a (model tag, perspective) pair.
    ///
    /// Fails with [`NavigationError::ViewNotRegistered`] carrying the
    /// requested pair for diagnostics.
    pub fn resolve(
        &self,
        model_tag: &str,
        perspective: &Perspective,
    ) -> Result<&ViewFactory, NavigationError> {
        self.entries
            .get(&(model_tag.to_string(), perspective.clone()))
            .ok_or_else(|| NavigationError::ViewNotRegistered {
                model_tag: model_tag.to_string(),
                perspective: perspective.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
