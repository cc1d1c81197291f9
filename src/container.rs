//! The navigation container: the orchestrator that turns a URI into a loaded
//! model and an activated view.

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, warn};

use crate::cancel::CancelToken;
use crate::controller::LoadError;
use crate::error::NavigationError;
use crate::history::History;
use crate::navigation::{NavigationMap, SharedController};
use crate::pattern::Params;
use crate::session::SessionStore;
use crate::views::{Perspective, View, ViewMap};

/// A spawner for running controller loads on a background worker.
///
/// Function pointers and closures automatically implement this trait via the
/// blanket implementation, so a host on `std` threads can simply pass
/// `|work| { std::thread::spawn(work); }`.
pub trait Spawner {
    /// Run a load job on the worker of the host's choosing.
    fn spawn(&self, work: Box<dyn FnOnce() + Send>);
}

impl<F> Spawner for F
where
    F: Fn(Box<dyn FnOnce() + Send>),
{
    fn spawn(&self, work: Box<dyn FnOnce() + Send>) {
        self(work)
    }
}

/// Where `Controller::load` executes.
pub enum LoadMode {
    /// Everything runs on the caller's thread; `navigate` returns with the
    /// navigation fully settled. Used by non-interactive hosts.
    Synchronous,
    /// Loads are dispatched to the given [`Spawner`]; completions queue until
    /// the host pumps [`NavigationContainer::process_completions`] on its
    /// UI-affine thread.
    Threaded(Box<dyn Spawner>),
}

impl LoadMode {
    /// Threaded mode over any spawner value.
    pub fn threaded(spawner: impl Spawner + 'static) -> Self {
        LoadMode::Threaded(Box::new(spawner))
    }

    /// Threaded mode backed by one `std` thread per load.
    pub fn thread_per_load() -> Self {
        LoadMode::threaded(|work: Box<dyn FnOnce() + Send>| {
            std::thread::spawn(work);
        })
    }
}

/// Observable orchestrator state.
///
/// Every navigation walks `Idle -> Loading -> (Success | Failed) -> Idle`;
/// the terminal states are visible only inside the hook invocations, so
/// callers polling [`NavigationContainer::state`] see `Idle` or `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Idle,
    Loading,
    Success,
    Failed,
}

/// The seams where platform-specific UI activation is injected.
///
/// The container has no UI of its own: surfacing a resolved view (starting
/// an Activity, pushing a Page) and reporting failures to the user are
/// entirely the host's business. Hooks are invoked on the thread that drives
/// the container: the `navigate` caller in synchronous mode, the
/// `process_completions` caller in threaded mode.
pub trait NavigationHost {
    /// A load is about to start for the controller with the given model tag.
    fn on_load_begin(&self, model_tag: &str) {
        let _ = model_tag;
    }

    /// A load succeeded: `view` has been instantiated from the registered
    /// factory and already holds the freshly loaded model. The host surfaces
    /// it and calls [`View::render`] at the appropriate point in its own
    /// lifecycle.
    fn on_load_complete(&self, from_view: Option<&str>, view: Box<dyn View>, perspective: &Perspective);

    /// A load failed; `error` carries the cause. History and the view layer
    /// were left untouched.
    fn on_load_failed(&self, error: &NavigationError);
}

/// A settled load on its way back to the driving thread.
struct Completion {
    generation: u64,
    uri: String,
    params: Params,
    from_view: Option<String>,
    controller: SharedController,
    result: Result<Perspective, LoadError>,
}

/// The orchestrator: resolves routes to controllers, runs loads, resolves
/// (model tag, perspective) pairs to views, and drives the host hooks.
///
/// One container instance serves a running application. There is no ambient
/// global: hosts hold the instance and pass navigation calls through it,
/// which keeps registries per-test isolatable.
///
/// At most one navigation is in flight at a time. A second `navigate` while
/// one is loading is rejected with [`NavigationError::Busy`];
/// [`redirect`](Self::redirect) is the supported way to pre-empt an
/// in-flight load. There are no built-in timeouts; a load that never
/// returns leaves the container in `Loading` indefinitely, which is an
/// accepted limitation rather than something the runtime papers over.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use crossnav::{
///     CancelToken, Controller, LoadError, LoadMode, NavigationContainer, NavigationMap,
///     Params, Perspective, SharedModel, TestHost, View, ViewMap,
/// };
///
/// struct Greeting(String);
///
/// struct GreetingController(Arc<Greeting>);
///
/// impl Controller for GreetingController {
///     fn model_tag(&self) -> &'static str { "greeting" }
///     fn model(&self) -> SharedModel { self.0.clone() }
///     fn load(&mut self, _: &str, params: &Params, _: &CancelToken) -> Result<Perspective, LoadError> {
///         let name = params.get("Name").cloned().unwrap_or_default();
///         self.0 = Arc::new(Greeting(format!("hello, {name}")));
///         Ok(Perspective::default())
///     }
/// }
///
/// struct GreetingView(Option<SharedModel>);
///
/// impl View for GreetingView {
///     fn model_tag(&self) -> &'static str { "greeting" }
///     fn set_model(&mut self, model: SharedModel) { self.0 = Some(model); }
///     fn model(&self) -> Option<&SharedModel> { self.0.as_ref() }
///     fn render(&mut self) {}
/// }
///
/// let mut routes = NavigationMap::new();
/// routes.add("{Name}", GreetingController(Arc::new(Greeting(String::new()))));
///
/// let mut views = ViewMap::new();
/// views.register_default("greeting", || Box::new(GreetingView(None)));
///
/// let host = TestHost::new();
/// let mut container =
///     NavigationContainer::new(routes, views, host.clone(), LoadMode::Synchronous);
///
/// container.navigate(None, "world", None).unwrap();
///
/// assert_eq!(host.completion_count(), 1);
/// assert_eq!(container.history().len(), 1);
/// ```
pub struct NavigationContainer<H: NavigationHost> {
    routes: NavigationMap,
    views: ViewMap,
    history: History,
    session: SessionStore,
    host: H,
    mode: LoadMode,
    state: ContainerState,
    generation: u64,
    inflight: Option<CancelToken>,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
}

impl<H: NavigationHost> NavigationContainer<H> {
    pub fn new(routes: NavigationMap, views: ViewMap, host: H, mode: LoadMode) -> Self {
        let (completion_tx, completion_rx) = crossbeam_channel::unbounded();
        NavigationContainer {
            routes,
            views,
            history: History::new(),
            session: SessionStore::new(),
            host,
            mode,
            state: ContainerState::Idle,
            generation: 0,
            inflight: None,
            completion_tx,
            completion_rx,
        }
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    pub fn routes(&self) -> &NavigationMap {
        &self.routes
    }

    pub fn views(&self) -> &ViewMap {
        &self.views
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Navigate to `uri`.
    ///
    /// Resolves the controller through the navigation map, merges
    /// route-extracted parameters with `caller_params` (caller-supplied keys
    /// win), runs the controller's load per the configured [`LoadMode`], and
    /// on completion resolves and activates the matching view.
    ///
    /// Load-path failures never escape this call: `RouteNotFound` and
    /// `ControllerLoad` are delivered to
    /// [`NavigationHost::on_load_failed`] and `Ok(())` is returned. The
    /// errors this call does return are caller-facing rejections and wiring
    /// bugs: [`NavigationError::Busy`] when a navigation is already in
    /// flight, and [`NavigationError::ViewNotRegistered`] (synchronous mode
    /// only) when host setup forgot a view.
    ///
    /// `from_view` is an opaque host-chosen identifier for the originating
    /// view, passed through to [`NavigationHost::on_load_complete`].
    pub fn navigate(
        &mut self,
        from_view: Option<&str>,
        uri: &str,
        caller_params: Option<Params>,
    ) -> Result<(), NavigationError> {
        if self.state == ContainerState::Loading {
            warn!("rejecting navigation to `{uri}`: a load is already in flight");
            return Err(NavigationError::Busy);
        }
        self.start_navigation(from_view, uri, caller_params)
    }

    /// Cancel any in-flight load and immediately navigate to `uri`.
    ///
    /// Cancellation is cooperative: the in-progress load's [`CancelToken`]
    /// is tripped, and whether or not the load observes it, its completion
    /// carries a superseded generation and is discarded without invoking any
    /// hook. Only the redirect target's success or failure hook ever fires.
    pub fn redirect(&mut self, uri: &str) -> Result<(), NavigationError> {
        if let Some(token) = self.inflight.take() {
            warn!("redirecting to `{uri}`: cancelling in-flight load");
            token.cancel();
        }
        self.state = ContainerState::Idle;
        self.start_navigation(None, uri, None)
    }

    /// Navigate back to the entry beneath the current one.
    ///
    /// Pops the current history entry and the one beneath it, then
    /// re-navigates to the latter (it is re-pushed through the normal
    /// success path). With fewer than two entries this fails with
    /// [`NavigationError::CannotGoBack`]; whether that means exiting the app
    /// or ignoring the request is the host's call.
    pub fn back(&mut self) -> Result<(), NavigationError> {
        if self.state == ContainerState::Loading {
            return Err(NavigationError::Busy);
        }
        let (uri, params) = self
            .history
            .pop_two_for_back()
            .ok_or(NavigationError::CannotGoBack)?;
        self.start_navigation(None, &uri, Some(params))
    }

    /// Apply every queued load completion.
    ///
    /// In threaded mode the host calls this from its UI-affine thread to
    /// marshal worker results back into hook invocations; in synchronous
    /// mode `navigate` calls it internally. Completions from superseded
    /// navigations are discarded silently.
    pub fn process_completions(&mut self) -> Result<(), NavigationError> {
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply(completion)?;
        }
        Ok(())
    }

    fn start_navigation(
        &mut self,
        from_view: Option<&str>,
        uri: &str,
        caller_params: Option<Params>,
    ) -> Result<(), NavigationError> {
        let (controller, mut params) = match self.routes.resolve(uri) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.state = ContainerState::Failed;
                self.host.on_load_failed(&err);
                self.state = ContainerState::Idle;
                return Ok(());
            }
        };

        if let Some(extra) = caller_params {
            params.extend(extra);
        }

        let model_tag = controller.lock().model_tag();
        debug!("loading `{uri}` with controller for model `{model_tag}`");
        self.state = ContainerState::Loading;
        self.host.on_load_begin(model_tag);

        self.generation += 1;
        let token = CancelToken::new(self.generation);
        self.inflight = Some(token.clone());

        match &self.mode {
            LoadMode::Synchronous => {
                let result = controller.lock().load(uri, &params, &token);
                let completion = Completion {
                    generation: token.generation(),
                    uri: uri.to_string(),
                    params,
                    from_view: from_view.map(str::to_string),
                    controller,
                    result,
                };
                self.completion_tx.send(completion).ok();
            }
            LoadMode::Threaded(spawner) => {
                let tx = self.completion_tx.clone();
                let uri = uri.to_string();
                let from_view = from_view.map(str::to_string);
                spawner.spawn(Box::new(move || {
                    let result = controller.lock().load(&uri, &params, &token);
                    let completion = Completion {
                        generation: token.generation(),
                        uri,
                        params,
                        from_view,
                        controller,
                        result,
                    };
                    tx.send(completion).ok();
                }));
                return Ok(());
            }
        }

        self.process_completions()
    }

    fn apply(&mut self, completion: Completion) -> Result<(), NavigationError> {
        if completion.generation != self.generation {
            debug!(
                "discarding completion for superseded navigation to `{}`",
                completion.uri
            );
            return Ok(());
        }
        self.inflight = None;

        match completion.result {
            Ok(perspective) => {
                let (model_tag, model) = {
                    let controller = completion.controller.lock();
                    (controller.model_tag(), controller.model())
                };
                let factory = match self.views.resolve(model_tag, &perspective) {
                    Ok(factory) => factory,
                    Err(err) => {
                        error!("{err}");
                        self.state = ContainerState::Failed;
                        self.host.on_load_failed(&err);
                        self.state = ContainerState::Idle;
                        return Err(err);
                    }
                };
                let mut view = factory();
                view.set_model(model);

                debug!(
                    "load complete for `{}`: presenting `{model_tag}` as `{perspective}`",
                    completion.uri
                );
                self.state = ContainerState::Success;
                self.history.push(completion.uri, completion.params);
                self.host
                    .on_load_complete(completion.from_view.as_deref(), view, &perspective);
                self.state = ContainerState::Idle;
                Ok(())
            }
            Err(load_error) if load_error.is_cancelled() => {
                debug!(
                    "load for `{}` observed cancellation; dropping silently",
                    completion.uri
                );
                self.state = ContainerState::Idle;
                Ok(())
            }
            Err(load_error) => {
                let err = NavigationError::ControllerLoad {
                    uri: completion.uri,
                    source: load_error.into_cause(),
                };
                self.state = ContainerState::Failed;
                self.host.on_load_failed(&err);
                self.state = ContainerState::Idle;
                Ok(())
            }
        }
    }
}

#[cfg(any(test, feature = "testing"))]
pub use test_support::{sync_spawner, CompletionRecord, FailureKind, HostRecord, TestHost};

#[cfg(any(test, feature = "testing"))]
mod test_support {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::error::NavigationError;
    use crate::views::{Perspective, SharedModel, View};

    use super::NavigationHost;

    /// A spawner that runs each load inline on the calling thread.
    ///
    /// Unlike [`LoadMode::Synchronous`](super::LoadMode::Synchronous), the
    /// completion is still queued rather than applied, so tests control
    /// exactly when [`process_completions`](super::NavigationContainer::process_completions)
    /// settles the navigation; the container stays in `Loading` until they
    /// pump it.
    pub fn sync_spawner() -> fn(Box<dyn FnOnce() + Send>) {
        run_inline
    }

    fn run_inline(work: Box<dyn FnOnce() + Send>) {
        work()
    }

    /// Coarse classification of a recorded failure, for assertions that do
    /// not want to string-match rendered messages.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FailureKind {
        RouteNotFound,
        ViewNotRegistered,
        ControllerLoad,
        Other,
    }

    impl From<&NavigationError> for FailureKind {
        fn from(error: &NavigationError) -> Self {
            match error {
                NavigationError::RouteNotFound { .. } => FailureKind::RouteNotFound,
                NavigationError::ViewNotRegistered { .. } => FailureKind::ViewNotRegistered,
                NavigationError::ControllerLoad { .. } => FailureKind::ControllerLoad,
                _ => FailureKind::Other,
            }
        }
    }

    /// One successful activation as seen by the host.
    pub struct CompletionRecord {
        pub from_view: Option<String>,
        pub model_tag: String,
        pub perspective: Perspective,
        pub model: Option<SharedModel>,
    }

    /// Everything a [`TestHost`] has observed.
    #[derive(Default)]
    pub struct HostRecord {
        pub begins: Vec<String>,
        pub completions: Vec<CompletionRecord>,
        pub failures: Vec<(FailureKind, String)>,
    }

    /// A host that records every hook invocation for assertions.
    ///
    /// Only available with the `testing` feature or during tests. Clones
    /// share the same capture storage, so keep one clone outside the
    /// container to inspect what the container-side clone observed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use crossnav::TestHost;
    ///
    /// let host = TestHost::new();
    /// // ... hand host.clone() to a NavigationContainer, navigate ...
    /// assert_eq!(host.completion_count(), 0);
    /// host.with_record(|record| assert!(record.failures.is_empty()));
    /// ```
    #[derive(Default)]
    pub struct TestHost {
        record: Arc<Mutex<HostRecord>>,
    }

    impl Clone for TestHost {
        fn clone(&self) -> Self {
            TestHost {
                record: self.record.clone(),
            }
        }
    }

    impl TestHost {
        pub fn new() -> Self {
            TestHost::default()
        }

        pub fn begin_count(&self) -> usize {
            self.record.lock().begins.len()
        }

        pub fn completion_count(&self) -> usize {
            self.record.lock().completions.len()
        }

        pub fn failure_count(&self) -> usize {
            self.record.lock().failures.len()
        }

        /// Inspect the captured record with a closure.
        pub fn with_record<F, R>(&self, f: F) -> R
        where
            F: FnOnce(&HostRecord) -> R,
        {
            let record = self.record.lock();
            f(&record)
        }
    }

    impl NavigationHost for TestHost {
        fn on_load_begin(&self, model_tag: &str) {
            self.record.lock().begins.push(model_tag.to_string());
        }

        fn on_load_complete(
            &self,
            from_view: Option<&str>,
            view: Box<dyn View>,
            perspective: &Perspective,
        ) {
            self.record.lock().completions.push(CompletionRecord {
                from_view: from_view.map(str::to_string),
                model_tag: view.model_tag().to_string(),
                perspective: perspective.clone(),
                model: view.model().cloned(),
            });
        }

        fn on_load_failed(&self, error: &NavigationError) {
            self.record
                .lock()
                .failures
                .push((FailureKind::from(error), error.to_string()));
        }
    }
}
