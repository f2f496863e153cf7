//! Tutorial Session
//!
//! One session owns its Node Store, Navigation Stack and Progression Engine exclusively.
//! Every UI intent runs synchronously under the session lock: mutate, evaluate the active
//! step, build the view. The only asynchronous pieces are the fire-once timers the engine
//! requests, which run as tokio tasks and are aborted on restart, level advance, shutdown
//! and drop. A timer that already woke up before being aborted is rejected by the engine's
//! ticket check.

mod view;

pub use view::SessionView;

use crate::engine::{ProgressionEngine, TimerKind, TimerRequest, Timings};
use crate::error::{ApiError, StoreError};
use crate::level::{LevelCatalog, StepContext};
use crate::navigation::NavigationStack;
use crate::store::{NodeStore, RenameOutcome};
use crate::types::{NodeId, NodeKind};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

struct SessionCore {
    store: NodeStore,
    navigation: NavigationStack,
    engine: ProgressionEngine,
}

impl SessionCore {
    fn evaluate(&mut self) -> Vec<TimerRequest> {
        let ctx = StepContext {
            nodes: self.store.nodes(),
            current_folder: self.navigation.current_folder(),
            path: self.navigation.ids(),
        };
        self.engine.evaluate(&ctx)
    }

    /// Reseed tree and navigation from the engine's current level
    fn reseed_from_level(&mut self) {
        let nodes = self.engine.current_level().initial_nodes.clone();
        self.navigation.reset(nodes.root_id().clone());
        self.store.reseed(nodes);
    }

    fn view(&self) -> SessionView {
        let nodes = self.store.nodes();
        let level = self.engine.current_level();
        SessionView {
            nodes: nodes.clone(),
            navigation: self.navigation.ids().to_vec(),
            path_names: self.navigation.path_names(nodes),
            children: nodes
                .list_children(self.navigation.current_folder())
                .into_iter()
                .cloned()
                .collect(),
            state: self.engine.state().clone(),
            rename_target: self.store.rename_target().map(|t| t.id.clone()),
            level_id: level.id.clone(),
            level_title: level.title.clone(),
            level_count: self.engine.catalog().len(),
            step_count: level.steps.len(),
            instruction: self.engine.current_step().instruction.clone(),
        }
    }
}

struct Shared {
    core: Mutex<SessionCore>,
    /// Outstanding timer per kind, with the ticket it will fire
    timers: Mutex<HashMap<TimerKind, (u64, JoinHandle<()>)>>,
    runtime: Handle,
    revision: watch::Sender<u64>,
}

impl Shared {
    /// Spawn the requested timers. Callers hold the core lock, so the stored tickets
    /// always move in the same order the engine issued them.
    fn schedule(self: &Arc<Self>, requests: Vec<TimerRequest>) {
        for request in requests {
            let weak: Weak<Shared> = Arc::downgrade(self);
            let handle = self.runtime.spawn(async move {
                sleep(request.delay).await;
                if let Some(shared) = weak.upgrade() {
                    shared.on_timer(request);
                }
            });
            debug!(
                kind = ?request.kind,
                ticket = request.ticket,
                delay_ms = request.delay.as_millis() as u64,
                "Scheduled timer"
            );
            let mut timers = self.timers.lock();
            match timers.get(&request.kind) {
                Some((current, _)) if *current > request.ticket => {
                    debug!(ticket = request.ticket, current, "Dropping superseded timer");
                    handle.abort();
                }
                _ => {
                    if let Some((_, previous)) =
                        timers.insert(request.kind, (request.ticket, handle))
                    {
                        previous.abort();
                    }
                }
            }
        }
    }

    fn on_timer(self: &Arc<Self>, request: TimerRequest) {
        {
            let mut timers = self.timers.lock();
            if matches!(timers.get(&request.kind), Some((ticket, _)) if *ticket == request.ticket) {
                timers.remove(&request.kind);
            }
        }

        {
            let mut core = self.core.lock();
            if !core.engine.fire(request.kind, request.ticket) {
                return;
            }
            let follow_up = match request.kind {
                // The next step may already hold on the current snapshot.
                TimerKind::AutoAdvance => core.evaluate(),
                TimerKind::FeedbackExpiry => Vec::new(),
            };
            self.schedule(follow_up);
        }
        self.bump_revision();
    }

    fn cancel_all(&self) {
        let drained: Vec<_> = self.timers.lock().drain().collect();
        if !drained.is_empty() {
            debug!(count = drained.len(), "Cancelled pending timers");
        }
        for (_, (_, handle)) in drained {
            handle.abort();
        }
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

/// A tutorial session: the boundary the presentation layer calls into.
pub struct Session {
    shared: Arc<Shared>,
}

impl Session {
    /// Start at the first step of the first level.
    ///
    /// Must be called from within a tokio runtime; its handle drives the timers.
    pub fn new(catalog: Arc<LevelCatalog>, timings: Timings) -> Result<Self, ApiError> {
        Self::starting_at(catalog, timings, 0)
    }

    /// Start at the first step of `level_index`
    pub fn starting_at(
        catalog: Arc<LevelCatalog>,
        timings: Timings,
        level_index: usize,
    ) -> Result<Self, ApiError> {
        let runtime =
            Handle::try_current().map_err(|e| ApiError::RuntimeUnavailable(e.to_string()))?;
        let engine = ProgressionEngine::starting_at(catalog, timings, level_index)?;
        let nodes = engine.current_level().initial_nodes.clone();
        let navigation = NavigationStack::new(nodes.root_id().clone());
        let (revision, _) = watch::channel(0);

        info!(
            level = level_index,
            levels = engine.catalog().len(),
            "Started tutorial session"
        );

        Ok(Self {
            shared: Arc::new(Shared {
                core: Mutex::new(SessionCore {
                    store: NodeStore::new(nodes),
                    navigation,
                    engine,
                }),
                timers: Mutex::new(HashMap::new()),
                runtime,
                revision,
            }),
        })
    }

    /// Current view without performing any action
    pub fn view(&self) -> SessionView {
        self.shared.core.lock().view()
    }

    /// Receiver bumped on every state change, including changes made by timers
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    pub fn enter_folder(&self, id: &NodeId) -> SessionView {
        self.act("enter_folder", |core| {
            if !core.store.nodes().is_folder(id) {
                return Err(StoreError::InvalidTarget(format!("'{}' is not a folder", id)));
            }
            core.navigation.enter(id.clone());
            Ok(())
        })
    }

    pub fn go_back(&self) -> SessionView {
        self.act("go_back", |core| {
            core.navigation.back();
            Ok(())
        })
    }

    /// Create a placeholder folder in the current folder; it becomes the rename target.
    pub fn create_folder(&self) -> SessionView {
        self.create(NodeKind::Folder)
    }

    /// Create a placeholder file in the current folder; it becomes the rename target.
    pub fn create_file(&self) -> SessionView {
        self.create(NodeKind::File)
    }

    fn create(&self, kind: NodeKind) -> SessionView {
        self.act("create", |core| {
            let parent = core.navigation.current_folder().clone();
            core.store.create(&parent, kind).map(|_| ())
        })
    }

    pub fn start_rename(&self, id: &NodeId) -> SessionView {
        self.act("start_rename", |core| core.store.start_rename(id))
    }

    /// Commit a rename. A failure on a freshly created node removes it; on an existing
    /// node the old name stays. Either way the learner gets error feedback.
    pub fn commit_rename(&self, id: &NodeId, name: &str) -> SessionView {
        self.act("commit_rename", |core| match core.store.commit_rename(id, name) {
            RenameOutcome::Renamed => Ok(()),
            RenameOutcome::Reverted(err) | RenameOutcome::Abandoned(err) => Err(err),
        })
    }

    pub fn delete(&self, id: &NodeId) -> SessionView {
        self.act("delete", |core| core.store.delete(id).map(|_| ()))
    }

    pub fn move_node(&self, dragged: &NodeId, target: &NodeId) -> SessionView {
        self.act("move_node", |core| {
            core.store.move_node(dragged, target).map(|_| ())
        })
    }

    /// Proceed after `LevelComplete`. Not available once the game is complete.
    pub fn advance_after_level_complete(&self) -> Result<SessionView, ApiError> {
        self.reset("advance_level", |engine| engine.advance_level().map(|_| ()))
    }

    pub fn restart_level(&self) -> SessionView {
        self.reset_with("restart_level", |engine| {
            engine.restart_level();
        })
    }

    pub fn restart_game(&self) -> SessionView {
        self.reset_with("restart_game", |engine| {
            engine.restart_game();
        })
    }

    /// Abort every outstanding timer. The session stays usable.
    pub fn shutdown(&self) {
        self.shared.cancel_all();
    }

    fn act<F>(&self, intent: &'static str, action: F) -> SessionView
    where
        F: FnOnce(&mut SessionCore) -> Result<(), StoreError>,
    {
        let view = {
            let mut core = self.shared.core.lock();
            let timers = match action(&mut *core) {
                Ok(()) => {
                    debug!(intent, depth = core.navigation.depth(), "Intent applied");
                    core.evaluate()
                }
                Err(err) => {
                    debug!(intent, error = %err, "Intent rejected");
                    core.engine.report_failure(&err).into_iter().collect()
                }
            };
            self.shared.schedule(timers);
            core.view()
        };
        self.shared.bump_revision();
        view
    }

    fn reset<F>(&self, intent: &'static str, transition: F) -> Result<SessionView, ApiError>
    where
        F: FnOnce(&mut ProgressionEngine) -> Result<(), ApiError>,
    {
        let view = {
            let mut core = self.shared.core.lock();
            transition(&mut core.engine)?;
            // Cancel under the session lock so no intent can slip in between.
            self.shared.cancel_all();
            // A reset lands on Playing(i, 0); the first step is only checked after the
            // learner's next action.
            core.reseed_from_level();
            core.view()
        };
        info!(intent, level = view.state.level_index, "Session reset");
        self.shared.bump_revision();
        Ok(view)
    }

    fn reset_with<F>(&self, intent: &'static str, transition: F) -> SessionView
    where
        F: FnOnce(&mut ProgressionEngine),
    {
        match self.reset(intent, |engine| {
            transition(engine);
            Ok(())
        }) {
            Ok(view) => view,
            Err(_) => self.view(),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shared.cancel_all();
    }
}
