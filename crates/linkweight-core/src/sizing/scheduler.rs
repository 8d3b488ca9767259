//! Periodic per-view sizing
//!
//! The scheduler owns a registry from view identity to a cancellable interval
//! task. A view is registered when it appears and its task is aborted and
//! removed when it disappears or closes, so no timer outlives its view. Each
//! tick reads one configuration snapshot, runs one synchronous pass, and
//! yields; passes never overlap.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use super::driver::{run_pass, PassReport};
use super::view::{SizedView, ViewId};
use crate::config::SizingConfig;
use crate::graph::GraphProvider;

/// Report of one pass, tagged with the view it ran against
pub type ViewReport = (ViewId, PassReport);

/// Registry of per-view refresh tasks
pub struct SizingScheduler<G> {
    graph: Arc<RwLock<G>>,
    config: watch::Receiver<SizingConfig>,
    period: Duration,
    tasks: HashMap<ViewId, JoinHandle<()>>,
    reports: Option<mpsc::UnboundedSender<ViewReport>>,
}

impl<G> SizingScheduler<G>
where
    G: GraphProvider + Send + Sync + 'static,
{
    /// Create a scheduler ticking every `period`
    ///
    /// The graph may be replaced by its owner between passes; the config
    /// channel supplies a fresh snapshot on every tick.
    pub fn new(
        graph: Arc<RwLock<G>>,
        config: watch::Receiver<SizingConfig>,
        period: Duration,
    ) -> Self {
        SizingScheduler {
            graph,
            config,
            period,
            tasks: HashMap::new(),
            reports: None,
        }
    }

    /// Send every pass report to `tx`
    pub fn with_reports(mut self, tx: mpsc::UnboundedSender<ViewReport>) -> Self {
        self.reports = Some(tx);
        self
    }

    /// Register a view; returns false if it already has a running task
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach<V>(&mut self, view: Arc<Mutex<V>>) -> bool
    where
        V: SizedView + Send + 'static,
    {
        let id = view.lock().id();
        if self.is_attached(&id) {
            return false;
        }

        let task = drive_view(
            id.clone(),
            Arc::clone(&self.graph),
            view,
            self.config.clone(),
            self.period,
            self.reports.clone(),
        );
        info!(view = %id, period = ?self.period, "attaching sizing timer");
        if let Some(stale) = self.tasks.insert(id, tokio::spawn(task)) {
            stale.abort();
        }
        true
    }

    /// Cancel and forget the task for `id`; returns whether one existed
    pub fn detach(&mut self, id: &ViewId) -> bool {
        match self.tasks.remove(id) {
            Some(handle) => {
                handle.abort();
                info!(view = %id, "detached sizing timer");
                true
            }
            None => false,
        }
    }

    /// Reconcile the registry with the views currently present
    ///
    /// Call on every layout change: open views gain a task, closed or vanished
    /// views lose theirs.
    pub fn sync_views<V>(&mut self, views: &[Arc<Mutex<V>>])
    where
        V: SizedView + Send + 'static,
    {
        let mut present = Vec::with_capacity(views.len());
        for view in views {
            let (id, closed) = {
                let guard = view.lock();
                (guard.id(), guard.is_closed())
            };
            if closed {
                self.detach(&id);
            } else {
                self.attach(Arc::clone(view));
                present.push(id);
            }
        }

        let gone: Vec<ViewId> = self
            .tasks
            .keys()
            .filter(|id| !present.contains(id))
            .cloned()
            .collect();
        for id in gone {
            self.detach(&id);
        }
    }

    /// Whether `id` has a task that is still running
    pub fn is_attached(&self, id: &ViewId) -> bool {
        self.tasks.get(id).is_some_and(|h| !h.is_finished())
    }

    /// Drop registry entries whose task ended on its own (closed view)
    pub fn prune_finished(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|id, handle| {
            let keep = !handle.is_finished();
            if !keep {
                debug!(view = %id, "pruning finished sizing timer");
            }
            keep
        });
        before - self.tasks.len()
    }

    /// Number of running view tasks
    pub fn active_views(&mut self) -> usize {
        self.prune_finished();
        self.tasks.len()
    }

    /// Cancel every task
    pub fn shutdown(&mut self) {
        for (id, handle) in self.tasks.drain() {
            debug!(view = %id, "cancelling sizing timer");
            handle.abort();
        }
    }
}

impl<G> Drop for SizingScheduler<G> {
    fn drop(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
    }
}

async fn drive_view<G, V>(
    id: ViewId,
    graph: Arc<RwLock<G>>,
    view: Arc<Mutex<V>>,
    mut config: watch::Receiver<SizingConfig>,
    period: Duration,
    reports: Option<mpsc::UnboundedSender<ViewReport>>,
) where
    G: GraphProvider + Send + Sync + 'static,
    V: SizedView + Send + 'static,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let snapshot = config.borrow_and_update().clone();
        let report = {
            let mut view = view.lock();
            if view.is_closed() {
                debug!(view = %id, "view closed, stopping sizing timer");
                break;
            }
            let graph = graph.read();
            run_pass(&*graph, &mut *view, &snapshot)
        };

        if let Some(tx) = &reports {
            if tx.send((id.clone(), report)).is_err() {
                debug!(view = %id, "report receiver dropped");
            }
        }
    }
}
