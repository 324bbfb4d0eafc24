// ============================================================================
// Tâches planifiées
// ============================================================================
// Le debounce de la recherche et le rafraîchissement du ticker sélectionné
// sont des tâches tokio détenues par un ScheduledTask.
//
// CONCEPT RUST : RAII
// - Le handle possède la tâche
// - dispose() l'annule explicitement
// - Drop l'annule aussi : une tâche remplacée ne peut pas continuer à tourner
// ============================================================================

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// Handle d'une tâche planifiée, annulée quand il est libéré
#[derive(Debug)]
pub struct ScheduledTask {
    label: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    fn new(label: &'static str, handle: JoinHandle<()>) -> Self {
        Self {
            label,
            handle: Some(handle),
        }
    }

    /// Vrai tant que la tâche n'a ni terminé ni été annulée
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Annule la tâche
    pub fn dispose(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            trace!(task = self.label, "Scheduled task cancelled");
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Exécute `task` une fois, après `delay`
pub fn schedule_once<F>(label: &'static str, delay: Duration, task: F) -> ScheduledTask
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        time::sleep(delay).await;
        task.await;
    });
    ScheduledTask::new(label, handle)
}

/// Exécute `task` toutes les `period`, la première fois après une période
///
/// CONCEPT : MissedTickBehavior::Delay
/// - si une exécution dure plus longtemps que la période, la suivante est
///   décalée au lieu d'enchaîner des rattrapages
pub fn schedule_every<F, Fut>(label: &'static str, period: Duration, mut task: F) -> ScheduledTask
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            trace!(task = label, "Scheduled task firing");
            task().await;
        }
    });
    ScheduledTask::new(label, handle)
}
