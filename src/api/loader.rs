// ============================================================================
// DashboardLoader : chargement en arrière-plan
// ============================================================================
// Lance fetch_dashboard() sur le runtime tokio et rend le résultat à la
// boucle d'événements sans la bloquer.
//
// CONCEPTS RUST :
// 1. tokio::spawn + JoinHandle : tâche async détachée de l'UI
// 2. oneshot channel : une seule valeur, de la tâche vers l'event loop
// 3. Drop : annule la requête si le dashboard est fermé avant la fin
// ============================================================================

use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::api::backend::Client;
use crate::app::LoadState;

/// Message générique affiché à l'utilisateur (la cause détaillée va dans les logs)
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch chart data. Please try again later.";

/// Chargement du dashboard en cours
pub struct DashboardLoader {
    task: JoinHandle<()>,
    result_rx: oneshot::Receiver<LoadState>,
}

impl DashboardLoader {
    /// Lance le chargement des quatre graphiques sur le runtime donné
    pub fn spawn(runtime: &Handle, client: Client) -> Self {
        let (result_tx, result_rx) = oneshot::channel();

        info!(base_url = %client.base_url(), "Spawning dashboard fetch");
        let task = runtime.spawn(async move {
            let state = match client.fetch_dashboard().await {
                Ok(data) => LoadState::Ready(data),
                Err(e) => {
                    error!(error = ?e, "Error fetching chart data");
                    LoadState::Failed(FETCH_FAILED_MESSAGE.to_string())
                }
            };

            // Le receiver a pu être drop (dashboard fermé) : rien à faire
            if result_tx.send(state).is_err() {
                debug!("Dashboard loader dropped before fetch completed");
            }
        });

        Self { task, result_rx }
    }

    /// Récupère le résultat s'il est disponible (non bloquant)
    ///
    /// Retourne None tant que le chargement est en cours.
    pub fn poll(&mut self) -> Option<LoadState> {
        match self.result_rx.try_recv() {
            Ok(state) => Some(state),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                // La tâche est morte sans répondre (panic ou annulation)
                warn!("Dashboard fetch task ended without a result");
                Some(LoadState::Failed(FETCH_FAILED_MESSAGE.to_string()))
            }
        }
    }

    /// Attend le résultat (utilisé hors de l'event loop)
    pub async fn wait(mut self) -> LoadState {
        match (&mut self.result_rx).await {
            Ok(state) => state,
            Err(_) => LoadState::Failed(FETCH_FAILED_MESSAGE.to_string()),
        }
    }

    /// Vérifie si la tâche est terminée
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for DashboardLoader {
    /// Annule la requête en cours quand le loader disparaît
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!("Aborting in-flight dashboard fetch");
            self.task.abort();
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use axum::Router;

    use crate::api::backend::tests::{backend_routes, serve};
    use crate::api::backend::Endpoint;

    #[tokio::test]
    async fn test_loader_ready_when_all_succeed() {
        let client = serve(backend_routes(None)).await;
        let loader = DashboardLoader::spawn(&Handle::current(), client);

        match loader.wait().await {
            LoadState::Ready(data) => {
                assert_eq!(data.pie.len(), 2);
                assert_eq!(data.bar.len(), 3);
                assert_eq!(data.line.len(), 2);
                assert_eq!(data.candlestick.len(), 2);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_loader_failed_when_one_endpoint_errors() {
        let client = serve(backend_routes(Some(Endpoint::PieChart))).await;
        let loader = DashboardLoader::spawn(&Handle::current(), client);

        assert_eq!(
            loader.wait().await,
            LoadState::Failed(FETCH_FAILED_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_poll_is_non_blocking() {
        // Backend qui ne répond pas dans la durée du test
        let router = Router::new().fallback(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "{}"
        });
        let client = serve(router).await;
        let mut loader = DashboardLoader::spawn(&Handle::current(), client);

        assert!(loader.poll().is_none());
        assert!(!loader.is_finished());
    }

    #[tokio::test]
    async fn test_drop_aborts_task() {
        let router = Router::new().fallback(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "{}"
        });
        let client = serve(router).await;
        let loader = DashboardLoader::spawn(&Handle::current(), client);
        let abort_handle = loader.task.abort_handle();

        drop(loader);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(abort_handle.is_finished());
    }
}
