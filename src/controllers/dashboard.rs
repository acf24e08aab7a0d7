//! Dashboard controller: an opaque server-computed snapshot,
//! refreshed on every page load.

use crate::gateway::ClinicApi;
use crate::models::DashboardStats;

use super::CancelToken;

const STATS_LOAD_ERROR: &str = "No se pudieron cargar las estadísticas.";

#[derive(Default)]
pub struct DashboardController {
    stats: Option<DashboardStats>,
    loading: bool,
    load_error: Option<String>,
}

impl DashboardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: ClinicApi>(&mut self, api: &A, cancel: &CancelToken) {
        self.loading = true;
        self.load_error = None;

        let result = api.dashboard_stats().await;
        if cancel.is_cancelled() {
            return;
        }
        self.loading = false;

        match result {
            Ok(stats) => self.stats = Some(stats),
            Err(err) => {
                tracing::error!(error = %err, "failed to load dashboard stats");
                self.stats = None;
                self.load_error = Some(STATS_LOAD_ERROR.into());
            }
        }
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn dismiss_load_error(&mut self) {
        self.load_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockApi;

    #[tokio::test]
    async fn load_stores_the_snapshot() {
        let stats = DashboardStats {
            total_pacientes: 12,
            total_evaluaciones: 45,
            total_documentos: 23,
            evaluaciones_este_mes: 8,
            recent_evaluations: Vec::new(),
        };
        let api = MockApi::new().with_stats(stats.clone());
        let mut dashboard = DashboardController::new();
        dashboard.load(&api, &CancelToken::new()).await;

        assert_eq!(dashboard.stats(), Some(&stats));
        assert!(!dashboard.is_loading());
    }

    #[tokio::test]
    async fn load_failure_leaves_error_not_panic() {
        let api = MockApi::new().failing_stats();
        let mut dashboard = DashboardController::new();
        dashboard.load(&api, &CancelToken::new()).await;

        assert!(dashboard.stats().is_none());
        assert!(dashboard.load_error().is_some());
    }

    #[tokio::test]
    async fn cancelled_load_applies_nothing() {
        let api = MockApi::new();
        let mut dashboard = DashboardController::new();
        let token = CancelToken::new();
        token.cancel();
        dashboard.load(&api, &token).await;
        assert!(dashboard.stats().is_none());
    }
}
