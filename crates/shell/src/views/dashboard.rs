//! Portfolio dashboard view controller.

use std::sync::{Arc, RwLock};

use tracing::warn;

use stockdesk_core::errors::Result;
use stockdesk_core::goals::Goal;
use stockdesk_core::portfolio::{PerformanceMetrics, SectorWeight};
use stockdesk_core::refresh::RefreshTask;
use stockdesk_core::transactions::Transaction;

use super::LoadPhase;
use crate::context::ServiceContext;

/// Drives the dashboard screen: portfolio snapshot, goals, sector
/// allocation, and the periodically refreshed performance insights.
pub struct DashboardView {
    ctx: Arc<ServiceContext>,
    phase: LoadPhase,
    goals: Vec<Goal>,
    sectors: Vec<SectorWeight>,
    insights: Arc<RwLock<Option<PerformanceMetrics>>>,
    insights_task: Option<RefreshTask>,
}

impl DashboardView {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            phase: LoadPhase::Loading,
            goals: Vec::new(),
            sectors: Vec::new(),
            insights: Arc::new(RwLock::new(None)),
            insights_task: None,
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn sectors(&self) -> &[SectorWeight] {
        &self.sectors
    }

    /// Latest performance insights, kept fresh by the background task.
    pub fn insights(&self) -> Option<PerformanceMetrics> {
        self.insights.read().unwrap().clone()
    }

    /// First load. Any failure here replaces the screen with an error
    /// state; nothing is partially applied after a failure.
    pub async fn load(&mut self, user_id: &str) {
        self.phase = LoadPhase::Loading;

        let snapshot = match self.ctx.stocks.portfolio(user_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.phase = LoadPhase::Failed(e.user_message());
                return;
            }
        };
        self.ctx.portfolio_store.replace_portfolio(snapshot);

        match self.ctx.goals.list(user_id).await {
            Ok(goals) => self.goals = goals,
            Err(e) => {
                self.phase = LoadPhase::Failed(e.user_message());
                return;
            }
        }

        match self.ctx.stocks.sector_allocation(user_id).await {
            Ok(sectors) => self.sectors = sectors,
            Err(e) => {
                self.phase = LoadPhase::Failed(e.user_message());
                return;
            }
        }

        match self.ctx.stocks.performance_metrics(user_id).await {
            Ok(metrics) => *self.insights.write().unwrap() = Some(metrics),
            Err(e) => {
                self.phase = LoadPhase::Failed(e.user_message());
                return;
            }
        }

        self.phase = LoadPhase::Ready;
        self.start_insights_refresh(user_id);
    }

    /// Starts (or restarts) the insights polling task. Only refresh
    /// failures are tolerated here; they keep the last good snapshot.
    fn start_insights_refresh(&mut self, user_id: &str) {
        let stocks = self.ctx.stocks.clone();
        let insights = self.insights.clone();
        let user_id = user_id.to_string();
        self.insights_task = Some(RefreshTask::spawn(
            "portfolio-insights",
            self.ctx.config.insights_refresh,
            move || {
                let stocks = stocks.clone();
                let insights = insights.clone();
                let user_id = user_id.clone();
                async move {
                    match stocks.performance_metrics(&user_id).await {
                        Ok(metrics) => {
                            *insights.write().unwrap() = Some(metrics);
                        }
                        Err(e) => {
                            warn!("Insights refresh failed, keeping last snapshot: {}", e);
                        }
                    }
                }
            },
        ));
    }

    /// Replaces the goal list on the backend; the response becomes the
    /// new cached copy.
    pub async fn save_goals(&mut self, user_id: &str, goals: Vec<Goal>) -> Result<()> {
        let updated = self.ctx.goals.replace(user_id, &goals).await?;
        self.goals = updated;
        Ok(())
    }

    /// Read-only transaction history for the activity panel.
    pub async fn load_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.ctx.transactions.list(user_id).await
    }

    /// Tears the polling task down. Also happens implicitly on drop.
    pub fn unmount(&mut self) {
        self.insights_task = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use rust_decimal_macros::dec;
    use tokio::time::sleep;

    use stockdesk_core::api::mock::MockBackend;
    use stockdesk_core::portfolio::{PortfolioSnapshot, Position};

    use crate::config::Config;

    fn fast_config() -> Config {
        Config {
            insights_refresh: Duration::from_millis(20),
            ..Config::default()
        }
    }

    fn metrics(day_change: rust_decimal::Decimal) -> PerformanceMetrics {
        PerformanceMetrics {
            total_return: dec!(1200),
            total_return_percent: dec!(12),
            day_change,
            day_change_percent: dec!(0.4),
        }
    }

    fn snapshot() -> PortfolioSnapshot {
        PortfolioSnapshot {
            cash: dec!(1000),
            positions: vec![Position {
                symbol: "AAPL".to_string(),
                quantity: dec!(10),
                current_price: dec!(150),
                market_value: dec!(1500),
            }],
            options: Vec::new(),
            total_value: dec!(2500),
        }
    }

    #[tokio::test]
    async fn first_load_replaces_the_store_and_becomes_ready() {
        let backend = Arc::new(MockBackend::new());
        backend.push_portfolio(snapshot());
        backend.set_performance(metrics(dec!(10)));
        let ctx = ServiceContext::with_backend(fast_config(), backend);
        let mut view = DashboardView::new(ctx.clone());

        view.load("u-1").await;

        assert!(view.phase().is_ready());
        let state = ctx.portfolio_store.snapshot();
        assert_eq!(state.total_value, dec!(2500));
        assert_eq!(state.positions.len(), 1);
        view.unmount();
    }

    #[tokio::test]
    async fn first_load_failure_replaces_the_screen_with_the_detail() {
        let backend = Arc::new(MockBackend::new());
        backend.fail_next("Portfolio service unavailable");
        let ctx = ServiceContext::with_backend(fast_config(), backend);
        let mut view = DashboardView::new(ctx);

        view.load("u-1").await;

        assert_eq!(
            view.phase().error(),
            Some("Portfolio service unavailable")
        );
    }

    #[tokio::test]
    async fn insights_refresh_populates_and_keeps_last_known_good() {
        let backend = Arc::new(MockBackend::new());
        backend.push_portfolio(snapshot());
        backend.set_performance(metrics(dec!(10)));
        let ctx = ServiceContext::with_backend(fast_config(), backend.clone());
        let mut view = DashboardView::new(ctx);

        view.load("u-1").await;
        sleep(Duration::from_millis(10)).await;
        assert_eq!(view.insights().unwrap().day_change, dec!(10));

        // A background failure is logged, not surfaced: the panel keeps
        // the last good metrics.
        backend.fail_next("transient blip");
        sleep(Duration::from_millis(40)).await;
        assert_eq!(view.insights().unwrap().day_change, dec!(10));
        assert!(view.phase().is_ready());
        view.unmount();
    }

    #[tokio::test]
    async fn saving_goals_replaces_the_cached_list() {
        let backend = Arc::new(MockBackend::new());
        backend.push_portfolio(snapshot());
        backend.set_performance(metrics(dec!(10)));
        let ctx = ServiceContext::with_backend(fast_config(), backend);
        let mut view = DashboardView::new(ctx);
        view.load("u-1").await;

        let goals = vec![Goal {
            id: "g-1".to_string(),
            name: "House down payment".to_string(),
            current_amount: dec!(20000),
            target_amount: dec!(80000),
            percentage: 25.0,
            category: Some("savings".to_string()),
            target_date: None,
        }];
        view.save_goals("u-1", goals).await.unwrap();

        assert_eq!(view.goals().len(), 1);
        assert_eq!(view.goals()[0].name, "House down payment");
        view.unmount();
    }

    #[tokio::test]
    async fn transactions_come_back_read_only() {
        let backend = Arc::new(MockBackend::new());
        let ctx = ServiceContext::with_backend(fast_config(), backend.clone());
        let view = DashboardView::new(ctx);

        assert!(view.load_transactions("u-1").await.unwrap().is_empty());
        assert_eq!(backend.calls_matching("transactions:"), 1);
    }

    #[tokio::test]
    async fn unmount_stops_the_polling() {
        let backend = Arc::new(MockBackend::new());
        backend.push_portfolio(snapshot());
        backend.set_performance(metrics(dec!(10)));
        let ctx = ServiceContext::with_backend(fast_config(), backend.clone());
        let mut view = DashboardView::new(ctx);

        view.load("u-1").await;
        view.unmount();
        sleep(Duration::from_millis(30)).await;
        let calls = backend.calls_matching("performance:");
        sleep(Duration::from_millis(50)).await;
        assert_eq!(backend.calls_matching("performance:"), calls);
    }
}
