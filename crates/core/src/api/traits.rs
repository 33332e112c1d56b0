//! Capability-group trait definitions for the backend API.

use async_trait::async_trait;

use crate::chat::{AnalysisRequest, ChatReply, ChatRequest};
use crate::errors::Result;
use crate::goals::Goal;
use crate::portfolio::{PerformanceMetrics, PortfolioSnapshot, SectorWeight};
use crate::quotes::{Candle, MarketOverview, OptionsChain, Quote, SymbolSearchResult, Timeframe};
use crate::session::{Credentials, UserProfile};
use crate::trades::{EquityOrder, OptionOrder};
use crate::transactions::Transaction;

/// Authentication and profile operations.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for an identity, establishing the session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserProfile>;

    /// Tear the session down server-side.
    async fn sign_out(&self) -> Result<()>;

    /// Ask whether a session exists. `None` means "no session", which is
    /// not an error.
    async fn check_session(&self) -> Result<Option<UserProfile>>;

    async fn get_profile(&self, user_id: &str) -> Result<UserProfile>;

    /// Save a single edited profile field; returns the updated profile.
    async fn update_profile_field(
        &self,
        user_id: &str,
        field: &str,
        value: &str,
    ) -> Result<UserProfile>;

    /// Save a new profile picture URL; returns the updated profile.
    async fn update_profile_picture(&self, user_id: &str, url: &str) -> Result<UserProfile>;

    /// List profiles for the social-browse screen.
    async fn browse_profiles(&self) -> Result<Vec<UserProfile>>;
}

/// Quotes, history, options, trades, and portfolio reads.
#[async_trait]
pub trait StocksApi: Send + Sync {
    /// Latest quote for a symbol.
    async fn quote(&self, symbol: &str) -> Result<Quote>;

    /// Price history for the chart, bucketed by timeframe.
    async fn historical_prices(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>>;

    /// Full options chain for a symbol.
    async fn options_chain(&self, symbol: &str) -> Result<OptionsChain>;

    /// Execute an equity trade; the response is the post-trade portfolio.
    async fn execute_equity_trade(
        &self,
        user_id: &str,
        order: &EquityOrder,
    ) -> Result<PortfolioSnapshot>;

    /// Execute an option trade; the response is the post-trade portfolio.
    async fn execute_option_trade(
        &self,
        user_id: &str,
        order: &OptionOrder,
    ) -> Result<PortfolioSnapshot>;

    /// Current portfolio snapshot.
    async fn portfolio(&self, user_id: &str) -> Result<PortfolioSnapshot>;

    async fn performance_metrics(&self, user_id: &str) -> Result<PerformanceMetrics>;

    async fn sector_allocation(&self, user_id: &str) -> Result<Vec<SectorWeight>>;

    /// Symbol search by free-text query.
    async fn search(&self, query: &str) -> Result<Vec<SymbolSearchResult>>;

    async fn market_overview(&self) -> Result<MarketOverview>;
}

/// Watchlist operations. Mutations return nothing; the caller re-fetches
/// the listing, which is the actual source of truth.
#[async_trait]
pub trait WatchlistApi: Send + Sync {
    async fn list(&self, user_id: &str) -> Result<Vec<String>>;
    async fn add(&self, user_id: &str, symbol: &str) -> Result<()>;
    async fn remove(&self, user_id: &str, symbol: &str) -> Result<()>;
}

/// Savings goals, replaced as a whole list.
#[async_trait]
pub trait GoalsApi: Send + Sync {
    async fn list(&self, user_id: &str) -> Result<Vec<Goal>>;
    async fn replace(&self, user_id: &str, goals: &[Goal]) -> Result<Vec<Goal>>;
}

/// Read-only transaction history.
#[async_trait]
pub trait TransactionsApi: Send + Sync {
    async fn list(&self, user_id: &str) -> Result<Vec<Transaction>>;
}

/// Assistant chat and templated analysis.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply>;
    async fn request_analysis(&self, request: &AnalysisRequest) -> Result<ChatReply>;
}
