//! In-memory backend double for tests.
//!
//! Implements every capability trait over a `Mutex`-guarded state bag,
//! records the calls it receives, and can be primed to fail the next call
//! with a backend `detail` message. Mutations behave like the real
//! backend where the contracts depend on it: watchlist add/remove mutate
//! the server-side listing, trades and portfolio reads consume queued
//! snapshots so tests can script sequential responses.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AuthApi, ChatApi, GoalsApi, StocksApi, TransactionsApi, WatchlistApi};
use crate::chat::{AnalysisRequest, ChatReply, ChatRequest};
use crate::errors::{ApiError, Error, Result};
use crate::goals::Goal;
use crate::portfolio::{PerformanceMetrics, PortfolioSnapshot, SectorWeight};
use crate::quotes::{Candle, MarketOverview, OptionsChain, Quote, SymbolSearchResult, Timeframe};
use crate::session::{Credentials, UserProfile};
use crate::trades::{EquityOrder, OptionOrder};
use crate::transactions::Transaction;

#[derive(Default)]
struct MockState {
    session: Option<UserProfile>,
    sign_in_profile: Option<UserProfile>,
    profiles: Vec<UserProfile>,
    quotes: HashMap<String, Quote>,
    portfolio_responses: VecDeque<PortfolioSnapshot>,
    watchlist: Vec<String>,
    goals: Vec<Goal>,
    transactions: Vec<Transaction>,
    chain: Option<OptionsChain>,
    candles: Vec<Candle>,
    performance: Option<PerformanceMetrics>,
    sectors: Vec<SectorWeight>,
    overview: Option<MarketOverview>,
    search_results: Vec<SymbolSearchResult>,
    reply_text: Option<String>,
    fail_next: Option<String>,
}

/// Scriptable backend double.
#[derive(Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
    calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── priming helpers ────────────────────────────────────────────────

    /// The identity `check_session` reports.
    pub fn set_session(&self, profile: Option<UserProfile>) {
        self.state.lock().unwrap().session = profile;
    }

    /// The identity a successful `sign_in` returns.
    pub fn set_sign_in_profile(&self, profile: UserProfile) {
        self.state.lock().unwrap().sign_in_profile = Some(profile);
    }

    pub fn set_profiles(&self, profiles: Vec<UserProfile>) {
        self.state.lock().unwrap().profiles = profiles;
    }

    pub fn set_quote(&self, quote: Quote) {
        self.state
            .lock()
            .unwrap()
            .quotes
            .insert(quote.symbol.clone(), quote);
    }

    /// Queue a portfolio response; reads and trade results consume the
    /// queue front, the last entry repeats.
    pub fn push_portfolio(&self, snapshot: PortfolioSnapshot) {
        self.state
            .lock()
            .unwrap()
            .portfolio_responses
            .push_back(snapshot);
    }

    pub fn set_watchlist(&self, symbols: Vec<String>) {
        self.state.lock().unwrap().watchlist = symbols;
    }

    pub fn server_watchlist(&self) -> Vec<String> {
        self.state.lock().unwrap().watchlist.clone()
    }

    pub fn set_goals(&self, goals: Vec<Goal>) {
        self.state.lock().unwrap().goals = goals;
    }

    pub fn set_transactions(&self, transactions: Vec<Transaction>) {
        self.state.lock().unwrap().transactions = transactions;
    }

    pub fn set_options_chain(&self, chain: OptionsChain) {
        self.state.lock().unwrap().chain = Some(chain);
    }

    pub fn set_candles(&self, candles: Vec<Candle>) {
        self.state.lock().unwrap().candles = candles;
    }

    pub fn set_performance(&self, metrics: PerformanceMetrics) {
        self.state.lock().unwrap().performance = Some(metrics);
    }

    pub fn set_sectors(&self, sectors: Vec<SectorWeight>) {
        self.state.lock().unwrap().sectors = sectors;
    }

    pub fn set_overview(&self, overview: MarketOverview) {
        self.state.lock().unwrap().overview = Some(overview);
    }

    pub fn set_search_results(&self, results: Vec<SymbolSearchResult>) {
        self.state.lock().unwrap().search_results = results;
    }

    pub fn set_reply(&self, text: impl Into<String>) {
        self.state.lock().unwrap().reply_text = Some(text.into());
    }

    /// Fail the next call with a backend error carrying this detail.
    pub fn fail_next(&self, detail: impl Into<String>) {
        self.state.lock().unwrap().fail_next = Some(detail.into());
    }

    /// Labels of every call received, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose label starts with the prefix.
    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    // ─── internals ──────────────────────────────────────────────────────

    fn record(&self, label: impl Into<String>) -> Result<()> {
        self.calls.lock().unwrap().push(label.into());
        if let Some(detail) = self.state.lock().unwrap().fail_next.take() {
            return Err(Error::Api(ApiError::Backend {
                status: 400,
                detail,
            }));
        }
        Ok(())
    }

    fn next_portfolio(&self) -> PortfolioSnapshot {
        let mut state = self.state.lock().unwrap();
        if state.portfolio_responses.len() > 1 {
            state.portfolio_responses.pop_front().unwrap()
        } else {
            state
                .portfolio_responses
                .front()
                .cloned()
                .unwrap_or_default()
        }
    }

    fn apply_profile_field(profile: &mut UserProfile, field: &str, value: &str) {
        let value = Some(value.to_string());
        match field {
            "displayName" => profile.display_name = value,
            "bio" => profile.bio = value,
            "occupation" => profile.occupation = value,
            "location" => profile.location = value,
            "email" => profile.email = value,
            _ => {}
        }
    }
}

#[async_trait]
impl AuthApi for MockBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserProfile> {
        self.record(format!("signIn:{}", credentials.username))?;
        let mut state = self.state.lock().unwrap();
        match state.sign_in_profile.clone() {
            Some(profile) => {
                state.session = Some(profile.clone());
                Ok(profile)
            }
            None => Err(Error::Api(ApiError::Backend {
                status: 401,
                detail: "Invalid username or password".to_string(),
            })),
        }
    }

    async fn sign_out(&self) -> Result<()> {
        self.record("signOut")?;
        self.state.lock().unwrap().session = None;
        Ok(())
    }

    async fn check_session(&self) -> Result<Option<UserProfile>> {
        self.record("checkSession")?;
        Ok(self.state.lock().unwrap().session.clone())
    }

    async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.record(format!("getProfile:{}", user_id))?;
        let state = self.state.lock().unwrap();
        state
            .profiles
            .iter()
            .find(|p| p.id == user_id)
            .cloned()
            .or_else(|| state.session.clone().filter(|p| p.id == user_id))
            .ok_or_else(|| {
                Error::Api(ApiError::Backend {
                    status: 404,
                    detail: "User not found".to_string(),
                })
            })
    }

    async fn update_profile_field(
        &self,
        user_id: &str,
        field: &str,
        value: &str,
    ) -> Result<UserProfile> {
        self.record(format!("updateProfile:{}:{}", user_id, field))?;
        let mut state = self.state.lock().unwrap();
        let profile = state
            .session
            .as_mut()
            .filter(|p| p.id == user_id)
            .ok_or_else(|| {
                Error::Api(ApiError::Backend {
                    status: 404,
                    detail: "User not found".to_string(),
                })
            })?;
        Self::apply_profile_field(profile, field, value);
        Ok(profile.clone())
    }

    async fn update_profile_picture(&self, user_id: &str, url: &str) -> Result<UserProfile> {
        self.record(format!("updatePicture:{}", user_id))?;
        let mut state = self.state.lock().unwrap();
        let profile = state
            .session
            .as_mut()
            .filter(|p| p.id == user_id)
            .ok_or_else(|| {
                Error::Api(ApiError::Backend {
                    status: 404,
                    detail: "User not found".to_string(),
                })
            })?;
        profile.profile_picture_url = Some(url.to_string());
        Ok(profile.clone())
    }

    async fn browse_profiles(&self) -> Result<Vec<UserProfile>> {
        self.record("browseProfiles")?;
        Ok(self.state.lock().unwrap().profiles.clone())
    }
}

#[async_trait]
impl StocksApi for MockBackend {
    async fn quote(&self, symbol: &str) -> Result<Quote> {
        self.record(format!("quote:{}", symbol))?;
        self.state
            .lock()
            .unwrap()
            .quotes
            .get(symbol)
            .cloned()
            .ok_or_else(|| {
                Error::Api(ApiError::Backend {
                    status: 404,
                    detail: format!("Unknown symbol {}", symbol),
                })
            })
    }

    async fn historical_prices(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        self.record(format!("history:{}:{}", symbol, timeframe))?;
        Ok(self.state.lock().unwrap().candles.clone())
    }

    async fn options_chain(&self, symbol: &str) -> Result<OptionsChain> {
        self.record(format!("chain:{}", symbol))?;
        self.state.lock().unwrap().chain.clone().ok_or_else(|| {
            Error::Api(ApiError::Backend {
                status: 404,
                detail: format!("No options chain for {}", symbol),
            })
        })
    }

    async fn execute_equity_trade(
        &self,
        user_id: &str,
        order: &EquityOrder,
    ) -> Result<PortfolioSnapshot> {
        self.record(format!("equityTrade:{}:{}", user_id, order.symbol))?;
        Ok(self.next_portfolio())
    }

    async fn execute_option_trade(
        &self,
        user_id: &str,
        order: &OptionOrder,
    ) -> Result<PortfolioSnapshot> {
        self.record(format!("optionTrade:{}:{}", user_id, order.symbol))?;
        Ok(self.next_portfolio())
    }

    async fn portfolio(&self, user_id: &str) -> Result<PortfolioSnapshot> {
        self.record(format!("portfolio:{}", user_id))?;
        Ok(self.next_portfolio())
    }

    async fn performance_metrics(&self, user_id: &str) -> Result<PerformanceMetrics> {
        self.record(format!("performance:{}", user_id))?;
        self.state.lock().unwrap().performance.clone().ok_or_else(|| {
            Error::Api(ApiError::Backend {
                status: 404,
                detail: "No performance data".to_string(),
            })
        })
    }

    async fn sector_allocation(&self, user_id: &str) -> Result<Vec<SectorWeight>> {
        self.record(format!("sectors:{}", user_id))?;
        Ok(self.state.lock().unwrap().sectors.clone())
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolSearchResult>> {
        self.record(format!("search:{}", query))?;
        Ok(self.state.lock().unwrap().search_results.clone())
    }

    async fn market_overview(&self) -> Result<MarketOverview> {
        self.record("marketOverview")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .overview
            .clone()
            .unwrap_or(MarketOverview {
                indices: Vec::new(),
                gainers: Vec::new(),
                losers: Vec::new(),
            }))
    }
}

#[async_trait]
impl WatchlistApi for MockBackend {
    async fn list(&self, user_id: &str) -> Result<Vec<String>> {
        self.record(format!("watchlist:{}", user_id))?;
        Ok(self.state.lock().unwrap().watchlist.clone())
    }

    async fn add(&self, user_id: &str, symbol: &str) -> Result<()> {
        self.record(format!("watchlistAdd:{}:{}", user_id, symbol))?;
        let mut state = self.state.lock().unwrap();
        if !state.watchlist.iter().any(|s| s == symbol) {
            state.watchlist.push(symbol.to_string());
        }
        Ok(())
    }

    async fn remove(&self, user_id: &str, symbol: &str) -> Result<()> {
        self.record(format!("watchlistRemove:{}:{}", user_id, symbol))?;
        self.state
            .lock()
            .unwrap()
            .watchlist
            .retain(|s| s != symbol);
        Ok(())
    }
}

#[async_trait]
impl GoalsApi for MockBackend {
    async fn list(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.record(format!("goals:{}", user_id))?;
        Ok(self.state.lock().unwrap().goals.clone())
    }

    async fn replace(&self, user_id: &str, goals: &[Goal]) -> Result<Vec<Goal>> {
        self.record(format!("goalsReplace:{}", user_id))?;
        let mut state = self.state.lock().unwrap();
        state.goals = goals.to_vec();
        Ok(state.goals.clone())
    }
}

#[async_trait]
impl TransactionsApi for MockBackend {
    async fn list(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.record(format!("transactions:{}", user_id))?;
        Ok(self.state.lock().unwrap().transactions.clone())
    }
}

#[async_trait]
impl ChatApi for MockBackend {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.record(format!("chat:{}", request.user_id))?;
        let text = self
            .state
            .lock()
            .unwrap()
            .reply_text
            .clone()
            .unwrap_or_else(|| "I looked at the numbers.".to_string());
        Ok(ChatReply { text })
    }

    async fn request_analysis(&self, request: &AnalysisRequest) -> Result<ChatReply> {
        request.validate()?;
        self.record(format!("analysis:{:?}", request.kind))?;
        let text = self
            .state
            .lock()
            .unwrap()
            .reply_text
            .clone()
            .unwrap_or_else(|| "Analysis complete.".to_string());
        Ok(ChatReply { text })
    }
}
