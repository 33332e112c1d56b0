//! Stock-trading view controller.

use std::sync::Arc;

use tracing::warn;

use stockdesk_core::errors::Result;
use stockdesk_core::quotes::{Candle, MarketOverview, OptionsChain, SymbolSearchResult, Timeframe};
use stockdesk_core::refresh::RefreshTask;
use stockdesk_core::trades::{EquityOrder, OptionOrder, TradeTicket};

use super::LoadPhase;
use crate::context::ServiceContext;

/// Drives the trading screen: symbol selection with a 30s quote refresh,
/// options chain and chart data on demand, trade submission, and the
/// watchlist round trips.
pub struct TradingView {
    ctx: Arc<ServiceContext>,
    phase: LoadPhase,
    ticket: TradeTicket,
    chain: Option<OptionsChain>,
    quote_task: Option<RefreshTask>,
    watchlist_error: Option<String>,
}

impl TradingView {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            phase: LoadPhase::Loading,
            ticket: TradeTicket::new(),
            chain: None,
            quote_task: None,
            watchlist_error: None,
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn options_chain(&self) -> Option<&OptionsChain> {
        self.chain.as_ref()
    }

    /// True while a trade submission is outstanding; the buy/sell
    /// controls must be disabled.
    pub fn is_trade_pending(&self) -> bool {
        self.ticket.is_submitting()
    }

    pub fn trade_error(&self) -> Option<&str> {
        self.ticket.last_error()
    }

    pub fn watchlist_error(&self) -> Option<&str> {
        self.watchlist_error.as_deref()
    }

    /// Selects a symbol: records the selection, fetches the first quote
    /// (surfacing failure), then starts the periodic refresh.
    pub async fn select_symbol(&mut self, symbol: &str) {
        self.ctx
            .portfolio_store
            .set_selected_symbol(Some(symbol.to_string()));
        self.chain = None;
        self.quote_task = None;
        self.phase = LoadPhase::Loading;

        match self.ctx.stocks.quote(symbol).await {
            Ok(quote) => {
                self.ctx.portfolio_store.upsert_quote(quote);
                self.phase = LoadPhase::Ready;
                self.start_quote_refresh(symbol);
            }
            Err(e) => {
                self.phase = LoadPhase::Failed(e.user_message());
            }
        }
    }

    fn start_quote_refresh(&mut self, symbol: &str) {
        let stocks = self.ctx.stocks.clone();
        let store = self.ctx.portfolio_store.clone();
        let symbol = symbol.to_string();
        self.quote_task = Some(RefreshTask::spawn(
            format!("quote-refresh:{}", symbol),
            self.ctx.config.quote_refresh,
            move || {
                let stocks = stocks.clone();
                let store = store.clone();
                let symbol = symbol.clone();
                async move {
                    match stocks.quote(&symbol).await {
                        Ok(quote) => store.upsert_quote(quote),
                        Err(e) => {
                            warn!("Quote refresh for {} failed: {}", symbol, e);
                        }
                    }
                }
            },
        ));
    }

    /// Free-text symbol search; results go straight to the caller.
    pub async fn search(&self, query: &str) -> Result<Vec<SymbolSearchResult>> {
        self.ctx.stocks.search(query).await
    }

    /// Indices and movers for the market panel.
    pub async fn market_overview(&self) -> Result<MarketOverview> {
        self.ctx.stocks.market_overview().await
    }

    /// Fetches the options chain for the symbol into the view.
    pub async fn load_options_chain(&mut self, symbol: &str) -> Result<()> {
        let chain = self.ctx.stocks.options_chain(symbol).await?;
        self.chain = Some(chain);
        Ok(())
    }

    /// Chart data by timeframe; the chart owns the series, the store
    /// never sees it.
    pub async fn load_history(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        self.ctx.stocks.historical_prices(symbol, timeframe).await
    }

    /// Submits an equity order. Returns true when the backend confirmed
    /// and the portfolio was replaced.
    pub async fn submit_equity(&mut self, user_id: &str, order: EquityOrder) -> bool {
        if let Err(e) = order.validate() {
            self.ticket.complete_failure(e.user_message());
            return false;
        }
        if !self.ticket.begin() {
            // A submission is already outstanding; the control is disabled
            return false;
        }
        match self.ctx.stocks.execute_equity_trade(user_id, &order).await {
            Ok(snapshot) => {
                self.ctx.portfolio_store.replace_portfolio(snapshot);
                self.ticket.complete_success();
                true
            }
            Err(e) => {
                self.ticket.complete_failure(e.user_message());
                false
            }
        }
    }

    /// Submits an option order; same lifecycle as equity orders.
    pub async fn submit_option(&mut self, user_id: &str, order: OptionOrder) -> bool {
        if let Err(e) = order.validate() {
            self.ticket.complete_failure(e.user_message());
            return false;
        }
        if !self.ticket.begin() {
            return false;
        }
        match self.ctx.stocks.execute_option_trade(user_id, &order).await {
            Ok(snapshot) => {
                self.ctx.portfolio_store.replace_portfolio(snapshot);
                self.ticket.complete_success();
                true
            }
            Err(e) => {
                self.ticket.complete_failure(e.user_message());
                false
            }
        }
    }

    /// Loads the watchlist from the server, replacing local state.
    pub async fn refresh_watchlist(&mut self, user_id: &str) -> Result<()> {
        let symbols = self.ctx.watchlist.list(user_id).await?;
        self.ctx.portfolio_store.confirm_watchlist(symbols);
        Ok(())
    }

    /// Optimistically adds a symbol, then runs the server round trip.
    /// The follow-up listing is the source of truth; a failed add rolls
    /// the optimistic entry back.
    pub async fn add_to_watchlist(&mut self, user_id: &str, symbol: &str) -> bool {
        self.watchlist_error = None;
        if !self.ctx.portfolio_store.add_watchlist_symbol(symbol) {
            return false;
        }
        match self.ctx.watchlist.add(user_id, symbol).await {
            Ok(()) => {
                self.reconcile_watchlist(user_id).await;
                true
            }
            Err(e) => {
                self.ctx.portfolio_store.rollback_watchlist_add(symbol);
                self.watchlist_error = Some(e.user_message());
                false
            }
        }
    }

    /// Optimistically removes a symbol with the same reconcile/rollback
    /// contract as adds.
    pub async fn remove_from_watchlist(&mut self, user_id: &str, symbol: &str) -> bool {
        self.watchlist_error = None;
        let Some(entry) = self.ctx.portfolio_store.remove_watchlist_symbol(symbol) else {
            return false;
        };
        match self.ctx.watchlist.remove(user_id, symbol).await {
            Ok(()) => {
                self.reconcile_watchlist(user_id).await;
                true
            }
            Err(e) => {
                self.ctx.portfolio_store.rollback_watchlist_remove(entry);
                self.watchlist_error = Some(e.user_message());
                false
            }
        }
    }

    async fn reconcile_watchlist(&self, user_id: &str) {
        match self.ctx.watchlist.list(user_id).await {
            Ok(symbols) => self.ctx.portfolio_store.confirm_watchlist(symbols),
            Err(e) => {
                // The optimistic entry stays pending; the next successful
                // fetch reconciles it.
                warn!("Watchlist refetch failed: {}", e);
            }
        }
    }

    /// Tears the quote polling down. Also happens implicitly on drop.
    pub fn unmount(&mut self) {
        self.quote_task = None;
    }
}
