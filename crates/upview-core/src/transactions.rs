//! Transactions for the selected account
//!
//! Every selection bumps a generation counter. A response is applied only if
//! its generation is still current, so a slow reply for an earlier selection
//! can never overwrite a newer one.

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::notify::{NotifierRef, Toast, TRANSACTIONS_FAILURE_TITLE};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use upview_client::{ApiRef, ApiToken, Transaction};

/// What the detail pane currently shows
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionsSnapshot {
    pub loading: bool,
    /// Link of the selected account, if any
    pub selection: Option<String>,
    pub transactions: Vec<Transaction>,
}

/// Result of a `load_transactions` call that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No selection: the list was cleared without a request
    Cleared,
    /// The response was applied
    Loaded(usize),
    /// A newer selection arrived first; the response was dropped
    Superseded,
}

#[derive(Debug, Default)]
struct TransactionState {
    generation: u64,
    snapshot: TransactionsSnapshot,
}

pub struct TransactionLoader {
    api: ApiRef,
    token: ApiToken,
    notifier: NotifierRef,
    state: Mutex<TransactionState>,
}

impl TransactionLoader {
    pub fn new(api: ApiRef, token: ApiToken, notifier: NotifierRef) -> Self {
        Self {
            api,
            token,
            notifier,
            state: Mutex::new(TransactionState::default()),
        }
    }

    /// Load the transactions behind `url`, or clear the list when there is no selection
    pub async fn load_transactions(&self, url: Option<&str>) -> CoreResult<LoadOutcome> {
        let url = match url.filter(|u| !u.is_empty()) {
            Some(url) => url,
            None => {
                let mut state = self.lock_state();
                state.generation += 1;
                state.snapshot = TransactionsSnapshot::default();
                return Ok(LoadOutcome::Cleared);
            }
        };

        let generation = {
            let mut state = self.lock_state();
            state.generation += 1;
            state.snapshot.loading = true;
            state.snapshot.selection = Some(url.to_string());
            state.generation
        };

        log::info!("fetching transactions (generation {})...", generation);
        let result = self.api.list_transactions(url, &self.token).await;

        let outcome = {
            let mut state = self.lock_state();
            if state.generation != generation {
                log::debug!(
                    "discarding transactions for generation {}, current is {}",
                    generation,
                    state.generation
                );
                return Ok(LoadOutcome::Superseded);
            }

            state.snapshot.loading = false;
            match result {
                Ok(transactions) => {
                    let count = transactions.len();
                    state.snapshot.transactions = transactions;
                    log::info!("fetched {} transactions (generation {})", count, generation);
                    Ok(LoadOutcome::Loaded(count))
                }
                Err(source) => Err(CoreError::TransactionFetchFailure { source }),
            }
        };

        if let Err(ref err) = outcome {
            DefaultErrorLogger.log_error(
                err,
                &ErrorContext::new("load_transactions").with_generation(generation),
            );
            self.notifier.notify(Toast::failure(TRANSACTIONS_FAILURE_TITLE));
        }

        outcome
    }

    pub fn snapshot(&self) -> TransactionsSnapshot {
        self.lock_state().snapshot.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().snapshot.loading
    }

    fn lock_state(&self) -> MutexGuard<'_, TransactionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
