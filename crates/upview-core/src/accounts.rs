//! One-shot account loading

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::grouping::GroupedAccounts;
use crate::notify::{NotifierRef, Toast, ACCOUNTS_FAILURE_TITLE};
use serde::Serialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use upview_client::{Account, ApiRef, ApiToken};

/// What the account list currently shows
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountsSnapshot {
    pub loading: bool,
    pub groups: GroupedAccounts,
}

/// `started` and `snapshot.loading` change under the same write guard, so a
/// reader never sees a started load that is not yet loading
#[derive(Debug, Default)]
struct AccountState {
    started: bool,
    snapshot: AccountsSnapshot,
}

/// Fetches the account list once per session and keeps it grouped by type
pub struct AccountLoader {
    api: ApiRef,
    token: ApiToken,
    notifier: NotifierRef,
    state: RwLock<AccountState>,
}

impl AccountLoader {
    pub fn new(api: ApiRef, token: ApiToken, notifier: NotifierRef) -> Self {
        Self {
            api,
            token,
            notifier,
            state: RwLock::new(AccountState::default()),
        }
    }

    /// Fetch and group the accounts.
    ///
    /// Only the first call does any work. On failure a single toast is
    /// emitted and the previous grouping is left untouched.
    pub async fn load(&self) -> CoreResult<()> {
        let first_run = {
            let mut state = self.write_state();
            let first_run = !state.started;
            if first_run {
                state.started = true;
                state.snapshot.loading = true;
            }
            first_run
        };
        if !first_run {
            let err = CoreError::AlreadyLoaded;
            DefaultErrorLogger.log_error(&err, &ErrorContext::new("load_accounts"));
            return Err(err);
        }

        log::info!("fetching up accounts...");

        let result = self.api.list_accounts(&self.token).await;

        let outcome = {
            let mut state = self.write_state();
            state.snapshot.loading = false;
            match result {
                Ok(accounts) => {
                    let groups = GroupedAccounts::from_accounts(accounts);
                    log::info!("fetched {} up accounts", groups.account_count());
                    log::debug!("grouped accounts: {}", groups.summary());
                    state.snapshot.groups = groups;
                    Ok(())
                }
                Err(source) => Err(CoreError::AccountFetchFailure { source }),
            }
        };

        if let Err(ref err) = outcome {
            DefaultErrorLogger.log_error(err, &ErrorContext::new("load_accounts"));
            self.notifier.notify(Toast::failure(ACCOUNTS_FAILURE_TITLE));
        }

        outcome
    }

    pub fn snapshot(&self) -> AccountsSnapshot {
        self.read_state().snapshot.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().snapshot.loading
    }

    /// True once `load` has been called, whether or not it finished
    pub fn has_started(&self) -> bool {
        self.read_state().started
    }

    /// Started and not yet finished, read under one guard
    pub fn is_pending(&self) -> bool {
        let state = self.read_state();
        !state.started || state.snapshot.loading
    }

    pub fn find_account(&self, account_id: &str) -> Option<Account> {
        self.read_state().snapshot.groups.find(account_id).cloned()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, AccountState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, AccountState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationCenter;
    use crate::test_support::{account, FakeApi};
    use std::sync::Arc;

    fn loader(api: Arc<FakeApi>, center: Arc<NotificationCenter>) -> AccountLoader {
        AccountLoader::new(api, ApiToken::new("token"), center)
    }

    #[tokio::test]
    async fn test_load_groups_accounts() {
        let api = Arc::new(FakeApi::with_accounts(vec![
            account("a1", "SAVER", "100.00", "T1"),
            account("a2", "TRANSACTIONAL", "5.00", "T2"),
            account("a3", "SAVER", "1.00", "T3"),
        ]));
        let center = Arc::new(NotificationCenter::new());
        let loader = loader(api.clone(), center.clone());

        assert!(loader.snapshot().groups.is_empty());
        assert!(!loader.has_started());
        loader.load().await.unwrap();
        assert!(loader.has_started());

        let snapshot = loader.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.groups.keys().collect::<Vec<_>>(), vec!["SAVER", "TRANSACTIONAL"]);
        assert_eq!(snapshot.groups.get("SAVER").unwrap().len(), 2);
        assert_eq!(center.pending_count(), 0);
        assert_eq!(api.account_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_state_and_notifies_once() {
        let api = Arc::new(FakeApi::failing_accounts(503));
        let center = Arc::new(NotificationCenter::new());
        let loader = loader(api, center.clone());

        let before = loader.snapshot().groups;
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, CoreError::AccountFetchFailure { .. }));

        let after = loader.snapshot();
        assert_eq!(after.groups, before);
        assert!(!after.loading);

        let toasts = center.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, ACCOUNTS_FAILURE_TITLE);
    }

    #[tokio::test]
    async fn test_started_load_is_always_loading() {
        let api = Arc::new(FakeApi::with_accounts(vec![account("a1", "SAVER", "1.00", "T1")]).gated_accounts());
        let loader = Arc::new(loader(api.clone(), Arc::new(NotificationCenter::new())));
        assert!(loader.is_pending());

        let load = tokio::spawn({
            let loader = loader.clone();
            async move { loader.load().await }
        });
        while !loader.has_started() {
            tokio::task::yield_now().await;
        }
        assert!(loader.is_loading());
        assert!(loader.is_pending());

        api.release();
        load.await.unwrap().unwrap();
        assert!(!loader.is_pending());
        assert_eq!(loader.snapshot().groups.len(), 1);
    }

    #[tokio::test]
    async fn test_runs_once_per_session() {
        let api = Arc::new(FakeApi::with_accounts(vec![account("a1", "SAVER", "1.00", "T1")]));
        let center = Arc::new(NotificationCenter::new());
        let loader = loader(api.clone(), center.clone());

        loader.load().await.unwrap();
        assert!(matches!(loader.load().await, Err(CoreError::AlreadyLoaded)));
        assert_eq!(api.account_calls(), 1);
        assert_eq!(center.pending_count(), 0);
        assert!(loader.find_account("a1").is_some());
    }
}
