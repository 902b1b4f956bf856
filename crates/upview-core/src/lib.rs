//! Core of the Up account view
//!
//! - `AccountLoader` fetches the account list once and groups it by type
//! - `TransactionLoader` fetches the selected account's transactions
//! - `Presenter` turns both into list and detail view models
//!
//! `UpView` wires the three together the way the page server uses them.

pub mod accounts;
pub mod error;
pub mod grouping;
pub mod locale;
pub mod notify;
pub mod presenter;
pub mod transactions;

pub use accounts::{AccountLoader, AccountsSnapshot};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use grouping::{group_by, GroupedAccounts};
pub use locale::Locale;
pub use notify::{
    NotificationCenter, Notifier, NotifierRef, Toast, ToastStyle, ACCOUNTS_FAILURE_TITLE,
    TRANSACTIONS_FAILURE_TITLE,
};
pub use presenter::{DetailEntry, DetailPane, ListItem, ListSection, Presenter, EMPTY_TRANSACTIONS_MESSAGE};
pub use transactions::{LoadOutcome, TransactionLoader, TransactionsSnapshot};

use upview_client::{ApiRef, ApiToken};

/// Account list with a detail pane for the selected account
pub struct UpView {
    accounts: AccountLoader,
    transactions: TransactionLoader,
    presenter: Presenter,
}

impl UpView {
    /// Both loaders receive the credential explicitly
    pub fn new(api: ApiRef, token: ApiToken, notifier: NotifierRef, locale: Locale) -> Self {
        Self {
            accounts: AccountLoader::new(api.clone(), token.clone(), notifier.clone()),
            transactions: TransactionLoader::new(api, token, notifier),
            presenter: Presenter::new(locale),
        }
    }

    /// Initial account load
    pub async fn start(&self) -> CoreResult<()> {
        self.accounts.load().await
    }

    /// Selection-change callback; the item id is forwarded verbatim
    pub async fn on_selection_change(&self, url: Option<&str>) -> CoreResult<LoadOutcome> {
        self.transactions.load_transactions(url).await
    }

    /// Select by account id. Unknown ids and accounts without a
    /// transactions link behave as a deselection.
    pub async fn select_account(&self, account_id: Option<&str>) -> CoreResult<LoadOutcome> {
        let link = account_id
            .and_then(|id| self.accounts.find_account(id))
            .and_then(|account| account.transactions_link().map(str::to_string));
        self.on_selection_change(link.as_deref()).await
    }

    pub fn accounts(&self) -> &AccountLoader {
        &self.accounts
    }

    pub fn transactions(&self) -> &TransactionLoader {
        &self.transactions
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn sections(&self) -> Vec<ListSection> {
        self.presenter.sections(&self.accounts.snapshot().groups)
    }

    pub fn detail(&self) -> DetailPane {
        self.presenter.detail(&self.transactions.snapshot())
    }
}
