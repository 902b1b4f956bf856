//! Stateless view models for the account list and the detail pane

use crate::grouping::GroupedAccounts;
use crate::locale::Locale;
use crate::transactions::TransactionsSnapshot;
use serde::Serialize;
use upview_client::{Amount, Transaction};

/// Shown in the detail pane when an account has no transactions
pub const EMPTY_TRANSACTIONS_MESSAGE: &str = "No transactions";

/// One section of the account list, titled by account type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSection {
    pub title: String,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    /// Account id
    pub key: String,
    /// Transactions link; this is what a selection change forwards
    pub id: Option<String>,
    pub title: String,
    /// Formatted balance
    pub accessory: String,
}

/// Detail pane contents for the current selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPane {
    pub loading: bool,
    /// Explanatory text replacing the metadata list when there is nothing to show
    pub markdown: Option<String>,
    pub entries: Vec<DetailEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailEntry {
    pub key: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Presenter {
    locale: Locale,
}

impl Presenter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn format_amount(&self, amount: &Amount) -> String {
        self.locale.format_amount(amount)
    }

    /// Empty-state message, only when nothing is loaded and nothing is loading
    pub fn describe_empty_state(transactions: &[Transaction], loading: bool) -> Option<&'static str> {
        if transactions.is_empty() && !loading {
            Some(EMPTY_TRANSACTIONS_MESSAGE)
        } else {
            None
        }
    }

    pub fn sections(&self, groups: &GroupedAccounts) -> Vec<ListSection> {
        groups
            .iter()
            .map(|(account_type, accounts)| ListSection {
                title: account_type.to_string(),
                items: accounts
                    .iter()
                    .map(|account| ListItem {
                        key: account.id.clone(),
                        id: account.transactions_link().map(str::to_string),
                        title: account.display_name().to_string(),
                        accessory: self.format_amount(account.balance()),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn detail(&self, snapshot: &TransactionsSnapshot) -> DetailPane {
        DetailPane {
            loading: snapshot.loading,
            markdown: Self::describe_empty_state(&snapshot.transactions, snapshot.loading).map(str::to_string),
            entries: snapshot
                .transactions
                .iter()
                .map(|tx| DetailEntry {
                    key: tx.id.clone(),
                    title: tx.description().to_string(),
                    text: self.format_amount(tx.amount()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{account, transaction};

    fn presenter() -> Presenter {
        Presenter::new(Locale::parse("en-AU"))
    }

    #[test]
    fn test_format_amount_aud() {
        let formatted = presenter().format_amount(&Amount::from_value("AUD", "12.50"));
        assert!(formatted.contains("12.50"));
        assert_eq!(formatted, "$12.50");
    }

    #[test]
    fn test_describe_empty_state() {
        let txs = vec![transaction("t1", "Coffee", "-4.50")];
        assert_eq!(Presenter::describe_empty_state(&[], false), Some(EMPTY_TRANSACTIONS_MESSAGE));
        assert_eq!(Presenter::describe_empty_state(&[], true), None);
        assert_eq!(Presenter::describe_empty_state(&txs, false), None);
        assert_eq!(Presenter::describe_empty_state(&txs, true), None);
    }

    #[test]
    fn test_sections_follow_grouping() {
        let groups = GroupedAccounts::from_accounts(vec![
            account("a1", "SAVER", "100.00", "T1"),
            account("a2", "TRANSACTIONAL", "-3.20", "T2"),
        ]);
        let sections = presenter().sections(&groups);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "SAVER");
        assert_eq!(
            sections[0].items[0],
            ListItem {
                key: "a1".to_string(),
                id: Some("T1".to_string()),
                title: "Account a1".to_string(),
                accessory: "$100.00".to_string(),
            }
        );
        assert_eq!(sections[1].items[0].accessory, "-$3.20");
    }

    #[test]
    fn test_detail_loading_hides_empty_message() {
        let snapshot = TransactionsSnapshot {
            loading: true,
            selection: Some("T1".to_string()),
            transactions: vec![],
        };
        let pane = presenter().detail(&snapshot);
        assert!(pane.loading);
        assert!(pane.markdown.is_none());
        assert!(pane.entries.is_empty());
    }
}
