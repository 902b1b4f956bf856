//! Accounts bucketed by account type

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::hash::Hash;
use upview_client::Account;

/// Stable group-by.
///
/// Keys appear in first-seen order and every group keeps the arrival order
/// of its items. Nothing is sorted.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for item in items {
        let k = key(&item);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}

/// Mapping from `accountType` to the accounts of that type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedAccounts {
    groups: Vec<(String, Vec<Account>)>,
}

impl GroupedAccounts {
    /// Recompute the grouping from a flat account list
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            groups: group_by(accounts, |a| a.account_type().to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn account_count(&self) -> usize {
        self.groups.iter().map(|(_, accounts)| accounts.len()).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, account_type: &str) -> Option<&[Account]> {
        self.groups
            .iter()
            .find(|(k, _)| k == account_type)
            .map(|(_, accounts)| accounts.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Account])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Look an account up by id
    pub fn find(&self, account_id: &str) -> Option<&Account> {
        self.groups
            .iter()
            .flat_map(|(_, accounts)| accounts.iter())
            .find(|a| a.id == account_id)
    }

    /// One-line description for logs, e.g. `SAVER: 2, TRANSACTIONAL: 1`
    pub fn summary(&self) -> String {
        self.groups
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v.len()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Serialize for GroupedAccounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (account_type, accounts) in &self.groups {
            map.serialize_entry(account_type, accounts)?;
        }
        map.end()
    }
}
