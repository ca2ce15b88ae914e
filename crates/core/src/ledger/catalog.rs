//! Read-only chart of accounts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::Account;

/// Chart-of-accounts lookup keyed by account number.
///
/// Iteration is ordered by account number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountCatalog {
    accounts: BTreeMap<String, Account>,
}

impl AccountCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an account by number.
    #[must_use]
    pub fn get(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    /// Returns true if the account exists.
    #[must_use]
    pub fn contains(&self, number: &str) -> bool {
        self.accounts.contains_key(number)
    }

    /// Returns the catalog label of an account, or the number itself when unknown.
    #[must_use]
    pub fn label_for<'a>(&'a self, number: &'a str) -> &'a str {
        self.accounts
            .get(number)
            .map_or(number, |account| account.label.as_str())
    }

    /// Iterates over the accounts in number order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the catalog holds no account.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl FromIterator<Account> for AccountCatalog {
    /// Later duplicates of an account number replace earlier ones.
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        Self {
            accounts: iter
                .into_iter()
                .map(|account| (account.number.clone(), account))
                .collect(),
        }
    }
}
