use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::RawError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// In-memory account storage keyed by id, with a unique email index
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: DashMap<Uuid, Account>,
    emails: DashMap<String, Uuid>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, name: &str, email: &str) -> Result<Account, RawError> {
        let email = email.to_lowercase();

        // Holding the vacant entry keeps the email reserved until the insert
        let slot = match self.emails.entry(email.clone()) {
            Entry::Occupied(_) => {
                return Err(RawError::app(
                    format!("Duplicate field value: {email}. Please use another value"),
                    409,
                ));
            }
            Entry::Vacant(slot) => slot,
        };

        let account = Account {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email,
            created_at: Utc::now(),
        };
        slot.insert(account.id);
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    pub fn get(&self, id: &Uuid) -> Option<Account> {
        self.accounts.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
