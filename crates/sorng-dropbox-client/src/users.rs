//! Users resource: account info and space usage.

use crate::client::DropboxClient;
use crate::config::Config;
use crate::error::Result;
use crate::types::{BasicAccount, FullAccount, GetAccountInput, SpaceUsage};

#[derive(Debug, Clone)]
pub struct Users {
    client: DropboxClient,
}

impl From<DropboxClient> for Users {
    fn from(client: DropboxClient) -> Self {
        Self { client }
    }
}

impl Users {
    pub fn new(config: Config) -> Self {
        DropboxClient::new(config).into()
    }

    /// Public information about another account.
    pub fn get_account(&self, account_id: &str) -> Result<BasicAccount> {
        self.client.rpc(
            "/users/get_account",
            &GetAccountInput {
                account_id: account_id.to_string(),
            },
        )
    }

    pub fn get_current_account(&self) -> Result<FullAccount> {
        self.client.rpc_no_arg("/users/get_current_account")
    }

    pub fn get_space_usage(&self) -> Result<SpaceUsage> {
        self.client.rpc_no_arg("/users/get_space_usage")
    }
}

impl SpaceUsage {
    /// Percentage of the allocation in use, if the allocation is known.
    pub fn percent_used(&self) -> Option<f64> {
        match self.allocation.allocated {
            Some(allocated) if allocated > 0 => {
                Some(self.used as f64 / allocated as f64 * 100.0)
            }
            _ => None,
        }
    }
}
