//! `[check]` section configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Report pages whose `<div>` open and close counts differ.
    pub div_balance: bool,

    /// Report problems without a failing exit code.
    pub warn_only: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            div_balance: true,
            warn_only: false,
        }
    }
}
