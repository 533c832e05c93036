//! Configuration for the supervisor validation module

use serde::{Deserialize, Serialize};

/// Supervisor validation configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum number of validations returned by one list call
    #[serde(default = "default_list_limit")]
    pub list_limit: u64,

    /// Create the validation items when an inspection is submitted instead of
    /// on first open
    #[serde(default = "default_true")]
    pub materialize_on_submit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
            materialize_on_submit: true,
        }
    }
}

fn default_list_limit() -> u64 {
    500
}

fn default_true() -> bool {
    true
}
