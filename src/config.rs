use std::env;

use crate::blockchain::{DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD};

/// Environment variable holding the Proof-of-Work difficulty.
pub const DIFFICULTY_VAR: &str = "CHAIN_DIFFICULTY";
/// Environment variable holding the per-block mining reward.
pub const REWARD_VAR: &str = "CHAIN_MINING_REWARD";

/// Ledger settings read at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub difficulty: u32,
    pub mining_reward: f64,
}

impl ChainConfig {
    /// Read settings from the process environment, after loading an
    /// optional `.env` file. Missing or unparsable values use defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let difficulty = lookup(DIFFICULTY_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_DIFFICULTY);
        let mining_reward = lookup(REWARD_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MINING_REWARD);
        Self {
            difficulty,
            mining_reward,
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            mining_reward: DEFAULT_MINING_REWARD,
        }
    }
}
