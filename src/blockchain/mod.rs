pub mod block;
pub mod hash;
pub mod model;

pub use block::Block;
pub use model::BlockChain;

/// Number of transactions sealed into every mined block.
pub const BLOCK_SIZE: usize = 2;

/// Difficulty bounds accepted by `BlockChain::set_difficulty`.
pub const MIN_DIFFICULTY: u32 = 1;
pub const MAX_DIFFICULTY: u32 = 5;

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 1;

/// Amount credited to a miner for each sealed block.
pub const DEFAULT_MINING_REWARD: f64 = 0.05;

/// Sender of every mining reward transaction.
pub const BANK_ADDRESS: &str = "bank";
