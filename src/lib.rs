//! Generic bounds-checked containers and a small proof-of-work ledger
//! built on top of them.

pub mod blockchain;
pub mod config;
pub mod containers;
pub mod error;
pub mod report;
pub mod transaction;

pub use blockchain::{Block, BlockChain};
pub use config::ChainConfig;
pub use error::{Error, Result};
pub use transaction::Transaction;
