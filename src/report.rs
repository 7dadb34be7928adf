//! Serializable snapshot of a chain, for printing as JSON.

use serde::Serialize;

use crate::blockchain::{Block, BlockChain};
use crate::transaction::Transaction;

#[derive(Debug, Serialize)]
pub struct BlockReport<'a> {
    pub index: usize,
    pub hash: &'a str,
    pub previous_hash: &'a str,
    pub timestamp: i64,
    pub nonce: u64,
    pub transactions: Vec<&'a Transaction>,
}

#[derive(Debug, Serialize)]
pub struct ChainReport<'a> {
    pub length: usize,
    pub difficulty: u32,
    pub mining_reward: f64,
    pub valid: bool,
    pub pending: Vec<&'a Transaction>,
    pub chain: Vec<BlockReport<'a>>,
}

impl<'a> BlockReport<'a> {
    fn new(index: usize, block: &'a Block) -> Self {
        Self {
            index,
            hash: &block.hash,
            previous_hash: &block.previous_hash,
            timestamp: block.timestamp,
            nonce: block.nonce,
            transactions: block.transactions.iter().collect(),
        }
    }
}

impl<'a> ChainReport<'a> {
    pub fn new(bc: &'a BlockChain) -> Self {
        Self {
            length: bc.len(),
            difficulty: bc.difficulty(),
            mining_reward: bc.mining_reward(),
            valid: bc.is_chain_valid(),
            pending: bc.pending().iter().collect(),
            chain: bc
                .blocks()
                .enumerate()
                .map(|(i, b)| BlockReport::new(i, b))
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
