use std::fmt;

use chrono::Utc;
use log::{debug, warn};

use super::BLOCK_SIZE;
use super::hash::sha256_hex;
use crate::containers::SequenceList;
use crate::transaction::Transaction;

/// A batch of transactions sealed by proof-of-work.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub transactions: SequenceList<Transaction>,
    pub previous_hash: String,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub nonce: u64,     // Proof-of-Work nonce
    pub hash: String,   // Cached hash of the block
}

impl Block {
    /// Create the genesis block: no transactions, no predecessor, never mined.
    pub fn genesis() -> Self {
        Self::new(SequenceList::with_capacity(BLOCK_SIZE), String::new())
    }

    /// Create a new block (not mined yet). Call `mine()` to perform PoW.
    pub fn new(transactions: SequenceList<Transaction>, previous_hash: impl Into<String>) -> Self {
        Self::with_timestamp(transactions, previous_hash, Utc::now().timestamp())
    }

    pub fn with_timestamp(
        transactions: SequenceList<Transaction>,
        previous_hash: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        let mut block = Self {
            transactions,
            previous_hash: previous_hash.into(),
            timestamp,
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Preimage of the block digest: encoded batch, previous hash,
    /// timestamp and nonce, in that order.
    pub fn hash_input(&self) -> String {
        let batch: String = self
            .transactions
            .iter()
            .map(Transaction::canonical_encoding)
            .collect();
        format!(
            "[{}]:{}:{}:{}",
            batch, self.previous_hash, self.timestamp, self.nonce
        )
    }

    /// Compute the SHA-256 hash of this block from its fields
    /// (excluding the `hash` field itself).
    pub fn compute_hash(&self) -> String {
        sha256_hex(self.hash_input().as_bytes())
    }

    /// Perform Proof-of-Work by finding a nonce that yields a hash
    /// starting with `difficulty` leading zeros (in hex).
    ///
    /// Blocks the caller until a solution is found.
    pub fn mine(&mut self, difficulty: u32) {
        let target_prefix = "0".repeat(difficulty as usize);
        while !self.hash.starts_with(&target_prefix) {
            self.advance_nonce();
            self.hash = self.compute_hash();
        }
        debug!("sealed block nonce={} hash={}", self.nonce, self.hash);
    }

    /// Like [`Block::mine`] but gives up after `max_attempts` nonces.
    /// Returns whether the block is sealed.
    pub fn try_mine(&mut self, difficulty: u32, max_attempts: u64) -> bool {
        let target_prefix = "0".repeat(difficulty as usize);
        let mut attempts = 0;
        while !self.hash.starts_with(&target_prefix) {
            if attempts == max_attempts {
                debug!("gave up mining after {attempts} attempts");
                return false;
            }
            self.advance_nonce();
            self.hash = self.compute_hash();
            attempts += 1;
        }
        true
    }

    /// Does the cached hash start with `difficulty` zero characters?
    pub fn meets_difficulty(&self, difficulty: u32) -> bool {
        self.hash.starts_with(&"0".repeat(difficulty as usize))
    }

    /// Validate that the block's cached `hash` matches its content and
    /// satisfies the PoW difficulty. (Does NOT validate chain linkage.)
    pub fn is_valid(&self, difficulty: u32) -> bool {
        self.hash == self.compute_hash() && self.meets_difficulty(difficulty)
    }

    /// Step to the next nonce. When the counter would overflow the block is
    /// re-stamped and the search restarts at zero over the new preimage.
    fn advance_nonce(&mut self) {
        match self.nonce.checked_add(1) {
            Some(next) => self.nonce = next,
            None => {
                warn!("nonce space exhausted, re-stamping block");
                self.timestamp = Utc::now().timestamp();
                self.nonce = 0;
            }
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.transactions)
    }
}
