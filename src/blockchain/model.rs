use std::fmt;

use log::{debug, info, warn};

use super::{
    BANK_ADDRESS, BLOCK_SIZE, Block, DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD, MAX_DIFFICULTY,
    MIN_DIFFICULTY,
};
use crate::config::ChainConfig;
use crate::containers::{LinkedSequence, SequenceList};
use crate::transaction::Transaction;

/// Simple in-memory blockchain with Proof-of-Work.
///
/// Holds the sealed blocks (genesis first) and a FIFO pool of pending
/// transactions. Not meant to be shared across threads without a lock.
#[derive(Debug, Clone)]
pub struct BlockChain {
    chain: LinkedSequence<Block>,
    pending: SequenceList<Transaction>,
    difficulty: u32,
    mining_reward: f64,
}

impl BlockChain {
    /// Initialize a new blockchain with a genesis block.
    ///
    /// A `difficulty` outside `MIN_DIFFICULTY..=MAX_DIFFICULTY` falls back to
    /// `DEFAULT_DIFFICULTY`.
    pub fn new(difficulty: u32, mining_reward: f64) -> Self {
        let mut bc = Self {
            chain: LinkedSequence::new(),
            pending: SequenceList::new(),
            difficulty: DEFAULT_DIFFICULTY,
            mining_reward,
        };
        bc.set_difficulty(difficulty);
        bc.create_genesis_block();
        bc
    }

    pub fn from_config(config: &ChainConfig) -> Self {
        Self::new(config.difficulty, config.mining_reward)
    }

    fn create_genesis_block(&mut self) {
        let genesis = Block::genesis();
        debug!("genesis block hash={}", genesis.hash);
        self.chain.add(genesis);
    }

    /// Return the last block in the chain.
    pub fn latest_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Blockchain should always have at least the genesis block")
    }

    /// Queue a transaction for a future block. No validation is applied.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.pending.add(transaction);
    }

    /// Seal the oldest `BLOCK_SIZE` pending transactions into a mined block
    /// and pay `miner` the mining reward (as a new pending transaction).
    ///
    /// Returns `false` without touching anything when too few transactions
    /// are pending.
    pub fn miner_generate_block(&mut self, miner: &str) -> bool {
        let batch = match self.pending.split_front(BLOCK_SIZE) {
            Ok(batch) => batch,
            Err(_) => {
                debug!(
                    "{miner}: {} pending, need {BLOCK_SIZE} to mine",
                    self.pending.len()
                );
                return false;
            }
        };

        let mut block = Block::new(batch, self.latest_block().hash.clone());
        block.mine(self.difficulty);

        info!(
            "{miner} mined block#{} hash={} nonce={} diff={}",
            self.chain.len(),
            block.hash,
            block.nonce,
            self.difficulty
        );
        self.chain.add(block);

        self.pending
            .add(Transaction::new(BANK_ADDRESS, miner, self.mining_reward));
        true
    }

    /// Validate the chain: every non-genesis block's hash must match its
    /// content and its `previous_hash` must match its predecessor's hash.
    pub fn is_chain_valid(&self) -> bool {
        let pairs = self.chain.iter().zip(self.chain.iter().skip(1));
        for (i, (prev, current)) in pairs.enumerate() {
            if current.hash != current.compute_hash() {
                warn!("block#{} hash does not match its content", i + 1);
                return false;
            }
            if current.previous_hash != prev.hash {
                warn!("block#{} is not linked to block#{i}", i + 1);
                return false;
            }
        }
        true
    }

    /// Sum received minus sent for `address` across sealed blocks.
    /// Pending transactions are not counted.
    pub fn balance_of(&self, address: &str) -> f64 {
        let mut balance = 0.0;
        for tx in self.chain.iter().flat_map(|b| b.transactions.iter()) {
            if tx.from_address() == address {
                balance -= tx.amount();
            }
            if tx.to_address() == address {
                balance += tx.amount();
            }
        }
        balance
    }

    /// Set the difficulty for future blocks.
    ///
    /// Values outside `MIN_DIFFICULTY..=MAX_DIFFICULTY` are ignored; the
    /// return value says whether the change was applied.
    pub fn set_difficulty(&mut self, difficulty: u32) -> bool {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            warn!(
                "ignoring difficulty {difficulty}, keeping {} (allowed {MIN_DIFFICULTY}..={MAX_DIFFICULTY})",
                self.difficulty
            );
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    /// Set the reward paid for blocks mined from now on.
    pub fn set_reward(&mut self, reward: f64) {
        self.mining_reward = reward;
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn mining_reward(&self) -> f64 {
        self.mining_reward
    }

    pub fn pending(&self) -> &SequenceList<Transaction> {
        &self.pending
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.chain.iter()
    }
}

impl Default for BlockChain {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD)
    }
}

impl fmt::Display for BlockChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_chain_valid() {
            writeln!(f, "--------------------Block Chain-----------------")?;
        } else {
            writeln!(f, "------------***INVALID*** Block Chain-----------")?;
        }
        for (i, block) in self.chain.iter().enumerate().skip(1) {
            writeln!(f, "Block {i}: {block}")?;
        }
        writeln!(f)?;
        writeln!(f, "Pending: {}", self.pending)?;
        writeln!(f, "------------------- End ------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::BlockChain;
    use crate::blockchain::{BANK_ADDRESS, BLOCK_SIZE, Block, DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
    use crate::config::ChainConfig;
    use crate::transaction::Transaction;

    fn chain_with_two_blocks() -> BlockChain {
        let mut bc = BlockChain::new(1, 0.05);
        bc.add_transaction(Transaction::new("bank", "aiden", 100.0));
        bc.add_transaction(Transaction::new("aiden", "frank", 50.0));
        assert!(bc.miner_generate_block("miner1"));
        bc.add_transaction(Transaction::new("frank", "tom", 50.0));
        assert!(bc.miner_generate_block("miner1"));
        bc
    }

    #[test]
    fn new_chain_holds_only_genesis() {
        let bc = BlockChain::default();
        assert_eq!(bc.len(), 1);
        assert!(bc.is_chain_valid());
        assert!(bc.pending().is_empty());
        assert_eq!(bc.difficulty(), DEFAULT_DIFFICULTY);
        assert!(bc.latest_block().previous_hash.is_empty());
    }

    #[test]
    fn mining_needs_a_full_batch() {
        let mut bc = BlockChain::new(1, 0.05);
        bc.add_transaction(Transaction::new("a", "b", 1.0));
        assert!(!bc.miner_generate_block("m1"));
        assert_eq!(bc.len(), 1);
        assert_eq!(bc.pending().len(), 1);
        assert_eq!(bc.pending().get(0), Ok(&Transaction::new("a", "b", 1.0)));
    }

    #[test]
    fn mined_block_links_and_pays_reward() {
        let mut bc = BlockChain::new(2, 7.5);
        let genesis_hash = bc.latest_block().hash.clone();
        bc.add_transaction(Transaction::new("a", "b", 1.0));
        bc.add_transaction(Transaction::new("b", "c", 2.0));
        bc.add_transaction(Transaction::new("c", "d", 3.0));

        assert!(bc.miner_generate_block("m1"));

        let block = bc.latest_block();
        assert_eq!(block.previous_hash, genesis_hash);
        assert!(block.is_valid(2));
        assert_eq!(block.transactions.len(), BLOCK_SIZE);
        assert_eq!(
            block.transactions.get(0).unwrap(),
            &Transaction::new("a", "b", 1.0)
        );
        assert_eq!(
            block.transactions.get(1).unwrap(),
            &Transaction::new("b", "c", 2.0)
        );

        // FIFO: the leftover stays first, the reward goes to the back
        assert_eq!(bc.pending().len(), 2);
        assert_eq!(bc.pending().get(0).unwrap(), &Transaction::new("c", "d", 3.0));
        assert_eq!(
            bc.pending().get(1).unwrap(),
            &Transaction::new(BANK_ADDRESS, "m1", 7.5)
        );
    }

    #[test]
    fn valid_chain_detects_tampered_amount() {
        let mut bc = chain_with_two_blocks();
        assert_eq!(bc.len(), 3);
        assert!(bc.is_chain_valid());

        bc.chain
            .get_mut(1)
            .unwrap()
            .transactions
            .set(0, Transaction::new("bank", "aiden", 1_000_000.0))
            .unwrap();
        assert!(!bc.is_chain_valid());
    }

    #[test]
    fn valid_chain_detects_tampered_fields() {
        let tamper: [fn(&mut Block); 3] = [
            |b: &mut Block| b.timestamp += 1,
            |b: &mut Block| b.nonce += 1,
            |b: &mut Block| b.previous_hash = "f".repeat(64),
        ];
        for mutate in tamper {
            let mut bc = chain_with_two_blocks();
            mutate(bc.chain.get_mut(2).unwrap());
            assert!(!bc.is_chain_valid());
        }
    }

    #[test]
    fn rehashing_a_tampered_block_breaks_linkage() {
        let mut bc = chain_with_two_blocks();
        let block = bc.chain.get_mut(1).unwrap();
        block.transactions
            .set(1, Transaction::new("aiden", "frank", 0.0))
            .unwrap();
        block.hash = block.compute_hash();
        assert!(!bc.is_chain_valid());
    }

    #[test]
    fn genesis_is_excluded_from_validation() {
        let mut bc = chain_with_two_blocks();
        bc.chain.get_mut(0).unwrap().nonce = 42;
        // The genesis hash itself is not rechecked, only block#1's link to it.
        assert!(bc.is_chain_valid());
    }

    #[test]
    fn difficulty_outside_bounds_is_ignored() {
        let mut bc = BlockChain::default();
        assert!(bc.set_difficulty(3));
        assert_eq!(bc.difficulty(), 3);
        assert!(!bc.set_difficulty(0));
        assert!(!bc.set_difficulty(MAX_DIFFICULTY + 1));
        assert_eq!(bc.difficulty(), 3);
        assert!(bc.set_difficulty(MAX_DIFFICULTY));
    }

    #[test]
    fn constructor_clamps_bad_difficulty_to_default() {
        let bc = BlockChain::new(9, 1.0);
        assert_eq!(bc.difficulty(), DEFAULT_DIFFICULTY);
    }

    #[test]
    fn reward_applies_to_future_blocks() {
        let mut bc = BlockChain::default();
        bc.set_reward(12.0);
        bc.add_transaction(Transaction::new("a", "b", 1.0));
        bc.add_transaction(Transaction::new("b", "a", 1.0));
        assert!(bc.miner_generate_block("m"));
        assert_eq!(bc.mining_reward(), 12.0);
        assert_eq!(bc.pending().get(0).unwrap().amount(), 12.0);
    }

    #[test]
    fn balances_only_count_sealed_blocks() {
        let bc = chain_with_two_blocks();
        // block#1: bank->aiden 100, aiden->frank 50
        // block#2: bank->miner1 0.05 (first reward), frank->tom 50
        // pending: bank->miner1 0.05 (second reward, not counted)
        assert_eq!(bc.balance_of("aiden"), 50.0);
        assert_eq!(bc.balance_of("frank"), 0.0);
        assert_eq!(bc.balance_of("tom"), 50.0);
        assert_eq!(bc.balance_of("miner1"), 0.05);
        assert_eq!(bc.balance_of("nobody"), 0.0);
    }

    #[test]
    fn from_config_uses_its_values() {
        let bc = BlockChain::from_config(&ChainConfig {
            difficulty: 2,
            mining_reward: 3.0,
        });
        assert_eq!(bc.difficulty(), 2);
        assert_eq!(bc.mining_reward(), 3.0);
    }

    #[test]
    fn display_lists_blocks_and_pending() {
        let bc = chain_with_two_blocks();
        let text = bc.to_string();
        assert!(text.starts_with("--------------------Block Chain"));
        assert!(text.contains("Block 1: [ (bank->aiden : 100.00) (aiden->frank : 50.00) ]"));
        assert!(text.contains("Block 2: [ (bank->miner1 : 0.05) (frank->tom : 50.00) ]"));
        assert!(text.contains("Pending: [ (bank->miner1 : 0.05) ]"));
        assert!(!text.contains("Block 0"));
    }

    #[test]
    fn display_flags_invalid_chain() {
        let mut bc = chain_with_two_blocks();
        bc.chain.get_mut(1).unwrap().nonce += 1;
        assert!(bc.to_string().contains("***INVALID***"));
    }
}
