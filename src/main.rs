use chain_ledger::report::ChainReport;
use chain_ledger::{BlockChain, ChainConfig, Transaction};
use log::{error, info};

fn main() {
    let config = ChainConfig::from_env();
    env_logger::init();

    info!(
        "⛓️ Starting chain difficulty={} reward={}",
        config.difficulty, config.mining_reward
    );
    let mut chain = BlockChain::from_config(&config);

    chain.add_transaction(Transaction::new("bank", "aiden", 100.0));
    chain.add_transaction(Transaction::new("aiden", "frank", 50.0));
    chain.miner_generate_block("miner1");

    chain.add_transaction(Transaction::new("frank", "tom", 50.0));
    chain.add_transaction(Transaction::new("aiden", "emma", 10.0));
    chain.miner_generate_block("miner1");
    chain.miner_generate_block("miner2");

    println!("\n{chain}");

    println!("------- Balances -------");
    for address in ["miner1", "miner2", "aiden"] {
        println!("Balance of {address}: {:.2}", chain.balance_of(address));
    }

    match ChainReport::new(&chain).to_json() {
        Ok(json) => println!("\n{json}"),
        Err(e) => error!("could not render chain report: {e}"),
    }
}
