use cosmwasm_std::Addr;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use secret_toolkit_storage::{Item};


#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct Config {
    /// Principal allowed to start periods, top up rewards and change the duration.
    pub owner: Addr,
    pub nft_contract: Addr,
    pub nft_hash: String,
    pub reward_token_contract: Addr,
    pub reward_token_hash: String,
}

pub static CONFIG: Item<Config> = Item::new(b"config");
