use cosmwasm_std::{Addr, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use secret_toolkit_storage::{Item, Keymap};


/// Global accrual state of the staking pool.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema, Default)]
pub struct PoolState {
    /// Number of tokens currently staked across all accounts.
    pub total_staked: u64,
    /// Reward units released per second.
    pub reward_rate: Uint128,
    /// Length in seconds of the most recently configured period.
    pub rewards_duration: u64,
    pub period_finish: u64,
    /// Instant through which `reward_per_token_stored` is valid.
    pub last_update_time: u64,
    /// Cumulative reward per staked token, scaled by `REWARD_PRECISION`.
    pub reward_per_token_stored: Uint128,
    /// Reward tokens held by the contract and not yet paid out.
    pub reward_balance: Uint128,
    /// Rewards accrued to stakers and not yet claimed, rounded up per checkpoint.
    pub rewards_unpaid: Uint128,
    pub total_claimed: Uint128,
}

pub static POOL_STATE: Item<PoolState> = Item::new(b"pool_state");


#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema, Default)]
pub struct StakerInfo {
    pub reward_per_token_paid: Uint128,
    pub rewards_owed: Uint128,
    /// Dense list of staked token ids; order is not meaningful.
    pub staked_token_ids: Vec<String>,
}

impl StakerInfo {
    pub fn staked_count(&self) -> u64 {
        self.staked_token_ids.len() as u64
    }
}

pub static STAKER_INFO: Keymap<Addr, StakerInfo> = Keymap::new(b"staker_info");


/// Registry entry for a staked token. Tokens that are not staked have no entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct StakedToken {
    pub owner: Addr,
    /// Position of the token inside the owner's `staked_token_ids`.
    pub slot: u32,
}

pub static STAKED_TOKENS: Keymap<String, StakedToken> = Keymap::new(b"staked_tokens");
