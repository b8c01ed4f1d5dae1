use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Binary, Uint128, Addr,};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct InstantiateMsg {
    /// Defaults to the instantiating address.
    pub owner: Option<String>,
    pub nft_contract: String,
    pub nft_hash: String,
    pub reward_token_contract: String,
    pub reward_token_hash: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    Stake {
        token_ids: Vec<String>,
    },
    Withdraw {
        token_ids: Vec<String>,
    },
    WithdrawAll {},
    Claim {},
    StartPeriod {
        amount: Uint128,
        duration: u64,
    },
    AddRewardAmount {
        amount: Uint128,
    },
    SetRewardsDuration {
        duration: u64,
    },
    TransferOwnership {
        new_owner: String,
    },
    Receive {
        sender: String,
        from: String,
        amount: Uint128,
        memo: Option<String>,
        msg: Binary,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReceiveMsg {
    FundRewards {},
}

/// Subset of the SNIP-721 handle interface used to move staked tokens.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Snip721HandleMsg {
    TransferNft {
        recipient: String,
        token_id: String,
        memo: Option<String>,
        padding: Option<String>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MigrateMsg {
    Migrate {
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
    PoolState {},
    RewardPerToken {},
    LastTimeRewardApplicable {},
    PendingRewards {
        account: String,
    },
    StakeInfo {
        account: String,
    },
    TokenOwner {
        token_id: String,
    },
    RewardRatePerUnit {},
    RewardForFullDuration {},
}


#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct StakeInfoResponse {
    pub staked_token_ids: Vec<String>,
    pub pending_rewards: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct TokenOwnerResponse {
    /// `None` when the token is not staked.
    pub owner: Option<Addr>,
}
