use cosmwasm_std::{ConversionOverflowError, DivideByZeroError, OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    DivideByZero(#[from] DivideByZeroError),

    #[error("{0}")]
    ConversionOverflow(#[from] ConversionOverflowError),

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Token {token_id} is not staked by the caller")]
    NotOwner { token_id: String },

    #[error("Token {token_id} is already staked")]
    AlreadyStaked { token_id: String },

    #[error("Previous reward period ends at {period_finish}")]
    PeriodStillActive { period_finish: u64 },

    #[error("No reward period is active")]
    PeriodNotActive {},

    #[error("Reward rate {reward_rate} exceeds what the reward balance {balance} can cover")]
    InsufficientFunds { reward_rate: Uint128, balance: Uint128 },

    #[error("Reentrant call")]
    Reentrant {},

    #[error("Not the reward token")]
    UnacceptableToken {},
}

impl ContractError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        ContractError::InvalidInput { reason: reason.into() }
    }
}
