// src/execute/mod.rs
pub mod admin;
pub mod rewards;
pub mod staking;


pub use rewards::{pending_rewards, reward_per_token, last_time_reward_applicable, reward_for_full_duration};

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, StdResult, Storage, SubMsg, Uint128,
    from_binary, Binary};
use crate::error::ContractError;
use crate::msg::{ExecuteMsg, ReceiveMsg};
use crate::state::REENTRANCY_LOCK;
use crate::LOCK_RELEASE_REPLY_ID;


/// Every execute message mutates state, so all of them run under the re-entrancy lock.
pub fn execute_dispatch(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg
) -> Result<Response, ContractError> {
    acquire_lock(deps.storage)?;

    match route(deps.branch(), env, info, msg) {
        Ok(response) => hold_lock_until_dispatched(deps.storage, response),
        Err(err) => {
            release_lock(deps.storage)?;
            Err(err)
        }
    }
}

fn route(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg
) -> Result<Response, ContractError> {
    let now = env.block.time.seconds();
    match msg {
        ExecuteMsg::Stake { token_ids } => staking::stake(deps, env, info, token_ids),
        ExecuteMsg::Withdraw { token_ids } => staking::withdraw(deps, env, info, token_ids),
        ExecuteMsg::WithdrawAll {} => staking::withdraw_all(deps, env, info),
        ExecuteMsg::Claim {} => rewards::claim(deps, now, info),
        ExecuteMsg::StartPeriod { amount, duration } =>
            admin::execute_start_period(deps, env, info, amount, duration),
        ExecuteMsg::AddRewardAmount { amount } =>
            admin::execute_add_reward_amount(deps, env, info, amount),
        ExecuteMsg::SetRewardsDuration { duration } =>
            admin::execute_set_rewards_duration(deps, env, info, duration),
        ExecuteMsg::TransferOwnership { new_owner } =>
            admin::execute_transfer_ownership(deps, info, new_owner),
        ExecuteMsg::Receive { sender: _, from, amount, msg, memo: _ } =>
            receive_dispatch(deps, info, from, amount, msg),
    }
}

pub fn receive_dispatch(
    deps: DepsMut,
    info: MessageInfo,
    from: String,
    amount: Uint128,
    msg: Binary,
) -> Result<Response, ContractError> {
    let msg: ReceiveMsg = from_binary(&msg)?;
    let from_addr = deps.api.addr_validate(&from)?;

    match msg {
        ReceiveMsg::FundRewards {} => rewards::fund_rewards(deps, info, from_addr, amount),
    }
}

fn acquire_lock(storage: &mut dyn Storage) -> Result<(), ContractError> {
    if REENTRANCY_LOCK.may_load(storage)?.unwrap_or(false) {
        return Err(ContractError::Reentrant {});
    }
    REENTRANCY_LOCK.save(storage, &true)?;
    Ok(())
}

fn release_lock(storage: &mut dyn Storage) -> StdResult<()> {
    REENTRANCY_LOCK.save(storage, &false)
}

// Transfers run after this call returns; the lock stays set until the last one succeeds.
fn hold_lock_until_dispatched(
    storage: &mut dyn Storage,
    mut response: Response,
) -> Result<Response, ContractError> {
    match response.messages.pop() {
        Some(last) => response
            .messages
            .push(SubMsg::reply_on_success(last.msg, LOCK_RELEASE_REPLY_ID)),
        None => release_lock(storage)?,
    }
    Ok(response)
}

pub fn handle_lock_release_reply(deps: DepsMut) -> StdResult<Response> {
    release_lock(deps.storage)?;
    Ok(Response::new().add_attribute("action", "lock_released"))
}
