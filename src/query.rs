// src/query.rs
use cosmwasm_std::{Deps, Env, Binary, StdError, StdResult, to_binary, Uint128};
use crate::error::ContractError;
use crate::msg::{QueryMsg, StakeInfoResponse, TokenOwnerResponse};
use crate::state::{CONFIG, Config, POOL_STATE, PoolState, STAKER_INFO, STAKED_TOKENS};
use crate::execute::{last_time_reward_applicable, pending_rewards, reward_for_full_duration,
    reward_per_token};


pub fn query_dispatch(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    let now = env.block.time.seconds();
    match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::PoolState {} => to_binary(&query_pool_state(deps)?),
        QueryMsg::RewardPerToken {} => to_binary(&query_reward_per_token(deps, now)?),
        QueryMsg::LastTimeRewardApplicable {} => {
            let pool = POOL_STATE.load(deps.storage)?;
            to_binary(&last_time_reward_applicable(&pool, now))
        },
        QueryMsg::PendingRewards { account } => to_binary(&query_stake_info(deps, now, account)?.pending_rewards),
        QueryMsg::StakeInfo { account } => to_binary(&query_stake_info(deps, now, account)?),
        QueryMsg::TokenOwner { token_id } => to_binary(&query_token_owner(deps, token_id)?),
        QueryMsg::RewardRatePerUnit {} => to_binary(&query_reward_rate_per_unit(deps)?),
        QueryMsg::RewardForFullDuration {} => to_binary(&query_reward_for_full_duration(deps)?),
    }
}

fn into_std(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        other => StdError::generic_err(other.to_string()),
    }
}

fn query_config(deps: Deps) -> StdResult<Config> {
    let config = CONFIG.load(deps.storage)?;
    Ok(config)
}

fn query_pool_state(deps: Deps) -> StdResult<PoolState> {
    let pool = POOL_STATE.load(deps.storage)?;
    Ok(pool)
}

fn query_reward_per_token(deps: Deps, now: u64) -> StdResult<Uint128> {
    let pool = POOL_STATE.load(deps.storage)?;
    reward_per_token(&pool, now).map_err(into_std)
}

fn query_stake_info(
    deps: Deps,
    now: u64,
    account: String,
) -> StdResult<StakeInfoResponse> {
    let account = deps.api.addr_validate(&account)?;
    let pool = POOL_STATE.load(deps.storage)?;
    // Accounts that never staked read as empty
    let staker = STAKER_INFO.get(deps.storage, &account).unwrap_or_default();

    let pending = pending_rewards(&pool, &staker, now).map_err(into_std)?;

    Ok(StakeInfoResponse {
        staked_token_ids: staker.staked_token_ids,
        pending_rewards: pending,
    })
}

fn query_token_owner(deps: Deps, token_id: String) -> StdResult<TokenOwnerResponse> {
    let owner = STAKED_TOKENS.get(deps.storage, &token_id).map(|entry| entry.owner);
    Ok(TokenOwnerResponse { owner })
}

fn query_reward_rate_per_unit(deps: Deps) -> StdResult<Uint128> {
    let pool = POOL_STATE.load(deps.storage)?;
    if pool.total_staked == 0 {
        return Err(StdError::generic_err("No tokens staked"));
    }
    Ok(pool.reward_rate / Uint128::from(pool.total_staked))
}

fn query_reward_for_full_duration(deps: Deps) -> StdResult<Uint128> {
    let pool = POOL_STATE.load(deps.storage)?;
    reward_for_full_duration(&pool).map_err(into_std)
}
