use cosmwasm_std::{Addr, DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::rewards;
use crate::state::{Config, CONFIG, POOL_STATE};


fn ensure_owner(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

pub fn execute_start_period(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    duration: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info.sender)?;

    let mut pool = POOL_STATE.load(deps.storage)?;
    rewards::start_period(&mut pool, amount, duration, env.block.time.seconds())?;
    POOL_STATE.save(deps.storage, &pool)?;

    Ok(Response::new()
        .add_attribute("action", "period_started")
        .add_attribute("reward_amount", amount.to_string())
        .add_attribute("rewards_duration", duration.to_string())
        .add_attribute("reward_rate", pool.reward_rate.to_string())
        .add_attribute("period_finish", pool.period_finish.to_string()))
}

pub fn execute_add_reward_amount(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info.sender)?;

    let mut pool = POOL_STATE.load(deps.storage)?;
    rewards::add_reward_amount(&mut pool, amount, env.block.time.seconds())?;
    POOL_STATE.save(deps.storage, &pool)?;

    Ok(Response::new()
        .add_attribute("action", "reward_top_up")
        .add_attribute("added_amount", amount.to_string())
        .add_attribute("reward_rate", pool.reward_rate.to_string()))
}

pub fn execute_set_rewards_duration(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    duration: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info.sender)?;

    let mut pool = POOL_STATE.load(deps.storage)?;
    rewards::set_rewards_duration(&mut pool, duration, env.block.time.seconds())?;
    POOL_STATE.save(deps.storage, &pool)?;

    Ok(Response::new()
        .add_attribute("action", "duration_updated")
        .add_attribute("rewards_duration", duration.to_string()))
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info.sender)?;

    config.owner = deps.api.addr_validate(&new_owner)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "ownership_transferred")
        .add_attribute("previous_owner", info.sender)
        .add_attribute("new_owner", config.owner))
}
