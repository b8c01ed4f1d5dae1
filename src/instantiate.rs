// src/instantiate.rs
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, to_binary, CosmosMsg, WasmMsg,};
use secret_toolkit::snip20;

use crate::error::ContractError;
use crate::msg::InstantiateMsg;
use crate::state::{Config, CONFIG, PoolState, POOL_STATE, REENTRANCY_LOCK};

pub fn perform_instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    let nft_contract = deps.api.addr_validate(&msg.nft_contract)?;
    let reward_token_contract = deps.api.addr_validate(&msg.reward_token_contract)?;

    let config = Config {
        owner,
        nft_contract,
        nft_hash: msg.nft_hash,
        reward_token_contract,
        reward_token_hash: msg.reward_token_hash,
    };

    CONFIG.save(deps.storage, &config)?;
    POOL_STATE.save(deps.storage, &PoolState::default())?;
    REENTRANCY_LOCK.save(deps.storage, &false)?;

    // Register this contract as a receiver for the reward token
    let register_reward_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.reward_token_contract.to_string(),
        code_hash: config.reward_token_hash.clone(),
        msg: to_binary(&snip20::HandleMsg::RegisterReceive {
            code_hash: env.contract.code_hash.clone(),
            padding: None,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(register_reward_msg)
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("nft_contract", config.nft_contract)
        .add_attribute("reward_token_contract", config.reward_token_contract))
}
