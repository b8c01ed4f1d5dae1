use std::collections::BTreeSet;

use cosmwasm_std::{Addr, CosmosMsg, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    Storage, WasmMsg, to_binary};

use crate::error::ContractError;
use crate::execute::rewards::{checkpoint, claim_rewards};
use crate::msg::Snip721HandleMsg;
use crate::state::{Config, CONFIG, POOL_STATE, StakerInfo, STAKER_INFO, StakedToken, STAKED_TOKENS};


fn nft_transfer_msg(config: &Config, recipient: String, token_id: String) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.nft_contract.to_string(),
        code_hash: config.nft_hash.clone(),
        msg: to_binary(&Snip721HandleMsg::TransferNft {
            recipient,
            token_id,
            memo: None,
            padding: None,
        })?,
        funds: vec![],
    }))
}

// Non-empty and free of repeats.
fn validate_batch(token_ids: &[String]) -> Result<(), ContractError> {
    if token_ids.is_empty() {
        return Err(ContractError::invalid_input("no token ids given"));
    }
    let mut seen = BTreeSet::new();
    for token_id in token_ids {
        if !seen.insert(token_id) {
            return Err(ContractError::invalid_input(format!("token {} listed twice", token_id)));
        }
    }
    Ok(())
}

// -------------------------
// Stake
// -------------------------
pub fn stake(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_ids: Vec<String>,
) -> Result<Response, ContractError> {
    validate_batch(&token_ids)?;
    for token_id in &token_ids {
        if STAKED_TOKENS.get(deps.storage, token_id).is_some() {
            return Err(ContractError::AlreadyStaked { token_id: token_id.clone() });
        }
    }

    let config = CONFIG.load(deps.storage)?;
    let now = env.block.time.seconds();
    let mut pool = POOL_STATE.load(deps.storage)?;
    let mut staker = STAKER_INFO.get(deps.storage, &info.sender).unwrap_or_default();

    let first_slot = staker.staked_token_ids.len() as u32;
    u32::try_from(staker.staked_token_ids.len() + token_ids.len())
        .map_err(|_| ContractError::invalid_input("too many staked tokens"))?;

    // Pull every token in; any failed transfer reverts the whole call.
    let messages = token_ids
        .iter()
        .map(|token_id| nft_transfer_msg(&config, env.contract.address.to_string(), token_id.clone()))
        .collect::<StdResult<Vec<_>>>()?;

    checkpoint(&mut pool, Some(&mut staker), now)?;

    for (offset, token_id) in token_ids.iter().enumerate() {
        let entry = StakedToken {
            owner: info.sender.clone(),
            slot: first_slot + offset as u32,
        };
        STAKED_TOKENS.insert(deps.storage, token_id, &entry)?;
        staker.staked_token_ids.push(token_id.clone());
    }
    pool.total_staked = pool
        .total_staked
        .checked_add(token_ids.len() as u64)
        .ok_or_else(|| StdError::generic_err("Staked supply overflow"))?;

    STAKER_INFO.insert(deps.storage, &info.sender, &staker)?;
    POOL_STATE.save(deps.storage, &pool)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "staked")
        .add_attribute("account", info.sender)
        .add_attribute("count", token_ids.len().to_string())
        .add_attribute("token_ids", token_ids.join(",")))
}

// -------------------------
// Withdraw
// -------------------------
pub fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_ids: Vec<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let messages = unstake(deps.storage, env.block.time.seconds(), &config, &info.sender, &token_ids)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "withdrawn")
        .add_attribute("account", info.sender)
        .add_attribute("count", token_ids.len().to_string())
        .add_attribute("token_ids", token_ids.join(",")))
}

/// Withdraws every staked token of the caller, then claims.
pub fn withdraw_all(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let now = env.block.time.seconds();
    let token_ids = STAKER_INFO
        .get(deps.storage, &info.sender)
        .map(|staker| staker.staked_token_ids)
        .unwrap_or_default();

    let messages = unstake(deps.storage, now, &config, &info.sender, &token_ids)?;
    let (reward, transfer) = claim_rewards(deps.storage, now, &config, &info.sender)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_messages(transfer)
        .add_attribute("action", "withdrawn_all")
        .add_attribute("account", info.sender)
        .add_attribute("count", token_ids.len().to_string())
        .add_attribute("token_ids", token_ids.join(","))
        .add_attribute("claimed_amount", reward.to_string()))
}

fn unstake(
    storage: &mut dyn Storage,
    now: u64,
    config: &Config,
    account: &Addr,
    token_ids: &[String],
) -> Result<Vec<CosmosMsg>, ContractError> {
    validate_batch(token_ids)?;
    for token_id in token_ids {
        match STAKED_TOKENS.get(storage, token_id) {
            Some(entry) if entry.owner == *account => {}
            _ => return Err(ContractError::NotOwner { token_id: token_id.clone() }),
        }
    }

    let mut pool = POOL_STATE.load(storage)?;
    let mut staker = STAKER_INFO
        .get(storage, account)
        .ok_or_else(|| StdError::generic_err("Staker info not found"))?;

    let messages = token_ids
        .iter()
        .map(|token_id| nft_transfer_msg(config, account.to_string(), token_id.clone()))
        .collect::<StdResult<Vec<_>>>()?;

    checkpoint(&mut pool, Some(&mut staker), now)?;

    for token_id in token_ids {
        release_slot(storage, &mut staker, token_id)?;
    }
    pool.total_staked = pool
        .total_staked
        .checked_sub(token_ids.len() as u64)
        .ok_or_else(|| StdError::generic_err("Staked supply underflow"))?;

    STAKER_INFO.insert(storage, account, &staker)?;
    POOL_STATE.save(storage, &pool)?;

    Ok(messages)
}

/// Swap-removes `token_id` from the staker's list and clears its registry entry.
/// The token that was last in the list takes over the freed slot.
fn release_slot(
    storage: &mut dyn Storage,
    staker: &mut StakerInfo,
    token_id: &String,
) -> StdResult<()> {
    let entry = STAKED_TOKENS
        .get(storage, token_id)
        .ok_or_else(|| StdError::generic_err("Staked token not found"))?;
    let slot = entry.slot as usize;
    if staker.staked_token_ids.get(slot) != Some(token_id) {
        return Err(StdError::generic_err("Staked token registry out of sync"));
    }

    staker.staked_token_ids.swap_remove(slot);
    if let Some(moved) = staker.staked_token_ids.get(slot) {
        STAKED_TOKENS.insert(storage, moved, &StakedToken { owner: entry.owner, slot: entry.slot })?;
    }
    STAKED_TOKENS.remove(storage, token_id)?;

    Ok(())
}
