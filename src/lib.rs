// src/lib.rs
use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult, StdError, Reply,};
use crate::error::ContractError;
use crate::execute::{execute_dispatch, handle_lock_release_reply};

use crate::query::query_dispatch;
use crate::migrate::perform_migration;
use crate::instantiate::perform_instantiate;

pub mod error;
pub mod msg;
pub mod state;
pub mod execute;
pub mod query;
pub mod migrate;
pub mod instantiate;


const LOCK_RELEASE_REPLY_ID: u64 = 0;

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: msg::InstantiateMsg,
) -> Result<Response, ContractError> {
    perform_instantiate(deps, env, info, msg)
}

#[entry_point]
pub fn execute(
    deps: DepsMut, 
    env: Env, 
    info: MessageInfo, 
    msg: msg::ExecuteMsg
) -> Result<Response, ContractError> {
    execute_dispatch(deps, env, info, msg)
}

#[entry_point]
pub fn migrate(
    deps: DepsMut, 
    env: Env, 
    msg: msg::MigrateMsg
) -> StdResult<Response> {
    perform_migration(deps, env, msg)
}

#[entry_point]
pub fn query(
    deps: Deps, 
    env: Env, 
    msg: msg::QueryMsg
) -> StdResult<Binary> {
    query_dispatch(deps, env, msg)
}

#[entry_point]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> StdResult<Response> {
    match msg.id {
        LOCK_RELEASE_REPLY_ID => handle_lock_release_reply(deps),
        _ => Err(StdError::generic_err("Unknown reply ID")),
    }
}
