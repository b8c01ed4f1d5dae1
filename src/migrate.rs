// src/migrate.rs
use cosmwasm_std::{DepsMut, Env, Response, StdResult};

use crate::msg::MigrateMsg;
use crate::state::{CONFIG, POOL_STATE};

pub fn perform_migration(
    deps: DepsMut,
    env: Env,
    msg: MigrateMsg,
) -> StdResult<Response> {
    match msg {
        MigrateMsg::Migrate {} => migrate_state(deps, env),
    }
}

// Stored state must still decode under the new code.
fn migrate_state(deps: DepsMut, env: Env) -> StdResult<Response> {
    CONFIG.load(deps.storage)?;
    let pool = POOL_STATE.load(deps.storage)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("height", env.block.height.to_string())
        .add_attribute("total_staked", pool.total_staked.to_string()))
}
