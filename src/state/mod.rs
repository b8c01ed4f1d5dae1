// src/state/mod.rs

pub mod config;
pub mod pool;

pub use config::{Config, CONFIG,};
pub use pool::{PoolState, POOL_STATE, StakerInfo, STAKER_INFO, StakedToken, STAKED_TOKENS,};

use secret_toolkit_storage::{Item};

/// Set while a mutating call (and the transfers it dispatched) is in flight.
pub static REENTRANCY_LOCK: Item<bool> = Item::new(b"reentrancy_lock");
