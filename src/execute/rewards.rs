use cosmwasm_std::{Addr, CosmosMsg, DepsMut, MessageInfo, Response, StdResult, Storage,
    Uint128, Uint256, WasmMsg, to_binary};
use secret_toolkit::snip20;

use crate::error::ContractError;
use crate::state::{Config, CONFIG, PoolState, POOL_STATE, StakerInfo, STAKER_INFO};

/// Fixed-point scale of `reward_per_token_stored`.
pub const REWARD_PRECISION: Uint128 = Uint128::new(1_000_000_000_000_000_000);


/// `a * b / denominator` with a 256-bit intermediate, truncating.
fn mul_div(a: Uint128, b: Uint128, denominator: Uint128) -> Result<Uint128, ContractError> {
    let quotient = a.full_mul(b).checked_div(Uint256::from(denominator))?;
    Ok(Uint128::try_from(quotient)?)
}

/// `a * b / denominator` with a 256-bit intermediate, rounding up.
fn mul_div_ceil(a: Uint128, b: Uint128, denominator: Uint128) -> Result<Uint128, ContractError> {
    let denominator = Uint256::from(denominator);
    let quotient = a
        .full_mul(b)
        .checked_add(denominator.checked_sub(Uint256::from(1u128))?)?
        .checked_div(denominator)?;
    Ok(Uint128::try_from(quotient)?)
}

pub fn last_time_reward_applicable(pool: &PoolState, now: u64) -> u64 {
    now.min(pool.period_finish)
}

pub fn reward_per_token(pool: &PoolState, now: u64) -> Result<Uint128, ContractError> {
    if pool.total_staked == 0 {
        return Ok(pool.reward_per_token_stored);
    }

    let elapsed = last_time_reward_applicable(pool, now).saturating_sub(pool.last_update_time);
    let released = pool.reward_rate.checked_mul(Uint128::from(elapsed))?;
    let increment = mul_div(released, REWARD_PRECISION, Uint128::from(pool.total_staked))?;

    Ok(pool.reward_per_token_stored.checked_add(increment)?)
}

/// Rewards earned by `staker` up to `now` and not yet claimed.
pub fn pending_rewards(
    pool: &PoolState,
    staker: &StakerInfo,
    now: u64,
) -> Result<Uint128, ContractError> {
    let per_token = reward_per_token(pool, now)?.checked_sub(staker.reward_per_token_paid)?;
    let accrued = mul_div(Uint128::from(staker.staked_count()), per_token, REWARD_PRECISION)?;

    Ok(accrued.checked_add(staker.rewards_owed)?)
}

/// Freezes accrual up to `now`. Must run before any change to stake balances or the rate.
pub fn checkpoint(
    pool: &mut PoolState,
    staker: Option<&mut StakerInfo>,
    now: u64,
) -> Result<(), ContractError> {
    let stored = reward_per_token(pool, now)?;
    let increment = stored.checked_sub(pool.reward_per_token_stored)?;
    // Rounded up so it never falls below what the stakers can claim.
    let distributed = mul_div_ceil(increment, Uint128::from(pool.total_staked), REWARD_PRECISION)?;
    pool.rewards_unpaid = pool.rewards_unpaid.checked_add(distributed)?;

    pool.reward_per_token_stored = stored;
    pool.last_update_time = last_time_reward_applicable(pool, now);

    if let Some(staker) = staker {
        staker.rewards_owed = pending_rewards(pool, staker, now)?;
        staker.reward_per_token_paid = pool.reward_per_token_stored;
    }

    Ok(())
}

/// Reward balance not yet owed to any staker.
fn available_reward_balance(pool: &PoolState) -> Uint128 {
    pool.reward_balance.saturating_sub(pool.rewards_unpaid)
}

// Expects `pool` to be checkpointed at the instant the new rate takes effect.
fn ensure_funded(pool: &PoolState, reward_rate: Uint128, duration: u64) -> Result<(), ContractError> {
    let balance = available_reward_balance(pool);
    if reward_rate > balance.checked_div(Uint128::from(duration))? {
        return Err(ContractError::InsufficientFunds { reward_rate, balance });
    }
    Ok(())
}

pub fn start_period(
    pool: &mut PoolState,
    amount: Uint128,
    duration: u64,
    now: u64,
) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::invalid_input("reward amount must be positive"));
    }
    if duration == 0 {
        return Err(ContractError::invalid_input("duration must be positive"));
    }
    if now <= pool.period_finish {
        return Err(ContractError::PeriodStillActive { period_finish: pool.period_finish });
    }
    let period_finish = now
        .checked_add(duration)
        .ok_or_else(|| ContractError::invalid_input("duration out of range"))?;

    let reward_rate = amount.checked_div(Uint128::from(duration))?;

    let mut next = pool.clone();
    checkpoint(&mut next, None, now)?;
    ensure_funded(&next, reward_rate, duration)?;

    next.reward_rate = reward_rate;
    next.rewards_duration = duration;
    next.last_update_time = now;
    next.period_finish = period_finish;
    *pool = next;

    Ok(())
}

/// Raises the rate for the rest of the running period, carrying over what the old rate had left.
pub fn add_reward_amount(
    pool: &mut PoolState,
    amount: Uint128,
    now: u64,
) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::invalid_input("reward amount must be positive"));
    }
    if now >= pool.period_finish {
        return Err(ContractError::PeriodNotActive {});
    }

    let remaining = pool.period_finish - now;
    let leftover = pool.reward_rate.checked_mul(Uint128::from(remaining))?;
    let reward_rate = amount.checked_add(leftover)?.checked_div(Uint128::from(remaining))?;

    let mut next = pool.clone();
    checkpoint(&mut next, None, now)?;
    ensure_funded(&next, reward_rate, remaining)?;

    next.reward_rate = reward_rate;
    next.last_update_time = now;
    *pool = next;

    Ok(())
}

pub fn set_rewards_duration(
    pool: &mut PoolState,
    duration: u64,
    now: u64,
) -> Result<(), ContractError> {
    if duration == 0 {
        return Err(ContractError::invalid_input("duration must be positive"));
    }
    if now <= pool.period_finish {
        return Err(ContractError::PeriodStillActive { period_finish: pool.period_finish });
    }
    pool.rewards_duration = duration;
    Ok(())
}

pub fn reward_for_full_duration(pool: &PoolState) -> Result<Uint128, ContractError> {
    Ok(pool.reward_rate.checked_mul(Uint128::from(pool.rewards_duration))?)
}

pub fn reward_transfer_msg(
    config: &Config,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.reward_token_contract.to_string(),
        code_hash: config.reward_token_hash.clone(),
        msg: to_binary(&snip20::HandleMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
            padding: None,
            memo: None,
        })?,
        funds: vec![],
    }))
}

pub fn claim(
    deps: DepsMut,
    now: u64,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let (reward, transfer) = claim_rewards(deps.storage, now, &config, &info.sender)?;

    Ok(Response::new()
        .add_messages(transfer)
        .add_attribute("action", "claimed")
        .add_attribute("account", info.sender)
        .add_attribute("amount", reward.to_string()))
}

/// Checkpoints `account` and pays out whatever it is owed. Nothing owed is a no-op.
pub fn claim_rewards(
    storage: &mut dyn Storage,
    now: u64,
    config: &Config,
    account: &Addr,
) -> Result<(Uint128, Option<CosmosMsg>), ContractError> {
    let mut pool = POOL_STATE.load(storage)?;
    let mut staker = STAKER_INFO.get(storage, account).unwrap_or_default();

    checkpoint(&mut pool, Some(&mut staker), now)?;

    let reward = staker.rewards_owed;
    let mut transfer = None;
    if !reward.is_zero() {
        pool.reward_balance = pool.reward_balance.checked_sub(reward)?;
        pool.rewards_unpaid = pool.rewards_unpaid.saturating_sub(reward);
        pool.total_claimed = pool.total_claimed.checked_add(reward)?;
        staker.rewards_owed = Uint128::zero();
        transfer = Some(reward_transfer_msg(config, account, reward)?);
    }

    STAKER_INFO.insert(storage, account, &staker)?;
    POOL_STATE.save(storage, &pool)?;

    Ok((reward, transfer))
}

/// Reward tokens sent to the contract through the SNIP-20 receive hook.
pub fn fund_rewards(
    deps: DepsMut,
    info: MessageInfo,
    from: Addr,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.reward_token_contract {
        return Err(ContractError::UnacceptableToken {});
    }
    if amount.is_zero() {
        return Err(ContractError::invalid_input("funding amount must be positive"));
    }

    let mut pool = POOL_STATE.load(deps.storage)?;
    pool.reward_balance = pool.reward_balance.checked_add(amount)?;
    POOL_STATE.save(deps.storage, &pool)?;

    Ok(Response::new()
        .add_attribute("action", "rewards_funded")
        .add_attribute("from", from)
        .add_attribute("amount", amount.to_string())
        .add_attribute("reward_balance", pool.reward_balance.to_string()))
}


#[cfg(test)]
mod tests {
    use super::*;

    const WEEK: u64 = 604_800;
    const T0: u64 = 1_000_000;

    fn units(n: u128) -> Uint128 {
        Uint128::new(n) * REWARD_PRECISION
    }

    fn funded_pool(balance: Uint128) -> PoolState {
        PoolState {
            reward_balance: balance,
            ..PoolState::default()
        }
    }

    fn stake(pool: &mut PoolState, staker: &mut StakerInfo, ids: &[&str], now: u64) {
        checkpoint(pool, Some(&mut *staker), now).unwrap();
        for id in ids {
            staker.staked_token_ids.push(id.to_string());
        }
        pool.total_staked += ids.len() as u64;
    }

    #[test]
    fn idle_pool_accrues_nothing() {
        let mut pool = funded_pool(units(100));
        start_period(&mut pool, units(100), WEEK, T0).unwrap();

        assert_eq!(pool.reward_rate, units(100) / Uint128::from(WEEK));
        assert_eq!(reward_per_token(&pool, T0 + WEEK).unwrap(), Uint128::zero());

        checkpoint(&mut pool, None, T0 + WEEK).unwrap();
        assert_eq!(pool.reward_per_token_stored, Uint128::zero());
        assert_eq!(pool.last_update_time, T0 + WEEK);
    }

    #[test]
    fn single_staker_earns_whole_period() {
        let mut pool = funded_pool(units(100));
        let mut staker = StakerInfo::default();
        stake(&mut pool, &mut staker, &["1"], T0);
        start_period(&mut pool, units(100), WEEK, T0).unwrap();

        let earned = pending_rewards(&pool, &staker, T0 + WEEK).unwrap();
        assert_eq!(earned, pool.reward_rate * Uint128::from(WEEK));
        assert!(units(100) - earned < Uint128::from(WEEK));

        // accrual stops at period end
        assert_eq!(pending_rewards(&pool, &staker, T0 + 3 * WEEK).unwrap(), earned);
    }

    #[test]
    fn rewards_split_by_share() {
        let mut pool = funded_pool(units(100));
        let mut alice = StakerInfo::default();
        let mut bob = StakerInfo::default();
        stake(&mut pool, &mut alice, &["1"], T0);
        stake(&mut pool, &mut bob, &["2", "3"], T0);
        start_period(&mut pool, units(100), WEEK, T0).unwrap();

        let alice_earned = pending_rewards(&pool, &alice, T0 + WEEK).unwrap();
        let bob_earned = pending_rewards(&pool, &bob, T0 + WEEK).unwrap();

        assert!(alice_earned > units(33) && alice_earned < units(34));
        assert!(bob_earned > units(66) && bob_earned < units(67));
        assert!(bob_earned - alice_earned * Uint128::new(2) <= Uint128::one());
        assert!(alice_earned + bob_earned <= pool.reward_rate * Uint128::from(WEEK));
    }

    #[test]
    fn checkpoint_is_idempotent() {
        let mut pool = funded_pool(units(10));
        let mut staker = StakerInfo::default();
        stake(&mut pool, &mut staker, &["1", "2"], T0);
        start_period(&mut pool, units(10), 1_000, T0).unwrap();

        checkpoint(&mut pool, Some(&mut staker), T0 + 400).unwrap();
        let (pool_before, staker_before) = (pool.clone(), staker.clone());
        checkpoint(&mut pool, Some(&mut staker), T0 + 400).unwrap();

        assert_eq!(pool, pool_before);
        assert_eq!(staker, staker_before);
    }

    #[test]
    fn dilution_never_reduces_accrued_rewards() {
        let mut pool = funded_pool(units(50));
        let mut alice = StakerInfo::default();
        let mut bob = StakerInfo::default();
        stake(&mut pool, &mut alice, &["1"], T0);
        start_period(&mut pool, units(50), 1_000, T0).unwrap();

        let before = pending_rewards(&pool, &alice, T0 + 300).unwrap();
        stake(&mut pool, &mut bob, &["2", "3", "4", "5"], T0 + 300);
        let after = pending_rewards(&pool, &alice, T0 + 300).unwrap();
        let later = pending_rewards(&pool, &alice, T0 + 600).unwrap();

        assert_eq!(before, after);
        assert!(later >= after);
        // one fifth of the remaining stream from here on
        let bob_later = pending_rewards(&pool, &bob, T0 + 600).unwrap();
        assert!(bob_later - (later - after) * Uint128::new(4) <= Uint128::new(4));
    }

    #[test]
    fn accrued_rewards_never_exceed_released_stream() {
        let mut pool = funded_pool(units(7));
        let mut alice = StakerInfo::default();
        let mut bob = StakerInfo::default();
        let mut carol = StakerInfo::default();
        stake(&mut pool, &mut alice, &["1"], T0);
        start_period(&mut pool, units(7), 700, T0).unwrap();
        stake(&mut pool, &mut bob, &["2", "3"], T0 + 100);
        stake(&mut pool, &mut carol, &["4", "5", "6"], T0 + 250);

        checkpoint(&mut pool, Some(&mut bob), T0 + 400).unwrap();
        let removed = bob.staked_token_ids.pop().unwrap();
        assert_eq!(removed, "3");
        pool.total_staked -= 1;

        let now = T0 + 700;
        let total = pending_rewards(&pool, &alice, now).unwrap()
            + pending_rewards(&pool, &bob, now).unwrap()
            + pending_rewards(&pool, &carol, now).unwrap();
        assert!(total <= pool.reward_rate * Uint128::new(700));

        checkpoint(&mut pool, None, now).unwrap();
        assert!(pool.rewards_unpaid >= total);
        assert!(pool.rewards_unpaid <= pool.reward_rate * Uint128::new(700));
    }

    #[test]
    fn unpaid_rewards_do_not_fund_the_next_period() {
        let mut pool = funded_pool(units(100));
        let mut staker = StakerInfo::default();
        stake(&mut pool, &mut staker, &["1"], T0);
        start_period(&mut pool, units(100), 1_000, T0).unwrap();
        let before = pool.clone();

        let err = start_period(&mut pool, units(100), 1_000, T0 + 1_001).unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientFunds {
                reward_rate: units(100) / Uint128::new(1_000),
                balance: Uint128::zero(),
            }
        );
        assert_eq!(pool, before);

        pool.reward_balance += units(100);
        start_period(&mut pool, units(100), 1_000, T0 + 1_001).unwrap();
        assert_eq!(pool.rewards_unpaid, units(100));
        assert_eq!(pending_rewards(&pool, &staker, T0 + 2_001).unwrap(), units(200));
    }

    #[test]
    fn start_period_rejects_running_period() {
        let mut pool = funded_pool(units(100));
        start_period(&mut pool, units(10), 1_000, T0).unwrap();

        let err = start_period(&mut pool, units(10), 1_000, T0 + 1_000).unwrap_err();
        assert_eq!(err, ContractError::PeriodStillActive { period_finish: T0 + 1_000 });

        start_period(&mut pool, units(10), 1_000, T0 + 1_001).unwrap();
        assert_eq!(pool.period_finish, T0 + 2_001);
    }

    #[test]
    fn start_period_checks_balance_against_truncated_rate() {
        let mut pool = funded_pool(Uint128::new(1_000));
        let err = start_period(&mut pool, Uint128::new(2_000), 1_000, T0).unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientFunds { reward_rate: Uint128::new(2), balance: Uint128::new(1_000) }
        );
        assert_eq!(pool, funded_pool(Uint128::new(1_000)));

        // 1_999 / 1_000 truncates to a rate of one, which the balance covers
        start_period(&mut pool, Uint128::new(1_999), 1_000, T0).unwrap();
        assert_eq!(pool.reward_rate, Uint128::one());
    }

    #[test]
    fn zero_amount_or_duration_is_invalid() {
        let mut pool = funded_pool(units(1));
        assert!(matches!(
            start_period(&mut pool, Uint128::zero(), 10, T0),
            Err(ContractError::InvalidInput { .. })
        ));
        assert!(matches!(
            start_period(&mut pool, units(1), 0, T0),
            Err(ContractError::InvalidInput { .. })
        ));
        assert!(matches!(
            set_rewards_duration(&mut pool, 0, T0),
            Err(ContractError::InvalidInput { .. })
        ));
    }

    #[test]
    fn top_up_requires_live_period() {
        let mut pool = funded_pool(units(100));
        assert_eq!(
            add_reward_amount(&mut pool, units(1), T0).unwrap_err(),
            ContractError::PeriodNotActive {}
        );

        start_period(&mut pool, units(10), 1_000, T0).unwrap();
        assert_eq!(
            add_reward_amount(&mut pool, units(1), T0 + 1_000).unwrap_err(),
            ContractError::PeriodNotActive {}
        );
    }

    #[test]
    fn top_up_keeps_leftover_and_finish() {
        let mut pool = funded_pool(units(200));
        let mut staker = StakerInfo::default();
        stake(&mut pool, &mut staker, &["1"], T0);
        start_period(&mut pool, units(100), 1_000, T0).unwrap();
        assert_eq!(pool.reward_rate, units(100) / Uint128::new(1_000));

        add_reward_amount(&mut pool, units(100), T0 + 500).unwrap();
        assert_eq!(pool.period_finish, T0 + 1_000);
        assert_eq!(pool.last_update_time, T0 + 500);
        assert_eq!(pool.reward_rate, units(150) / Uint128::new(500));

        let earned = pending_rewards(&pool, &staker, T0 + 1_000).unwrap();
        assert_eq!(earned, units(200));
    }

    #[test]
    fn top_up_rejects_rate_the_balance_cannot_cover() {
        let mut pool = funded_pool(units(100));
        start_period(&mut pool, units(100), 1_000, T0).unwrap();
        let before = pool.clone();

        let err = add_reward_amount(&mut pool, units(60), T0 + 500).unwrap_err();
        assert!(matches!(err, ContractError::InsufficientFunds { .. }));
        assert_eq!(pool, before);
    }

    #[test]
    fn duration_only_changes_after_period() {
        let mut pool = funded_pool(units(10));
        start_period(&mut pool, units(10), 1_000, T0).unwrap();
        assert_eq!(reward_for_full_duration(&pool).unwrap(), units(10));

        assert!(matches!(
            set_rewards_duration(&mut pool, 2_000, T0 + 10),
            Err(ContractError::PeriodStillActive { .. })
        ));
        set_rewards_duration(&mut pool, 2_000, T0 + 1_001).unwrap();
        assert_eq!(pool.rewards_duration, 2_000);
    }
}
