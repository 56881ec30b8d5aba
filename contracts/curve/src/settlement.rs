use soroban_sdk::{token::TokenClient, Address, Env};

use crate::{
    errors::CurveError, events::CurveEvents, math, reentrancy, storage, TokenLedgerClient,
};

/// Evaluates the sell curve for redeeming `amount` units at the current
/// `supply`, against `reserve` and the cumulative `burned` counter.
///
/// ```text
/// term1      = 2R * x / a
/// term2      = (R * x / a) * x / a
/// burn_bonus = floor(burned / x)
/// proceeds   = term1 - term2 + burn_bonus
/// ```
///
/// The burn bonus scales as 1/x: smaller redemptions draw a larger
/// per-unit share of the shared burned pool. That shape is an intentional
/// property of this curve.
pub fn quote_sell(
    env: &Env,
    amount: i128,
    supply: i128,
    reserve: i128,
    burned: i128,
) -> Result<i128, CurveError> {
    let two_reserve = reserve.checked_mul(2).ok_or(CurveError::Overflow)?;
    let term1 = math::mul_div(env, two_reserve, amount, supply)?;

    let inner = math::mul_div(env, reserve, amount, supply)?;
    let term2 = math::mul_div(env, inner, amount, supply)?;

    // term2 <= term1 algebraically (x < a), but floor rounding is applied
    // per term, so keep the subtraction checked.
    let main_part = term1.checked_sub(term2).ok_or(CurveError::Overflow)?;

    let burn_bonus = math::mul_div(env, burned, 1, amount)?;
    main_part.checked_add(burn_bonus).ok_or(CurveError::Overflow)
}

/// `sell`: redeems `amount` units from the seller along the sell curve.
///
/// # Flow
/// 1. **Preflight** — amount positive, seller balance sufficient, amount
///    strictly below total supply, reserve non-empty.
/// 2. **Quote** — evaluate the sell curve; zero proceeds revert.
/// 3. **Defensive balance check** — the contract must actually hold the
///    proceeds; unreachable while reserve accounting is sound.
/// 4. **Effects** — burn the units via the Token Ledger, then debit the
///    reserve.
/// 5. **Interaction** — transfer the proceeds to the seller last, so a
///    re-entrant callee sees fully settled state and a failed payout rolls
///    back the burn and the debit atomically.
///
/// # Errors
/// | Error                         | Condition                            |
/// |-------------------------------|--------------------------------------|
/// | `ZeroAmount`                  | `amount <= 0`                        |
/// | `InsufficientBalance`         | Seller holds fewer than `amount`     |
/// | `ExceedsTotalSupply`          | `amount >= total_supply` (boundary   |
/// |                               | included; the curve is undefined at  |
/// |                               | full redemption)                     |
/// | `InsufficientReserve`         | Reserve is zero                      |
/// | `ZeroProceeds`                | Quote floors to zero                 |
/// | `InsufficientContractBalance` | Held balance below proceeds          |
/// | `TransferFailed`              | Seller rejected the payout           |
/// | `Locked`                      | Re-entrant call                      |
pub fn execute_sell(env: &Env, seller: &Address, amount: i128) -> Result<i128, CurveError> {
    if amount <= 0 {
        return Err(CurveError::ZeroAmount);
    }
    let config = storage::get_config(env).ok_or(CurveError::NotInitialized)?;
    storage::extend_instance_ttl(env);

    reentrancy::acquire(env)?;

    let ledger = TokenLedgerClient::new(env, &config.bond_token);
    let balance = ledger.balance(seller);
    if balance < amount {
        return Err(CurveError::InsufficientBalance);
    }

    let supply = ledger.total_supply();
    if amount >= supply {
        return Err(CurveError::ExceedsTotalSupply);
    }

    let mut state = storage::get_state(env).ok_or(CurveError::NotInitialized)?;
    if state.reserve == 0 {
        return Err(CurveError::InsufficientReserve);
    }

    let proceeds = quote_sell(env, amount, supply, state.reserve, state.burned)?;
    if proceeds == 0 {
        return Err(CurveError::ZeroProceeds);
    }

    let contract = env.current_contract_address();
    let reserve_token = TokenClient::new(env, &config.reserve_token);
    if reserve_token.balance(&contract) < proceeds {
        return Err(CurveError::InsufficientContractBalance);
    }

    ledger.burn_from(seller, &amount);
    state.reserve = state
        .reserve
        .checked_sub(proceeds)
        .ok_or(CurveError::Overflow)?;
    storage::set_state(env, &state);

    if reserve_token
        .try_transfer(&contract, seller, &proceeds)
        .is_err()
    {
        return Err(CurveError::TransferFailed);
    }

    CurveEvents::sell(env, seller, amount, proceeds);
    reentrancy::release(env);
    Ok(proceeds)
}

/// `burn`: relocates `amount` of the holder's units to the sink (this
/// contract's own address) and advances the cumulative burned counter.
/// Total supply is unchanged; the sink balance always equals the counter.
pub fn execute_burn(env: &Env, holder: &Address, amount: i128) -> Result<(), CurveError> {
    if amount <= 0 {
        return Err(CurveError::ZeroAmount);
    }
    let config = storage::get_config(env).ok_or(CurveError::NotInitialized)?;
    storage::extend_instance_ttl(env);

    reentrancy::acquire(env)?;

    let ledger = TokenLedgerClient::new(env, &config.bond_token);
    let balance = ledger.balance(holder);
    if balance < amount {
        return Err(CurveError::InsufficientBalance);
    }

    ledger.transfer(holder, &env.current_contract_address(), &amount);

    let mut state = storage::get_state(env).ok_or(CurveError::NotInitialized)?;
    state.burned = state.burned.checked_add(amount).ok_or(CurveError::Overflow)?;
    storage::set_state(env, &state);

    CurveEvents::burn(env, holder, amount);
    reentrancy::release(env);
    Ok(())
}
