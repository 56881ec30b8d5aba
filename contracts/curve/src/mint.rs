use soroban_sdk::{token::TokenClient, Address, Env};

use crate::{
    errors::CurveError,
    events::CurveEvents,
    math::{self, BPS_DENOMINATOR},
    reentrancy, storage,
    storage::CurveConfig,
    TokenLedgerClient,
};

/// Evaluates the buy curve for a deposit of `payment` at the current
/// `supply`.
///
/// The buy curve is B(x) = buy_slope * x, so the cost of moving supply from
/// `a` to `a + x` is buy_slope * ((a + x)^2 - a^2) / 2 and the units minted
/// for a deposit `c` are:
///
/// ```text
/// x = sqrt(2c / buy_slope + a^2) - a
/// ```
///
/// floor-rounded at every step.
///
/// # Errors
/// | Error                | Condition                                      |
/// |----------------------|------------------------------------------------|
/// | `InvalidCalculation` | Computed root <= current supply (rounding      |
/// |                      | underflow on a dust-sized deposit)             |
/// | `AmountTooSmall`     | Deposit would mint zero whole units            |
/// | `Overflow`           | supply^2 or the radicand exceeds the working   |
/// |                      | width, or the quote does not fit in i128       |
pub fn quote_buy(
    env: &Env,
    payment: i128,
    supply: i128,
    buy_slope: i128,
) -> Result<i128, CurveError> {
    let scaled = math::mul_div(env, 2, payment, buy_slope)?;

    // supply is non-negative by the ledger invariant, so the u128 casts are
    // lossless.
    let supply_sq = (supply as u128)
        .checked_mul(supply as u128)
        .ok_or(CurveError::Overflow)?;
    let radicand = (scaled as u128)
        .checked_add(supply_sq)
        .ok_or(CurveError::Overflow)?;

    let root = math::sqrt(radicand);
    let root = i128::try_from(root).map_err(|_| CurveError::Overflow)?;

    if root <= supply {
        return Err(CurveError::InvalidCalculation);
    }

    let minted = root - supply;
    if minted == 0 {
        return Err(CurveError::AmountTooSmall);
    }

    Ok(minted)
}

/// `buy`: mints to the buyer, `investment_ratio_bps` of the payment to the
/// reserve, remainder to the organization.
pub fn execute_buy(env: &Env, buyer: &Address, payment: i128) -> Result<i128, CurveError> {
    if payment <= 0 {
        return Err(CurveError::ZeroValue);
    }
    let config = storage::get_config(env).ok_or(CurveError::NotInitialized)?;
    storage::extend_instance_ttl(env);

    reentrancy::acquire(env)?;

    let minted = mint_against_deposit(
        env,
        &config,
        buyer,
        buyer,
        payment,
        config.investment_ratio_bps,
        true,
    )?;

    CurveEvents::buy(env, buyer, minted, payment);
    reentrancy::release(env);
    Ok(minted)
}

/// `rebuy`: the organization funds the reserve directly. The full payment
/// is retained and the minted units go to the organization itself.
///
/// The caller check precedes the amount check: a non-organization caller
/// gets `OnlyOrganization` regardless of payment size.
pub fn execute_rebuy(env: &Env, caller: &Address, payment: i128) -> Result<i128, CurveError> {
    let config = storage::get_config(env).ok_or(CurveError::NotInitialized)?;
    if *caller != config.organization {
        return Err(CurveError::OnlyOrganization);
    }
    if payment <= 0 {
        return Err(CurveError::ZeroValue);
    }
    storage::extend_instance_ttl(env);

    reentrancy::acquire(env)?;

    let minted =
        mint_against_deposit(env, &config, caller, caller, payment, BPS_DENOMINATOR, false)?;

    CurveEvents::rebuy(env, caller, minted, payment);
    reentrancy::release(env);
    Ok(minted)
}

/// `pay`: a revenue payment. Minted units go to `recipient`, or to the
/// organization when the payer names none; `distribution_ratio_bps` of the
/// payment is retained in the reserve.
pub fn execute_pay(
    env: &Env,
    payer: &Address,
    payment: i128,
    recipient: Option<Address>,
) -> Result<i128, CurveError> {
    if payment <= 0 {
        return Err(CurveError::ZeroValue);
    }
    let config = storage::get_config(env).ok_or(CurveError::NotInitialized)?;
    storage::extend_instance_ttl(env);

    reentrancy::acquire(env)?;

    let target = recipient.unwrap_or_else(|| config.organization.clone());
    let minted = mint_against_deposit(
        env,
        &config,
        payer,
        &target,
        payment,
        config.distribution_ratio_bps,
        true,
    )?;

    CurveEvents::pay(env, payer, &target, minted, payment);
    reentrancy::release(env);
    Ok(minted)
}

/// Shared settlement path for the three mint operations.
///
/// # Flow
/// 1. **Quote** — read total supply from the Token Ledger and evaluate the
///    buy curve.
/// 2. **Pull deposit** — transfer the full payment from the payer into the
///    contract.
/// 3. **Credit reserve** — book `reserve_share_bps` of the payment before
///    any outbound transfer.
/// 4. **Mint** — issue the quoted units to `target`.
/// 5. **Forward remainder** — send the rest to the organization last. A
///    failed forward reports `TransferFailed` and Soroban's rollback undoes
///    steps 2–4.
fn mint_against_deposit(
    env: &Env,
    config: &CurveConfig,
    payer: &Address,
    target: &Address,
    payment: i128,
    reserve_share_bps: u32,
    forward_remainder: bool,
) -> Result<i128, CurveError> {
    let ledger = TokenLedgerClient::new(env, &config.bond_token);
    let supply = ledger.total_supply();
    let minted = quote_buy(env, payment, supply, config.buy_slope)?;

    let contract = env.current_contract_address();
    let reserve_token = TokenClient::new(env, &config.reserve_token);
    reserve_token.transfer(payer, &contract, &payment);

    let reserve_share = if reserve_share_bps == BPS_DENOMINATOR {
        payment
    } else {
        math::mul_div(env, payment, reserve_share_bps as i128, BPS_DENOMINATOR as i128)?
    };

    let mut state = storage::get_state(env).ok_or(CurveError::NotInitialized)?;
    state.reserve = state
        .reserve
        .checked_add(reserve_share)
        .ok_or(CurveError::Overflow)?;
    storage::set_state(env, &state);

    ledger.mint(target, &minted);

    let remainder = payment - reserve_share;
    if forward_remainder && remainder > 0 {
        if reserve_token
            .try_transfer(&contract, &config.organization, &remainder)
            .is_err()
        {
            return Err(CurveError::TransferFailed);
        }
    }

    Ok(minted)
}
