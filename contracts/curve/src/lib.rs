#![cfg_attr(not(test), no_std)]

#[cfg(test)]
extern crate std;

mod errors;
mod events;
mod math;
mod mint;
mod reentrancy;
mod settlement;
mod storage;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractclient, contractimpl, Address, Env};

use errors::CurveError;
use math::BPS_DENOMINATOR;
use storage::{CurveConfig, CurveState};

/// Token Ledger collaborator interface. The curve contract is the admin of
/// the bond token and the only identity allowed to mint or burn against it;
/// holders authorize `transfer` themselves.
#[contractclient(name = "TokenLedgerClient")]
pub trait TokenLedger {
    fn mint(env: Env, to: Address, amount: i128);
    fn burn_from(env: Env, from: Address, amount: i128);
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
    fn total_supply(env: Env) -> i128;
}

/// Continuous bonding-curve token engine.
///
/// Participants deposit the reserve token to mint bond tokens along a fixed
/// quadratic buy curve and redeem along a dynamic sell curve that depends on
/// the accumulated reserve, outstanding supply, and the cumulative burned
/// counter. The organization may fund the reserve directly (`rebuy`), and
/// revenue payments (`pay`) split between a recipient's minted tokens and
/// the organization.
#[contract]
pub struct Curve;

#[contractimpl]
impl Curve {
    /// Fixes the curve parameters. Callable exactly once.
    ///
    /// # Errors
    /// | Error                | Condition                                  |
    /// |----------------------|--------------------------------------------|
    /// | `AlreadyInitialized` | Parameters already written                 |
    /// | `ZeroBuySlope`       | `buy_slope <= 0`                           |
    /// | `InvalidRatio`       | Either ratio outside `[1, 10_000]` bps     |
    /// | `ZeroAddress`        | Organization is this contract's own        |
    /// |                      | address (the burn sink is not an operator) |
    pub fn initialize(
        env: Env,
        organization: Address,
        reserve_token: Address,
        bond_token: Address,
        buy_slope: i128,
        investment_ratio_bps: u32,
        distribution_ratio_bps: u32,
    ) -> Result<(), CurveError> {
        if storage::has_config(&env) {
            return Err(CurveError::AlreadyInitialized);
        }
        if buy_slope <= 0 {
            return Err(CurveError::ZeroBuySlope);
        }
        if investment_ratio_bps == 0 || investment_ratio_bps > BPS_DENOMINATOR {
            return Err(CurveError::InvalidRatio);
        }
        if distribution_ratio_bps == 0 || distribution_ratio_bps > BPS_DENOMINATOR {
            return Err(CurveError::InvalidRatio);
        }
        if organization == env.current_contract_address() {
            return Err(CurveError::ZeroAddress);
        }

        storage::set_config(
            &env,
            &CurveConfig {
                organization,
                reserve_token,
                bond_token,
                buy_slope,
                investment_ratio_bps,
                distribution_ratio_bps,
            },
        );
        storage::set_state(&env, &CurveState { reserve: 0, burned: 0 });
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    /// Mints along the buy curve to the buyer. `investment_ratio_bps` of the
    /// payment is retained in the reserve; the remainder goes to the
    /// organization. Returns the units minted.
    pub fn buy(env: Env, buyer: Address, payment: i128) -> Result<i128, CurveError> {
        buyer.require_auth();
        mint::execute_buy(&env, &buyer, payment)
    }

    /// Redeems `amount` units along the sell curve plus the burn bonus.
    /// Returns the proceeds paid out.
    pub fn sell(env: Env, seller: Address, amount: i128) -> Result<i128, CurveError> {
        seller.require_auth();
        settlement::execute_sell(&env, &seller, amount)
    }

    /// Organization-only: funds the reserve with 100% of the payment and
    /// mints to the organization.
    pub fn rebuy(env: Env, caller: Address, payment: i128) -> Result<i128, CurveError> {
        caller.require_auth();
        mint::execute_rebuy(&env, &caller, payment)
    }

    /// Revenue payment: mints to `recipient` (the organization when `None`);
    /// `distribution_ratio_bps` of the payment is retained in the reserve.
    pub fn pay(
        env: Env,
        payer: Address,
        payment: i128,
        recipient: Option<Address>,
    ) -> Result<i128, CurveError> {
        payer.require_auth();
        mint::execute_pay(&env, &payer, payment, recipient)
    }

    /// Moves `amount` of the holder's units to the burn sink. Supply is
    /// unchanged; the circulating supply shrinks.
    pub fn burn(env: Env, holder: Address, amount: i128) -> Result<(), CurveError> {
        holder.require_auth();
        settlement::execute_burn(&env, &holder, amount)
    }

    // -----------------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------------

    pub fn reserve(env: Env) -> Result<i128, CurveError> {
        Ok(storage::get_state(&env).ok_or(CurveError::NotInitialized)?.reserve)
    }

    pub fn burned_amount(env: Env) -> Result<i128, CurveError> {
        Ok(storage::get_state(&env).ok_or(CurveError::NotInitialized)?.burned)
    }

    pub fn total_supply(env: Env) -> Result<i128, CurveError> {
        let config = storage::get_config(&env).ok_or(CurveError::NotInitialized)?;
        Ok(TokenLedgerClient::new(&env, &config.bond_token).total_supply())
    }

    /// Total supply minus the cumulative burned amount.
    pub fn circulating_supply(env: Env) -> Result<i128, CurveError> {
        let config = storage::get_config(&env).ok_or(CurveError::NotInitialized)?;
        let state = storage::get_state(&env).ok_or(CurveError::NotInitialized)?;
        let supply = TokenLedgerClient::new(&env, &config.bond_token).total_supply();
        supply.checked_sub(state.burned).ok_or(CurveError::Overflow)
    }

    /// Bond tokens parked at the sink (this contract's address). Always
    /// equals `burned_amount`.
    pub fn sink_balance(env: Env) -> Result<i128, CurveError> {
        let config = storage::get_config(&env).ok_or(CurveError::NotInitialized)?;
        Ok(TokenLedgerClient::new(&env, &config.bond_token)
            .balance(&env.current_contract_address()))
    }

    pub fn buy_slope(env: Env) -> Result<i128, CurveError> {
        Ok(storage::get_config(&env).ok_or(CurveError::NotInitialized)?.buy_slope)
    }

    pub fn investment_ratio_bps(env: Env) -> Result<u32, CurveError> {
        Ok(storage::get_config(&env)
            .ok_or(CurveError::NotInitialized)?
            .investment_ratio_bps)
    }

    pub fn distribution_ratio_bps(env: Env) -> Result<u32, CurveError> {
        Ok(storage::get_config(&env)
            .ok_or(CurveError::NotInitialized)?
            .distribution_ratio_bps)
    }

    pub fn organization(env: Env) -> Result<Address, CurveError> {
        Ok(storage::get_config(&env).ok_or(CurveError::NotInitialized)?.organization)
    }
}
