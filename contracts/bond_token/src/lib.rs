#![cfg_attr(not(test), no_std)]

#[cfg(test)]
extern crate std;

mod errors;
mod storage;


use soroban_sdk::{contract, contractimpl, Address, Env, String};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};

use errors::BondTokenError;

/// Fungible bond token administered by the curve contract.
///
/// Only the admin may create or destroy units; holders move their own
/// balances with `transfer`. Total supply is tracked explicitly so the
/// curve can read it when evaluating the bonding curve.
#[contract]
pub struct BondToken;

#[contractimpl]
impl BondToken {
    /// Sets the admin and token metadata. Callable exactly once; the admin
    /// is fixed for the life of the contract.
    pub fn initialize(
        env: Env,
        admin: Address,
        decimal: u32,
        name: String,
        symbol: String,
    ) -> Result<(), BondTokenError> {
        if storage::has_admin(&env) {
            return Err(BondTokenError::AlreadyInitialized);
        }

        storage::set_admin(&env, &admin);
        storage::set_total_supply(&env, 0);
        TokenUtils::new(&env)
            .metadata()
            .set_metadata(&TokenMetadata { decimal, name, symbol });

        Ok(())
    }

    /// Creates `amount` new units for `to`. Admin only.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), BondTokenError> {
        let admin = storage::get_admin(&env).ok_or(BondTokenError::NotInitialized)?;
        admin.require_auth();

        if amount <= 0 {
            return Err(BondTokenError::InvalidAmount);
        }

        storage::extend_instance_ttl(&env);

        let balance = storage::get_balance(&env, &to)
            .checked_add(amount)
            .ok_or(BondTokenError::Overflow)?;
        storage::set_balance(&env, &to, balance);

        let supply = storage::get_total_supply(&env)
            .checked_add(amount)
            .ok_or(BondTokenError::Overflow)?;
        storage::set_total_supply(&env, supply);

        TokenUtils::new(&env).events().mint(admin, to, amount);
        Ok(())
    }

    /// Destroys `amount` units held by `from`, reducing total supply.
    /// Admin only; the curve invokes this during redemption after the
    /// holder has authorized the outer call.
    pub fn burn_from(env: Env, from: Address, amount: i128) -> Result<(), BondTokenError> {
        let admin = storage::get_admin(&env).ok_or(BondTokenError::NotInitialized)?;
        admin.require_auth();

        if amount <= 0 {
            return Err(BondTokenError::InvalidAmount);
        }

        storage::extend_instance_ttl(&env);

        let balance = storage::get_balance(&env, &from);
        if balance < amount {
            return Err(BondTokenError::InsufficientBalance);
        }
        storage::set_balance(&env, &from, balance - amount);

        // Per-holder balances are bounded by supply, so this cannot underflow.
        let supply = storage::get_total_supply(&env)
            .checked_sub(amount)
            .ok_or(BondTokenError::Overflow)?;
        storage::set_total_supply(&env, supply);

        TokenUtils::new(&env).events().burn(from, amount);
        Ok(())
    }

    /// Moves `amount` units from `from` to `to`. Supply is unchanged.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), BondTokenError> {
        from.require_auth();

        if amount <= 0 {
            return Err(BondTokenError::InvalidAmount);
        }

        storage::extend_instance_ttl(&env);

        let from_balance = storage::get_balance(&env, &from);
        if from_balance < amount {
            return Err(BondTokenError::InsufficientBalance);
        }
        let to_balance = storage::get_balance(&env, &to)
            .checked_add(amount)
            .ok_or(BondTokenError::Overflow)?;

        storage::set_balance(&env, &from, from_balance - amount);
        storage::set_balance(&env, &to, to_balance);

        TokenUtils::new(&env).events().transfer(from, to, amount);
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::get_balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::get_total_supply(&env)
    }

    pub fn decimals(env: Env) -> u32 {
        TokenUtils::new(&env).metadata().get_metadata().decimal
    }

    pub fn name(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().name
    }

    pub fn symbol(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().symbol
    }
}
