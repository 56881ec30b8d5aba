use soroban_sdk::Env;

use crate::{
    errors::CurveError,
    storage::{get_reentrancy_guard, set_reentrancy_guard, ReentrancyGuard},
};

/// Acquires the reentrancy lock. Reverts with `Locked` if already held.
///
/// Every state-mutating entry point takes the lock before touching the
/// ledger, so a payout that invokes caller-controlled code cannot re-enter
/// mid-settlement. Because Soroban rolls back all state on a failed
/// invocation, the lock is automatically cleared if the outer call reverts.
pub fn acquire(env: &Env) -> Result<(), CurveError> {
    let guard = get_reentrancy_guard(env);
    if guard.locked {
        return Err(CurveError::Locked);
    }
    set_reentrancy_guard(env, &ReentrancyGuard { locked: true });
    Ok(())
}

/// Releases the reentrancy lock after all effects and transfers complete.
///
/// Only called on the happy path; error paths rely on Soroban's atomic
/// state rollback to reset the lock automatically.
pub fn release(env: &Env) {
    set_reentrancy_guard(env, &ReentrancyGuard { locked: false });
}
