use soroban_sdk::{contracttype, Address, Env};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day in 5s ledgers
const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days in 5s ledgers

/// Immutable curve parameters, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct CurveConfig {
    pub organization: Address,
    pub reserve_token: Address,
    pub bond_token: Address,
    pub buy_slope: i128,
    pub investment_ratio_bps: u32,
    pub distribution_ratio_bps: u32,
}

/// Mutable numeric state. `reserve` backs redemptions and never exceeds the
/// contract's actual reserve-token balance; `burned` is monotonically
/// non-decreasing.
#[contracttype]
#[derive(Clone, Debug)]
pub struct CurveState {
    pub reserve: i128,
    pub burned: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ReentrancyGuard {
    pub locked: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    State,
    Guard,
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Option<CurveConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &CurveConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_state(env: &Env) -> Option<CurveState> {
    env.storage().instance().get(&DataKey::State)
}

pub fn set_state(env: &Env, state: &CurveState) {
    env.storage().instance().set(&DataKey::State, state);
}

pub fn get_reentrancy_guard(env: &Env) -> ReentrancyGuard {
    env.storage()
        .instance()
        .get(&DataKey::Guard)
        .unwrap_or(ReentrancyGuard { locked: false })
}

pub fn set_reentrancy_guard(env: &Env, guard: &ReentrancyGuard) {
    env.storage().instance().set(&DataKey::Guard, guard);
}

/// Extend instance storage TTL to keep contract alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
