use soroban_sdk::{contracttype, Address, Env};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day in 5s ledgers
const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days in 5s ledgers

const BALANCE_LIFETIME_THRESHOLD: u32 = 17280;
const BALANCE_BUMP_AMOUNT: u32 = 518400;

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Admin,
    TotalSupply,
    Balance(Address),
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_total_supply(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::TotalSupply).unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

/// Reads a holder's balance, bumping the entry's TTL if it exists.
/// Missing entries read as zero.
pub fn get_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    if let Some(balance) = env.storage().persistent().get(&key) {
        env.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
        balance
    } else {
        0
    }
}

pub fn set_balance(env: &Env, id: &Address, balance: i128) {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().set(&key, &balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

/// Extend instance storage TTL to keep contract alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
