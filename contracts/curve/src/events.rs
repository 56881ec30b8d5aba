use soroban_sdk::{symbol_short, Address, Env};

pub struct CurveEvents;

impl CurveEvents {
    /// Emits a `buy` event after a successful curve purchase.
    ///
    /// Topics: `("buy", buyer)`
    /// Data:   `(minted, payment)`
    pub fn buy(env: &Env, buyer: &Address, minted: i128, payment: i128) {
        env.events().publish((symbol_short!("buy"), buyer), (minted, payment));
    }

    /// Emits a `sell` event after a successful redemption.
    ///
    /// Topics: `("sell", seller)`
    /// Data:   `(amount, proceeds)`
    pub fn sell(env: &Env, seller: &Address, amount: i128, proceeds: i128) {
        env.events().publish((symbol_short!("sell"), seller), (amount, proceeds));
    }

    pub fn rebuy(env: &Env, organization: &Address, minted: i128, payment: i128) {
        env.events().publish((symbol_short!("rebuy"), organization), (minted, payment));
    }

    /// Emits a `pay` event after a revenue payment.
    ///
    /// Topics: `("pay", payer)`
    /// Data:   `(minted, payment, recipient)` — `recipient` is the identity
    /// the minted tokens were credited to (the organization when the payer
    /// named none).
    pub fn pay(env: &Env, payer: &Address, recipient: &Address, minted: i128, payment: i128) {
        env.events().publish(
            (symbol_short!("pay"), payer),
            (minted, payment, recipient.clone()),
        );
    }

    /// Emits a `burn` event after tokens move to the sink. The value leg of
    /// a burn is always zero; it is carried anyway so indexers see a uniform
    /// `(token_amount, value_amount)` payload across all five operations.
    pub fn burn(env: &Env, holder: &Address, amount: i128) {
        env.events().publish((symbol_short!("burn"), holder), (amount, 0_i128));
    }
}
