use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum BondTokenError {
    AlreadyInitialized = 201,
    NotInitialized = 202,
    InvalidAmount = 203,
    InsufficientBalance = 204,
    Overflow = 205,
}
