use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CurveError {
    AlreadyInitialized = 101,
    NotInitialized = 102,
    Locked = 103,
    ZeroBuySlope = 104,
    InvalidRatio = 105,
    ZeroAddress = 106,
    ZeroValue = 107,
    ZeroAmount = 108,
    InvalidCalculation = 109,
    AmountTooSmall = 110,
    OnlyOrganization = 111,
    InsufficientBalance = 112,
    ExceedsTotalSupply = 113,
    InsufficientReserve = 114,
    ZeroProceeds = 115,
    InsufficientContractBalance = 116,
    TransferFailed = 117,
    Overflow = 118,
}
