use soroban_sdk::{Env, U256};

use crate::errors::CurveError;

/// Ratio denominator: 10_000 basis points = 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Computes `floor(x * y / denom)` with the intermediate product carried in
/// a 256-bit host integer, so `x * y` may exceed `i128::MAX` without
/// failing as long as the quotient fits.
///
/// All inputs must be non-negative and `denom` must be positive; violations
/// and unrepresentable quotients report `Overflow`.
pub fn mul_div(env: &Env, x: i128, y: i128, denom: i128) -> Result<i128, CurveError> {
    if x < 0 || y < 0 || denom <= 0 {
        return Err(CurveError::Overflow);
    }

    let product = U256::from_u128(env, x as u128).mul(&U256::from_u128(env, y as u128));
    let quotient = product.div(&U256::from_u128(env, denom as u128));

    let quotient = quotient.to_u128().ok_or(CurveError::Overflow)?;
    i128::try_from(quotient).map_err(|_| CurveError::Overflow)
}

/// Integer floor square root: the largest `s` with `s * s <= n`.
///
/// Newton iteration on integers; converges monotonically from an initial
/// guess that is always >= the true root. Bit-exact across platforms —
/// never replace this with a floating-point approximation.
pub fn sqrt(n: u128) -> u128 {
    // Below 4 the initial guess may equal n (e.g. n = 2 gives z = y = 2)
    // and the loop would never refine it; the root is 0 or 1 here anyway.
    if n < 4 {
        return (n > 0) as u128;
    }

    // For n >= 4, n / 2 + 1 is >= sqrt(n) and < n, so the loop always
    // runs; the + 1 form also avoids overflowing at u128::MAX.
    let mut z = n / 2 + 1;
    let mut y = n;

    while z < y {
        y = z;
        z = (n / z + z) / 2;
    }

    y
}
