use num_bigint::BigUint;
use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::trace;
use crate::{codec::{byte_len, bytes_to_int, to_hex}, errors::KexError};

/// Upper bound on rejected draws before the source is treated as broken.
/// Acceptance per draw is always above 1/256, so an honest source never gets here.
pub const MAX_SAMPLING_ATTEMPTS: u32 = 1 << 16;

/// Draw a uniform integer from the closed interval `[min, max]` by rejection sampling.
///
/// The draw width is sized from `max - min`, not from `max`.
///
/// # Errors
///
/// Returns `KexError::InvalidRange` if `min > max`, and
/// `KexError::EntropySourceUnavailable` if the source fails or every attempt is rejected.
pub fn sample_range<R: RngCore + CryptoRng>(
    rng: &mut R,
    min: &BigUint,
    max: &BigUint,
) -> Result<BigUint, KexError> {
    if min > max {
        return Err(KexError::InvalidRange { min: to_hex(min, true), max: to_hex(max, true) });
    }
    let range = max - min;
    let mut buf = vec![0u8; byte_len(&range)];

    for attempt in 1..=MAX_SAMPLING_ATTEMPTS {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| KexError::EntropySourceUnavailable(e.to_string()))?;
        let candidate = bytes_to_int(&buf);
        if candidate <= range {
            trace!(attempt, "range sample accepted");
            return Ok(candidate + min);
        }
    }

    Err(KexError::EntropySourceUnavailable(format!(
        "no sample accepted after {MAX_SAMPLING_ATTEMPTS} attempts"
    )))
}

/// [`sample_range`] against the operating system's CSPRNG.
///
/// # Errors
///
/// Same as [`sample_range`].
pub fn sample_range_os(min: &BigUint, max: &BigUint) -> Result<BigUint, KexError> {
    sample_range(&mut OsRng, min, max)
}
