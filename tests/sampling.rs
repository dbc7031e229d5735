use core::num::NonZeroU32;

use dhkex::*;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rand_core::{CryptoRng, OsRng, RngCore};

/// Source that always fails, like a closed `/dev/urandom`.
struct DeadRng;

impl RngCore for DeadRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
    fn next_u64(&mut self) -> u64 {
        0
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
        let code = NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap();
        Err(rand_core::Error::from(code))
    }
}

impl CryptoRng for DeadRng {}

/// Source stuck at all-ones, so every draw above the range width is rejected.
struct StuckRng;

impl RngCore for StuckRng {
    fn next_u32(&mut self) -> u32 {
        u32::MAX
    }
    fn next_u64(&mut self) -> u64 {
        u64::MAX
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0xff);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for StuckRng {}

fn histogram(min: u32, max: u32, draws: usize) -> Vec<u64> {
    let lo = BigUint::from(min);
    let hi = BigUint::from(max);
    let mut counts = vec![0u64; (max - min + 1) as usize];
    for _ in 0..draws {
        let v = sample_range(&mut OsRng, &lo, &hi).unwrap();
        let idx = (v - &lo).to_usize().unwrap();
        counts[idx] += 1;
    }
    counts
}

#[allow(clippy::cast_precision_loss)]
fn chi_squared(counts: &[u64], draws: usize) -> f64 {
    let expected = draws as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum()
}

#[test]
fn full_byte_range_is_uniform() {
    let draws = 256 * 200;
    let counts = histogram(0, 255, draws);
    // df = 255; 400 is far beyond the 1e-6 tail
    let chi2 = chi_squared(&counts, draws);
    assert!(chi2 < 400.0, "chi-squared {chi2} too large");
}

#[test]
#[allow(clippy::cast_precision_loss)]
fn non_power_of_two_range_has_no_modulo_bias() {
    // 200 values in one byte: reducing mod 200 would double the weight of 0..=55
    let draws = 200 * 150;
    let counts = histogram(0, 199, draws);

    let chi2 = chi_squared(&counts, draws);
    assert!(chi2 < 320.0, "chi-squared {chi2} too large");

    let low: u64 = counts[..56].iter().sum();
    let high: u64 = counts[56..].iter().sum();
    let low_mean = low as f64 / 56.0;
    let high_mean = high as f64 / 144.0;
    assert!(low_mean < high_mean * 1.15, "low end favoured: {low_mean} vs {high_mean}");
}

#[test]
fn offset_range_hits_both_endpoints() {
    let counts = histogram(1000, 1005, 3000);
    assert!(counts.iter().all(|&c| c > 0));
}

#[test]
fn degenerate_range_returns_min() {
    let v = BigUint::from(42u32);
    assert_eq!(sample_range(&mut OsRng, &v, &v).unwrap(), v);
    assert_eq!(sample_range_os(&v, &v).unwrap(), v);
}

#[test]
fn inverted_range_is_rejected() {
    let err = sample_range(&mut OsRng, &BigUint::from(10u32), &BigUint::from(9u32)).unwrap_err();
    assert!(matches!(err, KexError::InvalidRange { .. }));
}

#[test]
fn failing_source_surfaces_entropy_error() {
    let err = sample_range(&mut DeadRng, &BigUint::from(1u32), &BigUint::from(100u32)).unwrap_err();
    assert!(matches!(err, KexError::EntropySourceUnavailable(_)));

    let group = DhGroup::from_strs("23", "5").unwrap();
    assert!(matches!(
        run_exchange(&group, &mut DeadRng),
        Err(KexError::EntropySourceUnavailable(_))
    ));
}

#[test]
fn rejection_loop_is_capped() {
    // width 256 needs two bytes; 0xffff is always rejected
    let err = sample_range(&mut StuckRng, &BigUint::from(0u32), &BigUint::from(256u32)).unwrap_err();
    assert!(matches!(err, KexError::EntropySourceUnavailable(_)));
    assert!(MAX_SAMPLING_ATTEMPTS >= 1 << 16);
}
