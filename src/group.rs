use hex_literal::hex;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use crate::{codec::parse_uint, errors::KexError, modexp::ModExp};

/// 2048-bit safe prime from `openssl dhparam 2048`, big-endian.
pub const REFERENCE_PRIME: [u8; 256] = hex!(
    "c530e4638435bbe38d68db0a6bce95fdc7a771518b94be1d811a71cca5cf7b0f"
    "37c80025d78cad7ef35e4d1ac475d199a98f22bb535b87c709a89c10f8089c63"
    "f9f4081bb8ca31b2228f76366e6643dffb8d2a59512a81d7c6371953157c5db4"
    "984ab6643d3986a1407dcbac33f9490ada65f136267add91ce3d524b77d13f6b"
    "f1cd834db7c1e0238e977b8c09c271039922c6214ff317e71293e78fa383785f"
    "254f268041cbf4091d225e80826af8864b432e045174728cc542f869f661a3c8"
    "b2fa433e51cdbf09e8bd557eff4a44afcaa578eb89d7e16933b70303caa6acc1"
    "1d17b2662e06c78bda9253aee14493d3da4e25659e900de8697245ef11a173ff"
);
pub const REFERENCE_GENERATOR: u32 = 2;
pub const REFERENCE_PRIME_BITS: u64 = 2048;

// Miller-Rabin witnesses
const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// A finite-field Diffie-Hellman group `(p, g)`.
#[derive(Debug, Clone)]
pub struct DhGroup {
    p: BigUint,
    g: BigUint,
    exp: ModExp,
}

impl DhGroup {
    /// The embedded 2048-bit group with generator 2.
    #[must_use]
    pub fn reference() -> Self {
        let p = BigUint::from_bytes_be(&REFERENCE_PRIME);
        let g = BigUint::from(REFERENCE_GENERATOR);
        let exp = ModExp::new_unchecked(p.clone());
        Self { p, g, exp }
    }

    /// Validate and build a group.
    ///
    /// # Errors
    ///
    /// Returns `KexError::InvalidModulus` if `p` is even, below 5, or composite,
    /// and `KexError::InvalidGenerator` if `g` lies outside `[2, p-2]`.
    pub fn new(p: BigUint, g: BigUint) -> Result<Self, KexError> {
        if p < BigUint::from(5u32) {
            return Err(KexError::InvalidModulus("modulus must be at least 5"));
        }
        if !p.bit(0) {
            return Err(KexError::InvalidModulus("modulus must be odd"));
        }
        let exp = ModExp::new(p.clone())?;
        if !is_probable_prime(&p) {
            return Err(KexError::InvalidModulus("modulus is composite"));
        }
        let two = BigUint::from(2u32);
        if g < two || g > &p - &two {
            return Err(KexError::InvalidGenerator);
        }
        Ok(Self { p, g, exp })
    }

    /// Parse a modulus (`0x` hex or decimal) and a generator, then validate.
    ///
    /// # Errors
    ///
    /// Returns `KexError::Parse` on malformed input, otherwise as [`DhGroup::new`].
    pub fn from_strs(prime: &str, generator: &str) -> Result<Self, KexError> {
        Self::new(parse_uint(prime)?, parse_uint(generator)?)
    }

    #[must_use]
    pub const fn prime(&self) -> &BigUint {
        &self.p
    }

    #[must_use]
    pub const fn generator(&self) -> &BigUint {
        &self.g
    }

    #[must_use]
    pub const fn exp(&self) -> &ModExp {
        &self.exp
    }

    /// Private keys are drawn from `[1, p-2]`.
    #[must_use]
    pub fn private_key_bounds(&self) -> (BigUint, BigUint) {
        (BigUint::one(), &self.p - 2u32)
    }

    /// True when `(p-1)/2` is also a probable prime.
    #[must_use]
    pub fn is_safe_prime(&self) -> bool {
        let q: BigUint = (&self.p - 1u32) >> 1u32;
        is_probable_prime(&q)
    }

    /// Reject peer values outside `(1, p-1)`; those would pin the shared secret.
    ///
    /// # Errors
    ///
    /// Returns `KexError::InvalidPublicKey` when `y <= 1` or `y >= p-1`.
    pub fn validate_public_key(&self, y: &BigUint) -> Result<(), KexError> {
        if y <= &BigUint::one() || y >= &(&self.p - 1u32) {
            return Err(KexError::InvalidPublicKey);
        }
        Ok(())
    }
}

/// Miller-Rabin over the fixed witness set.
fn is_probable_prime(n: &BigUint) -> bool {
    if n < &BigUint::from(4u32) {
        return n >= &BigUint::from(2u32);
    }
    if !n.bit(0) {
        return false;
    }
    let exp = ModExp::new_unchecked(n.clone());
    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for w in WITNESSES {
        let a = BigUint::from(w) % n;
        if a.is_zero() {
            continue;
        }
        let mut x = exp.pow(&a, &d);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
