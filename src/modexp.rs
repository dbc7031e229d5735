use num_bigint::BigUint;
use num_traits::One;
use crate::errors::KexError;

/// Modular exponentiation bound to a single modulus.
#[derive(Debug, Clone)]
pub struct ModExp {
    modulus: BigUint,
}

impl ModExp {
    /// # Errors
    ///
    /// Returns `KexError::InvalidModulus` unless `modulus > 1`.
    pub fn new(modulus: BigUint) -> Result<Self, KexError> {
        if modulus <= BigUint::one() {
            return Err(KexError::InvalidModulus("modulus must exceed 1"));
        }
        Ok(Self { modulus })
    }

    /// Caller guarantees `modulus > 1`.
    pub(crate) const fn new_unchecked(modulus: BigUint) -> Self {
        Self { modulus }
    }

    #[must_use]
    pub const fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// `base^exponent mod m`, right-to-left square-and-multiply.
    #[must_use]
    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        let m = &self.modulus;
        let mut result = BigUint::one();
        let mut base = base % m;

        for i in 0..exponent.bits() {
            if exponent.bit(i) {
                result = (&result * &base) % m;
            }
            base = (&base * &base) % m;
        }
        result
    }
}
