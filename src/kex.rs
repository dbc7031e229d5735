use core::fmt;
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use serde::Serialize;
use tracing::{debug, error};
use crate::{codec::to_hex, errors::KexError, group::DhGroup, random::sample_range};

/// Secret exponent. Never leaves the party that drew it.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(BigUint);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(pub BigUint);

#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(BigUint);

impl PrivateKey {
    /// Wrap an explicit exponent, e.g. for known-answer tests.
    #[must_use]
    pub const fn from_exponent(a: BigUint) -> Self {
        Self(a)
    }

    #[must_use]
    pub const fn expose(&self) -> &BigUint {
        &self.0
    }
}

impl SharedSecret {
    #[must_use]
    pub const fn expose(&self) -> &BigUint {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// One side of the exchange: a private exponent and its public value.
#[derive(Debug, Clone)]
pub struct Party {
    private: PrivateKey,
    public: PublicKey,
}

impl Party {
    /// Draw a private key uniformly from `[1, p-2]` and derive `g^a mod p`.
    ///
    /// # Errors
    ///
    /// Returns `KexError::EntropySourceUnavailable` if the rng fails.
    pub fn generate<R: RngCore + CryptoRng>(group: &DhGroup, rng: &mut R) -> Result<Self, KexError> {
        let (min, max) = group.private_key_bounds();
        let a = sample_range(rng, &min, &max)?;
        Ok(Self::from_private(group, PrivateKey(a)))
    }

    #[must_use]
    pub fn from_private(group: &DhGroup, private: PrivateKey) -> Self {
        let public = PublicKey(group.exp().pow(group.generator(), &private.0));
        Self { private, public }
    }

    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public
    }

    #[must_use]
    pub const fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// `peer^a mod p` after checking the peer value is in range.
    ///
    /// # Errors
    ///
    /// Returns `KexError::InvalidPublicKey` if `peer` is outside `(1, p-1)`.
    pub fn agree(&self, group: &DhGroup, peer: &PublicKey) -> Result<SharedSecret, KexError> {
        group.validate_public_key(&peer.0)?;
        Ok(self.compute_secret(group, peer))
    }

    // Both sides are local in `run_exchange`, so the peer range check is skipped there.
    fn compute_secret(&self, group: &DhGroup, peer: &PublicKey) -> SharedSecret {
        SharedSecret(group.exp().pow(&peer.0, &self.private.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    Start,
    KeysGenerated,
    PublicKeysDerived,
    SecretsComputed,
    Verified,
    Aborted,
}

impl fmt::Display for ExchangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::KeysGenerated => "keys-generated",
            Self::PublicKeysDerived => "public-keys-derived",
            Self::SecretsComputed => "secrets-computed",
            Self::Verified => "verified",
            Self::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

/// Values that cross the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicRecord {
    pub p: String,
    pub g: String,
    #[serde(rename = "A")]
    pub a_pub: String,
    #[serde(rename = "B")]
    pub b_pub: String,
}

/// Values that would stay private outside of a demonstration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrivateRecord {
    pub a: String,
    pub b: String,
    pub secret: String,
}

/// Outcome of a verified two-party exchange.
#[derive(Debug, Clone)]
pub struct Exchange {
    group: DhGroup,
    alice: Party,
    bob: Party,
    secret: SharedSecret,
}

impl Exchange {
    #[must_use]
    pub const fn alice(&self) -> &Party {
        &self.alice
    }

    #[must_use]
    pub const fn bob(&self) -> &Party {
        &self.bob
    }

    #[must_use]
    pub const fn secret(&self) -> &SharedSecret {
        &self.secret
    }

    #[must_use]
    pub fn public_record(&self) -> PublicRecord {
        PublicRecord {
            p: to_hex(self.group.prime(), true),
            g: to_hex(self.group.generator(), true),
            a_pub: to_hex(&self.alice.public.0, true),
            b_pub: to_hex(&self.bob.public.0, true),
        }
    }

    #[must_use]
    pub fn private_record(&self) -> PrivateRecord {
        PrivateRecord {
            a: to_hex(&self.alice.private.0, true),
            b: to_hex(&self.bob.private.0, true),
            secret: to_hex(&self.secret.0, true),
        }
    }
}

fn advance(state: &mut ExchangeState, next: ExchangeState) {
    let from = *state;
    debug!(%from, to = %next, "exchange state");
    *state = next;
}

/// Run both sides of the exchange in sequence and check that they agree.
///
/// # Errors
///
/// Returns `KexError::EntropySourceUnavailable` if key sampling fails and
/// `KexError::SecretMismatch` if the two derived secrets differ.
pub fn run_exchange<R: RngCore + CryptoRng>(group: &DhGroup, rng: &mut R) -> Result<Exchange, KexError> {
    let mut state = ExchangeState::Start;

    let (min, max) = group.private_key_bounds();
    let a = PrivateKey(sample_range(rng, &min, &max)?);
    let b = PrivateKey(sample_range(rng, &min, &max)?);
    advance(&mut state, ExchangeState::KeysGenerated);

    let alice = Party::from_private(group, a);
    let bob = Party::from_private(group, b);
    advance(&mut state, ExchangeState::PublicKeysDerived);

    let alice_secret = alice.compute_secret(group, &bob.public);
    let bob_secret = bob.compute_secret(group, &alice.public);
    advance(&mut state, ExchangeState::SecretsComputed);

    verify_agreement(&mut state, &alice_secret, &bob_secret)?;

    Ok(Exchange { group: group.clone(), alice, bob, secret: alice_secret })
}

fn verify_agreement(
    state: &mut ExchangeState,
    ours: &SharedSecret,
    theirs: &SharedSecret,
) -> Result<(), KexError> {
    if ours != theirs {
        advance(state, ExchangeState::Aborted);
        error!("derived shared secrets differ");
        return Err(KexError::SecretMismatch);
    }
    advance(state, ExchangeState::Verified);
    Ok(())
}

/// Compare two independently derived secrets.
///
/// # Errors
///
/// Returns `KexError::SecretMismatch` when they differ.
pub fn check_agreement(ours: &SharedSecret, theirs: &SharedSecret) -> Result<(), KexError> {
    let mut state = ExchangeState::SecretsComputed;
    verify_agreement(&mut state, ours, theirs)
}
