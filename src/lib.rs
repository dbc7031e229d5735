#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! Finite-field Diffie-Hellman key exchange.
//!
//! Two parties draw private exponents uniformly from `[1, p-2]`, publish
//! `g^a mod p`, and each raise the other's public value to their own exponent.
//! Both derivations must agree; a mismatch is reported as
//! [`KexError::SecretMismatch`].

// Fixed choices:
// - Group: 2048-bit safe prime (openssl dhparam), generator 2
// - Exponentiation: right-to-left square-and-multiply
// - Private keys: rejection sampling sized from the range width, OS CSPRNG

pub mod errors;
pub mod codec;
pub mod random;
pub mod modexp;
pub mod group;
pub mod kex;
pub mod config;

pub use errors::KexError;
pub use codec::{to_hex, bytes_to_int, int_to_bytes, hex_to_bytes, parse_uint, byte_len};
pub use random::{sample_range, sample_range_os, MAX_SAMPLING_ATTEMPTS};
pub use modexp::ModExp;
pub use group::DhGroup;
pub use kex::{
    check_agreement, run_exchange, Exchange, ExchangeState, Party, PrivateKey, PrivateRecord,
    PublicKey, PublicRecord, SharedSecret,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
