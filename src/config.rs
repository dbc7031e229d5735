//! Command-line configuration for the `dhkex` binary.
//!
//! The group defaults to the embedded 2048-bit reference prime; `--prime` and
//! `--generator` override it with a validated custom group.

use clap::{ArgAction, Args, ValueEnum};
use tracing::level_filters::LevelFilter;
use crate::{errors::KexError, group::DhGroup};

/// Group selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct GroupArgs {
    /// Prime modulus, `0x`-prefixed hex or decimal.
    #[arg(long = "prime")]
    pub prime: Option<String>,

    /// Generator of the multiplicative group.
    #[arg(long = "generator", default_value = "2")]
    pub generator: String,

    /// Additionally require `(p-1)/2` to be prime.
    #[arg(long = "require-safe-prime")]
    pub require_safe_prime: bool,
}

impl GroupArgs {
    /// Build the configured group, or the reference group when no prime is given.
    ///
    /// # Errors
    ///
    /// Returns `KexError` if the prime or generator fail to parse or validate.
    pub fn into_group(self) -> Result<DhGroup, KexError> {
        let group = match self.prime {
            Some(prime) => DhGroup::from_strs(&prime, &self.generator)?,
            None => DhGroup::reference(),
        };
        if self.require_safe_prime && !group.is_safe_prime() {
            return Err(KexError::InvalidModulus("modulus is not a safe prime"));
        }
        Ok(group)
    }
}

/// Record output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `SentPublicly { .. }` / `PrivateValues { .. }` lines.
    #[default]
    Text,
    /// One JSON object per record.
    Json,
}

/// Output and repetition.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct RunArgs {
    /// Record output format.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Number of independent exchanges to run; each emits both records.
    #[arg(long = "rounds", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct LoggingArgs {
    /// Increase logging verbosity (`-v` info, `-vv` debug, `-vvv` trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

impl LoggingArgs {
    #[inline]
    #[must_use]
    pub const fn level_filter(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
