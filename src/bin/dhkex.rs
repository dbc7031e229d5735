use std::process::ExitCode;

use clap::Parser;
use dhkex::{
    config::{GroupArgs, LoggingArgs, OutputFormat, RunArgs},
    run_exchange, Exchange, KexError,
};
use rand_core::OsRng;
use serde_json::json;
use tracing::{error, info};

/// Run a two-party Diffie-Hellman exchange and print both records.
#[derive(Debug, Parser)]
#[command(name = "dhkex", version, about)]
struct Cli {
    #[command(flatten)]
    group: GroupArgs,

    #[command(flatten)]
    run: RunArgs,

    #[command(flatten)]
    logging: LoggingArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.logging.level_filter())
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "key exchange failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), KexError> {
    let RunArgs { format, rounds } = cli.run;
    let group = cli.group.into_group()?;
    info!(bits = group.prime().bits(), rounds, "group loaded");

    for round in 1..=rounds {
        let exchange = run_exchange(&group, &mut OsRng)?;
        info!(round, "shared secrets agree");
        emit(&exchange, format)?;
    }
    Ok(())
}

fn emit(exchange: &Exchange, format: OutputFormat) -> Result<(), KexError> {
    let public = exchange.public_record();
    let private = exchange.private_record();
    match format {
        OutputFormat::Text => {
            println!(
                "SentPublicly {{ p: '{}', g: '{}', A: '{}', B: '{}' }}",
                public.p, public.g, public.a_pub, public.b_pub
            );
            println!(
                "PrivateValues {{ a: '{}', b: '{}', secret: '{}' }}",
                private.a, private.b, private.secret
            );
        }
        OutputFormat::Json => {
            for line in [
                json!({ "kind": "SentPublicly", "record": public }),
                json!({ "kind": "PrivateValues", "record": private }),
            ] {
                println!("{}", serde_json::to_string(&line)?);
            }
        }
    }
    Ok(())
}
