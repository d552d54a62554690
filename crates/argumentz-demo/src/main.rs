use anyhow::{Context, Result};
use argumentz::{Match, Parser};
use std::env::{self, VarError};
use std::io::{self, Write};
use tracing_subscriber::{EnvFilter, fmt};

/// Overrides the built-in `guest` default of `--user`.
const USER_ENV: &str = "ARGUMENTZ_USER";

fn parser() -> Parser {
    Parser::builder()
        .with_program("argumentz-demo")
        .with_param_or_try_else('u', "user", "username to connect to the server", || {
            match env::var(USER_ENV) {
                Err(VarError::NotPresent) => Ok("guest".to_string()),
                other => other,
            }
        })
        .with_mapped_param_or_else(
            'p',
            "port",
            "port for server to listen",
            |s| s.parse::<u16>(),
            || 8080,
        )
        .with_mapped_param('s', "seconds", "timeout in seconds", |s| s.parse::<i64>())
        .with_param('h', "host", "host for client to connect to")
        .with_flag('v', "verbose", "enable extra logging")
        .with_flag('j', "json", "print all matched values as JSON")
        .with_error_handler(|err, parser| {
            if let Err(io_err) = parser.print_usage(&mut io::stderr()) {
                tracing::warn!(error = %io_err, "failed to print usage");
            }
            Err(err)
        })
        .build()
}

fn main() -> Result<()> {
    init_tracing();
    let args: Vec<String> = env::args().skip(1).collect();
    tracing::debug!(?args, "parsing command line");

    let parser = parser();
    let m = parser.match_args(&args)?;
    if m.get_flag("verbose") {
        tracing::info!("verbose output enabled");
    }

    let mut out = io::stdout().lock();
    if m.get_flag("json") {
        let json = serde_json::to_string_pretty(&m.all())?;
        writeln!(out, "{json}")?;
    } else {
        print_summary(&mut out, &m)?;
    }
    Ok(())
}

fn print_summary<W: Write>(out: &mut W, m: &Match<'_>) -> Result<()> {
    let user = m.get("user")?.context("user is declared")?;
    let port = m.get_int("port")?.context("port is declared")?;
    let seconds = m.get_int("seconds")?.context("seconds is declared")?;
    let host = m.get("host")?.context("host is declared")?;
    writeln!(out, "user={user}")?;
    writeln!(out, "port={port}")?;
    writeln!(out, "seconds={seconds}")?;
    writeln!(out, "host={host}")?;
    writeln!(out, "verbose={}", m.get_flag("verbose"))?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
