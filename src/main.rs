// src/main.rs
use clap::Parser;
use dbglog::utils::logging::setup_logging;
use dbglog::{call_site, enter, err, inf, leave, out, record, throw, wrn, DbgArgs, Level, LogError, Logger, ReplayFilter};

/// Demo driver: writes sample lines through a logger built from --dbg-* flags
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    dbg: DbgArgs,

    /// Number of sample records to buffer and replay
    #[arg(long, default_value = "3")]
    records: u32,

    /// Finish by draining buffered messages and exiting with status 1
    #[arg(long)]
    fail: bool,
}

fn samples(log: &mut Logger) -> Result<(), LogError> {
    let level = log.level_name();
    enter!(log, "level={}", level)?;
    out!(log, "out test")?;
    wrn!(log, "warning test")?;
    err!(log, "error test")?;
    inf!(log, "info test")?;
    dbglog::dbg!(log, "debug test")?;
    leave!(log)?;
    Ok(())
}

fn parse_record(log: &mut Logger, n: u32) -> Result<u32, LogError> {
    enter!(log, "{}", n)?;
    record!(log, if n % 2 == 0 { Level::Wrn } else { Level::Inf }, "record {} buffered", n);
    if n > 100 {
        let e = throw!(log, format!("record {} out of range", n), "parse_record gave up");
        return Err(LogError::Config(e.to_string()));
    }
    leave!(log, "ok")?;
    Ok(n * 2)
}

fn main() -> Result<(), LogError> {
    // 1. Setup the crate's own diagnostics (reads RUST_LOG env var)
    setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting demo with args: {:?}", args);

    // 3. Build the logger
    let config = args.dbg.into_config()?;
    let mut log = Logger::new(config)?;

    // 4. One line per level
    samples(&mut log)?;

    // 5. Buffer some records, then replay them
    for n in 0..args.records {
        parse_record(&mut log, n)?;
    }
    if log.has_messages() {
        let replay = ReplayFilter::new().file_func_line(log.config().file_func_line);
        log.drain(call_site!(), Some("buffered records:"), Some(&replay))?;
    }

    if args.fail {
        log.exit_with_messages(call_site!(), Some("demo asked to fail"));
    }

    log.close()
}
