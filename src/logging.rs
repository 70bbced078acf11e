use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `GRAPHWALK_LOG=graphwalk=trace`.
pub const LOG_ENV: &str = "GRAPHWALK_LOG";

/// Filter directive for a `-v` count: warn, info, debug, then trace.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "graphwalk=warn",
        1 => "graphwalk=info",
        2 => "graphwalk=debug",
        _ => "graphwalk=trace",
    }
}

/// Installs a compact stderr subscriber. [`LOG_ENV`] wins over `verbosity`.
pub fn init_tracing(verbosity: u8) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}
