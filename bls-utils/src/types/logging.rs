use std::{env, sync::Once};

use tracing_subscriber::EnvFilter;

static LOG_INIT: Once = Once::new();

/// Install a global `tracing` subscriber filtered by `RUST_LOG`.
///
/// Set `RUST_LOG_FORMAT=json` for JSON lines; `NO_COLOR` turns off ANSI
/// colours. Only the first call has an effect.
pub fn init_logging() {
    LOG_INIT.call_once(|| {
        let filter = EnvFilter::from_default_env();
        let res = if json_output() {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .try_init()
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(use_color())
                .try_init()
        };
        if let Err(err) = res {
            eprintln!("tracing subscriber already installed: {err}");
        }
    });
}

fn json_output() -> bool {
    env::var("RUST_LOG_FORMAT").is_ok_and(|v| v == "json")
}

fn use_color() -> bool {
    env::var("NO_COLOR").map(|v| v.is_empty()).unwrap_or(true)
}
