use crate::app_config::VerbositySetting;
use crate::cli::Args;

pub(crate) fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

pub(crate) fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

pub(crate) fn should_disable_color(no_color_env: bool, dumb_terminal: bool) -> bool {
    no_color_env || dumb_terminal
}

pub(crate) fn is_no_color_requested() -> bool {
    should_disable_color(no_color_env_requested(), is_dumb_terminal())
}

pub(crate) fn should_use_progress(
    stderr_is_terminal: bool,
    suppressed: bool,
    dumb_terminal: bool,
) -> bool {
    stderr_is_terminal && !suppressed && !dumb_terminal
}

/// Priority: `--quiet` > `-v`/`-vv` > config `verbosity` > info.
/// `RUST_LOG`, when set, overrides all of these in [`init_tracing`].
pub(crate) fn resolve_default_log_level(
    args: &Args,
    file_verbosity: Option<VerbositySetting>,
) -> &'static str {
    if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => file_verbosity.map_or("info", VerbositySetting::log_level),
            1 => "debug",
            _ => "trace",
        }
    }
}

pub(crate) fn init_tracing(default_level: &str, no_color: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_env_filter(filter)
        .try_init();
}
