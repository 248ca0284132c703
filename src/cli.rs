//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Back up every artifact of a Nexus repository to local disk.
///
/// Connection settings not given on the command line are read from
/// `$XDG_CONFIG_HOME/nexus-backup/config.toml` (or `~/.config/nexus-backup/config.toml`).
#[derive(Parser, Debug)]
#[command(name = "nexus-backup")]
#[command(author, version, about)]
pub struct Args {
    /// Repository to back up
    #[arg(short = 'r', long)]
    pub repository: String,

    /// Nexus base URL, e.g. https://nexus.example.com
    #[arg(short = 'n', long)]
    pub url: Option<String>,

    /// Nexus user name
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Nexus password
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// REST API version [default: v1]
    #[arg(short = 'a', long)]
    pub api_version: Option<String>,

    /// Directory the `<repository>/...` tree is written under [default: download]
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Stop at the first artifact that fails instead of skipping it
    #[arg(long)]
    pub fail_fast: bool,

    /// Check the service health endpoint before starting
    #[arg(long)]
    pub ping: bool,

    /// Do not draw progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// HTTP connect timeout in seconds (1-3600) [default: 30]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// HTTP read timeout in seconds (1-3600) [default: 300]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: Option<u64>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_repository_only_parses_with_defaults() {
        let args = Args::try_parse_from(["nexus-backup", "-r", "releases"]).unwrap();
        assert_eq!(args.repository, "releases");
        assert!(args.url.is_none());
        assert!(args.api_version.is_none());
        assert!(args.output_dir.is_none());
        assert!(!args.fail_fast);
        assert!(!args.ping);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_missing_repository_rejected() {
        let err = Args::try_parse_from(["nexus-backup"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_connection_flags() {
        let args = Args::try_parse_from([
            "nexus-backup",
            "--repository",
            "maven-releases",
            "--url",
            "https://nexus.example.com",
            "-u",
            "admin",
            "-p",
            "admin123",
            "-a",
            "beta",
            "-o",
            "/backups",
        ])
        .unwrap();
        assert_eq!(args.url.as_deref(), Some("https://nexus.example.com"));
        assert_eq!(args.user.as_deref(), Some("admin"));
        assert_eq!(args.password.as_deref(), Some("admin123"));
        assert_eq!(args.api_version.as_deref(), Some("beta"));
        assert_eq!(args.output_dir, Some(PathBuf::from("/backups")));
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["nexus-backup", "-r", "x", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        let err = Args::try_parse_from(["nexus-backup", "-r", "x", "-q", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_cli_behavior_flags() {
        let args = Args::try_parse_from([
            "nexus-backup",
            "-r",
            "x",
            "--fail-fast",
            "--ping",
            "--no-progress",
        ])
        .unwrap();
        assert!(args.fail_fast);
        assert!(args.ping);
        assert!(args.no_progress);
    }

    #[test]
    fn test_cli_timeout_range_enforced() {
        let args =
            Args::try_parse_from(["nexus-backup", "-r", "x", "--connect-timeout", "5"]).unwrap();
        assert_eq!(args.connect_timeout, Some(5));

        let err = Args::try_parse_from(["nexus-backup", "-r", "x", "--read-timeout", "0"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Args::try_parse_from(["nexus-backup", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
