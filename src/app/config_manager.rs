//! Configuration lifecycle: merge CLI flags over file config into a run setup.

use anyhow::{Context, Result, bail};

use nexus_backup::repository::{
    CONNECT_TIMEOUT_SECS, Credentials, DEFAULT_API_VERSION, READ_TIMEOUT_SECS, RepositoryTarget,
};
use nexus_backup::{BackupOptions, FailurePolicy};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Args;

/// HTTP timeout settings in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HttpTimeouts {
    pub(crate) connect_secs: u64,
    pub(crate) read_secs: u64,
}

/// Everything a backup run needs, with CLI values taking precedence over the file.
#[derive(Debug)]
pub(crate) struct ResolvedConfig {
    pub(crate) target: RepositoryTarget,
    pub(crate) timeouts: HttpTimeouts,
    pub(crate) options: BackupOptions,
    pub(crate) file_verbosity: Option<VerbositySetting>,
}

/// Merges `args` over `file` and validates the result.
pub(crate) fn resolve_config(args: &Args, file: Option<&FileConfig>) -> Result<ResolvedConfig> {
    let url = args
        .url
        .clone()
        .or_else(|| file.and_then(|cfg| cfg.url.clone()));
    let user = args
        .user
        .clone()
        .or_else(|| file.and_then(|cfg| cfg.user.clone()));
    let password = args
        .password
        .clone()
        .or_else(|| file.and_then(|cfg| cfg.password.clone()));
    let api_version = args
        .api_version
        .clone()
        .or_else(|| file.and_then(|cfg| cfg.api_version.clone()))
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

    let (Some(url), Some(user), Some(password)) = (url, user, password) else {
        bail!(
            "Missing connection settings: --url, --user and --password are required \
             (or set url, user and password in the config file)"
        );
    };

    let target = RepositoryTarget::new(
        &url,
        Credentials::new(user, password),
        args.repository.clone(),
        api_version,
    )
    .context("Invalid repository settings")?;

    let timeouts = HttpTimeouts {
        connect_secs: args
            .connect_timeout
            .or_else(|| file.and_then(|cfg| cfg.connect_timeout_secs))
            .unwrap_or(CONNECT_TIMEOUT_SECS),
        read_secs: args
            .read_timeout
            .or_else(|| file.and_then(|cfg| cfg.read_timeout_secs))
            .unwrap_or(READ_TIMEOUT_SECS),
    };

    let output_root = args
        .output_dir
        .clone()
        .or_else(|| file.and_then(|cfg| cfg.output_dir.clone()))
        .unwrap_or_else(|| BackupOptions::default().output_root);
    let fail_fast = args.fail_fast || file.and_then(|cfg| cfg.fail_fast).unwrap_or(false);

    Ok(ResolvedConfig {
        target,
        timeouts,
        options: BackupOptions {
            output_root,
            failure_policy: if fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            },
        },
        file_verbosity: file.and_then(|cfg| cfg.verbosity),
    })
}
