//! Constants for the repository module (service paths, timeouts).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large artifacts).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Default REST API version segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Health endpoint, relative to the service base URL.
pub const PING_PATH: &str = "/service/metrics/ping";

/// REST root, relative to the service base URL.
pub(crate) const REST_PATH: &str = "/service/rest";

/// Asset listing resource below the versioned REST root.
pub(crate) const ASSETS_RESOURCE: &str = "assets";

/// Query parameter selecting the repository to list.
pub(crate) const REPOSITORY_PARAM: &str = "repository";

/// Query parameter carrying the cursor of the page to fetch.
pub(crate) const CONTINUATION_TOKEN_PARAM: &str = "continuationToken";
