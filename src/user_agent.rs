//! User-Agent string for repository requests.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/nexus-backup";

/// Default User-Agent for every request (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("nexus-backup/{version} (+{PROJECT_UA_URL})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_carries_crate_version() {
        let ua = default_user_agent();
        assert_eq!(
            env!("CARGO_PKG_VERSION"),
            ua.strip_prefix("nexus-backup/")
                .and_then(|s| s.split(' ').next())
                .expect("UA has version"),
        );
    }

    #[test]
    fn test_user_agent_contains_project_url() {
        assert!(default_user_agent().contains(PROJECT_UA_URL));
    }
}
