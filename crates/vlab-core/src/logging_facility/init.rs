//! Subscriber installation

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output style selected by `log_profile` in the lab configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Human-readable lines at debug level
    #[default]
    Development,
    /// One JSON object per event at info level
    Production,
    /// Installs nothing; tests collect events through the capture layer
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset.
    pub fn default_directives(self) -> &'static str {
        match self {
            Profile::Development => "vlab_core=debug,vlab_engine=debug",
            Profile::Production => "vlab_core=info,vlab_engine=info",
            Profile::Test => "off",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

static INSTALL: Once = Once::new();

/// Install the global subscriber for `profile`, writing to stderr.
///
/// Only the first call in a process has any effect. If some other
/// subscriber is already global (a test capture, say) that one is kept.
///
/// ```
/// use vlab_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INSTALL.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.filter())
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.filter())
                .finish()
                .try_init(),
            Profile::Test => return,
        };
        if installed.is_err() {
            tracing::debug!(?profile, "global subscriber already set; keeping it");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        for _ in 0..3 {
            init(Profile::Test);
        }
    }

    #[test]
    fn test_profiles_use_lowercase_names() {
        let parsed: Profile = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(parsed, Profile::Production);
        assert_eq!(serde_json::to_string(&Profile::Test).unwrap(), "\"test\"");
        assert_eq!(Profile::default(), Profile::Development);
    }

    #[test]
    fn test_default_directives_cover_both_crates() {
        let dev = Profile::Development.default_directives();
        assert!(dev.contains("vlab_core=debug") && dev.contains("vlab_engine=debug"));
        assert_eq!(Profile::Test.default_directives(), "off");
    }
}
