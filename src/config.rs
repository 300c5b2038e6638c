use std::env;
use std::str::FromStr;

use crate::error::{EnvVarError, Error};

pub const DEFAULT_BASE_URL: &str = "http://sc2ranks.com/api/base/";

const APP_KEY_VAR: &str = "SC2RANKS_APP_KEY";
const BASE_URL_VAR: &str = "SC2RANKS_BASE_URL";
const TRANSPORT_VAR: &str = "SC2RANKS_TRANSPORT";
const DECODE_DIAGNOSTICS_VAR: &str = "SC2RANKS_DECODE_DIAGNOSTICS";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportMode {
    /// A fresh connection per request, body read fully into memory.
    #[default]
    Buffered,
    /// One lazily opened client whose connections are reused.
    Persistent,
}

impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buffered" => Ok(Self::Buffered),
            "persistent" => Ok(Self::Persistent),
            other => Err(Error::Config(format!("unknown transport mode `{other}`"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Raw, not yet encoded, value of the `appKey` query parameter.
    pub site_key: String,
    pub base_url: String,
    pub transport: TransportMode,
    pub decode_diagnostics: bool,
}

impl ClientConfig {
    pub fn new(site_key: impl Into<String>) -> Self {
        Self {
            site_key: site_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            transport: TransportMode::default(),
            decode_diagnostics: true,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_transport(mut self, transport: TransportMode) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_decode_diagnostics(mut self, enabled: bool) -> Self {
        self.decode_diagnostics = enabled;
        self
    }

    /// Every request carries the site key, so a blank one is refused.
    pub fn validate(&self) -> Result<(), Error> {
        if self.site_key.trim().is_empty() {
            return Err(Error::Config("site key must not be empty".into()));
        }
        Ok(())
    }

    // requires SC2RANKS_APP_KEY env var
    // can use dotenv
    pub fn from_env() -> Result<Self, Error> {
        let site_key = env::var(APP_KEY_VAR).map_err(|e| EnvVarError::new(APP_KEY_VAR, e))?;
        let mut config = Self::new(site_key);
        config
            .validate()
            .map_err(|_| Error::Config(format!("{APP_KEY_VAR} must not be empty")))?;

        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Ok(transport) = env::var(TRANSPORT_VAR) {
            config.transport = transport.parse()?;
        }
        if let Ok(flag) = env::var(DECODE_DIAGNOSTICS_VAR) {
            config.decode_diagnostics = flag.trim().parse().map_err(|_| {
                Error::Config(format!("{DECODE_DIAGNOSTICS_VAR} must be `true` or `false`"))
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_transport_mode_from_str() {
        assert_eq!(
            "persistent".parse::<TransportMode>().unwrap(),
            TransportMode::Persistent
        );
        assert_eq!(
            " Buffered ".parse::<TransportMode>().unwrap(),
            TransportMode::Buffered
        );
        assert!(matches!(
            "curl".parse::<TransportMode>(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_site_key() {
        assert!(ClientConfig::new("example.org").validate().is_ok());
        assert!(matches!(ClientConfig::new("").validate(), Err(Error::Config(_))));
        assert!(matches!(ClientConfig::new(" \t").validate(), Err(Error::Config(_))));
    }

    // all env manipulation lives in one test so parallel tests don't race
    #[test]
    fn test_from_env() {
        env::remove_var(APP_KEY_VAR);
        assert!(matches!(ClientConfig::from_env(), Err(Error::EnvVar(_))));

        env::set_var(APP_KEY_VAR, "  ");
        assert!(matches!(ClientConfig::from_env(), Err(Error::Config(_))));

        env::set_var(APP_KEY_VAR, "github.com/someone/sc2ranks");
        env::set_var(TRANSPORT_VAR, "persistent");
        env::set_var(DECODE_DIAGNOSTICS_VAR, "false");
        env::remove_var(BASE_URL_VAR);

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.site_key, "github.com/someone/sc2ranks");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.transport, TransportMode::Persistent);
        assert!(!config.decode_diagnostics);

        env::set_var(DECODE_DIAGNOSTICS_VAR, "maybe");
        assert!(matches!(ClientConfig::from_env(), Err(Error::Config(_))));

        env::remove_var(APP_KEY_VAR);
        env::remove_var(TRANSPORT_VAR);
        env::remove_var(DECODE_DIAGNOSTICS_VAR);
    }
}
