use std::fmt::Display;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, JSONError};
use crate::extract::{self, DEFAULT_BRACKET};
use crate::request::{encode_site_key, Request, DEFAULT_REGION};
use crate::transport::{self, Transport};
use crate::types::{DecodeStatus, JsonFailure, MapUsageEntry};

/// Everything remembered about the most recent fetch. Replaced as a whole so
/// the request, the response and the decode status always belong together.
#[derive(Debug, Default)]
struct LastFetch {
    request: Option<String>,
    response: Option<Value>,
    decode: Option<DecodeStatus>,
}

/// Talks to the sc2ranks API one request at a time. Every fetch takes
/// `&mut self`, so a single client never has two requests in flight.
pub struct RequestClient {
    site_key: String,
    base_url: String,
    decode_diagnostics: bool,
    transport: Box<dyn Transport>,
    last: LastFetch,
}

impl RequestClient {
    /// Fails with [`Error::Config`] when the site key is blank.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let transport = transport::for_mode(config.transport);
        Self::with_transport(config, transport)
    }

    /// Uses `transport` instead of the one named by `config.transport`.
    pub fn with_transport(
        config: ClientConfig,
        transport: Box<dyn Transport>,
    ) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            site_key: encode_site_key(&config.site_key),
            base_url: config.base_url,
            decode_diagnostics: config.decode_diagnostics,
            transport,
            last: LastFetch::default(),
        })
    }

    /// Character lookup by name and three digit character code.
    pub async fn fetch_character_by_name_code(
        &mut self,
        name: &str,
        code: impl Display,
        region: &str,
    ) -> Result<Value, Error> {
        self.execute(&Request::CharacterByNameCode {
            region: region.into(),
            name: name.into(),
            code: code.to_string(),
        })
        .await
    }

    /// [`Self::fetch_character_by_name_code`] in the `us` region.
    pub async fn fetch_character(&mut self, name: &str, code: impl Display) -> Result<Value, Error> {
        self.fetch_character_by_name_code(name, code, DEFAULT_REGION)
            .await
    }

    pub async fn fetch_character_by_bnet_id(
        &mut self,
        name: &str,
        bnet_id: impl Display,
        region: &str,
    ) -> Result<Value, Error> {
        self.execute(&Request::CharacterByBnetId {
            region: region.into(),
            name: name.into(),
            bnet_id: bnet_id.to_string(),
        })
        .await
    }

    /// Profile search, e.g. `subtype = "division"` with the division name as
    /// `value`. `search_type` is usually [`crate::DEFAULT_SEARCH_TYPE`].
    pub async fn fetch_character_by_profile_search(
        &mut self,
        name: &str,
        subtype: &str,
        value: &str,
        search_type: &str,
        region: &str,
    ) -> Result<Value, Error> {
        self.execute(&Request::ProfileSearch {
            region: region.into(),
            name: name.into(),
            search_type: search_type.into(),
            subtype: subtype.into(),
            value: value.into(),
        })
        .await
    }

    pub async fn fetch_map_usage(&mut self, map_id: impl Display) -> Result<Value, Error> {
        self.execute(&Request::MapUsage {
            map_id: map_id.to_string(),
        })
        .await
    }

    /// Fetches and decodes `request`, replacing the last fetch record.
    ///
    /// API level error objects (`{"error": ...}`) decode fine and come back
    /// as `Ok`; only transport and JSON failures are errors.
    pub async fn execute(&mut self, request: &Request) -> Result<Value, Error> {
        let url = request.url(&self.base_url, &self.site_key);
        tracing::debug!(%url, "sc2ranks request");

        let body = match self.transport.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%url, error = %e, "sc2ranks request failed");
                self.record(url, None, DecodeStatus::NotAttempted);
                return Err(e);
            }
        };

        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => {
                self.record(url, Some(value.clone()), DecodeStatus::Decoded);
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "sc2ranks response is not valid JSON");
                let failure = DecodeStatus::Failed(JsonFailure::from(&e));
                let err = JSONError::new(&url, e);
                self.record(url, None, failure);
                Err(err.into())
            }
        }
    }

    fn record(&mut self, url: String, response: Option<Value>, decode: DecodeStatus) {
        self.last = LastFetch {
            request: Some(url),
            response,
            decode: self.decode_diagnostics.then_some(decode),
        };
    }

    /// Teams of `response` (or of the last response) in `bracket`.
    pub fn extract_bracket_records(
        &self,
        response: Option<&Value>,
        bracket: i64,
    ) -> Option<Vec<Value>> {
        let response = response.or(self.last.response.as_ref())?;
        extract::bracket_records(response, bracket)
    }

    /// 1v1 records of the last response.
    pub fn bracket_records(&self) -> Option<Vec<Value>> {
        self.extract_bracket_records(None, DEFAULT_BRACKET)
    }

    pub fn extract_latest_map_usage(&self, response: Option<&Value>) -> Option<MapUsageEntry> {
        let response = response.or(self.last.response.as_ref())?;
        extract::latest_map_usage(response)
    }

    pub fn last_request(&self) -> Option<&str> {
        self.last.request.as_deref()
    }

    pub fn last_response(&self) -> Option<&Value> {
        self.last.response.as_ref()
    }

    /// Always `None` unless decode diagnostics were enabled in the config.
    pub fn decode_status(&self) -> Option<&DecodeStatus> {
        self.last.decode.as_ref()
    }

    pub fn is_decode_diagnostics_enabled(&self) -> bool {
        self.decode_diagnostics
    }

    /// The percent-encoded `appKey`.
    pub fn site_key(&self) -> &str {
        &self.site_key
    }
}
