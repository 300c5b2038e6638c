//! Client for the sc2ranks.com JSON API.
//!
//! ```no_run
//! # async fn demo() -> Result<(), sc2ranks::Error> {
//! use sc2ranks::{ClientConfig, RequestClient};
//!
//! let mut client = RequestClient::new(ClientConfig::new("example.org"))?;
//! let character = client.fetch_character("meerkat", 678).await?;
//! println!("{}", character["name"]);
//! let _one_v_one = client.bracket_records();
//! # Ok(())
//! # }
//! ```

pub mod api_client;
pub mod cmd;
pub mod config;
pub mod error;
pub mod extract;
pub mod request;
pub mod transport;
pub mod types;

pub use api_client::RequestClient;
pub use config::{ClientConfig, TransportMode};
pub use error::Error;
pub use extract::DEFAULT_BRACKET;
pub use request::{Request, DEFAULT_REGION, DEFAULT_SEARCH_TYPE};
pub use transport::{BufferedTransport, PersistentTransport, Transport};
pub use types::{DecodeStatus, JsonFailure, JsonFailureKind, MapUsageEntry, TeamRecord};
