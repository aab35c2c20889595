//! Photo search API client.
//!
//! The client is split along the host round trip:
//!
//! - [`client`]: builds the outbound request (URL, credential header, context)
//! - [`token`]: the request token echoed back by the host
//! - [`response`]: validates and decodes the result into a [`ResultPage`]
//!
//! ```text
//! ApiClient::search_request ─► Action::Fetch ─► host web_request
//!                                                     │
//! parse_search_response ◄── Event::SearchResponse ◄───┘
//! ```

pub mod client;
pub mod response;
pub mod token;

pub use client::{ApiClient, SearchRequest, DEFAULT_ENDPOINT};
pub use response::{parse_search_response, ResultPage};
pub use token::RequestToken;
