//! Domain layer for the zsplash plugin.
//!
//! Core types independent of Zellij APIs: validated search inputs, the photo
//! model and the error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`photo`]: Photo search result model
//! - [`query`]: Validated query and page number types
//!
//! # Examples
//!
//! ```
//! use zsplash::domain::{Page, Result, SearchQuery};
//!
//! fn first_page(text: &str) -> Result<(SearchQuery, Page)> {
//!     Ok((SearchQuery::parse(text)?, Page::FIRST))
//! }
//! assert!(first_page("mountains").is_ok());
//! ```

pub mod error;
pub mod photo;
pub mod query;

pub use error::{Result, ZsplashError};
pub use photo::{Photo, PhotoLinks, PhotoUrls, Photographer};
pub use query::{Page, SearchQuery, EMPTY_QUERY_MESSAGE, PER_PAGE};
