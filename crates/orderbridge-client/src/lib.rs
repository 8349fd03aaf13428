//! orderbridge Client - response sources for the compatibility engine.
//!
//! A response source turns a `(method, path, query)` request into a status
//! code and a parsed JSON body. Two implementations are provided:
//!
//! - [`HttpSource`] calls a live API with `reqwest`
//! - [`FixtureSource`] answers from a canned case table
//!
//! Both fail loudly on transport problems and on bodies that are not JSON, so
//! the translation routines only ever see well-formed documents.
//!
//! # Quick Start
//!
//! ```ignore
//! use orderbridge_client::SourceConfig;
//! use orderbridge_proto::ApiRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SourceConfig::default()
//!         .with_base_url(std::env::var("BASE_URL").ok())
//!         .build()?;
//!
//!     let request = ApiRequest::get("/api/v2/orders").with_query("userId", "123");
//!     let response = source.fetch(&request).await?;
//!     println!("{} {}", response.status, response.body);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fixture;
pub mod http;
pub mod source;

pub use config::SourceConfig;
pub use error::Error;
pub use fixture::{FixtureCase, FixtureSource};
pub use http::HttpSource;
pub use source::ResponseSource;

/// Re-export document types.
pub use orderbridge_proto as proto;
