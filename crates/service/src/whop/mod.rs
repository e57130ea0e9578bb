//! Clients for the Whop platform.
//!
//! Reads go through [`catalog::LazyCatalog`], a client built on first use
//! from the app id and API key. Writes go through [`rest::WhopRestClient`]
//! with a bearer token. Both sit behind traits so the admin layer can be
//! driven by mocks in tests.

pub mod catalog;
pub mod rest;

pub use catalog::{CatalogReader, LazyCatalog, WhopSdkClient};
pub use rest::{WhopRestClient, WhopTransport};
