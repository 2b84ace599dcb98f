//! Open Targets GraphQL client for DepMap essentiality screens.

pub mod client;
pub mod error;
pub mod models;

pub use client::{
    EssentialityClient, GraphQlTransport, HttpTransport, DEPMAP_QUERY, MISSING_GENE_ID,
};
pub use error::{FetchError, FetchResult};
pub use models::{ScreenResult, ScreeningRecord};
