//! GraphQL client for per-gene essentiality data, with error normalization
//!
//! The transport is a trait so the client can run against an in-memory
//! responder in tests and against `reqwest` in the application.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::api::error::{FetchError, FetchResult};
use crate::api::models::{GeneVariables, GraphQlRequest, GraphQlResponse, ScreeningRecord};

pub const DEPMAP_QUERY: &str = r"
query Depmap($ensemblId: String!) {
  target(ensemblId: $ensemblId) {
    depMapEssentiality {
      tissueName
      screens {
        depmapId
        cellLineName
        diseaseFromSource
        geneEffect
        expression
      }
    }
  }
}
";

const TRANSPORT_FAILURE: &str = "Failed to fetch data from Open Targets API";
const NO_DATA: &str = "No essentiality data found for this gene";
pub const MISSING_GENE_ID: &str = "Please provide a valid Ensembl ID.";

/// Sends a GraphQL request and decodes the response envelope.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn execute(&self, request: &GraphQlRequest) -> FetchResult<GraphQlResponse>;
}

/// `reqwest`-backed transport posting JSON to a GraphQL endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    http_client: Client,
}

impl HttpTransport {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    async fn execute(&self, request: &GraphQlRequest) -> FetchResult<GraphQlResponse> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, endpoint = %self.endpoint, "graphql request failed");
                FetchError::Upstream(format!("{TRANSPORT_FAILURE}: {e}"))
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "graphql endpoint returned an error status");
            return Err(FetchError::Upstream(TRANSPORT_FAILURE.to_string()));
        }

        response.json::<GraphQlResponse>().await.map_err(|e| {
            warn!(error = %e, "graphql response could not be decoded");
            FetchError::Upstream(format!("Malformed response from Open Targets API: {e}"))
        })
    }
}

/// Stateless client; cloning shares the underlying transport.
#[derive(Clone)]
pub struct EssentialityClient {
    transport: Arc<dyn GraphQlTransport>,
}

impl std::fmt::Debug for EssentialityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EssentialityClient").finish_non_exhaustive()
    }
}

impl EssentialityClient {
    pub fn new(transport: impl GraphQlTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn with_transport(transport: Arc<dyn GraphQlTransport>) -> Self {
        Self { transport }
    }

    /// Client talking HTTP to `endpoint`.
    pub fn http(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::new(HttpTransport::new(endpoint, timeout)?))
    }

    /// Fetch every tissue's screens for `gene_id`.
    ///
    /// An empty identifier fails with [`FetchError::Validation`] without
    /// touching the transport. API errors, transport errors and an absent or
    /// empty tissue list all fail with [`FetchError::Upstream`].
    pub async fn fetch_essentiality(&self, gene_id: &str) -> FetchResult<Vec<ScreeningRecord>> {
        let gene_id = gene_id.trim();
        if gene_id.is_empty() {
            return Err(FetchError::Validation(MISSING_GENE_ID.to_string()));
        }

        let started = Instant::now();
        info!(gene_id, "fetching essentiality data");

        let request = GraphQlRequest {
            query: DEPMAP_QUERY,
            variables: GeneVariables {
                ensembl_id: gene_id.to_string(),
            },
        };

        let response = self.transport.execute(&request).await?;

        if let Some(error) = response.errors.as_ref().and_then(|errors| errors.first()) {
            warn!(gene_id, message = %error.message, "graphql api reported an error");
            let message = if error.message.is_empty() {
                TRANSPORT_FAILURE.to_string()
            } else {
                error.message.clone()
            };
            return Err(FetchError::Upstream(message));
        }

        let records = response
            .data
            .and_then(|data| data.target)
            .and_then(|target| target.dep_map_essentiality)
            .filter(|records| !records.is_empty())
            .ok_or_else(|| FetchError::Upstream(NO_DATA.to_string()))?;

        info!(
            gene_id,
            tissues = records.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "essentiality data received"
        );

        Ok(records)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport that answers every request with the same canned outcome.
    pub struct StaticTransport {
        pub calls: AtomicUsize,
        outcome: FetchResult<GraphQlResponse>,
    }

    impl StaticTransport {
        pub fn responding(outcome: FetchResult<GraphQlResponse>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome,
            }
        }

        pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
            Ok(Self::responding(Ok(serde_json::from_str(json)?)))
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GraphQlTransport for StaticTransport {
        async fn execute(&self, _request: &GraphQlRequest) -> FetchResult<GraphQlResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    pub const TWO_TISSUES: &str = r#"{
        "data": {"target": {"depMapEssentiality": [
            {"tissueName": "Lung", "screens": [
                {"depmapId": "ACH-000001", "cellLineName": "A549", "diseaseFromSource": "NSCLC",
                 "geneEffect": -2.0, "expression": 3.1},
                {"depmapId": "ACH-000002", "cellLineName": "HELA-1", "diseaseFromSource": "Cervical",
                 "geneEffect": null, "expression": 1.0}
            ]},
            {"tissueName": "Liver", "screens": [
                {"depmapId": "ACH-000003", "cellLineName": "HEPG2", "diseaseFromSource": "HCC",
                 "geneEffect": 0.5, "expression": null}
            ]}
        ]}}
    }"#;
}
