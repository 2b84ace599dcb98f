use std::path::PathBuf;

use color_eyre::Result;
use tracing::info;

use crate::api::{EssentialityClient, FetchResult};
use crate::config::AppConfig;
use crate::data::{export_file_path, export_to_path, normalize, DataPoint, NormalizedDataset};

/// Side-effecting operations: network fetches and CSV export
#[derive(Debug, Clone)]
pub struct AppActions {
    pub client: EssentialityClient,
    pub export_dir: PathBuf,
}

impl AppActions {
    pub const fn new(client: EssentialityClient, export_dir: PathBuf) -> Self {
        Self { client, export_dir }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = EssentialityClient::http(&config.api_url, config.request_timeout)?;
        Ok(Self::new(client, config.export_dir.clone()))
    }

    pub async fn fetch_dataset(&self, gene_id: &str) -> FetchResult<NormalizedDataset> {
        fetch_dataset(&self.client, gene_id).await
    }

    /// Write `points` to a dated file in the export directory.
    pub fn export_points<'a>(
        &self,
        gene_id: &str,
        points: impl IntoIterator<Item = &'a DataPoint>,
    ) -> Result<(PathBuf, usize)> {
        let date_prefix = chrono::Local::now().format("%Y-%m-%d").to_string();
        let path = export_file_path(&self.export_dir, gene_id, &date_prefix);
        let rows = export_to_path(&path, points)?;
        info!(path = %path.display(), rows, "exported visible points");
        Ok((path, rows))
    }
}

/// Fetch and normalize in one step.
pub async fn fetch_dataset(
    client: &EssentialityClient,
    gene_id: &str,
) -> FetchResult<NormalizedDataset> {
    let records = client.fetch_essentiality(gene_id).await?;
    Ok(normalize(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::test_support::{StaticTransport, TWO_TISSUES};

    #[tokio::test]
    async fn fetch_dataset_normalizes_records() -> Result<(), Box<dyn std::error::Error>> {
        let client = EssentialityClient::new(StaticTransport::from_json(TWO_TISSUES)?);
        let actions = AppActions::new(client, PathBuf::from("unused"));

        let dataset = actions.fetch_dataset("ENSG00000139618").await?;

        assert_eq!(dataset.tissues, vec!["Lung", "Liver"]);
        assert_eq!(dataset.points.len(), 2);
        assert_eq!(dataset.points[1].tissue, "Liver");
        assert_eq!(dataset.points[1].y, 1);
        Ok(())
    }

    #[tokio::test]
    async fn export_points_writes_dated_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let client = EssentialityClient::new(StaticTransport::from_json(TWO_TISSUES)?);
        let actions = AppActions::new(client, dir.path().to_path_buf());
        let dataset = actions.fetch_dataset("ENSG00000139618").await?;

        let (path, rows) = actions.export_points("ENSG00000139618", &dataset.points)?;

        assert_eq!(rows, 2);
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        assert!(name.ends_with("-ENSG00000139618-essentiality.csv"));
        assert!(std::fs::read_to_string(&path)?.starts_with("Tissue,Cell Line"));
        Ok(())
    }
}
