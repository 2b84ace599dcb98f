use clap::{CommandFactory, Parser};

use crate::domain::{Category, SearchField};

#[derive(Debug, Parser)]
#[command(name = "essentiality-map", version, about = "Gene Essentiality Map TUI")]
pub struct CliArgs {
    /// Print a per-tissue summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Ensembl gene identifier to load
    #[arg(long, value_name = "ENSEMBL_ID")]
    pub gene: Option<String>,

    /// Override the GraphQL endpoint
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the CSV export directory
    #[arg(long = "export-dir", value_name = "PATH")]
    pub export_dir: Option<String>,

    /// Headless: write the visible points as CSV to this path
    #[arg(long, value_name = "PATH")]
    pub export: Option<String>,

    /// Headless: keep only these tissues (repeatable)
    #[arg(long = "tissue", value_name = "NAME")]
    pub tissues: Vec<String>,

    /// Headless: search term for highlighting
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,

    /// Headless: field the search term is matched against
    #[arg(long, value_name = "FIELD", default_value = "cellLineName")]
    pub field: SearchField,

    /// Headless: keep only these categories (repeatable)
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<Category>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("ESSENTIALITY_API_URL", url);
        }
        if let Some(dir) = &self.export_dir {
            std::env::set_var("EXPORT_DIR", dir);
        }
        if let Some(gene) = &self.gene {
            std::env::set_var("DEFAULT_GENE_ID", gene);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_filters() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "essentiality-map",
            "--headless",
            "--gene",
            "ENSG00000139618",
            "--tissue",
            "Lung",
            "--tissue",
            "Liver",
            "--search",
            "hela",
            "--field",
            "depmapId",
            "--category",
            "dependency",
        ])?;

        assert!(args.headless);
        assert_eq!(args.gene.as_deref(), Some("ENSG00000139618"));
        assert_eq!(args.tissues, vec!["Lung", "Liver"]);
        assert_eq!(args.field, SearchField::DepmapId);
        assert_eq!(args.categories, vec![Category::Dependency]);
        Ok(())
    }

    #[test]
    fn rejects_unknown_category() {
        let result = CliArgs::try_parse_from(["essentiality-map", "--category", "bogus"]);
        assert!(result.is_err());
    }

    #[test]
    fn help_mentions_gene_flag() {
        assert!(CliArgs::help_text().contains("--gene"));
    }
}
