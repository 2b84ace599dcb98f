use serde::{Deserialize, Serialize};

/// Gene effect at or below this value marks a cell line as dependent on the gene.
pub const ESSENTIALITY_THRESHOLD: f64 = -1.0;

pub fn is_dependency(gene_effect: f64) -> bool {
    gene_effect <= ESSENTIALITY_THRESHOLD
}

/// Point field the search box matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    DepmapId,
    #[default]
    CellLineName,
    DiseaseFromSource,
    GeneEffect,
    Expression,
}

impl SearchField {
    pub const ALL: [Self; 5] = [
        Self::DepmapId,
        Self::CellLineName,
        Self::DiseaseFromSource,
        Self::GeneEffect,
        Self::Expression,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DepmapId => "depmapId",
            Self::CellLineName => "cellLineName",
            Self::DiseaseFromSource => "diseaseFromSource",
            Self::GeneEffect => "geneEffect",
            Self::Expression => "expression",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::DepmapId),
            1 => Some(Self::CellLineName),
            2 => Some(Self::DiseaseFromSource),
            3 => Some(Self::GeneEffect),
            4 => Some(Self::Expression),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::DepmapId => 0,
            Self::CellLineName => 1,
            Self::DiseaseFromSource => 2,
            Self::GeneEffect => 3,
            Self::Expression => 4,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "depmapid" | "depmap-id" | "depmap_id" => Some(Self::DepmapId),
            "celllinename" | "cell-line" | "cell_line" | "cellline" => Some(Self::CellLineName),
            "diseasefromsource" | "disease" => Some(Self::DiseaseFromSource),
            "geneeffect" | "gene-effect" | "gene_effect" => Some(Self::GeneEffect),
            "expression" => Some(Self::Expression),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DepmapId => "DepMap ID",
            Self::CellLineName => "Cell Line",
            Self::DiseaseFromSource => "Disease",
            Self::GeneEffect => "Gene Effect",
            Self::Expression => "Expression",
        }
    }

    /// Cycle to the next field, wrapping around.
    pub const fn next(self) -> Self {
        match Self::from_index((self.index() + 1) % Self::ALL.len()) {
            Some(field) => field,
            None => Self::DepmapId,
        }
    }
}

/// Legend category a point can be filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Neutral,
    Dependency,
    SelectedNeutral,
    SelectedDependency,
}

impl Category {
    pub const ALL: [Self; 4] = [
        Self::Neutral,
        Self::Dependency,
        Self::SelectedNeutral,
        Self::SelectedDependency,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Dependency => "dependency",
            Self::SelectedNeutral => "selected-neutral",
            Self::SelectedDependency => "selected-dependency",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Neutral),
            1 => Some(Self::Dependency),
            2 => Some(Self::SelectedNeutral),
            3 => Some(Self::SelectedDependency),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('_', "-").as_str() {
            "neutral" => Some(Self::Neutral),
            "dependency" => Some(Self::Dependency),
            "selected-neutral" | "selectedneutral" => Some(Self::SelectedNeutral),
            "selected-dependency" | "selecteddependency" => Some(Self::SelectedDependency),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Dependency => "Dependency",
            Self::SelectedNeutral => "Selected Neutral",
            Self::SelectedDependency => "Selected Dependency",
        }
    }

    /// Whether a point with this gene effect and highlight flag belongs to the category.
    pub fn matches(self, gene_effect: f64, highlighted: bool) -> bool {
        match self {
            Self::Neutral => !is_dependency(gene_effect),
            Self::Dependency => is_dependency(gene_effect),
            Self::SelectedNeutral => highlighted && !is_dependency(gene_effect),
            Self::SelectedDependency => highlighted && is_dependency(gene_effect),
        }
    }
}

impl std::str::FromStr for SearchField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| format!("unknown search field: {value}"))
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| format!("unknown category: {value}"))
    }
}
