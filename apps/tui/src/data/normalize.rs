use indexmap::IndexSet;
use serde::Serialize;

use crate::api::ScreeningRecord;
use crate::domain::{is_dependency, SearchField};

/// One plottable screen: gene effect on x, tissue axis slot on y
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub x: f64,
    pub y: usize,
    pub tissue: String,
    pub cell_line: String,
    pub depmap_id: String,
    pub disease: String,
    pub expression: Option<f64>,
}

impl DataPoint {
    pub fn is_dependency(&self) -> bool {
        is_dependency(self.x)
    }

    /// Text of `field` as the search box sees it. Absent expression has no text.
    pub fn field_text(&self, field: SearchField) -> Option<String> {
        match field {
            SearchField::DepmapId => Some(self.depmap_id.clone()),
            SearchField::CellLineName => Some(self.cell_line.clone()),
            SearchField::DiseaseFromSource => Some(self.disease.clone()),
            SearchField::GeneEffect => Some(self.x.to_string()),
            SearchField::Expression => self.expression.map(|value| value.to_string()),
        }
    }

    /// Same point, by DepMap identity.
    pub fn same_cell_line(&self, other: &Self) -> bool {
        self.depmap_id == other.depmap_id
    }
}

/// Points plus the frozen tissue axis they were positioned against
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedDataset {
    pub tissues: Vec<String>,
    pub points: Vec<DataPoint>,
}

impl NormalizedDataset {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn tissue_index(&self, tissue: &str) -> Option<usize> {
        self.tissues.iter().position(|name| name == tissue)
    }
}

/// Flatten tissue-grouped screens into points.
///
/// Tissues keep first-seen order and that order is the y axis. Screens
/// without a gene effect are dropped; their tissue still takes a slot.
pub fn normalize(records: &[ScreeningRecord]) -> NormalizedDataset {
    let tissues: IndexSet<&str> = records
        .iter()
        .map(|record| record.tissue_name.as_str())
        .collect();

    let points = records
        .iter()
        .flat_map(|record| {
            let y = tissues
                .get_index_of(record.tissue_name.as_str())
                .unwrap_or_default();
            record.screens.iter().filter_map(move |screen| {
                screen.gene_effect.map(|gene_effect| DataPoint {
                    x: gene_effect,
                    y,
                    tissue: record.tissue_name.clone(),
                    cell_line: screen.cell_line_name.clone(),
                    depmap_id: screen.depmap_id.clone(),
                    disease: screen.disease_from_source.clone(),
                    expression: screen.expression,
                })
            })
        })
        .collect();

    NormalizedDataset {
        tissues: tissues.into_iter().map(str::to_string).collect(),
        points,
    }
}
