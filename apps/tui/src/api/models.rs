use serde::{Deserialize, Deserializer, Serialize};

/// Request body for a GraphQL POST
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: GeneVariables,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneVariables {
    pub ensembl_id: String,
}

/// Response envelope: either a data payload, an error list, or both
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<ResponseData>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub target: Option<Target>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(default)]
    pub dep_map_essentiality: Option<Vec<ScreeningRecord>>,
}

/// Screens grouped under one tissue
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tissue_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screens: Vec<ScreenResult>,
}

/// One gene-effect measurement in one cell line
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub depmap_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cell_line_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disease_from_source: String,
    #[serde(default)]
    pub gene_effect: Option<f64>,
    #[serde(default)]
    pub expression: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_in_string_fields_become_empty() -> Result<(), Box<dyn std::error::Error>> {
        let record: ScreeningRecord = serde_json::from_str(
            r#"{
                "tissueName": "Lung",
                "screens": [
                    {"depmapId": "ACH-000001", "cellLineName": null, "diseaseFromSource": null,
                     "geneEffect": -0.42, "expression": null}
                ]
            }"#,
        )?;

        assert_eq!(record.tissue_name, "Lung");
        assert_eq!(record.screens[0].cell_line_name, "");
        assert_eq!(record.screens[0].disease_from_source, "");
        assert_eq!(record.screens[0].gene_effect, Some(-0.42));
        assert_eq!(record.screens[0].expression, None);
        Ok(())
    }

    #[test]
    fn null_screens_become_empty_list() -> Result<(), Box<dyn std::error::Error>> {
        let record: ScreeningRecord =
            serde_json::from_str(r#"{"tissueName": "Skin", "screens": null}"#)?;
        assert!(record.screens.is_empty());
        Ok(())
    }

    #[test]
    fn envelope_with_errors_only() -> Result<(), Box<dyn std::error::Error>> {
        let response: GraphQlResponse =
            serde_json::from_str(r#"{"errors": [{"message": "Invalid ensemblId"}]}"#)?;
        assert!(response.data.is_none());
        assert_eq!(
            response.errors.as_deref().map(|errors| errors[0].message.as_str()),
            Some("Invalid ensemblId")
        );
        Ok(())
    }

    #[test]
    fn request_serializes_camel_case_variables() -> Result<(), Box<dyn std::error::Error>> {
        let request = GraphQlRequest {
            query: "query Q { x }",
            variables: GeneVariables {
                ensembl_id: "ENSG00000139618".to_string(),
            },
        };
        let json = serde_json::to_value(&request)?;
        assert_eq!(json["variables"]["ensemblId"], "ENSG00000139618");
        Ok(())
    }
}
