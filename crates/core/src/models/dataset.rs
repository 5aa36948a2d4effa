//! Dataset descriptor returned by the Opendatasoft catalog endpoint.
//!
//! Required fields are plain values and fail deserialization when absent;
//! optional fields are `Option` and default to `None`. Unknown upstream
//! fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptor of a single upstream dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub visibility: String,
    pub dataset_id: String,
    pub dataset_uid: String,
    pub has_records: bool,
    pub features: Vec<String>,
    pub attachments: Vec<Value>,
    pub alternative_exports: Vec<Value>,
    pub data_visible: bool,
    pub fields: Vec<Field>,
    pub metas: Metas,
}

/// Schema entry for one column of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub annotations: Annotations,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    pub facet: Option<bool>,
    pub facetsort: Option<String>,
    pub disjunctive: Option<bool>,
    pub sortable: Option<bool>,
}

/// Metadata groups attached to the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metas {
    pub dcat: Dcat,
    pub semantic: Semantic,
    pub dcat_ap_it: DcatApIt,
    pub default: DefaultMetas,
}

/// DCAT vocabulary metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dcat {
    pub created: Option<String>,
    pub issued: Option<String>,
    pub creator: Option<String>,
    pub contributor: Option<String>,
    pub contact_name: String,
    pub contact_email: String,
    pub accrualperiodicity: Option<String>,
    pub spatial: Option<String>,
    pub temporal: Option<String>,
    pub granularity: Option<String>,
    pub dataquality: Option<String>,
    pub publisher_type: Option<String>,
    pub conforms_to: Option<String>,
    pub temporal_coverage_start: Option<String>,
    pub temporal_coverage_end: Option<String>,
    #[serde(rename = "accessRights")]
    pub access_rights: Option<String>,
    pub relation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Semantic {
    pub rml_mapping: Option<String>,
    pub classes: Option<String>,
    pub properties: Option<String>,
}

/// Italian DCAT-AP profile metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DcatApIt {
    pub publisher_id: Option<String>,
}

/// The `default` metadata template shared by every Opendatasoft dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultMetas {
    pub title: String,
    pub description: String,
    pub theme: Vec<String>,
    pub keyword: Option<String>,
    pub license: String,
    pub license_url: String,
    pub language: String,
    pub metadata_languages: Vec<String>,
    pub timezone: String,
    pub modified: String,
    pub modified_updates_on_metadata_change: bool,
    pub modified_updates_on_data_change: bool,
    pub data_processed: String,
    pub metadata_processed: String,
    pub geographic_reference: Option<String>,
    pub geographic_reference_auto: bool,
    pub territory: Option<String>,
    pub geometry_types: Option<String>,
    pub bbox: Option<String>,
    pub publisher: Option<String>,
    pub references: String,
    pub records_count: i64,
    pub attributions: Option<String>,
    pub source_domain: Option<String>,
    pub source_domain_title: Option<String>,
    pub source_domain_address: Option<String>,
    pub source_dataset: Option<String>,
    pub shared_catalog: Option<String>,
    pub federated: bool,
    pub oauth_scope: Option<String>,
    pub parent_domain: Option<String>,
    pub update_frequency: Option<String>,
}

impl Dataset {
    /// Look up a field definition by column name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
