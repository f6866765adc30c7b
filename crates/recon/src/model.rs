use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A weekly plan row, the dependent side of the linkage.
///
/// `cms_code` is the user-entered business key; `cms_id` is the foreign key
/// this engine repairs. Descriptive fields may be user-entered or empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRecord {
    pub id: i64,
    pub cms_code: Option<String>,
    pub cms_id: Option<i64>,
    pub site_name: Option<String>,
    pub site_address: Option<String>,
    pub sales_manager: Option<String>,
    pub construction_manager: Option<String>,
}

/// A construction site row, the canonical side. Read-only for this engine.
/// Several sites may share a `cms` value (dirty upstream data).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteRecord {
    pub id: i64,
    pub cms: String,
    pub site_name: Option<String>,
    pub site_address: Option<String>,
    pub sales_manager: Option<String>,
    pub construction_manager: Option<String>,
}

/// `None` or `""` counts as empty. Whitespace-only values count as set:
/// they were entered by someone and are never overwritten.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

// ---------------------------------------------------------------------------
// Descriptive field set
// ---------------------------------------------------------------------------

/// The closed set of descriptive columns the engine may backfill.
/// Patches are keyed by this enum (plus `cms_id`), so a patch can never
/// carry an unexpected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteField {
    SiteName,
    SiteAddress,
    SalesManager,
    ConstructionManager,
}

impl SiteField {
    pub const ALL: [SiteField; 4] = [
        SiteField::SiteName,
        SiteField::SiteAddress,
        SiteField::SalesManager,
        SiteField::ConstructionManager,
    ];

    /// Column name shared by both tables.
    pub fn column(&self) -> &'static str {
        match self {
            Self::SiteName => "site_name",
            Self::SiteAddress => "site_address",
            Self::SalesManager => "sales_manager",
            Self::ConstructionManager => "construction_manager",
        }
    }

    pub fn plan_value<'a>(&self, plan: &'a PlanRecord) -> Option<&'a str> {
        match self {
            Self::SiteName => plan.site_name.as_deref(),
            Self::SiteAddress => plan.site_address.as_deref(),
            Self::SalesManager => plan.sales_manager.as_deref(),
            Self::ConstructionManager => plan.construction_manager.as_deref(),
        }
    }

    pub fn site_value<'a>(&self, site: &'a SiteRecord) -> Option<&'a str> {
        match self {
            Self::SiteName => site.site_name.as_deref(),
            Self::SiteAddress => site.site_address.as_deref(),
            Self::SalesManager => site.sales_manager.as_deref(),
            Self::ConstructionManager => site.construction_manager.as_deref(),
        }
    }

    pub fn apply_to_plan(&self, plan: &mut PlanRecord, value: &str) {
        let slot = match self {
            Self::SiteName => &mut plan.site_name,
            Self::SiteAddress => &mut plan.site_address,
            Self::SalesManager => &mut plan.sales_manager,
            Self::ConstructionManager => &mut plan.construction_manager,
        };
        *slot = Some(value.to_string());
    }
}

impl std::fmt::Display for SiteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// The minimal update for one plan: `cms_id` when the link is missing, plus
/// descriptive values for fields that are empty on the plan and set on the
/// site. An empty patch means no write is issued.
#[derive(Debug, Clone, Default)]
pub struct Patch {
    pub cms_id: Option<i64>,
    pub fields: BTreeMap<SiteField, String>,
}

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.cms_id.is_none() && self.fields.is_empty()
    }

    /// The flat JSON object the store's update call sends.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        if let Some(id) = self.cms_id {
            obj.insert("cms_id".into(), serde_json::Value::from(id));
        }
        for (field, value) in &self.fields {
            obj.insert(field.column().into(), serde_json::Value::from(value.as_str()));
        }
        serde_json::Value::Object(obj)
    }

    /// Column names this patch touches, for the run report.
    pub fn touched_columns(&self) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.fields.len() + 1);
        if self.cms_id.is_some() {
            columns.push("cms_id".to_string());
        }
        columns.extend(self.fields.keys().map(|f| f.column().to_string()));
        columns
    }
}
