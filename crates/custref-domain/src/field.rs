//! Logical fields and the field mapping table
//!
//! Every filter the pipeline knows about is a [`LogicalField`]. The
//! [`FieldMapping`] ties each one to the physical path used by the record
//! store, both for the `SELECT` projection and for filter conditions. The
//! order of [`LogicalField::ALL`] is the order of the projection and of the
//! compiled conditions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// How a logical field is filtered when present in the criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Wildcard-wrapped containment (`LIKE '%v%'`)
    Substring,
    /// Element membership in a multi-value field (`INCLUDES ('v')`)
    Membership,
    /// `<field> <op> <value>`
    Numeric,
    /// Only projected, or used by a base filter
    ProjectionOnly,
}

/// A logical field name, independent of the record-store schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    /// Customer (tenant) name
    Tenant,
    /// Account owner name
    AccountOwner,
    /// Rolling twelve month archived invoice count
    InvoiceVolume,
    /// Share of invoices that reference a purchase order
    PoPercentage,
    /// Share of invoices without a purchase order
    NonPoPercentage,
    /// Share of PO invoices processed without touch
    PoTouchlessPercentage,
    /// Share of invoices distributed automatically
    AutomaticDistribution,
    /// Customer industry
    Industry,
    /// ERP systems in use
    ErpSystem,
    /// Activated products
    ProductActivations,
    /// Link to the account in the CRM
    AccountUrlLink,
    /// "Latest record" flag
    IsLatest,
    /// Account classification (client, prospect, ...)
    CustomerType,
}

impl LogicalField {
    /// Every logical field in projection order
    pub const ALL: [LogicalField; 13] = [
        LogicalField::Tenant,
        LogicalField::AccountOwner,
        LogicalField::InvoiceVolume,
        LogicalField::PoPercentage,
        LogicalField::NonPoPercentage,
        LogicalField::PoTouchlessPercentage,
        LogicalField::AutomaticDistribution,
        LogicalField::Industry,
        LogicalField::ErpSystem,
        LogicalField::ProductActivations,
        LogicalField::AccountUrlLink,
        LogicalField::IsLatest,
        LogicalField::CustomerType,
    ];

    /// Numeric fields whose value is a percentage in [0, 100]
    pub const PERCENTAGES: [LogicalField; 4] = [
        LogicalField::PoPercentage,
        LogicalField::NonPoPercentage,
        LogicalField::PoTouchlessPercentage,
        LogicalField::AutomaticDistribution,
    ];

    /// The snake_case name used in configuration and in model output
    pub fn name(&self) -> &'static str {
        match self {
            LogicalField::Tenant => "tenant",
            LogicalField::AccountOwner => "account_owner",
            LogicalField::InvoiceVolume => "invoice_volume",
            LogicalField::PoPercentage => "po_percentage",
            LogicalField::NonPoPercentage => "non_po_percentage",
            LogicalField::PoTouchlessPercentage => "po_touchless_percentage",
            LogicalField::AutomaticDistribution => "automatic_distribution",
            LogicalField::Industry => "industry",
            LogicalField::ErpSystem => "erp_system",
            LogicalField::ProductActivations => "product_activations",
            LogicalField::AccountUrlLink => "account_url_link",
            LogicalField::IsLatest => "is_latest",
            LogicalField::CustomerType => "customer_type",
        }
    }

    /// Look up a field by its snake_case name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// How this field is filtered
    pub fn filter_kind(&self) -> FilterKind {
        match self {
            LogicalField::Tenant | LogicalField::AccountOwner | LogicalField::Industry => {
                FilterKind::Substring
            }
            LogicalField::ErpSystem | LogicalField::ProductActivations => FilterKind::Membership,
            LogicalField::InvoiceVolume
            | LogicalField::PoPercentage
            | LogicalField::NonPoPercentage
            | LogicalField::PoTouchlessPercentage
            | LogicalField::AutomaticDistribution => FilterKind::Numeric,
            LogicalField::AccountUrlLink | LogicalField::IsLatest | LogicalField::CustomerType => {
                FilterKind::ProjectionOnly
            }
        }
    }

    /// Whether the field holds a percentage
    pub fn is_percentage(&self) -> bool {
        Self::PERCENTAGES.contains(self)
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field mapping errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A logical field has no physical path
    #[error("Field mapping has no entry for '{0}'")]
    Missing(LogicalField),

    /// A physical path is empty
    #[error("Field mapping entry for '{0}' is empty")]
    Empty(LogicalField),

    /// A configured key is not a known logical field
    #[error("Unknown logical field '{0}' in field mapping")]
    UnknownField(String),
}

/// Table from logical field to physical record-store path
///
/// Built once at start-up and passed by value to whoever needs it. Paths
/// may be dotted (`Account__r.Industry`) to reach related-object fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Object the query selects from
    pub object: String,
    paths: BTreeMap<LogicalField, String>,
}

/// Object holding the usage statistics
pub const DEFAULT_OBJECT: &str = "Usage_statistic__c";

impl FieldMapping {
    /// Create an empty mapping for the given object
    pub fn empty(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            paths: BTreeMap::new(),
        }
    }

    /// Set the physical path for a logical field
    pub fn with(mut self, field: LogicalField, path: impl Into<String>) -> Self {
        self.paths.insert(field, path.into());
        self
    }

    /// Replace individual paths from a name -> path table (configuration overrides)
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, path) in overrides {
            let field = LogicalField::from_name(name)
                .ok_or_else(|| MappingError::UnknownField(name.clone()))?;
            self.paths.insert(field, path.clone());
        }
        Ok(self)
    }

    /// Physical path of a logical field
    pub fn path(&self, field: LogicalField) -> Result<&str, MappingError> {
        match self.paths.get(&field) {
            Some(path) if path.trim().is_empty() => Err(MappingError::Empty(field)),
            Some(path) => Ok(path.as_str()),
            None => Err(MappingError::Missing(field)),
        }
    }

    /// Physical paths of every field, in projection order
    pub fn projection(&self) -> Result<Vec<&str>, MappingError> {
        LogicalField::ALL.iter().map(|f| self.path(*f)).collect()
    }

    /// Check that every logical field has a non-empty path
    pub fn validate(&self) -> Result<(), MappingError> {
        self.projection().map(|_| ())
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::empty(DEFAULT_OBJECT)
            .with(LogicalField::Tenant, "tenant__c")
            .with(LogicalField::AccountOwner, "Account__r.Account_Owner_TEXT__c")
            .with(LogicalField::InvoiceVolume, "archived_invoice_count_R12__c")
            .with(LogicalField::PoPercentage, "po_I_E_Percent__c")
            .with(LogicalField::NonPoPercentage, "non_po_I_E_percent__c")
            .with(LogicalField::PoTouchlessPercentage, "po_Touchless_Percent__c")
            .with(LogicalField::AutomaticDistribution, "Automatic_distribution_percent__c")
            .with(LogicalField::Industry, "Account__r.Industry")
            .with(LogicalField::ErpSystem, "Account__r.ERP__c")
            .with(LogicalField::ProductActivations, "Account__r.Product_Activations__c")
            .with(LogicalField::AccountUrlLink, "Account__r.Account_URL_Link__c")
            .with(LogicalField::IsLatest, "IsLatest__c")
            .with(LogicalField::CustomerType, "Account__r.Type")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping_is_complete() {
        let mapping = FieldMapping::default();
        assert!(mapping.validate().is_ok());
        assert_eq!(mapping.projection().unwrap().len(), LogicalField::ALL.len());
        assert_eq!(mapping.object, "Usage_statistic__c");
    }

    #[test]
    fn test_projection_order_follows_field_list() {
        let mapping = FieldMapping::default();
        let projection = mapping.projection().unwrap();
        assert_eq!(projection[0], "tenant__c");
        assert_eq!(projection[7], "Account__r.Industry");
        assert_eq!(projection[12], "Account__r.Type");
    }

    #[test]
    fn test_missing_entry_is_reported() {
        let mapping = FieldMapping::empty("Obj").with(LogicalField::Tenant, "t");
        assert_eq!(
            mapping.path(LogicalField::Industry),
            Err(MappingError::Missing(LogicalField::Industry))
        );
        assert!(mapping.validate().is_err());
    }

    #[test]
    fn test_empty_entry_is_reported() {
        let mapping = FieldMapping::default().with(LogicalField::Industry, "  ");
        assert_eq!(
            mapping.validate(),
            Err(MappingError::Empty(LogicalField::Industry))
        );
    }

    #[test]
    fn test_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("industry".to_string(), "Account__r.Sector__c".to_string());
        let mapping = FieldMapping::default().with_overrides(&overrides).unwrap();
        assert_eq!(mapping.path(LogicalField::Industry).unwrap(), "Account__r.Sector__c");

        let mut bad = BTreeMap::new();
        bad.insert("revenue".to_string(), "Revenue__c".to_string());
        let err = FieldMapping::default().with_overrides(&bad).unwrap_err();
        assert_eq!(err, MappingError::UnknownField("revenue".to_string()));
    }

    #[test]
    fn test_names_round_trip() {
        for field in LogicalField::ALL {
            assert_eq!(LogicalField::from_name(field.name()), Some(field));
        }
        assert_eq!(LogicalField::from_name("nope"), None);
    }

    #[test]
    fn test_filter_kinds() {
        assert_eq!(LogicalField::Industry.filter_kind(), FilterKind::Substring);
        assert_eq!(LogicalField::ErpSystem.filter_kind(), FilterKind::Membership);
        assert_eq!(LogicalField::PoPercentage.filter_kind(), FilterKind::Numeric);
        assert_eq!(LogicalField::IsLatest.filter_kind(), FilterKind::ProjectionOnly);
        assert!(LogicalField::AutomaticDistribution.is_percentage());
        assert!(!LogicalField::InvoiceVolume.is_percentage());
    }
}
