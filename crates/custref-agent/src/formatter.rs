//! Result formatting
//!
//! Projects raw records onto the fixed display columns. Missing values show
//! as `N/A`. Percentage columns always get a trailing `%`, so a missing
//! percentage reads `N/A%`.

use custref_domain::numeric::format_number;
use custref_domain::{FieldMapping, LogicalField, MappingError, Record, NOT_AVAILABLE};
use serde::Serialize;
use serde_json::Value;

/// Display column headers, in order
pub const COLUMNS: [&str; 11] = [
    "Customer Name",
    "Account Owner",
    "Industry",
    "PO %",
    "Non-PO %",
    "PO Touchless %",
    "Auto Dist %",
    "Invoice Volume",
    "ERP System",
    "Product Activations",
    "Account URL",
];

/// Source field of each column
const COLUMN_FIELDS: [LogicalField; 11] = [
    LogicalField::Tenant,
    LogicalField::AccountOwner,
    LogicalField::Industry,
    LogicalField::PoPercentage,
    LogicalField::NonPoPercentage,
    LogicalField::PoTouchlessPercentage,
    LogicalField::AutomaticDistribution,
    LogicalField::InvoiceVolume,
    LogicalField::ErpSystem,
    LogicalField::ProductActivations,
    LogicalField::AccountUrlLink,
];

/// One display row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRow {
    /// Customer (tenant) name
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    /// Account owner
    #[serde(rename = "Account Owner")]
    pub account_owner: String,
    /// Industry
    #[serde(rename = "Industry")]
    pub industry: String,
    /// PO percentage with `%`
    #[serde(rename = "PO %")]
    pub po_percentage: String,
    /// Non-PO percentage with `%`
    #[serde(rename = "Non-PO %")]
    pub non_po_percentage: String,
    /// PO touchless percentage with `%`
    #[serde(rename = "PO Touchless %")]
    pub po_touchless_percentage: String,
    /// Automatic distribution percentage with `%`
    #[serde(rename = "Auto Dist %")]
    pub automatic_distribution: String,
    /// Rolling twelve month invoice count
    #[serde(rename = "Invoice Volume")]
    pub invoice_volume: String,
    /// ERP systems
    #[serde(rename = "ERP System")]
    pub erp_system: String,
    /// Product activations
    #[serde(rename = "Product Activations")]
    pub product_activations: String,
    /// CRM link
    #[serde(rename = "Account URL")]
    pub account_url: String,
}

impl CustomerRow {
    /// Cell values in column order
    pub fn cells(&self) -> [&str; 11] {
        [
            &self.customer_name,
            &self.account_owner,
            &self.industry,
            &self.po_percentage,
            &self.non_po_percentage,
            &self.po_touchless_percentage,
            &self.automatic_distribution,
            &self.invoice_volume,
            &self.erp_system,
            &self.product_activations,
            &self.account_url,
        ]
    }
}

/// Projects records onto display rows through a field mapping
#[derive(Debug, Clone)]
pub struct ResultFormatter {
    mapping: FieldMapping,
}

impl ResultFormatter {
    /// Create a formatter
    pub fn new(mapping: FieldMapping) -> Self {
        Self { mapping }
    }

    /// Format every record
    pub fn format(&self, records: &[Record]) -> Result<Vec<CustomerRow>, MappingError> {
        records.iter().map(|r| self.format_record(r)).collect()
    }

    /// Format one record
    pub fn format_record(&self, record: &Record) -> Result<CustomerRow, MappingError> {
        let mut cells = Vec::with_capacity(COLUMN_FIELDS.len());
        for field in COLUMN_FIELDS {
            let value = cell(record, self.mapping.path(field)?);
            cells.push(if field.is_percentage() {
                format!("{}%", value)
            } else {
                value
            });
        }

        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        Ok(CustomerRow {
            customer_name: next(),
            account_owner: next(),
            industry: next(),
            po_percentage: next(),
            non_po_percentage: next(),
            po_touchless_percentage: next(),
            automatic_distribution: next(),
            invoice_volume: next(),
            erp_system: next(),
            product_activations: next(),
            account_url: next(),
        })
    }
}

fn cell(record: &Record, path: &str) -> String {
    match record.get_path(path) {
        Some(Value::Number(n)) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        Some(Value::String(s)) if s.is_empty() => NOT_AVAILABLE.to_string(),
        Some(_) => record.display_path(path),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    fn formatter() -> ResultFormatter {
        ResultFormatter::new(FieldMapping::default())
    }

    #[test]
    fn test_full_record() {
        let row = formatter()
            .format_record(&record(json!({
                "tenant__c": "Acme",
                "archived_invoice_count_R12__c": 12500.0,
                "po_I_E_Percent__c": 62.5,
                "non_po_I_E_percent__c": 37.5,
                "po_Touchless_Percent__c": 20,
                "Automatic_distribution_percent__c": 45.0,
                "Account__r": {
                    "Account_Owner_TEXT__c": "Jane Smith",
                    "Industry": "Retail",
                    "ERP__c": "SAP;Oracle",
                    "Product_Activations__c": "Readsoft Invoices",
                    "Account_URL_Link__c": "https://crm.example.com/001"
                }
            })))
            .unwrap();

        assert_eq!(
            row.cells(),
            [
                "Acme",
                "Jane Smith",
                "Retail",
                "62.5%",
                "37.5%",
                "20%",
                "45%",
                "12500",
                "SAP;Oracle",
                "Readsoft Invoices",
                "https://crm.example.com/001",
            ]
        );
    }

    #[test]
    fn test_missing_nested_field_is_sentinel() {
        let row = formatter()
            .format_record(&record(json!({ "tenant__c": "Acme", "Account__r": null })))
            .unwrap();
        assert_eq!(row.industry, "N/A");
        assert_eq!(row.account_owner, "N/A");
        assert_eq!(row.invoice_volume, "N/A");
    }

    #[test]
    fn test_missing_percentage_keeps_suffix() {
        let row = formatter().format_record(&record(json!({}))).unwrap();
        assert_eq!(row.po_percentage, "N/A%");
        assert_eq!(row.automatic_distribution, "N/A%");
    }

    #[test]
    fn test_every_cell_is_non_empty() {
        let rows = formatter()
            .format(&[record(json!({ "tenant__c": "" })), record(json!({ "x": 1 }))])
            .unwrap();
        for row in rows {
            assert!(row.cells().iter().all(|c| !c.is_empty()));
        }
    }

    #[test]
    fn test_json_uses_column_names() {
        let row = formatter().format_record(&record(json!({}))).unwrap();
        let value = serde_json::to_value(&row).unwrap();
        for column in COLUMNS {
            assert!(value.get(column).is_some(), "missing {}", column);
        }
    }

    #[test]
    fn test_incomplete_mapping_is_an_error() {
        let formatter = ResultFormatter::new(FieldMapping::empty("X"));
        assert!(formatter.format_record(&record(json!({}))).is_err());
    }
}
