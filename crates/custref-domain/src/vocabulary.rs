//! Controlled vocabularies
//!
//! Canonical category names used to correct the free text a language model
//! returns for categorical fields. The lists are read-only reference data:
//! built once (defaults or configuration) and handed to the extractor.

use crate::field::LogicalField;
use serde::{Deserialize, Serialize};

/// Which controlled vocabulary a categorical field is corrected against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabularyKind {
    /// ERP system names
    ErpSystem,
    /// Industry names
    Industry,
    /// Product activation names
    ProductActivation,
}

impl VocabularyKind {
    /// Every vocabulary kind
    pub const ALL: [VocabularyKind; 3] = [
        VocabularyKind::ErpSystem,
        VocabularyKind::Industry,
        VocabularyKind::ProductActivation,
    ];

    /// The logical field this vocabulary corrects
    pub fn field(&self) -> LogicalField {
        match self {
            VocabularyKind::ErpSystem => LogicalField::ErpSystem,
            VocabularyKind::Industry => LogicalField::Industry,
            VocabularyKind::ProductActivation => LogicalField::ProductActivations,
        }
    }

    /// Human-readable label for log lines
    pub fn label(&self) -> &'static str {
        match self {
            VocabularyKind::ErpSystem => "ERP system",
            VocabularyKind::Industry => "industry",
            VocabularyKind::ProductActivation => "product activations",
        }
    }
}

/// The three controlled vocabularies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabularies {
    /// Known ERP systems
    #[serde(default = "default_erp_systems")]
    pub erp_systems: Vec<String>,

    /// Known industries
    #[serde(default = "default_industries")]
    pub industries: Vec<String>,

    /// Known product activations
    #[serde(default = "default_product_activations")]
    pub product_activations: Vec<String>,
}

impl Vocabularies {
    /// Entries of one vocabulary, in their configured order
    pub fn get(&self, kind: VocabularyKind) -> &[String] {
        match kind {
            VocabularyKind::ErpSystem => &self.erp_systems,
            VocabularyKind::Industry => &self.industries,
            VocabularyKind::ProductActivation => &self.product_activations,
        }
    }

    /// Vocabularies with no entries (every lookup misses)
    pub fn empty() -> Self {
        Self {
            erp_systems: Vec::new(),
            industries: Vec::new(),
            product_activations: Vec::new(),
        }
    }
}

impl Default for Vocabularies {
    fn default() -> Self {
        Self {
            erp_systems: default_erp_systems(),
            industries: default_industries(),
            product_activations: default_product_activations(),
        }
    }
}

const ERP_SYSTEMS: &[&str] = &[
    "SAP",
    "SAP S/4HANA",
    "SAP ECC",
    "SAP Business One",
    "Oracle",
    "Oracle E-Business Suite",
    "Oracle JD Edwards",
    "Oracle NetSuite",
    "Oracle PeopleSoft",
    "MS Dynamics",
    "MS Dynamics 365 Business Central",
    "MS Dynamics AX",
    "MS Dynamics NAV",
    "Infor",
    "Epicor",
    "Sage",
    "IFS",
    "Unit4",
    "QAD",
    "Workday",
];

const INDUSTRIES: &[&str] = &[
    "Manufacturing",
    "Retail",
    "Consumer Products",
    "Wholesale & Distribution",
    "Healthcare",
    "Financial Services",
    "Construction",
    "Transportation & Logistics",
    "Energy & Utilities",
    "Food & Beverage",
    "Automotive",
    "Public Sector",
    "Education",
    "Hospitality",
    "Life Sciences",
    "Professional Services",
    "Technology",
    "Telecommunications",
    "Media & Entertainment",
    "Chemicals",
];

const PRODUCT_ACTIVATIONS: &[&str] = &[
    "Readsoft Invoices",
    "Readsoft Online",
    "Connect BC Cloud",
    "Connect BC On-Premise",
    "Invoice Automation",
    "Purchase Order Matching",
    "Supplier Portal",
    "Expense Management",
    "Payment Automation",
    "E-Invoicing",
];

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_erp_systems() -> Vec<String> {
    to_owned_list(ERP_SYSTEMS)
}

fn default_industries() -> Vec<String> {
    to_owned_list(INDUSTRIES)
}

fn default_product_activations() -> Vec<String> {
    to_owned_list(PRODUCT_ACTIVATIONS)
}
