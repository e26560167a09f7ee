//! Criteria to query compilation

use crate::clause::{ClauseOperator, FilterClause, Literal, QueryPlan};
use crate::soql;
use custref_domain::{CustomerCriteria, FieldMapping, FilterKind, LogicalField, MappingError};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Account type that marks an active client
pub const ACTIVE_CUSTOMER_TYPE: &str = "Client";

/// Compilation failures
///
/// These indicate a broken deployment (incomplete field mapping), never bad
/// input, and must not be swallowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The field mapping cannot address a required field
    #[error("Configuration error: {0}")]
    Mapping(#[from] MappingError),
}

/// A compiled query together with the plan it was rendered from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    /// Rendered SOQL
    pub soql: String,
    /// Structured form
    pub plan: QueryPlan,
}

/// Compiles criteria against a fixed field mapping
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    mapping: FieldMapping,
    customer_type: String,
}

impl QueryCompiler {
    /// Create a compiler for a mapping
    pub fn new(mapping: FieldMapping) -> Self {
        Self {
            mapping,
            customer_type: ACTIVE_CUSTOMER_TYPE.to_string(),
        }
    }

    /// Use a different account type for the active-client base filter
    pub fn with_customer_type(mut self, customer_type: impl Into<String>) -> Self {
        self.customer_type = customer_type.into();
        self
    }

    /// The mapping in use
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Compile criteria into SOQL
    pub fn compile(&self, criteria: &CustomerCriteria) -> Result<CompiledQuery, CompileError> {
        let plan = self.plan(criteria)?;
        let soql = soql::render(&plan);
        info!("Generated SOQL query: {}", soql);
        Ok(CompiledQuery { soql, plan })
    }

    /// Map criteria onto a query plan without rendering it
    pub fn plan(&self, criteria: &CustomerCriteria) -> Result<QueryPlan, CompileError> {
        let projection = self
            .mapping
            .projection()?
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut clauses = vec![
            FilterClause::new(
                self.mapping.path(LogicalField::IsLatest)?,
                ClauseOperator::Equals,
                Literal::Bool(true),
            ),
            FilterClause::new(
                self.mapping.path(LogicalField::CustomerType)?,
                ClauseOperator::Equals,
                Literal::Text(self.customer_type.clone()),
            ),
        ];

        for field in LogicalField::ALL {
            if let Some(clause) = self.clause_for(criteria, field)? {
                clauses.push(clause);
            }
        }

        Ok(QueryPlan {
            object: self.mapping.object.clone(),
            projection,
            clauses,
            limit: criteria.limit(),
        })
    }

    fn clause_for(
        &self,
        criteria: &CustomerCriteria,
        field: LogicalField,
    ) -> Result<Option<FilterClause>, CompileError> {
        let clause = match field.filter_kind() {
            FilterKind::Substring => criteria.text(field).map(|text| {
                (ClauseOperator::Contains, Literal::Text(text.to_string()))
            }),
            FilterKind::Membership => criteria.text(field).map(|text| {
                (ClauseOperator::Includes, Literal::Text(text.to_string()))
            }),
            FilterKind::Numeric => criteria.numeric(field).map(|c| {
                (ClauseOperator::Compare(c.operator), Literal::Number(c.value))
            }),
            FilterKind::ProjectionOnly => None,
        };

        match clause {
            Some((operator, value)) => Ok(Some(FilterClause::new(
                self.mapping.path(field)?,
                operator,
                value,
            ))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use custref_domain::CompareOp;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    const BASE: &str = "IsLatest__c = true AND Account__r.Type = 'Client'";

    fn criteria(value: Value) -> CustomerCriteria {
        CustomerCriteria::from_json(&value).unwrap()
    }

    fn compile(value: Value) -> String {
        QueryCompiler::new(FieldMapping::default())
            .compile(&criteria(value))
            .unwrap()
            .soql
    }

    #[test]
    fn test_empty_criteria() {
        let soql = compile(json!({}));
        assert_eq!(
            soql,
            "SELECT tenant__c, Account__r.Account_Owner_TEXT__c, archived_invoice_count_R12__c, \
             po_I_E_Percent__c, non_po_I_E_percent__c, po_Touchless_Percent__c, \
             Automatic_distribution_percent__c, Account__r.Industry, Account__r.ERP__c, \
             Account__r.Product_Activations__c, Account__r.Account_URL_Link__c, IsLatest__c, \
             Account__r.Type FROM Usage_statistic__c \
             WHERE IsLatest__c = true AND Account__r.Type = 'Client' LIMIT 5"
        );
    }

    #[test]
    fn test_retail_scenario() {
        let soql = compile(json!({
            "industry": "retail",
            "po_touchless_percentage": { "value": 30, "operator": "<" },
            "invoice_volume": { "value": 10000, "operator": ">" },
            "limit": 5
        }));
        let where_clause = soql.split(" WHERE ").nth(1).unwrap();
        assert_eq!(
            where_clause,
            format!(
                "{} AND archived_invoice_count_R12__c > 10000 AND po_Touchless_Percent__c < 30 \
                 AND Account__r.Industry LIKE '%retail%' LIMIT 5",
                BASE
            )
        );
    }

    #[test]
    fn test_every_filter_kind() {
        let soql = compile(json!({
            "account_owner_text": "Jane",
            "tenant": "Acme",
            "erp_system": "SAP",
            "product_activations": "Readsoft Invoices",
            "non_po_percentage": 20,
            "limit": 10
        }));
        assert!(soql.contains(
            "tenant__c LIKE '%Acme%' AND Account__r.Account_Owner_TEXT__c LIKE '%Jane%' \
             AND non_po_I_E_percent__c >= 20 AND Account__r.ERP__c INCLUDES ('sap') \
             AND Account__r.Product_Activations__c INCLUDES ('readsoft invoices') LIMIT 10"
        ));
    }

    #[test]
    fn test_operator_emitted_verbatim() {
        let soql = compile(json!({ "po_percentage": { "value": 40, "operator": "<" } }));
        assert!(soql.contains("po_I_E_Percent__c < 40"));
        for other in ["<=", ">", ">=", "= 40"] {
            assert!(!soql.contains(&format!("po_I_E_Percent__c {}", other)));
        }
    }

    #[test]
    fn test_plan_clauses() {
        let plan = QueryCompiler::new(FieldMapping::default())
            .plan(&criteria(json!({ "automatic_distribution": { "value": 50, "operator": "=" } })))
            .unwrap();
        assert_eq!(plan.clauses.len(), 3);
        assert_eq!(
            plan.clauses[2],
            FilterClause::new(
                "Automatic_distribution_percent__c",
                ClauseOperator::Compare(CompareOp::Eq),
                Literal::Number(50.0)
            )
        );
        assert_eq!(plan.limit, 5);
    }

    #[test]
    fn test_quotes_in_free_text_are_escaped() {
        let soql = compile(json!({ "tenant": "O'Reilly" }));
        assert!(soql.contains("tenant__c LIKE '%O\\'Reilly%'"));
    }

    #[test]
    fn test_missing_mapping_fails_fast() {
        let mapping = FieldMapping::empty("Usage_statistic__c")
            .with(LogicalField::Tenant, "tenant__c");
        let result = QueryCompiler::new(mapping).compile(&CustomerCriteria::default());
        assert!(matches!(
            result,
            Err(CompileError::Mapping(MappingError::Missing(_)))
        ));
    }

    #[test]
    fn test_custom_customer_type() {
        let compiler = QueryCompiler::new(FieldMapping::default()).with_customer_type("Partner");
        let soql = compiler.compile(&CustomerCriteria::default()).unwrap().soql;
        assert!(soql.contains("Account__r.Type = 'Partner'"));
    }

    fn arb_criteria() -> impl Strategy<Value = CustomerCriteria> {
        (
            proptest::option::of("[a-zA-Z ]{1,12}"),
            proptest::option::of(0.0f64..=100.0),
            proptest::option::of(0usize..5),
            1u32..=20,
        )
            .prop_map(|(industry, pct, op, limit)| {
                let mut map = serde_json::Map::new();
                if let Some(industry) = industry {
                    map.insert("industry".into(), json!(industry));
                }
                if let Some(pct) = pct {
                    let op = CompareOp::ALL[op.unwrap_or(4)];
                    map.insert(
                        "po_percentage".into(),
                        json!({ "value": pct, "operator": op.as_str() }),
                    );
                }
                map.insert("limit".into(), json!(limit));
                CustomerCriteria::from_map(&map).unwrap()
            })
    }

    proptest! {
        #[test]
        fn prop_compile_is_deterministic(c in arb_criteria()) {
            let compiler = QueryCompiler::new(FieldMapping::default());
            let first = compiler.compile(&c).unwrap();
            let second = compiler.compile(&c.clone()).unwrap();
            prop_assert_eq!(first.soql, second.soql);
        }

        #[test]
        fn prop_base_filters_and_limit_always_present(c in arb_criteria()) {
            let soql = QueryCompiler::new(FieldMapping::default()).compile(&c).unwrap().soql;
            let where_base = format!(" WHERE {}", BASE);
            prop_assert!(soql.contains(&where_base));
            let limit_suffix = format!(" LIMIT {}", c.limit());
            prop_assert!(soql.ends_with(&limit_suffix));
        }
    }
}
