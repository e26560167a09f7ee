//! Instruction template for criteria extraction

use custref_domain::CompareOp;

/// Builds the prompt sent to the LLM for one user request
pub struct PromptBuilder {
    request: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for a user request
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
        }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Field and operator instructions
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Operator vocabulary, straight from the operator type
        prompt.push_str("Allowed operators: ");
        let symbols: Vec<String> = CompareOp::ALL
            .iter()
            .map(|op| format!("\"{}\"", op))
            .collect();
        prompt.push_str(&symbols.join(", "));
        prompt.push_str("\n\n");

        // 3. Output contract
        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt.push_str("\n\n");

        // 4. The request itself, last
        prompt.push_str("User request: ");
        prompt.push_str(self.request.trim());
        prompt.push('\n');

        prompt
    }
}

/// JSON schema handed to providers that support structured output
pub const CRITERIA_SCHEMA: &str = r##"{
  "type": "object",
  "properties": {
    "account_owner_text": { "type": "string" },
    "tenant": { "type": "string" },
    "invoice_volume": { "$ref": "#/definitions/numeric" },
    "po_percentage": { "$ref": "#/definitions/numeric" },
    "non_po_percentage": { "$ref": "#/definitions/numeric" },
    "po_touchless_percentage": { "$ref": "#/definitions/numeric" },
    "automatic_distribution": { "$ref": "#/definitions/numeric" },
    "erp_system": { "type": "string" },
    "industry": { "type": "string" },
    "product_activations": { "type": "string" },
    "limit": { "type": "integer", "minimum": 1, "maximum": 20 }
  },
  "definitions": {
    "numeric": {
      "type": "object",
      "properties": {
        "value": { "type": "number" },
        "operator": { "enum": ["=", "<", "<=", ">", ">="] }
      },
      "required": ["value", "operator"]
    }
  }
}"##;

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract the following parameters from the user's request. Return only a JSON object with the extracted values.

For numeric parameters (invoice_volume, po_percentage, non_po_percentage, po_touchless_percentage, automatic_distribution),
determine if the user wants:
- Exact equality ("="): phrases like "exactly", "equal to", "is"
- Less than ("<"): phrases like "less than", "below", "under"
- Less than or equal ("<="): phrases like "at most", "maximum", "no more than"
- Greater than (">"): phrases like "more than", "above", "over"
- Greater than or equal (">="): phrases like "at least", "minimum", "no less than"

For these numeric fields, return an object with:
- "value": the numeric value as a JSON number (write 10k as 10000)
- "operator": one of the allowed operators, based on the user's intent

Parameters to extract:
- account_owner_text: Account owner name
- tenant: Name of the customer
- invoice_volume: Invoice volume with comparison operator
- po_percentage: Percentage of PO invoices with comparison operator (0-100)
- non_po_percentage: Percentage of non-PO invoices with comparison operator (0-100)
- po_touchless_percentage: Percentage of touchless PO invoices with comparison operator (0-100)
- automatic_distribution: Percentage of automatic distribution with comparison operator (0-100)
- erp_system: The ERP system used by the customer
- industry: The industry of the customer (e.g., manufacturing, retail)
- product_activations: Product activations
- limit: Number of results to return (default 5, max 20)

Leave out every parameter the request does not mention. Do not guess values."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Example output format for numeric fields:
"invoice_volume": {"value": 1000, "operator": ">="}
"po_percentage": {"value": 50, "operator": "="}

Return ONLY valid JSON. Do not include any additional text or explanation."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_request() {
        let prompt = PromptBuilder::new("  retail customers on SAP ").build();
        assert!(prompt.ends_with("User request: retail customers on SAP\n"));
    }

    #[test]
    fn test_prompt_lists_every_field() {
        let prompt = PromptBuilder::new("x").build();
        for key in [
            "account_owner_text",
            "tenant",
            "invoice_volume",
            "po_percentage",
            "non_po_percentage",
            "po_touchless_percentage",
            "automatic_distribution",
            "erp_system",
            "industry",
            "product_activations",
            "limit",
        ] {
            assert!(prompt.contains(key), "prompt is missing {}", key);
        }
    }

    #[test]
    fn test_prompt_lists_operators_and_cues() {
        let prompt = PromptBuilder::new("x").build();
        assert!(prompt.contains(r#"Allowed operators: "=", "<", "<=", ">", ">=""#));
        assert!(prompt.contains("at least"));
        assert!(prompt.contains("under"));
        assert!(prompt.contains("exactly"));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(CRITERIA_SCHEMA).unwrap();
        assert_eq!(schema["properties"]["limit"]["maximum"], 20);
    }
}
