//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::matcher::VocabularyMatcher;
use crate::parser::parse_llm_response;
use crate::prompt::{PromptBuilder, CRITERIA_SCHEMA};
use crate::types::{Correction, Extraction, ExtractionStatus, Unmatched};
use custref_domain::criteria::is_criteria_key;
use custref_domain::traits::LlmProvider;
use custref_domain::{CustomerCriteria, Vocabularies, VocabularyKind};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

/// Converts a free-text request into validated criteria
///
/// Holds no mutable state: one extractor can serve any number of requests,
/// from any number of threads if the provider allows it.
pub struct CriteriaExtractor<L>
where
    L: LlmProvider,
{
    llm: L,
    vocabularies: Vocabularies,
    config: ExtractorConfig,
}

impl<L> CriteriaExtractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new extractor
    pub fn new(llm: L, vocabularies: Vocabularies, config: ExtractorConfig) -> Self {
        Self {
            llm,
            vocabularies,
            config,
        }
    }

    /// The underlying provider
    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract criteria, falling back to the default on any failure
    pub fn extract(&self, prompt: &str) -> CustomerCriteria {
        self.extract_outcome(prompt).criteria
    }

    /// Extract criteria and report how they were obtained
    pub fn extract_outcome(&self, prompt: &str) -> Extraction {
        match self.try_extract(prompt) {
            Ok(extraction) => extraction,
            Err(e) => {
                error!("Error parsing criteria: {}", e);
                Extraction::fallback(e)
            }
        }
    }

    /// Extract criteria, returning the failure instead of falling back
    pub fn try_extract(&self, prompt: &str) -> Result<Extraction, ExtractorError> {
        let length = prompt.chars().count();
        if length > self.config.max_prompt_length {
            return Err(ExtractorError::PromptTooLong(
                length,
                self.config.max_prompt_length,
            ));
        }

        info!("Starting criteria parsing for prompt: '{}'", prompt);

        let instruction = PromptBuilder::new(prompt).build();
        debug!("Instruction length: {} chars", instruction.len());

        let response = self.call_llm(&instruction)?;
        info!("Raw LLM response: {}", response);

        let mut map = parse_llm_response(&response)?;

        let ignored_keys: Vec<String> = map
            .keys()
            .filter(|key| !is_criteria_key(key))
            .cloned()
            .collect();
        if !ignored_keys.is_empty() {
            debug!("Ignoring unknown keys: {:?}", ignored_keys);
        }

        let (corrections, unmatched) = if self.config.vocabulary_correction {
            self.correct_vocabulary(&mut map)
        } else {
            (Vec::new(), Vec::new())
        };

        let criteria = CustomerCriteria::from_map(&map)?;
        info!("Successfully created criteria: {}", criteria);

        Ok(Extraction {
            criteria,
            status: ExtractionStatus::Extracted,
            corrections,
            unmatched,
            ignored_keys,
        })
    }

    fn call_llm(&self, instruction: &str) -> Result<String, ExtractorError> {
        let result = if self.config.structured_output {
            self.llm.generate_structured(instruction, CRITERIA_SCHEMA)
        } else {
            self.llm.generate(instruction)
        };
        result.map_err(|e| ExtractorError::Llm(e.to_string()))
    }

    /// Replace categorical values with their vocabulary entries, in place
    ///
    /// Values with no close entry are left untouched. Non-string values are
    /// left for validation to reject.
    fn correct_vocabulary(&self, map: &mut Map<String, Value>) -> (Vec<Correction>, Vec<Unmatched>) {
        let mut corrections = Vec::new();
        let mut unmatched = Vec::new();

        for kind in VocabularyKind::ALL {
            let field = kind.field();
            let Some(Value::String(value)) = map.get_mut(field.name()) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }

            match VocabularyMatcher::new(self.vocabularies.get(kind)).find(value) {
                Some(canonical) => {
                    info!("Mapped {} to '{}'", kind.label(), canonical);
                    if value.as_str() != canonical {
                        corrections.push(Correction {
                            field,
                            original: value.clone(),
                            canonical: canonical.to_string(),
                        });
                    }
                    *value = canonical.to_string();
                }
                None => {
                    warn!("No close match found for {} '{}'", kind.label(), value);
                    unmatched.push(Unmatched {
                        field,
                        value: value.clone(),
                    });
                }
            }
        }

        (corrections, unmatched)
    }
}
