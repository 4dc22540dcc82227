//! Redaction strategies and the service layer.
//!
//! The service locates regions through the [`LocatorEngine`] and hands the
//! resulting plan to a pluggable [`RedactionStrategy`] for masking.

pub mod secure;
pub mod strategy;

pub use secure::SecureRedactionStrategy;
pub use strategy::{ensure_unrotated, RedactionResult, RedactionStrategy};

use crate::config::LocatorConfig;
use crate::domain::{RedactionPlan, Rule};
use crate::error::{RedactorError, RedactorResult};
use crate::layout::{PageTokenizer, SearchText, TokenizerMode};
use crate::locate::LocatorEngine;
use crate::matching::compile_rules;
use crate::source::{GlyphSource, MuPdfGlyphSource};
use std::path::Path;

/// Redaction service coordinating location and strategy execution.
pub struct RedactionService {
    engine: LocatorEngine,
    strategy: Box<dyn RedactionStrategy>,
}

impl RedactionService {
    /// Creates a new redaction service with the specified strategy.
    pub fn new(strategy: Box<dyn RedactionStrategy>) -> Self {
        Self {
            engine: LocatorEngine::default(),
            strategy,
        }
    }

    /// Creates a service with secure (physical removal) redaction.
    pub fn with_secure_strategy() -> Self {
        Self::new(Box::new(SecureRedactionStrategy::default()))
    }

    /// Uses `config` for location and its padding for the secure strategy.
    pub fn with_config(config: LocatorConfig) -> Self {
        let strategy = SecureRedactionStrategy::new().with_padding(config.mask_padding);
        Self {
            engine: LocatorEngine::new(config),
            strategy: Box::new(strategy),
        }
    }

    pub fn engine(&self) -> &LocatorEngine {
        &self.engine
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Computes the redaction plan for a PDF.
    ///
    /// An empty rule list yields an empty plan. Rules are compiled before
    /// the document is opened so a malformed pattern is reported first.
    pub fn locate(&self, input: &Path, rules: &[Rule]) -> RedactorResult<RedactionPlan> {
        validate_input(input)?;
        compile_rules(rules)?;

        if rules.is_empty() {
            return Ok(RedactionPlan::new(input, Vec::new()));
        }

        let source = MuPdfGlyphSource::open(input)?;
        self.engine.locate(&source, rules)
    }

    /// Applies a plan and writes the masked document to `output`.
    pub fn apply(&self, plan: &RedactionPlan, output: &Path) -> RedactorResult<RedactionResult> {
        self.strategy.apply(plan, output)
    }

    /// Locates and applies in one step.
    ///
    /// # Returns
    /// The plan that was applied together with the mask statistics
    pub fn redact(
        &self,
        input: &Path,
        output: &Path,
        rules: &[Rule],
    ) -> RedactorResult<(RedactionPlan, RedactionResult)> {
        let plan = self.locate(input, rules)?;
        let result = self.apply(&plan, output)?;
        Ok((plan, result))
    }

    /// Word-mode search text for every page, for inspecting what rules see.
    pub fn search_text(&self, input: &Path) -> RedactorResult<Vec<String>> {
        validate_input(input)?;
        let source = MuPdfGlyphSource::open(input)?;
        (0..source.page_count())
            .map(|index| {
                let page = source.page(index)?;
                let tokens = PageTokenizer::new(&page, self.engine.config())
                    .tokenize(TokenizerMode::Word);
                Ok(SearchText::build(&tokens).text)
            })
            .collect()
    }
}

fn validate_input(input: &Path) -> RedactorResult<()> {
    if input.as_os_str().is_empty() {
        return Err(RedactorError::InvalidInput {
            parameter: "input".to_string(),
            reason: "No document path given".to_string(),
        });
    }
    if !input.exists() {
        return Err(RedactorError::DocumentNotFound {
            path: input.to_path_buf(),
        });
    }
    Ok(())
}
