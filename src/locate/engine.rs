//! Per-page and per-document orchestration of tokenization, matching,
//! region building and merging.

use std::path::PathBuf;

use log::{debug, info};
use rayon::prelude::*;

use super::merge::merge_overlapping;
use super::region::build_regions;
use crate::config::LocatorConfig;
use crate::domain::{PageContent, RedactionPlan, Region, Rule, Token};
use crate::error::RedactorResult;
use crate::layout::{PageTokenizer, SearchText, TokenizerMode};
use crate::matching::{compile_rules, CompiledRule};
use crate::source::GlyphSource;

/// One tokenization pass over a page and the search text built from it.
struct TokenPass {
    tokens: Vec<Token>,
    search: SearchText,
}

impl TokenPass {
    fn new(tokens: Vec<Token>) -> Self {
        let search = SearchText::build(&tokens);
        Self { tokens, search }
    }

    fn regions(&self, rule: &CompiledRule, page: &PageContent, line_tolerance: f32) -> Vec<Region> {
        rule.find_matches(self.search.as_str())
            .iter()
            .flat_map(|found| {
                build_regions(
                    found,
                    &self.search,
                    &self.tokens,
                    page,
                    rule.pattern(),
                    line_tolerance,
                )
            })
            .collect()
    }
}

/// Locates rule matches on pages and turns them into regions.
#[derive(Debug, Clone, Default)]
pub struct LocatorEngine {
    config: LocatorConfig,
}

impl LocatorEngine {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Regions for one page, deduplicated.
    ///
    /// The word pass always runs. The fragment-aware pass is built once
    /// per page if any rule asks for it, and only those rules search it.
    pub fn locate_page(&self, page: &PageContent, rules: &[CompiledRule]) -> Vec<Region> {
        if rules.is_empty() || page.is_empty() {
            return Vec::new();
        }

        let tokenizer = PageTokenizer::new(page, &self.config);
        let tolerance = tokenizer.line_tolerance();

        let word_pass = TokenPass::new(tokenizer.tokenize(TokenizerMode::Word));
        let fragment_pass = rules
            .iter()
            .any(CompiledRule::fragment_aware)
            .then(|| TokenPass::new(tokenizer.tokenize(TokenizerMode::FragmentAware)));

        let mut regions = Vec::new();
        for rule in rules {
            regions.extend(word_pass.regions(rule, page, tolerance));
            if let Some(pass) = fragment_pass.as_ref().filter(|_| rule.fragment_aware()) {
                regions.extend(pass.regions(rule, page, tolerance));
            }
        }

        let found = regions.len();
        let merged = merge_overlapping(regions, self.config.merge_overlap_ratio);
        debug!(
            "page {}: {} raw regions, {} after merge",
            page.number,
            found,
            merged.len()
        );
        merged
    }

    /// Runs every rule over every page of the source, in document order.
    ///
    /// Rules are compiled before any page is read, so a malformed pattern
    /// fails once up front.
    pub fn locate<S>(&self, source: &S, rules: &[Rule]) -> RedactorResult<RedactionPlan>
    where
        S: GlyphSource + ?Sized,
    {
        let compiled = compile_rules(rules)?;
        let mut regions = Vec::new();

        if !compiled.is_empty() {
            for index in 0..source.page_count() {
                let page = source.page(index)?;
                regions.extend(self.locate_page(&page, &compiled));
            }
        }

        let plan = RedactionPlan::new(source.source_path(), regions);
        info!(
            "{}: {} region(s) from {} rule(s) over {} page(s)",
            plan.source_path().display(),
            plan.total_redactions(),
            rules.len(),
            source.page_count()
        );
        Ok(plan)
    }

    /// Processes materialized pages concurrently, then restores page order.
    ///
    /// Produces the same plan as running the pages sequentially.
    pub fn locate_pages_parallel(
        &self,
        source_path: impl Into<PathBuf>,
        pages: &[PageContent],
        rules: &[Rule],
    ) -> RedactorResult<RedactionPlan> {
        let compiled = compile_rules(rules)?;

        let mut per_page: Vec<(usize, Vec<Region>)> = pages
            .par_iter()
            .map(|page| (page.number, self.locate_page(page, &compiled)))
            .collect();
        per_page.sort_by_key(|(number, _)| *number);

        let regions = per_page.into_iter().flat_map(|(_, r)| r).collect();
        Ok(RedactionPlan::new(source_path, regions))
    }
}
