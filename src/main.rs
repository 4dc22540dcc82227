//! Glyph redactor CLI application.
//!
//! Locates sensitive text in PDF documents (including digits split across
//! boxed form fields), writes redaction plans, and applies them with
//! secure text removal.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, LevelFilter};
use std::path::{Path, PathBuf};

use glyph_redactor::{load_plan, load_rules, save_plan, RedactionPlan, RedactionService, Rule};

/// Fragment-aware PDF redaction tool
///
/// Finds literal or regex patterns in PDF text, including numbers whose
/// digits sit in separate boxes, and removes them securely.
#[derive(Parser)]
#[command(name = "glyph-redactor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate matches and write a redaction plan (JSON)
    Locate {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Plan file to write (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        plan: Option<PathBuf>,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Apply a saved redaction plan
    Apply {
        /// Plan file produced by `locate`
        #[arg(short, long, value_name = "FILE")]
        plan: PathBuf,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Locate and apply in one step
    Redact {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Also write the applied plan here
        #[arg(long, value_name = "FILE")]
        plan: Option<PathBuf>,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Print the word-mode search text of each page (for debugging rules)
    Text {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output text file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct RuleArgs {
    /// Literal text to redact (can be specified multiple times)
    #[arg(short = 'P', long, value_name = "TEXT")]
    pattern: Vec<String>,

    /// Regular expression to redact (can be specified multiple times)
    #[arg(short = 'r', long, value_name = "REGEX")]
    regex: Vec<String>,

    /// JSON file holding an array of rules
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Match command-line patterns case-insensitively
    #[arg(long)]
    ignore_case: bool,

    /// Always run the fragment-aware pass for command-line patterns
    #[arg(long, conflicts_with = "no_fragment_aware")]
    fragment_aware: bool,

    /// Never run the fragment-aware pass for command-line patterns
    #[arg(long)]
    no_fragment_aware: bool,
}

impl RuleArgs {
    /// Builds rules from flags, then appends any from the rules file.
    fn build(&self) -> Result<Vec<Rule>> {
        let fragment_aware = match (self.fragment_aware, self.no_fragment_aware) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        let literals = self.pattern.iter().cloned().map(Rule::literal);
        let regexes = self.regex.iter().cloned().map(Rule::regex);

        let mut rules: Vec<Rule> = literals
            .chain(regexes)
            .map(|mut rule| {
                rule.case_sensitive = !self.ignore_case;
                rule.fragment_aware = fragment_aware;
                rule
            })
            .collect();

        if let Some(path) = &self.rules {
            let loaded = load_rules(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?;
            rules.extend(loaded);
        }

        if rules.is_empty() {
            anyhow::bail!("No rules specified. Use --pattern, --regex, or --rules.");
        }
        Ok(rules)
    }
}

/// Command handler wrapping the redaction service.
struct RedactionHandler {
    service: RedactionService,
    verbose: bool,
}

impl RedactionHandler {
    fn new(verbose: bool) -> Self {
        Self {
            service: RedactionService::with_secure_strategy(),
            verbose,
        }
    }

    fn locate(&self, input: &Path, plan_path: Option<&Path>, rules: &[Rule]) -> Result<()> {
        let plan = self
            .service
            .locate(input, rules)
            .with_context(|| format!("Failed to locate matches in {}", input.display()))?;

        match plan_path {
            Some(path) => {
                save_plan(&plan, path)
                    .with_context(|| format!("Failed to write plan to {}", path.display()))?;
                println!(
                    "✓ Located {} region(s) → {}",
                    plan.total_redactions(),
                    path.display()
                );
            }
            None => {
                let json = glyph_redactor::persistence::plan_to_json(&plan)?;
                println!("{}", json);
            }
        }

        if self.verbose {
            self.print_regions(&plan);
        }
        Ok(())
    }

    fn apply(&self, plan_path: &Path, output: &Path) -> Result<()> {
        let plan = load_plan(plan_path)
            .with_context(|| format!("Failed to load plan {}", plan_path.display()))?;
        self.apply_plan(&plan, output)
    }

    fn redact(
        &self,
        input: &Path,
        output: &Path,
        plan_path: Option<&Path>,
        rules: &[Rule],
    ) -> Result<()> {
        let plan = self
            .service
            .locate(input, rules)
            .with_context(|| format!("Failed to locate matches in {}", input.display()))?;

        if let Some(path) = plan_path {
            save_plan(&plan, path)
                .with_context(|| format!("Failed to write plan to {}", path.display()))?;
        }
        if self.verbose {
            self.print_regions(&plan);
        }

        self.apply_plan(&plan, output)
    }

    fn apply_plan(&self, plan: &RedactionPlan, output: &Path) -> Result<()> {
        if self.verbose {
            println!("Input:  {}", plan.source_path().display());
            println!("Output: {}", output.display());
        }

        let result = self
            .service
            .apply(plan, output)
            .with_context(|| "Redaction failed")?;

        if self.verbose {
            println!("\nRedaction Summary:");
            println!("  Pages processed: {}", result.pages_processed);
            println!("  Pages modified:  {}", result.pages_modified);
            println!("  Regions masked:  {}", result.instances_redacted);
        }

        if result.has_redactions() {
            println!(
                "✓ Successfully redacted {} region(s) → {}",
                result.instances_redacted,
                output.display()
            );
        } else {
            println!("⚠ No regions to redact");
        }
        Ok(())
    }

    fn text(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        let pages = self
            .service
            .search_text(input)
            .with_context(|| "Text extraction failed")?;
        let text = pages.join("\n\x0c\n");

        if let Some(output_path) = output {
            std::fs::write(output_path, &text)
                .with_context(|| format!("Failed to write to {}", output_path.display()))?;
            println!(
                "✓ Extracted {} page(s) → {}",
                pages.len(),
                output_path.display()
            );
        } else {
            println!("{}", text);
        }
        Ok(())
    }

    fn print_regions(&self, plan: &RedactionPlan) {
        for region in &plan.regions {
            println!(
                "  page {} [{:.1}, {:.1}, {:.1} x {:.1}] {:?} ({})",
                region.page_number,
                region.x,
                region.y,
                region.width,
                region.height,
                region.matched_text,
                region.rule_pattern
            );
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("glyph-redactor {}", env!("CARGO_PKG_VERSION"));

    let handler = RedactionHandler::new(cli.verbose);

    match &cli.command {
        Commands::Locate { input, plan, rules } => {
            let rules = rules.build()?;
            handler.locate(input, plan.as_deref(), &rules)?;
        }
        Commands::Apply { plan, output } => {
            handler.apply(plan, output)?;
        }
        Commands::Redact {
            input,
            output,
            plan,
            rules,
        } => {
            let rules = rules.build()?;
            handler.redact(input, output, plan.as_deref(), &rules)?;
        }
        Commands::Text { input, output } => {
            handler.text(input, output.as_deref())?;
        }
    }

    Ok(())
}
