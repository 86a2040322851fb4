pub mod cli;
pub mod criteria;
pub mod filter;
pub mod input;
pub mod logging;
pub mod output;
pub mod registry;

use anyhow::Context;
pub use cli::{Cli, ColorMode, OutputFormat, cli_parse};
pub use criteria::{CriteriaSet, Criterion, NamedCriterion, ValidationError};
pub use filter::{FilterError, FilterPlan, Highlighter, window};
pub use input::{Line, read_log_file, split_lines};
pub use registry::{PatternRegistry, RegistryError};

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    logging::init_logging(cli.verbose, cli.quiet);

    tracing::info!(
        file = %cli.file.display(),
        pattern_file = %cli.pattern_file.display(),
        "starting"
    );

    let registry = PatternRegistry::load(&cli.pattern_file)?;

    if cli.list_patterns {
        output::write_stdout(&output::render_pattern_table(&registry))
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let criteria = cli.criteria();
    let plan = FilterPlan::build(&registry, &criteria)?;

    let lines = read_log_file(&cli.file)
        .with_context(|| format!("Failed to read log file '{}'", cli.file.display()))?;
    tracing::info!(lines = lines.len(), steps = plan.steps().len(), "filtering");

    let highlighter = Highlighter::new(cli.highlight_enabled());
    let filtered = plan.apply(lines, &highlighter);
    let selected = window(&filtered, cli.first, cli.last);
    tracing::info!(
        matched = filtered.len(),
        printed = selected.len(),
        "done"
    );

    let rendered = match cli.format {
        OutputFormat::Text => output::render_text(selected),
        OutputFormat::Json => output::render_json(&cli.file, selected)
            .context("Failed to serialize JSON output")?,
    };

    output::write_stdout(&rendered).context("Failed to write to stdout")?;
    if let Some(path) = &cli.output {
        output::write_output_file(path, &rendered)
            .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
    }

    Ok(())
}
