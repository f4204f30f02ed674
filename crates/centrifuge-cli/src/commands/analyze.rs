//! Analyze command implementation.

use console::style;

use crate::cli::AnalyzeArgs;
use crate::commands::Context;
use crate::error::Result;
use crate::input;

/// Execute the analyze command.
///
/// Prints the full `CodebaseGraph`, or writes it to `--output` and reports the
/// destination on stderr.
pub fn execute(args: AnalyzeArgs, context: &Context) -> Result<()> {
    let graph = input::load_graph(args.input.path(), &context.config.analysis)?;

    tracing::info!(
        files = graph.stats.total_files,
        dependencies = graph.stats.total_dependencies,
        cycles = graph.stats.circular_deps.len(),
        "analysis complete"
    );

    let Some(path) = &args.output else {
        return context.emit(&graph);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, context.to_json(&graph)?)?;

    eprintln!(
        "{} Wrote analysis of {} file(s) to {}",
        style("✔").for_stderr().green().bold(),
        style(graph.stats.total_files).for_stderr().cyan(),
        style(path.display()).for_stderr().bold()
    );
    Ok(())
}
