//! Read-only query commands.
//!
//! Each one loads (or analyzes) the input and prints one query result as JSON.

use crate::cli::{DependentsArgs, FileArgs, HotspotsArgs, InputArgs};
use crate::commands::Context;
use crate::error::Result;
use crate::input;

fn load(input: &InputArgs, context: &Context) -> Result<centrifuge_graph::CodebaseGraph> {
    input::load_graph(input.path(), &context.config.analysis)
}

pub fn overview(input: &InputArgs, context: &Context) -> Result<()> {
    let graph = load(input, context)?;
    context.emit(&graph.overview())
}

pub fn file(args: &FileArgs, context: &Context) -> Result<()> {
    let graph = load(&args.input, context)?;
    context.emit(&graph.file_context(&args.path)?)
}

pub fn dependents(args: &DependentsArgs, context: &Context) -> Result<()> {
    let graph = load(&args.input, context)?;
    let report = graph.dependents(&args.path, args.depth)?;
    tracing::debug!(
        file = %args.path,
        affected = report.total_affected,
        "collected dependents"
    );
    context.emit(&report)
}

pub fn hotspots(args: &HotspotsArgs, context: &Context) -> Result<()> {
    let graph = load(&args.input, context)?;
    context.emit(&graph.hotspots(args.metric, args.limit))
}

pub fn modules(input: &InputArgs, context: &Context) -> Result<()> {
    let graph = load(input, context)?;
    context.emit(&graph.module_structure())
}

pub fn forces(input: &InputArgs, context: &Context) -> Result<()> {
    let graph = load(input, context)?;
    context.emit(&graph.force_analysis)
}
