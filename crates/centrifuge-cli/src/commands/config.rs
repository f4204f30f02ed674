//! Config command implementation.

use std::io::Write;

use crate::commands::Context;
use crate::error::Result;

/// Print the effective configuration (defaults, file and environment merged).
pub fn execute(context: &Context) -> Result<()> {
    let rendered = context.config.to_toml_string()?;
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{rendered}")?;
    Ok(())
}
