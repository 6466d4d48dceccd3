use anyhow::Result;
use promptcheck_core::extract_constraints;
use promptcheck_core::parser::SAMPLE_PROMPT;

use super::extract::render;
use crate::cli::app::DemoArgs;

/// Execute the demo command
pub fn execute(args: DemoArgs) -> Result<()> {
    println!("Prompt:\n{}", SAMPLE_PROMPT.trim_end());

    let constraints = extract_constraints(SAMPLE_PROMPT)?;
    println!("\nConstraints:\n{}", render(&constraints, args.pretty)?);
    Ok(())
}
