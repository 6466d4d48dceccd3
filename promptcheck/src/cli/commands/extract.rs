//! Extract constraints command

use anyhow::{Context, Result};
use promptcheck_core::{extract_constraints, ConstraintSet};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::cli::app::ExtractArgs;

/// Execute the extract command
pub fn execute(args: ExtractArgs) -> Result<()> {
    let prompt = read_prompt(args.text, args.file.as_deref())?;
    debug!("Prompt is {} bytes", prompt.len());

    let constraints =
        extract_constraints(&prompt).context("Failed to extract constraints from prompt")?;
    info!("Found {} constraint(s)", constraints.len());

    println!("{}", render(&constraints, args.pretty)?);
    Ok(())
}

/// Resolve the prompt from inline text, a file, or stdin
pub fn read_prompt(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt file {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read prompt from stdin")?;
    Ok(buffer)
}

/// Render a constraint set as JSON
pub fn render(constraints: &ConstraintSet, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(constraints)
    } else {
        serde_json::to_string(constraints)
    };
    json.context("Failed to serialize constraints")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_inline_text_wins() {
        let prompt = read_prompt(Some("Write 120 words".to_string()), None).unwrap();
        assert_eq!(prompt, "Write 120 words");
    }

    #[test]
    fn test_read_prompt_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Pilot runs for 90 days.").unwrap();

        let prompt = read_prompt(None, Some(file.path())).unwrap();
        assert_eq!(prompt.trim(), "Pilot runs for 90 days.");
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = read_prompt(None, Some(Path::new("/nonexistent/prompt.txt"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/prompt.txt"));
    }

    #[test]
    fn test_render_compact() {
        let constraints = extract_constraints("Pilot runs for 90 days.").unwrap();
        assert_eq!(
            render(&constraints, false).unwrap(),
            r#"{"timeframe":{"type":"fixed","unit":"days","target":90}}"#
        );
        assert!(render(&constraints, true).unwrap().contains('\n'));
    }
}
