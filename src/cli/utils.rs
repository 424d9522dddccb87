use std::io::Write;

use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::sync::BudgetStore;
use crate::views::{BudgetListView, Rendered};

/// Output a success message in the appropriate format
pub fn output_success(
    out: &mut dyn Write,
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                if let Some(object) = response.as_object_mut() {
                    object.extend(extra);
                }
            }

            writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "✓ {}", message)?;
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    out: &mut dyn Write,
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Error: {}", message)?;
        }
    }
    Ok(())
}

/// Output a warning line after a result; JSON callers carry it in the payload instead
pub fn output_warning(out: &mut dyn Write, output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    if let OutputFormat::Text = output_format {
        writeln!(out, "! {}", message)?;
    }
    Ok(())
}

/// Output the budgets collection as a table, JSON, or the empty placeholder
pub fn output_budgets(
    out: &mut dyn Write,
    output_format: &OutputFormat,
    view: &BudgetListView,
    store: &BudgetStore,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let rows = match view.view(store) {
                Rendered::Placeholder(_) => Vec::new(),
                Rendered::Table(rows) => rows,
            };
            let mut response = json!({ "budgets": rows });
            if let Some(notice) = view.notice() {
                response["notice"] = json!(notice);
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
        }
        OutputFormat::Text => {
            write!(out, "{}", view.render_text(store))?;
        }
    }
    Ok(())
}
