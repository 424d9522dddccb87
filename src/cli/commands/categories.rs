use std::io::Write;

use serde_json::json;

use crate::cli::OutputFormat;
use crate::models::Category;

pub fn handle(out: &mut dyn Write, output_format: OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let categories: Vec<_> = Category::ALL
                .iter()
                .map(|category| {
                    json!({
                        "name": category.as_str(),
                        "label": category.label(),
                        "default": *category == Category::default()
                    })
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "categories": categories }))?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{:<18} {}", "NAME", "LABEL")?;
            writeln!(out, "{}", "-".repeat(36))?;
            for category in Category::ALL {
                let marker = if category == Category::default() { "*" } else { " " };
                writeln!(out, "{}{:<17} {}", marker, category.as_str(), category.label())?;
            }
        }
    }
    Ok(())
}
