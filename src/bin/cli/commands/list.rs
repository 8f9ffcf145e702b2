use anyhow::Result;

use signcoach_lib::flashcards::CategoryFilter;

use crate::app::App;
use crate::render::terminal;
use crate::{FilterArgs, OutputFormat};

pub fn run(app: &mut App, filter: &FilterArgs, format: &OutputFormat, use_color: bool) -> Result<()> {
    app.apply_filter(filter)?;
    let rows = app.session.manage_rows();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Plain => {
            if rows.is_empty() {
                println!("No items. Add words with `signcoach-cli add --word <WORD>`.");
                return Ok(());
            }

            for line in terminal::render_manage_rows(&rows, use_color) {
                println!("{}", line);
            }
            println!("\n{} of {} cards", rows.len(), app.session.library().len());
        }
    }

    Ok(())
}

pub fn run_categories(app: &App, format: &OutputFormat) -> Result<()> {
    let library = app.session.library();
    let counts: Vec<(String, usize)> = app.session.categories()
        .iter()
        .map(|c| {
            let filter = CategoryFilter::from(c.as_str());
            let count = library.iter().filter(|e| filter.matches(e)).count();
            (c.clone(), count)
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = counts.iter().map(|(name, count)| {
                serde_json::json!({
                    "name": name,
                    "cardCount": count,
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let name_w = counts.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(8).max(8);
            for (name, count) in &counts {
                println!("{:<name_w$} {:>4}", name, count, name_w = name_w);
            }
        }
    }

    Ok(())
}
