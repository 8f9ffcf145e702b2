use std::fs;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use signcoach_lib::flashcards::{EntryInput, EntryUpdate, FlashcardEntry};
use signcoach_lib::image::ImageInput;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::{CardArgs, OutputFormat};

pub fn run_add(
    app: &mut App,
    word: String,
    fields: CardArgs,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let input = EntryInput {
        word,
        meaning: fields.meaning.unwrap_or_default(),
        category: fields.category.unwrap_or_default(),
        difficulty: fields.difficulty.unwrap_or_default(),
        note: fields.note.unwrap_or_default(),
        image: fields.image.map(ImageInput::File),
    };
    if input.word.trim().is_empty() {
        log::warn!("Adding a card with an empty word");
    }

    let entry = app.session.add_entry(input).context("Failed to add card")?;
    print_entry("Added", &entry, format, use_color)
}

pub fn run_edit(
    app: &mut App,
    id: &str,
    word: Option<String>,
    fields: CardArgs,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let update = EntryUpdate {
        word,
        meaning: fields.meaning,
        category: fields.category,
        difficulty: fields.difficulty,
        note: fields.note,
        image: fields.image.map(ImageInput::File),
    };
    if update.is_empty() {
        bail!("Nothing to change. Pass at least one of --word, --meaning, --category, --difficulty, --note, --image");
    }

    match app.session.update_entry(id, update).context("Failed to update card")? {
        Some(entry) => print_entry("Updated", &entry, format, use_color),
        None => bail!("No card with id '{}'", id),
    }
}

pub fn run_remove(app: &mut App, id: &str, format: &OutputFormat) -> Result<()> {
    let word = app.session.entry(id).map(|e| e.word.clone());
    let removed = app.session.remove_entry(id).context("Failed to remove card")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": id, "removed": removed });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if !removed {
                bail!("No card with id '{}'", id);
            }
            println!("Removed \"{}\"", word.unwrap_or_default());
        }
    }

    Ok(())
}

pub fn run_reset(app: &mut App, yes: bool, format: &OutputFormat) -> Result<()> {
    if !yes && !confirm("Replace the whole library with the default cards?")? {
        println!("Cancelled.");
        return Ok(());
    }

    app.session.reset_library().context("Failed to reset library")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "cardCount": app.session.library().len() });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Library reset to {} default cards.", app.session.library().len());
        }
    }

    Ok(())
}

pub fn run_export(app: &App, output: Option<&Path>) -> Result<()> {
    let json = app.session.export_library().context("Failed to export library")?;

    match output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported {} cards to {}", app.session.library().len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

pub fn run_import(app: &mut App, path: &PathBuf, format: &OutputFormat) -> Result<()> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    let count = app.session.import_library(&json).context("Failed to import library")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "imported": count });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Imported {} cards.", count);
            if let Some(dir) = &app.data_dir {
                println!("  Saved in {}", dir.display());
            }
        }
    }

    Ok(())
}

fn print_entry(action: &str, entry: &FlashcardEntry, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entry)?);
        }
        OutputFormat::Plain => {
            println!("{} \"{}\"", action, terminal::paint(&entry.word, Color::BOLD, use_color));
            println!("  Category: {}  Difficulty: {}", entry.category, entry.difficulty);
            if !entry.meaning.is_empty() {
                println!("  Meaning: {}", entry.meaning);
            }
            if !entry.note.is_empty() {
                println!("  Tip: {}", entry.note);
            }
            if let Some(image) = &entry.image {
                println!("  Picture: {}", image);
            }
            println!("  ID: {}", entry.id);
        }
    }

    Ok(())
}

/// Ask a yes/no question on the terminal; refuses when stdin is not one
fn confirm(question: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        bail!("Refusing to continue without confirmation; pass --yes");
    }

    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
