use std::path::PathBuf;

use anyhow::{Context, Result};

use signcoach_lib::image::ImageInput;
use signcoach_lib::profile::Profile;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run_show(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let profile = app.session.profile();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint(&app.session.subtitle(), Color::BOLD, use_color));
            match profile {
                Some(profile) => print_profile(profile),
                None => println!("  No profile set."),
            }
        }
    }

    Ok(())
}

pub fn run_set(
    app: &mut App,
    name: &str,
    photo: Option<PathBuf>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let photo = photo.map(ImageInput::File);
    let profile = app
        .session
        .save_profile(name, photo.as_ref())
        .context("Failed to save profile")?
        .clone();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        OutputFormat::Plain => {
            println!("Saved. {}", terminal::paint(&app.session.subtitle(), Color::BOLD, use_color));
            print_profile(&profile);
        }
    }

    Ok(())
}

pub fn run_clear(app: &mut App, format: &OutputFormat) -> Result<()> {
    let removed = app.session.clear_profile().context("Failed to clear profile")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "cleared": removed });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if removed {
                println!("Profile cleared.");
            } else {
                println!("No profile to clear.");
            }
        }
    }

    Ok(())
}

fn print_profile(profile: &Profile) {
    let name = if profile.name.is_empty() { "(no name)" } else { profile.name.as_str() };
    println!("  Name: {}", name);
    match &profile.photo {
        Some(photo) => println!("  Photo: {}", photo),
        None => println!("  Photo: none"),
    }
    println!("  Updated: {}", profile.updated_at.format("%Y-%m-%d %H:%M"));
}
