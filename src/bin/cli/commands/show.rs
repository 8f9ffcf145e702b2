use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::{FilterArgs, OutputFormat};

pub fn run(
    app: &mut App,
    filter: &FilterArgs,
    index: usize,
    shuffle: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    app.apply_filter(filter)?;

    if shuffle {
        app.session.shuffle_card();
    } else {
        // 1-based on the command line; out-of-range positions are clamped
        app.session.jump_to(index.saturating_sub(1));
    }

    let card = app.session.learn_card();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            for line in terminal::render_learn_card(&card, use_color) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
