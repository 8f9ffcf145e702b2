use anyhow::Result;

use signcoach_lib::ViewMode;

use crate::app::App;
use crate::render::terminal;
use crate::{FilterArgs, OutputFormat};

pub fn run(
    app: &mut App,
    filter: &FilterArgs,
    count: usize,
    reveal: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    app.apply_filter(filter)?;

    let mut cards = Vec::with_capacity(count);
    for i in 0..count.max(1) {
        if i == 0 {
            // Entering Practice performs the first draw
            app.session.switch_view(ViewMode::Practice);
        } else {
            app.session.practice_next();
        }
        if reveal {
            app.session.toggle_reveal();
        }

        let card = app.session.practice_card();
        let empty = card.is_empty();
        cards.push(card);
        if empty {
            break;
        }
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                for line in terminal::render_practice_card(card, use_color) {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}
