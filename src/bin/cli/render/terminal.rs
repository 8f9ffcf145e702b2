use signcoach_lib::session::{LearnCard, ManageRow, PracticeCard};

/// ANSI color codes
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

const CARD_WIDTH: usize = 60;

/// Wrap `text` in `style` when colors are on
pub fn paint(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render the Learn view card
pub fn render_learn_card(card: &LearnCard, use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = format!("{} \u{2022} {}", card.category, card.difficulty);
    if let Some((pos, len)) = card.position {
        header.push_str(&format!("    {}/{}", pos, len));
    }
    lines.push(paint(&header, Color::GRAY, use_color));
    lines.push(String::new());
    lines.push(paint(&card.word, Color::BOLD, use_color));
    lines.extend(wrap_lines(&card.meaning, "", CARD_WIDTH));
    lines.push(String::new());

    let tip_style = if card.is_empty() { Color::DIM } else { Color::CYAN };
    for line in wrap_lines(&card.note, "", CARD_WIDTH) {
        lines.push(paint(&line, tip_style, use_color));
    }

    if !card.is_empty() {
        lines.push(image_line(card.image.as_ref(), use_color));
    }
    lines
}

/// Render the Practice view card; the answer only when revealed
pub fn render_practice_card(card: &PracticeCard, use_color: bool) -> Vec<String> {
    let mut lines = vec![paint(&card.word, Color::BOLD, use_color)];

    if card.is_empty() {
        lines.push(paint("\u{2014}", Color::DIM, use_color));
        return lines;
    }

    lines.push(image_line(card.image.as_ref(), use_color));
    lines.push(String::new());

    if card.revealed {
        if let Some(meaning) = &card.meaning {
            lines.extend(wrap_lines(meaning, "", CARD_WIDTH));
        }
        if let Some(note) = &card.note {
            for line in wrap_lines(note, "", CARD_WIDTH) {
                lines.push(paint(&line, Color::CYAN, use_color));
            }
        }
    } else {
        lines.push(paint("(answer hidden)", Color::DIM, use_color));
    }
    lines
}

/// Render the Manage list as a table
pub fn render_manage_rows(rows: &[ManageRow], use_color: bool) -> Vec<String> {
    let word_w = rows.iter().map(|r| r.word.chars().count()).max().unwrap_or(4).clamp(4, 24);
    let meta_w = rows.iter().map(|r| r.meta().chars().count()).max().unwrap_or(4).clamp(4, 28);

    let mut lines = Vec::new();
    lines.push(paint(
        &format!("{:<word_w$} {:<meta_w$} {}", "Word", "Category", "Meaning"),
        Color::BOLD,
        use_color,
    ));
    lines.push(format!(
        "{} {} {}",
        "\u{2500}".repeat(word_w),
        "\u{2500}".repeat(meta_w),
        "\u{2500}".repeat(24)
    ));

    for row in rows {
        let picture = if row.has_image { " \u{25a3}" } else { "" };
        lines.push(format!(
            "{:<word_w$} {:<meta_w$} {}{}",
            truncate(&row.word, word_w),
            truncate(&row.meta(), meta_w),
            row.meaning,
            picture,
        ));
        if let Some(tip) = &row.tip {
            let indent = " ".repeat(word_w + 1);
            lines.push(paint(&format!("{}Tip: {}", indent, tip), Color::GRAY, use_color));
        }
        lines.push(paint(&format!("{}id: {}", " ".repeat(word_w + 1), row.id), Color::DIM, use_color));
    }

    lines
}

fn image_line(image: Option<&signcoach_lib::image::ImageData>, use_color: bool) -> String {
    match image {
        Some(image) => paint(&image.to_string(), Color::MAGENTA, use_color),
        None => paint("(no picture)", Color::DIM, use_color),
    }
}

/// Shorten to `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
        } else {
            // Simple word wrap
            let mut current_line = String::new();
            for word in line.split_whitespace() {
                if current_line.is_empty() {
                    current_line = word.to_string();
                } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                    current_line.push(' ');
                    current_line.push_str(word);
                } else {
                    lines.push(format!("{}{}", prefix, current_line));
                    current_line = word.to_string();
                }
            }
            if !current_line.is_empty() {
                lines.push(format!("{}{}", prefix, current_line));
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use signcoach_lib::flashcards::FlashcardEntry;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Thank you very much", 10), "Thank y...");
        assert_eq!(truncate("ñandú ñandú", 8), "ñandú...");
    }

    #[test]
    fn test_wrap_lines() {
        let lines = wrap_lines("one two three four", "", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert!(wrap_lines("", "", 10).is_empty());
    }

    #[test]
    fn test_practice_card_hides_answer_text() {
        let entry = FlashcardEntry::new("Water", "Ask for a drink", "Needs", "", "", None);
        let hidden = render_practice_card(&PracticeCard::new(Some(&entry), false), false);
        assert!(!hidden.iter().any(|l| l.contains("drink")));

        let shown = render_practice_card(&PracticeCard::new(Some(&entry), true), false);
        assert!(shown.iter().any(|l| l.contains("drink")));
    }

    #[test]
    fn test_learn_card_empty_state() {
        let lines = render_learn_card(&LearnCard::new(None, 0, 0), false);
        assert!(lines.iter().any(|l| l == "No cards found"));
    }
}
