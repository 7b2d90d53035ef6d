use crate::catalog::{Catalog, MediaRecord, ResultSet};
use crate::commands::CommandDefinition;
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const AMBER: Color = Color::Rgb {
        r: 255,
        g: 191,
        b: 0,
    };
    pub const TEAL: Color = Color::Rgb {
        r: 0,
        g: 200,
        b: 180,
    };
    pub const CORAL: Color = Color::Rgb {
        r: 255,
        g: 127,
        b: 80,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 230,
        b: 118,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const LAVENDER: Color = Color::Rgb {
        r: 170,
        g: 150,
        b: 255,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

pub mod box_chars {
    pub const DOUBLE_TOP_LEFT: &str = "╔";
    pub const DOUBLE_TOP_RIGHT: &str = "╗";
    pub const DOUBLE_BOTTOM_LEFT: &str = "╚";
    pub const DOUBLE_BOTTOM_RIGHT: &str = "╝";
    pub const DOUBLE_HORIZONTAL: &str = "═";
    pub const DOUBLE_VERTICAL: &str = "║";

    pub const SINGLE_HORIZONTAL: &str = "─";
    pub const SINGLE_VERTICAL: &str = "│";

    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";

    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";

    pub const BULLET_EMPTY: &str = "○";
    pub const DIAMOND: &str = "◆";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
    pub const ELLIPSIS: &str = "…";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_banner() {
    let banner = r#"
    ███╗   ███╗███████╗██████╗ ██╗ █████╗
    ████╗ ████║██╔════╝██╔══██╗██║██╔══██╗
    ██╔████╔██║█████╗  ██║  ██║██║███████║
    ██║╚██╔╝██║██╔══╝  ██║  ██║██║██╔══██║
    ██║ ╚═╝ ██║███████╗██████╔╝██║██║  ██║
    ╚═╝     ╚═╝╚══════╝╚═════╝ ╚═╝╚═╝  ╚═╝
"#;

    let gradient_colors = [
        colors::AMBER,
        colors::AMBER,
        colors::CORAL,
        colors::CORAL,
        colors::LAVENDER,
        colors::LAVENDER,
        colors::TEAL,
    ];

    for (i, line) in banner.lines().enumerate() {
        let color = gradient_colors.get(i).unwrap_or(&colors::AMBER);
        println!("{}", line.with(*color).bold());
    }

    let subtitle = "  ═══════════════════  CATALOG  ═══════════════════";
    println!("{}", subtitle.with(colors::DIM));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        box_chars::CROSS_MARK.with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::CORAL).bold(),
        message.with(colors::CORAL)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Section Headers
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 60;

pub fn print_section_header(title: &str) {
    let title_len = title.width();
    let padding = SECTION_WIDTH.saturating_sub(title_len + 4) / 2;

    println!();
    print!("{}", box_chars::ROUND_TOP_LEFT.with(colors::AMBER));
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL.repeat(padding).with(colors::AMBER)
    );
    print!(
        " {} ",
        title.with(colors::AMBER).bold().attribute(Attribute::Italic)
    );
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL
            .repeat(SECTION_WIDTH.saturating_sub(title_len + 4 + padding))
            .with(colors::AMBER)
    );
    println!("{}", box_chars::ROUND_TOP_RIGHT.with(colors::AMBER));
}

pub fn print_section_footer() {
    print!("{}", box_chars::ROUND_BOTTOM_LEFT.with(colors::AMBER));
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL
            .repeat(SECTION_WIDTH)
            .with(colors::AMBER)
    );
    println!("{}", box_chars::ROUND_BOTTOM_RIGHT.with(colors::AMBER));
    println!();
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table Display
// ═══════════════════════════════════════════════════════════════════════════════

/// Cells wider than this are cut and end with an ellipsis.
const MAX_CELL_WIDTH: usize = 72;

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: &[&str]) -> Self {
        TableBuilder {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            col_widths: headers.iter().map(|h| h.width()).collect(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        let row: Vec<String> = row
            .into_iter()
            .map(|cell| truncate_to_width(&cell, MAX_CELL_WIDTH))
            .collect();
        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.width());
        }
        self.rows.push(row);
    }

    fn print_border(&self, left: &str, junction: &str, right: &str) {
        let segments: Vec<String> = self
            .col_widths
            .iter()
            .map(|width| box_chars::SINGLE_HORIZONTAL.repeat(width + 2))
            .collect();
        println!(
            "{}{}{}",
            left.with(colors::TEAL),
            segments.join(junction).with(colors::TEAL),
            right.with(colors::TEAL)
        );
    }

    fn print_cells(&self, cells: &[String], color: CtColor, bold: bool) {
        print!("{}", box_chars::SINGLE_VERTICAL.with(colors::TEAL));
        for (i, cell) in cells.iter().enumerate() {
            let width = self.col_widths.get(i).copied().unwrap_or(0);
            let padding = " ".repeat(width.saturating_sub(cell.width()));
            let styled = cell.as_str().with(color);
            if bold {
                print!(" {}{} ", styled.bold(), padding);
            } else {
                print!(" {}{} ", styled, padding);
            }
            print!("{}", box_chars::SINGLE_VERTICAL.with(colors::TEAL));
        }
        println!();
    }

    pub fn print(&self) {
        self.print_border(
            box_chars::ROUND_TOP_LEFT,
            box_chars::T_TOP,
            box_chars::ROUND_TOP_RIGHT,
        );
        self.print_cells(&self.headers, colors::TEAL, true);
        self.print_border(box_chars::T_LEFT, box_chars::CROSS, box_chars::T_RIGHT);
        for row in &self.rows {
            self.print_cells(row, colors::WHITE, false);
        }
        self.print_border(
            box_chars::ROUND_BOTTOM_LEFT,
            box_chars::T_BOTTOM,
            box_chars::ROUND_BOTTOM_RIGHT,
        );
    }
}

/// Cuts `text` so that it takes at most `max_width` terminal columns.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(box_chars::ELLIPSIS.width());
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(box_chars::ELLIPSIS);
    out
}

/// `key=value` pairs of a record, grouped by key in first-seen order.
pub fn metadata_summary(record: &MediaRecord) -> String {
    record
        .keys()
        .into_iter()
        .map(|key| format!("{}={}", key, record.values_for(key).join("|")))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Enumerates a result set so the next command can address its files by
/// index.
pub fn print_result_set(result: &ResultSet, catalog: &Catalog) {
    if result.is_empty() {
        print_empty_list("No files");
        return;
    }
    let mut table = TableBuilder::new(&["#", "path", "type", "metadata"]);
    for (index, id) in result.ids().iter().enumerate() {
        let Some(record) = catalog.get(*id) else {
            continue;
        };
        table.add_row(vec![
            index.to_string(),
            record.path().to_string(),
            record.kind().to_string(),
            metadata_summary(record),
        ]);
    }
    table.print();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt
// ═══════════════════════════════════════════════════════════════════════════════

/// The prompt shows how many files the last result holds.
pub fn get_prompt(last_result_len: usize) -> String {
    format!(
        "{} {}{} ",
        format!("[{}]", last_result_len).with(colors::DIM),
        "❯".with(colors::AMBER).bold(),
        "❯".with(colors::CORAL).bold(),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// Welcome Message
// ═══════════════════════════════════════════════════════════════════════════════

const WELCOME_BOX_WIDTH: usize = 64;

fn print_welcome_line(content: &str, visible_len: usize) {
    print!("  {}", box_chars::DOUBLE_VERTICAL.with(colors::LAVENDER));
    print!("{}", content);
    print!(
        "{}",
        " ".repeat(WELCOME_BOX_WIDTH.saturating_sub(visible_len))
    );
    println!("{}", box_chars::DOUBLE_VERTICAL.with(colors::LAVENDER));
}

pub fn print_welcome(export_dir: &Path, files_loaded: usize) {
    print_banner();

    let horizontal = box_chars::DOUBLE_HORIZONTAL.repeat(WELCOME_BOX_WIDTH);
    println!(
        "  {}{}{}",
        box_chars::DOUBLE_TOP_LEFT.with(colors::LAVENDER),
        horizontal.as_str().with(colors::LAVENDER),
        box_chars::DOUBLE_TOP_RIGHT.with(colors::LAVENDER)
    );

    let export_dir = export_dir.display().to_string();
    let files_loaded = files_loaded.to_string();
    let lines = [
        ("Export dir", export_dir.as_str()),
        ("Files", files_loaded.as_str()),
        ("Version", env!("APP_VERSION")),
    ];

    print_welcome_line("", 0);
    for (key, value) in lines {
        let content = format!("  {} {}", format!("{}:", key).with(colors::DIM), value);
        print_welcome_line(&content, key.width() + value.width() + 4);
    }
    print_welcome_line("", 0);

    let help_msg = "  Type 'help' for available commands";
    print_welcome_line(&help_msg.with(colors::DIM).to_string(), help_msg.width());

    println!(
        "  {}{}{}",
        box_chars::DOUBLE_BOTTOM_LEFT.with(colors::LAVENDER),
        horizontal.as_str().with(colors::LAVENDER),
        box_chars::DOUBLE_BOTTOM_RIGHT.with(colors::LAVENDER)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Help Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_help(commands: &[CommandDefinition]) {
    print_section_header("Available Commands");
    println!();

    fn group<'a>(
        commands: &'a [CommandDefinition],
        names: &[&str],
    ) -> Vec<&'a CommandDefinition> {
        commands
            .iter()
            .filter(|c| names.contains(&c.name))
            .collect()
    }

    fn print_command_group(title: &str, commands: &[&CommandDefinition], color: CtColor) {
        if commands.is_empty() {
            return;
        }
        println!(
            "  {} {}",
            box_chars::DIAMOND.with(color),
            title.with(color).bold()
        );
        for cmd in commands {
            println!(
                "      {} {}  {}",
                cmd.name.with(colors::GREEN).bold(),
                cmd.args.with(colors::DIM),
                cmd.description.with(colors::WHITE)
            );
        }
        println!();
    }

    print_command_group(
        "Catalog",
        &group(commands, &["load", "save", "save-search"]),
        colors::AMBER,
    );
    print_command_group("Query", &group(commands, &["list", "list-meta"]), colors::TEAL);
    print_command_group(
        "Metadata",
        &group(commands, &["add", "set", "del", "del-all"]),
        colors::LAVENDER,
    );
    print_command_group(
        "System",
        &group(commands, &["help", "clear", "quit"]),
        colors::CORAL,
    );

    print_section_footer();
}

pub fn print_goodbye() {
    println!();
    println!(
        "  {}",
        "Bye, the catalog is only kept if you saved it."
            .with(colors::LAVENDER)
            .bold()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MediaKind, MetadataEntry};

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語です", 5).width(), 5);
    }

    #[test]
    fn test_metadata_summary_groups_values() {
        let record = MediaRecord::new(
            "/a",
            MediaKind::Audio,
            vec![
                MetadataEntry::new("creator", "Sam"),
                MetadataEntry::new("genre", "rock"),
                MetadataEntry::new("runtime", "3:00"),
                MetadataEntry::new("genre", "jazz"),
            ],
        );
        assert_eq!(
            metadata_summary(&record),
            "creator=Sam, genre=rock|jazz, runtime=3:00"
        );
    }

    #[test]
    fn test_table_widths_follow_cells() {
        let mut table = TableBuilder::new(&["#", "path"]);
        table.add_row(vec!["0".to_string(), "/a/long/path.json".to_string()]);
        assert_eq!(table.col_widths, vec![1, "/a/long/path.json".len()]);
    }
}
