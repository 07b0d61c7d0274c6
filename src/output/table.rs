use comfy_table::{Cell, Color};

use crate::core::SubjectSummary;
use crate::output::format::{
    create_styled_table, format_duration, format_number, header_cell, right_cell,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TopTableOptions {
    pub(crate) use_color: bool,
    /// "Artist" or "Track"
    pub(crate) subject_label: &'static str,
}

/// Print the summary line with optional timing
pub(crate) fn print_summary_line(plays: usize, files: usize, elapsed_ms: Option<f64>, use_color: bool) {
    let stats_text = format!(
        "{} plays from {} files",
        format_number(plays as i64),
        format_number(files as i64)
    );

    if let Some(ms) = elapsed_ms {
        if use_color {
            println!("\n  {} | \x1b[36m{:.0}ms\x1b[0m\n", stats_text, ms);
        } else {
            println!("\n  {} | {:.0}ms\n", stats_text, ms);
        }
    } else {
        println!("\n  {}\n", stats_text);
    }
}

pub(crate) fn render_top_table(top: &[SubjectSummary], opts: TopTableOptions) -> String {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", c),
        header_cell(opts.subject_label, c),
        header_cell("Listened", c),
        header_cell("Weeks", c),
        header_cell("First", c),
        header_cell("Last", c),
    ]);

    let accent = if c { Some(Color::Green) } else { None };
    for (rank, s) in top.iter().enumerate() {
        table.add_row(vec![
            right_cell(&(rank + 1).to_string(), None, false),
            Cell::new(&s.key),
            right_cell(&format_duration(s.minutes), accent, false),
            right_cell(&format_number(s.active_weeks as i64), None, false),
            Cell::new(s.first_week.as_ref().map_or("", |l| l.as_str())),
            Cell::new(s.last_week.as_ref().map_or("", |l| l.as_str())),
        ]);
    }

    table.to_string()
}

pub(crate) fn print_top_table(top: &[SubjectSummary], opts: TopTableOptions) {
    println!(
        "\n  Top {} by listening time\n",
        opts.subject_label.to_lowercase()
    );
    println!("{}", render_top_table(top, opts));
}
