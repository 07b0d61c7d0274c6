use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

/// Plain decimal for matrix cells: shortest round-trip digits, never an
/// exponent, always a fractional part ("3.0", "5.5", "0.1").
pub(crate) fn format_minutes(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Integer with thousands separators
pub(super) fn format_number(n: i64) -> String {
    let (sign, digits) = if n < 0 {
        ("-", n.unsigned_abs().to_string())
    } else {
        ("", n.to_string())
    };
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let formatted: String = result.chars().rev().collect();
    format!("{sign}{formatted}")
}

/// Minutes for humans: whole minutes with separators, hours alongside
pub(super) fn format_duration(minutes: f64) -> String {
    let whole = minutes.round() as i64;
    if whole >= 60 {
        format!("{} min ({:.1} h)", format_number(whole), minutes / 60.0)
    } else {
        format!("{} min", format_number(whole))
    }
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::{format_duration, format_minutes, format_number};

    #[test]
    fn minutes_always_have_fraction() {
        assert_eq!(format_minutes(0.0), "0.0");
        assert_eq!(format_minutes(3.0), "3.0");
        assert_eq!(format_minutes(5.5), "5.5");
        assert_eq!(format_minutes(1e20), "100000000000000000000.0");
    }

    #[test]
    fn minutes_use_shortest_round_trip() {
        assert_eq!(format_minutes(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_minutes(12345.0 / 60000.0), "0.20575");
        assert_eq!(format_minutes(0.000001), "0.000001");
    }

    #[test]
    fn format_number_with_commas() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(-1234), "-1,234");
    }

    #[test]
    fn duration_shows_hours_past_one_hour() {
        assert_eq!(format_duration(42.4), "42 min");
        assert_eq!(format_duration(90.0), "90 min (1.5 h)");
        assert_eq!(format_duration(1500.0), "1,500 min (25.0 h)");
    }
}
