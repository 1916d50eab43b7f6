use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use rust_decimal::Decimal;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an amount with two decimals. Rounding happens only here.
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{currency}{:.2}", rounded.abs())
    } else {
        format!("{currency}{:.2}", rounded.abs())
    }
}

/// Right-aligned amount cell.
pub fn amount_cell(amount: Decimal, currency: &str) -> Cell {
    Cell::new(format_amount(amount, currency)).set_alignment(CellAlignment::Right)
}

/// Amount cell colored green for surplus and red for deficit.
pub fn balance_cell(amount: Decimal, currency: &str) -> Cell {
    let color = if amount.is_sign_negative() && !amount.is_zero() {
        Color::Red
    } else {
        Color::Green
    };
    amount_cell(amount, currency).fg(color)
}

/// Prints a dimmed placeholder for an empty table.
pub fn print_empty(message: &str) {
    println!("{}", style_text(message, StyleType::Subtle));
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(1850), "$"), "$1850.00");
        assert_eq!(format_amount(dec!(2913.613112), "$"), "$2913.61");
        assert_eq!(format_amount(dec!(-1200), "€"), "-€1200.00");
        assert_eq!(format_amount(dec!(-0.001), "$"), "$0.00");
    }
}
