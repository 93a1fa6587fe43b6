//! Currency and table rendering.

use ims_core::Money;
use ims_inventory::ProductRow;
use rust_decimal::RoundingStrategy;
use unicode_width::UnicodeWidthStr;

/// Render an amount the way a till would: `$1,234.50`, `-$5.00`.
pub fn format_currency(amount: Money, symbol: &str) -> String {
    let mut rounded = amount
        .amount()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!("{sign}{symbol}{}.{cents}", group_thousands(whole))
}

fn group_thousands(whole: &str) -> String {
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, ch) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

const HEADERS: [&str; 5] = ["ID", "Name", "Quantity", "Price", "Total Value"];
const GAP: &str = "  ";

/// Fixed-width table of listing rows. Names are padded, never truncated.
pub fn inventory_table(rows: &[ProductRow], symbol: &str) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.id.to_string(),
                row.name.clone(),
                row.quantity.to_string(),
                format_currency(row.unit_price, symbol),
                format_currency(row.total_value, symbol),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.width());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.width());
        }
    }

    let total_width = widths.iter().sum::<usize>() + GAP.len() * (widths.len() - 1);
    let rule = "-".repeat(total_width);

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&render_line(&HEADERS.map(str::to_string), &widths));
    out.push_str(&rule);
    out.push('\n');
    for line in &cells {
        out.push_str(&render_line(line, &widths));
    }
    out
}

fn render_line(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let mut line = String::new();
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if index > 0 {
            line.push_str(GAP);
        }
        let padding = " ".repeat(width.saturating_sub(cell.width()));
        // Text columns align left, numbers right.
        if index < 2 {
            line.push_str(cell);
            line.push_str(&padding);
        } else {
            line.push_str(&padding);
            line.push_str(cell);
        }
    }
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}
