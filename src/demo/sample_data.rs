//! Customer dataset and column set shown by the demo table

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::components::data_table::{Align, Column};
use crate::models::{format_number, Row, Value};
use crate::ui::Styles;

pub fn sample_customers() -> Vec<Row> {
    vec![
        customer(1, "John Smith", "john.smith@example.com", "+1 (555) 123-4567", "New York, NY", "2024-01-15", "Active", 12, 2450.50, 4.8),
        customer(2, "Sarah Johnson", "sarah.j@example.com", "+1 (555) 987-6543", "Los Angeles, CA", "2024-02-20", "Active", 8, 1820.75, 4.6),
        customer(3, "Mike Davis", "mike.davis@example.com", "+1 (555) 456-7890", "Chicago, IL", "2024-03-10", "Inactive", 15, 3200.25, 4.9),
        customer(4, "Emily Wilson", "emily.wilson@example.com", "+1 (555) 321-0987", "Houston, TX", "2024-03-25", "Pending", 3, 450.00, 4.2),
        customer(5, "David Brown", "david.brown@example.com", "+1 (555) 654-3210", "Phoenix, AZ", "2024-04-05", "Active", 22, 4150.80, 4.7),
    ]
}

#[allow(clippy::too_many_arguments)]
fn customer(
    id: i64,
    name: &str,
    email: &str,
    phone: &str,
    location: &str,
    join_date: &str,
    status: &str,
    orders: i64,
    total_spent: f64,
    rating: f64,
) -> Row {
    Row::new()
        .with("id", id)
        .with("name", name)
        .with("email", email)
        .with("phone", phone)
        .with("location", location)
        .with("joinDate", join_date)
        .with("status", status)
        .with("orders", orders)
        .with("totalSpent", total_spent)
        .with("rating", rating)
}

pub fn customer_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Customer").sortable().with_render(render_customer),
        Column::new("phone", "Phone")
            .sortable()
            .with_width(20)
            .with_render(|value, _| Line::from(format!("☎ {}", value))),
        Column::new("location", "Location")
            .sortable()
            .with_width(18)
            .with_render(|value, _| Line::from(format!("⌂ {}", value))),
        Column::new("status", "Status").sortable().with_width(10).with_render(render_status),
        Column::new("orders", "Orders")
            .sortable()
            .with_width(8)
            .align(Align::Center)
            .with_render(|value, _| {
                Line::from(Span::styled(value.to_string(), Style::default().add_modifier(Modifier::BOLD)))
            }),
        Column::new("totalSpent", "Total Spent")
            .sortable()
            .with_width(12)
            .align(Align::Right)
            .with_render(|value, _| match value.as_f64() {
                Some(amount) => Line::from(Span::styled(format_currency(amount), Styles::success())),
                None => Line::from(value.to_string()),
            }),
        Column::new("rating", "Rating")
            .sortable()
            .with_width(7)
            .align(Align::Center)
            .with_render(|value, _| {
                Line::from(vec![
                    Span::styled("★ ", Style::default().fg(Color::Yellow)),
                    Span::raw(value.to_string()),
                ])
            }),
    ]
}

fn render_customer(value: &Value, row: &Row) -> Line<'static> {
    let name = value.to_string();
    let initials: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect();
    Line::from(vec![
        Span::styled(
            format!("[{}] ", initials),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}", row.text("email")), Styles::inactive()),
    ])
}

fn render_status(value: &Value, _row: &Row) -> Line<'static> {
    let color = match value.as_str() {
        Some("Active") => Color::Green,
        Some("Inactive") => Color::Red,
        _ => Color::Yellow,
    };
    Line::from(Span::styled(
        format!(" {} ", value),
        Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
    ))
}

/// `$` amount with thousands separators, e.g. `$2,450.5`
pub fn format_currency(amount: f64) -> String {
    let text = format_number(amount.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{}${}.{}", sign, grouped, fraction),
        None => format!("{}${}", sign, grouped),
    }
}
