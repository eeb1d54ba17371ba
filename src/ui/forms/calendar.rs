//! Month calendar for the delivery date

use crate::state::DatePicker;
use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows needed: borders, month title, weekday header and six weeks
pub const CALENDAR_HEIGHT: u16 = 10;
pub const CALENDAR_WIDTH: u16 = 24;

const WEEKDAY_HEADER: &str = "Mo Tu We Th Fr Sa Su";

fn day_style(
    picker: &DatePicker,
    date: NaiveDate,
    selected: Option<NaiveDate>,
    is_active: bool,
) -> Style {
    let mut style = if picker.is_disabled(date) {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if selected == Some(date) {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    if date == picker.today() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if is_active && date == picker.cursor() {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

/// Draw the picker's month. Days up to today render disabled.
pub fn draw_calendar(
    frame: &mut Frame,
    area: Rect,
    picker: &DatePicker,
    selected: Option<NaiveDate>,
    is_active: bool,
) {
    let border_color = if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let mut lines = vec![
        Line::from(Span::styled(
            picker.cursor().format("%B %Y").to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(WEEKDAY_HEADER, Style::default().fg(Color::Gray))),
    ];

    for week in picker.month_grid() {
        let mut spans = Vec::with_capacity(14);
        for (column, day) in week.iter().enumerate() {
            if column > 0 {
                spans.push(Span::raw(" "));
            }
            match day {
                Some(date) => spans.push(Span::styled(
                    format!("{:>2}", date.day()),
                    day_style(picker, *date, selected, is_active),
                )),
                None => spans.push(Span::raw("  ")),
            }
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .title(" Calendar ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
