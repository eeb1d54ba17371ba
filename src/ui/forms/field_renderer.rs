//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// What a single form field shows
#[derive(Debug, Clone, Default)]
pub struct FieldView {
    pub label: String,
    pub value: String,
    /// Shown in place of an empty value
    pub placeholder: Option<String>,
    pub is_active: bool,
    pub is_multiline: bool,
    /// Choice fields show arrows instead of a text cursor
    pub is_choice: bool,
}

impl FieldView {
    /// Rows the field occupies, borders included
    pub fn height(&self) -> u16 {
        if self.is_multiline {
            5
        } else {
            3
        }
    }
}

/// Draw a bordered form field
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FieldView) {
    let accent = if field.is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let value_style = if field.is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let placeholder_style = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = if field.value.is_empty() {
        let placeholder = match field.placeholder.as_deref() {
            Some(text) => text,
            None if field.is_active => "",
            None => "(empty)",
        };
        vec![Line::from(Span::styled(placeholder.to_string(), placeholder_style))]
    } else {
        field
            .value
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
            .collect()
    };
    if field.value.ends_with('\n') {
        lines.push(Line::from(""));
    }

    if field.is_active {
        let cursor_style = Style::default().fg(Color::Cyan);
        if field.is_choice {
            if let Some(line) = lines.first_mut() {
                line.spans.insert(0, Span::styled("◀ ", cursor_style));
                line.spans.push(Span::styled(" ▶", cursor_style));
            }
        } else if let Some(last) = lines.last_mut() {
            // placeholder gives way to the cursor
            if field.value.is_empty() {
                last.spans.clear();
            }
            last.spans.push(Span::styled("▌", cursor_style));
        }
    }

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
