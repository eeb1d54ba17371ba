//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    render_action_button(frame, area, content, is_selected, is_enabled, None);
}

/// Render a button with an optional accent color for its label.
/// Disabled buttons stay gray even when selected.
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Option<Color>,
) {
    let border_style = if is_selected && is_enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(accent.unwrap_or(Color::Cyan))
            .add_modifier(Modifier::BOLD)
    } else {
        accent.map_or_else(Style::default, |color| Style::default().fg(color))
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(is_selected: bool, is_enabled: bool) -> ratatui::buffer::Buffer {
        let backend = TestBackend::new(12, BUTTON_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                render_action_button(
                    frame,
                    frame.area(),
                    "Submit",
                    is_selected,
                    is_enabled,
                    Some(Color::Green),
                )
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_disabled_button_is_gray() {
        let buffer = render(true, false);
        assert_eq!(buffer[(2, 1)].symbol(), "S");
        assert_eq!(buffer[(2, 1)].fg, Color::DarkGray);
        assert_eq!(buffer[(0, 0)].fg, Color::DarkGray);
    }

    #[test]
    fn test_selected_button_uses_accent() {
        let buffer = render(true, true);
        assert_eq!(buffer[(2, 1)].fg, Color::Green);
        assert_eq!(buffer[(0, 0)].fg, Color::Cyan);
    }
}
