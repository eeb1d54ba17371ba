//! Layout components (step header, status bar)

use crate::app::App;
use crate::order::{FieldKind, WizardStep};
use crate::platform::{
    ADD_SLOT_SHORTCUT, NEXT_STEP_SHORTCUT, PREV_STEP_SHORTCUT, QUIT_SHORTCUT,
    REMOVE_SLOT_SHORTCUT, SUBMIT_SHORTCUT,
};
use crate::state::{AppState, FocusTarget};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split the screen into header, step body and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Step progress
            Constraint::Min(0),    // Step body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Progress line: finished steps green, current step bold
pub fn step_progress(current: WizardStep) -> Line<'static> {
    let mut spans = Vec::new();
    for step in WizardStep::ALL {
        if step != WizardStep::FIRST {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let style = if step == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if step.index() < current.index() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("{} {}", step.index(), step.title()),
            style,
        ));
    }
    Line::from(spans)
}

pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Transport order ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(step_progress(app.state.wizard.current_step())).block(block),
        area,
    );
}

/// Keyboard hints for whatever has focus
pub fn get_hints(state: &AppState) -> String {
    let step = state.wizard.current_step();
    let stepping = if step == WizardStep::LAST {
        format!("{SUBMIT_SHORTCUT}:submit  {PREV_STEP_SHORTCUT}:back")
    } else {
        format!("{NEXT_STEP_SHORTCUT}:next step  {PREV_STEP_SHORTCUT}:back")
    };
    let focus = match state.form.active_target() {
        FocusTarget::Buttons => "←/→:choose  Enter:press".to_string(),
        FocusTarget::DocumentSlot(_) => {
            format!("{ADD_SLOT_SHORTCUT}:add WZ  {REMOVE_SLOT_SHORTCUT}:remove")
        }
        FocusTarget::Field(path) => match path.kind() {
            FieldKind::Choice => "←/→:change".to_string(),
            FieldKind::Toggle => "Space:toggle".to_string(),
            FieldKind::Date => "←/→:day  ↑/↓:week  PgUp/PgDn:month  Enter:pick".to_string(),
            FieldKind::Text | FieldKind::Multiline => String::new(),
        },
    };
    let mut hints = String::from("Tab:next field");
    for part in [focus, stepping] {
        if !part.is_empty() {
            hints.push_str("  ");
            hints.push_str(&part);
        }
    }
    hints
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", get_hints(&app.state)),
        Style::default().fg(Color::Gray),
    )];

    if app.state.wizard.is_submitting() {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(
            "Sending order...",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = format!(" {QUIT_SHORTCUT}:quit ");
    let width = quit_hint.chars().count() as u16;
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width: width.min(area.width),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray)),
        quit_area,
    );
}
