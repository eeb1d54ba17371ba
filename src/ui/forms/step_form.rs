//! Wizard step rendering: fields on the left, actions on the right

use super::calendar::{draw_calendar, CALENDAR_HEIGHT};
use super::field_renderer::{draw_field, FieldView};
use super::summary::draw_summary;
use crate::order::{FieldKind, FieldPath, WizardStep, PAYLOAD_DATE_FORMAT};
use crate::state::{AppState, FocusTarget, InputMask, StepButton};
use crate::ui::components::{render_action_button, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::ops::Range;

const ACTION_PANEL_WIDTH: u16 = 28;

/// Draw the current step with its action panel
pub fn draw_step(frame: &mut Frame, area: Rect, state: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),
            Constraint::Length(ACTION_PANEL_WIDTH),
        ])
        .split(area);

    if state.wizard.current_step() == WizardStep::Summary {
        draw_summary(frame, main_chunks[0], &state.wizard);
    } else {
        draw_fields(frame, main_chunks[0], state);
    }
    draw_action_panel(frame, main_chunks[1], state);
}

/// Rendering data for one focus target
pub fn field_view(state: &AppState, target: FocusTarget, is_active: bool) -> Option<FieldView> {
    let draft = state.wizard.draft();
    let view = match target {
        FocusTarget::Buttons => return None,
        FocusTarget::DocumentSlot(index) => FieldView {
            label: format!("WZ number {}", index + 1),
            value: draft.document_numbers().get(index).cloned().unwrap_or_default(),
            placeholder: Some(state.wizard.gates().document_format.placeholder()),
            ..FieldView::default()
        },
        FocusTarget::Field(path) => {
            let value = match path {
                FieldPath::TransportType => draft
                    .transport_type()
                    .map(|t| t.label().to_string())
                    .unwrap_or_default(),
                FieldPath::WarehouseLocation => draft
                    .transport()
                    .warehouse()
                    .map(|w| w.label().to_string())
                    .unwrap_or_default(),
                FieldPath::Priority => draft.priority().label().to_string(),
                FieldPath::PartialDeliveryAllowed => {
                    if draft.partial_delivery_allowed() {
                        "[x] Yes".to_string()
                    } else {
                        "[ ] No".to_string()
                    }
                }
                FieldPath::DeliveryDate => draft
                    .delivery_date()
                    .map(|d| d.format(PAYLOAD_DATE_FORMAT).to_string())
                    .unwrap_or_default(),
                _ => draft.text_field(path).unwrap_or_default().to_string(),
            };
            let placeholder = match path.kind() {
                FieldKind::Choice => Some("(select)".to_string()),
                FieldKind::Date => Some("(pick a day in the calendar)".to_string()),
                _ => InputMask::for_path(path).placeholder().map(str::to_string),
            };
            FieldView {
                label: path.label().to_string(),
                value,
                placeholder,
                is_multiline: path.kind() == FieldKind::Multiline,
                is_choice: path.kind() == FieldKind::Choice,
                ..FieldView::default()
            }
        }
    };
    Some(FieldView { is_active, ..view })
}

/// Targets `[start, end)` that fit in `available` rows with `active` in view
pub fn visible_window(heights: &[u16], active: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);
    let mut start = 0;
    let mut used: u16 = heights[..=active].iter().sum();
    while used > available && start < active {
        used -= heights[start];
        start += 1;
    }
    let mut end = active + 1;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }
    start..end
}

fn draw_fields(frame: &mut Frame, area: Rect, state: &AppState) {
    let step = state.wizard.current_step();
    let block = Block::default()
        .title(format!(" {}/{} {} ", step.index(), WizardStep::LAST.index(), step.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(step.description())
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let active = state.form.active_target();
    let views: Vec<FieldView> = state
        .form
        .targets()
        .iter()
        .filter_map(|target| field_view(state, *target, *target == active))
        .collect();
    let heights: Vec<u16> = views.iter().map(FieldView::height).collect();
    let active_index = state.form.active_field_index.min(views.len().saturating_sub(1));

    let fields_area = chunks[1];
    let mut y = fields_area.y;
    for view in &views[visible_window(&heights, active_index, fields_area.height)] {
        let height = view.height().min(fields_area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        draw_field(
            frame,
            Rect {
                x: fields_area.x,
                y,
                width: fields_area.width,
                height,
            },
            view,
        );
        y += height;
    }
}

fn draw_action_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let wizard = &state.wizard;
    let step = wizard.current_step();
    let is_focused = state.form.is_buttons_row_active();

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CALENDAR_HEIGHT),
            Constraint::Min(0),
        ])
        .split(inner);

    let (forward_label, forward_enabled) = if step == WizardStep::LAST {
        if wizard.is_submitting() {
            ("Sending...", false)
        } else {
            ("Submit", true)
        }
    } else {
        ("Next", wizard.can_advance())
    };
    render_action_button(
        frame,
        chunks[0],
        forward_label,
        is_focused && state.form.selected_button == StepButton::Forward,
        forward_enabled,
        Some(Color::Green),
    );
    render_button(
        frame,
        chunks[1],
        "Back",
        is_focused && state.form.selected_button == StepButton::Back,
        step != WizardStep::FIRST && !wizard.is_submitting(),
    );

    if step == WizardStep::DeliveryDate {
        let is_active = state.form.active_target() == FocusTarget::Field(FieldPath::DeliveryDate);
        draw_calendar(
            frame,
            chunks[3],
            &state.date_picker,
            wizard.draft().delivery_date(),
            is_active,
        );
    }
}
