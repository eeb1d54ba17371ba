//! Summary step: read-only review of the outgoing payload

use crate::order::{SubmissionPayload, WizardController};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const LABEL_WIDTH: usize = 24;

/// Lines shown on the summary step
pub fn summary_lines(wizard: &WizardController) -> Vec<Line<'static>> {
    let payload = SubmissionPayload::from_draft(wizard.draft(), wizard.gates());
    let label_style = Style::default().fg(Color::Gray);

    let mut lines: Vec<Line> = payload
        .summary_lines()
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<LABEL_WIDTH$}"), label_style),
                Span::raw(value),
            ])
        })
        .collect();

    let skipped = wizard.malformed_document_numbers();
    if !skipped.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{} WZ number(s) do not match {} and will not be sent: {}",
                skipped.len(),
                wizard.gates().document_format.placeholder(),
                skipped.join(", ")
            ),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines
}

pub fn draw_summary(frame: &mut Frame, area: Rect, wizard: &WizardController) {
    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(summary_lines(wizard))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{FieldPath, TransportType};

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn wizard_with_numbers(numbers: &[&str]) -> WizardController {
        let mut wizard = WizardController::default();
        wizard
            .set_field(FieldPath::TransportType, TransportType::Producer)
            .unwrap();
        for (i, number) in numbers.iter().enumerate() {
            if i > 0 {
                wizard.add_document_number_slot();
            }
            wizard.set_document_number(i, number).unwrap();
        }
        wizard
    }

    #[test]
    fn test_skipped_numbers_are_announced() {
        let wizard = wizard_with_numbers(&["WZ/00001/24/ABC/24", "bad-entry"]);
        let lines = text(&summary_lines(&wizard));
        let notice = lines.last().unwrap();
        assert!(notice.starts_with("1 WZ number(s) do not match WZ/00000/00/AAA/24"));
        assert!(notice.ends_with("BAD-ENTRY"));
    }

    #[test]
    fn test_no_notice_when_all_valid() {
        let wizard = wizard_with_numbers(&["WZ/00001/24/ABC/24"]);
        let lines = text(&summary_lines(&wizard));
        assert!(lines.iter().all(|l| !l.contains("will not be sent")));
        assert!(lines.iter().any(|l| l.contains("Transport od producenta")));
    }
}
