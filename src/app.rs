//! Application state and core logic

use crate::config::AppConfig;
use crate::error::{DraftError, SubmitError};
use crate::order::{FieldKind, WizardController, WizardStep};
use crate::platform::is_shortcut;
use crate::state::{AppState, Clock, FocusTarget, Form, StepButton};
use crate::submission::SubmissionClientTrait;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Endpoint the finished order goes to
    client: Arc<dyn SubmissionClientTrait>,
    /// Submission running in the background
    pending: Option<JoinHandle<Result<(), SubmitError>>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &AppConfig, client: Arc<dyn SubmissionClientTrait>, clock: Clock) -> Self {
        let wizard = WizardController::new(config.step_gates());
        Self {
            state: AppState::new(wizard, clock),
            client,
            pending: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message);
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Dialogs are modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }
        if self.state.notification.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_notification();
            }
            return Ok(());
        }
        if self.state.wizard.is_submitting() {
            self.state.status_message = Some("Still sending the order".to_string());
            return Ok(());
        }

        self.state.status_message = None;

        if self.handle_shortcut(&key) {
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => {
                self.state.form.next_field();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.state.form.prev_field();
                return Ok(());
            }
            _ => {}
        }

        match self.state.form.active_target() {
            FocusTarget::Buttons => self.handle_buttons_key(key),
            FocusTarget::Field(path) => match path.kind() {
                FieldKind::Date => self.handle_date_key(key),
                FieldKind::Choice => self.handle_choice_key(key),
                FieldKind::Toggle => self.handle_toggle_key(key),
                FieldKind::Text => self.handle_text_key(key, false),
                FieldKind::Multiline => self.handle_text_key(key, true),
            },
            FocusTarget::DocumentSlot(_) => self.handle_text_key(key, false),
        }
        Ok(())
    }

    /// Wizard-wide shortcuts; returns true when the key was consumed
    fn handle_shortcut(&mut self, key: &KeyEvent) -> bool {
        let step = self.state.wizard.current_step();
        if is_shortcut(key, 'n') {
            self.advance();
        } else if is_shortcut(key, 'b') {
            self.retreat();
        } else if is_shortcut(key, 's') && step == WizardStep::LAST {
            self.start_submission();
        } else if is_shortcut(key, 'a') && step == WizardStep::DocumentNumbers {
            self.state.add_document_slot();
        } else if is_shortcut(key, 'd') && step == WizardStep::DocumentNumbers {
            let result = self.state.remove_active_document_slot();
            self.report(result);
        } else {
            return false;
        }
        true
    }

    fn advance(&mut self) {
        match self.state.wizard.advance() {
            Ok(_) => self.state.sync_form(),
            Err(e) => self.state.status_message = Some(format!("Cannot continue: {e}")),
        }
    }

    fn retreat(&mut self) {
        if self.state.wizard.retreat().is_ok() {
            self.state.sync_form();
        }
    }

    fn handle_buttons_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right => self.state.form.toggle_button(),
            KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Down => self.state.form.next_field(),
            KeyCode::Enter => match self.state.form.selected_button {
                StepButton::Back => self.retreat(),
                StepButton::Forward if self.state.wizard.current_step() == WizardStep::LAST => {
                    self.start_submission()
                }
                StepButton::Forward => self.advance(),
            },
            _ => {}
        }
    }

    fn handle_date_key(&mut self, key: KeyEvent) {
        let picker = &mut self.state.date_picker;
        match key.code {
            KeyCode::Left => picker.move_days(-1),
            KeyCode::Right => picker.move_days(1),
            KeyCode::Up => picker.move_days(-7),
            KeyCode::Down => picker.move_days(7),
            KeyCode::PageUp => picker.prev_month(),
            KeyCode::PageDown => picker.next_month(),
            KeyCode::Enter => match self.state.pick_date() {
                Ok(true) => self.state.form.next_field(),
                Ok(false) => {
                    self.state.status_message = Some("That day cannot be picked".to_string())
                }
                Err(e) => self.push_error(e.to_string()),
            },
            _ => {}
        }
    }

    fn handle_choice_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Char(' ') => {
                let result = self.state.cycle_choice(true);
                self.report(result);
            }
            KeyCode::Left => {
                let result = self.state.cycle_choice(false);
                self.report(result);
            }
            KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Down | KeyCode::Enter => self.state.form.next_field(),
            _ => {}
        }
    }

    fn handle_toggle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') => {
                let result = self.state.toggle_flag();
                self.report(result);
            }
            KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Down | KeyCode::Enter => self.state.form.next_field(),
            _ => {}
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent, is_multiline: bool) {
        let result = match key.code {
            KeyCode::Char(c) if !is_control_chord(&key) => self.state.input_char(c),
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Enter if is_multiline => self.state.input_char('\n'),
            KeyCode::Up => {
                self.state.form.prev_field();
                return;
            }
            KeyCode::Down | KeyCode::Enter => {
                self.state.form.next_field();
                return;
            }
            _ => return,
        };
        self.report(result);
    }

    /// Queue a rejected draft update for the error dialog
    fn report(&mut self, result: Result<(), DraftError>) {
        if let Err(e) = result {
            self.push_error(e.to_string());
        }
    }

    /// Hand the payload to a background task; the result arrives via [`Self::poll_submission`]
    pub fn start_submission(&mut self) {
        match self.state.wizard.begin_submission() {
            Ok(payload) => {
                let client = Arc::clone(&self.client);
                self.pending = Some(tokio::spawn(async move {
                    client.submit_order(&payload).await
                }));
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    /// Settle the background submission once it has finished
    pub async fn poll_submission(&mut self) {
        if self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            self.settle_submission().await;
        }
    }

    /// Wait for the background submission and apply its outcome
    pub async fn settle_submission(&mut self) {
        let Some(handle) = self.pending.take() else {
            return;
        };
        let outcome = handle.await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "submission task did not complete");
            Err(SubmitError::Interrupted)
        });
        let notification = self.state.wizard.finish_submission(outcome);
        self.state.notification = Some(notification);
        self.state.sync_form();
    }
}

/// Ctrl without Alt; AltGr arrives as Ctrl+Alt and still types a character
fn is_control_chord(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{FieldPath, NotificationKind, OrderDraft, TransportType};
    use crate::state::fixed_clock;
    use crate::submission::MockSubmissionClientTrait;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(client: MockSubmissionClientTrait) -> App {
        App::new(&AppConfig::default(), Arc::new(client), fixed_clock(today()))
    }

    fn idle_app() -> App {
        let mut client = MockSubmissionClientTrait::new();
        client.expect_submit_order().never();
        app_with(client)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Drive every step from the keyboard up to the summary
    async fn fill_order(app: &mut App) {
        // 1: producer with a loading location
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "Nisko").await;
        app.handle_key(ctrl('n')).await.unwrap();

        // 2: one WZ number, typed in lower case
        type_text(app, "wz/12345/06/kra/24").await;
        app.handle_key(ctrl('n')).await.unwrap();

        // 3: tomorrow plus a delivery window
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_text(app, "08:00-16:00").await;
        app.handle_key(ctrl('n')).await.unwrap();

        // 4: address and contact
        for text in ["Kraków", "31042", "Rynek Główny", "1", "Ewa Zielińska", "512345678"] {
            type_text(app, text).await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
        }
        app.handle_key(ctrl('n')).await.unwrap();

        // 5: requester
        for text in ["Jan Kowalski", "jan@example.com", "Handlowy"] {
            type_text(app, text).await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
        }
        app.handle_key(ctrl('n')).await.unwrap();
    }

    mod navigation {
        use super::*;

        #[tokio::test]
        async fn test_next_blocked_on_incomplete_step() {
            let mut app = idle_app();
            app.handle_key(ctrl('n')).await.unwrap();
            assert_eq!(app.state.wizard.current_step(), WizardStep::Transport);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Cannot continue: step 1 is incomplete")
            );
        }

        #[tokio::test]
        async fn test_keyboard_fills_whole_order() {
            let mut app = idle_app();
            fill_order(&mut app).await;

            let draft = app.state.wizard.draft();
            assert_eq!(app.state.wizard.current_step(), WizardStep::Summary);
            assert_eq!(draft.transport_type(), Some(TransportType::Producer));
            assert_eq!(draft.document_numbers(), &["WZ/12345/06/KRA/24".to_string()]);
            assert_eq!(draft.delivery_date(), NaiveDate::from_ymd_opt(2024, 6, 15));
            assert_eq!(
                draft.text_field(FieldPath::DeliveryPostalCode),
                Some("31-042")
            );
            assert_eq!(
                draft.text_field(FieldPath::DeliveryPhoneNumber),
                Some("512-345-678")
            );
        }

        #[tokio::test]
        async fn test_altgr_letters_are_typed() {
            let mut app = idle_app();
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();

            let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
            for c in ['ń', 'ł', 'ż'] {
                app.handle_key(KeyEvent::new(KeyCode::Char(c), altgr)).await.unwrap();
            }
            app.handle_key(ctrl('x')).await.unwrap();
            assert_eq!(
                app.state.wizard.draft().text_field(FieldPath::LoadingLocation),
                Some("ńłż")
            );
        }

        #[tokio::test]
        async fn test_back_button_returns_to_previous_step() {
            let mut app = idle_app();
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(ctrl('n')).await.unwrap();
            assert_eq!(app.state.wizard.current_step(), WizardStep::DocumentNumbers);

            app.handle_key(key(KeyCode::BackTab)).await.unwrap();
            assert!(app.state.form.is_buttons_row_active());
            app.handle_key(key(KeyCode::Left)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.wizard.current_step(), WizardStep::Transport);
            assert_eq!(
                app.state.wizard.draft().transport_type(),
                Some(TransportType::Producer)
            );
        }

        #[tokio::test]
        async fn test_document_slot_shortcuts() {
            let mut app = idle_app();
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(ctrl('n')).await.unwrap();

            app.handle_key(ctrl('a')).await.unwrap();
            app.handle_key(ctrl('a')).await.unwrap();
            assert_eq!(app.state.wizard.draft().document_numbers().len(), 3);
            app.handle_key(ctrl('d')).await.unwrap();
            app.handle_key(ctrl('d')).await.unwrap();
            app.handle_key(ctrl('d')).await.unwrap();
            assert_eq!(app.state.wizard.draft().document_numbers(), &[String::new()]);
        }
    }

    mod dialogs {
        use super::*;

        #[tokio::test]
        async fn test_error_dialog_is_modal() {
            let mut app = idle_app();
            app.push_error("Config could not be read");
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            assert_eq!(app.state.wizard.draft(), &OrderDraft::new());

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(!app.state.has_errors());
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            assert_eq!(
                app.state.wizard.draft().transport_type(),
                Some(TransportType::Producer)
            );
        }

        #[tokio::test]
        async fn test_submit_shortcut_outside_summary_is_ignored() {
            let mut app = idle_app();
            app.handle_key(ctrl('s')).await.unwrap();
            assert!(!app.state.wizard.is_submitting());
            assert!(!app.state.has_errors());
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_success_resets_wizard() {
            let mut client = MockSubmissionClientTrait::new();
            client
                .expect_submit_order()
                .withf(|p| p.delivery_date.as_deref() == Some("15.06.2024"))
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(client);
            fill_order(&mut app).await;

            app.handle_key(ctrl('s')).await.unwrap();
            assert!(app.state.wizard.is_submitting());
            app.settle_submission().await;

            let notification = app.state.notification.clone().unwrap();
            assert_eq!(notification.kind, NotificationKind::Success);
            assert_eq!(app.state.wizard.current_step(), WizardStep::Transport);
            assert_eq!(app.state.wizard.draft(), &OrderDraft::new());

            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(app.state.notification.is_none());
        }

        #[tokio::test]
        async fn test_failure_keeps_draft() {
            let mut client = MockSubmissionClientTrait::new();
            client
                .expect_submit_order()
                .times(1)
                .returning(|_| Err(SubmitError::Rejected { status: 502 }));
            let mut app = app_with(client);
            fill_order(&mut app).await;
            let before = app.state.wizard.draft().clone();

            app.start_submission();
            app.settle_submission().await;

            let notification = app.state.notification.clone().unwrap();
            assert_eq!(notification.kind, NotificationKind::Failure);
            assert_eq!(app.state.wizard.current_step(), WizardStep::Summary);
            assert_eq!(app.state.wizard.draft(), &before);
        }

        #[tokio::test]
        async fn test_keys_ignored_while_sending() {
            let mut client = MockSubmissionClientTrait::new();
            client.expect_submit_order().times(1).returning(|_| Ok(()));
            let mut app = app_with(client);
            fill_order(&mut app).await;

            app.handle_key(ctrl('s')).await.unwrap();
            app.handle_key(ctrl('s')).await.unwrap();
            app.handle_key(ctrl('b')).await.unwrap();
            assert_eq!(app.state.wizard.current_step(), WizardStep::Summary);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Still sending the order")
            );

            app.settle_submission().await;
            assert!(!app.state.wizard.is_submitting());
        }

        #[tokio::test]
        async fn test_poll_without_pending_is_noop() {
            let mut app = idle_app();
            app.poll_submission().await;
            assert!(app.state.notification.is_none());
        }
    }
}
