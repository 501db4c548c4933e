//! Application state machine.
//!
//! Screens map one-to-one to the product's routes. Key handling either
//! mutates screen state locally or emits a [`Command`] for the runtime to
//! execute; local validation failures short-circuit before any command is
//! produced, so no network request is ever issued for them.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::api::{
    qr_code_url, ApiError, LogEntry, LoginRequest, LoginResponse, RegisterAccountRequest,
    RegisterMedicineRequest, RegisterMedicineResponse, VerifyRequest, VerifyResponse,
};
use crate::export::ExportError;

use super::logs::{build_rows, LogRow};
use super::{visible_nav_links, Role, Session, SessionStore};

/// Current screen, one per route of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Auth,
    RegisterMedicine,
    VerifyMedicine,
    ViewLogs,
}

/// Which variant of the auth form is active.
///
/// The two variants carry distinct required-field sets and submit handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthView {
    #[default]
    Login,
    Register,
}

/// Severity of a status line, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

/// Inline status message shown on the screen that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }
}

/// A labelled text input buffer.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl FormField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    fn masked(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: true,
        }
    }
}

// Auth form field indices.
const AUTH_NAME: usize = 0;
const AUTH_LICENSE: usize = 1;
const AUTH_EMAIL: usize = 2;
const AUTH_PASSWORD: usize = 3;
const AUTH_CONFIRM: usize = 4;

/// State of the login/registration form.
#[derive(Debug, Clone)]
pub struct AuthFormState {
    pub view: AuthView,
    pub role: Role,
    pub fields: [FormField; 5],
    pub selected: usize,
    pub message: Option<StatusMessage>,
    pub busy: bool,
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self {
            view: AuthView::Login,
            role: Role::Manufacturer,
            fields: [
                FormField::new("Full Name"),
                FormField::new("License Number"),
                FormField::new("Email Address"),
                FormField::masked("Password"),
                FormField::masked("Confirm Password"),
            ],
            selected: AUTH_EMAIL,
            message: None,
            busy: false,
        }
    }
}

impl AuthFormState {
    /// Field indices shown by the active variant.
    pub fn visible_fields(&self) -> std::ops::Range<usize> {
        match self.view {
            AuthView::Login => AUTH_EMAIL..AUTH_CONFIRM,
            AuthView::Register => AUTH_NAME..self.fields.len(),
        }
    }

    fn toggle_view(&mut self) {
        self.view = match self.view {
            AuthView::Login => AuthView::Register,
            AuthView::Register => AuthView::Login,
        };
        self.selected = self.visible_fields().start;
        self.message = None;
    }

    fn next_field(&mut self) {
        let range = self.visible_fields();
        self.selected = if self.selected + 1 >= range.end {
            range.start
        } else {
            self.selected + 1
        };
    }

    fn prev_field(&mut self) {
        let range = self.visible_fields();
        self.selected = if self.selected <= range.start {
            range.end - 1
        } else {
            self.selected - 1
        };
    }

    fn input_char(&mut self, c: char) {
        self.fields[self.selected].value.push(c);
    }

    fn delete_char(&mut self) {
        self.fields[self.selected].value.pop();
    }

    fn clear_passwords(&mut self) {
        self.fields[AUTH_PASSWORD].value.clear();
        self.fields[AUTH_CONFIRM].value.clear();
    }
}

// Medicine form field indices.
const MED_NAME: usize = 0;
const MED_BATCH: usize = 1;
const MED_EXPIRY: usize = 2;
const MED_MANUFACTURER: usize = 3;

/// State of the medicine registration form.
#[derive(Debug, Clone)]
pub struct MedicineFormState {
    pub fields: [FormField; 4],
    pub selected: usize,
    pub message: Option<StatusMessage>,
    /// Last server-issued tag id, held for display only.
    pub tag_id: Option<String>,
    /// QR rendering URL for the last tag id.
    pub qr_url: Option<String>,
    pub busy: bool,
}

impl Default for MedicineFormState {
    fn default() -> Self {
        Self {
            fields: [
                FormField::new("Medicine Name"),
                FormField::new("Batch Number"),
                FormField::new("Expiry Date (YYYY-MM-DD)"),
                FormField::new("Manufacturer Name"),
            ],
            selected: 0,
            message: None,
            tag_id: None,
            qr_url: None,
            busy: false,
        }
    }
}

impl MedicineFormState {
    fn next_field(&mut self) {
        self.selected = (self.selected + 1) % self.fields.len();
    }

    fn prev_field(&mut self) {
        self.selected = if self.selected == 0 {
            self.fields.len() - 1
        } else {
            self.selected - 1
        };
    }

    fn clear_values(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.clear();
        }
        self.selected = 0;
    }
}

/// State of the verification screen.
#[derive(Debug, Clone, Default)]
pub struct VerifyScreenState {
    pub tag_id: String,
    pub result: Option<VerifyResponse>,
    pub message: Option<StatusMessage>,
    pub busy: bool,
}

/// State of the log viewing screen.
#[derive(Debug, Clone, Default)]
pub struct LogsScreenState {
    pub tag_id: String,
    pub rows: Vec<LogRow>,
    pub message: Option<StatusMessage>,
    pub scroll: usize,
    pub busy: bool,
}

/// Network request the runtime should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    RegisterAccount {
        role: Role,
        body: RegisterAccountRequest,
    },
    Login {
        role: Role,
        body: LoginRequest,
    },
    RegisterMedicine {
        token: String,
        body: RegisterMedicineRequest,
    },
    VerifyMedicine {
        token: String,
        body: VerifyRequest,
    },
    FetchLogs {
        tag_id: String,
    },
}

/// Side effect requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Request(ApiRequest),
    Logout,
    ExportPdf,
}

/// Main application model.
pub struct App {
    pub screen: Screen,
    pub session: Option<Session>,
    pub auth: AuthFormState,
    pub medicine: MedicineFormState,
    pub verify: VerifyScreenState,
    pub logs: LogsScreenState,
    should_quit: bool,
}

impl App {
    /// Create the application with the session loaded at startup, if any.
    pub fn new(session: Option<Session>) -> Self {
        Self {
            screen: Screen::Home,
            session,
            auth: AuthFormState::default(),
            medicine: MedicineFormState::default(),
            verify: VerifyScreenState::default(),
            logs: LogsScreenState::default(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle a key press, optionally emitting a command for the runtime.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        // Global quit.
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return None;
        }

        match self.screen {
            Screen::Home => self.handle_home_key(code),
            Screen::Auth => self.handle_auth_key(code),
            Screen::RegisterMedicine => self.handle_medicine_key(code),
            Screen::VerifyMedicine => self.handle_verify_key(code),
            Screen::ViewLogs => self.handle_logs_key(code, modifiers),
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Char(c) => {
                let c = c.to_ascii_lowercase();

                // Navigation entries are reachable only when visible.
                if let Some(target) = visible_nav_links(self.session.as_ref())
                    .iter()
                    .find(|link| link.hotkey == c)
                    .map(|link| link.screen)
                {
                    self.screen = target;
                    return None;
                }

                match c {
                    'l' if self.session.is_none() => {
                        self.auth.view = AuthView::Login;
                        self.auth.selected = self.auth.visible_fields().start;
                        self.auth.message = None;
                        self.screen = Screen::Auth;
                        None
                    }
                    'n' if self.session.is_none() => {
                        self.auth.view = AuthView::Register;
                        self.auth.selected = self.auth.visible_fields().start;
                        self.auth.message = None;
                        self.screen = Screen::Auth;
                        None
                    }
                    'x' if self.session.is_some() => Some(Command::Logout),
                    'q' => {
                        self.should_quit = true;
                        None
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn handle_auth_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Home;
                None
            }
            KeyCode::F(2) => {
                self.auth.toggle_view();
                None
            }
            KeyCode::Left | KeyCode::Right => {
                self.auth.role = self.auth.role.toggled();
                None
            }
            KeyCode::Up => {
                self.auth.prev_field();
                None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.auth.next_field();
                None
            }
            KeyCode::Backspace => {
                self.auth.delete_char();
                None
            }
            KeyCode::Delete => {
                self.auth.fields[self.auth.selected].value.clear();
                None
            }
            KeyCode::Enter => self.submit_auth(),
            KeyCode::Char(c) => {
                self.auth.input_char(c);
                None
            }
            _ => None,
        }
    }

    fn submit_auth(&mut self) -> Option<Command> {
        if self.auth.busy {
            return None;
        }
        self.auth.message = None;

        let required_present = self
            .auth
            .visible_fields()
            .all(|i| !self.auth.fields[i].value.trim().is_empty());
        if !required_present {
            self.auth.message = Some(StatusMessage::error("All fields are required."));
            return None;
        }

        match self.auth.view {
            AuthView::Register => {
                if self.auth.fields[AUTH_PASSWORD].value != self.auth.fields[AUTH_CONFIRM].value {
                    self.auth.message = Some(StatusMessage::error("Passwords do not match."));
                    return None;
                }

                self.auth.busy = true;
                Some(Command::Request(ApiRequest::RegisterAccount {
                    role: self.auth.role,
                    body: RegisterAccountRequest {
                        name: self.auth.fields[AUTH_NAME].value.trim().to_string(),
                        license_no: self.auth.fields[AUTH_LICENSE].value.trim().to_string(),
                        email: self.auth.fields[AUTH_EMAIL].value.trim().to_string(),
                        password: self.auth.fields[AUTH_PASSWORD].value.clone(),
                    },
                }))
            }
            AuthView::Login => {
                self.auth.busy = true;
                Some(Command::Request(ApiRequest::Login {
                    role: self.auth.role,
                    body: LoginRequest {
                        email: self.auth.fields[AUTH_EMAIL].value.trim().to_string(),
                        password: self.auth.fields[AUTH_PASSWORD].value.clone(),
                    },
                }))
            }
        }
    }

    /// Apply the outcome of an account-registration request.
    pub fn apply_register_account(&mut self, result: Result<(), ApiError>) {
        self.auth.busy = false;
        match result {
            Ok(()) => {
                self.auth.view = AuthView::Login;
                self.auth.selected = self.auth.visible_fields().start;
                self.auth.clear_passwords();
                self.auth.message = Some(StatusMessage::success(
                    "Registration successful. Please log in.",
                ));
            }
            Err(e) => {
                tracing::error!("account registration failed: {e}");
                self.auth.message = Some(StatusMessage::error("Authentication failed."));
            }
        }
    }

    /// Apply the outcome of a login request, persisting the session on
    /// success and navigating to the landing screen.
    pub fn apply_login(
        &mut self,
        requested_role: Role,
        result: Result<LoginResponse, ApiError>,
        store: &SessionStore,
    ) {
        self.auth.busy = false;
        match result {
            Ok(response) => {
                let role = Role::parse(&response.role).unwrap_or(requested_role);
                let session = Session {
                    token: response.token,
                    role,
                };
                if let Err(e) = store.save(&session) {
                    tracing::error!("failed to persist session: {e}");
                }
                self.session = Some(session);
                self.auth.clear_passwords();
                self.auth.message = None;
                self.screen = Screen::Home;
            }
            Err(e) => {
                tracing::error!("login failed: {e}");
                self.auth.message = Some(StatusMessage::error("Authentication failed."));
            }
        }
    }

    /// Clear the persisted session and return to the login screen.
    pub fn logout(&mut self, store: &SessionStore) {
        if let Err(e) = store.clear() {
            tracing::error!("failed to clear session: {e}");
        }
        self.session = None;
        self.auth.view = AuthView::Login;
        self.auth.selected = self.auth.visible_fields().start;
        self.auth.message = None;
        self.screen = Screen::Auth;
    }

    fn handle_medicine_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Home;
                None
            }
            KeyCode::Up => {
                self.medicine.prev_field();
                None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.medicine.next_field();
                None
            }
            KeyCode::Backspace => {
                self.medicine.fields[self.medicine.selected].value.pop();
                None
            }
            KeyCode::Delete => {
                self.medicine.fields[self.medicine.selected].value.clear();
                None
            }
            KeyCode::Enter => self.submit_medicine(),
            KeyCode::Char(c) => {
                self.medicine.fields[self.medicine.selected].value.push(c);
                None
            }
            _ => None,
        }
    }

    fn submit_medicine(&mut self) -> Option<Command> {
        if self.medicine.busy {
            return None;
        }
        self.medicine.message = None;
        self.medicine.tag_id = None;
        self.medicine.qr_url = None;

        let Some(session) = self.session.as_ref() else {
            self.medicine.message = Some(StatusMessage::error(
                "You must be logged in as a manufacturer.",
            ));
            return None;
        };

        if self
            .medicine
            .fields
            .iter()
            .any(|f| f.value.trim().is_empty())
        {
            self.medicine.message = Some(StatusMessage::error("All fields are required."));
            return None;
        }

        self.medicine.busy = true;
        Some(Command::Request(ApiRequest::RegisterMedicine {
            token: session.token.clone(),
            body: RegisterMedicineRequest {
                name: self.medicine.fields[MED_NAME].value.trim().to_string(),
                batch: self.medicine.fields[MED_BATCH].value.trim().to_string(),
                expiry: self.medicine.fields[MED_EXPIRY].value.trim().to_string(),
                manufacturer: self.medicine.fields[MED_MANUFACTURER].value.trim().to_string(),
            },
        }))
    }

    /// Apply the outcome of a medicine-registration request.
    pub fn apply_register_medicine(&mut self, result: Result<RegisterMedicineResponse, ApiError>) {
        self.medicine.busy = false;
        match result {
            Ok(response) => {
                self.medicine.message =
                    Some(StatusMessage::success("Medicine registered successfully."));
                self.medicine.qr_url = Some(qr_code_url(&response.tag_id));
                self.medicine.tag_id = Some(response.tag_id);
                self.medicine.clear_values();
            }
            Err(e) if e.is_forbidden() => {
                self.medicine.message = Some(StatusMessage::error(
                    "Access denied: only manufacturers can register medicines.",
                ));
            }
            Err(e) => {
                tracing::error!("medicine registration failed: {e}");
                self.medicine.message = Some(StatusMessage::error("Error registering medicine."));
            }
        }
    }

    fn handle_verify_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Home;
                None
            }
            KeyCode::Backspace => {
                self.verify.tag_id.pop();
                None
            }
            KeyCode::Delete => {
                self.verify.tag_id.clear();
                None
            }
            KeyCode::Enter => self.submit_verify(),
            KeyCode::Char(c) => {
                self.verify.tag_id.push(c);
                None
            }
            _ => None,
        }
    }

    fn submit_verify(&mut self) -> Option<Command> {
        if self.verify.busy {
            return None;
        }
        self.verify.message = None;
        self.verify.result = None;

        let Some(session) = self.session.as_ref() else {
            self.verify.message = Some(StatusMessage::error(
                "You must be logged in as a pharmacy owner to verify medicine.",
            ));
            return None;
        };

        if session.role != Role::PharmacyOwner {
            self.verify.message = Some(StatusMessage::error(
                "Access denied. Only pharmacy owners can verify medicine.",
            ));
            return None;
        }

        self.verify.busy = true;
        Some(Command::Request(ApiRequest::VerifyMedicine {
            token: session.token.clone(),
            body: VerifyRequest {
                tag_id: self.verify.tag_id.trim().to_string(),
            },
        }))
    }

    /// Apply the outcome of a verification request.
    ///
    /// A not-found response is a successful call with a negative outcome,
    /// not an error.
    pub fn apply_verify(&mut self, result: Result<VerifyResponse, ApiError>) {
        self.verify.busy = false;
        match result {
            Ok(response) => {
                self.verify.message = Some(if response.found {
                    StatusMessage::success("Medicine found.")
                } else {
                    StatusMessage::info("Medicine not found.")
                });
                self.verify.result = Some(response);
            }
            Err(e) => {
                tracing::error!("verification failed: {e}");
                self.verify.message = Some(StatusMessage::error("Error verifying medicine."));
            }
        }
    }

    fn handle_logs_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Home;
                None
            }
            KeyCode::Char('e') if modifiers.contains(KeyModifiers::CONTROL) => {
                if self.logs.rows.is_empty() {
                    self.logs.message = Some(StatusMessage::info("Nothing to export yet."));
                    None
                } else {
                    Some(Command::ExportPdf)
                }
            }
            KeyCode::Up => {
                self.logs.scroll = self.logs.scroll.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.logs.scroll + 1 < self.logs.rows.len() {
                    self.logs.scroll += 1;
                }
                None
            }
            KeyCode::Backspace => {
                self.logs.tag_id.pop();
                None
            }
            KeyCode::Delete => {
                self.logs.tag_id.clear();
                None
            }
            KeyCode::Enter => self.submit_fetch_logs(),
            KeyCode::Char(c) => {
                self.logs.tag_id.push(c);
                None
            }
            _ => None,
        }
    }

    fn submit_fetch_logs(&mut self) -> Option<Command> {
        if self.logs.busy {
            return None;
        }

        let tag_id = self.logs.tag_id.trim().to_string();
        if tag_id.is_empty() {
            self.logs.message = Some(StatusMessage::error("Please enter a tag ID."));
            return None;
        }

        self.logs.message = None;
        self.logs.busy = true;
        Some(Command::Request(ApiRequest::FetchLogs { tag_id }))
    }

    /// Apply the outcome of a log fetch, replacing the displayed list.
    pub fn apply_fetch_logs(&mut self, result: Result<Vec<LogEntry>, ApiError>) {
        self.logs.busy = false;
        match result {
            Ok(entries) => {
                self.logs.rows = build_rows(&entries);
                self.logs.scroll = 0;
                self.logs.message = if self.logs.rows.is_empty() {
                    Some(StatusMessage::info("No matching log entries."))
                } else {
                    None
                };
            }
            Err(e) => {
                tracing::error!("log fetch failed: {e}");
                self.logs.rows.clear();
                self.logs.message = Some(match e.server_message() {
                    Some(message) => StatusMessage::error(message),
                    None => StatusMessage::error("Error fetching logs."),
                });
            }
        }
    }

    /// Record the outcome of a PDF export on the logs screen.
    pub fn apply_export(&mut self, result: Result<PathBuf, ExportError>) {
        self.logs.message = Some(match result {
            Ok(path) => StatusMessage::success(format!("Exported to {}", path.display())),
            Err(e) => {
                tracing::error!("PDF export failed: {e}");
                StatusMessage::error("Export failed.")
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(app: &mut App, code: KeyCode) -> Option<Command> {
        app.handle_key(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            key(app, KeyCode::Char(c));
        }
    }

    fn logged_in(role: Role) -> App {
        App::new(Some(Session {
            token: "tok".into(),
            role,
        }))
    }

    fn fill_register_form(app: &mut App, password: &str, confirm: &str) {
        app.auth.view = AuthView::Register;
        app.auth.fields[AUTH_NAME].value = "Jo".into();
        app.auth.fields[AUTH_LICENSE].value = "L-9".into();
        app.auth.fields[AUTH_EMAIL].value = "jo@rx.com".into();
        app.auth.fields[AUTH_PASSWORD].value = password.into();
        app.auth.fields[AUTH_CONFIRM].value = confirm.into();
    }

    #[test]
    fn mismatched_passwords_never_issue_a_request() {
        let mut app = App::new(None);
        app.screen = Screen::Auth;
        fill_register_form(&mut app, "pw-one", "pw-two");

        assert_eq!(key(&mut app, KeyCode::Enter), None);
        assert_eq!(
            app.auth.message.as_ref().map(|m| m.text.as_str()),
            Some("Passwords do not match.")
        );
        assert!(!app.auth.busy);
    }

    #[test]
    fn matching_passwords_emit_register_request() {
        let mut app = App::new(None);
        app.screen = Screen::Auth;
        fill_register_form(&mut app, "pw", "pw");

        let command = key(&mut app, KeyCode::Enter);
        assert!(matches!(
            command,
            Some(Command::Request(ApiRequest::RegisterAccount { .. }))
        ));
        assert!(app.auth.busy);
    }

    #[test]
    fn successful_login_persists_session_and_navigates_home() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let mut app = App::new(None);
        app.screen = Screen::Auth;

        app.apply_login(
            Role::Manufacturer,
            Ok(LoginResponse {
                token: "tok-123".into(),
                role: "manufacturer".into(),
            }),
            &store,
        );

        assert_eq!(app.screen, Screen::Home);
        let persisted = store.load().unwrap().expect("session persisted");
        assert_eq!(persisted.token, "tok-123");
        assert_eq!(persisted.role, Role::Manufacturer);
        assert_eq!(app.session, Some(persisted));
    }

    #[test]
    fn logout_clears_store_and_navigates_to_login() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let session = Session {
            token: "tok".into(),
            role: Role::PharmacyOwner,
        };
        store.save(&session).unwrap();

        let mut app = App::new(Some(session));
        let command = key(&mut app, KeyCode::Char('x'));
        assert_eq!(command, Some(Command::Logout));

        app.logout(&store);
        assert!(app.session.is_none());
        assert!(store.load().unwrap().is_none());
        assert_eq!(app.screen, Screen::Auth);
        assert_eq!(app.auth.view, AuthView::Login);
    }

    #[test]
    fn medicine_submit_without_session_never_issues_a_request() {
        let mut app = App::new(None);
        app.screen = Screen::RegisterMedicine;
        for field in app.medicine.fields.iter_mut() {
            field.value = "x".into();
        }

        assert_eq!(key(&mut app, KeyCode::Enter), None);
        assert_eq!(
            app.medicine.message.as_ref().map(|m| m.text.as_str()),
            Some("You must be logged in as a manufacturer.")
        );
    }

    #[test]
    fn medicine_submit_with_session_emits_request_with_token() {
        let mut app = logged_in(Role::Manufacturer);
        app.screen = Screen::RegisterMedicine;
        for field in app.medicine.fields.iter_mut() {
            field.value = "x".into();
        }

        match key(&mut app, KeyCode::Enter) {
            Some(Command::Request(ApiRequest::RegisterMedicine { token, .. })) => {
                assert_eq!(token, "tok");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(app.medicine.busy);
    }

    #[test]
    fn verify_with_wrong_role_never_issues_a_request() {
        let mut app = logged_in(Role::Manufacturer);
        app.screen = Screen::VerifyMedicine;
        type_str(&mut app, "TAG-1");

        assert_eq!(key(&mut app, KeyCode::Enter), None);
        assert_eq!(
            app.verify.message.as_ref().map(|m| m.text.as_str()),
            Some("Access denied. Only pharmacy owners can verify medicine.")
        );
    }

    #[test]
    fn verify_with_pharmacy_owner_emits_request() {
        let mut app = logged_in(Role::PharmacyOwner);
        app.screen = Screen::VerifyMedicine;
        type_str(&mut app, "TAG-1");

        assert!(matches!(
            key(&mut app, KeyCode::Enter),
            Some(Command::Request(ApiRequest::VerifyMedicine { .. }))
        ));
    }

    #[test]
    fn not_found_verification_is_a_negative_outcome_not_an_error() {
        let mut app = logged_in(Role::PharmacyOwner);
        app.apply_verify(Ok(VerifyResponse {
            found: false,
            medicine: None,
        }));

        let message = app.verify.message.unwrap();
        assert_eq!(message.kind, MessageKind::Info);
        assert_eq!(message.text, "Medicine not found.");
    }

    #[test]
    fn forbidden_medicine_registration_shows_role_specific_message() {
        let mut app = logged_in(Role::PharmacyOwner);
        app.medicine.busy = true;
        app.apply_register_medicine(Err(ApiError::Status {
            status: 403,
            message: "forbidden".into(),
        }));

        assert_eq!(
            app.medicine.message.as_ref().map(|m| m.text.as_str()),
            Some("Access denied: only manufacturers can register medicines.")
        );
        assert!(!app.medicine.busy);
    }

    #[test]
    fn empty_tag_id_blocks_log_fetch_locally() {
        let mut app = App::new(None);
        app.screen = Screen::ViewLogs;

        assert_eq!(key(&mut app, KeyCode::Enter), None);
        assert_eq!(
            app.logs.message.as_ref().map(|m| m.text.as_str()),
            Some("Please enter a tag ID.")
        );
    }

    #[test]
    fn busy_screen_ignores_repeat_submissions() {
        let mut app = App::new(None);
        app.screen = Screen::ViewLogs;
        type_str(&mut app, "TAG-1");

        assert!(key(&mut app, KeyCode::Enter).is_some());
        assert!(app.logs.busy);
        // A second Enter while in flight does nothing.
        assert_eq!(key(&mut app, KeyCode::Enter), None);
    }

    #[test]
    fn gated_hotkeys_do_nothing_for_the_wrong_role() {
        let mut app = logged_in(Role::PharmacyOwner);
        key(&mut app, KeyCode::Char('1'));
        assert_eq!(app.screen, Screen::Home);

        key(&mut app, KeyCode::Char('2'));
        assert_eq!(app.screen, Screen::VerifyMedicine);
    }

    #[test]
    fn fetch_error_surfaces_server_message() {
        let mut app = App::new(None);
        app.logs.busy = true;
        app.apply_fetch_logs(Err(ApiError::Status {
            status: 404,
            message: "No logs for tag".into(),
        }));

        assert_eq!(
            app.logs.message.as_ref().map(|m| m.text.as_str()),
            Some("No logs for tag")
        );
        assert!(!app.logs.busy);
    }
}
