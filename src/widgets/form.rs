use crate::model::{ClientRecord, ErrorMap, FieldKey};
use crate::widgets::chrome::{centered_rect, dialog_block};
use ratatui::prelude::*;
use ratatui::widgets::*;
use regex::Regex;
use std::sync::OnceLock;

type Rule = fn(&str) -> String;

// One pure rule per field; lookup is by key so new fields only add a row
const RULES: [(FieldKey, Rule); FieldKey::COUNT] = [
    (FieldKey::FirstName, first_name_rule),
    (FieldKey::LastName, last_name_rule),
    (FieldKey::Username, username_rule),
    (FieldKey::Password, password_rule),
    (FieldKey::Phone, phone_rule),
    (FieldKey::Email, email_rule),
];

pub const PASSWORD_MIN_LEN: usize = 6;

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^[0-9]{10,11}$").expect("phone pattern compiles"))
}

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

fn required(value: &str, message: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(message.to_string())
    } else {
        None
    }
}

fn first_name_rule(value: &str) -> String {
    required(value, "First name is required").unwrap_or_default()
}

fn last_name_rule(value: &str) -> String {
    required(value, "Last name is required").unwrap_or_default()
}

fn username_rule(value: &str) -> String {
    required(value, "Username is required").unwrap_or_default()
}

fn password_rule(value: &str) -> String {
    if let Some(err) = required(value, "Password is required") {
        return err;
    }
    // UTF-16 units, so astral characters count twice as in the web client
    if value.encode_utf16().count() < PASSWORD_MIN_LEN {
        return format!("Password must be at least {PASSWORD_MIN_LEN} characters");
    }
    String::new()
}

fn phone_rule(value: &str) -> String {
    if let Some(err) = required(value, "Phone number is required") {
        return err;
    }
    if !phone_re().is_match(value) {
        return "Please enter a valid phone number".into();
    }
    String::new()
}

fn email_rule(value: &str) -> String {
    if !value.is_empty() && !email_re().is_match(value) {
        return "Please enter a valid email address".into();
    }
    String::new()
}

pub fn validate_field(key: FieldKey, value: &str) -> String {
    RULES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, rule)| rule(value))
        .unwrap_or_default()
}

// Raw-name entry point; names outside the record validate clean
#[cfg(test)]
pub fn validate_named(name: &str, value: &str) -> String {
    match FieldKey::from_name(name) {
        Some(key) => validate_field(key, value),
        None => String::new(),
    }
}

pub fn validate_all(record: &ClientRecord) -> ErrorMap {
    let mut errors = ErrorMap::default();
    for key in FieldKey::ALL {
        errors.set(key, validate_field(key, record.get(key)));
    }
    errors
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Field(FieldKey),
    Cancel,
    Submit,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(FieldKey::FORM_ORDER[0])
    }
}

impl Focus {
    const RING_LEN: usize = FieldKey::COUNT + 2;

    fn position(self) -> usize {
        match self {
            Focus::Field(key) => FieldKey::FORM_ORDER
                .iter()
                .position(|k| *k == key)
                .unwrap_or(0),
            Focus::Cancel => FieldKey::COUNT,
            Focus::Submit => FieldKey::COUNT + 1,
        }
    }

    fn at(pos: usize) -> Self {
        match FieldKey::FORM_ORDER.get(pos) {
            Some(key) => Focus::Field(*key),
            None if pos == FieldKey::COUNT => Focus::Cancel,
            None => Focus::Submit,
        }
    }

    pub fn next(self) -> Self {
        Self::at((self.position() + 1) % Self::RING_LEN)
    }

    pub fn prev(self) -> Self {
        Self::at((self.position() + Self::RING_LEN - 1) % Self::RING_LEN)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClientForm {
    pub draft: ClientRecord,
    pub errors: ErrorMap,
    pub focus: Focus,
}

impl ClientForm {
    pub fn set_field(&mut self, key: FieldKey, value: String) {
        self.errors.set(key, validate_field(key, &value));
        self.draft.set(key, value);
    }

    /// Revalidates every field; true when nothing blocks a submit.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_all(&self.draft);
        self.errors.is_clear()
    }

    pub fn reset(&mut self) {
        *self = ClientForm::default();
    }

    pub fn focused_field(&self) -> Option<FieldKey> {
        match self.focus {
            Focus::Field(key) => Some(key),
            _ => None,
        }
    }
}

pub struct DialogView<'a> {
    pub title: &'a str,
    pub heading: &'a str,
    pub busy: bool,
    pub cursor_on: bool,
}

fn button_style(focused: bool, base: Style) -> Style {
    if focused {
        crate::theme::list_cursor_style()
    } else {
        base
    }
}

pub fn dialog_height() -> u16 {
    // chrome + heading/divider + one row per field (+ message) + actions
    (2 + 3 + FieldKey::COUNT * 2 + 2) as u16
}

// Keeps the tail (where the cursor sits) when a value outgrows its column
fn fit_value(val: &str, width: usize) -> String {
    let n = val.chars().count();
    if n <= width {
        return val.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let tail: String = val.chars().skip(n - (width - 1)).collect();
    format!("…{tail}")
}

pub fn draw_client_dialog(f: &mut Frame, area: Rect, form: &ClientForm, view: &DialogView) {
    let rect = centered_rect(70, dialog_height(), area);
    f.render_widget(Clear, rect);

    let label_w = FieldKey::ALL
        .iter()
        .map(|k| k.label().len())
        .max()
        .unwrap_or(0)
        + 1;
    // inner width minus selector, label and the two bracket cells
    let value_w = (rect.width.saturating_sub(2) as usize).saturating_sub(2 + label_w + 2);
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("≡ {}", view.heading),
        crate::theme::text_active_bold(),
    )));
    lines.push(Line::from(Span::styled(
        "─".repeat(rect.width.saturating_sub(2) as usize),
        crate::theme::text_muted(),
    )));
    for key in FieldKey::FORM_ORDER {
        let focused = form.focus == Focus::Field(key);
        let sel = if focused { '›' } else { ' ' };
        let raw = form.draft.get(key);
        let invalid = form.errors.has_error(key);
        let mut spans = vec![Span::raw(format!("{sel} {:<label_w$}", key.label()))];
        let mut val = if key.is_masked() {
            "•".repeat(raw.chars().count())
        } else {
            raw.to_string()
        };
        let mut value_style = if invalid {
            crate::theme::text_error()
        } else if focused {
            crate::theme::text_editing_bold()
        } else {
            Style::default()
        };
        if raw.is_empty() {
            if let Some(ph) = key.placeholder() {
                if !(focused && view.cursor_on) {
                    val = ph.to_string();
                    value_style = crate::theme::text_muted();
                }
            }
        }
        if focused && view.cursor_on {
            val.push('▏');
        }
        let val = fit_value(&val, value_w);
        let (open, close) = if invalid { ("[", "]") } else { (" ", " ") };
        spans.push(Span::styled(open, crate::theme::text_error()));
        spans.push(Span::styled(val, value_style));
        spans.push(Span::styled(close, crate::theme::text_error()));
        lines.push(Line::from(spans));
        if invalid {
            lines.push(Line::from(Span::styled(
                format!("  {:<label_w$} ! {}", "", form.errors.get(key)),
                crate::theme::text_error(),
            )));
        }
    }
    lines.push(Line::from(""));
    let submit_label = if view.busy { "Submitting..." } else { "Submit" };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
            " Cancel ",
            button_style(form.focus == Focus::Cancel, crate::theme::text_muted()),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[ {submit_label} ]"),
            button_style(form.focus == Focus::Submit, crate::theme::text_active_bold()),
        ),
    ]));

    let block = dialog_block(view.title);
    let p = Paragraph::new(lines).block(block);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn blank_values_fail_every_required_field() {
        for key in FieldKey::ALL {
            for blank in ["", "   ", "\t"] {
                let msg = validate_field(key, blank);
                if key == FieldKey::Email {
                    // whitespace is non-empty, so the shape check applies
                    if blank.is_empty() {
                        assert!(msg.is_empty(), "email must be optional");
                    }
                } else {
                    assert!(!msg.is_empty(), "{key:?} accepted {blank:?}");
                }
            }
        }
    }

    #[test]
    fn valid_values_pass() {
        let cases = [
            (FieldKey::FirstName, "Ada"),
            (FieldKey::LastName, "Lovelace"),
            (FieldKey::Username, "ada"),
            (FieldKey::Password, "abcdef"),
            (FieldKey::Phone, "1234567890"),
            (FieldKey::Email, "a@b.co"),
        ];
        for (key, value) in cases {
            assert_eq!(validate_field(key, value), "", "{key:?} rejected {value:?}");
        }
    }

    #[test]
    fn phone_needs_ten_or_eleven_digits() {
        assert_eq!(
            validate_field(FieldKey::Phone, "12345"),
            "Please enter a valid phone number"
        );
        assert_eq!(validate_field(FieldKey::Phone, "1234567890"), "");
        assert_eq!(validate_field(FieldKey::Phone, "12345678901"), "");
        assert!(!validate_field(FieldKey::Phone, "123456789012").is_empty());
        assert!(!validate_field(FieldKey::Phone, "123-456-7890").is_empty());
        assert_eq!(
            validate_field(FieldKey::Phone, ""),
            "Phone number is required"
        );
    }

    #[test]
    fn password_minimum_length() {
        assert_eq!(
            validate_field(FieldKey::Password, "abc"),
            "Password must be at least 6 characters"
        );
        assert_eq!(validate_field(FieldKey::Password, "abcdef"), "");
        assert_eq!(
            validate_field(FieldKey::Password, "  "),
            "Password is required"
        );
    }

    #[test]
    fn password_length_counts_utf16_units() {
        assert_eq!(validate_field(FieldKey::Password, "😀😀😀"), "");
        assert_eq!(
            validate_field(FieldKey::Password, "😀😀"),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn long_values_scroll_to_their_tail() {
        assert_eq!(fit_value("abc", 5), "abc");
        assert_eq!(fit_value("abcdefgh", 5), "…efgh");
        assert_eq!(fit_value("abc", 0), "");
    }

    #[test]
    fn email_is_optional_but_shaped() {
        assert_eq!(validate_field(FieldKey::Email, ""), "");
        assert_eq!(
            validate_field(FieldKey::Email, "not-an-email"),
            "Please enter a valid email address"
        );
        assert!(!validate_field(FieldKey::Email, "a b@c.de").is_empty());
        assert_eq!(validate_field(FieldKey::Email, "a@b.co"), "");
    }

    #[test]
    fn unknown_names_validate_clean() {
        assert_eq!(validate_named("nickname", ""), "");
        assert_eq!(validate_named("firstName", ""), "First name is required");
    }

    #[test]
    fn set_field_only_touches_that_fields_error() {
        let mut form = ClientForm::default();
        form.errors.set(FieldKey::Phone, "stale");
        form.set_field(FieldKey::FirstName, String::new());
        assert_eq!(form.errors.get(FieldKey::FirstName), "First name is required");
        assert_eq!(form.errors.get(FieldKey::Phone), "stale");
        form.set_field(FieldKey::FirstName, "Ada".into());
        assert_eq!(form.draft.first_name, "Ada");
        assert!(!form.errors.has_error(FieldKey::FirstName));
    }

    #[test]
    fn focus_ring_wraps_both_ways() {
        let first = Focus::default();
        assert_eq!(first, Focus::Field(FieldKey::FirstName));
        assert_eq!(first.prev(), Focus::Submit);
        assert_eq!(Focus::Submit.next(), first);
        assert_eq!(Focus::Field(FieldKey::Phone).next(), Focus::Cancel);
        assert_eq!(Focus::Cancel.next(), Focus::Submit);
        let mut f = first;
        for _ in 0..FieldKey::COUNT + 2 {
            f = f.next();
        }
        assert_eq!(f, first);
    }

    fn render(form: &ClientForm, busy: bool) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let view = DialogView {
                    title: "Add New Client",
                    heading: "Client Details",
                    busy,
                    cursor_on: false,
                };
                draw_client_dialog(f, f.area(), form, &view);
            })
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn long_values_keep_action_row_inside_dialog() {
        let mut form = ClientForm::default();
        let long = "x".repeat(120);
        for key in FieldKey::ALL {
            form.set_field(key, long.clone());
        }
        form.set_field(FieldKey::Password, "abc".into());
        for key in [FieldKey::FirstName, FieldKey::LastName, FieldKey::Username] {
            form.set_field(key, String::new());
        }
        assert!(!form.validate());
        assert_eq!(form.errors.error_count(), FieldKey::COUNT);
        let out = render(&form, false);
        assert!(out.contains("[ Submit ]"));
        assert!(out.contains("Cancel"));
        assert!(out.contains("…xxx"));
    }

    #[test]
    fn dialog_renders_labels_errors_and_busy_label() {
        let mut form = ClientForm::default();
        form.set_field(FieldKey::Password, "secret1".into());
        form.set_field(FieldKey::Phone, "12345".into());
        let idle = render(&form, false);
        assert!(idle.contains("Add New Client"));
        assert!(idle.contains("Client Details"));
        assert!(idle.contains("User Name"));
        assert!(idle.contains("Optional"));
        assert!(idle.contains("•••••••"));
        assert!(!idle.contains("secret1"));
        assert!(idle.contains("Please enter a valid phone number"));
        assert!(idle.contains("[ Submit ]"));
        let busy = render(&form, true);
        assert!(busy.contains("Submitting..."));
    }
}
