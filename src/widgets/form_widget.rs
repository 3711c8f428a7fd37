use crate::app::AppMsg;
use crate::widgets::form::{ClientForm, Focus};
use crossterm::event::{KeyCode, KeyModifiers};

/// Translates a key press inside the open dialog into a controller message.
pub fn dialog_key_msg(form: &ClientForm, code: KeyCode, modifiers: KeyModifiers) -> Option<AppMsg> {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Esc => Some(AppMsg::Close),
        KeyCode::Char('s') if ctrl => Some(AppMsg::Submit),
        KeyCode::Char('u') if ctrl => form.focused_field().map(|field| AppMsg::FieldChanged {
            field,
            value: String::new(),
        }),
        KeyCode::Tab | KeyCode::Down => Some(AppMsg::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(AppMsg::FocusPrev),
        KeyCode::Enter => match form.focus {
            Focus::Cancel => Some(AppMsg::Close),
            _ => Some(AppMsg::Submit),
        },
        KeyCode::Backspace => {
            let field = form.focused_field()?;
            let mut value = form.draft.get(field).to_string();
            value.pop()?;
            Some(AppMsg::FieldChanged { field, value })
        }
        KeyCode::Char(c) if !ctrl => {
            let field = form.focused_field()?;
            let mut value = form.draft.get(field).to_string();
            value.push(c);
            Some(AppMsg::FieldChanged { field, value })
        }
        _ => None,
    }
}
