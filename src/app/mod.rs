use crate::model::{ClientRecord, FieldKey};
use crate::ui::AppState;

pub enum AppMsg {
    Open,
    FieldChanged {
        field: FieldKey,
        value: String,
    },
    FocusNext,
    FocusPrev,
    Submit,
    Close,
    CreateFinished {
        record: ClientRecord,
        outcome: Result<(), String>,
    },
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    CreateClient(ClientRecord),
    Close,
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    use AppMsg::*;
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        Open => {
            if !state.open {
                state.form.reset();
                state.open = true;
                state.dbg("dialog opened");
            }
        }
        FieldChanged { field, value } => {
            if state.open {
                state.form.set_field(field, value);
            }
        }
        FocusNext => state.form.focus = state.form.focus.next(),
        FocusPrev => state.form.focus = state.form.focus.prev(),
        Submit => {
            if !state.open {
                return effects;
            }
            if !state.form.validate() {
                let n = state.form.errors.error_count();
                state.dbg(format!("submit blocked: {n} invalid field(s)"));
                return effects;
            }
            // Close optimistically; the create outcome is the store's business
            let record = std::mem::take(&mut state.form.draft);
            state.form.reset();
            state.dbg(format!("dispatch create client: {}", record.username));
            effects.push(Effect::CreateClient(record));
            effects.push(Effect::Close);
        }
        Close => {
            if state.open {
                state.form.reset();
                effects.push(Effect::Close);
            }
        }
        CreateFinished { record, outcome } => match outcome {
            Ok(()) => state.dbg(format!("client created: {}", record.username)),
            Err(e) => state.dbg(format!("create client {} failed: {e}", record.username)),
        },
    }
    effects
}
