use crossterm::event::{
  KeyCode,
  KeyEvent,
  KeyModifiers
};

/// Line editing for modal text fields.
/// Returns `true` when the key was
/// consumed.
pub(crate) fn edit_text(
  value: &mut String,
  key: KeyEvent
) -> bool {
  match key.code {
    | KeyCode::Backspace => {
      value.pop();
      true
    }
    | KeyCode::Char(ch)
      if !key.modifiers.contains(
        KeyModifiers::CONTROL
      ) =>
    {
      value.push(ch);
      true
    }
    | _ => false
  }
}
