use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  DeleteSelected,
  HideHelp,
  None,
  PageDown,
  PageUp,
  Quit,
  Refresh,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  StartComposing,
  StopComposing,
  SubmitComment,
  UpvoteSelected,
}

impl Command {
  /// Maps a key pressed while browsing the list.
  pub(crate) fn from_key(key: KeyEvent) -> Self {
    let modifiers = key.modifiers;

    match key.code {
      KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
      KeyCode::Char('?') => Self::ShowHelp,
      KeyCode::Down | KeyCode::Char('j') => Self::SelectNext,
      KeyCode::Up | KeyCode::Char('k') => Self::SelectPrevious,
      KeyCode::PageDown => Self::PageDown,
      KeyCode::PageUp => Self::PageUp,
      KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
        Self::PageDown
      }
      KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
        Self::PageUp
      }
      KeyCode::Home => Self::SelectFirst,
      KeyCode::End => Self::SelectLast,
      KeyCode::Char('a' | 'i') | KeyCode::Enter => Self::StartComposing,
      KeyCode::Char('u' | '+') => Self::UpvoteSelected,
      KeyCode::Char('d') | KeyCode::Delete => Self::DeleteSelected,
      KeyCode::Char('r') => Self::Refresh,
      _ => Self::None,
    }
  }
}
