use super::*;

pub(crate) struct HelpView {
  message_backup: Option<String>,
  visible: bool,
}

impl HelpView {
  pub(crate) fn draw(&self, frame: &mut Frame) {
    if !self.visible {
      return;
    }

    let area = Self::help_area(frame.area());

    frame.render_widget(Clear, area);

    let help = Paragraph::new(HELP_TEXT)
      .block(Block::default().title(HELP_TITLE).borders(Borders::ALL))
      .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('?') | KeyCode::Esc => Command::HideHelp,
      KeyCode::Char('q' | 'Q') => Command::Quit,
      _ => Command::None,
    }
  }

  /// Centers a box sized to the help text, keeping a one-cell margin when the
  /// terminal allows it.
  fn help_area(area: Rect) -> Rect {
    let text_width = HELP_TEXT.lines().map(|line| line.chars().count()).max();
    let text_height = HELP_TEXT.lines().count();

    let clamp = |wanted: usize, available: u16| {
      u16::try_from(wanted)
        .unwrap_or(u16::MAX)
        .min(available.saturating_sub(2))
        .max(1)
        .min(available)
    };

    let width = clamp(text_width.unwrap_or_default() + 4, area.width);
    let height = clamp(text_height + 2, area.height);

    let [row] = Layout::vertical([Constraint::Length(height)])
      .flex(Flex::Center)
      .areas(area);

    let [help] = Layout::horizontal([Constraint::Length(width)])
      .flex(Flex::Center)
      .areas(row);

    help
  }

  pub(crate) fn hide(&mut self, message: &mut String) {
    if !self.visible {
      return;
    }

    *message = self
      .message_backup
      .take()
      .unwrap_or_else(|| BROWSE_STATUS.into());

    self.visible = false;
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  pub(crate) fn new() -> Self {
    Self {
      message_backup: None,
      visible: false,
    }
  }

  pub(crate) fn show(&mut self, message: &mut String) {
    if self.visible {
      return;
    }

    self.message_backup = Some(message.clone());

    *message = HELP_STATUS.into();

    self.visible = true;
  }
}
