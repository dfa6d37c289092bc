/// The new-comment field. Its contents survive focus changes and are only
/// cleared by a submission.
#[derive(Default)]
pub(crate) struct CommentInput {
  buffer: String,
  focused: bool,
}

impl CommentInput {
  pub(crate) fn as_str(&self) -> &str {
    &self.buffer
  }

  pub(crate) fn blur(&mut self) {
    self.focused = false;
  }

  pub(crate) fn focus(&mut self) {
    self.focused = true;
  }

  pub(crate) fn is_focused(&self) -> bool {
    self.focused
  }

  pub(crate) fn pop(&mut self) {
    self.buffer.pop();
  }

  pub(crate) fn push(&mut self, ch: char) {
    self.buffer.push(ch);
  }

  pub(crate) fn take(&mut self) -> String {
    std::mem::take(&mut self.buffer)
  }
}
