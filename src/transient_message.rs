use super::*;

/// A status-bar message that reverts to `original` once it expires.
#[derive(Clone)]
pub(crate) struct TransientMessage {
  current: String,
  expires_at: Instant,
  original: String,
}

impl TransientMessage {
  pub(crate) fn current(&self) -> &str {
    &self.current
  }

  pub(crate) fn is_expired(&self) -> bool {
    self.is_expired_at(Instant::now())
  }

  fn is_expired_at(&self, now: Instant) -> bool {
    now >= self.expires_at
  }

  pub(crate) fn new(current: String, original: String) -> Self {
    Self {
      expires_at: Instant::now() + TRANSIENT_MESSAGE_LIFETIME,
      current,
      original,
    }
  }

  pub(crate) fn original(&self) -> &str {
    &self.original
  }
}
