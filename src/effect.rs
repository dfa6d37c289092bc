use super::*;

/// A request the board state asks the event loop to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  CreateComment { draft: Comment },
  DeleteComment { id: String },
  ListComments { request_id: u64 },
  UpvoteComment { id: String },
}
