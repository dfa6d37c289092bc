use super::*;

/// Completion of an [`Effect`], delivered back to the event loop.
pub(crate) enum Event {
  CommentCreated {
    result: Result<Comment, ClientError>,
  },
  CommentDeleted {
    id: String,
    result: Result<(), ClientError>,
  },
  CommentUpvoted {
    id: String,
    result: Result<u64, ClientError>,
  },
  CommentsListed {
    request_id: u64,
    result: Result<Vec<Comment>, ClientError>,
  },
}
