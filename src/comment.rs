use super::*;

/// A comment as stored by the board server.
///
/// Drafts are built locally without an `id` and only enter the visible list
/// once the server echoes them back with one.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "CommentRecord")]
pub(crate) struct Comment {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub(crate) id: Option<String>,
  pub(crate) title: String,
  pub(crate) upvotes: u64,
}

/// Wire shape of a comment. Document stores send `_id`, some servers also
/// mirror it as `id`; `_id` wins when both are present.
#[derive(Deserialize)]
struct CommentRecord {
  #[serde(rename = "_id", default, deserialize_with = "deserialize_identifier")]
  document_id: Option<String>,
  #[serde(default, deserialize_with = "deserialize_identifier")]
  id: Option<String>,
  title: String,
  #[serde(default)]
  upvotes: u64,
}

impl From<CommentRecord> for Comment {
  fn from(record: CommentRecord) -> Self {
    Self {
      id: record.document_id.or(record.id),
      title: record.title,
      upvotes: record.upvotes,
    }
  }
}

/// The subset of an upvote response the client trusts.
#[derive(Debug, Deserialize)]
pub(crate) struct UpvoteResponse {
  pub(crate) upvotes: u64,
}

impl Comment {
  pub(crate) fn draft(title: impl Into<String>) -> Self {
    Self {
      id: None,
      title: title.into(),
      upvotes: 0,
    }
  }
}

fn deserialize_identifier<'de, D>(
  deserializer: D,
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<Value>::deserialize(deserializer)? {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(id)) => Ok(Some(id)),
    Some(Value::Number(id)) => Ok(Some(id.to_string())),
    Some(other) => Err(de::Error::custom(format!(
      "expected a string or numeric id, found {other}"
    ))),
  }
}
