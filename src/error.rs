use {super::*, thiserror::Error};

#[derive(Debug, Error)]
pub(crate) enum ClientError {
  #[error("base URL `{url}` cannot address comment paths")]
  InvalidBaseUrl { url: Url },
  #[error(transparent)]
  Request(#[from] reqwest::Error),
  #[error("{method} {url} returned {status}")]
  Status {
    method: Method,
    status: StatusCode,
    url: Url,
  },
}
