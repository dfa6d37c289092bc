use {
  super::*,
  crate::comment::UpvoteResponse,
  reqwest::{RequestBuilder, Response},
};

/// HTTP transport for the comment board REST API.
#[derive(Clone, Debug)]
pub(crate) struct Client {
  base_url: Url,
  client: reqwest::Client,
}

impl Client {
  const COMMENTS_PATH: &str = "comments";

  const UPVOTE_PATH: &str = "upvote";

  pub(crate) fn base_url(&self) -> &Url {
    &self.base_url
  }

  fn comments_url(&self, segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();

    if let Ok(mut path) = url.path_segments_mut() {
      path
        .pop_if_empty()
        .push(Self::COMMENTS_PATH)
        .extend(segments);
    }

    url
  }

  /// POST /comments
  pub(crate) async fn create(
    &self,
    draft: &Comment,
  ) -> Result<Comment, ClientError> {
    Ok(
      self
        .send(self.client.post(self.comments_url(&[])).json(draft))
        .await?
        .json::<Comment>()
        .await?,
    )
  }

  /// DELETE /comments/{id}; the response body is ignored.
  pub(crate) async fn delete(&self, id: &str) -> Result<(), ClientError> {
    self
      .send(self.client.delete(self.comments_url(&[id])))
      .await?;

    Ok(())
  }

  /// GET /comments
  pub(crate) async fn list(&self) -> Result<Vec<Comment>, ClientError> {
    Ok(
      self
        .send(self.client.get(self.comments_url(&[])))
        .await?
        .json::<Vec<Comment>>()
        .await?,
    )
  }

  pub(crate) fn new(base_url: Url) -> Result<Self, ClientError> {
    if base_url.cannot_be_a_base() {
      return Err(ClientError::InvalidBaseUrl { url: base_url });
    }

    Ok(Self {
      base_url,
      client: reqwest::Client::new(),
    })
  }

  async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
    let request = request.build()?;

    let (method, url) = (request.method().clone(), request.url().clone());

    debug!(%method, %url, "sending request");

    let response = self.client.execute(request).await?;

    let status = response.status();

    if !status.is_success() {
      return Err(ClientError::Status {
        method,
        status,
        url,
      });
    }

    Ok(response)
  }

  /// PUT /comments/{id}/upvote, returning the server's counter.
  pub(crate) async fn upvote(&self, id: &str) -> Result<u64, ClientError> {
    Ok(
      self
        .send(
          self
            .client
            .put(self.comments_url(&[id, Self::UPVOTE_PATH])),
        )
        .await?
        .json::<UpvoteResponse>()
        .await?
        .upvotes,
    )
  }
}
