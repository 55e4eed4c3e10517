use async_trait::async_trait;
use postboard_api_types::{CreatePostRequest, Post, PostId, UpdatePostRequest};
use reqwest::{Client, Method, RequestBuilder, Response, Url, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::backend::{BackendError, PostsBackend};
use crate::infra::error::InfraError;

const POSTS_PATH: &str = "posts/";

/// `PostsBackend` over reqwest, rooted at the API base (e.g. `http://host/api/`).
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base: &Url) -> Result<Self, InfraError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("postboard/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, BackendError> {
        self.base.join(path).map_err(BackendError::network)
    }

    fn post_url(&self, id: PostId) -> Result<Url, BackendError> {
        self.url(&format!("{POSTS_PATH}{id}/"))
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, BackendError> {
        let resp = req.send().await.map_err(BackendError::network)?;
        let status = resp.status();
        debug!(status = status.as_u16(), url = %resp.url(), "Backend responded");
        if !status.is_success() {
            let text = resp.text().await.map_err(BackendError::network)?;
            return Err(BackendError::api(status.as_u16(), text));
        }
        Ok(resp)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<T, BackendError> {
        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(&b);
        }
        let resp = self.send(req).await?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, BackendError> {
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let bytes = resp.bytes().await.map_err(BackendError::network)?;
        if !is_json {
            let text = String::from_utf8_lossy(&bytes);
            return Err(BackendError::decode(format!(
                "expected a JSON response, got text: {text}"
            )));
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| BackendError::decode(format!("failed to parse body: {e}")))
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, BackendError> {
    serde_json::to_value(value).map_err(BackendError::decode)
}

#[async_trait]
impl PostsBackend for HttpBackend {
    async fn list_posts(&self) -> Result<Vec<Post>, BackendError> {
        let url = self.url(POSTS_PATH)?;
        self.request(Method::GET, url, None).await
    }

    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, BackendError> {
        let url = self.url(POSTS_PATH)?;
        self.request(Method::POST, url, Some(to_value(&request)?))
            .await
    }

    async fn update_post(
        &self,
        id: PostId,
        request: UpdatePostRequest,
    ) -> Result<Post, BackendError> {
        let url = self.post_url(id)?;
        self.request(Method::PUT, url, Some(to_value(&request)?))
            .await
    }

    async fn delete_post(&self, id: PostId) -> Result<(), BackendError> {
        let url = self.post_url(id)?;
        self.send(self.client.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
