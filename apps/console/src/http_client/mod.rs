/// HTTP client: the single point of entry for all backend REST calls.
///
/// Every request goes to `<base_url><path>`. Non-2xx responses become
/// `ApiError::Status` carrying the status code and response body text.
/// No retries and no timeouts: a failed call is terminal for that action.
use reqwest::{multipart::Form, Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a server-relative path (e.g. `/resumes/3_cv.pdf` or
    /// `resumes/3_cv.pdf`) against the base URL.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        decode(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        decode(response).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        decode(response).await
    }

    /// Returns `true` once the backend has acknowledged the delete with a 2xx.
    /// The response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<bool, ApiError> {
        self.send(Method::DELETE, path, None::<&()>).await?;
        Ok(true)
    }

    /// Posts a multipart form and decodes the JSON response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let url = self.resolve(path);
        debug!("POST {url} (multipart)");
        let response = self.client.post(&url).multipart(form).send().await?;
        let response = ensure_success("POST", path, response).await?;
        decode(response).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.resolve(path);
        debug!("{method} {url}");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        ensure_success(method_name(&method), path, response).await
    }
}

fn method_name(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        _ => "REQUEST",
    }
}

async fn ensure_success(
    method: &'static str,
    path: &str,
    response: Response,
) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("{method} {path} returned {status}: {body}");
    Err(ApiError::Status {
        method,
        path: path.to_string(),
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(ApiError::Decode)
}
