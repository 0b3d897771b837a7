use crate::adapters::location::HashLocation;
use crate::config::ClientConfig;
use crate::core::{LocationProvider, Navigator, TokenStore};
use crate::domain::model::login_redirect_url;
use crate::domain::token;
use crate::utils::error::{ClientError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// The one HTTP client the application talks to its API through.
///
/// Every request carries the stored token as a bearer credential. A 401 from
/// anything but the credential endpoints themselves clears the token and sends
/// the user to the login route, remembering where they were. That redirect is a
/// best-effort side effect: if navigation fails the failure is logged and
/// dropped, and the caller still receives the original error.
pub struct ApiClient {
    http: Client,
    api_root: String,
    store: Arc<dyn TokenStore>,
    navigator: Option<Arc<dyn Navigator>>,
    location: Arc<dyn LocationProvider>,
    config: ClientConfig,
}

pub struct ApiClientBuilder {
    config: ClientConfig,
    store: Arc<dyn TokenStore>,
    navigator: Option<Arc<dyn Navigator>>,
    location: Option<Arc<dyn LocationProvider>>,
}

impl ApiClientBuilder {
    /// Route redirects through a router instead of replacing the location.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Where the current path and query are read from; defaults to an empty location.
    pub fn location(mut self, location: Arc<dyn LocationProvider>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(self.config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(ApiClient {
            http,
            api_root: self.config.api_root(),
            store: self.store,
            navigator: self.navigator,
            location: self
                .location
                .unwrap_or_else(|| Arc::new(HashLocation::new())),
            config: self.config,
        })
    }
}

impl ApiClient {
    pub fn builder(config: &ClientConfig, store: Arc<dyn TokenStore>) -> ApiClientBuilder {
        ApiClientBuilder {
            config: config.clone(),
            store,
            navigator: None,
            location: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    /// Builds the outgoing request with the bearer credential attached when a token is stored.
    pub fn prepare<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RequestBuilder {
        let mut request = self.http.request(method, self.url(path));

        match token::read_token(self.store.as_ref(), &self.config.token_key) {
            Some(token) => match bearer_header(&token) {
                Some(value) => request = request.header(AUTHORIZATION, value),
                None => tracing::warn!(
                    "Stored token is not a valid header value, sending {} anonymously",
                    path
                ),
            },
            None => tracing::trace!("No credential token, sending {} anonymously", path),
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        request
    }

    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method, self.url(path));
        let response = self.prepare(method, path, body).send().await?;
        self.unwrap_response(path, response).await
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request::<Value>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request::<Value>(Method::DELETE, path, None).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        Ok(serde_json::from_value(self.get(path).await?)?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        Ok(serde_json::from_value(self.post(path, body).await?)?)
    }

    /// Strips the transport envelope: callers see the body, or an error.
    async fn unwrap_response(&self, path: &str, response: Response) -> Result<Value> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)));
        }

        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED {
            let endpoint = path.split('?').next().unwrap_or_default();
            if !self.config.is_auth_exempt(endpoint) {
                self.handle_unauthorized();
            }
            return Err(ClientError::Unauthorized {
                path: path.to_string(),
                body,
            });
        }

        tracing::warn!("Request to {} failed with status {}", path, status);
        Err(ClientError::StatusError {
            status,
            path: path.to_string(),
            body,
        })
    }

    fn handle_unauthorized(&self) {
        tracing::info!("Credential rejected, clearing token and redirecting to login");
        token::clear_token(self.store.as_ref(), &self.config.token_key);

        let current = self.location.current();
        let target = if current.is_empty() {
            self.config.fallback_redirect.clone()
        } else {
            current.full_path()
        };
        let login = login_redirect_url(
            &self.config.login_route,
            &self.config.redirect_param,
            &target,
        );

        let outcome = match &self.navigator {
            Some(navigator) => navigator.push(&login),
            None => self.location.assign(&format!("#{}", login)),
        };

        if let Err(e) = outcome {
            tracing::debug!("Ignoring failed login redirect: {}", e);
        }
    }
}

/// `Bearer <token>`, or `None` when the token holds bytes a header cannot carry.
fn bearer_header(token: &str) -> Option<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).ok()?;
    value.set_sensitive(true);
    Some(value)
}
