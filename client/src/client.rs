use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::ClientError;
use crate::ProjectRecord;
use crate::ProjectSource;
use crate::parse_listing;

const USER_AGENT: &str = concat!("project-showcase/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct ProjectsClient {
    http: Client,
    endpoint: Url,
}

impl ProjectsClient {
    /// Build a client for `endpoint`, which must be an absolute http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let endpoint = parse_endpoint(endpoint)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_http_client(http, endpoint))
    }

    pub fn with_http_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The endpoint with `category` appended as a query parameter. Any query
    /// already on the endpoint is kept.
    pub fn listing_url(&self, category: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("category", category);
        url
    }

    pub async fn list_projects(&self, category: &str) -> Result<Vec<ProjectRecord>, ClientError> {
        let url = self.listing_url(category);
        tracing::debug!(%url, "requesting project listing");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = response.bytes().await?;
        let records = parse_listing(&body)?;
        tracing::debug!(category, count = records.len(), "project listing received");
        Ok(records)
    }
}

#[async_trait]
impl ProjectSource for ProjectsClient {
    async fn list_projects(&self, category: &str) -> Result<Vec<ProjectRecord>, ClientError> {
        ProjectsClient::list_projects(self, category).await
    }
}

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url, ClientError> {
    let url = Url::parse(endpoint).map_err(|source| ClientError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::UnsupportedScheme(other.to_string())),
    }
}
