use super::client::HttpClient;
use async_trait::async_trait;

/// Plain `reqwest` client with default settings.
#[derive(Default)]
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    /// Client without timeouts or auth; the dataset is a public static file.
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
