use reqwest::header;
use tracing::debug;

use crate::error::FetchError;
use crate::models::{Question, QuestionsResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.stackexchange.com/2.2";

// The Stack Exchange API throttles anonymous clients without a UA.
const USER_AGENT: &str = "soq/0.1";

/// Blocking client for the Stack Exchange API. Cheap to clone; the underlying
/// connection pool is shared between clones.
#[derive(Clone)]
pub struct StackExchangeClient {
    http: reqwest::blocking::Client,
    base_url: String,
    site: String,
}

impl StackExchangeClient {
    pub fn new(site: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, site)
    }

    pub fn with_base_url(base_url: &str, site: &str) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            site: site.to_string(),
        }
    }

    /// Fetches the user's questions, newest first (the API's default order
    /// for `sort=creation&order=desc`). An empty `user_id` is sent as-is and
    /// comes back as [`FetchError::NoQuestions`].
    pub fn fetch_user_questions(&self, user_id: &str) -> Result<Vec<Question>, FetchError> {
        let url = format!(
            "{}/users/{}/questions?order=desc&sort=creation&site={}",
            self.base_url, user_id, self.site
        );
        debug!(%url, "fetching questions");

        let resp = self
            .http
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()?;
        let envelope: QuestionsResponse = resp.json()?;

        if let Some(error_id) = envelope.error_id {
            return Err(FetchError::Api {
                error_id,
                message: envelope.error_message.unwrap_or_default(),
            });
        }
        if envelope.items.is_empty() {
            return Err(FetchError::NoQuestions);
        }
        Ok(envelope.items)
    }

    /// Fetches an arbitrary page for the embedded viewer and returns its raw
    /// HTML. No contract with the page beyond "render this URL".
    pub fn fetch_page(&self, link: &str) -> Result<String, FetchError> {
        debug!(%link, "fetching page for viewer");
        let resp = self
            .http
            .get(link)
            .header(header::USER_AGENT, USER_AGENT)
            .send()?;
        Ok(resp.text()?)
    }
}
