// Fpaste backend. Fpaste runs the Sticky Notes API: pastes are submitted
// as a form with `mode=json` and the answer is a small JSON document.

use serde::Deserialize;
use tracing::{debug, info};

use crate::api::{ApiClient, FormBody};
use crate::error::{Error, Result};
use crate::highlight;
use crate::service::{strip_prefixes, url_prefixes, Paste, PasteService};

const NAME: &str = "fpaste";

pub const DEFAULT_BASE_URL: &str = "http://fpaste.org";

/// Settings for the Fpaste backend. Pastes are private (reachable only
/// through their hash) and expire after an hour unless overridden.
#[derive(Debug, Clone)]
pub struct FpasteConfig {
    pub base_url: String,
    pub private: bool,
    /// Lifetime in seconds.
    pub expire_secs: u64,
}

impl Default for FpasteConfig {
    fn default() -> Self {
        FpasteConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            private: true,
            expire_secs: 3600,
        }
    }
}

#[derive(Deserialize, Debug)]
struct PutResponse {
    result: PutResult,
}

#[derive(Deserialize, Debug)]
struct PutResult {
    id: Option<String>,
    hash: Option<String>,
    error: Option<String>,
}

impl PutResult {
    /// `id/hash` for private pastes, plain `id` otherwise.
    fn into_id(self) -> Result<String> {
        if let Some(message) = self.error {
            return Err(Error::Rejected {
                service: NAME,
                message,
            });
        }
        let id = self.id.filter(|id| !id.is_empty()).ok_or_else(|| Error::Rejected {
            service: NAME,
            message: "response carried no paste id".to_string(),
        })?;
        Ok(match self.hash.filter(|hash| !hash.is_empty()) {
            Some(hash) => format!("{id}/{hash}"),
            None => id,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Fpaste {
    config: FpasteConfig,
    client: ApiClient,
    prefixes: Vec<String>,
}

impl Fpaste {
    pub fn new(config: FpasteConfig, client: ApiClient) -> Self {
        let prefixes = url_prefixes(&config.base_url);
        Fpaste {
            config,
            client,
            prefixes,
        }
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self::new(FpasteConfig::default(), client)
    }

    fn put_form(&self, paste: &Paste<'_>, lang: &str) -> FormBody {
        let form = FormBody::new()
            .bytes("paste_data", paste.text)
            .text("paste_lang", lang)
            .text("api_submit", "true")
            .text("mode", "json")
            .text("paste_private", if self.config.private { "yes" } else { "no" })
            .text("paste_expire", &self.config.expire_secs.to_string());
        match paste.title.filter(|t| !t.is_empty()) {
            Some(title) => form.text("paste_user", title),
            None => form,
        }
    }
}

impl Default for Fpaste {
    fn default() -> Self {
        Self::with_client(ApiClient::default())
    }
}

impl PasteService for Fpaste {
    fn name(&self) -> &'static str {
        NAME
    }

    fn put(&self, paste: &Paste<'_>) -> Result<String> {
        let lang = highlight::language_for(paste.extension.unwrap_or_default());
        debug!(lang, bytes = paste.text.len(), "publishing to fpaste");

        let form = self.put_form(paste, lang);
        let body = self.client.post_form(&self.prefixes[0], form, |status| {
            Error::PutFailed {
                service: NAME,
                status,
            }
        })?;
        let response: PutResponse = serde_json::from_str(&body).map_err(|source| {
            Error::Decode {
                service: NAME,
                source,
            }
        })?;

        let id = self.strip_url(response.result.into_id()?.trim());
        info!(%id, "paste published");
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}/raw/", self.prefixes[0], id.trim_end_matches('/'));
        self.client.get_bytes(&url, |status| Error::GetFailed {
            service: NAME,
            status,
        })
    }

    /// Also accepts the raw-content URL a browser shows, `.../<id>/raw/`.
    fn strip_url(&self, url: &str) -> String {
        let id = strip_prefixes(url, &self.prefixes);
        if id.len() == url.len() {
            return id;
        }
        let trimmed = id.trim_end_matches('/');
        trimmed
            .strip_suffix("/raw")
            .unwrap_or(trimmed)
            .to_string()
    }

    fn wrap_id(&self, id: &str) -> String {
        format!("{}{}", self.prefixes[0], id)
    }
}
