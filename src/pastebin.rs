// Pastebin backend. Publishes through the form-encoded `api_post.php`
// endpoint and fetches through `raw.php`.

use tracing::{debug, info};

use crate::api::{ApiClient, FormBody};
use crate::error::{Error, Result};
use crate::highlight;
use crate::service::{strip_prefixes, url_prefixes, Paste, PasteService};

const NAME: &str = "pastebin";

/// Developer key shipped with the tool.
pub const DEFAULT_DEV_KEY: &str = "7b9c033d5a4e4b417fd2a22e6d598b01";
pub const DEFAULT_BASE_URL: &str = "http://pastebin.com";

/// Pastebin answers a refused request with status 200 and a body starting
/// with this marker.
const BAD_REQUEST_MARKER: &str = "Bad API request";

/// Who can see a paste (`api_paste_private`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
}

impl Visibility {
    pub fn code(self) -> &'static str {
        match self {
            Visibility::Public => "0",
            Visibility::Unlisted => "1",
            Visibility::Private => "2",
        }
    }
}

/// How long a paste lives (`api_paste_expire_date`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    Never,
    TenMinutes,
    OneHour,
    OneDay,
    OneWeek,
    TwoWeeks,
    OneMonth,
}

impl Expiration {
    pub fn code(self) -> &'static str {
        match self {
            Expiration::Never => "N",
            Expiration::TenMinutes => "10M",
            Expiration::OneHour => "1H",
            Expiration::OneDay => "1D",
            Expiration::OneWeek => "1W",
            Expiration::TwoWeeks => "2W",
            Expiration::OneMonth => "1M",
        }
    }
}

/// Settings for the Pastebin backend. The defaults publish unlisted
/// pastes that expire after one hour.
#[derive(Debug, Clone)]
pub struct PastebinConfig {
    pub base_url: String,
    pub dev_key: String,
    pub visibility: Visibility,
    pub expiration: Expiration,
}

impl Default for PastebinConfig {
    fn default() -> Self {
        PastebinConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            dev_key: DEFAULT_DEV_KEY.to_string(),
            visibility: Visibility::Unlisted,
            expiration: Expiration::OneHour,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pastebin {
    config: PastebinConfig,
    client: ApiClient,
    prefixes: Vec<String>,
}

impl Pastebin {
    pub fn new(config: PastebinConfig, client: ApiClient) -> Self {
        let prefixes = url_prefixes(&config.base_url);
        Pastebin {
            config,
            client,
            prefixes,
        }
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self::new(PastebinConfig::default(), client)
    }

    /// Form body for `api_post.php`.
    fn put_form(&self, paste: &Paste<'_>, format: &str) -> FormBody {
        FormBody::new()
            .text("api_dev_key", &self.config.dev_key)
            .text("api_option", "paste")
            .bytes("api_paste_code", paste.text)
            .text("api_paste_name", paste.title.unwrap_or_default())
            .text("api_paste_private", self.config.visibility.code())
            .text("api_paste_expire_date", self.config.expiration.code())
            .text("api_paste_format", format)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

impl Default for Pastebin {
    fn default() -> Self {
        Self::with_client(ApiClient::default())
    }
}

impl PasteService for Pastebin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn put(&self, paste: &Paste<'_>) -> Result<String> {
        let format = highlight::language_for(paste.extension.unwrap_or_default());
        debug!(format, bytes = paste.text.len(), "publishing to pastebin");

        let form = self.put_form(paste, format);
        let body = self
            .client
            .post_form(&self.endpoint("api/api_post.php"), form, |status| {
                Error::PutFailed {
                    service: NAME,
                    status,
                }
            })?;
        let body = body.trim();
        if body.starts_with(BAD_REQUEST_MARKER) {
            return Err(Error::Rejected {
                service: NAME,
                message: body.to_string(),
            });
        }

        let id = self.strip_url(body);
        info!(%id, "paste published");
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(&format!("raw.php?i={id}"));
        self.client.get_bytes(&url, |status| Error::GetFailed {
            service: NAME,
            status,
        })
    }

    fn strip_url(&self, url: &str) -> String {
        strip_prefixes(url, &self.prefixes)
    }

    fn wrap_id(&self, id: &str) -> String {
        format!("{}{}", self.prefixes[0], id)
    }
}
