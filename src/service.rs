// The service abstraction. Each paste provider implements `PasteService`
// and the dispatcher only ever talks to a `Box<dyn PasteService>` picked by
// `resolve`, so adding a provider means adding a type and its aliases here.

use tracing::debug;

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::fpaste::Fpaste;
use crate::pastebin::Pastebin;

/// A paste about to be published. Nothing here outlives the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paste<'a> {
    /// Content as read; not required to be UTF-8.
    pub text: &'a [u8],
    pub title: Option<&'a str>,
    /// File extension used to pick a highlight token, e.g. `.go`.
    pub extension: Option<&'a str>,
}

impl<'a> Paste<'a> {
    pub fn new(text: &'a (impl AsRef<[u8]> + ?Sized)) -> Self {
        Paste {
            text: text.as_ref(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn extension(mut self, extension: &'a str) -> Self {
        self.extension = Some(extension);
        self
    }
}

/// Uniform put/get contract over a paste provider.
pub trait PasteService {
    /// Short provider name, used in messages.
    fn name(&self) -> &'static str;

    /// Publish a paste and return its bare ID.
    fn put(&self, paste: &Paste<'_>) -> Result<String>;

    /// Fetch the raw content of the paste identified by `id`, exactly as
    /// the provider serves it.
    fn get(&self, id: &str) -> Result<Vec<u8>>;

    /// Turn a paste URL into a bare ID. Input without a known prefix is
    /// returned unchanged.
    fn strip_url(&self, url: &str) -> String;

    /// Turn a bare ID into the paste's public URL.
    fn wrap_id(&self, id: &str) -> String;
}

pub const PASTEBIN_ALIASES: &[&str] = &[
    "pastebin",
    "pastebin.com",
    "http://pastebin.com",
    "https://pastebin.com",
];

pub const FPASTE_ALIASES: &[&str] = &[
    "fpaste",
    "fpaste.org",
    "http://fpaste.org",
    "https://fpaste.org",
];

/// Name of the service used when none is given.
pub const DEFAULT_SERVICE: &str = "pastebin";

/// Short names of every known service.
pub fn names() -> [&'static str; 2] {
    [PASTEBIN_ALIASES[0], FPASTE_ALIASES[0]]
}

/// Pick the backend registered under `name`. Matching is exact and
/// case-sensitive.
pub fn resolve(name: &str, client: ApiClient) -> Result<Box<dyn PasteService>> {
    let service: Box<dyn PasteService> = if PASTEBIN_ALIASES.contains(&name) {
        Box::new(Pastebin::with_client(client))
    } else if FPASTE_ALIASES.contains(&name) {
        Box::new(Fpaste::with_client(client))
    } else {
        return Err(Error::UnknownService(name.to_string()));
    };
    debug!(requested = name, service = service.name(), "resolved service");
    Ok(service)
}

/// Strip any of `prefixes` from the front of `url`. Shared by the
/// backends, whose canonical prefix may come in `http` and `https` flavours.
pub(crate) fn strip_prefixes(url: &str, prefixes: &[String]) -> String {
    prefixes
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix.as_str()))
        .unwrap_or(url)
        .to_string()
}

/// The canonical `base/` prefix plus its twin with the other scheme.
pub(crate) fn url_prefixes(base_url: &str) -> Vec<String> {
    let canonical = format!("{}/", base_url.trim_end_matches('/'));
    let twin = if let Some(rest) = canonical.strip_prefix("http://") {
        Some(format!("https://{rest}"))
    } else {
        canonical
            .strip_prefix("https://")
            .map(|rest| format!("http://{rest}"))
    };
    let mut prefixes = vec![canonical];
    prefixes.extend(twin);
    prefixes
}
