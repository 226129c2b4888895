// HTTP client module: a small blocking client shared by every paste
// backend. Backends only describe *what* to send; this module owns the
// reqwest client and the status checks so each request is handled the
// same way.

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{Error, Result};

/// An `application/x-www-form-urlencoded` body. Values may be arbitrary
/// bytes: paste content is sent exactly as read, whatever its encoding.
#[derive(Debug, Default, Clone)]
pub struct FormBody {
    encoded: String,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(self, name: &str, value: &str) -> Self {
        self.bytes(name, value.as_bytes())
    }

    pub fn bytes(mut self, name: &str, value: &[u8]) -> Self {
        if !self.encoded.is_empty() {
            self.encoded.push('&');
        }
        self.encoded.push_str(&urlencoding::encode(name));
        self.encoded.push('=');
        self.encoded.push_str(&urlencoding::encode_binary(value));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

/// Thin wrapper around a reqwest blocking client. Cloning is cheap, the
/// underlying connection pool is shared.
#[derive(Clone, Debug, Default)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Build a client with reqwest's default settings (including its
    /// default timeout).
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(ApiClient { client })
    }

    /// POST `form` and return the response body as text. Any status other
    /// than 200 is turned into the error built by `on_status`.
    pub fn post_form<F>(&self, url: &str, form: FormBody, on_status: F) -> Result<String>
    where
        F: FnOnce(StatusCode) -> Error,
    {
        debug!(url, "POST");
        let res = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form.encoded)
            .send()?;
        Ok(check(url, res, on_status)?.text()?)
    }

    /// GET `url` and return the response body byte for byte, mapping
    /// non-200 statuses through `on_status`.
    pub fn get_bytes<F>(&self, url: &str, on_status: F) -> Result<Vec<u8>>
    where
        F: FnOnce(StatusCode) -> Error,
    {
        debug!(url, "GET");
        let res = self.client.get(url).send()?;
        Ok(check(url, res, on_status)?.bytes()?.to_vec())
    }
}

/// Pass `res` through if it is a 200. The caller reads the body with a
/// consuming method, so it is released whatever the read outcome.
fn check<F>(url: &str, res: Response, on_status: F) -> Result<Response>
where
    F: FnOnce(StatusCode) -> Error,
{
    let status = res.status();
    if status != StatusCode::OK {
        debug!(url, %status, "unexpected status");
        return Err(on_status(status));
    }
    Ok(res)
}
