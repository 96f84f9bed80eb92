//! Where timetable pages come from.

use log::debug;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Mosque;
use crate::error::FetchError;

pub trait HtmlSource {
    fn fetch(&self, mosque: &Mosque) -> Result<String, FetchError>;
}

impl<S: HtmlSource + ?Sized> HtmlSource for Box<S> {
    fn fetch(&self, mosque: &Mosque) -> Result<String, FetchError> {
        (**self).fetch(mosque)
    }
}

/// GET `{base_url}/{mosque.path}/index.html`.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("waqt/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, mosque: &Mosque) -> String {
        format!("{}/{}/index.html", self.base_url, mosque.path.trim_matches('/'))
    }
}

impl HtmlSource for HttpSource {
    fn fetch(&self, mosque: &Mosque) -> Result<String, FetchError> {
        let url = self.url_for(mosque);
        debug!("fetching {}", url);
        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(resp.text()?)
    }
}

/// A saved copy of a page on disk; the mosque only labels the result.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HtmlSource for FileSource {
    fn fetch(&self, _mosque: &Mosque) -> Result<String, FetchError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}
