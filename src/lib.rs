use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use attohttpc::Response;
use attohttpc::Session;
use tracing::info;
use tracing::warn;

pub mod issues;
pub mod link;
pub mod store;

pub use issues::IssueSelection;

pub const MAGPI_BASE_URL: &str = "https://magpi.raspberrypi.com";

const MAX_REDIRECTIONS: u32 = 10;

/// What happened to a single issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Saved to this path.
    Downloaded(PathBuf),

    /// A file with the same name was already somewhere under the destination.
    AlreadyDownloaded(PathBuf),

    /// The landing page had no PDF link.
    LinkNotFound,
}

pub struct Downloader {
    /// Directory tree that receives issues and is searched for earlier ones.
    dest: PathBuf,

    /// Base URL of the MagPi site, also used as the prefix of download links.
    base_url: String,

    sess: Session,
}

impl Downloader {
    pub fn builder() -> DownloaderBuilder {
        DownloaderBuilder::default()
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Downloads each issue in order, stopping at the first fatal error.
    pub fn download_issues(&self, issues: &[String]) -> anyhow::Result<Vec<Outcome>> {
        issues
            .iter()
            .map(|issue| self.download_issue(issue))
            .collect()
    }

    pub fn download_issue(&self, issue: &str) -> anyhow::Result<Outcome> {
        info!(issue, "Trying to download MagPi issue");

        let html = self.fetch_landing_page(issue)?;
        let link = link::extract_download_link(&html, &self.base_url);
        let Some((link, file_name)) = link
            .as_deref()
            .and_then(|url| Some((url, link::file_name(url)?)))
        else {
            warn!(issue, "Could not find download link to MagPi issue");
            return Ok(Outcome::LinkNotFound);
        };

        store::ensure_dir(&self.dest)?;

        if let Some(path) = store::find_downloaded(&self.dest, file_name)? {
            info!(
                issue,
                path = %path.display(),
                "MagPi issue is already downloaded"
            );
            return Ok(Outcome::AlreadyDownloaded(path));
        }

        info!(issue, link, "Downloading MagPi issue");
        let resp = self.fetch_asset(link)?;
        let (_, _, reader) = resp.split();
        let path = store::write_file(&self.dest, file_name, reader)?;
        info!(file = file_name, "Downloaded");

        Ok(Outcome::Downloaded(path))
    }

    fn fetch_landing_page(&self, issue: &str) -> anyhow::Result<String> {
        let url = format!("{}/issues/{}/pdf/download", self.base_url, issue);
        let resp = self
            .sess
            .get(&url)
            .send()
            .with_context(|| format!("Could not fetch {url}"))?;
        let body = resp.bytes().with_context(|| format!("Could not read {url}"))?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Requests the PDF. The session follows redirects, joining each
    /// `Location` onto the previous URL with its percent-escapes left as sent.
    fn fetch_asset(&self, link: &str) -> anyhow::Result<Response> {
        let resp = self
            .sess
            .get(link)
            .send()
            .with_context(|| format!("Could not fetch {link}"))?;
        if !resp.is_success() {
            bail!("Could not download {link}: HTTP {}", resp.status());
        }
        Ok(resp)
    }
}

#[derive(Debug)]
pub struct DownloaderBuilder {
    /// Falls back to `~/Documents/Magazines/MagPi` when unset.
    dest: Option<PathBuf>,
    base_url: String,
}

impl DownloaderBuilder {
    pub fn dest<P: Into<PathBuf>>(mut self, dest: P) -> Self {
        self.dest = Some(dest.into());
        self
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn build(self) -> anyhow::Result<Downloader> {
        let dest = match self.dest {
            Some(dest) => dest,
            None => store::default_download_dir()?,
        };

        let mut sess = Session::new();
        sess.follow_redirects(true);
        sess.max_redirections(MAX_REDIRECTIONS);

        Ok(Downloader {
            dest,
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            sess,
        })
    }
}

impl Default for DownloaderBuilder {
    fn default() -> Self {
        Self {
            dest: None,
            base_url: String::from(MAGPI_BASE_URL),
        }
    }
}
