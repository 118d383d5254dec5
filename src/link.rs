const DOWNLOADS_HREF: &str = "href=\"/downloads/";
const PDF: &str = ".pdf";

/// Finds the PDF download link on an issue landing page.
///
/// The page is cut into fragments at every `">`. The first fragment holding a
/// `/downloads/` anchor and a `.pdf` reference wins; inside it, the last
/// `href="` value mentioning `.pdf` is appended to `prefix`.
pub fn extract_download_link(html: &str, prefix: &str) -> Option<String> {
    let fragment = html
        .split("\">")
        .find(|p| p.contains(DOWNLOADS_HREF) && p.contains(PDF))?;
    let path = fragment
        .split("href=\"")
        .filter(|p| p.contains(PDF))
        .last()?;
    Some(format!("{prefix}{path}"))
}

/// Last path segment of a download link, or `None` if it is empty.
pub fn file_name(link: &str) -> Option<&str> {
    link.rsplit('/').next().filter(|name| !name.is_empty())
}
