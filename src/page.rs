// ABOUTME: Raw page input type and domain derivation.
// ABOUTME: Owns nothing beyond the call; the caller supplies fetched HTML and the source URL.

use url::Url;

/// Raw page content handed to the pipeline by the fetch/orchestration layer.
///
/// Immutable for the duration of one extraction call. The pipeline performs
/// no I/O of its own; it assumes `html` was already fetched from `url`.
#[derive(Debug, Clone, Copy)]
pub struct RawPage<'a> {
    pub url: &'a str,
    pub html: &'a str,
}

impl<'a> RawPage<'a> {
    pub fn new(url: &'a str, html: &'a str) -> Self {
        Self { url, html }
    }

    /// Lowercased host with any leading `www.` stripped, used for
    /// site-profile lookup. An unparseable URL yields an empty string,
    /// which routes the page to the global profile.
    pub fn domain(&self) -> String {
        domain_of(self.url)
    }
}

/// Derives the profile-lookup domain from a URL.
pub fn domain_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("").to_lowercase();
            host.strip_prefix("www.").unwrap_or(&host).to_string()
        }
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_domain_strips_www_and_lowercases() {
        assert_eq!(domain_of("https://WWW.UNSW.edu.au/study/x"), "unsw.edu.au");
    }

    #[test]
    fn test_domain_keeps_subdomains() {
        assert_eq!(
            domain_of("https://study.uq.edu.au/programs/123"),
            "study.uq.edu.au"
        );
    }

    #[test]
    fn test_domain_of_invalid_url_is_empty() {
        assert_eq!(domain_of("not a url"), "");
        assert_eq!(domain_of(""), "");
    }

    #[test]
    fn test_raw_page_domain() {
        let page = RawPage::new("https://www.anu.edu.au/program/bsc", "<html></html>");
        assert_eq!(page.domain(), "anu.edu.au");
    }
}
