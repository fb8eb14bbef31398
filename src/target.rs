use url::Url;

/// A base URL being scanned, with its trailing slash removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: String,
    host: String,
    netloc: String,
}

impl Target {
    pub fn new(raw: &str) -> Self {
        let url = raw.trim().trim_end_matches('/').to_string();
        let (host, netloc) = match Url::parse(&url) {
            Ok(parsed) if has_scheme(&url) => {
                let host = parsed.host_str().unwrap_or_default().to_string();
                let netloc = match parsed.port() {
                    Some(port) => format!("{}:{}", host, port),
                    None => host.clone(),
                };
                (host, netloc)
            }
            // Scheme-less input: the whole string stands in for the host
            _ => {
                let host = url.split(['/', ':']).next().unwrap_or_default().to_string();
                (host, url.clone())
            }
        };
        Self { url, host, netloc }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Hostname without port.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn netloc(&self) -> &str {
        &self.netloc
    }

    /// Engine target template, e.g. `https://example.com/FUZZ`.
    pub fn fuzz_url(&self) -> String {
        format!("{}/FUZZ", self.url)
    }

    pub fn robots_url(&self) -> String {
        format!("{}/robots.txt", self.url)
    }

    /// Netloc made safe for a file name.
    pub fn file_stem(&self) -> String {
        self.netloc.replace([':', '/'], "_")
    }
}

pub fn has_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
