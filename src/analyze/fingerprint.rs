use crate::config::BatchConfig;

/// One annotated probe line: `URL [title] [technologies]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeLine {
    pub url: String,
    /// Lowercased technology text with brackets removed
    pub technologies: String,
}

impl ProbeLine {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let parts: Vec<&str> = line.split('[').collect();
        let url = parts[0].trim().to_string();
        if url.is_empty() {
            return None;
        }
        // With a title and tech group, the first bracket is the title
        let technologies = match parts.len() {
            0 | 1 => String::new(),
            2 => parts[1].to_string(),
            _ => parts[2..].join("["),
        };
        let technologies = technologies.replace(']', "").trim().to_lowercase();
        Some(Self { url, technologies })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechClass {
    /// Blocklisted stack (CDN/WAF/VPN); recorded but not scanned
    Excluded,
    Priority,
    Other,
}

/// Technology allow/block lists, matched as case-insensitive substrings.
#[derive(Debug, Clone)]
pub struct TechPolicy {
    exclude: Vec<String>,
    priority: Vec<String>,
}

impl TechPolicy {
    pub fn new(exclude: &[String], priority: &[String]) -> Self {
        let lower = |v: &[String]| v.iter().map(|s| s.to_lowercase()).collect();
        Self { exclude: lower(exclude), priority: lower(priority) }
    }

    pub fn from_config(cfg: &BatchConfig) -> Self {
        Self::new(&cfg.exclude_technologies, &cfg.priority_technologies)
    }

    pub fn classify(&self, technologies: &str) -> TechClass {
        let tech = technologies.to_lowercase();
        if self.exclude.iter().any(|t| tech.contains(t.as_str())) {
            TechClass::Excluded
        } else if self.priority.iter().any(|t| tech.contains(t.as_str())) {
            TechClass::Priority
        } else {
            TechClass::Other
        }
    }
}

/// Probe results split by technology class, each in probe output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub excluded: Vec<String>,
    pub priority: Vec<String>,
    pub other: Vec<String>,
}

impl Partition {
    /// Scan order: priority targets first, then the rest.
    pub fn scan_order(&self) -> Vec<String> {
        self.priority.iter().chain(self.other.iter()).cloned().collect()
    }
}

pub fn partition<I, S>(lines: I, policy: &TechPolicy) -> Partition
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Partition::default();
    for line in lines {
        let Some(probe) = ProbeLine::parse(line.as_ref()) else {
            continue;
        };
        match policy.classify(&probe.technologies) {
            TechClass::Excluded => out.excluded.push(probe.url),
            TechClass::Priority => out.priority.push(probe.url),
            TechClass::Other => out.other.push(probe.url),
        }
    }
    out
}
