use reclaim_config::constants::RESERVED_APPLICATIONS;
use reclaim_config::parse_whitelist;

#[derive(Debug, Clone)]
pub struct Whitelist {
    names: Vec<String>,
}

impl Whitelist {
    pub fn new<I, S>(additions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = RESERVED_APPLICATIONS
            .iter()
            .map(|name| name.to_string())
            .collect();
        names.extend(
            additions
                .into_iter()
                .map(Into::into)
                .filter(|name| !name.is_empty()),
        );
        Self { names }
    }

    pub fn from_flag(value: &str) -> Self {
        Self::new(parse_whitelist(value))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|entry| entry == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for Whitelist {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

pub fn is_whitelisted(name: &str, whitelist: &Whitelist) -> bool {
    whitelist.contains(name)
}
