use std::collections::HashSet;
use std::str::FromStr;

/// Mint addresses whose metadata must never be served.
///
/// Parsed from a comma-separated list such as the `BAD_TOKENS` environment variable.
/// Entries are trimmed and empty entries are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactedTokens(HashSet<String>);

impl RedactedTokens {
    /// Environment variable the server reads the list from.
    pub const ENV_VAR: &'static str = "BAD_TOKENS";

    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(addresses.into_iter().map(Into::into).collect())
    }

    /// Parses a comma-separated list.
    pub fn parse(value: &str) -> Self {
        Self(
            value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    pub fn contains(&self, address: &str) -> bool {
        self.0.contains(address)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for RedactedTokens {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_entries() {
        let tokens = RedactedTokens::parse(" MintA , MintB,,  ,MintC ");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.contains("MintA"));
        assert!(tokens.contains("MintB"));
        assert!(tokens.contains("MintC"));
        assert!(!tokens.contains(" MintA "));
    }

    #[test]
    fn test_empty_list() {
        assert!(RedactedTokens::parse("").is_empty());
        assert!(RedactedTokens::parse(" , ").is_empty());
        assert!(!RedactedTokens::default().contains(""));
    }
}
