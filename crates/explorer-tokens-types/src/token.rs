//! Token metadata records.
//!
//! [`TokenInfo`] is what the token metadata service returns. [`LegacyTokenInfo`] is an
//! entry of the (frozen) legacy token list, which still carries the social links and
//! tags that the newer service dropped. [`FullTokenInfo`] is the merge of both.

use serde::{Deserialize, Deserializer, Serialize};

use crate::chain::ChainId;

/// Token metadata as returned by the token metadata service.
///
/// Records are taken as the service sends them. A field that is absent or `null`
/// falls back to its default, so one sparse record never spoils a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    /// Base58 mint address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub decimals: u8,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holders: Option<u64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Links and identifiers published in the legacy token list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExtensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_contract: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_contract: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tgann: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tggroup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serum_v3_usdt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serum_v3_usdc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coingecko_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Entry of the legacy token list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTokenInfo {
    pub chain_id: u16,
    pub address: String,
    pub name: String,
    pub decimals: u8,
    pub symbol: String,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<TokenExtensions>,
}

impl LegacyTokenInfo {
    /// Whether this entry describes `address` on `chain_id`.
    pub fn matches(&self, address: &str, chain_id: ChainId) -> bool {
        self.address == address && self.chain_id == chain_id.as_u16()
    }
}

/// Shape of the legacy token list document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyTokenList {
    #[serde(default)]
    pub tokens: Vec<LegacyTokenInfo>,
}

impl LegacyTokenList {
    pub fn find(&self, address: &str, chain_id: ChainId) -> Option<&LegacyTokenInfo> {
        self.tokens.iter().find(|t| t.matches(address, chain_id))
    }
}

/// Token metadata enriched with the legacy tags and extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullTokenInfo {
    pub chain_id: u16,
    pub address: String,
    pub name: String,
    pub decimals: u8,
    pub symbol: String,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<TokenExtensions>,
    pub verified: bool,
}

impl FullTokenInfo {
    /// Merges the metadata service record with the legacy list entry.
    ///
    /// The service record wins for everything it carries. `tags` come from the
    /// service whenever it sends the field at all (an empty list included), otherwise
    /// from the legacy entry. `extensions` only ever come from the legacy entry. A
    /// legacy entry on its own is reported as verified.
    pub fn merge(
        primary: Option<TokenInfo>,
        legacy: Option<LegacyTokenInfo>,
        chain_id: ChainId,
    ) -> Option<Self> {
        let Some(primary) = primary else {
            return legacy.map(Self::from_legacy);
        };
        let (legacy_tags, extensions) = match legacy {
            Some(legacy) => (legacy.tags, legacy.extensions),
            None => (None, None),
        };
        let tags = primary.tags.or(legacy_tags).unwrap_or_default();
        Some(FullTokenInfo {
            chain_id: chain_id.as_u16(),
            address: primary.address,
            name: primary.name,
            decimals: primary.decimals,
            symbol: primary.symbol,
            logo_uri: primary.logo_uri,
            tags,
            extensions,
            verified: primary.verified,
        })
    }

    fn from_legacy(legacy: LegacyTokenInfo) -> Self {
        FullTokenInfo {
            chain_id: legacy.chain_id,
            address: legacy.address,
            name: legacy.name,
            decimals: legacy.decimals,
            symbol: legacy.symbol,
            logo_uri: legacy.logo_uri,
            tags: legacy.tags.unwrap_or_default(),
            extensions: legacy.extensions,
            verified: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSOL: &str = "So11111111111111111111111111111111111111112";

    fn primary() -> TokenInfo {
        TokenInfo {
            address: WSOL.to_string(),
            name: "Wrapped SOL".to_string(),
            symbol: "SOL".to_string(),
            decimals: 9,
            logo_uri: None,
            verified: true,
            chain_id: Some(101),
            tags: None,
            holders: None,
        }
    }

    fn legacy() -> LegacyTokenInfo {
        LegacyTokenInfo {
            chain_id: 101,
            address: WSOL.to_string(),
            name: "Old Wrapped SOL".to_string(),
            decimals: 9,
            symbol: "wSOL".to_string(),
            logo_uri: Some("https://example.com/sol.png".to_string()),
            tags: Some(vec!["wrapped".to_string()]),
            extensions: Some(TokenExtensions {
                coingecko_id: Some("solana".to_string()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_token_info_decodes_sparse_records() {
        let json = r#"{"address":"So11111111111111111111111111111111111111112","logoURI":null}"#;
        let token: TokenInfo = serde_json::from_str(json).unwrap();
        assert_eq!(token.address, WSOL);
        assert_eq!(token.decimals, 0);
        assert!(!token.verified);
        assert!(token.tags.is_none());
    }

    #[test]
    fn test_token_info_decodes_null_fields() {
        let json = r#"{"address":null,"name":null,"symbol":null,"decimals":null,"verified":null,"tags":null}"#;
        let token: TokenInfo = serde_json::from_str(json).unwrap();
        assert_eq!(token.address, "");
        assert_eq!(token.name, "");
        assert_eq!(token.decimals, 0);
        assert!(!token.verified);
        assert!(token.tags.is_none());

        let token: TokenInfo = serde_json::from_str(r#"{"name":"No Address"}"#).unwrap();
        assert_eq!(token.address, "");
        assert_eq!(token.name, "No Address");
    }

    #[test]
    fn test_merge_neither() {
        assert_eq!(FullTokenInfo::merge(None, None, ChainId::Mainnet), None);
    }

    #[test]
    fn test_merge_legacy_only_is_verified() {
        let merged = FullTokenInfo::merge(None, Some(legacy()), ChainId::Mainnet).unwrap();
        assert!(merged.verified);
        assert_eq!(merged.symbol, "wSOL");
        assert_eq!(merged.tags, vec!["wrapped".to_string()]);
        assert!(merged.extensions.is_some());
    }

    #[test]
    fn test_merge_primary_wins() {
        let mut token = primary();
        token.verified = false;
        let merged = FullTokenInfo::merge(Some(token), Some(legacy()), ChainId::Mainnet).unwrap();
        assert_eq!(merged.name, "Wrapped SOL");
        assert_eq!(merged.symbol, "SOL");
        assert_eq!(merged.logo_uri, None);
        assert!(!merged.verified);
        assert_eq!(merged.chain_id, 101);
        assert_eq!(merged.tags, vec!["wrapped".to_string()]);
        assert_eq!(
            merged.extensions.unwrap().coingecko_id.as_deref(),
            Some("solana")
        );
    }

    #[test]
    fn test_merge_primary_empty_tags_drop_legacy_tags() {
        let mut token = primary();
        token.tags = Some(vec![]);
        let merged = FullTokenInfo::merge(Some(token), Some(legacy()), ChainId::Mainnet).unwrap();
        assert!(merged.tags.is_empty());
    }

    #[test]
    fn test_merge_primary_only() {
        let merged = FullTokenInfo::merge(Some(primary()), None, ChainId::Mainnet).unwrap();
        assert!(merged.tags.is_empty());
        assert!(merged.extensions.is_none());
    }

    #[test]
    fn test_legacy_list_find() {
        let mut devnet = legacy();
        devnet.chain_id = 103;
        let list = LegacyTokenList {
            tokens: vec![devnet, legacy()],
        };
        assert_eq!(list.find(WSOL, ChainId::Mainnet).unwrap().chain_id, 101);
        assert!(list.find(WSOL, ChainId::Testnet).is_none());
        assert!(list.find("unknown", ChainId::Mainnet).is_none());
    }
}
