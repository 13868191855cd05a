//! UI amount scaling for token-2022 mints with the `scaledUiAmountConfig` extension.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::timestamp::UnixTimestamp;

/// Name of the scaled UI amount extension in `jsonParsed` mint data.
pub const SCALED_UI_AMOUNT_EXTENSION: &str = "scaledUiAmountConfig";

/// A mint extension as it appears in `jsonParsed` account data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintExtension {
    pub extension: String,
    #[serde(default)]
    pub state: Value,
}

/// State of the `scaledUiAmountConfig` extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledUiAmountConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    pub multiplier: String,
    pub new_multiplier: String,
    pub new_multiplier_effective_timestamp: UnixTimestamp,
}

impl MintExtension {
    /// Decodes the state if this is a well-formed scaled UI amount extension.
    pub fn scaled_ui_amount_config(&self) -> Option<ScaledUiAmountConfig> {
        if self.extension != SCALED_UI_AMOUNT_EXTENSION {
            return None;
        }
        serde_json::from_value(self.state.clone()).ok()
    }
}

impl ScaledUiAmountConfig {
    /// The multiplier in force at `now`.
    pub fn multiplier_at(&self, now: UnixTimestamp) -> &str {
        if now >= self.new_multiplier_effective_timestamp {
            &self.new_multiplier
        } else {
            &self.multiplier
        }
    }
}

/// Returns the UI amount multiplier currently in force for a mint.
///
/// `"1"` when the mint has no (decodable) scaled UI amount extension.
pub fn current_multiplier(extensions: Option<&[MintExtension]>, now: UnixTimestamp) -> String {
    extensions
        .unwrap_or_default()
        .iter()
        .find_map(MintExtension::scaled_ui_amount_config)
        .map(|config| config.multiplier_at(now).to_string())
        .unwrap_or_else(|| "1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extensions() -> Vec<MintExtension> {
        serde_json::from_value(json!([
            { "extension": "transferFeeConfig", "state": { "withheldAmount": 0 } },
            {
                "extension": "scaledUiAmountConfig",
                "state": {
                    "authority": "11111111111111111111111111111111",
                    "multiplier": "1.5",
                    "newMultiplier": "2",
                    "newMultiplierEffectiveTimestamp": 1_700_000_000
                }
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_no_extension_means_unscaled() {
        assert_eq!(current_multiplier(None, UnixTimestamp::now()), "1");
        assert_eq!(current_multiplier(Some(&[]), UnixTimestamp::now()), "1");
        let unrelated = &extensions()[..1];
        assert_eq!(current_multiplier(Some(unrelated), UnixTimestamp::now()), "1");
    }

    #[test]
    fn test_multiplier_switches_at_effective_timestamp() {
        let extensions = extensions();
        let before = UnixTimestamp::from_secs(1_699_999_999);
        let at = UnixTimestamp::from_secs(1_700_000_000);
        assert_eq!(current_multiplier(Some(&extensions), before), "1.5");
        assert_eq!(current_multiplier(Some(&extensions), at), "2");
    }
}
