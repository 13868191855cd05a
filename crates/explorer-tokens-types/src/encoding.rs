//! Text encodings for raw bytes (transaction data downloads, account data views).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as b64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported text encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFormat {
    Hex,
    Base58,
    Base64,
}

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unknown encoding format {0}")]
    UnknownFormat(String),
}

impl EncodingFormat {
    pub const ALL: [EncodingFormat; 3] = [
        EncodingFormat::Hex,
        EncodingFormat::Base58,
        EncodingFormat::Base64,
    ];

    /// Encodes `data`. Hex output is lowercase.
    pub fn encode<T: AsRef<[u8]>>(self, data: T) -> String {
        let data = data.as_ref();
        match self {
            EncodingFormat::Hex => hex::encode(data),
            EncodingFormat::Base58 => bs58::encode(data).into_string(),
            EncodingFormat::Base64 => b64.encode(data),
        }
    }

    pub fn decode(self, encoded: &str) -> Result<Vec<u8>, EncodingError> {
        let bytes = match self {
            EncodingFormat::Hex => hex::decode(encoded)?,
            EncodingFormat::Base58 => bs58::decode(encoded).into_vec()?,
            EncodingFormat::Base64 => b64.decode(encoded)?,
        };
        Ok(bytes)
    }

    /// File extension used for downloads.
    pub fn as_str(self) -> &'static str {
        match self {
            EncodingFormat::Hex => "hex",
            EncodingFormat::Base58 => "base58",
            EncodingFormat::Base64 => "base64",
        }
    }
}

impl fmt::Display for EncodingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingFormat {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EncodingFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| EncodingError::UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_every_format() {
        let data: Vec<u8> = vec![0, 0, 1, 2, 3, 127, 128, 254, 255];
        for format in EncodingFormat::ALL {
            let encoded = format.encode(&data);
            assert_eq!(format.decode(&encoded).unwrap(), data, "{format}");
        }
    }

    #[test]
    fn test_known_values() {
        let data = b"hello";
        assert_eq!(EncodingFormat::Hex.encode(data), "68656c6c6f");
        assert_eq!(EncodingFormat::Base58.encode(data), "Cn8eVZg");
        assert_eq!(EncodingFormat::Base64.encode(data), "aGVsbG8=");
        assert_eq!(EncodingFormat::Hex.encode(b""), "");
    }

    #[test]
    fn test_invalid_input() {
        assert!(EncodingFormat::Hex.decode("zz").is_err());
        assert!(EncodingFormat::Base58.decode("0OIl").is_err());
        assert!(EncodingFormat::Base64.decode("***").is_err());
        assert!("utf8".parse::<EncodingFormat>().is_err());
        assert_eq!("base58".parse::<EncodingFormat>().unwrap(), EncodingFormat::Base58);
    }
}
