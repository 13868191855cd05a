//! Token metadata read straight from an RPC node.
//!
//! Used for clusters the metadata service cannot know about (custom and local
//! validators). Decimals come from the SPL mint account, owned by either the token or
//! the token-2022 program. Name and symbol come from the Metaplex metadata account
//! derived from the mint, when one exists.

use borsh::BorshDeserialize;
use explorer_tokens_types::token::TokenInfo;
use solana_account::Account;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use spl_token::solana_program::program_pack::Pack;
use spl_token::solana_program::pubkey::Pubkey;
use std::str::FromStr;
use tracing::instrument;

/// Program owning Metaplex token metadata accounts.
pub const METADATA_PROGRAM_ID: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";

#[derive(Debug, thiserror::Error)]
pub enum OnChainError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),
    #[error("RPC request failed: {0}")]
    Rpc(#[source] ClientError),
    #[error("Account {address} is owned by {owner}, not a token program")]
    NotAMint { address: String, owner: String },
    #[error("Failed to unpack mint {address}: {reason}")]
    Unpack { address: String, reason: String },
    #[error("Malformed metadata account: {0}")]
    Metadata(#[source] std::io::Error),
}

/// The RPC calls needed to read mint accounts.
pub trait MintAccountsFetcher {
    fn get_multiple_accounts(
        &self,
        pubkeys: &[Pubkey],
    ) -> impl Future<Output = Result<Vec<Option<Account>>, ClientError>> + Send;
}

impl<Container: AsRef<RpcClient>> MintAccountsFetcher for Container {
    fn get_multiple_accounts(
        &self,
        pubkeys: &[Pubkey],
    ) -> impl Future<Output = Result<Vec<Option<Account>>, ClientError>> + Send {
        RpcClient::get_multiple_accounts(self.as_ref(), pubkeys)
    }
}

/// Leading fields of a Metaplex metadata account. Creators, collection and the
/// other trailing fields are not read.
#[derive(Debug, BorshDeserialize)]
struct MetadataHead {
    _key: u8,
    _update_authority: [u8; 32],
    _mint: [u8; 32],
    name: String,
    symbol: String,
    uri: String,
}

/// Name, symbol and URI of a Metaplex metadata account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaplexMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl MetaplexMetadata {
    /// Decodes the head of a metadata account, ignoring the bytes that follow it.
    pub fn parse(data: &[u8]) -> Result<Self, OnChainError> {
        let head = MetadataHead::deserialize(&mut &data[..]).map_err(OnChainError::Metadata)?;
        Ok(Self {
            name: trim_padding(&head.name),
            symbol: trim_padding(&head.symbol),
            uri: trim_padding(&head.uri),
        })
    }
}

// Metaplex pads fixed-size fields with NUL bytes.
fn trim_padding(value: &str) -> String {
    value.trim_end_matches('\0').trim().to_string()
}

/// Derives the Metaplex metadata account of `mint`.
pub fn metadata_address(mint: &Pubkey) -> Result<Pubkey, OnChainError> {
    let program_id = Pubkey::from_str(METADATA_PROGRAM_ID)
        .map_err(|_| OnChainError::InvalidAddress(METADATA_PROGRAM_ID.to_string()))?;
    let (address, _bump) = Pubkey::find_program_address(
        &[b"metadata", program_id.as_ref(), mint.as_ref()],
        &program_id,
    );
    Ok(address)
}

/// Reads the decimals of a mint account.
pub fn mint_decimals(address: &Pubkey, account: &Account) -> Result<u8, OnChainError> {
    let unpack_error = |reason: String| OnChainError::Unpack {
        address: address.to_string(),
        reason,
    };
    if account.owner == spl_token::id() {
        let mint = spl_token::state::Mint::unpack(&account.data).map_err(|e| unpack_error(e.to_string()))?;
        Ok(mint.decimals)
    } else if account.owner == spl_token_2022::id() {
        // Extensions follow the base mint state, which keeps the legacy layout.
        let base = account
            .data
            .get(..spl_token_2022::state::Mint::LEN)
            .ok_or_else(|| unpack_error("account data too short".to_string()))?;
        let mint = spl_token_2022::state::Mint::unpack(base).map_err(|e| unpack_error(e.to_string()))?;
        Ok(mint.decimals)
    } else {
        Err(OnChainError::NotAMint {
            address: address.to_string(),
            owner: account.owner.to_string(),
        })
    }
}

/// Reads token metadata through an RPC endpoint.
#[derive(Clone, Debug)]
pub struct OnChainTokenSource<R> {
    rpc: R,
}

impl<R: MintAccountsFetcher> OnChainTokenSource<R> {
    pub fn new(rpc: R) -> Self {
        Self { rpc }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    /// Fetches the mint and its metadata account in a single `getMultipleAccounts` call.
    ///
    /// `Ok(None)` when the mint account does not exist. A missing or malformed metadata
    /// account leaves name and symbol empty.
    #[instrument(name = "explorer_tokens.on_chain.get_token_info", skip_all, fields(address = %address))]
    pub async fn get_token_info(&self, address: &str) -> Result<Option<TokenInfo>, OnChainError> {
        let mint = Pubkey::from_str(address).map_err(|_| OnChainError::InvalidAddress(address.to_string()))?;
        let metadata = metadata_address(&mint)?;
        let mut accounts = self
            .rpc
            .get_multiple_accounts(&[mint, metadata])
            .await
            .map_err(OnChainError::Rpc)?
            .into_iter();
        let Some(mint_account) = accounts.next().flatten() else {
            return Ok(None);
        };
        let decimals = mint_decimals(&mint, &mint_account)?;
        let metadata = accounts
            .next()
            .flatten()
            .and_then(|account| match MetaplexMetadata::parse(&account.data) {
                Ok(metadata) => Some(metadata),
                Err(error) => {
                    tracing::warn!(error = %error, "Ignoring token metadata account");
                    None
                }
            });
        let (name, symbol) = metadata
            .map(|m| (m.name, m.symbol))
            .unwrap_or_default();
        Ok(Some(TokenInfo {
            address: address.to_string(),
            name,
            symbol,
            decimals,
            logo_uri: None,
            verified: false,
            chain_id: None,
            tags: None,
            holders: None,
        }))
    }
}
