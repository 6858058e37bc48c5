use primitive_types::U256;
use serde::Deserialize;

use crate::aggregate::parse_prefixed_u256;
use crate::error::{Result, RichListError};
use crate::node::types::{OutputResponse, METADATA_FEATURE_TYPE};
use crate::node::LedgerClient;

/// Immutable descriptor of the analyzed token, resolved once from its
/// foundry output and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub max_supply: U256,
}

/// The IRC-30 fields embedded in the foundry's immutable metadata feature.
/// Extra fields (standard, description, urls) are ignored.
#[derive(Debug, Deserialize)]
struct TokenMetadata {
    name: String,
    symbol: String,
    decimals: u32,
}

pub async fn resolve_token_info<C: LedgerClient>(client: &C, token_id: &str) -> Result<TokenInfo> {
    let foundry_output_id = client.foundry_output_id(token_id).await?;
    let foundry = client.get_output(&foundry_output_id).await?;
    TokenInfo::from_foundry(token_id, &foundry)
}

impl TokenInfo {
    /// Parses a foundry output record into the token descriptor: the
    /// maximum supply from the token scheme and name/symbol/decimals from
    /// the hex-encoded JSON blob in the immutable metadata feature.
    pub fn from_foundry(token_id: &str, foundry: &OutputResponse) -> Result<Self> {
        let scheme =
            foundry
                .output
                .token_scheme
                .as_ref()
                .ok_or_else(|| RichListError::MalformedMetadata {
                    reason: "foundry output carries no token scheme".to_string(),
                })?;
        let max_supply = parse_prefixed_u256(&scheme.maximum_supply).map_err(|err| {
            RichListError::MalformedMetadata {
                reason: format!("maximum supply: {err}"),
            }
        })?;

        let data = foundry
            .output
            .immutable_features
            .iter()
            .find(|feature| feature.kind == METADATA_FEATURE_TYPE)
            .and_then(|feature| feature.data.as_deref())
            .ok_or_else(|| RichListError::MalformedMetadata {
                reason: "foundry output carries no metadata feature".to_string(),
            })?;

        let bytes = hex::decode(data.trim_start_matches("0x")).map_err(|err| {
            RichListError::MalformedMetadata {
                reason: format!("metadata blob is not valid hex: {err}"),
            }
        })?;
        let metadata: TokenMetadata =
            serde_json::from_slice(&bytes).map_err(|err| RichListError::MalformedMetadata {
                reason: format!("metadata blob is not the expected JSON: {err}"),
            })?;

        Ok(TokenInfo {
            id: token_id.to_string(),
            name: metadata.name,
            symbol: metadata.symbol,
            decimals: metadata.decimals,
            max_supply,
        })
    }
}
