use bech32::{ToBase32, Variant};
use serde::Deserialize;

use crate::error::{Result, RichListError};

// Stardust wire discriminants, as they appear in the node's JSON.
pub const ED25519_ADDRESS_TYPE: u8 = 0;
pub const ALIAS_ADDRESS_TYPE: u8 = 8;
pub const NFT_ADDRESS_TYPE: u8 = 16;
pub const ADDRESS_UNLOCK_CONDITION_TYPE: u8 = 0;
pub const METADATA_FEATURE_TYPE: u8 = 2;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub name: String,
    pub version: String,
    pub status: NodeStatus,
    pub protocol: ProtocolParams,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub is_healthy: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolParams {
    pub network_name: String,
    pub bech32_hrp: String,
}

/// One page of output ids from the indexer. `cursor` is present whenever
/// another page follows.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputIdsPage {
    pub ledger_index: u64,
    #[serde(default)]
    pub cursor: Option<String>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputResponse {
    pub metadata: OutputMetadata,
    pub output: Output,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMetadata {
    pub transaction_id: String,
    pub output_index: u16,
    pub is_spent: bool,
}

impl OutputMetadata {
    /// Human-readable output label for diagnostics.
    pub fn output_label(&self) -> String {
        format!("{}:{}", self.transaction_id, self.output_index)
    }
}

/// A ledger output body. Basic and foundry outputs share this shape; fields
/// a variant lacks simply stay empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    #[serde(rename = "type")]
    pub kind: u8,
    pub amount: String,
    #[serde(default)]
    pub native_tokens: Vec<NativeToken>,
    #[serde(default)]
    pub unlock_conditions: Vec<UnlockCondition>,
    #[serde(default)]
    pub token_scheme: Option<TokenScheme>,
    #[serde(default)]
    pub immutable_features: Vec<Feature>,
}

/// Amounts arrive as numeric strings; the base is given by the prefix
/// (`0x` for hexadecimal, plain digits for decimal).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeToken {
    pub id: String,
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockCondition {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenScheme {
    #[serde(rename = "type")]
    pub kind: u8,
    pub minted_tokens: String,
    pub melted_tokens: String,
    pub maximum_supply: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub data: Option<String>,
}

/// The owning address inside an unlock condition. The known Stardust
/// variants are matched by their distinguishing field; anything the node
/// sends beyond these lands in `Unknown` and fails decoding loudly instead
/// of dropping the balance.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Address {
    Ed25519 {
        #[serde(rename = "pubKeyHash")]
        pub_key_hash: String,
    },
    Alias {
        #[serde(rename = "aliasId")]
        alias_id: String,
    },
    Nft {
        #[serde(rename = "nftId")]
        nft_id: String,
    },
    Unknown(serde_json::Value),
}

impl Address {
    /// Converts the raw address hash to the network's human-readable bech32
    /// encoding: a type byte followed by the 32-byte body, checksummed under
    /// the given prefix. The same hash and prefix always yield the same
    /// string.
    pub fn to_bech32(&self, hrp: &str) -> Result<String> {
        let (kind, hash) = match self {
            Address::Ed25519 { pub_key_hash } => (ED25519_ADDRESS_TYPE, pub_key_hash),
            Address::Alias { alias_id } => (ALIAS_ADDRESS_TYPE, alias_id),
            Address::Nft { nft_id } => (NFT_ADDRESS_TYPE, nft_id),
            Address::Unknown(value) => {
                return Err(RichListError::UnsupportedAddress {
                    detail: format!("unrecognized address variant {value}"),
                })
            }
        };
        let body = hex::decode(hash.trim_start_matches("0x")).map_err(|err| {
            RichListError::UnsupportedAddress {
                detail: format!("address hash {hash} is not valid hex: {err}"),
            }
        })?;

        let mut data = Vec::with_capacity(body.len() + 1);
        data.push(kind);
        data.extend_from_slice(&body);
        Ok(bech32::encode(hrp, data.to_base32(), Variant::Bech32)?)
    }
}
