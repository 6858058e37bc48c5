use anyhow::Result;
use bech32::{FromBase32, Variant};
use serde_json::json;
use shimmer_rich_list::error::RichListError;
use shimmer_rich_list::node::types::Address;
use test_log::test;

fn hash(byte: u8) -> String {
    format!("0x{}", hex::encode([byte; 32]))
}

#[test]
fn test_ed25519_round_trip() -> Result<()> {
    let address = Address::Ed25519 {
        pub_key_hash: hash(0x11),
    };
    let encoded = address.to_bech32("smr")?;

    // Decode back and check the payload (type byte + 32-byte hash)
    let (hrp, data, variant) = bech32::decode(&encoded)?;
    let bytes = Vec::<u8>::from_base32(&data)?;
    assert_eq!(hrp, "smr");
    assert_eq!(variant, Variant::Bech32);
    assert_eq!(bytes[0], 0x00);
    assert_eq!(&bytes[1..], &[0x11; 32]);

    Ok(())
}

#[test]
fn test_encoding_is_deterministic() -> Result<()> {
    let address = Address::Ed25519 {
        pub_key_hash: hash(0x42),
    };
    assert_eq!(address.to_bech32("smr")?, address.to_bech32("smr")?);

    Ok(())
}

#[test]
fn test_variant_type_bytes() -> Result<()> {
    let ed25519 = Address::Ed25519 {
        pub_key_hash: hash(0x07),
    };
    let alias = Address::Alias {
        alias_id: hash(0x07),
    };
    let nft = Address::Nft { nft_id: hash(0x07) };

    // Same hash, different type byte, so three distinct addresses
    let encodings = [
        (ed25519.to_bech32("smr")?, 0x00),
        (alias.to_bech32("smr")?, 0x08),
        (nft.to_bech32("smr")?, 0x10),
    ];
    for (encoded, type_byte) in &encodings {
        let (_, data, _) = bech32::decode(encoded)?;
        let bytes = Vec::<u8>::from_base32(&data)?;
        assert_eq!(bytes[0], *type_byte);
    }
    assert_ne!(encodings[0].0, encodings[1].0);
    assert_ne!(encodings[1].0, encodings[2].0);
    assert_ne!(encodings[0].0, encodings[2].0);

    Ok(())
}

#[test]
fn test_network_prefix() -> Result<()> {
    let address = Address::Ed25519 {
        pub_key_hash: hash(0x99),
    };

    let mainnet = address.to_bech32("smr")?;
    let testnet = address.to_bech32("rms")?;
    assert!(mainnet.starts_with("smr1"));
    assert!(testnet.starts_with("rms1"));
    assert_ne!(mainnet, testnet);

    Ok(())
}

#[test]
fn test_unknown_variant_fails() {
    let address = Address::Unknown(json!({ "type": 40, "payload": "0xdead" }));

    let err = address.to_bech32("smr").unwrap_err();
    assert!(matches!(err, RichListError::UnsupportedAddress { .. }));
}

#[test]
fn test_invalid_hash_fails() {
    let address = Address::Ed25519 {
        pub_key_hash: "0xnothex".to_string(),
    };

    let err = address.to_bech32("smr").unwrap_err();
    assert!(matches!(err, RichListError::UnsupportedAddress { .. }));
}

#[test]
fn test_wire_decoding_picks_the_right_variant() -> Result<()> {
    let ed25519: Address =
        serde_json::from_value(json!({ "type": 0, "pubKeyHash": hash(0x01) }))?;
    assert!(matches!(ed25519, Address::Ed25519 { .. }));

    let alias: Address = serde_json::from_value(json!({ "type": 8, "aliasId": hash(0x02) }))?;
    assert!(matches!(alias, Address::Alias { .. }));

    let nft: Address = serde_json::from_value(json!({ "type": 16, "nftId": hash(0x03) }))?;
    assert!(matches!(nft, Address::Nft { .. }));

    // Anything without a known hash field is preserved for the error path
    let unknown: Address =
        serde_json::from_value(json!({ "type": 40, "addresses": [] }))?;
    assert!(matches!(unknown, Address::Unknown(_)));

    Ok(())
}
