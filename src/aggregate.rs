use std::collections::HashMap;

use primitive_types::U256;

use crate::error::{Result, RichListError};
use crate::node::types::{OutputResponse, ADDRESS_UNLOCK_CONDITION_TYPE};

/// Accumulated raw balance per bech32 address. Keys are unique; ordering is
/// re-derived later by the report sort.
pub type AddressBalances = HashMap<String, U256>;

/// Parses a numeric string whose base is given by its prefix: `0x` for
/// hexadecimal, plain digits for decimal. Amounts and supply figures can
/// exceed 64 bits, so everything lands in a 256-bit integer.
pub fn parse_prefixed_u256(value: &str) -> Result<U256> {
    let trimmed = value.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(digits) if digits.is_empty() => Err("no digits after the 0x prefix".to_string()),
        Some(digits) => U256::from_str_radix(digits, 16).map_err(|err| err.to_string()),
        None if trimmed.is_empty() => Err("empty string".to_string()),
        None => U256::from_dec_str(trimmed).map_err(|err| err.to_string()),
    };
    parsed.map_err(|reason| RichListError::InvalidAmount {
        value: value.to_string(),
        reason,
    })
}

/// Sums the target token's amounts by owning address over one pass of the
/// fetched outputs. Every output holding the token must decode to an
/// address: an unlock condition this tool cannot decode fails the run
/// rather than silently dropping the balance, so the conservation check
/// stays meaningful.
pub fn aggregate_balances(
    token_id: &str,
    hrp: &str,
    outputs: &[OutputResponse],
) -> Result<AddressBalances> {
    let mut balances = AddressBalances::new();

    for response in outputs {
        for token in &response.output.native_tokens {
            if token.id != token_id {
                continue;
            }
            let address = owner_address(response, hrp)?;
            let amount = parse_prefixed_u256(&token.amount)?;

            let current = balances.get(&address).copied().unwrap_or_else(U256::zero);
            let updated =
                current
                    .checked_add(amount)
                    .ok_or_else(|| RichListError::BalanceOverflow {
                        address: address.clone(),
                    })?;
            balances.insert(address, updated);
        }
    }

    Ok(balances)
}

/// Verifies that the accumulated balances account for the token's entire
/// declared supply. A mismatch means outputs were missed, double-counted,
/// or mis-decoded, and is fatal. Returns the verified total.
pub fn check_conservation(balances: &AddressBalances, max_supply: U256) -> Result<U256> {
    let mut total = U256::zero();
    for (address, amount) in balances {
        total = total
            .checked_add(*amount)
            .ok_or_else(|| RichListError::BalanceOverflow {
                address: address.clone(),
            })?;
    }
    if total != max_supply {
        return Err(RichListError::SupplyMismatch {
            expected: max_supply,
            actual: total,
        });
    }
    Ok(total)
}

/// Decodes the owning address from an output's first unlock condition into
/// its human-readable form.
fn owner_address(response: &OutputResponse, hrp: &str) -> Result<String> {
    let label = response.metadata.output_label();
    let condition = response.output.unlock_conditions.first().ok_or_else(|| {
        RichListError::UnsupportedAddress {
            detail: format!("output {label} has no unlock conditions"),
        }
    })?;
    if condition.kind != ADDRESS_UNLOCK_CONDITION_TYPE {
        return Err(RichListError::UnsupportedAddress {
            detail: format!(
                "output {label} is locked by condition type {} instead of an address",
                condition.kind
            ),
        });
    }
    let address = condition
        .address
        .as_ref()
        .ok_or_else(|| RichListError::UnsupportedAddress {
            detail: format!("output {label} address unlock condition carries no address"),
        })?;

    address.to_bech32(hrp).map_err(|err| match err {
        RichListError::UnsupportedAddress { detail } => RichListError::UnsupportedAddress {
            detail: format!("output {label}: {detail}"),
        },
        other => other,
    })
}
