use colored::Colorize;
use itertools::Itertools;
use primitive_types::U256;

use crate::aggregate::AddressBalances;
use crate::error::Result;
use crate::token::TokenInfo;

/// How many rows the console preview shows; the CSV always carries the full
/// address set.
pub const PREVIEW_ROWS: usize = 20;

#[derive(Debug, Clone)]
pub struct ReportRow {
    pub address: String,
    /// Raw amount in base units; the source of truth for ordering and
    /// conservation. `amount` and `percent` are display projections.
    pub raw: U256,
    pub amount: String,
    pub percent: f64,
}

/// Turns the balance map into the final row sequence: raw amount
/// descending, ties broken by address lexical order so output is
/// reproducible.
pub fn build_report(balances: AddressBalances, token: &TokenInfo) -> Vec<ReportRow> {
    balances
        .into_iter()
        .sorted_by(|(address_a, raw_a), (address_b, raw_b)| {
            raw_b.cmp(raw_a).then_with(|| address_a.cmp(address_b))
        })
        .map(|(address, raw)| ReportRow {
            amount: scale_amount(raw, token.decimals),
            percent: percent_of_supply(raw, token.max_supply),
            address,
            raw,
        })
        .collect()
}

/// Exact decimal scaling of a raw amount by 10^decimals, done on the digit
/// string so no precision is lost at any magnitude. Trailing fractional
/// zeros are trimmed.
pub fn scale_amount(raw: U256, decimals: u32) -> String {
    let digits = raw.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let mut scaled = if digits.len() <= decimals {
        format!("0.{}{}", "0".repeat(decimals - digits.len()), digits)
    } else {
        let (integer, fraction) = digits.split_at(digits.len() - decimals);
        format!("{integer}.{fraction}")
    };
    while scaled.ends_with('0') {
        scaled.pop();
    }
    if scaled.ends_with('.') {
        scaled.pop();
    }
    scaled
}

/// Share of the maximum supply, for display only.
pub fn percent_of_supply(raw: U256, max_supply: U256) -> f64 {
    if max_supply.is_zero() {
        return 0.0;
    }
    100.0 * u256_to_f64(raw) / u256_to_f64(max_supply)
}

fn u256_to_f64(value: U256) -> f64 {
    value.to_string().parse().unwrap_or(f64::INFINITY)
}

/// Writes the full report. The leading unnamed column is the 0-based rank
/// matching the row order.
pub fn write_csv(path: &str, rows: &[ReportRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["", "address", "amount", "percent"])?;
    for (rank, row) in rows.iter().enumerate() {
        writer.serialize((rank, &row.address, &row.amount, row.percent))?;
    }
    writer.flush()?;
    Ok(())
}

/// Prints the top rows as an aligned table, with a trailing marker when the
/// full list is longer than the preview.
pub fn print_preview(rows: &[ReportRow], token: &TokenInfo, limit: usize) {
    println!("{}", "========= Address Rich List =========".bold());
    println!(
        "{:>4}  {:<66} {:>28} {:>9}",
        "",
        "address",
        format!("amount ({})", token.symbol),
        "percent"
    );
    for (rank, row) in rows.iter().take(limit).enumerate() {
        println!(
            "{:>4}  {:<66} {:>28} {:>8.4}%",
            rank, row.address, row.amount, row.percent
        );
    }
    if rows.len() > limit {
        println!("..");
    }
}
