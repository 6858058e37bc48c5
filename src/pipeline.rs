use log::info;

use crate::aggregate::{aggregate_balances, check_conservation};
use crate::error::{Result, RichListError};
use crate::node::LedgerClient;
use crate::report::{build_report, ReportRow};
use crate::token::{resolve_token_info, TokenInfo};

#[derive(Debug)]
pub struct RichList {
    pub token: TokenInfo,
    pub rows: Vec<ReportRow>,
}

/// Runs the whole pipeline against a node: health gate, token descriptor,
/// output fetch, aggregation with conservation check, report rows. Any
/// failure aborts the run; there is no partial result.
pub async fn compute_rich_list<C: LedgerClient>(client: &C, token_id: &str) -> Result<RichList> {
    let node_info = client.get_info().await?;
    if !node_info.status.is_healthy {
        return Err(RichListError::UnhealthyNode);
    }
    info!(
        "Connected to {} {} (network {})",
        node_info.name, node_info.version, node_info.protocol.network_name
    );
    let hrp = node_info.protocol.bech32_hrp;

    let token = resolve_token_info(client, token_id).await?;
    println!("========= Token Information =========");
    println!("Token Name: {}", token.name);
    println!("Token Id: {}", token.id);
    println!("Token Symbol: {}", token.symbol);
    println!("Token Decimals: {}", token.decimals);

    info!("Reading all output ids holding native tokens..");
    let output_ids = client.basic_output_ids(true).await?;
    info!("Reading {} output bodies..", output_ids.len());
    let outputs = client.get_outputs(&output_ids).await?;

    info!("Start postprocessing..");
    let balances = aggregate_balances(&token.id, &hrp, &outputs)?;
    check_conservation(&balances, token.max_supply)?;
    info!("Token {} is held by {} addresses", token.symbol, balances.len());

    let rows = build_report(balances, &token);
    Ok(RichList { token, rows })
}
