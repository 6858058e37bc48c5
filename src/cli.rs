use anyhow::{bail, Result};
use clap::Parser;
use url::Url;

/// Default mainnet endpoint, overridable per run with `--node` or the
/// `NODE_URL` environment variable.
pub const DEFAULT_NODE_URL: &str = "https://api.shimmer.network";

/// Token ids are foundry ids: `0x` followed by 38 hex-encoded bytes.
const TOKEN_ID_BYTES: usize = 38;

#[derive(Parser, Debug)]
#[command(
    name = "shimmer-rich-list",
    version,
    about = "Calculates the address rich list of a Shimmer native token"
)]
pub struct Args {
    /// The token id which should be analyzed
    pub token_id: String,

    /// Shimmer node URL
    #[arg(short, long, env = "NODE_URL", default_value = DEFAULT_NODE_URL)]
    pub node: String,

    /// Name of the csv file
    #[arg(
        short = 'c',
        long = "csv_name",
        alias = "csv-name",
        default_value = "rich_list.csv"
    )]
    pub csv_name: String,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        validate_node_url(&self.node)?;
        validate_token_id(&self.token_id)?;
        Ok(())
    }
}

fn validate_node_url(node: &str) -> Result<()> {
    let url = Url::parse(node)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("node URL {node} must use http or https");
    }
    Ok(())
}

fn validate_token_id(token_id: &str) -> Result<()> {
    let Some(digits) = token_id.strip_prefix("0x") else {
        bail!("token id {token_id} must start with 0x");
    };
    match hex::decode(digits) {
        Ok(bytes) if bytes.len() == TOKEN_ID_BYTES => Ok(()),
        Ok(bytes) => bail!(
            "token id {token_id} is {} bytes, expected {TOKEN_ID_BYTES}",
            bytes.len()
        ),
        Err(err) => bail!("token id {token_id} is not valid hex: {err}"),
    }
}
