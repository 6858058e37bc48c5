use anyhow::Result;
use clap::Parser;
use log::info;

use shimmer_rich_list::{
    cli::Args,
    node::NodeClient,
    pipeline::compute_rich_list,
    report::{print_preview, write_csv, PREVIEW_ROWS},
    utils::setup_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    setup_logger()?;

    let args = Args::parse();
    args.validate()?;

    let client = NodeClient::new(&args.node)?;
    let rich_list = compute_rich_list(&client, &args.token_id).await?;

    write_csv(&args.csv_name, &rich_list.rows)?;
    info!(
        "Exported {} holders of {} to {}",
        rich_list.rows.len(),
        rich_list.token.symbol,
        args.csv_name
    );

    print_preview(&rich_list.rows, &rich_list.token, PREVIEW_ROWS);
    Ok(())
}
