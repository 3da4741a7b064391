use std::io::Read;

use anyhow::Context;

use millbook_cli::{CliConfig, Request, handle};

fn main() -> anyhow::Result<()> {
    millbook_observability::init();
    let config = CliConfig::from_env();

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read request file {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };

    let request: Request = serde_json::from_str(&input).context("invalid calculation request")?;
    tracing::info!(ack_quantity = config.ack_quantity, "handling calculation request");

    let response = handle(&request, &config);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
