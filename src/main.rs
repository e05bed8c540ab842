use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;

use mail_xnames::ReconcileConfig;
use mail_xnames::message::{parse_file, parse_message};

fn main() -> anyhow::Result<()> {
    let config = ReconcileConfig::from_env()?;

    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let arg = std::env::args().nth(1);
    if matches!(arg.as_deref(), Some("-h" | "--help")) {
        eprintln!("mail-xnames v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("   Usage: mail-xnames [MESSAGE_FILE]   (reads stdin when omitted or '-')");
        eprintln!("   Env: MAIL_XNAMES_ENABLED, MAIL_XNAMES_KINDS, MAIL_XNAMES_LOG, RUST_LOG");
        return Ok(());
    }

    let message = match arg.as_deref() {
        None | Some("-") => {
            let mut raw = Vec::new();
            std::io::stdin()
                .read_to_end(&mut raw)
                .context("Failed to read message from stdin")?;
            parse_message(&raw, &config).context("Failed to decode message from stdin")?
        }
        Some(path) => {
            let path = PathBuf::from(path);
            parse_file(&path, &config)
                .with_context(|| format!("Failed to decode message {}", path.display()))?
        }
    };

    tracing::info!(
        id = %message.id,
        from = message.from.len(),
        to = message.to.len(),
        cc = message.cc.len(),
        bcc = message.bcc.len(),
        "Message decoded"
    );

    println!("{}", serde_json::to_string_pretty(&message)?);
    Ok(())
}
