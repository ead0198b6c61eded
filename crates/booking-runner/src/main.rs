//! Magnetiq draft runner - composition root binary
//!
//! Inspects or clears the booking draft kept in the desktop's long-lived
//! medium. The short-lived medium is process memory, so only the backup
//! copy is visible from here.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use magnetiq_booking::{create_draft_store, BookingDraftStore, DraftStoreConfig};

const USAGE: &str = "Usage: magnetiq-draft <command>\n\nCommands:\n  info   show saved-draft metadata\n  show   print the saved form state and step\n  clear  delete the saved draft";

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "magnetiq_booking=debug,magnetiq_draft=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DraftStoreConfig::from_env().context("loading draft store configuration")?;
    tracing::debug!(storage_file = ?config.storage_file(), "Using draft storage");
    let store = create_draft_store(&config);

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("info") => info(&store),
        Some("show") => show(&store),
        Some("clear") => clear(&store),
        Some(cmd) => anyhow::bail!("Unknown command: {cmd}\n\n{USAGE}"),
        None => anyhow::bail!("{USAGE}"),
    }
}

fn info(store: &BookingDraftStore) -> anyhow::Result<()> {
    match store.saved_data_info() {
        Some(info) => {
            let json = serde_json::to_string_pretty(&info).context("encoding draft info")?;
            println!("{json}");
        }
        None => println!("no saved draft"),
    }
    Ok(())
}

fn show(store: &BookingDraftStore) -> anyhow::Result<()> {
    let loaded = store.load();
    let Some(form_state) = loaded.form_state else {
        println!("no saved draft");
        return Ok(());
    };

    let step = loaded.current_step.unwrap_or_default();
    let json = serde_json::to_string_pretty(&form_state).context("encoding form state")?;
    println!("step: {step}\n{json}");
    Ok(())
}

fn clear(store: &BookingDraftStore) -> anyhow::Result<()> {
    store.clear().context("clearing booking draft")?;
    println!("draft cleared");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
