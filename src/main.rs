use clap::Parser;
use invitaciones::utils::{logger, validation::Validate};
use invitaciones::{
    AppConfig, AppState, ConfirmationStore, FallbackStore, GuestIndex, LocalFileStore,
    SheetsConfig, SheetsStore,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();

    logger::init_logger(config.verbose);

    tracing::info!("Starting invitaciones RSVP service");
    if config.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let index = match GuestIndex::from_roster_path(&config.roster_path) {
        Ok(index) => index,
        Err(e) => {
            tracing::error!("Could not load roster from {}: {}", config.roster_path, e);
            eprintln!("❌ Could not load roster: {}", e);
            std::process::exit(1);
        }
    };
    if index.is_empty() {
        tracing::warn!("Roster produced an empty guest index; suggestions will find nothing");
    }

    let store = build_store_chain(&config)?;
    let state = AppState::new(index, store, config.event_date.clone());

    let app = invitaciones::router(state);
    let address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the ordered storage chain: the remote spreadsheet first when its
/// environment is configured, with the local CSV file always last.
fn build_store_chain(config: &AppConfig) -> invitaciones::Result<Arc<dyn ConfirmationStore>> {
    let local: Arc<dyn ConfirmationStore> =
        Arc::new(LocalFileStore::csv(config.confirmations_path()));

    let stores: Vec<Arc<dyn ConfirmationStore>> = match SheetsConfig::from_env() {
        Some(sheets_config) => {
            sheets_config.validate()?;
            tracing::info!(
                "Remote spreadsheet backend configured (spreadsheet {})",
                sheets_config.spreadsheet_id
            );
            vec![Arc::new(SheetsStore::new(sheets_config)), local]
        }
        None => {
            tracing::info!(
                "No remote backend configured, storing confirmations in {}",
                config.confirmations_path().display()
            );
            vec![local]
        }
    };

    Ok(Arc::new(FallbackStore::new(stores)?))
}
