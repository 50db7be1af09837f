use chrono::Utc;
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use iut_erp_client::{pages::classes::ClassesPage, ClientConfig, ErpClient, FileSessionStore, Session};
use iut_erp_core::board::ClassroomCategory;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ClientConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Connecting to ERP backend at {}", config.api_base_url);
    let client = ErpClient::new(&config)?;

    // Reuse the stored session, logging in with the configured credentials otherwise
    let mut session = Session::restore(FileSessionStore::new(&config.session_file))?;
    if !session.is_authenticated() {
        let Some((email, password)) = config.credentials() else {
            warn!("No stored session and no ERP_EMAIL / ERP_PASSWORD configured");
            return Err(eyre!("Not logged in"));
        };
        session.login(&client, email, password).await?;
    }
    let client = session.authorize(&client)?;

    // Print the live classroom board
    let now = Utc::now();
    let page = ClassesPage::load(&client).await?;
    for status in page.board(now, "", ClassroomCategory::All)? {
        let current = status.current.map(|slot| slot.display_title()).unwrap_or("-");
        let next = status.next.map(|slot| slot.display_title()).unwrap_or("-");
        println!(
            "{:<20} {:<12} now: {:<30} next: {}",
            status.classroom.name,
            status.availability_label(),
            current,
            next
        );
    }

    Ok(())
}
