mod report;   // distance report rendering and publishing
mod scene;    // host seam: token selection, notifications, chat
mod settings; // scene snapshot loading

use anyhow::Context;
use scene::SceneHost;
use settings::{DEFAULT_CONFIG_PATH, load_config};
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the chat log.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    info!("Pythagoras started with scene {}", path);

    let settings = load_config(&path).with_context(|| format!("failed to load scene from {}", path))?;
    let order = settings.report.order;

    let mut host = SceneHost::new(&settings, std::io::stdout().lock())?;
    match report::run_report(&mut host, order) {
        Ok(sent) => {
            // Notifications were already logged as warnings when raised.
            info!(messages = sent, warnings = host.notifications().len(), "Done.");
            Ok(())
        }
        Err(e) => {
            error!("Distance report failed: {:?}", e);
            Err(e)
        }
    }
}
