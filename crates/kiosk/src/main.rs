//! `reserva-kiosk` -- terminal front end for the booking wizard.
//!
//! Reads one command per line from stdin and drives a single booking
//! session at a time. Type `help` for the command list.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                          | Description                     |
//! |------------------------|----------|----------------------------------|---------------------------------|
//! | `BOOKING_DAYS_AHEAD`   | no       | `3`                              | Bookable days offered per session |
//! | `CONFIRMATION_MESSAGE` | no       | `Reserva agendada correctamente` | Message shown after booking     |
//! | `RUST_LOG`             | no       | `reserva_kiosk=info,reserva_core=info` | Log filter (logs go to stderr) |

use reserva_core::catalog::StaticCatalog;
use reserva_core::submission::LocalSubmitter;
use reserva_kiosk::config::KioskConfig;
use reserva_kiosk::runner::Kiosk;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reserva_kiosk=info,reserva_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = KioskConfig::from_env().unwrap_or_else(|err| {
        tracing::error!(error = %err, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        days_ahead = config.days_ahead.get(),
        "Starting reserva-kiosk",
    );

    let mut kiosk = Kiosk::new(StaticCatalog::new(), LocalSubmitter, config);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if let Err(err) = kiosk.run(stdin.lock(), &mut stdout).await {
        tracing::error!(error = %err, "Kiosk stopped");
        std::process::exit(1);
    }
}
