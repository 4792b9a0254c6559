use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use photo_kiosk::config::KioskConfig;
use photo_kiosk::gateway::{GenerationGateway, HttpGateway};
use photo_kiosk::session::{CapturedImage, Screen, WizardController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = KioskConfig::from_env();

    eprintln!("📸 Photo Kiosk v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.backend_url);
    eprintln!("   Commands:");
    eprintln!("     grant personal | grant likeness | revoke personal | revoke likeness");
    eprintln!("     agree               accept the consent form");
    eprintln!("     photo <path>        confirm a captured JPEG");
    eprintln!("     next                generate the talent-show image");
    eprintln!("     reset               back to the consent screen");
    eprintln!("     status | quit\n");

    let gateway: Arc<dyn GenerationGateway> = Arc::new(HttpGateway::new(&config)?);

    if gateway.check_health().await {
        eprintln!("   Backend: healthy\n");
    } else {
        eprintln!("   Warning: backend health check failed; generation calls will not succeed\n");
    }

    let mut controller = WizardController::new(gateway);
    render(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, arg) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match (command, arg) {
            ("quit", _) | ("exit", _) => break,
            ("reset", _) => controller.reset(),
            ("status", _) => {
                print_status(&controller);
                continue;
            }
            ("grant", "personal") => controller.set_personal_data_consent(true),
            ("grant", "likeness") => controller.set_likeness_consent(true),
            ("revoke", "personal") => controller.set_personal_data_consent(false),
            ("revoke", "likeness") => controller.set_likeness_consent(false),
            ("agree", _) => {
                if let Err(e) = controller.agree() {
                    eprintln!("   {e}");
                }
            }
            ("photo", path) if !path.is_empty() => match load_photo(path).await {
                Ok(image) => {
                    eprintln!("   Uploading and waiting for generation...");
                    if let Err(e) = controller.confirm_photo(image).await {
                        eprintln!("   {e}");
                    }
                }
                Err(e) => eprintln!("   Could not read photo: {e}"),
            },
            ("next", _) => {
                eprintln!("   Uploading and waiting for generation...");
                if let Err(e) = controller.next_step().await {
                    eprintln!("   {e}");
                }
            }
            _ => eprintln!("   Unknown command: {line}"),
        }

        render(&controller);
    }

    Ok(())
}

/// Read a confirmed capture from disk. Stands in for the webcam
/// collaborator, which delivers the same bytes as a base64 data URL.
async fn load_photo(path: &str) -> anyhow::Result<CapturedImage> {
    let bytes = tokio::fs::read(path).await?;
    Ok(CapturedImage::from_bytes(bytes)?)
}

/// Show the current screen the way the kiosk display would.
fn render(controller: &WizardController) {
    let session = controller.session();
    match session.screen {
        Screen::Consent => {
            let mark = |granted| if granted { "x" } else { " " };
            eprintln!("── Consent ──");
            eprintln!("   [{}] personal data", mark(session.consent.personal_data));
            eprintln!(
                "   [{}] likeness rights",
                mark(session.consent.likeness_rights)
            );
        }
        Screen::Capture => {
            eprintln!("── Capture ──");
            eprintln!("   Confirm a photo with: photo <path>");
        }
        Screen::Pending => {
            eprintln!("── Pending ──");
        }
        Screen::ProfileResult => {
            eprintln!("── Profile result ──");
            if let Some(image) = &session.profile_image {
                eprintln!("   {} ({})", image.url, image.filename);
            }
            eprintln!("   'next' for the talent-show image, 'reset' to start over");
        }
        Screen::TalentResult => {
            eprintln!("── Talent result ──");
            if let Some(image) = &session.talent_image {
                eprintln!("   {} ({})", image.url, image.filename);
            }
            eprintln!("   'reset' to start over");
        }
    }
    if let Some(error) = &session.last_error {
        eprintln!("   ⚠ {error}");
    }
    eprintln!();
}

fn print_status(controller: &WizardController) {
    let session = controller.session();
    eprintln!("   Session {} started {}", session.id, session.started_at);
    eprintln!("   Screen: {}", session.screen);
    eprintln!(
        "   Capture: {}",
        session
            .captured_image
            .as_ref()
            .map(|i| format!("{} bytes", i.len()))
            .unwrap_or_else(|| "none".into())
    );
    eprintln!(
        "   Profile image: {}",
        session
            .profile_image
            .as_ref()
            .map(|i| i.url.clone())
            .unwrap_or_else(|| "none".into())
    );
    eprintln!(
        "   Talent image: {}\n",
        session
            .talent_image
            .as_ref()
            .map(|i| i.url.clone())
            .unwrap_or_else(|| "none".into())
    );
}
