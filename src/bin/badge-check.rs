use toolcategory_verify::core::config::load_verify_config;
use toolcategory_verify::scraping::PageFetcher;
use toolcategory_verify::verify::{check_url, orchestrator::parse_target_url};
use toolcategory_verify::VerifyError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let Some(raw_url) = args.iter().find(|a| !a.starts_with("--")) else {
        eprintln!("Usage: badge-check <url> [--json]");
        eprintln!("\nChecks a page for the ToolCategory badge and backlink without saving anything.");
        eprintln!("\nEnv:");
        eprintln!("  TOOLCATEGORY_VERIFY_CONFIG=... (optional, config file path)");
        eprintln!("  VERIFY_FETCH_TIMEOUT_SECS=25 (optional)");
        eprintln!("  VERIFY_MAX_BODY_BYTES=1000000 (optional)");
        std::process::exit(2);
    };

    let config = load_verify_config();
    let policy = config.badge_policy();
    let fetcher = PageFetcher::new(config.fetch_settings())?;

    let url = match parse_target_url(raw_url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    match check_url(&fetcher, &policy, &url).await {
        Ok(outcome) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else if outcome.success {
                println!("✅ {} has the ToolCategory badge and backlink.", url);
            } else {
                println!("❌ {} is not ready yet:", url);
                for reason in &outcome.failure_reasons {
                    println!("  - {}", reason);
                }
            }
            std::process::exit(if outcome.success { 0 } else { 1 });
        }
        Err(e @ VerifyError::UpstreamFetchFailed(_)) => {
            eprintln!("{} ({})", e.to_error_response().error.unwrap_or_default(), e);
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}
