//! Fapello Downloader - CLI entry point.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use fapello_downloader::{
    browser::ChromiumBrowser,
    cli::{prompt_browser, prompt_url, Args},
    config::{validate_base_url, validate_config, Config},
    download::run,
    error::{exit_codes, Error, Result},
    events::{Event, EventSink, FileEventLog},
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_info,
        print_run_stats, print_success, print_warning,
    },
    FapelloClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run_cli().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            let code = match e {
                Error::Aborted(_) => exit_codes::ABORT,
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::InvalidBaseUrl(_)
                | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
                Error::Browser(_) | Error::NavigationTimeout { .. } => exit_codes::BROWSER_ERROR,
                Error::Http(_) | Error::Download(_) => exit_codes::NETWORK_ERROR,
                _ => exit_codes::UNEXPECTED_ERROR,
            };
            ExitCode::from(code as u8)
        }
    }
}

async fn run_cli() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        print_info(&format!(
            "No configuration file at {}, using defaults",
            args.config.display()
        ));
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let interactive = io::stdin().is_terminal();

    if args.browser.is_none() && interactive {
        let stdin = io::stdin();
        config.browser.kind = prompt_browser(&mut stdin.lock(), &mut io::stdout())?;
    }

    let base_url = match &args.url {
        Some(url) => url.trim().to_string(),
        None if interactive => {
            let stdin = io::stdin();
            prompt_url(&mut stdin.lock(), &mut io::stdout())?
        }
        None => return Err(Error::Aborted("no profile URL given".into())),
    };

    // Nothing touches the network before the URL is known to be well-formed
    if !validate_base_url(&base_url) {
        return Err(Error::InvalidBaseUrl(base_url));
    }

    print_config_summary(
        &base_url,
        &config.browser.kind.to_string(),
        &config.options.download_directory.display().to_string(),
        config.options.batch_size,
    );

    let log = FileEventLog::open(&config.options.log_file)?;
    let client = FapelloClient::new(&config)?;

    let spinner = create_spinner(&format!("Launching {}...", config.browser.kind));
    let browser = match ChromiumBrowser::launch(&config.browser).await {
        Ok(browser) => browser,
        Err(e) => {
            spinner.finish_and_clear();
            log.record(Event::RunFailed {
                error: e.to_string(),
            });
            return Err(e);
        }
    };
    spinner.finish_and_clear();

    let stats = run(&config, &browser, &client, &log, &base_url).await?;

    print_run_stats(&stats);

    if stats.failed_downloads > 0 || stats.posts_failed > 0 {
        print_warning(&format!(
            "Some items failed, see {} for details",
            log.path().display()
        ));
    } else {
        print_success(&format!(
            "Saved {} file(s) for {}",
            stats.total_downloaded(),
            stats.profile
        ));
    }

    Ok(())
}
