use cafe_console::app::navigation;
use cafe_console::app::pages::{self, Page};
use cafe_console::config::env::SUPABASE_SERVICE_ROLE_KEY;
use cafe_console::config::Command;
use cafe_console::utils::error::{AppError, ErrorSeverity};
use cafe_console::utils::{logger, validation::Validate};
use cafe_console::{
    AuthFormController, CliConfig, ConfigProvider, MagicLinkClient, MagicLinkOptions,
    PublicEndpoint, ServiceRoleEndpoint, SubmitOutcome,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: &CliConfig) -> Result<(), AppError> {
    config.validate()?;

    match &config.command {
        Command::Login { email, .. } => login(config, email).await,
        Command::Routes { current } => {
            println!("{}", navigation::render_header(current));
            Ok(())
        }
        Command::Page { path } => match Page::from_path(path) {
            Some(page) => {
                print!("{}", pages::render_document(page));
                Ok(())
            }
            None => Err(AppError::ValidationError {
                field: "path".to_string(),
                message: format!("No page at {}", path),
            }),
        },
        Command::CheckConfig { server } => check_config(config, *server),
    }
}

async fn login(config: &CliConfig, email: &str) -> Result<(), AppError> {
    let provider = config.provider()?;
    let options = MagicLinkOptions::from_provider(&provider)?;
    let client = MagicLinkClient::new(provider).with_options(options);

    let mut form = AuthFormController::new(client);
    form.on_field_change(email);
    tracing::info!("{}", form.submit_label());

    match form.on_submit().await? {
        SubmitOutcome::Sent => {
            println!("✅ {}", form.message());
            Ok(())
        }
        SubmitOutcome::Invalid => {
            let message = form
                .errors()
                .values()
                .next()
                .cloned()
                .unwrap_or_default();
            Err(AppError::ValidationError {
                field: "email".to_string(),
                message,
            })
        }
        SubmitOutcome::Failed => Err(AppError::auth_request(None, form.message().to_string())),
    }
}

fn check_config(config: &CliConfig, server: bool) -> Result<(), AppError> {
    let provider = config.provider()?;

    let public = PublicEndpoint::resolve(&provider)?;
    println!("✅ Public endpoint: {}", public.base_url());

    let client = MagicLinkClient::new(&provider);
    println!("✅ Auth callback origin: {}", client.site_origin()?);

    let options = MagicLinkOptions::from_provider(&provider)?;
    println!(
        "✅ Magic link options: timeout={:?}, transport retries={}",
        options.timeout, options.transport_retries
    );

    if server {
        let privileged = ServiceRoleEndpoint::resolve(&provider)?;
        println!("✅ Service-role endpoint: {}", privileged.base_url());
    } else if provider.get_optional(SUPABASE_SERVICE_ROLE_KEY).is_some() {
        tracing::debug!("Service-role key present; use --server to check it");
    }

    Ok(())
}
