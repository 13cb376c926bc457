use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use futures::future::BoxFuture;
use oxide_recipe::{
    ClientConfig, Command, Controls, DietOptions, FormConfig, HttpRecipeGateway, MvuRuntime,
    RecipeApp, TerminalRenderer, DEFAULT_ENDPOINT, HELP,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oxide-recipe")]
#[command(about = "Generate a recipe from the ingredients you have", long_about = None)]
struct Cli {
    /// Recipe service endpoint
    #[arg(long, env = "RECIPE_API_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Diet label to offer (repeatable, replaces the defaults)
    #[arg(long = "diet")]
    diets: Vec<String>,

    /// Give up on a request after this many seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("oxide_recipe=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client_config = ClientConfig::default()
        .with_endpoint(cli.endpoint)
        .with_request_timeout(Duration::from_secs(cli.timeout_secs));
    let mut form_config = FormConfig::default();
    if !cli.diets.is_empty() {
        form_config = form_config.with_diets(DietOptions::new(cli.diets));
    }

    let gateway = HttpRecipeGateway::new(&client_config)
        .with_context(|| format!("cannot use endpoint {}", client_config.endpoint))?;
    info!(endpoint = %gateway.endpoint(), "recipe service configured");

    let app = RecipeApp::new(form_config, Arc::new(gateway));
    let controls = Controls::new();
    let renderer = TerminalRenderer::new(std::io::stdout(), controls.clone());
    let spawner = |task: BoxFuture<'static, ()>| {
        tokio::spawn(task);
    };
    let mut runtime = MvuRuntime::new(app.initial_model(), app, renderer, spawner);

    println!("{HELP}");

    tokio::select! {
        _ = runtime.run() => {}
        result = read_commands(&controls) => result?,
    }

    Ok(())
}

async fn read_commands(controls: &Controls) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            command => {
                if let Err(err) = controls.dispatch(&command) {
                    warn!(?command, "command rejected");
                    eprintln!("{err}");
                }
            }
        }
    }

    Ok(())
}
