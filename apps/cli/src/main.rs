use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    panel::{ControlPanel, RenderedCup},
    MachineClient, UiSession,
};
use shared::domain::CoffeeKind;
use url::Url;

/// One interaction against a running coffee machine server: fetch the
/// page for a token, click once, print the resulting panel.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: Url,
    /// Brew the given coffee type (espresso, americano, latte).
    #[arg(long, conflicts_with = "option")]
    brew: Option<CoffeeKind>,
    /// Click the option control with this identifier, e.g. water_options.
    #[arg(long)]
    option: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut session = UiSession::new(MachineClient::new(args.server_url));
    session.bootstrap().await?;

    match (args.brew, args.option) {
        (Some(kind), None) => {
            session.make_coffee(kind).await;
        }
        (None, Some(identifier)) => {
            session.apply_option(&identifier).await;
        }
        _ => bail!("pass exactly one of --brew or --option"),
    }

    print_panel(session.panel());
    Ok(())
}

fn print_panel(panel: &ControlPanel) {
    println!(
        "trigger: {} | options: {}",
        enabled(panel.trigger_enabled()),
        enabled(panel.options_enabled())
    );
    if !panel.status_text.is_empty() {
        println!("problems: {}", panel.status_text);
    }
    match &panel.output {
        Some(RenderedCup::Image(url)) => println!("cup: {url}"),
        Some(RenderedCup::Html(markup)) => println!("cup: {markup}"),
        None => {}
    }
    if let Some(action) = &panel.last_action {
        println!("action: {action}");
    }
    if let Some(error) = &panel.error {
        println!("error: {error}");
    }
}

fn enabled(on: bool) -> &'static str {
    if on {
        "enabled"
    } else {
        "disabled"
    }
}
