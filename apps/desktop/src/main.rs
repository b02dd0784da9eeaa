use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, normalize_server_url},
    ClientEvent, NoticeKind, RosterView, SignupClient,
};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse and manage extracurricular activity sign-ups")]
struct Args {
    /// Overrides the server url from activities.toml / APP__SERVER_URL.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every activity with its participants.
    List,
    /// Enroll a participant, then print the refreshed roster.
    Signup {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Remove a participant, then print the refreshed roster.
    Unregister {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(server_url) = args.server_url.as_deref() {
        settings.server_url = normalize_server_url(server_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(server_url = %settings.server_url, "using activities service");

    let client = SignupClient::connect(&settings.server_url)
        .with_context(|| format!("cannot use server url {}", settings.server_url))?;
    let mut events = client.subscribe_events();

    let succeeded = run(&client, args.command).await;
    print_events(&mut events);

    if !succeeded {
        bail!("operation failed");
    }
    Ok(())
}

async fn run(client: &Arc<SignupClient>, command: Command) -> bool {
    match command {
        Command::List => client.load_roster().await.is_ok(),
        Command::Signup { activity, email } => client.enroll(&activity, &email).await.is_ok(),
        Command::Unregister { activity, email } => {
            client.unregister(&activity, &email).await.is_ok()
        }
    }
}

fn print_events(events: &mut broadcast::Receiver<ClientEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            ClientEvent::RosterRendered(view) => print_roster(&view),
            ClientEvent::RosterUnavailable => {
                eprintln!("{}", client_core::render::LOAD_FAILURE_NOTICE)
            }
            ClientEvent::Notice(notice) => match notice.kind {
                NoticeKind::Success => println!("{}", notice.text),
                NoticeKind::Error => eprintln!("error: {}", notice.text),
            },
            ClientEvent::Alert(text) => eprintln!("error: {text}"),
            ClientEvent::FormReset => {}
        }
    }
}

fn print_roster(view: &RosterView) {
    for card in &view.cards {
        println!("{card}");
    }
    let names: Vec<&str> = view.options.iter().map(|o| o.label.as_str()).collect();
    println!("Activities: {}", names.join(", "));
}
