//! Command-line front end: the subcommands carry the same fields the
//! editor's dialogs carried (settings form, send form, contact lookup).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use westfax::{SendJob, Settings, WestFaxClient, contacts, send};

#[derive(Parser)]
#[command(name = "westfax", version, about = "Send PDFs through the WestFax API")]
struct Cli {
    /// Settings file (defaults to the platform config dir).
    #[arg(long, global = true, env = "WESTFAX_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show or update the stored WestFax account settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// List contacts, optionally filtered by a text query.
    Contacts {
        /// Substring matched against name, company and fax number.
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Send a saved PDF as a fax.
    Send(SendArgs),
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the stored settings (password masked).
    Show,
    /// Update one or more fields and save.
    Set {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        product_id: Option<String>,
        #[arg(long)]
        login_url: Option<String>,
        /// Sending fax number (ANI).
        #[arg(long)]
        ani: Option<String>,
    },
}

#[derive(Args)]
struct SendArgs {
    /// Destination fax number (digits; punctuation is stripped).
    #[arg(long)]
    to: String,
    /// The saved PDF to fax.
    #[arg(long)]
    pdf: PathBuf,
    /// Subject / job name.
    #[arg(long, default_value = "")]
    subject: String,
    /// Reference / billing code.
    #[arg(long, default_value = "")]
    reference: String,
    /// Request a delivery receipt email.
    #[arg(long)]
    receipt: bool,
    /// Print the raw API response after the summary.
    #[arg(long)]
    details: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings_path = match &cli.settings {
        Some(path) => path.clone(),
        None => Settings::default_path()?,
    };
    let mut settings =
        Settings::load_from(&settings_path).context("failed to load settings")?;

    match cli.command {
        Command::Settings { action } => run_settings(action, &mut settings),
        Command::Contacts { query } => run_contacts(&query, &settings),
        Command::Send(args) => run_send(args, &mut settings),
    }
}

fn run_settings(action: SettingsAction, settings: &mut Settings) -> Result<()> {
    match action {
        SettingsAction::Show => {
            println!("username:   {}", settings.username);
            println!(
                "password:   {}",
                if settings.password.is_empty() { "(not set)" } else { "(set)" }
            );
            println!("product id: {}", settings.product_id);
            println!("login url:  {}", settings.login_url);
            println!("ani:        {}", settings.ani);
            if let Some(email) = &settings.user_email {
                println!("email:      {email}");
            }
        }
        SettingsAction::Set {
            username,
            password,
            product_id,
            login_url,
            ani,
        } => {
            if let Some(v) = username {
                settings.username = v;
            }
            if let Some(v) = password {
                settings.password = v;
            }
            if let Some(v) = product_id {
                settings.product_id = v;
            }
            if let Some(v) = login_url {
                settings.login_url = v;
            }
            if let Some(v) = ani {
                settings.ani = v;
            }
            settings.persist();
            println!("settings saved");
        }
    }
    Ok(())
}

fn run_contacts(query: &str, settings: &Settings) -> Result<()> {
    let client = WestFaxClient::from_settings(settings)?;
    let response = client.get_contacts().context("contact lookup failed")?;
    let all = contacts::from_response(&response);
    let hits = contacts::filter(&all, query);

    if hits.is_empty() {
        println!("no matching contacts");
        return Ok(());
    }
    for c in hits {
        println!(
            "{:<15} {:<15} {:<25} {}",
            c.first_name, c.last_name, c.company, c.fax
        );
    }
    Ok(())
}

fn run_send(args: SendArgs, settings: &mut Settings) -> Result<()> {
    let client = WestFaxClient::from_settings(settings)?;
    let job = SendJob {
        to_number: args.to,
        subject: args.subject,
        billing_code: args.reference,
        receipt: args.receipt,
        pdf: args.pdf,
    };

    let report = send::send(&client, settings, &job)?;

    println!("{}", report.title());
    for line in report.summary() {
        println!("{line}");
    }
    if args.details {
        println!();
        println!("{}", report.details());
    }

    if !report.success() {
        std::process::exit(1);
    }
    Ok(())
}
