//! FraserPay command line.
//!
//! - `template` prints an import template
//! - `import` loads user and booth CSV files into a fresh system and can
//!   export the result as JSON
//! - `demo` walks through registration, booth join and a purchase

use clap::{Parser, Subcommand, ValueEnum};
use fraserpay::access::AccessScope;
use fraserpay::auth::RegistrationForm;
use fraserpay::format::{format_currency, format_date};
use fraserpay::import::{template, ImportReport, TemplateKind, BOOTH_WITH_PRODUCTS_TEMPLATE};
use fraserpay::lifecycle::{setup_tracing, Config, FraserPaySystem};
use fraserpay::purchase::Terminal;
use fraserpay::store::RecordClient;
use std::fs;
use std::path::PathBuf;
use tracing::{info, info_span, Instrument};

#[derive(Debug, Parser)]
#[command(name = "fraserpay", about = "FraserPay booth payments", long_about = None)]
struct Cli {
    /// JSON config file; environment variables are used when omitted
    #[arg(long, global = true, env = "FRASERPAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a CSV import template
    Template {
        #[arg(value_enum)]
        kind: TemplateArg,
    },
    /// Import users and/or booths from CSV files
    Import {
        #[arg(long)]
        users: Option<PathBuf>,
        #[arg(long)]
        booths: Option<PathBuf>,
        /// Write every record to this file as JSON afterwards
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Run a short end-to-end walkthrough
    Demo,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TemplateArg {
    Users,
    Booths,
    BoothsWithProducts,
}

impl From<TemplateArg> for TemplateKind {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Users => TemplateKind::Users,
            TemplateArg::Booths => TemplateKind::Booths,
            TemplateArg::BoothsWithProducts => TemplateKind::BoothsWithProducts,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, String> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
            Config::from_json(&text).map_err(|e| e.to_string())
        }
        None => Config::from_env().map_err(|e| e.to_string()),
    }
}

fn print_report(what: &str, report: &ImportReport) {
    println!("{what}: {} created, {} failed", report.created, report.failed.len());
    for failure in &report.failed {
        println!("  line {}: {}", failure.line, failure.reason);
    }
}

async fn import(
    system: &FraserPaySystem,
    users: Option<PathBuf>,
    booths: Option<PathBuf>,
    export: Option<PathBuf>,
) -> Result<(), String> {
    let importer = system.importer();
    if let Some(path) = users {
        let text = fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
        let report = importer.import_users(&text).await.map_err(|e| e.to_string())?;
        print_report("Users", &report);
    }
    if let Some(path) = booths {
        let text = fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
        let report = importer.import_booths(&text).await.map_err(|e| e.to_string())?;
        print_report("Booths", &report);
    }
    if let Some(path) = export {
        let snapshot = system.snapshot().await.map_err(|e| e.to_string())?;
        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
        fs::write(&path, json).map_err(|e| format!("{}: {e}", path.display()))?;
        info!(path = %path.display(), "Exported");
    }
    Ok(())
}

async fn demo(system: &FraserPaySystem) -> Result<(), String> {
    let report = system
        .importer()
        .import_booths(BOOTH_WITH_PRODUCTS_TEMPLATE)
        .await
        .map_err(|e| e.to_string())?;
    print_report("Booths", &report);

    let auth = system.auth();
    let register = |student_number: &str, name: &str, email: &str| RegistrationForm {
        student_number: student_number.into(),
        name: name.into(),
        email: email.into(),
        password: "fundraiser".into(),
        confirm_password: "fundraiser".into(),
    };
    let ann = auth
        .register(register("100001", "Ann Lee", "ann@example.com"))
        .instrument(info_span!("register"))
        .await
        .map_err(|e| e.to_string())?;
    auth.register(register("100002", "Bob Chan", "bob@example.com"))
        .instrument(info_span!("register"))
        .await
        .map_err(|e| e.to_string())?;
    system.users.credit(ann, 2000).await.map_err(|e| e.to_string())?;

    let (session, bob) = auth
        .login("100002", "fundraiser")
        .await
        .map_err(|e| e.to_string())?;
    let grant = system
        .access()
        .verify_access("123456", &bob.id, AccessScope::BoothJoin)
        .await
        .map_err(|e| e.to_string())?;
    let booth_id = grant.scope_id.ok_or("booth join returned no booth")?;
    let booth = system
        .booths
        .get(booth_id.clone())
        .await
        .map_err(|e| e.to_string())?
        .ok_or("joined booth disappeared")?;
    println!("{} joined {}", bob.name, booth.name);

    let mut terminal = Terminal::new(system.purchases(), bob.id.clone(), bob.name.clone());
    let first_product = booth.products.first().map(|p| p.id.clone()).ok_or("booth has no products")?;
    terminal.select_booth(booth);
    let student = terminal.lookup_student("100001").await.map_err(|e| e.to_string())?;
    println!("Serving {} ({})", student.name, format_currency(student.balance));
    terminal.add_product(&first_product).map_err(|e| e.to_string())?;
    terminal.add_product(&first_product).map_err(|e| e.to_string())?;

    let outcome = terminal
        .submit()
        .instrument(info_span!("checkout"))
        .await
        .map_err(|e| e.to_string())?;
    let balance = outcome.buyer_balance.map(format_currency).unwrap_or_else(|| "unknown".into());
    println!("Charged {}, balance now {balance}", format_currency(outcome.total));

    let history = system
        .ledger
        .history_for_booth(booth_id)
        .await
        .map_err(|e| e.to_string())?;
    for record in history {
        println!(
            "{} {} bought {} item(s) for {}",
            format_date(&record.created_at),
            record.buyer_name,
            record.items.iter().map(|i| i.quantity).sum::<u32>(),
            format_currency(record.total)
        );
    }
    auth.logout(session);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    if let Commands::Template { kind } = cli.command {
        println!("{}", template(kind.into()));
        return Ok(());
    }

    let config = load_config(cli.config.as_ref())?;
    let system = FraserPaySystem::start(config);
    let result = match cli.command {
        Commands::Import {
            users,
            booths,
            export,
        } => import(&system, users, booths, export).await,
        Commands::Demo => demo(&system).await,
        Commands::Template { .. } => Ok(()),
    };
    system.shutdown().await;
    result
}
