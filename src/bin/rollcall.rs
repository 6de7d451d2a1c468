//! rollcall CLI — operator interface to the shared checklist.

use clap::{Parser, Subcommand};
use rollcall_rs::catalog::seed_catalog;
use rollcall_rs::config::Config;
use rollcall_rs::engine::{Reconciler, ReconcilerConfig, Snapshot, SyncState, ensure_seeded};
use rollcall_rs::gateway::Gateway;
use rollcall_rs::identity::LocalIdentity;
use rollcall_rs::model::TaskId;
use rollcall_rs::report::render_report;
use rollcall_rs::rollup::{category_rollup, overall_progress, urgent_pending};
use rollcall_rs::store::memory::MemStore;
use rollcall_rs::store::postgres::PgStore;
use rollcall_rs::store::Store;
use rollcall_rs::telemetry::{TelemetryConfig, init_telemetry};
use secrecy::ExposeSecret;

#[derive(Parser)]
#[command(name = "rollcall", about = "Shared compliance checklist")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Follow the checklist and print the dashboard on every change
    Watch {
        /// Run against an in-process store instead of Postgres
        #[arg(long)]
        memory: bool,
    },
    /// Seed the task collection if it is empty
    Seed,
    /// Print the shareholder progress report
    Report,
    /// Task operations
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// List all tasks
    List,
    /// Set a task's completion flag
    Toggle {
        /// Task ID
        id: String,
        /// New completion value
        value: bool,
    },
    /// Replace a task's note (empty string clears it)
    Note {
        /// Task ID
        id: String,
        /// New note text
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Watch { memory } => cmd_watch(memory).await,
        Command::Seed => {
            let store = connect_store().await?;
            let seeded = ensure_seeded(&store, &seed_catalog()).await?;
            if seeded {
                println!("Seeded {} tasks.", seed_catalog().len());
            } else {
                println!("Collection already seeded, nothing to do.");
            }
            Ok(())
        }
        Command::Report => {
            let store = connect_store().await?;
            let snapshot = first_snapshot(&store).await?;
            let today = chrono::Local::now().date_naive();
            print!("{}", render_report(&snapshot.tasks, today));
            Ok(())
        }
        Command::Task { action } => {
            let store = connect_store().await?;
            match action {
                TaskAction::List => cmd_task_list(&store).await,
                TaskAction::Toggle { id, value } => {
                    let gateway = signed_in_gateway(store);
                    gateway
                        .toggle_completion(&TaskId::from(id.as_str()), value)
                        .await?;
                    println!("Write accepted; clients converge on the next notification.");
                    Ok(())
                }
                TaskAction::Note { id, text } => {
                    let gateway = signed_in_gateway(store);
                    gateway.update_note(&TaskId::from(id.as_str()), text).await?;
                    println!("Write accepted; clients converge on the next notification.");
                    Ok(())
                }
            }
        }
    }
}

async fn connect_store() -> anyhow::Result<PgStore> {
    let config = Config::from_env()?;
    let store = PgStore::connect(config.database_url.expose_secret()).await?;
    store.migrate().await?;
    Ok(store)
}

/// Anonymous sign-in, then a gateway bound to that identity.
fn signed_in_gateway<S: Store>(store: S) -> Gateway<S> {
    let identity = LocalIdentity::new();
    identity.sign_in_anonymously();
    Gateway::new(store, identity.watch())
}

/// First emission of a fresh subscription, validated.
async fn first_snapshot<S: Store>(store: &S) -> anyhow::Result<Snapshot> {
    let mut sub = store.subscribe().await?;
    let docs = sub
        .next()
        .await
        .ok_or_else(|| anyhow::anyhow!("subscription closed before first emission"))??;
    Ok(Snapshot::from_documents(docs))
}

async fn cmd_watch(memory: bool) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "rollcall".to_string(),
    })?;

    if memory {
        let store = MemStore::new();
        run_watch(store).await
    } else {
        let store = PgStore::connect(config.database_url.expose_secret()).await?;
        store.migrate().await?;
        run_watch(store).await
    }
}

async fn run_watch<S>(store: S) -> anyhow::Result<()>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let identity = LocalIdentity::new();
    identity.sign_in_anonymously();

    ensure_seeded(&store, &seed_catalog()).await?;

    let reconciler = Reconciler::new(store, ReconcilerConfig::default());

    let mut state = reconciler.state();
    let printer = tokio::spawn(async move {
        loop {
            {
                let current = state.borrow_and_update();
                match &*current {
                    SyncState::Loading => println!("(loading...)"),
                    SyncState::Ready(snapshot) => print_dashboard(snapshot),
                }
            }
            if state.changed().await.is_err() {
                break;
            }
        }
    });

    let ctrl = reconciler.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        ctrl.shutdown();
    });

    reconciler.run().await?;
    printer.abort();
    Ok(())
}

async fn cmd_task_list<S: Store>(store: &S) -> anyhow::Result<()> {
    let snapshot = first_snapshot(store).await?;

    if snapshot.tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    // Header
    println!(
        "{:<8}  {:<15}  {:<5}  {:<6}  TITLE",
        "ID", "CATEGORY", "DONE", "URGENT"
    );
    println!("{}", "-".repeat(90));

    for task in &snapshot.tasks {
        println!(
            "{:<8}  {:<15}  {:<5}  {:<6}  {}",
            task.id,
            task.category.wire_name(),
            if task.is_completed { "yes" } else { "no" },
            if task.is_urgent { "yes" } else { "no" },
            task.title,
        );
    }

    println!("\n{} task(s)", snapshot.tasks.len());
    if snapshot.rejected > 0 {
        println!("{} document(s) excluded for schema violations", snapshot.rejected);
    }
    Ok(())
}

fn print_dashboard(snapshot: &Snapshot) {
    let tasks = &snapshot.tasks;
    let completed = tasks.iter().filter(|t| t.is_completed).count();

    println!();
    println!(
        "Overall progress: {}%  ({}/{} completed)",
        overall_progress(tasks),
        completed,
        tasks.len()
    );

    for metric in category_rollup(tasks) {
        println!("  {:<22}  {}/{}", metric.label, metric.completed, metric.total);
    }

    let urgent = urgent_pending(tasks);
    if !urgent.is_empty() {
        println!("Urgent and pending ({}):", urgent.len());
        for task in urgent {
            println!("  ! {}  {}", task.id, task.title);
        }
    }
    if snapshot.rejected > 0 {
        println!("({} document(s) excluded for schema violations)", snapshot.rejected);
    }
}
