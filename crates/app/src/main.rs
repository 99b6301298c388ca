//! medstaff - command-line tools for the medical staff directory

use std::process::ExitCode;

use annotation::{AutoConfirm, Confirm, EditorSession};
use clap::Parser;
use medstaff_api::NewMedicalWorker;
use medstaff_api::endpoints::WorkerFilter;
use medstaff_client::DirectoryClient;
use medstaff_config::{ApiConfig, EditorConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod departments;
mod error;
mod flow;
mod prompt;
mod report;
mod script;
mod workers;

use cli::{AnnotateArgs, Cli, Command, DepartmentsCommand, ReportArgs, WorkersCommand};
use error::AppError;
use flow::{AnnotateJob, RETRY_DELAY};
use prompt::StdinConfirm;
use script::EditScript;
use workers::UpdateOutcome;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("{:?}", err);
            eprintln!("Error: {}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut api = ApiConfig::from_env();
    if let Some(url) = cli.api_url {
        api.base_url = url;
    }
    let client = DirectoryClient::new(&api)?;
    info!("Using directory server at {}", client.base_url());

    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(StdinConfirm)
    };

    match cli.command {
        Command::Annotate(args) => annotate(&client, &api, args, confirm.as_mut()).await,
        Command::Report(args) => report_cmd(&client, args).await,
        Command::Workers(command) => workers_cmd(&client, command, confirm.as_mut()).await,
        Command::Departments(command) => departments_cmd(&client, command, confirm.as_mut()).await,
        Command::Lookups => lookups_cmd(&client).await,
    }
}

async fn annotate(
    client: &DirectoryClient,
    api: &ApiConfig,
    args: AnnotateArgs,
    confirm: &mut dyn Confirm,
) -> Result<(), AppError> {
    let script = EditScript::from_json(&std::fs::read_to_string(&args.script)?)?;
    let input = match &args.input {
        Some(path) => Some(std::fs::read(path)?),
        None => None,
    };

    let job = AnnotateJob {
        worker_id: args.worker,
        script,
        input,
        output: args.output,
        upload: args.upload,
        upload_attempts: api.upload_retries,
        retry_delay: RETRY_DELAY,
    };

    let mut session = EditorSession::new(EditorConfig::from_env());
    let outcome = flow::annotate(client, &mut session, &job, confirm).await?;

    println!(
        "Edited worker {} photo ({}x{}, {} history entries)",
        job.worker_id, outcome.width, outcome.height, outcome.history_len
    );
    if outcome.replay.rejected > 0 {
        println!("{} script action(s) were rejected", outcome.replay.rejected);
    }
    if let Some(path) = &outcome.written {
        println!("Saved {}", path.display());
    }
    if let Some(attempts) = outcome.upload_attempts {
        println!("Uploaded after {} attempt(s)", attempts);
    }
    Ok(())
}

async fn report_cmd(client: &DirectoryClient, args: ReportArgs) -> Result<(), AppError> {
    let path = report::download(client, &args.dir).await?;
    println!("Saved {}", path.display());
    Ok(())
}

async fn workers_cmd(
    client: &DirectoryClient,
    command: WorkersCommand,
    confirm: &mut dyn Confirm,
) -> Result<(), AppError> {
    match command {
        WorkersCommand::List {
            department,
            specialization,
        } => {
            let filter = WorkerFilter {
                department_id: department,
                specialization_id: specialization,
            };
            let list = client.list_workers(filter).await?;
            for worker in &list {
                println!("{}", workers::summary_line(worker));
            }
            println!("{} worker(s)", list.len());
        }
        WorkersCommand::Show { id } => {
            println!("{}", workers::details(&client.get_worker(id).await?));
        }
        WorkersCommand::Find { term } => {
            let list = client.list_workers(WorkerFilter::default()).await?;
            println!("{}", workers::details(&workers::find(&list, &term)?));
        }
        WorkersCommand::Create { file } => {
            let text = std::fs::read_to_string(&file)?;
            let worker: NewMedicalWorker =
                serde_json::from_str(&text).map_err(AppError::WorkerFile)?;
            let created = client.create_worker(&worker).await?;
            println!("{} (id {})", created.message, created.worker_id);
        }
        WorkersCommand::Update { id, changes } => {
            match workers::update(client, id, &changes, confirm).await? {
                UpdateOutcome::Saved(message) => println!("{}", message.message),
                UpdateOutcome::Reloaded(latest) => {
                    println!("Changes were not saved. Current record:");
                    println!("{}", workers::details(&latest));
                }
            }
        }
        WorkersCommand::Delete { id } => {
            if confirm.confirm(workers::DELETE_WORKER_PROMPT) {
                println!("{}", client.delete_worker(id).await?.message);
            } else {
                println!("Cancelled");
            }
        }
        WorkersCommand::DeletePhoto { id } => {
            if confirm.confirm(workers::DELETE_PHOTO_PROMPT) {
                println!("{}", client.delete_image(id).await?.message);
            } else {
                println!("Cancelled");
            }
        }
    }
    Ok(())
}

async fn departments_cmd(
    client: &DirectoryClient,
    command: DepartmentsCommand,
    confirm: &mut dyn Confirm,
) -> Result<(), AppError> {
    match command {
        DepartmentsCommand::List { facility_type } => {
            let list = departments::list(client, facility_type).await?;
            if list.is_empty() {
                println!("No departments found matching your criteria");
            }
            for department in &list {
                println!("{}", departments::summary_line(department));
            }
        }
        DepartmentsCommand::Show { id } => {
            let department = client.department_details(id).await?;
            println!("{}", departments::summary_line(&department));
        }
        DepartmentsCommand::Delete { id } => match departments::delete(client, id, confirm).await? {
            Some(deleted) => println!(
                "{} ({} worker(s) removed)",
                deleted.message, deleted.workers_deleted
            ),
            None => println!("Cancelled"),
        },
    }
    Ok(())
}

async fn lookups_cmd(client: &DirectoryClient) -> Result<(), AppError> {
    println!("Specializations:");
    for spec in client.specializations().await? {
        println!(
            "{:>4}  {:<28} {}",
            spec.specialization_id, spec.specialization_name, spec.category
        );
    }
    println!("Facility types:");
    for facility in client.facility_types().await? {
        println!(
            "{:>4}  {:<28} {}",
            facility.facility_type_id, facility.type_name, facility.description
        );
    }
    Ok(())
}
