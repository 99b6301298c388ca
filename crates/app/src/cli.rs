//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "medstaff", version, about = "Medical staff directory tools")]
pub struct Cli {
    /// Directory server URL (overrides MEDSTAFF_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Answer yes to confirmation prompts
    #[arg(long, short, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Annotate a worker photo by replaying an edit script
    Annotate(AnnotateArgs),
    /// Download the staff report spreadsheet
    Report(ReportArgs),
    /// List, inspect and edit worker records
    #[command(subcommand)]
    Workers(WorkersCommand),
    /// List, inspect and delete departments
    #[command(subcommand)]
    Departments(DepartmentsCommand),
    /// Show specializations and facility types
    Lookups,
}

#[derive(Debug, Subcommand)]
pub enum WorkersCommand {
    /// List workers, optionally filtered
    List {
        #[arg(long)]
        department: Option<i64>,
        #[arg(long)]
        specialization: Option<i64>,
    },
    /// Show one worker by id
    Show { id: i64 },
    /// Find a worker by id or name
    Find { term: String },
    /// Create a worker from a JSON file
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Change fields of a worker
    Update {
        id: i64,
        #[command(flatten)]
        changes: WorkerChanges,
    },
    /// Delete a worker
    Delete { id: i64 },
    /// Delete a worker's photo
    DeletePhoto { id: i64 },
}

/// Fields to change; anything unset keeps the server value
#[derive(Debug, Clone, Default, Args)]
pub struct WorkerChanges {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub department: Option<i64>,
    #[arg(long)]
    pub specialization: Option<i64>,
    #[arg(long)]
    pub hire_date: Option<String>,
    #[arg(long)]
    pub salary: Option<f64>,
    #[arg(long)]
    pub license: Option<String>,
    /// Row version the changes are based on (default: the one just loaded)
    #[arg(long)]
    pub row_version: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum DepartmentsCommand {
    /// List departments, optionally for one facility type
    List {
        #[arg(long)]
        facility_type: Option<i64>,
    },
    /// Show one department
    Show { id: i64 },
    /// Delete a department and every worker in it
    Delete { id: i64 },
}

#[derive(Debug, Clone, Args)]
pub struct AnnotateArgs {
    /// Worker whose photo is edited
    #[arg(long)]
    pub worker: i64,

    /// JSON edit script to replay
    #[arg(long)]
    pub script: PathBuf,

    /// Local image to edit instead of the stored photo
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Where to write the edited PNG
    #[arg(long, required_unless_present = "upload")]
    pub output: Option<PathBuf>,

    /// Upload the edited PNG as the worker's photo
    #[arg(long)]
    pub upload: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Directory to save the report in
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_args() {
        let cli = Cli::try_parse_from([
            "medstaff",
            "annotate",
            "--worker",
            "7",
            "--script",
            "edits.json",
            "--upload",
            "-y",
        ])
        .unwrap();
        let Command::Annotate(args) = cli.command else {
            panic!("expected annotate");
        };
        assert_eq!(args.worker, 7);
        assert!(args.upload && cli.yes);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_annotate_needs_a_destination() {
        let result =
            Cli::try_parse_from(["medstaff", "annotate", "--worker", "7", "--script", "e.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_api_url() {
        let cli =
            Cli::try_parse_from(["medstaff", "report", "--api-url", "http://10.0.0.5:8080"])
                .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.5:8080"));
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.dir, PathBuf::from("."));
    }

    #[test]
    fn test_workers_list_filters() {
        let cli = Cli::try_parse_from([
            "medstaff",
            "workers",
            "list",
            "--department",
            "2",
            "--specialization",
            "5",
        ])
        .unwrap();
        let Command::Workers(WorkersCommand::List {
            department,
            specialization,
        }) = cli.command
        else {
            panic!("expected workers list");
        };
        assert_eq!((department, specialization), (Some(2), Some(5)));
    }

    #[test]
    fn test_workers_update_changes() {
        let cli = Cli::try_parse_from([
            "medstaff",
            "workers",
            "update",
            "7",
            "--email",
            "ana@example.org",
            "--salary",
            "6100.5",
            "--row-version",
            "00000000000007D1",
        ])
        .unwrap();
        let Command::Workers(WorkersCommand::Update { id, changes }) = cli.command else {
            panic!("expected workers update");
        };
        assert_eq!(id, 7);
        assert_eq!(changes.email.as_deref(), Some("ana@example.org"));
        assert_eq!(changes.salary, Some(6100.5));
        assert_eq!(changes.row_version.as_deref(), Some("00000000000007D1"));
        assert!(changes.first_name.is_none());
    }

    #[test]
    fn test_department_delete() {
        let cli = Cli::try_parse_from(["medstaff", "departments", "delete", "4", "-y"]).unwrap();
        assert!(cli.yes);
        assert!(matches!(
            cli.command,
            Command::Departments(DepartmentsCommand::Delete { id: 4 })
        ));
    }
}
