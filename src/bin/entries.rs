//! Command line front-end for the student records API.
//!
//! Every command loads the current list first, performs its action through the
//! form/list controller and prints the list the server returns afterwards.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use student_records::domain::validation::parse_srno;
use student_records::infra::{config, logging};
use student_records::{Entry, EntryController, HttpEntryApi, SubmitOutcome, ValidationError};

#[derive(Parser, Debug)]
#[command(name = "entries", about = "Manage student records", version)]
struct Cli {
    /// API base URL (defaults to ENTRIES_API_URL or http://localhost:3000)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every record
    List,
    /// Add a new record
    Add {
        #[arg(long)]
        srno: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        branch: String,
        #[arg(long)]
        rollno: String,
    },
    /// Change name, branch or roll number of an existing record
    Edit {
        srno: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        rollno: Option<String>,
    },
    /// Delete a record
    Delete { srno: i32 },
}

fn print_entries(entries: &[Entry]) {
    if entries.is_empty() {
        println!("(no entries)");
        return;
    }
    println!("{:>6}  {:<24} {:<12} {:>6}", "Sr no", "Name", "Branch", "Roll");
    for e in entries {
        println!("{:>6}  {:<24} {:<12} {:>6}", e.srno, e.name, e.branch, e.rollno);
    }
}

fn report_outcome(outcome: SubmitOutcome) -> ExitCode {
    match outcome {
        SubmitOutcome::Incomplete => {
            eprintln!("All fields are required.");
            ExitCode::FAILURE
        }
        SubmitOutcome::Created { srno } => {
            println!("Added entry {}.", srno);
            ExitCode::SUCCESS
        }
        SubmitOutcome::Updated { srno } => {
            println!("Updated entry {}.", srno);
            ExitCode::SUCCESS
        }
        SubmitOutcome::RequestFailed { srno, reason } => {
            eprintln!("Saving entry {} failed: {}", srno, reason);
            ExitCode::FAILURE
        }
    }
}

fn rejected(err: ValidationError) -> ExitCode {
    eprintln!("{}", err);
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    logging::init_tracing(config::log_json());

    let cli = Cli::parse();
    let base_url = cli.api_url.unwrap_or_else(config::api_base_url);
    let mut controller = EntryController::new(HttpEntryApi::new(base_url));

    if let Err(e) = controller.load_all().await {
        eprintln!("Could not load entries: {}", e);
        return ExitCode::FAILURE;
    }

    let code = match cli.command {
        Command::List => ExitCode::SUCCESS,
        Command::Add {
            srno,
            name,
            branch,
            rollno,
        } => {
            let srno = match parse_srno(&srno) {
                Ok(srno) => srno,
                Err(e) => return rejected(e),
            };
            let form = controller.form_mut();
            form.srno = Some(srno);
            form.name = name;
            form.branch = branch;
            form.rollno = rollno;
            match controller.submit().await {
                Ok(outcome) => report_outcome(outcome),
                Err(e) => return rejected(e),
            }
        }
        Command::Edit {
            srno,
            name,
            branch,
            rollno,
        } => {
            let Some(target) = controller.entries().iter().find(|e| e.srno == srno).cloned() else {
                eprintln!("No entry found to update");
                return ExitCode::FAILURE;
            };
            controller.begin_edit(&target);
            let form = controller.form_mut();
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(branch) = branch {
                form.branch = branch;
            }
            if let Some(rollno) = rollno {
                form.rollno = rollno;
            }
            match controller.submit().await {
                Ok(outcome) => report_outcome(outcome),
                Err(e) => return rejected(e),
            }
        }
        Command::Delete { srno } => {
            let target = controller
                .entries()
                .iter()
                .find(|e| e.srno == srno)
                .cloned()
                .unwrap_or_else(|| Entry::new(srno, "", "", ""));
            match controller.remove(&target).await {
                Ok(()) => {
                    println!("Deleted entry {}.", srno);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Deleting entry {} failed: {}", srno, e);
                    ExitCode::FAILURE
                }
            }
        }
    };

    print_entries(controller.entries());
    code
}
