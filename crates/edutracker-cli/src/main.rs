//! edutracker CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use edutracker_core::model::Id;
use edutracker_core::roster::{SortDirection, SortKey};

mod commands;

#[derive(Parser)]
#[command(name = "edutracker", version, about = "Classroom gradebook analytics")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the identity for later commands
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the signed-in identity
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Class overview and roster (teacher)
    Overview {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,

        /// Sort column: name, average
        #[arg(long, default_value = "name")]
        sort: SortKey,

        /// Sort direction: asc, desc
        #[arg(long, default_value = "asc")]
        direction: SortDirection,
    },

    /// Progress for a student (students see their own; teachers pass --id)
    Student {
        #[arg(long)]
        id: Option<Id>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List assessments
    Assessments,

    /// Create an assessment (teacher)
    AddAssessment {
        #[arg(long)]
        title: String,

        #[arg(long)]
        subject: String,

        #[arg(long, default_value = "100")]
        max_score: f64,

        /// Date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Record a student's score (teacher)
    Grade {
        #[arg(long)]
        student: Id,

        #[arg(long)]
        assessment: Id,

        #[arg(long)]
        score: f64,

        #[arg(long)]
        feedback: Option<String>,
    },

    /// Export the class performance report (teacher)
    Export {
        /// Output directory (default: report_dir from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: csv, json, all
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("edutracker=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Login { email, password } => commands::session::login(config, email, password),
        Commands::Logout => commands::session::logout(config),
        Commands::Whoami => commands::session::whoami(config),
        Commands::Overview {
            search,
            sort,
            direction,
        } => commands::overview::execute(config, search, sort, direction),
        Commands::Student { id, json } => commands::student::execute(config, id, json),
        Commands::Assessments => commands::assessments::list(config),
        Commands::AddAssessment {
            title,
            subject,
            max_score,
            date,
        } => commands::assessments::add(config, title, subject, max_score, date),
        Commands::Grade {
            student,
            assessment,
            score,
            feedback,
        } => commands::grade::execute(config, student, assessment, score, feedback),
        Commands::Export { output, format } => commands::export::execute(config, output, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
