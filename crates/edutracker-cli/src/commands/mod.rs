//! Subcommand implementations and the state they share.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use edutracker_core::analytics::{GradeRecord, StudentAggregate};
use edutracker_core::config::{load_config_from, EdutrackerConfig};
use edutracker_core::identity::{current_identity, guard, Access, FileSessionStore};
use edutracker_core::model::{Role, User};
use edutracker_core::MemoryStore;

pub mod assessments;
pub mod export;
pub mod grade;
pub mod init;
pub mod overview;
pub mod session;
pub mod student;

/// Config, entity store, and session for one invocation.
pub struct Workspace {
    pub config: EdutrackerConfig,
    pub store: MemoryStore,
    pub session: FileSessionStore,
}

impl Workspace {
    pub fn open(config_path: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;
        let store = config.open_store()?;
        let session = FileSessionStore::new(config.session_file.clone());
        Ok(Self {
            config,
            store,
            session,
        })
    }

    /// The signed-in user, whatever their role.
    pub fn signed_in(&mut self) -> Result<User> {
        current_identity(&mut self.session)
            .ok_or_else(|| anyhow::anyhow!("not signed in; run `edutracker login` first"))
    }

    /// The signed-in user, provided they hold `role`.
    pub fn require(&mut self, role: Role) -> Result<User> {
        match guard(&mut self.session, role) {
            Access::Granted(user) => Ok(user),
            Access::Unauthenticated => {
                anyhow::bail!("not signed in; run `edutracker login` first")
            }
            Access::WrongRole(user) => anyhow::bail!(
                "{} is signed in as a {}; this command is for the {role} role",
                user.name,
                user.role
            ),
        }
    }
}

pub fn roster_table(students: &[StudentAggregate]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Student Name", "Overall Average", "Status"]);
    for s in students {
        table.add_row(vec![
            Cell::new(s.id),
            Cell::new(&s.name),
            Cell::new(format!("{}%", s.average)),
            Cell::new(s.status),
        ]);
    }
    table
}

pub fn grades_table(grades: &[GradeRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Assessment", "Subject", "Score", "%", "Feedback"]);
    for g in grades {
        table.add_row(vec![
            Cell::new(g.date),
            Cell::new(&g.title),
            Cell::new(&g.subject),
            Cell::new(format!("{} / {}", g.score, g.max_score)),
            Cell::new(g.percentage),
            Cell::new(&g.feedback),
        ]);
    }
    table
}
