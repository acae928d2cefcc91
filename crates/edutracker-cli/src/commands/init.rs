//! The `edutracker init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("edutracker.toml").exists() {
        println!("edutracker.toml already exists, skipping.");
    } else {
        std::fs::write("edutracker.toml", SAMPLE_CONFIG)?;
        println!("Created edutracker.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: edutracker login --email teacher@school.com --password 123");
    println!("  2. Run: edutracker overview --sort average --direction desc");
    println!("  3. Run: edutracker export --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# edutracker configuration

# Where the signed-in identity is remembered between commands.
session_file = "./.edutracker-session.json"

# Default directory for `edutracker export`.
report_dir = "./edutracker-reports"

# Load a JSON dataset ({ "users": [], "assessments": [], "results": [] })
# instead of the built-in classroom.
# fixture = "./class.json"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config = edutracker_core::config::parse_config(SAMPLE_CONFIG).unwrap();
        assert!(config.fixture.is_none());
        assert_eq!(
            config.report_dir,
            std::path::PathBuf::from("./edutracker-reports")
        );
    }
}
