//! The `edutracker login`, `logout`, and `whoami` commands.

use std::path::PathBuf;

use anyhow::Result;

use edutracker_core::identity::{sign_in, sign_out};

use super::Workspace;

pub fn login(config_path: Option<PathBuf>, email: String, password: String) -> Result<()> {
    let mut ws = Workspace::open(config_path)?;

    match sign_in(&ws.store, &mut ws.session, &email, &password)? {
        Some(user) => {
            println!("Welcome back, {}!", user.name);
            println!("Signed in as {} ({}).", user.email, user.role);
            Ok(())
        }
        None => anyhow::bail!("Invalid email or password. Try again!"),
    }
}

pub fn logout(config_path: Option<PathBuf>) -> Result<()> {
    let mut ws = Workspace::open(config_path)?;
    sign_out(&mut ws.session)?;
    println!("Logged out successfully!");
    Ok(())
}

pub fn whoami(config_path: Option<PathBuf>) -> Result<()> {
    let mut ws = Workspace::open(config_path)?;
    let user = ws.signed_in()?;
    println!("{} <{}> ({}, id {})", user.name, user.email, user.role, user.id);
    Ok(())
}
