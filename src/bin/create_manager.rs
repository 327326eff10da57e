//! Creates a manager account so a fresh installation can be administered.
//!
//! ```bash
//! cargo run --bin create_manager -- --username admin --password 'long-secret' --name "Head Manager"
//! ```
//!
//! Uses the same configuration as the server, so `APP_ENVIRONMENT` and the
//! `APP_DATABASE__*` overrides apply here too.

use std::env;

use anyhow::Context;
use restaurant_pos::{
    configuration::Settings,
    db_interaction::user::{insert_user, NewUser},
    domain::Role,
    utils::{get_connection_pool, run_migrations}
};
use secrecy::SecretString;

const USAGE: &str = "Usage: create_manager --username <USERNAME> --password <PASSWORD> [--name <NAME>]";

#[tokio::main]
async fn main() -> anyhow::Result<()>{
    let args: Vec<String> = env::args().collect();

    let mut username = None;
    let mut password = None;
    let mut name = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--username" | "-u" => {
                username = args.get(i + 1).cloned();
                i += 1;
            }
            "--password" | "-p" => {
                password = args.get(i + 1).cloned();
                i += 1;
            }
            "--name" | "-n" => {
                name = args.get(i + 1).cloned();
                i += 1;
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            other => anyhow::bail!("Unknown argument {}\n{}", other, USAGE)
        }
        i += 1;
    }

    let username = username.context(USAGE)?;
    let password = password.context(USAGE)?;
    if password.chars().count() < 8 {
        anyhow::bail!("Password must be at least 8 characters long");
    }

    let settings = Settings::get()?;
    let pool = get_connection_pool(&settings.database);
    run_migrations(&pool).await?;

    let conn = pool.get().context("Failed to connect to the database")?;
    let user = insert_user(conn, NewUser{
        name: name.unwrap_or_else(|| username.clone()),
        username,
        password: SecretString::from(password),
        email: None,
        phone_number: None,
        role: Role::Manager
    })
    .await
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    println!("Created manager {} ({})", user.username, user.user_id);
    Ok(())
}
