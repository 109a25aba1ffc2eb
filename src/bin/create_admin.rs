//! CLI tool to bootstrap the first admin account.
//!
//! Usage:
//!   cargo run --bin create-admin -- --name "School Admin" --email admin@example.org --password <password>

use std::env;

use sea_orm_migration::MigratorTrait;

use meritboard_lib::config::Config;
use meritboard_lib::db::{DbPool, users};
use meritboard_lib::migration::Migrator;
use meritboard_lib::models::Role;
use meritboard_lib::services::auth;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut password: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--name" | "-n" => {
                i += 1;
                if i < args.len() {
                    name = Some(args[i].clone());
                }
            }
            "--email" | "-e" => {
                i += 1;
                if i < args.len() {
                    email = Some(args[i].clone());
                }
            }
            "--password" | "-p" => {
                i += 1;
                if i < args.len() {
                    password = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Validate required arguments
    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        eprintln!("Error: --name, --email, and --password are required");
        print_usage();
        std::process::exit(1);
    };

    // Load config and connect
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::connect(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(pool.connection(), None).await {
        eprintln!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    // Refuse duplicates up front for a readable error
    match users::find_by_email(pool.connection(), &email).await {
        Ok(Some(_)) => {
            eprintln!("A user with email '{}' already exists", email);
            std::process::exit(1);
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Failed to check existing users: {}", e);
            std::process::exit(1);
        }
    }

    let password_hash = match auth::hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            eprintln!("Failed to hash password: {}", e);
            std::process::exit(1);
        }
    };

    match users::insert(pool.connection(), &name, &email, Role::Admin, &password_hash).await {
        Ok(user) => {
            println!("Admin account created:");
            println!("  id:    {}", user.id);
            println!("  name:  {}", user.name);
            println!("  email: {}", user.email);
        }
        Err(e) => {
            eprintln!("Failed to create admin account: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Usage: create-admin --name <name> --email <email> --password <password>");
    println!();
    println!("Creates an admin user account. Requires RUST_ENV and database");
    println!("configuration in the environment (see Config::from_env).");
}
