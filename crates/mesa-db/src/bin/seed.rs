//! # Seed Data Generator
//!
//! Populates a database with a starter menu and demo accounts for
//! development.
//!
//! ## Usage
//! ```bash
//! cargo run -p mesa-db --bin seed
//! cargo run -p mesa-db --bin seed -- --db ./data/mesa.db
//! ```

use chrono::Utc;
use std::env;
use uuid::Uuid;

use mesa_core::{Account, MenuItem, Role};
use mesa_db::{Database, DbConfig};

/// Starter menu: (name, stock, price in the smallest currency unit).
const MENU: &[(&str, i64, i64)] = &[
    ("Burger", 20, 85),
    ("Fries", 30, 45),
    ("Pizza", 12, 120),
    ("Soda", 48, 25),
    ("Salad", 15, 60),
    ("Ice Cream", 24, 40),
];

/// Demo accounts: (name, email, role).
const ACCOUNTS: &[(&str, &str, Role)] = &[
    ("Admin", "admin@mesa.test", Role::Admin),
    ("Cashier One", "cashier@mesa.test", Role::Cashier),
    ("Ana Reyes", "ana@mesa.test", Role::Customer),
    ("Ben Cruz", "ben@mesa.test", Role::Customer),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./mesa_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mesa POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./mesa_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Mesa POS Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("Connected, migrations applied");

    let existing = db.menu().count().await?;
    if existing > 0 {
        println!("Database already has {} menu items; skipping seed.", existing);
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();

    for (name, stock, price) in MENU {
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            stock: *stock,
            price: *price,
            created_at: now,
            updated_at: now,
        };
        db.menu().insert(&item).await?;
    }
    println!("Seeded {} menu items", MENU.len());

    for (name, email, role) in ACCOUNTS {
        let account = Account {
            id: Uuid::new_v4().to_string(),
            role: *role,
            name: (*name).to_string(),
            email: (*email).to_string(),
            points: 0,
            created_at: now,
        };
        db.accounts().insert(&account).await?;
    }
    println!("Seeded {} accounts", ACCOUNTS.len());

    println!();
    println!("Seed complete");

    Ok(())
}
