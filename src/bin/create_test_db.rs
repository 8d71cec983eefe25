use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;

use sage_ledger::{AccountType, initialize_db};

/// A utility for creating a test database for the REST API server of the Sage ledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let now = OffsetDateTime::now_utc();

    println!("Creating test accounts...");

    for (name, account_type, balance) in [
        ("Cash", AccountType::CurrentAssets, 1500.0),
        ("Product Sales", AccountType::Sales, 12000.0),
        ("Cost of Goods Sold", AccountType::CostOfSales, 4800.0),
        ("Rent", AccountType::Expenses, 0.0),
        ("Owner's Capital", AccountType::OwnersEquity, 10000.0),
    ] {
        conn.execute(
            "INSERT INTO account (name, account_type, balance, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)",
            (name, account_type.as_str(), balance, now),
        )?;
    }

    println!("Creating test bank account...");

    conn.execute(
        "INSERT INTO bank_account (
            name, account_number, bank_name, opening_balance, opening_balance_date,
            created_at, updated_at
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?5, ?5)",
        ("Operating Account", "1234567890", "Default Bank", 1500.0, now),
    )?;

    println!("Success!");

    Ok(())
}
