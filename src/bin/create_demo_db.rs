use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use expenseur_rs::{NewExpense, create_expense, create_user, initialize_db};

/// A utility for creating a pre-seeded database for manually testing the
/// expenseur_rs REST API server.
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

    println!("Creating demo user...");
    let user = create_user("testuser", "test@example.com", &conn)?;

    println!("Creating sample expenses...");
    let sample_expenses = [
        ("Lunch", 15.5, date!(2024 - 11 - 10), "Food"),
        ("Taxi", 30.0, date!(2024 - 11 - 11), "Travel"),
        ("Electricity Bill", 75.5, date!(2024 - 11 - 01), "Utilities"),
    ];

    for (title, amount, date, category) in sample_expenses {
        create_expense(
            NewExpense {
                user_id: user.id,
                title: title.to_owned(),
                amount,
                date,
                category: category.to_owned(),
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
