use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::application::LedgerStore;
use crate::domain::{format_amount, Category, Entry, EntryId, Totals};

mod form;

pub use form::EntryForm;

/// Tally - Income & Expense Tracker
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Track your income and expenses, saved automatically to your device")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "TALLY_DATABASE", default_value = "tally.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Income entries
    #[command(subcommand)]
    Income(EntryCommands),

    /// Expense entries
    #[command(subcommand)]
    Expense(EntryCommands),

    /// List entries
    List {
        /// Category to list: income, expense (omit for both)
        category: Option<Category>,
    },

    /// Show total income, total expenses and net total
    Summary,

    /// Clear all data
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum EntryCommands {
    /// Add an entry (ignored unless the description is non-empty and the amount positive)
    Add {
        /// Description (e.g., "Salary", "Rent")
        description: String,

        /// Amount (e.g., "1000" or "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Remove an entry by ID
    Remove {
        /// Entry ID (as shown by `list`)
        id: EntryId,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut store = LedgerStore::open(&self.database).await?;

        match self.command {
            Commands::Income(cmd) => {
                run_entry_command(&mut store, Category::Income, cmd).await?;
            }

            Commands::Expense(cmd) => {
                run_entry_command(&mut store, Category::Expense, cmd).await?;
            }

            Commands::List { category } => {
                let categories = match category {
                    Some(category) => vec![category],
                    None => Category::ALL.to_vec(),
                };
                for (i, category) in categories.into_iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    print!("{}", render_entries(category, store.entries(category)));
                }
            }

            Commands::Summary => {
                print!("{}", render_summary(&store.totals()));
            }

            Commands::Clear { yes } => {
                let cleared = store
                    .clear_all(|prompt| yes || confirm_on_stdin(prompt))
                    .await?;
                if cleared {
                    println!("All data cleared.");
                } else {
                    println!("Cancelled.");
                }
            }
        }

        Ok(())
    }
}

async fn run_entry_command(
    store: &mut LedgerStore,
    category: Category,
    cmd: EntryCommands,
) -> Result<()> {
    match cmd {
        EntryCommands::Add {
            description,
            amount,
        } => {
            let mut form = EntryForm::new(description, amount);
            if let Some(entry) = form.submit(store, category).await? {
                println!(
                    "Added {}: {} {} (id {})",
                    category,
                    entry.description,
                    format_amount(entry.amount),
                    entry.id
                );
            }
        }

        EntryCommands::Remove { id } => {
            if store.remove_entry(category, id).await? {
                println!("Removed {} entry {}", category, id);
            }
        }
    }
    Ok(())
}

/// Render one category's entries as a table.
pub fn render_entries(category: Category, entries: &[Entry]) -> String {
    let title = match category {
        Category::Income => "Income",
        Category::Expense => "Expenses",
    };

    let mut out = format!("{}\n", title);
    if entries.is_empty() {
        out.push_str(&format!("No {} entries yet\n", category));
        return out;
    }

    out.push_str(&format!("{:<15} {:<30} {:>12}\n", "ID", "DESCRIPTION", "AMOUNT"));
    out.push_str(&format!("{}\n", "-".repeat(59)));
    for entry in entries {
        out.push_str(&format!(
            "{:<15} {:<30} {:>12}\n",
            entry.id,
            entry.description,
            format_amount(entry.amount)
        ));
    }
    out
}

/// Render the totals block.
pub fn render_summary(totals: &Totals) -> String {
    let status = if totals.is_surplus() {
        "surplus"
    } else {
        "deficit"
    };
    format!(
        "Total Income:   {:>12}\nTotal Expenses: {:>12}\nNet Total:      {:>12} ({})\n",
        format_amount(totals.income),
        format_amount(totals.expense),
        format_amount(totals.net),
        status
    )
}

fn confirm_on_stdin(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(_) => false,
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
