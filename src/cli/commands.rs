use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::application::{AppError, LedgerService};
use crate::domain::{format_cents, Kind, Transaction, TransactionFilter};

use super::console::{ask, ask_amount, ask_choice, ask_id, say, Console, InputClosed};

const DEFAULT_EXPORT_FILE: &str = "export.json";

/// Every command the interactive loop understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    View,
    Summary,
    Balance,
    Export,
    Import,
    Delete,
    Help,
    Exit,
}

impl Command {
    /// Commands in the order `help` lists them.
    pub const ALL: [Command; 9] = [
        Command::Add,
        Command::View,
        Command::Summary,
        Command::Balance,
        Command::Export,
        Command::Import,
        Command::Delete,
        Command::Help,
        Command::Exit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::View => "view",
            Command::Summary => "summary",
            Command::Balance => "balance",
            Command::Export => "export",
            Command::Import => "import",
            Command::Delete => "delete",
            Command::Help => "help",
            Command::Exit => "exit/quit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Add => "Add a new income or expense transaction",
            Command::View => "List transactions, optionally filtered by type or category",
            Command::Summary => "Show total income, total expense and the current balance",
            Command::Balance => "Show the current balance",
            Command::Export => "Export all transactions to a JSON file",
            Command::Import => "Replace the ledger with transactions from a JSON file",
            Command::Delete => "Delete a transaction by its ID",
            Command::Help => "Show this help message",
            Command::Exit => "Exit the program",
        }
    }
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Command::Add),
            "view" => Ok(Command::View),
            "summary" => Ok(Command::Summary),
            "balance" => Ok(Command::Balance),
            "export" => Ok(Command::Export),
            "import" => Ok(Command::Import),
            "delete" => Ok(Command::Delete),
            "help" => Ok(Command::Help),
            "exit" | "quit" => Ok(Command::Exit),
            other => Err(AppError::UnknownCommand(other.to_string())),
        }
    }
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// The interactive session: reads commands from a console and runs them against the ledger.
pub struct Session<C> {
    service: LedgerService,
    console: C,
}

impl<C: Console> Session<C> {
    pub fn new(service: LedgerService, console: C) -> Self {
        Self { service, console }
    }

    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    pub fn into_parts(self) -> (LedgerService, C) {
        (self.service, self.console)
    }

    /// Run until exit/quit or end of input.
    /// Errors from a single command are reported and never end the loop.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(line) = self
                .console
                .read_line("Ledger >")
                .context("Failed to read command")?
            else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match self.dispatch(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => return Ok(()),
                Err(e) if e.is::<InputClosed>() => break,
                Err(e) => {
                    log::debug!("command '{}' failed: {:?}", line.trim(), e);
                    say(&mut self.console, format!("Error: {}", e))?;
                }
            }
        }

        log::debug!("input closed, leaving command loop");
        Ok(())
    }

    /// Parse and execute one line of input.
    pub fn dispatch(&mut self, line: &str) -> Result<Flow> {
        let command: Command = line.parse()?;
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Add => self.handle_add()?,
            Command::View => self.handle_view()?,
            Command::Summary => self.handle_summary()?,
            Command::Balance => self.handle_balance()?,
            Command::Export => self.handle_export()?,
            Command::Import => self.handle_import()?,
            Command::Delete => self.handle_delete()?,
            Command::Help => self.show_help()?,
            Command::Exit => {
                say(&mut self.console, "Goodbye! Data saved.")?;
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    pub fn show_help(&mut self) -> Result<()> {
        say(&mut self.console, "Available commands:")?;
        for command in Command::ALL {
            say(
                &mut self.console,
                format!("  {:<10} {}", command.name(), command.description()),
            )?;
        }
        Ok(())
    }

    fn handle_add(&mut self) -> Result<()> {
        let kind: Kind = ask_choice(
            &mut self.console,
            "Is this income or expense?",
            &["income", "expense"],
            "expense",
        )?
        .parse()
        .map_err(anyhow::Error::msg)?;
        let category = ask(&mut self.console, "Enter category (e.g. Salary, Groceries)", None)?;
        let amount = ask_amount(&mut self.console, "Enter amount")?;
        let description = ask(&mut self.console, "Enter a brief description", None)?;

        if amount <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be greater than zero. Transaction cancelled".to_string(),
            )
            .into());
        }

        let transaction = self.service.add(kind, category, amount, description)?;
        say(
            &mut self.console,
            format!(
                "{} transaction added! ID: {}",
                capitalize(transaction.kind.as_str()),
                transaction.id
            ),
        )
    }

    fn handle_view(&mut self) -> Result<()> {
        let choice = ask(
            &mut self.console,
            "Filter by type (income/expense) or category? (type 'all' for everything)",
            Some("all"),
        )?
        .to_lowercase();

        let (filter, title) = match choice.as_str() {
            "all" => (TransactionFilter::All, "Full Transaction History".to_string()),
            "income" | "expense" => {
                let kind: Kind = choice.parse().map_err(anyhow::Error::msg)?;
                (
                    TransactionFilter::Kind(kind),
                    format!("{} Transactions", capitalize(kind.as_str())),
                )
            }
            "category" => {
                let category = ask(&mut self.console, "Enter category to filter by", None)?;
                let title = format!(
                    "Transactions in Category: {}",
                    capitalize(&category.to_lowercase())
                );
                (TransactionFilter::Category(category), title)
            }
            _ => return Err(AppError::InvalidFilter(choice).into()),
        };

        let transactions = self.service.filter(&filter);
        render_transactions(&mut self.console, &transactions, &title)
    }

    fn handle_summary(&mut self) -> Result<()> {
        let summary = self.service.summary()?;

        say(&mut self.console, "Financial Summary")?;
        say(&mut self.console, "-".repeat(32))?;
        say(
            &mut self.console,
            format!("{:<18} {:>13}", "Total Income", format_cents(summary.income)),
        )?;
        say(
            &mut self.console,
            format!("{:<18} {:>13}", "Total Expense", format_cents(summary.expense)),
        )?;
        say(
            &mut self.console,
            format!("{:<18} {:>13}", "Current Balance", format_cents(summary.net())),
        )
    }

    fn handle_balance(&mut self) -> Result<()> {
        let balance = self.service.balance()?;
        say(
            &mut self.console,
            format!("Your current balance is: {}", format_cents(balance)),
        )
    }

    fn handle_export(&mut self) -> Result<()> {
        let filename = ask(
            &mut self.console,
            "Enter the filename to export to",
            Some(DEFAULT_EXPORT_FILE),
        )?;
        let count = self.service.export(Path::new(&filename))?;
        say(
            &mut self.console,
            format!("Exported {} transaction(s) to {}", count, filename),
        )
    }

    fn handle_import(&mut self) -> Result<()> {
        let filename = ask(
            &mut self.console,
            "Enter the filename to import from",
            Some(DEFAULT_EXPORT_FILE),
        )?;
        let count = self.service.import(Path::new(&filename))?;
        say(
            &mut self.console,
            format!("Imported {} transaction(s) from {}", count, filename),
        )
    }

    fn handle_delete(&mut self) -> Result<()> {
        let id = ask_id(
            &mut self.console,
            "Enter the ID of the transaction to delete",
        )?;
        let removed = self.service.delete(id)?;
        say(
            &mut self.console,
            format!("Transaction ID {} deleted.", removed.id),
        )
    }
}

fn render_transactions<C: Console + ?Sized>(
    console: &mut C,
    transactions: &[&Transaction],
    title: &str,
) -> Result<()> {
    if transactions.is_empty() {
        return say(console, format!("No transactions found for {}.", title));
    }

    say(console, title)?;
    say(
        console,
        format!(
            "{:<5} {:<20} {:<8} {:<15} {:>12}  {}",
            "ID", "DATE", "TYPE", "CATEGORY", "AMOUNT", "DESCRIPTION"
        ),
    )?;
    say(console, "-".repeat(80))?;
    for tx in transactions {
        say(
            console,
            format!(
                "{:<5} {:<20} {:<8} {:<15} {:>12}  {}",
                tx.id,
                tx.formatted_timestamp(),
                capitalize(tx.kind.as_str()),
                truncate(&capitalize(&tx.category.to_lowercase()), 15),
                format_cents(tx.signed_amount()),
                tx.description
            ),
        )?;
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("add".parse::<Command>().unwrap(), Command::Add);
        assert_eq!(" VIEW ".parse::<Command>().unwrap(), Command::View);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Exit);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = "transfer".parse::<Command>().unwrap_err();
        assert!(matches!(err, AppError::UnknownCommand(ref c) if c == "transfer"));
    }

    #[test]
    fn test_every_command_round_trips_through_its_name() {
        for command in Command::ALL {
            let name = command.name().split('/').next().unwrap();
            assert_eq!(name.parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn test_capitalize_and_truncate() {
        assert_eq!(capitalize("income"), "Income");
        assert_eq!(capitalize(""), "");
        assert_eq!(truncate("Groceries", 15), "Groceries");
        assert_eq!(truncate("Entertainment and leisure", 15), "Entertainmen...");
    }
}
