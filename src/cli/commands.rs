use super::args::{CliArgs, Command};
use crate::core::Session;
use crate::io::{hash, write_accounts_csv};
use crate::types::{AccountKind, AccountType};
use std::io::Write;

/// Execute the parsed command, writing its result to `output`
///
/// # Returns
///
/// * `Ok(())` if the command completed
/// * `Err(String)` describing the failure otherwise
pub fn execute(args: &CliArgs, output: &mut dyn Write) -> Result<(), String> {
    if let Command::Hash { text } = &args.command {
        return writeln!(output, "{}", hash(text)).map_err(write_failed);
    }

    let session = Session::open(args.to_store_config(), args.operator.as_str());

    match &args.command {
        Command::List => {
            let accounts = session.accounts().map_err(|e| e.to_string())?;
            write_accounts_csv(&accounts, output)?;
        }
        Command::NextNumber => {
            let number = session.next_account_number().map_err(|e| e.to_string())?;
            writeln!(output, "{}", number).map_err(write_failed)?;
        }
        Command::Open {
            kind,
            name,
            balance,
        } => {
            let kind = AccountKind::defaults(AccountType::from(*kind));
            let account = session
                .open_account(name, kind, *balance)
                .map_err(|e| e.to_string())?;
            writeln!(output, "{}", account).map_err(write_failed)?;
        }
        Command::Deposit { number, amount } => {
            let account = session
                .deposit(*number, *amount)
                .map_err(|e| e.to_string())?;
            writeln!(output, "{}", account).map_err(write_failed)?;
        }
        Command::Withdraw { number, amount } => {
            let account = session
                .withdraw(*number, *amount)
                .map_err(|e| e.to_string())?;
            writeln!(output, "{}", account).map_err(write_failed)?;
        }
        Command::Check { number, amount } => {
            let account = session
                .write_check(*number, *amount)
                .map_err(|e| e.to_string())?;
            writeln!(output, "{}", account).map_err(write_failed)?;
        }
        Command::Transfer { from, to, amount } => {
            let (debited, credited) = session
                .transfer(*from, *to, *amount)
                .map_err(|e| e.to_string())?;
            writeln!(output, "{}", debited).map_err(write_failed)?;
            writeln!(output, "{}", credited).map_err(write_failed)?;
        }
        Command::Rename { number, name } => {
            let account = session
                .rename(*number, name)
                .map_err(|e| e.to_string())?;
            writeln!(output, "{}", account).map_err(write_failed)?;
        }
        Command::Redeem { number } => {
            let (account, paid_out) = session
                .redeem_certificate(*number)
                .map_err(|e| e.to_string())?;
            writeln!(output, "Paid out ${:.2}", paid_out).map_err(write_failed)?;
            writeln!(output, "{}", account).map_err(write_failed)?;
        }
        Command::Close { number } => {
            session.close_account(*number).map_err(|e| e.to_string())?;
            writeln!(output, "Closed account {}", number).map_err(write_failed)?;
        }
        Command::Monthly => {
            let count = session
                .post_monthly_statements()
                .map_err(|e| e.to_string())?;
            writeln!(output, "Posted {} monthly statements", count).map_err(write_failed)?;
        }
        Command::Hash { .. } => {}
    }

    Ok(())
}

fn write_failed(e: std::io::Error) -> String {
    format!("Failed to write output: {}", e)
}
