//! Line-oriented terminal front end for the shell.

use core::str::FromStr;
use std::io::Write;

use bakery_core::{CategoryFilter, DomainError, ProductId};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::FormError;
use crate::shell::{Shell, View};
use crate::views::StatusViewState;

pub const HELP: &str = "\
Commands:
  products            show the catalog
  filter <category>   all | bread | pastry | cake | cookie
  order               open the order form
  name <your name>    set the customer name
  toggle <id>         select or unselect a product
  submit              place the order
  cancel              leave the order form
  status              show the current order
  watch               follow the current order until it settles
  back                back to products (forgets the current order)
  goto <view>         products | placeOrder | orderStatus
  help                this text
  quit                exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Filter(CategoryFilter),
    OpenOrderForm,
    SetName(String),
    Toggle(ProductId),
    Submit,
    Cancel,
    ShowOrder,
    Watch,
    Back,
    Goto(View),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    InvalidId(#[from] DomainError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let needs = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "products" | "p" => Command::Products,
            "filter" => {
                let Ok(filter) = needs("filter")?.parse::<CategoryFilter>();
                Command::Filter(filter)
            }
            "order" => Command::OpenOrderForm,
            "name" => Command::SetName(needs("name")?.to_string()),
            "toggle" | "t" => Command::Toggle(needs("toggle")?.parse()?),
            "submit" => Command::Submit,
            "cancel" => Command::Cancel,
            "status" => Command::ShowOrder,
            "watch" => Command::Watch,
            "back" => Command::Back,
            "goto" => Command::Goto(View::parse(needs("goto")?)),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Apply one command. Returns a note to print above the view, if any.
pub async fn execute(shell: &mut Shell, command: Command) -> Option<String> {
    match command {
        Command::Products => shell.navigate(View::Products),
        Command::Filter(filter) => {
            shell.set_filter(filter);
            shell.navigate(View::Products);
        }
        Command::OpenOrderForm => shell.open_order_form(),
        Command::SetName(name) => {
            if let Err(e) = shell.set_customer_name(name) {
                return Some(e.to_string());
            }
        }
        Command::Toggle(id) => {
            if let Err(e) = shell.toggle_product(id) {
                return Some(e.to_string());
            }
        }
        Command::Submit => {
            if shell.order_form().is_none() {
                return Some(FormError::NotOpen.to_string());
            }
            shell.submit_order().await;
        }
        Command::Cancel => shell.cancel_order(),
        Command::ShowOrder => {
            if shell.state().order_id.is_none() {
                return Some("No order has been placed yet".to_string());
            }
            shell.navigate(View::OrderStatus);
        }
        Command::Back => shell.back_to_products(),
        Command::Goto(view) => shell.navigate(view),
        Command::Watch | Command::Help | Command::Quit => {}
    }
    None
}

/// Print every settled-or-loaded state of the shown order until polling stops.
pub async fn watch_order<W: Write>(shell: &Shell, out: &mut W) -> std::io::Result<()> {
    let Some(view) = shell.status_view() else {
        writeln!(out, "No order is being shown (try `status`).")?;
        return Ok(());
    };

    let mut rx = view.subscribe();
    loop {
        let state = rx.borrow_and_update().clone();
        if state != StatusViewState::Loading {
            writeln!(out, "{}", view.render())?;
        }
        if state.is_settled() {
            break;
        }
        if rx.changed().await.is_err() {
            break;
        }
    }
    Ok(())
}

/// Read commands from `input` until EOF or `quit`, rendering after each one.
pub async fn run<R, W>(shell: &mut Shell, input: R, out: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", shell.render())?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "? {e} (type `help`)")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Watch => watch_order(shell, out).await?,
            command => {
                if let Some(note) = execute(shell, command).await {
                    writeln!(out, "? {note}")?;
                }
                writeln!(out, "{}", shell.render())?;
            }
        }
        out.flush()?;
    }

    Ok(())
}
