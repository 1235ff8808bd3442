use anyhow::{anyhow, bail, Context};
use market_core::{keys, ListingId, LiveEvent, Msg};
use market_engine::live;

pub const HELP: &str = "\
commands:
  next | prev                 page through results
  set <key> <value>           set a filter (e.g. set category_id 3)
  clear <key>                 clear a filter
  sort [option]               sort by price_asc, price_desc, created_at, stars, ...
  search <text>               full-text query
  go <location>               open a location such as /search?nav=new
  open <id> | close           open a listing, return to the grid
  back                        step back in history
  add <id> | remove <id>      edit the cart
  qty <id> <n>                set a cart quantity (0 removes)
  cart                        show the cart
  bid <amount>                bid on the open listing
  password <new> <confirm>    change the account password
  event <frame>               feed a real-time socket frame
  help | quit";

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Next,
    Previous,
    Set { key: String, value: String },
    Clear { key: String },
    Sort(Option<String>),
    Search(String),
    Go(String),
    Open(ListingId),
    Close,
    Back,
    Add(ListingId),
    Remove(ListingId),
    Quantity { listing_id: ListingId, quantity: u32 },
    Cart,
    Bid(String),
    Password { password: String, confirmation: String },
    Event(String),
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "quit" | "exit" | "q" => Command::Quit,
            "help" | "?" => Command::Help,
            "next" | "n" => Command::Next,
            "prev" | "previous" | "p" => Command::Previous,
            "set" => {
                let (key, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| anyhow!("usage: set <key> <value>"))?;
                Command::Set {
                    key: key.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "clear" => Command::Clear {
                key: required(rest, "usage: clear <key>")?,
            },
            "sort" => Command::Sort((!rest.is_empty()).then(|| rest.to_string())),
            "search" => Command::Search(rest.to_string()),
            "go" => Command::Go(required(rest, "usage: go <location>")?),
            "open" => Command::Open(listing_id(rest)?),
            "close" => Command::Close,
            "back" => Command::Back,
            "add" => Command::Add(listing_id(rest)?),
            "remove" | "rm" => Command::Remove(listing_id(rest)?),
            "qty" => {
                let (id, quantity) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| anyhow!("usage: qty <id> <n>"))?;
                Command::Quantity {
                    listing_id: listing_id(id)?,
                    quantity: quantity
                        .trim()
                        .parse()
                        .with_context(|| format!("`{}` is not a quantity", quantity.trim()))?,
                }
            }
            "cart" => Command::Cart,
            "bid" => Command::Bid(rest.to_string()),
            "password" => {
                let mut words = rest.split_whitespace();
                match (words.next(), words.next(), words.next()) {
                    (Some(password), Some(confirmation), None) => Command::Password {
                        password: password.to_string(),
                        confirmation: confirmation.to_string(),
                    },
                    _ => bail!("usage: password <new> <confirm>"),
                }
            }
            "event" => Command::Event(required(rest, "usage: event <frame>")?),
            "" => bail!("type `help` for commands"),
            other => bail!("unknown command `{other}`; type `help`"),
        };
        Ok(command)
    }

    /// The message this command feeds into the update loop, if it maps to one.
    pub fn into_msg(self) -> Option<Msg> {
        let msg = match self {
            Command::Next => Msg::NextPageClicked,
            Command::Previous => Msg::PreviousPageClicked,
            Command::Set { key, value } => Msg::FilterChanged {
                key,
                value: Some(value),
            },
            Command::Clear { key } => Msg::FilterChanged { key, value: None },
            Command::Sort(value) => Msg::FilterChanged {
                key: keys::SORT.to_string(),
                value,
            },
            Command::Search(text) => Msg::FilterChanged {
                key: keys::QUERY.to_string(),
                value: Some(text),
            },
            Command::Open(listing_id) => Msg::ListingOpened { listing_id },
            Command::Close => Msg::ListingClosed,
            Command::Add(listing_id) => Msg::AddToCart { listing_id },
            Command::Remove(listing_id) => Msg::RemoveFromCart { listing_id },
            Command::Quantity {
                listing_id,
                quantity,
            } => Msg::CartQuantityChanged {
                listing_id,
                quantity,
            },
            Command::Bid(amount) => Msg::BidSubmitted { amount },
            Command::Password {
                password,
                confirmation,
            } => Msg::PasswordSubmitted {
                password,
                confirmation,
            },
            Command::Event(frame) => {
                let name = live::event_name(&frame)?;
                Msg::Live(LiveEvent::from_name(&name)?)
            }
            Command::Quit
            | Command::Help
            | Command::Go(_)
            | Command::Back
            | Command::Cart => return None,
        };
        Some(msg)
    }
}

fn required(rest: &str, usage: &str) -> anyhow::Result<String> {
    if rest.is_empty() {
        bail!("{usage}");
    }
    Ok(rest.to_string())
}

fn listing_id(rest: &str) -> anyhow::Result<ListingId> {
    rest.parse()
        .with_context(|| format!("`{rest}` is not a listing id"))
}
