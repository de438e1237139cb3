//! # ircling
//!
//! A sans-IO IRC client core: raw protocol lines in, typed messages,
//! channel bookkeeping, and named events out.
//!
//! The core owns no socket and no timers. An embedder supplies a
//! [`Transport`] for outbound writes and feeds received data into
//! [`IrcClient::dispatch_all`]; the client parses each line, classifies it
//! into a closed set of typed messages, applies its side effects (PONG
//! replies, membership and mode bookkeeping, auto-rejoin), and republishes
//! it as named events to registered callbacks.
//!
//! ```no_run
//! use ircling::{ClientOptions, EventArg, IrcClient, Transport};
//! # struct Tcp;
//! # impl Transport for Tcp {
//! #     fn open(&mut self) -> ircling::Result<()> { Ok(()) }
//! #     fn close(&mut self) -> ircling::Result<()> { Ok(()) }
//! #     fn is_connected(&self) -> bool { true }
//! #     fn write(&mut self, _: &str) -> ircling::Result<()> { Ok(()) }
//! # }
//!
//! # fn main() -> ircling::Result<()> {
//! let options = ClientOptions {
//!     nickname: Some("ircling".to_owned()),
//!     ..ClientOptions::default()
//! };
//! let mut client = IrcClient::new(Box::new(Tcp), options);
//!
//! client.on("message", |event| {
//!     if let [EventArg::Text(user), EventArg::Channel(channel), EventArg::Text(text)] =
//!         event.args()
//!     {
//!         println!("{} <{user}> {text}", channel.name());
//!     }
//! });
//!
//! client.connect()?;
//! client.dispatch_all(":srv 001 ircling :Welcome\r\nPING :token\r\n")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error policy
//!
//! Structural failures are raised, not degraded: a channel-bearing message
//! without a usable channel name or a PART line that misses its fixed
//! pattern fails [`IrcClient::dispatch`] with a typed [`ClientError`].
//! Commands the core does not model pass through as generic messages with
//! no state change and no events.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod channel;
pub mod client;
pub mod connection;
pub mod error;
pub mod event;
pub mod message;
pub mod options;

pub use channel::{ChannelSnapshot, IrcChannel, ModeFlag};
pub use client::{ClientSnapshot, IrcClient};
pub use connection::{ConnectionSnapshot, IrcConnection, Transport};
pub use error::{ClientError, Result};
pub use event::{names, Callback, Event, EventArg, Handlers};
pub use message::variants::TypedMessage;
pub use message::{classify, parse_line, split_lines, Kind, RawMessage};
pub use options::{ClientOptions, ConnectionOptions, VERSION_DEFAULT};
