//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use ircling::{ClientOptions, Event, IrcClient, Result, Transport};

/// In-memory transport recording every written line.
#[derive(Default)]
pub struct MemoryTransport {
    open: bool,
    written: Rc<RefCell<Vec<String>>>,
}

impl Transport for MemoryTransport {
    fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.open
    }

    fn write(&mut self, line: &str) -> Result<()> {
        self.written.borrow_mut().push(line.to_owned());
        Ok(())
    }
}

/// A connected client plus the lines it writes.
pub fn connected_client(options: ClientOptions) -> (IrcClient, Rc<RefCell<Vec<String>>>) {
    let written = Rc::new(RefCell::new(Vec::new()));
    let transport = MemoryTransport {
        open: false,
        written: Rc::clone(&written),
    };

    let mut client = IrcClient::new(Box::new(transport), options);
    client.connect().expect("connect");
    (client, written)
}

/// A connected client named `Bot` that has already sent its USER/NICK
/// registration, with the write log cleared.
pub fn registered_client() -> (IrcClient, Rc<RefCell<Vec<String>>>) {
    let options = ClientOptions {
        nickname: Some("Bot".to_owned()),
        ..ClientOptions::default()
    };
    let (mut client, written) = connected_client(options);

    client
        .dispatch(":irc.example.net 001 Bot :Welcome")
        .expect("dispatch welcome");
    written.borrow_mut().clear();

    (client, written)
}

/// Collect every event published under `name`.
pub fn record_events(client: &mut IrcClient, name: &str) -> Rc<RefCell<Vec<Event>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    client.on(name.to_owned(), move |event| {
        log.borrow_mut().push(event.clone());
    });
    seen
}

/// Collect the names of all published events, in order.
pub fn record_event_names(client: &mut IrcClient) -> Rc<RefCell<Vec<String>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    client.on_global(move |event| {
        log.borrow_mut().push(event.name().to_owned());
    });
    seen
}
