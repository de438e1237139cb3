//! Connection lifecycle, registration, and outbound write behavior.

mod common;

use common::{connected_client, registered_client, MemoryTransport};
use ircling::{ClientError, ClientOptions, ConnectionOptions, IrcClient};

#[test]
fn test_registration_precedes_first_reply() {
    let options = ClientOptions {
        nickname: Some("Bot".to_owned()),
        ..ClientOptions::default()
    };
    let (mut client, written) = connected_client(options);

    client.dispatch("PING :first").unwrap();

    assert_eq!(
        *written.borrow(),
        vec![
            "USER Bot * * :Bot\r\n".to_owned(),
            "NICK Bot\r\n".to_owned(),
            "PONG :first\r\n".to_owned(),
        ]
    );
}

#[test]
fn test_registration_fires_once_per_connection() {
    let options = ClientOptions {
        nickname: Some("Bot".to_owned()),
        ..ClientOptions::default()
    };
    let (mut client, written) = connected_client(options);

    client.dispatch_all("PING :a\r\nPING :b\r\n").unwrap();

    let user_lines = written
        .borrow()
        .iter()
        .filter(|line| line.starts_with("USER"))
        .count();
    assert_eq!(user_lines, 1);
}

#[test]
fn test_reconnect_rearms_registration() {
    let (mut client, written) = registered_client();

    client.disconnect().unwrap();
    client.connect().unwrap();
    client.dispatch("PING :again").unwrap();

    assert!(written.borrow()[0].starts_with("USER Bot"));
}

#[test]
fn test_connect_without_nickname_fails() {
    let transport = MemoryTransport::default();
    let mut client = IrcClient::new(Box::new(transport), ClientOptions::default());

    assert!(matches!(client.connect(), Err(ClientError::NickRequired)));
    assert!(!client.is_connected());
}

#[test]
fn test_send_without_connection_fails() {
    let transport = MemoryTransport::default();
    let mut client = IrcClient::new(Box::new(transport), ClientOptions::default());

    assert!(matches!(
        client.send("PING :x"),
        Err(ClientError::NotConnected)
    ));
}

#[test]
fn test_say_sends_one_privmsg_per_line() {
    let (mut client, written) = registered_client();

    client.say("#room", "first\nsecond\n\n  third  ").unwrap();

    assert_eq!(
        *written.borrow(),
        vec![
            "PRIVMSG #room :first\r\n".to_owned(),
            "PRIVMSG #room :second\r\n".to_owned(),
            "PRIVMSG #room :third\r\n".to_owned(),
        ]
    );
}

#[test]
fn test_join_normalizes_and_tracks() {
    let (mut client, written) = registered_client();

    client.join("room").unwrap();

    assert_eq!(*written.borrow(), vec!["JOIN #room\r\n".to_owned()]);
    assert!(client.channel("#room").is_some());
}

#[test]
fn test_part_only_known_channels() {
    let (mut client, written) = registered_client();

    client.part("#elsewhere").unwrap();
    assert!(written.borrow().is_empty());

    client.join("#room").unwrap();
    client.part("#room").unwrap();
    assert_eq!(
        written.borrow().last().map(String::as_str),
        Some("PART #room\r\n")
    );
}

#[test]
fn test_configured_channels_have_state_before_connecting() {
    let options = ClientOptions {
        nickname: Some("Bot".to_owned()),
        channels: vec!["#a".to_owned(), "b".to_owned()],
        ..ClientOptions::default()
    };
    let transport = MemoryTransport::default();
    let client = IrcClient::new(Box::new(transport), options);

    assert!(client.channel("#a").is_some());
    assert!(client.channel("#b").is_some());
}

#[test]
fn test_flood_protection_queues_until_ticked() {
    let options = ClientOptions {
        nickname: Some("Bot".to_owned()),
        connection: ConnectionOptions {
            flood_protection_delay_ms: 500,
        },
        ..ClientOptions::default()
    };
    let (mut client, written) = connected_client(options);

    client.say("#room", "one\ntwo").unwrap();
    assert!(written.borrow().is_empty());

    assert!(client.tick().unwrap());
    assert_eq!(*written.borrow(), vec!["PRIVMSG #room :one\r\n".to_owned()]);

    assert!(client.tick().unwrap());
    assert!(!client.tick().unwrap());
    assert_eq!(written.borrow().len(), 2);
}

#[test]
fn test_set_nickname_before_connecting_is_silent() {
    let transport = MemoryTransport::default();
    let mut client = IrcClient::new(Box::new(transport), ClientOptions::default());

    client.set_nickname("Bot").unwrap();
    assert_eq!(client.nickname(), Some("Bot"));
    assert!(client.connect().is_ok());
}

#[test]
fn test_set_nickname_announces_change_when_connected() {
    let (mut client, written) = registered_client();

    client.set_nickname("Bot2").unwrap();

    assert_eq!(*written.borrow(), vec!["NICK :Bot2\r\n".to_owned()]);
    assert_eq!(client.nickname(), Some("Bot2"));
}
