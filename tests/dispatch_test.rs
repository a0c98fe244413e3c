//! End-to-end dispatch through the built-in commands
//! Run with: cargo test --test dispatch_test

use std::sync::{Arc, Once};

use wabot::application::messaging::{Dispatch, Dispatcher};
use wabot::domain::entities::{MessageData, MessageKey, QuotedMessage};
use wabot::domain::traits::OutgoingContent;
use wabot::infrastructure::adapters::memory::MemoryClient;
use wabot::infrastructure::config::{Config, Mode};
use wabot::plugins;

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn dispatcher(mode: Mode) -> Dispatcher {
    let mut config = Config::default();
    config.bot.mode = mode;
    config.sudo = vec!["+1 555 0100".to_string()];

    plugins::dispatcher(config).expect("built-in commands register")
}

fn from(sender: &str, chat: &str, text: &str) -> MessageData {
    MessageData::text(MessageKey::new("INCOMING1", chat, false), sender, text)
}

/// Ping is public, so strangers may use it even in private mode
#[tokio::test]
async fn ping_round_trip_in_private_mode() {
    ensure_init();
    let client = Arc::new(MemoryClient::new());

    let outcome = dispatcher(Mode::Private)
        .dispatch(client.clone(), from("999@s.whatsapp.net", "999@s.whatsapp.net", ".PING"))
        .await
        .expect("dispatch");

    assert_eq!(outcome, Dispatch::Executed("ping".to_string()));
    let sent = client.sent();
    assert_eq!(sent.len(), 2);
    assert!(matches!(&sent[1].content, OutgoingContent::Edit { key, .. } if key.id == "INCOMING1"));
}

/// Non-public commands need sudo in private mode
#[tokio::test]
async fn private_commands_need_sudo() {
    ensure_init();
    let d = dispatcher(Mode::Private);
    let client = Arc::new(MemoryClient::new());

    let stranger = d
        .dispatch(client.clone(), from("999@s.whatsapp.net", "999@s.whatsapp.net", ".jid"))
        .await
        .expect("dispatch");
    assert_eq!(stranger, Dispatch::Denied("jid".to_string()));
    assert!(client.sent().is_empty());

    let sudo = d
        .dispatch(client.clone(), from("15550100@s.whatsapp.net", "15550100@s.whatsapp.net", ".jid"))
        .await
        .expect("dispatch");
    assert_eq!(sudo, Dispatch::Executed("jid".to_string()));
    assert_eq!(client.texts(), vec!["```15550100@s.whatsapp.net```".to_string()]);
}

/// In a group, `jid` resolves the quoted sender
#[tokio::test]
async fn jid_uses_quoted_sender_in_groups() {
    ensure_init();
    let client = Arc::new(MemoryClient::new());
    let mut data = from("999@s.whatsapp.net", "120363@g.us", ".jid");
    data.quoted = Some(QuotedMessage {
        key: MessageKey::new("Q", "120363@g.us", false),
        sender: "444@s.whatsapp.net".to_string(),
        ..Default::default()
    });

    let outcome = dispatcher(Mode::Public).dispatch(client.clone(), data).await.expect("dispatch");
    assert_eq!(outcome, Dispatch::Executed("jid".to_string()));
    assert_eq!(client.texts(), vec!["```444@s.whatsapp.net```".to_string()]);
}

/// The menu lists visible commands with the configured prefix
#[tokio::test]
async fn menu_lists_visible_commands() {
    ensure_init();
    let client = Arc::new(MemoryClient::new());

    dispatcher(Mode::Public)
        .dispatch(client.clone(), from("1@s.whatsapp.net", "1@s.whatsapp.net", ".help"))
        .await
        .expect("dispatch");

    let texts = client.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains(".menu"));
    assert!(texts[0].contains(".uptime"));
    assert!(!texts[0].contains(".ping"));
}

/// Text without the prefix never reaches a command
#[tokio::test]
async fn unprefixed_text_is_ignored() {
    ensure_init();
    let client = Arc::new(MemoryClient::new());
    let outcome = dispatcher(Mode::Public)
        .dispatch(client.clone(), from("1@s.whatsapp.net", "1@s.whatsapp.net", "ping"))
        .await
        .expect("dispatch");
    assert_eq!(outcome, Dispatch::NoMatch);
    assert!(client.sent().is_empty());
}
