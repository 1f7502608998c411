use super::Message;
use crate::domain::models::Usage;

#[test]
fn it_executes_user() {
    let msg = Message::user("1700000000000", "Bonjour");
    assert!(msg.is_user);
    assert_eq!(msg.id, "1700000000000");
    assert_eq!(msg.text, "Bonjour".to_string());
    assert!(msg.metadata.is_none());
    assert_eq!(msg.author_label(), "Vous");
}

#[test]
fn it_executes_assistant_keeping_tabs() {
    let msg = Message::assistant("abc", "\t\tSalut !");
    assert!(!msg.is_user);
    assert_eq!(msg.text, "\t\tSalut !".to_string());
    assert_eq!(msg.author_label(), "Assistant");
}

#[test]
fn it_expands_tabs_when_drawing() {
    let msg = Message::user("1700000000000", "Valise :\n\tpasseport\tbillets");

    assert_eq!(msg.display_text(), "Valise :\n  passeport  billets");
    assert_eq!(
        msg.as_string_lines(40),
        vec!["Valise :", "  passeport  billets"]
    );
    assert_eq!(msg.text, "Valise :\n\tpasseport\tbillets");
}

#[test]
fn it_executes_with_usage() {
    let usage = Usage {
        total_tokens: 42,
        total_price: 0.0012,
        currency: "USD".to_string(),
        latency: 0.5,
    };
    let msg = Message::assistant("abc", "Salut !").with_usage(Some(usage.clone()));

    assert_eq!(msg.usage(), Some(&usage));
}

#[test]
fn it_executes_with_no_usage() {
    let msg = Message::assistant("abc", "Salut !").with_usage(None);

    assert!(msg.metadata.is_some());
    assert_eq!(msg.usage(), None);
}

#[test]
fn it_executes_as_string_lines() {
    let msg = Message::assistant(
        "abc",
        "Visitez Lisbonne au printemps, les jacarandas sont en fleurs.\n\nBon voyage !",
    );
    let lines = msg.as_string_lines(20);

    assert_eq!(
        lines,
        vec![
            "Visitez Lisbonne au",
            "printemps, les",
            "jacarandas sont en",
            "fleurs.",
            " ",
            "Bon voyage !",
        ]
    );
}

#[test]
fn it_executes_as_string_lines_with_long_word() {
    let msg = Message::assistant("abc", "Llanfairpwllgwyngyll est loin");
    let lines = msg.as_string_lines(10);

    assert_eq!(lines, vec!["Llanfairpwllgwyngyll", "est loin"]);
}

#[test]
fn it_executes_as_string_lines_filling_the_width() {
    let msg = Message::assistant("abc", "Hi there!");

    assert_eq!(msg.as_string_lines(9), vec!["Hi there!"]);
    assert_eq!(msg.as_string_lines(8), vec!["Hi", "there!"]);
}
