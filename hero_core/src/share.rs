//! Share messages and the SMS composer handoff.
//!
//! Building the URI is pure; actually opening it is left to the front end.

use std::fmt::Write;

/// Message bragging about the current streak
pub fn streak_message(app_name: &str, streak: u32) -> String {
    format!(
        "I have a {} day streak on {}! ⭐ Can you beat it?",
        streak, app_name
    )
}

/// Message nudging friends to exercise today
pub fn reminder_message(app_name: &str) -> String {
    format!(
        "Hey! Don't forget to do your {} today! 🚀 Let's stay strong!",
        app_name
    )
}

/// `sms:` URI that opens the platform composer with `body` prefilled
pub fn sms_uri(body: &str) -> String {
    format!("sms:?&body={}", encode_uri_component(body))
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
///
/// Non-ASCII characters are encoded as their UTF-8 bytes.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_message() {
        assert_eq!(
            streak_message("Evan's Exercises", 3),
            "I have a 3 day streak on Evan's Exercises! ⭐ Can you beat it?"
        );
    }

    #[test]
    fn test_encode_ascii() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("Evan's (1)!"), "Evan's%20(1)!");
        assert_eq!(encode_uri_component("50%"), "50%25");
    }

    #[test]
    fn test_encode_multibyte() {
        assert_eq!(encode_uri_component("⭐"), "%E2%AD%90");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn test_sms_uri() {
        let uri = sms_uri(&reminder_message("Hero"));
        assert!(uri.starts_with("sms:?&body=Hey!%20Don't%20forget"));
        assert!(!uri.contains(' '));
    }
}
