//! JID helpers (`number@s.whatsapp.net`, `id@g.us`)

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::application::errors::BotError;

pub const USER_SERVER: &str = "s.whatsapp.net";
pub const LEGACY_USER_SERVER: &str = "c.us";
pub const GROUP_SERVER: &str = "g.us";

static DEVICE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r":\d+").expect("static regex"));

/// Convert a phone number (or a JID-ish string) into a normalized user JID.
pub fn to_jid(num: &str) -> Result<String, BotError> {
    if num.trim().is_empty() {
        return Err(BotError::InvalidInput("Number is required".to_string()));
    }

    let without_device = DEVICE_SUFFIX.replace(num, "");
    let digits: String = without_device.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(BotError::InvalidInput(format!("'{}' contains no digits", num)));
    }

    Ok(normalize_jid(&format!("{}@{}", digits, USER_SERVER)))
}

/// Drop the device part of a JID and map the legacy `c.us` server.
pub fn normalize_jid(jid: &str) -> String {
    let jid = jid.trim().to_lowercase();
    let Some((user, server)) = jid.split_once('@') else {
        return jid;
    };

    let user = user.split(':').next().unwrap_or(user);
    let server = if server == LEGACY_USER_SERVER { USER_SERVER } else { server };
    format!("{}@{}", user, server)
}

pub fn is_group_jid(jid: &str) -> bool {
    jid.rsplit_once('@')
        .map(|(_, server)| server == GROUP_SERVER)
        .unwrap_or(false)
}
