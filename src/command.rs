pub const START_COMMAND: &str = "/start";
pub const AUTH_PREFIX: &str = "auth_";
pub const DEFAULT_FIRST_NAME: &str = "User";

pub const GREETING_TEXT: &str = "👋 Hi! I'm the GiftDraw.today bot.\n\n\
     To sign in, open the website and press \"Connect via Telegram\".";
pub const MISSING_USER_ID_TEXT: &str = "❌ Error: could not get your ID";
pub const INVALID_TOKEN_TEXT: &str = "❌ Authorization failed. The token is invalid or expired.";
pub const RETRY_TEXT: &str = "❌ Authorization error. Please try again.";
pub const RETURN_BUTTON_TEXT: &str = "🔗 Return to site";

/// What an incoming text asks the bot to do.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// Plain `/start`, or `/start` with an argument that is not a login token.
    Greeting,
    /// `/start auth_<token>`; holds the token without its prefix.
    Authorize(&'a str),
    Ignore,
}

pub fn parse_command(text: &str) -> Command<'_> {
    if !text.starts_with(START_COMMAND) {
        return Command::Ignore;
    }

    match text
        .split(' ')
        .nth(1)
        .and_then(|arg| arg.strip_prefix(AUTH_PREFIX))
    {
        Some(token) => Command::Authorize(token),
        None => Command::Greeting,
    }
}

/// Name shown back to the user: first name, then username, then the numeric id.
pub fn display_name(first_name: &str, username: Option<&str>, user_id: i64) -> String {
    if !first_name.is_empty() {
        return first_name.to_string();
    }
    match username {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("ID: {}", user_id),
    }
}

pub fn success_text(name: &str) -> String {
    format!(
        "✅ Authorization successful!\n\n\
         You are signed in as: {}\n\n\
         Press the button below to return to the site.",
        escape_html(name)
    )
}

/// Escape user-controlled text for `parse_mode = HTML`.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
