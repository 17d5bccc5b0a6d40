/// Utility functions
use chrono::{DateTime, TimeZone, Utc};
use pulldown_cmark::{html, Options, Parser};

/// Render Markdown to HTML. No sanitization is applied.
pub fn markdown_to_html(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(input, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// Convert a UNIX timestamp (seconds) to an instant
pub fn instant_from_unix(timestamp: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(timestamp, 0).single()
}

/// Human readable date and time of `instant` in the given time zone
pub fn format_instant_in<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant
        .with_timezone(tz)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
