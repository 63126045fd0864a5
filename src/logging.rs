//! Logging setup with bot-token redaction.
//!
//! The fmt layer writes to stderr through a wrapper that masks the
//! Telegram bot token wherever it shows up, so a reqwest error carrying
//! the full API URL can never leak the credential into logs.

use regex::Regex;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::{prelude::*, EnvFilter};

const MASK: &str = "[TELEGRAM_TOKEN]";

/// The token shapes that can appear in log output.
struct RedactionPatterns {
    url_token: Regex,
    bare_token: Regex,
    bot_prefixed: Regex,
}

impl RedactionPatterns {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // https://api.telegram.org/bot<token>/method
            url_token: Regex::new(r"(https?://[^/]+/bot)([0-9]+:[A-Za-z0-9_-]+)")?,
            // A token on its own: 8-10 digits, colon, 35-char secret
            bare_token: Regex::new(r"[0-9]{8,10}:[A-Za-z0-9_-]{35}")?,
            // "bot<id>:" prefix followed by the secret
            bot_prefixed: Regex::new(r"(bot[0-9]{8,10}:)[A-Za-z0-9_-]+")?,
        })
    }

    fn redact(&self, input: &str) -> String {
        let out = self.url_token.replace_all(input, format!("${{1}}{MASK}"));
        let out = self.bare_token.replace_all(&out, MASK);
        self.bot_prefixed
            .replace_all(&out, format!("${{1}}{MASK}"))
            .into_owned()
    }
}

struct RedactingWriter<W: Write> {
    inner: W,
    patterns: Arc<RedactionPatterns>,
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.inner.write_all(self.patterns.redact(&s).as_bytes())?;
        // Report the original length even when redaction changed it,
        // so the caller never re-sends a partial buffer.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

struct RedactingMakeWriter<F> {
    make_inner: F,
    patterns: Arc<RedactionPatterns>,
}

impl<'a, F, W> tracing_subscriber::fmt::MakeWriter<'a> for RedactingMakeWriter<F>
where
    F: Fn() -> W + 'static,
    W: Write,
{
    type Writer = RedactingWriter<W>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: (self.make_inner)(),
            patterns: self.patterns.clone(),
        }
    }
}

/// Install the global subscriber: `RUST_LOG`-driven filter (default
/// `info`) and a redacting fmt layer on stderr.
///
/// # Errors
///
/// Returns an error if a redaction pattern fails to compile.
pub fn init() -> Result<(), regex::Error> {
    let patterns = Arc::new(RedactionPatterns::new()?);
    let make_writer = RedactingMakeWriter {
        make_inner: io::stderr,
        patterns,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(make_writer))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> RedactionPatterns {
        RedactionPatterns::new().expect("patterns should compile")
    }

    #[test]
    fn test_redacts_api_url() {
        let input = "error: https://api.telegram.org/bot123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw1/getUpdates failed";
        let out = patterns().redact(input);
        assert!(!out.contains("AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw1"));
        assert!(out.contains("[TELEGRAM_TOKEN]"));
        assert!(out.contains("/getUpdates failed"));
    }

    #[test]
    fn test_redacts_bare_token() {
        let input = "token is 123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw1";
        let out = patterns().redact(input);
        assert_eq!(out, "token is [TELEGRAM_TOKEN]");
    }

    #[test]
    fn test_redacts_bot_prefixed_token() {
        let input = "request to bot123456789:secret-part_here went out";
        let out = patterns().redact(input);
        assert_eq!(out, "request to bot123456789:[TELEGRAM_TOKEN] went out");
    }

    #[test]
    fn test_leaves_plain_text_alone() {
        let input = "Bot is running...";
        assert_eq!(patterns().redact(input), input);
    }
}
