//! Logging setup: stdout mirror plus a log file, both with secrets masked.

use regex::Regex;
use std::fs::File;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{prelude::*, EnvFilter};

const DEFAULT_FILTER: &str =
    "homework_status_bot=debug,teloxide=warn,hyper=warn,h2=error,reqwest=warn,tokio=warn";

/// Regex patterns for redacting sensitive data
pub struct RedactionPatterns {
    token1: Regex,
    token2: Regex,
    token3: Regex,
    oauth: Regex,
}

impl RedactionPatterns {
    /// Initialize all regex patterns
    ///
    /// # Errors
    ///
    /// Returns an error if any regex pattern is invalid
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            token1: Regex::new(r"(https?://[^/]+/bot)([0-9]+:[A-Za-z0-9_-]+)(/['\s]*)")?,
            token2: Regex::new(r"([0-9]{8,10}:[A-Za-z0-9_-]{35})")?,
            token3: Regex::new(r"(bot[0-9]{8,10}:)[A-Za-z0-9_-]+")?,
            oauth: Regex::new(r#"(OAuth\s+)[^\s"',]+"#)?,
        })
    }

    /// Mask Telegram bot tokens and OAuth header values in `input`.
    #[must_use]
    pub fn redact(&self, input: &str) -> String {
        let output = self.token1.replace_all(input, "$1[TELEGRAM_TOKEN]$3");
        let output = self.token2.replace_all(&output, "[TELEGRAM_TOKEN]");
        let output = self.token3.replace_all(&output, "$1[TELEGRAM_TOKEN]");
        let output = self.oauth.replace_all(&output, "$1[PRACTICUM_TOKEN]");
        output.into_owned()
    }
}

/// Writer that redacts everything passing through it.
pub struct RedactingWriter<W: Write> {
    inner: W,
    patterns: Arc<RedactionPatterns>,
}

impl<W: Write> RedactingWriter<W> {
    /// Wrap `inner`.
    pub const fn new(inner: W, patterns: Arc<RedactionPatterns>) -> Self {
        Self { inner, patterns }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        let redacted = self.patterns.redact(&s);
        self.inner.write_all(redacted.as_bytes())?;
        // Report the original length, the caller does not care about redaction.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// [`MakeWriter`] wrapper producing [`RedactingWriter`]s.
pub struct RedactingMakeWriter<M> {
    inner: M,
    patterns: Arc<RedactionPatterns>,
}

impl<M> RedactingMakeWriter<M> {
    /// Wrap a writer factory.
    pub const fn new(inner: M, patterns: Arc<RedactionPatterns>) -> Self {
        Self { inner, patterns }
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new(self.inner.make_writer(), Arc::clone(&self.patterns))
    }
}

/// Install the global subscriber: stdout and `log_file` (truncated).
///
/// `RUST_LOG` overrides the default filter.
///
/// # Errors
///
/// Returns an error if the log file cannot be created, a pattern fails to
/// compile, or a global subscriber is already installed.
pub fn init_logging(log_file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let patterns = Arc::new(RedactionPatterns::new()?);
    let file = File::create(log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(RedactingMakeWriter::new(io::stdout, Arc::clone(&patterns))),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(RedactingMakeWriter::new(Mutex::new(file), patterns)),
        )
        .try_init()?;

    Ok(())
}
