//! Error types and result helpers shared across the colchunk crates.

use std::borrow::Cow;
use std::fmt;
use std::io;

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;

/// Classifies a decode failure.
///
/// Every kind is fatal for the chunk being decoded; there is no local
/// recovery since the binary layout is strictly positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Input requires functionality this decoder intentionally does not
    /// implement (compression, nested schemas, unknown encodings).
    UnsupportedFeature,
    /// Input violates a structural invariant of the format.
    CorruptData,
    /// Stream ended before a header or page body was fully read.
    Truncated,
    /// Underlying I/O failure that isn't an early end of stream.
    Io,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFeature => write!(f, "unsupported feature"),
            Self::CorruptData => write!(f, "corrupt data"),
            Self::Truncated => write!(f, "truncated"),
            Self::Io => write!(f, "io"),
        }
    }
}

#[derive(Debug)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    msg: Cow<'static, str>,
    /// Extra key/value context identifying the offending field or quantity.
    fields: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, msg: impl Into<Cow<'static, str>>) -> Self {
        DecodeError {
            kind,
            msg: msg.into(),
            fields: Vec::new(),
            source: None,
        }
    }

    pub fn unsupported(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::new(DecodeErrorKind::UnsupportedFeature, msg)
    }

    pub fn corrupt(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::new(DecodeErrorKind::CorruptData, msg)
    }

    pub fn truncated(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::new(DecodeErrorKind::Truncated, msg)
    }

    /// Attaches a named field to the error.
    pub fn with_field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    pub fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.msg
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Returns the value of a named field if it was attached.
    pub fn get_field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)?;
        if !self.fields.is_empty() {
            write!(f, " (")?;
            for (idx, (k, v)) in self.fields.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k} = {v}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        let kind = if err.kind() == io::ErrorKind::UnexpectedEof {
            DecodeErrorKind::Truncated
        } else {
            DecodeErrorKind::Io
        };
        DecodeError::new(kind, err.to_string()).with_source(err)
    }
}

pub trait ResultExt<T> {
    /// Prepends context to the error message, keeping the kind and fields.
    fn context(self, msg: &'static str) -> Result<T>;

    /// Like `context`, but lazily computes the message.
    fn context_fn<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<DecodeError>,
{
    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|err| {
            let mut err = err.into();
            err.msg = format!("{}: {}", msg, err.msg).into();
            err
        })
    }

    fn context_fn<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|err| {
            let mut err = err.into();
            err.msg = format!("{}: {}", f(), err.msg).into();
            err
        })
    }
}

/// Returns early with an `UnsupportedFeature` error.
#[macro_export]
macro_rules! unsupported {
    ($($arg:tt)*) => {
        return Err($crate::DecodeError::unsupported(format!($($arg)*)))
    };
}
