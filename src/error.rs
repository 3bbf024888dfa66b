use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    ConfigParse,
    InvalidOption,
    LengthParse,
    DateParse,
    OtherHolidaysParse,
    DocumentParse,
    DocumentWrite,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &toml_error.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(xml_error: quick_xml::Error) -> Error {
        match xml_error {
            quick_xml::Error::Io(err) => Error::new(ErrorKind::DocumentWrite, &err.to_string()),
            err => Error::new(ErrorKind::DocumentParse, &err.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(attr_error: quick_xml::events::attributes::AttrError) -> Error {
        Error::new(ErrorKind::DocumentParse, &attr_error.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::ConfigParse => "invalid configuration file".to_owned(),
            ErrorKind::InvalidOption => "invalid option".to_owned(),
            ErrorKind::LengthParse => "invalid length".to_owned(),
            ErrorKind::DateParse => "invalid date format".to_owned(),
            ErrorKind::OtherHolidaysParse => "invalid list of other holidays".to_owned(),
            ErrorKind::DocumentParse => "invalid SVG document".to_owned(),
            ErrorKind::DocumentWrite => "could not write SVG document".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
