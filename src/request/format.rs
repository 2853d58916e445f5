// src/request/format.rs
use std::fmt;

/// The data format a response is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    Json,
    Csv,
    JsonApi,
    Debug,
}

impl ResponseFormat {
    /// Resolve a format from its request name, case-insensitively.
    pub fn from_name(name: &str) -> Option<ResponseFormat> {
        match name.to_lowercase().as_str() {
            "json" => Some(ResponseFormat::Json),
            "csv" => Some(ResponseFormat::Csv),
            "jsonapi" => Some(ResponseFormat::JsonApi),
            "debug" => Some(ResponseFormat::Debug),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Csv => "csv",
            ResponseFormat::JsonApi => "jsonapi",
            ResponseFormat::Debug => "debug",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
