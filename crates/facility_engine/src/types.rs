use std::fmt;

use serde_json::Value;

pub type RequestId = u64;

/// The read-only catalog endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Categories,
    SubCategories {
        category_id: String,
    },
    Providers {
        category_id: String,
        sub_category_id: Option<String>,
    },
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Categories => "/category_master/",
            Endpoint::SubCategories { .. } => "/sub_category/",
            Endpoint::Providers { .. } => "/partner_master/",
        }
    }

    pub fn query(&self) -> Vec<(&'static str, &str)> {
        match self {
            Endpoint::Categories => Vec::new(),
            Endpoint::SubCategories { category_id } => vec![("category_id", category_id.as_str())],
            Endpoint::Providers {
                category_id,
                sub_category_id,
            } => {
                let mut pairs = vec![("category_id", category_id.as_str())];
                if let Some(sub) = sub_category_id {
                    pairs.push(("sub_category_id", sub.as_str()));
                }
                pairs
            }
        }
    }

    /// Short label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Categories => "Category",
            Endpoint::SubCategories { .. } => "Subcategory",
            Endpoint::Providers { .. } => "Partners",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// `records` is empty when the fetch failed; the failure is logged.
    FetchCompleted {
        request_id: RequestId,
        endpoint: Endpoint,
        records: Vec<Value>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
