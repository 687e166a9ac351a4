//! Value Objects for the course marketplace

use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_ID_LEN: usize = 64;

/// Product identifier value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        validate(value.into()).map(Self)
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str { &self.0 }
}

/// Key for server-side per-user state, and for client sessions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        validate(value.into()).map(Self)
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

fn validate(value: String) -> Result<String, IdError> {
    let value = value.trim();
    if value.is_empty() { return Err(IdError::Empty); }
    if value.len() > MAX_ID_LEN { return Err(IdError::TooLong); }
    Ok(value.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum IdError { Empty, TooLong }
impl std::error::Error for IdError {}
impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::Empty => write!(f, "id is empty"), Self::TooLong => write!(f, "id is too long") }
    }
}

/// Maximum length of an ordered, capped list such as view history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity(usize);

impl Capacity {
    pub fn new(value: usize) -> Self { Self(value.max(1)) }
    pub fn value(&self) -> usize { self.0 }
}

impl Default for Capacity { fn default() -> Self { Self(6) } }
