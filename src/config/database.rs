// ABOUTME: Database URL type for file backed and in-memory SQLite databases
// ABOUTME: Parses DATABASE_URL values and renders sqlx connection strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// Accepts `sqlite::memory:`, `sqlite:<path>`, `sqlite://<path>` and a bare
    /// file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or names another database engine
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }
        if let Some(rest) = s.strip_prefix("sqlite:") {
            let path_str = rest.strip_prefix("//").unwrap_or(rest);
            // Connection options such as `?mode=rwc` are added by the pool
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            return if path_str == ":memory:" {
                Ok(Self::Memory)
            } else if path_str.is_empty() {
                Err(AppError::config(format!("Missing SQLite path in '{s}'")))
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            };
        }
        if s.contains("://") {
            return Err(AppError::config(format!(
                "Unsupported database URL '{s}', only SQLite is supported"
            )));
        }
        Ok(Self::SQLite {
            path: PathBuf::from(s),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }

    /// Path of the database file, if any
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::SQLite { path } => Some(path),
            Self::Memory => None,
        }
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DEFAULT_DATABASE_URL).unwrap_or(Self::Memory)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_url() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
    }

    #[test]
    fn test_parse_file_urls() {
        let expected = DatabaseUrl::SQLite {
            path: PathBuf::from("./data/meals.db"),
        };
        assert_eq!(DatabaseUrl::parse_url("sqlite:./data/meals.db").unwrap(), expected);
        assert_eq!(DatabaseUrl::parse_url("sqlite://./data/meals.db").unwrap(), expected);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/meals.db?mode=rwc").unwrap(),
            expected
        );
        assert_eq!(DatabaseUrl::parse_url("./data/meals.db").unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_other_engines() {
        assert!(DatabaseUrl::parse_url("postgres://localhost/meals").is_err());
        assert!(DatabaseUrl::parse_url("   ").is_err());
        assert!(DatabaseUrl::parse_url("sqlite:").is_err());
    }

    #[test]
    fn test_connection_string_round_trips() {
        let url = DatabaseUrl::parse_url("sqlite:meals.db").unwrap();
        assert_eq!(url.to_connection_string(), "sqlite:meals.db");
        assert_eq!(DatabaseUrl::Memory.to_string(), "sqlite::memory:");
    }
}
