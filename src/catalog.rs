//! # Port Capability Catalog
//!
//! This module defines the [`PortCatalog`], an immutable mapping from port
//! identifier to the set of boards that port can build. The catalog is
//! generated offline by the refresher (see [`crate::refresh`]), persisted as
//! a flat JSON artifact, and loaded read-only at build time to validate
//! (port, board) pairs before any build work starts.
//!
//! An empty board list means the port takes no board parameter (the `unix`
//! port, for example). Ports are stored in a sorted map and board lists are
//! sorted at construction so the persisted artifact is stable across
//! refreshes.
//!
//! The catalog is constructed once at process start and passed by reference
//! to every component that needs validation; there is no process-wide cached
//! copy.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Immutable port → boards mapping, read-only after load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortCatalog {
    ports: BTreeMap<String, Vec<String>>,
}

impl PortCatalog {
    /// Build a catalog from (port, boards) entries.
    ///
    /// Board lists are sorted; port keys are unique by construction (a
    /// duplicate port replaces the earlier entry).
    pub fn from_entries<I, P, B>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, Vec<B>)>,
        P: Into<String>,
        B: Into<String>,
    {
        let mut ports = BTreeMap::new();
        for (port, boards) in entries {
            let mut boards: Vec<String> = boards.into_iter().map(Into::into).collect();
            boards.sort();
            ports.insert(port.into(), boards);
        }
        Self { ports }
    }

    /// Load a catalog from its JSON backing store.
    ///
    /// Fails with [`Error::CatalogUnreadable`] if the file is missing or
    /// malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::CatalogUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let ports: BTreeMap<String, Vec<String>> =
            serde_json::from_str(&content).map_err(|e| Error::CatalogUnreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::from_entries(ports))
    }

    /// Persist the catalog as pretty-printed JSON.
    ///
    /// Parent directories are created as needed. Output is deterministic:
    /// ports are map-ordered and board lists sorted.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(&self.ports)
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate a (port, board) pair against the catalog.
    ///
    /// Fails with [`Error::UnknownPort`] if the port is absent, and with
    /// [`Error::UnknownBoard`] if the port has a non-empty board set and the
    /// supplied board is missing or not in that set.
    ///
    /// Supplying a board for a port with an empty board set is tolerated and
    /// the board is ignored; see DESIGN.md for the rationale.
    pub fn validate(&self, port: &str, board: Option<&str>) -> Result<()> {
        let boards = self.ports.get(port).ok_or_else(|| Error::UnknownPort {
            port: port.to_string(),
            known: self
                .ports
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        })?;

        if boards.is_empty() {
            return Ok(());
        }

        match board {
            Some(board) if boards.iter().any(|b| b == board) => Ok(()),
            _ => Err(Error::UnknownBoard {
                port: port.to_string(),
                board: board.map(str::to_string),
            }),
        }
    }

    /// Iterate over port identifiers in sorted order.
    pub fn ports(&self) -> impl Iterator<Item = &str> {
        self.ports.keys().map(String::as_str)
    }

    /// The sorted board list for a port, or `None` for an unknown port.
    pub fn boards(&self, port: &str) -> Option<&[String]> {
        self.ports.get(port).map(Vec::as_slice)
    }

    /// Number of ports in the catalog.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Whether the catalog has no ports at all.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}
