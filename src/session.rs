// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The logged-in session.
//!
//! A [`Session`] is created by a successful login or registration and removed
//! by logout. Anything that talks to the API borrows it; there is no global
//! token.

use crate::paths::session_path;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub api_url: String,
    pub email: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

// Keeps the token out of logs and panic messages.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api_url", &self.api_url)
            .field("email", &self.email)
            .field("token", &"********")
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Session {
    pub fn start(api_url: &str, email: &str, token: String) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            email: email.to_string(),
            token,
            created_at: Utc::now(),
        }
    }

    /// The current session, or `None` when nobody is logged in.
    pub fn load() -> Result<Option<Session>> {
        Self::load_from(&session_path()?)
    }

    /// Like [`Session::load`], but fails with a hint when logged out.
    pub fn require() -> Result<Session> {
        match Self::load()? {
            Some(s) => Ok(s),
            None => bail!("Not logged in. Run `finboard auth login --email <email>` first."),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Session>> {
        if !path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let session = serde_json::from_str(&s)
            .with_context(|| format!("parse session file {}", path.display()))?;
        Ok(Some(session))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&session_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let s = serde_json::to_string_pretty(self)?;
        fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Ends the stored session. Returns whether one existed.
    pub fn end() -> Result<bool> {
        Self::end_at(&session_path()?)
    }

    pub fn end_at(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path).with_context(|| format!("remove {}", path.display()))?;
        Ok(true)
    }
}
