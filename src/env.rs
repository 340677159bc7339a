// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bindings between settings and the host environment.
//!
//! A binding maps logical setting names such as `level` to its own keys and
//! reads or writes the raw setting strings there. Bindings never fail: a
//! value that cannot be read is reported as absent and a write that cannot be
//! performed is dropped.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;

/// A source and destination for raw setting strings.
pub trait Env: fmt::Debug + Send + Sync + 'static {
    /// Read the raw string of setting `name`.
    fn get(&self, name: &str) -> Option<String>;

    /// Write the raw string of setting `name`. `None` removes it.
    fn set(&self, name: &str, value: Option<&str>);
}

impl<T: Env> From<T> for Box<dyn Env> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Reads settings from process environment variables.
///
/// `level` is read from `LOG`, `debug` from `DEBUG` and any other setting
/// from `LOG_<NAME>`, e.g. `LOG_OUTPUT`.
///
/// The process environment is treated as read-only: [`Env::set`] does
/// nothing, so persisted settings only live in memory. Changing environment
/// variables with [`std::env::set_var`] is `unsafe` while other threads may
/// read them.
///
/// # Examples
///
/// ```
/// use ulog::env::ProcessEnv;
///
/// assert_eq!(ProcessEnv::key("level"), "LOG");
/// assert_eq!(ProcessEnv::key("format"), "LOG_FORMAT");
/// ```
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct ProcessEnv {}

impl ProcessEnv {
    /// The environment variable that holds setting `name`.
    pub fn key(name: &str) -> String {
        match name {
            "level" => "LOG".to_string(),
            "debug" => "DEBUG".to_string(),
            name => format!("LOG_{}", name.to_ascii_uppercase()),
        }
    }
}

impl Env for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(Self::key(name)).ok()
    }

    fn set(&self, _: &str, _: Option<&str>) {}
}

/// An in-memory key/value storage, shared by clones.
///
/// Keys follow browser storage conventions: `level` is stored as `log`,
/// `debug` as `debug` and any other setting as `log_<name>`.
///
/// # Examples
///
/// ```
/// use ulog::env::Env;
/// use ulog::env::MemoryEnv;
///
/// let env = MemoryEnv::default();
/// env.set("output", Some("console"));
/// assert_eq!(env.get("output").as_deref(), Some("console"));
/// assert_eq!(env.raw("log_output").as_deref(), Some("console"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryEnv {
    /// The storage key that holds setting `name`.
    pub fn key(name: &str) -> String {
        match name {
            "level" => "log".to_string(),
            "debug" => "debug".to_string(),
            name => format!("log_{name}"),
        }
    }

    /// Store `value` under the raw storage `key`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.into(), value.into());
        }
    }

    /// The value stored under the raw storage `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl Env for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.raw(&Self::key(name))
    }

    fn set(&self, name: &str, value: Option<&str>) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        match value {
            Some(value) => entries.insert(Self::key(name), value.to_string()),
            None => entries.remove(&Self::key(name)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_env_keys() {
        assert_eq!(ProcessEnv::key("level"), "LOG");
        assert_eq!(ProcessEnv::key("debug"), "DEBUG");
        assert_eq!(ProcessEnv::key("output"), "LOG_OUTPUT");
    }

    #[test]
    fn process_env_unset_variable_is_absent() {
        let env = ProcessEnv::default();
        assert_eq!(env.get("ulog_surely_unset_setting"), None);
    }

    #[test]
    fn process_env_ignores_writes() {
        let env = ProcessEnv::default();
        env.set("ulog_never_written_setting", Some("warn"));
        assert_eq!(env.get("ulog_never_written_setting"), None);
        assert!(std::env::var("LOG_ULOG_NEVER_WRITTEN_SETTING").is_err());
    }

    #[test]
    fn memory_env_round_trip() {
        let env = MemoryEnv::default();
        assert_eq!(env.get("level"), None);

        env.set("level", Some("warn"));
        assert_eq!(env.raw("log").as_deref(), Some("warn"));
        assert_eq!(env.get("level").as_deref(), Some("warn"));

        let shared = env.clone();
        shared.set("level", None);
        assert_eq!(env.get("level"), None);
    }
}
