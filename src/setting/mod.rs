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

//! Rule-based settings.
//!
//! A setting is a named string such as `level` or `output`. Its value is a
//! semicolon separated list of rules:
//!
//! ```text
//! info; lib*,-libC=error; libC=warn
//! ```
//!
//! Each rule is either a bare value, which applies to every logger, or a list
//! of glob expressions followed by `=` and a value. Expressions prefixed with
//! `-` exclude loggers. Rules are evaluated in order and the first rule that
//! matches a logger name decides its value. Bare values act as defaults and
//! are always evaluated after the targeted rules, wherever they appear in the
//! string. A literal `;` inside a value is written as `\;`.
//!
//! ```
//! use ulog::setting::SettingStore;
//!
//! let store = SettingStore::new();
//! store.set("level", Some("info; libA=warn; libB=error"), false);
//!
//! assert_eq!(store.resolve("level", "libA").unwrap().as_str(), Some("warn"));
//! assert_eq!(store.resolve("level", "libC").unwrap().as_str(), Some("info"));
//! ```

use std::fmt;

use crate::Level;

mod parse;
mod pattern;
mod rule;
mod store;

#[cfg(test)]
mod tests;

pub use self::parse::parse;
pub use self::pattern::Pattern;
pub use self::rule::Rule;
pub use self::rule::evaluate;
pub use self::store::DEBUG;
pub use self::store::FORMAT;
pub use self::store::LEVEL;
pub use self::store::OUTPUT;
pub use self::store::SettingStore;

/// The value a rule assigns to the loggers it matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A literal value taken from the setting string.
    Text(String),
    /// A level implied by the `debug` setting's enable-string syntax.
    Level(Level),
}

impl Value {
    /// The literal text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Level(_) => None,
        }
    }

    /// Interpret this value as a level.
    ///
    /// Text values are parsed with [`Level::parse`].
    pub fn to_level(&self) -> Option<Level> {
        match self {
            Value::Text(text) => Level::parse(text),
            Value::Level(level) => Some(*level),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Level(level) => write!(f, "{}", level.value()),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Level> for Value {
    fn from(level: Level) -> Self {
        Value::Level(level)
    }
}
