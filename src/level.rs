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

//! The level table.

use std::fmt;
use std::str::FromStr;

/// A log level.
///
/// Levels are numbers where a larger number means more verbose output. A
/// logger whose level is `INFO` emits `error`, `warn` and `info` lines and
/// drops `log`, `debug` and `trace` lines.
///
/// Besides the six named levels, [`Level::NONE`] disables all output and
/// [`Level::ALL`] enables every level, including custom numeric ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u64);

impl Level {
    /// Nothing is logged.
    pub const NONE: Level = Level(0);
    /// Error conditions.
    pub const ERROR: Level = Level(10);
    /// Warning conditions.
    pub const WARN: Level = Level(20);
    /// Informational messages.
    pub const INFO: Level = Level(30);
    /// General purpose output, like `console.log`.
    pub const LOG: Level = Level(40);
    /// Debug-level messages.
    pub const DEBUG: Level = Level(50);
    /// Very verbose tracing.
    pub const TRACE: Level = Level(60);
    /// Everything is logged.
    pub const ALL: Level = Level(u64::MAX);

    /// The named levels from least to most verbose.
    pub const NAMED: [Level; 6] = [
        Level::ERROR,
        Level::WARN,
        Level::INFO,
        Level::LOG,
        Level::DEBUG,
        Level::TRACE,
    ];

    /// Create a level from its numeric value.
    pub const fn new(value: u64) -> Self {
        Level(value)
    }

    /// The numeric value of this level.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The lowercase name of this level, if it is one of the named levels.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Level::NONE => Some("none"),
            Level::ERROR => Some("error"),
            Level::WARN => Some("warn"),
            Level::INFO => Some("info"),
            Level::LOG => Some("log"),
            Level::DEBUG => Some("debug"),
            Level::TRACE => Some("trace"),
            Level::ALL => Some("all"),
            _ => None,
        }
    }

    /// Parse a level from a name (case-insensitive) or a decimal number.
    ///
    /// Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Level> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u64>() {
            return Some(Level(n));
        }
        match s.to_ascii_lowercase().as_str() {
            "none" | "off" => Some(Level::NONE),
            "error" => Some(Level::ERROR),
            "warn" => Some(Level::WARN),
            "info" => Some(Level::INFO),
            "log" => Some(Level::LOG),
            "debug" => Some(Level::DEBUG),
            "trace" => Some(Level::TRACE),
            "all" => Some(Level::ALL),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.pad(&name.to_ascii_uppercase()),
            None => f.pad(&self.0.to_string()),
        }
    }
}

/// Error returned when a string is neither a level name nor a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(s).ok_or_else(|| ParseLevelError(s.to_string()))
    }
}
