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

//! Log records.

use jiff::Timestamp;

use crate::Level;

/// A single log line on its way to the outputs.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    time: Timestamp,
    level: Level,
    name: &'a str,
    message: String,
}

impl<'a> Record<'a> {
    /// Create a record observed now.
    pub fn new(level: Level, name: &'a str, message: impl Into<String>) -> Self {
        Self::with_time(Timestamp::now(), level, name, message)
    }

    /// Create a record with an explicit timestamp.
    pub fn with_time(
        time: Timestamp,
        level: Level,
        name: &'a str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            time,
            level,
            name,
            message: message.into(),
        }
    }

    /// The observed time.
    pub fn time(&self) -> Timestamp {
        self.time
    }

    /// The level the line was logged at.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The name of the logger that emitted the line.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The formatted message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
