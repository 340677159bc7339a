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

//! Renderers turning records into lines.
//!
//! A format is selected per logger by the `format` setting, whose value is a
//! pipe-separated list of registered format names, each optionally followed
//! by a configuration in parentheses:
//!
//! ```text
//! plain; libA=columns(time level name:>16 msg)
//! ```
//!
//! The parts rendered by each listed format are joined with a space. Without
//! any known format a line is just the message.

use std::fmt;
use std::sync::Arc;

use crate::record::Record;

mod columns;

pub use self::columns::Columns;

/// Renders a record into a line.
pub trait Format: fmt::Debug + Send + Sync + 'static {
    /// Render `record`.
    fn format(&self, record: &Record) -> String;
}

impl<T: Format> From<T> for Box<dyn Format> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Creates a format from the configuration given in the `format` setting.
///
/// Each logger gets its own instance, so formats may keep per-logger state.
pub type FormatFactory = Arc<dyn Fn(&str) -> Box<dyn Format> + Send + Sync>;

/// A format that renders only the message.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Plain {}

impl Format for Plain {
    fn format(&self, record: &Record) -> String {
        record.message().to_string()
    }
}

pub(crate) fn render(formats: &[Box<dyn Format>], record: &Record) -> String {
    if formats.is_empty() {
        return record.message().to_string();
    }

    formats
        .iter()
        .map(|format| format.format(record))
        .collect::<Vec<_>>()
        .join(" ")
}
