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

//! Destinations for log lines.
//!
//! An output is selected per logger by the `output` setting, whose value is a
//! pipe-separated list of registered output names:
//!
//! ```text
//! console; libA=console|stderr
//! ```
//!
//! Names that are not registered are ignored.

use std::fmt;

use crate::Error;
use crate::Level;
use crate::record::Record;

mod stdio;
mod testing;

pub use self::stdio::Console;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::testing::Testing;

/// A sink that can write log lines.
///
/// Only [`log`](Output::log) is required. The per-level methods default to
/// it, so any type with a single generic write method is a complete output.
pub trait Output: fmt::Debug + Send + Sync + 'static {
    /// Write a line at any level.
    fn log(&self, record: &Record, line: &str) -> Result<(), Error>;

    /// Write an `error` line.
    fn error(&self, record: &Record, line: &str) -> Result<(), Error> {
        self.log(record, line)
    }

    /// Write a `warn` line.
    fn warn(&self, record: &Record, line: &str) -> Result<(), Error> {
        self.log(record, line)
    }

    /// Write an `info` line.
    fn info(&self, record: &Record, line: &str) -> Result<(), Error> {
        self.log(record, line)
    }

    /// Write a `debug` line.
    fn debug(&self, record: &Record, line: &str) -> Result<(), Error> {
        self.log(record, line)
    }

    /// Write a `trace` line.
    fn trace(&self, record: &Record, line: &str) -> Result<(), Error> {
        self.log(record, line)
    }

    /// Flush any buffered lines.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Route `line` to the method of `output` matching the record's level.
pub(crate) fn write(output: &dyn Output, record: &Record, line: &str) -> Result<(), Error> {
    match record.level() {
        Level::ERROR => output.error(record, line),
        Level::WARN => output.warn(record, line),
        Level::INFO => output.info(record, line),
        Level::DEBUG => output.debug(record, line),
        Level::TRACE => output.trace(record, line),
        _ => output.log(record, line),
    }
}
