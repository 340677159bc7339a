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

use std::io::Write;

use crate::Error;
use crate::output::Output;
use crate::record::Record;

/// An output that prints log lines to stdout.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Stdout {}

impl Output for Stdout {
    fn log(&self, _: &Record, line: &str) -> Result<(), Error> {
        writeln!(std::io::stdout(), "{line}").map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        std::io::stdout().flush().map_err(Error::from_io_error)
    }
}

/// An output that prints log lines to stderr.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Stderr {}

impl Output for Stderr {
    fn log(&self, _: &Record, line: &str) -> Result<(), Error> {
        writeln!(std::io::stderr(), "{line}").map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        std::io::stderr().flush().map_err(Error::from_io_error)
    }
}

/// An output that behaves like a terminal console.
///
/// `error` and `warn` lines go to stderr, everything else to stdout.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Console {
    stdout: Stdout,
    stderr: Stderr,
}

impl Output for Console {
    fn log(&self, record: &Record, line: &str) -> Result<(), Error> {
        self.stdout.log(record, line)
    }

    fn error(&self, record: &Record, line: &str) -> Result<(), Error> {
        self.stderr.log(record, line)
    }

    fn warn(&self, record: &Record, line: &str) -> Result<(), Error> {
        self.stderr.log(record, line)
    }

    fn flush(&self) -> Result<(), Error> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}
