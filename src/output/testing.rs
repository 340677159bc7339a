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

use crate::Error;
use crate::output::Output;
use crate::record::Record;

/// An output that writes log lines that can be captured by a test harness (like `cargo test`),
/// and thus the lines are suppressed unless `--nocapture` or `--show-output` is specified.
///
/// # Examples
///
/// ```
/// use ulog::output::Testing;
///
/// let registry = ulog::builder()
///     .no_env()
///     .output("testing", Testing::default())
///     .default_setting("output", "testing")
///     .build();
/// registry.logger("my-lib").info(format_args!("captured"));
/// ```
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Testing {}

impl Output for Testing {
    fn log(&self, _: &Record, line: &str) -> Result<(), Error> {
        eprintln!("{line}");
        Ok(())
    }
}
