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

use std::sync::Mutex;

#[cfg(feature = "colored")]
use colored::Color;
#[cfg(feature = "colored")]
use colored::Colorize;
use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Level;
use crate::format::Format;
use crate::record::Record;
use crate::utils::lock;

/// A format that renders records as aligned columns.
///
/// The configuration is a list of fields separated by whitespace or commas.
/// Each field may carry a width and an alignment after a colon: `name:>24`
/// right-aligns the logger name in 24 characters, `level:<6` left-aligns the
/// level and `msg:10` is the same as `msg:<10`. Logger names longer than
/// their width are truncated.
///
/// Fields:
///
/// - `time`: the wall clock time as `HH:MM:SS`
/// - `diff`: time elapsed since the previous line of the same logger
/// - `name`: the logger name
/// - `level`: the level, colored with the `colored` feature
/// - `msg`: the message
///
/// Unknown fields are skipped. An empty configuration means
/// `time diff name:>24 msg`.
///
/// # Examples
///
/// ```
/// use jiff::Timestamp;
/// use jiff::tz::TimeZone;
/// use ulog::Level;
/// use ulog::format::Columns;
/// use ulog::format::Format;
/// use ulog::record::Record;
///
/// let columns = Columns::new("time level:<5 name:>6 msg")
///     .timezone(TimeZone::UTC)
///     .no_color();
/// let time = Timestamp::from_second(3661).unwrap();
/// let record = Record::with_time(time, Level::WARN, "libA", "careful");
/// assert_eq!(columns.format(&record), "01:01:01 WARN    libA careful");
/// ```
#[derive(Debug)]
pub struct Columns {
    columns: Vec<Column>,
    timezone: TimeZone,
    no_color: bool,
    previous: Mutex<Option<Timestamp>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Time,
    Diff,
    Name,
    Level,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Column {
    field: Field,
    width: Option<usize>,
    align: Align,
}

impl Columns {
    /// The configuration used when none is given.
    pub const DEFAULT: &'static str = "time diff name:>24 msg";

    /// Create a columns format from its configuration.
    pub fn new(config: &str) -> Self {
        let config = if config.trim().is_empty() {
            Self::DEFAULT
        } else {
            config
        };

        let columns = config
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter_map(parse_column)
            .collect();

        Columns {
            columns,
            timezone: TimeZone::system(),
            no_color: false,
            previous: Mutex::new(None),
        }
    }

    /// Set the timezone of the `time` field.
    ///
    /// Defaults to the system timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Disable colored levels.
    ///
    /// Levels are only colored with the `colored` feature.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    fn diff(&self, now: Timestamp) -> String {
        let previous = lock(&self.previous).replace(now);
        let elapsed = previous
            .map(|prev| (now.as_millisecond() - prev.as_millisecond()).max(0))
            .unwrap_or_default();
        format_elapsed(elapsed)
    }

    fn level(&self, level: Level, column: &Column) -> String {
        let text = pad(&level.to_string(), column);
        if self.no_color {
            return text;
        }
        colorize(level, text)
    }
}

impl Format for Columns {
    fn format(&self, record: &Record) -> String {
        self.columns
            .iter()
            .map(|column| match column.field {
                Field::Time => {
                    let time = record.time().to_zoned(self.timezone.clone());
                    pad(&time.strftime("%H:%M:%S").to_string(), column)
                }
                Field::Diff => pad(&self.diff(record.time()), column),
                Field::Name => {
                    let name = match column.width {
                        Some(width) => record.name().chars().take(width).collect(),
                        None => record.name().to_string(),
                    };
                    pad(&name, column)
                }
                Field::Level => self.level(record.level(), column),
                Field::Message => pad(record.message(), column),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn parse_column(item: &str) -> Option<Column> {
    let (name, spec) = item.split_once(':').unwrap_or((item, ""));
    let field = match name.trim() {
        "time" => Field::Time,
        "diff" => Field::Diff,
        "name" => Field::Name,
        "level" => Field::Level,
        "msg" | "message" => Field::Message,
        _ => return None,
    };

    let spec = spec.trim();
    let (align, width) = if let Some(width) = spec.strip_prefix('>') {
        (Align::Right, width)
    } else if let Some(width) = spec.strip_prefix('<') {
        (Align::Left, width)
    } else {
        (Align::Left, spec)
    };

    Some(Column {
        field,
        width: width.trim().parse().ok(),
        align,
    })
}

fn pad(text: &str, column: &Column) -> String {
    match (column.width, column.align) {
        (None, _) => text.to_string(),
        (Some(width), Align::Left) => format!("{text:<width$}"),
        (Some(width), Align::Right) => format!("{text:>width$}"),
    }
}

fn format_elapsed(ms: i64) -> String {
    const SECOND: i64 = 1000;
    const MINUTE: i64 = 60 * SECOND;
    const HOUR: i64 = 60 * MINUTE;

    if ms < SECOND {
        format!("+{ms}ms")
    } else if ms < MINUTE {
        format!("+{}.{:02}s", ms / SECOND, (ms % SECOND) / 10)
    } else if ms < HOUR {
        format!("+{}m{:02}s", ms / MINUTE, (ms % MINUTE) / SECOND)
    } else {
        format!("+{}h{:02}m", ms / HOUR, (ms % HOUR) / MINUTE)
    }
}

#[cfg(feature = "colored")]
fn colorize(level: Level, text: String) -> String {
    let color = match level {
        Level::ERROR => Color::Red,
        Level::WARN => Color::Yellow,
        Level::INFO => Color::Green,
        Level::DEBUG => Color::Blue,
        Level::TRACE => Color::Magenta,
        _ => return text,
    };
    text.color(color).to_string()
}

#[cfg(not(feature = "colored"))]
fn colorize(_: Level, text: String) -> String {
    text
}
