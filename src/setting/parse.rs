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

use crate::Level;
use crate::setting::Pattern;
use crate::setting::Rule;
use crate::setting::Value;

/// Parse a setting string into its ordered rules.
///
/// With `legacy` set, the string follows the enable-string syntax of the
/// `debug` setting: an item without `=` is a list of expressions, and the
/// matching loggers receive [`Level::DEBUG`].
///
/// Parsing never fails. Empty items are skipped and anything else becomes
/// either a targeted rule or an implied one.
pub fn parse(raw: &str, legacy: bool) -> Vec<Rule> {
    let mut rules = vec![];
    let mut implied = vec![];

    for item in split_unescaped(raw, ';', usize::MAX) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let mut parts = split_unescaped(item, '=', 2).into_iter();
        let left = parts.next().unwrap_or_default();
        let (expressions, value) = match parts.next() {
            Some(value) => (left.trim().to_string(), Value::Text(value.trim().to_string())),
            None if legacy => (left.trim().to_string(), Value::Level(Level::DEBUG)),
            None => (String::new(), Value::Text(left.trim().to_string())),
        };

        let expressions = expressions
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|expr| !expr.is_empty())
            .collect::<Vec<_>>();

        if expressions.is_empty() {
            implied.push(Rule::implied(value));
        } else {
            let mut rule = Rule::new(value);
            for expr in expressions {
                rule.push(Pattern::compile(expr));
            }
            rules.push(rule);
        }
    }

    rules.extend(implied);
    rules
}

/// Split `input` on `separator` into at most `limit` parts.
///
/// A separator directly preceded by a backslash is kept as a literal and the
/// backslash is dropped.
fn split_unescaped(input: &str, separator: char, limit: usize) -> Vec<String> {
    let mut parts = vec![];
    let mut current = String::new();

    for c in input.chars() {
        if c != separator || parts.len() + 1 >= limit {
            current.push(c);
        } else if current.ends_with('\\') {
            current.pop();
            current.push(c);
        } else {
            parts.push(std::mem::take(&mut current));
        }
    }

    parts.push(current);
    parts
}
