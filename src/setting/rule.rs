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

use std::fmt;

use crate::setting::Pattern;
use crate::setting::Value;

/// One clause of a setting string.
#[derive(Debug, Clone)]
pub struct Rule {
    value: Value,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
    implied: bool,
}

impl Rule {
    pub(crate) fn new(value: Value) -> Self {
        Rule {
            value,
            include: vec![],
            exclude: vec![],
            implied: false,
        }
    }

    /// A rule without explicit expressions. It matches every logger.
    pub(crate) fn implied(value: Value) -> Self {
        Rule {
            value,
            include: vec![Pattern::compile("*")],
            exclude: vec![],
            implied: true,
        }
    }

    pub(crate) fn push(&mut self, pattern: Pattern) {
        if pattern.negated() {
            self.exclude.push(pattern);
        } else {
            self.include.push(pattern);
        }
    }

    /// The value assigned to matching loggers.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Patterns of which at least one must match.
    pub fn include(&self) -> &[Pattern] {
        &self.include
    }

    /// Patterns of which none may match.
    pub fn exclude(&self) -> &[Pattern] {
        &self.exclude
    }

    /// Whether the rule had no explicit expressions in the setting string.
    pub fn is_implied(&self) -> bool {
        self.implied
    }

    /// Whether this rule applies to `name`.
    ///
    /// An exclude match vetoes the rule even if an include pattern matches too.
    pub fn matches(&self, name: &str) -> bool {
        !self.exclude.iter().any(|p| p.matches(name))
            && self.include.iter().any(|p| p.matches(name))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.implied {
            let patterns = self
                .include
                .iter()
                .chain(self.exclude.iter())
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",");
            write!(f, "{patterns}=")?;
        }
        write!(f, "{}", self.value)
    }
}

/// Return the value of the first rule matching `name`, or `fallback`.
pub fn evaluate<'a>(
    rules: &'a [Rule],
    name: &str,
    fallback: Option<&'a Value>,
) -> Option<&'a Value> {
    rules
        .iter()
        .find(|rule| rule.matches(name))
        .map(Rule::value)
        .or(fallback)
}
