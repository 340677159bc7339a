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

use regex::Regex;

/// A compiled glob expression matched against whole logger names.
///
/// `*` matches any run of characters, including none. Every other character
/// matches itself. A leading `-` marks the pattern as an exclusion and is not
/// part of the glob.
#[derive(Debug, Clone)]
pub struct Pattern {
    glob: String,
    negated: bool,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Exact,
    Glob(Regex),
}

impl Pattern {
    /// Compile a glob expression. Every string is a valid expression.
    pub fn compile(expression: &str) -> Pattern {
        let (negated, glob) = match expression.strip_prefix('-') {
            Some(glob) => (true, glob),
            None => (false, expression),
        };

        let matcher = if glob.contains('*') {
            let body = glob
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*");
            // an oversized glob degrades to a literal comparison
            match Regex::new(&format!("^(?s:{body})$")) {
                Ok(regex) => Matcher::Glob(regex),
                Err(_) => Matcher::Exact,
            }
        } else {
            Matcher::Exact
        };

        Pattern {
            glob: glob.to_string(),
            negated,
            matcher,
        }
    }

    /// Whether the expression started with `-`.
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// The glob without its `-` prefix.
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// Whether the glob matches the entire `name`.
    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::Exact => self.glob == name,
            Matcher::Glob(regex) => regex.is_match(name),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("-")?;
        }
        f.write_str(&self.glob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_is_anchored() {
        let p = Pattern::compile("lib*");
        assert!(!p.negated());
        assert!(p.matches("lib"));
        assert!(p.matches("libA"));
        assert!(p.matches("libFooBar"));
        assert!(!p.matches("otherlib"));
        assert!(!p.matches("xlibA"));
    }

    #[test]
    fn wildcard_in_the_middle() {
        let p = Pattern::compile("a*z");
        assert!(p.matches("az"));
        assert!(p.matches("a:b:z"));
        assert!(!p.matches("a:b:zz:y"));
    }

    #[test]
    fn literal_without_wildcard() {
        let p = Pattern::compile("libA");
        assert!(p.matches("libA"));
        assert!(!p.matches("libAB"));
        assert!(!p.matches("LibA"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let p = Pattern::compile("a.b+*");
        assert!(p.matches("a.b+c"));
        assert!(!p.matches("axb+c"));
        assert!(!p.matches("a.bbc"));

        let p = Pattern::compile("my(lib)[1]");
        assert!(p.matches("my(lib)[1]"));
    }

    #[test]
    fn negation_prefix_is_stripped() {
        let p = Pattern::compile("-libC");
        assert!(p.negated());
        assert_eq!(p.glob(), "libC");
        assert!(p.matches("libC"));
        assert_eq!(p.to_string(), "-libC");
    }

    #[test]
    fn lone_star_matches_everything() {
        let p = Pattern::compile("*");
        assert!(p.matches(""));
        assert!(p.matches("anything at all"));
        assert!(p.matches("multi\nline"));
    }
}
