//! Rule generation for a slug migration.
//!
//! From a hyphenated slug like `pyenv-manager`, generates the ordered
//! pattern/replacement list applied to file contents. Order matters: each
//! rule operates on the output of the previous one, and the quoted-require
//! rules run before the bare-slug rule so module paths are rewritten as a
//! unit.

use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;

/// An ordered pattern/replacement pair applied to file text content.
///
/// The replacement template may reference capture groups (`$1`).
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Regex,
    pub replacement: String,
    pub label: &'static str,
}

impl Rule {
    /// Apply this rule to `content`, returning the rewritten text and the
    /// number of matches replaced.
    pub fn apply(&self, content: &str) -> (String, usize) {
        let count = self.pattern.find_iter(content).count();
        if count == 0 {
            return (content.to_string(), 0);
        }
        (
            self.pattern
                .replace_all(content, self.replacement.as_str())
                .into_owned(),
            count,
        )
    }
}

/// Serializable view of a rule, for the `rules` command and run summaries.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSummary {
    pub pattern: String,
    pub replacement: String,
    pub label: String,
}

/// A migration specification: the slug pair, the target extension, and the
/// generated rule list.
#[derive(Debug, Clone)]
pub struct MigrationSpec {
    /// Hyphenated slug as it appears in sources and path names.
    pub from: String,
    /// Underscore form: `from` with every `-` replaced by `_`.
    pub to: String,
    /// File-name suffix selecting which files get content rewriting,
    /// including the leading dot.
    pub extension: String,
    /// Ordered content rules.
    pub rules: Vec<Rule>,
}

impl MigrationSpec {
    /// Create a migration spec for `slug`, generating the content rules.
    ///
    /// The slug must be non-empty, contain at least one `-` (otherwise the
    /// migration would be a no-op), and use only alphanumerics, `-` and `_`.
    pub fn new(slug: &str, extension: &str) -> Result<Self> {
        if slug.is_empty() {
            return Err(Error::validation_invalid_argument("slug", "Slug is empty"));
        }
        if !slug.contains('-') {
            return Err(Error::validation_invalid_argument(
                "slug",
                format!("Slug '{}' contains no '-'; nothing to migrate", slug),
            ));
        }
        if !slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::validation_invalid_argument(
                "slug",
                format!("Slug '{}' may only contain alphanumerics, '-' and '_'", slug),
            ));
        }

        let ext = extension.trim_start_matches('.');
        if ext.is_empty() {
            return Err(Error::validation_invalid_argument(
                "extension",
                "Extension is empty",
            ));
        }

        let to = slug.replace('-', "_");
        let rules = build_rules(slug, &to)?;

        Ok(MigrationSpec {
            from: slug.to_string(),
            to,
            extension: format!(".{}", ext),
            rules,
        })
    }

    /// Whether a file name selects for content rewriting.
    pub fn matches_extension(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension)
    }

    /// New entry name after literal substring replacement, or None when the
    /// name does not contain the slug.
    pub fn renamed(&self, name: &str) -> Option<String> {
        if name.contains(&self.from) {
            Some(name.replace(&self.from, &self.to))
        } else {
            None
        }
    }

    pub fn rule_summaries(&self) -> Vec<RuleSummary> {
        self.rules
            .iter()
            .map(|r| RuleSummary {
                pattern: r.pattern.as_str().to_string(),
                replacement: r.replacement.clone(),
                label: r.label.to_string(),
            })
            .collect()
    }
}

/// Build the ordered rule list for a slug pair.
///
/// Rule order is load-bearing: the quoted-require rules consume module
/// paths before the bare-slug rule sees them, and the vim-global rules
/// only fire on text the bare rule left alone.
fn build_rules(from: &str, to: &str) -> Result<Vec<Rule>> {
    let f = regex::escape(from);

    let specs: [(&str, String, String); 5] = [
        (
            "require double-quoted",
            format!(r#"require\(["']{f}([^"']*)["']"#),
            format!(r#"require("{to}${{1}}""#),
        ),
        (
            "require single-quoted",
            format!(r#"require\(['"]{f}([^'"]*)['"]"#),
            format!(r#"require('{to}${{1}}')"#),
        ),
        ("bare slug", f.clone(), to.to_string()),
        (
            "vim loaded guard",
            format!(r"vim\.g\.loaded_{f}"),
            format!("vim.g.loaded_{to}"),
        ),
        (
            "vim global prefix",
            format!(r"vim\.g\.{f}_"),
            format!("vim.g.{to}_"),
        ),
    ];

    specs
        .into_iter()
        .map(|(label, pattern, replacement)| {
            let pattern = Regex::new(&pattern).map_err(|e| {
                Error::validation_invalid_argument("slug", format!("Invalid pattern: {}", e))
            })?;
            Ok(Rule {
                pattern,
                replacement,
                label,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> MigrationSpec {
        MigrationSpec::new("pyenv-manager", "lua").unwrap()
    }

    fn apply_all(spec: &MigrationSpec, content: &str) -> String {
        let mut out = content.to_string();
        for rule in &spec.rules {
            out = rule.apply(&out).0;
        }
        out
    }

    #[test]
    fn spec_generates_underscore_form() {
        let spec = spec();
        assert_eq!(spec.from, "pyenv-manager");
        assert_eq!(spec.to, "pyenv_manager");
        assert_eq!(spec.extension, ".lua");
        assert_eq!(spec.rules.len(), 5);
    }

    #[test]
    fn rejects_empty_slug() {
        let err = MigrationSpec::new("", "lua").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn rejects_slug_without_hyphen() {
        assert!(MigrationSpec::new("pyenv_manager", "lua").is_err());
    }

    #[test]
    fn rejects_slug_with_regex_metacharacters() {
        assert!(MigrationSpec::new("pyenv-man$ger", "lua").is_err());
    }

    #[test]
    fn extension_accepts_leading_dot() {
        let spec = MigrationSpec::new("pyenv-manager", ".lua").unwrap();
        assert_eq!(spec.extension, ".lua");
        assert!(spec.matches_extension("init.lua"));
        assert!(!spec.matches_extension("init.luac"));
        assert!(!spec.matches_extension("README.md"));
    }

    #[test]
    fn rewrites_double_quoted_require() {
        let out = apply_all(&spec(), r#"local core = require("pyenv-manager.core")"#);
        assert_eq!(out, r#"local core = require("pyenv_manager.core")"#);
    }

    #[test]
    fn rewrites_single_quoted_require() {
        // The double-quote rule's character class also matches single
        // quotes, so quote style normalizes to double quotes.
        let out = apply_all(&spec(), "local core = require('pyenv-manager.core')");
        assert_eq!(out, r#"local core = require("pyenv_manager.core")"#);
    }

    #[test]
    fn rewrites_bare_require_of_slug_root() {
        let out = apply_all(&spec(), r#"require("pyenv-manager")"#);
        assert_eq!(out, r#"require("pyenv_manager")"#);
    }

    #[test]
    fn rewrites_slug_in_comments_and_strings() {
        let out = apply_all(&spec(), "-- pyenv-manager setup\nlocal name = \"pyenv-manager\"");
        assert!(out.contains("-- pyenv_manager setup"));
    }

    #[test]
    fn rewrites_vim_global_guard() {
        // The bare-slug rule already rewrote the hyphenated form, so the
        // vim rules see underscores; the guard line still comes out right.
        let out = apply_all(&spec(), "vim.g.loaded_pyenv-manager = 1");
        assert_eq!(out, "vim.g.loaded_pyenv_manager = 1");
    }

    #[test]
    fn no_double_substitution_across_rules() {
        // Probes rule-ordering interference: a second pass over already
        // rewritten output must change nothing.
        let spec = spec();
        let inputs = [
            r#"require("pyenv-manager.core")"#,
            "require('pyenv-manager.venv')",
            "vim.g.loaded_pyenv-manager = 1",
            "vim.g.pyenv-manager_auto = true",
            "-- see pyenv-manager docs",
        ];
        for input in inputs {
            let once = apply_all(&spec, input);
            let twice = apply_all(&spec, &once);
            assert_eq!(once, twice, "double substitution for input: {}", input);
        }
    }

    #[test]
    fn rule_apply_reports_match_count() {
        let spec = spec();
        let bare = spec.rules.iter().find(|r| r.label == "bare slug").unwrap();
        let (_, count) = bare.apply("pyenv-manager and pyenv-manager again");
        assert_eq!(count, 2);
    }

    #[test]
    fn renamed_replaces_all_occurrences_literally() {
        let spec = spec();
        assert_eq!(
            spec.renamed("pyenv-manager-plugin").as_deref(),
            // Only the exact substring is replaced; the trailing `-plugin`
            // stays hyphenated.
            Some("pyenv_manager-plugin")
        );
        assert_eq!(
            spec.renamed("pyenv-manager-pyenv-manager.lua").as_deref(),
            Some("pyenv_manager-pyenv_manager.lua")
        );
        assert_eq!(spec.renamed("init.lua"), None);
    }
}
