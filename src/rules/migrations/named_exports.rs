//! Default-to-named export migration
//!
//! Rewrites `export default` declarations into named exports. Framework
//! entry points that must keep a default export (pages, layouts, route
//! handlers, middleware, config files) are excluded by glob.
//!
//! Files importing a converted module through the `@/` alias have
//! `import X from '@/path'` rewritten to `import { X } from '@/path'`, see
//! [`converted_modules`] and [`importers_rule_set`].

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;
use crate::rules::{PatternRule, RegexRule, RuleSet, Trigger};

/// Migration name
pub const NAME: &str = "named-exports";

/// One-line description shown by `codemod list`
pub const DESCRIPTION: &str = "Convert default exports to named exports";

/// Directory that [`IMPORT_ALIAS`] points at, relative to the project root
pub const SOURCE_ROOT: &str = "src";

/// Import path alias for [`SOURCE_ROOT`]
pub const IMPORT_ALIAS: &str = "@/";

/// Files that must keep their default export
pub const FRAMEWORK_FILES: &[&str] = &[
    "**/{page,layout,error,not-found,loading,template,default,global-error}.{ts,tsx,js,jsx}",
    "**/route.{ts,js}",
    "**/middleware.{ts,js}",
    "**/*.config.*",
];

lazy_static! {
    /// A standalone `export default Name` line, including its line break
    static ref TRAILING_DEFAULT: Regex =
        Regex::new(r"(?m)^export\s+default\s+(?P<name>[A-Za-z_$][\w$]*)[ \t]*;?[ \t]*(?:\r?\n|$)")
            .unwrap();

    /// `export default [async] function|class Name`
    static ref DEFAULT_DECLARATION: Regex = Regex::new(
        r"\bexport\s+default\s+(?:async\s+)?(?:function(?:\s*\*\s*|\s+)|class\s+)(?P<name>[A-Za-z_$][\w$]*)"
    )
    .unwrap();
}

/// A module whose default export is converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedModule {
    /// Aliased import path, e.g. `@/components/OrderCard`
    pub specifier: String,
    /// Name the default export is exported under afterwards
    pub export: String,
}

/// Build the rule set
pub fn rule_set() -> Result<RuleSet, ConfigError> {
    let function = RegexRule::template(
        format!("{NAME}/function"),
        Trigger::always().contains("export default"),
        r"\bexport\s+default\s+(?P<decl>(?:async\s+)?function(?:\s*\*\s*|\s+)[A-Za-z_$][\w$]*)",
        "export ${decl}",
    )?;

    let class = RegexRule::template(
        format!("{NAME}/class"),
        Trigger::always().contains("export default"),
        r"\bexport\s+default\s+(?P<decl>class\s+[A-Za-z_$][\w$]*)",
        "export ${decl}",
    )?;

    Ok(RuleSet::new(NAME, DESCRIPTION)
        .with_rule(function)
        .with_rule(class)
        .with_rule(TrailingDefaultRule {
            id: format!("{NAME}/trailing-default"),
        })
        .with_excludes(FRAMEWORK_FILES.iter().copied()))
}

/// Conversion rules followed by the importer rewrite for `modules`
pub fn rule_set_with_importers(modules: &[ConvertedModule]) -> Result<RuleSet, ConfigError> {
    let mut set = rule_set()?;
    if let Some(rule) = importers_rule(modules)? {
        set.push(Box::new(rule));
    }
    Ok(set)
}

/// Only the importer rewrite, for files the conversion rules do not touch
pub fn importers_rule_set(modules: &[ConvertedModule]) -> Result<RuleSet, ConfigError> {
    let set = RuleSet::new(NAME, DESCRIPTION);
    Ok(match importers_rule(modules)? {
        Some(rule) => set.with_rule(rule),
        None => set,
    })
}

/// Rewrites default imports of the converted modules into named imports.
///
/// A local name that differs from the export becomes `{ Export as Local }`.
fn importers_rule(modules: &[ConvertedModule]) -> Result<Option<RegexRule>, ConfigError> {
    if modules.is_empty() {
        return Ok(None);
    }

    let exports: HashMap<String, String> = modules
        .iter()
        .map(|m| (m.specifier.clone(), m.export.clone()))
        .collect();
    let specifiers = modules
        .iter()
        .map(|m| regex::escape(&m.specifier))
        .collect::<Vec<_>>()
        .join("|");

    RegexRule::computed(
        format!("{NAME}/importers"),
        Trigger::always().contains(IMPORT_ALIAS),
        &format!(
            r#"\bimport\s+(?P<local>[A-Za-z_$][\w$]*)\s+from\s+(?P<open>['"])(?P<module>{specifiers})(?P<close>['"])"#
        ),
        move |caps| {
            let local = &caps["local"];
            let Some(export) = exports.get(&caps["module"]) else {
                return caps[0].to_string();
            };
            let binding = if export == local {
                export.clone()
            } else {
                format!("{export} as {local}")
            };

            format!(
                "import {{ {binding} }} from {}{}{}",
                &caps["open"], &caps["module"], &caps["close"]
            )
        },
    )
    .map(Some)
}

/// Name of the default export the conversion rules will rewrite, if any
pub fn default_export_name(content: &str) -> Option<String> {
    if let Some(caps) = DEFAULT_DECLARATION.captures(content) {
        return Some(caps["name"].to_string());
    }

    TRAILING_DEFAULT
        .captures_iter(content)
        .filter_map(|caps| caps.name("name"))
        .find(|name| TrailingDefaultRule::declaration_start(content, name.as_str()).is_some())
        .map(|name| name.as_str().to_string())
}

/// Aliased import paths that resolve to `file`
///
/// `src/components/OrderCard.tsx` answers to `@/components/OrderCard`; an
/// `index` file also answers to its directory.
pub fn module_specifiers(source_root: &Path, file: &Path) -> Vec<String> {
    let Ok(relative) = file.strip_prefix(source_root) else {
        return Vec::new();
    };

    let parts: Vec<String> = relative
        .with_extension("")
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let Some((last, dirs)) = parts.split_last() else {
        return Vec::new();
    };

    let mut specifiers = vec![format!("{IMPORT_ALIAS}{}", parts.join("/"))];
    if last == "index" && !dirs.is_empty() {
        specifiers.push(format!("{IMPORT_ALIAS}{}", dirs.join("/")));
    }
    specifiers
}

/// Read `files` and collect every module whose default export converts
///
/// Unreadable files are left for the runner to report.
pub fn converted_modules(source_root: &Path, files: &[PathBuf]) -> Vec<ConvertedModule> {
    let mut modules = Vec::new();

    for file in files {
        let Ok(content) = fs::read_to_string(file) else {
            continue;
        };
        let Some(export) = default_export_name(&content) else {
            continue;
        };
        for specifier in module_specifiers(source_root, file) {
            debug!(%specifier, %export, "Default export will be converted");
            modules.push(ConvertedModule {
                specifier,
                export: export.clone(),
            });
        }
    }

    modules
}

/// Moves `export default Name` onto the declaration of `Name`
#[derive(Debug)]
struct TrailingDefaultRule {
    id: String,
}

impl TrailingDefaultRule {
    /// Start offset of the top-level, not yet exported declaration of `name`
    fn declaration_start(content: &str, name: &str) -> Option<usize> {
        let pattern = format!(
            r"(?m)^(?:async\s+)?(?:function(?:\s*\*\s*|\s+)|(?:class|const|let|var)\s+){}\b",
            regex::escape(name)
        );
        Regex::new(&pattern).ok()?.find(content).map(|m| m.start())
    }
}

impl PatternRule for TrailingDefaultRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn trigger(&self, content: &str) -> bool {
        content.contains("export default")
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        // (offset, removed length, inserted text)
        let mut edits: Vec<(usize, usize, &str)> = Vec::new();

        for caps in TRAILING_DEFAULT.captures_iter(content) {
            let (Some(line), Some(name)) = (caps.get(0), caps.name("name")) else {
                continue;
            };
            if let Some(start) = Self::declaration_start(content, name.as_str()) {
                edits.push((start, 0, "export "));
                edits.push((line.start(), line.len(), ""));
            }
        }

        if edits.is_empty() {
            return Cow::Borrowed(content);
        }

        edits.sort_by_key(|(offset, _, _)| *offset);
        let mut output = String::with_capacity(content.len() + edits.len() * 7);
        let mut cursor = 0;
        for (offset, removed, inserted) in edits {
            if offset < cursor {
                continue;
            }
            output.push_str(&content[cursor..offset]);
            output.push_str(inserted);
            cursor = offset + removed;
        }
        output.push_str(&content[cursor..]);

        Cow::Owned(output)
    }
}
