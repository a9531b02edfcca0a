//! Lint engine for detecting defects in generator definitions.
//!
//! Runs over a loaded definition without generating anything, so it also
//! finds problems on branches a random run may never take: empty tags,
//! references to missing tags, variables that are read but never set,
//! malformed values, and switch targets without a `default` key.

use std::collections::BTreeSet;
use std::fmt;

use crate::definition::{GeneratorDefinition, DEFAULT_KEY};
use crate::error::GrammarError;
use crate::scanner::{scan, TagKind, ASSIGN_SEPARATOR, SWITCH_SEPARATOR};

/// A lint warning about a definition defect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    EmptyTag,
    UndefinedTag,
    UnsetVariable,
    MalformedTag,
    NestedDelimiter,
    SwitchWithoutDefault,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::EmptyTag => write!(f, "empty-tag"),
            LintCategory::UndefinedTag => write!(f, "undefined-tag"),
            LintCategory::UnsetVariable => write!(f, "unset-variable"),
            LintCategory::MalformedTag => write!(f, "malformed-tag"),
            LintCategory::NestedDelimiter => write!(f, "nested-delimiter"),
            LintCategory::SwitchWithoutDefault => write!(f, "switch-without-default"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Where a value lives: tag name and key
type Origin<'a> = (&'a str, &'a str);

/// Tags referenced by the values of a definition
#[derive(Default)]
struct References<'a> {
    selects: Vec<(Origin<'a>, String)>,
    switches: Vec<(Origin<'a>, String, String)>,
    reads: Vec<(Origin<'a>, String)>,
    writes: BTreeSet<String>,
}

/// Run all lint checks on a definition.
pub fn check(definition: &GeneratorDefinition) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    let refs = collect_references(definition, &mut warnings);
    check_empty_tags(definition, &mut warnings);
    check_undefined_tags(definition, &refs, &mut warnings);
    check_unset_variables(definition, &refs, &mut warnings);
    check_switch_defaults(definition, &refs, &mut warnings);
    warnings
}

/// Tags of a single value, in order, with trimmed bodies
fn tags_in(value: &str) -> Result<Vec<(TagKind, String)>, GrammarError> {
    let mut found = Vec::new();
    let mut rest = value.to_string();
    loop {
        let tag = scan(&rest)?;
        if tag.is_none() {
            return Ok(found);
        }
        found.push((tag.kind, tag.body.trim().to_string()));
        rest = tag.after;
    }
}

fn collect_references<'a>(
    definition: &'a GeneratorDefinition,
    warnings: &mut Vec<LintWarning>,
) -> References<'a> {
    let mut refs = References::default();

    for (tag_name, tag) in &definition.tags {
        for (key, value) in tag {
            let origin = (tag_name.as_str(), key.as_str());
            let tags = match tags_in(value) {
                Ok(tags) => tags,
                Err(e) => {
                    let category = match e {
                        GrammarError::MalformedTag { .. } => LintCategory::MalformedTag,
                        GrammarError::NestedDelimiter { .. } => LintCategory::NestedDelimiter,
                    };
                    warnings.push(LintWarning {
                        category,
                        message: format!("{}: {}", describe(origin), e),
                    });
                    continue;
                }
            };

            for (kind, body) in tags {
                match kind {
                    TagKind::Random => refs.selects.push((origin, body)),
                    TagKind::Switch => {
                        let (target, variable) =
                            body.split_once(SWITCH_SEPARATOR).unwrap_or((body.as_str(), ""));
                        refs.switches.push((
                            origin,
                            target.trim().to_string(),
                            variable.trim().to_string(),
                        ));
                    }
                    TagKind::VarGet => refs.reads.push((origin, body)),
                    TagKind::VarSet => {
                        let name = body
                            .split_once(ASSIGN_SEPARATOR)
                            .map_or(body.as_str(), |(name, _)| name);
                        refs.writes.insert(name.trim().to_string());
                    }
                    TagKind::None => {}
                }
            }
        }
    }

    refs
}

fn describe((tag, key): Origin<'_>) -> String {
    format!("value \"{}\" of tag \"{}\"", key, tag)
}

fn check_empty_tags(definition: &GeneratorDefinition, warnings: &mut Vec<LintWarning>) {
    for (name, tag) in &definition.tags {
        if tag.is_empty() {
            warnings.push(LintWarning {
                category: LintCategory::EmptyTag,
                message: format!("tag \"{}\" has no values", name),
            });
        }
    }
}

fn check_undefined_tags(
    definition: &GeneratorDefinition,
    refs: &References<'_>,
    warnings: &mut Vec<LintWarning>,
) {
    let targets = refs
        .selects
        .iter()
        .map(|(origin, name)| (origin, name))
        .chain(refs.switches.iter().map(|(origin, name, _)| (origin, name)));

    for (origin, name) in targets {
        if !definition.has_tag(name) {
            warnings.push(LintWarning {
                category: LintCategory::UndefinedTag,
                message: format!("{} references undefined tag \"{}\"", describe(*origin), name),
            });
        }
    }
}

fn check_unset_variables(
    definition: &GeneratorDefinition,
    refs: &References<'_>,
    warnings: &mut Vec<LintWarning>,
) {
    let is_set =
        |name: &str| refs.writes.contains(name) || definition.variables.contains_key(name);

    let reads = refs
        .reads
        .iter()
        .map(|(origin, name)| (origin, name))
        .chain(refs.switches.iter().map(|(origin, _, variable)| (origin, variable)));

    for (origin, name) in reads {
        if !is_set(name.as_str()) {
            warnings.push(LintWarning {
                category: LintCategory::UnsetVariable,
                message: format!(
                    "{} reads variable \"{}\" which is never set",
                    describe(*origin),
                    name
                ),
            });
        }
    }
}

fn check_switch_defaults(
    definition: &GeneratorDefinition,
    refs: &References<'_>,
    warnings: &mut Vec<LintWarning>,
) {
    let mut reported = BTreeSet::new();
    for (_, target, _) in &refs.switches {
        let Some(tag) = definition.tag(target) else {
            continue;
        };
        if !tag.contains_key(DEFAULT_KEY) && reported.insert(target.as_str()) {
            warnings.push(LintWarning {
                category: LintCategory::SwitchWithoutDefault,
                message: format!(
                    "tag \"{}\" is used in a switch but has no \"{}\" value",
                    target, DEFAULT_KEY
                ),
            });
        }
    }
}
