//! Question file parser.
//!
//! Loads questions from JSON or TOML files and directories, and validates
//! them. Both formats share one camelCase schema, so an exported content
//! file can be graded as-is.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::{
    Alternative, BehaviourOptions, FeedbackRange, KeywordGroup, Override, Question,
};

/// Supported question file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFormat {
    Json,
    Toml,
}

impl QuestionFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(QuestionFormat::Json),
            Some("toml") => Ok(QuestionFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Intermediate structure for parsing question files.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    #[serde(default)]
    keyword_groups: Option<Vec<RawKeywordGroup>>,
    #[serde(default)]
    behaviour: RawBehaviour,
    #[serde(default)]
    overall_feedback: Vec<FeedbackRange>,
    #[serde(default)]
    task_description: Option<String>,
    #[serde(default)]
    input_field: Option<RawInputField>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInputField {
    #[serde(default)]
    params: RawInputParams,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInputParams {
    #[serde(default)]
    task_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKeywordGroup {
    #[serde(default)]
    alternatives: Vec<RawAlternative>,
    #[serde(default)]
    options: RawGroupOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGroupOptions {
    #[serde(default)]
    points: f64,
    #[serde(default)]
    feedback_found: Option<String>,
    #[serde(default)]
    feedback_missed: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAlternative {
    #[serde(default)]
    alternative: String,
    #[serde(default)]
    options: RawAlternativeOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAlternativeOptions {
    #[serde(default)]
    case_sensitive: bool,
    #[serde(default)]
    forgive_mistakes: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBehaviour {
    #[serde(default)]
    score_mastering: Option<f64>,
    #[serde(default)]
    score_passing: Option<f64>,
    #[serde(default)]
    override_case_sensitive: Override,
    #[serde(default)]
    override_forgive_mistakes: Override,
    #[serde(default)]
    enable_retry: bool,
}

/// Parse a single question file, picking the format from its extension.
pub fn parse_question(path: &Path) -> Result<Question> {
    let format = QuestionFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;

    parse_question_str(&content, format, path)
}

/// Parse a question document (useful for testing).
pub fn parse_question_str(
    content: &str,
    format: QuestionFormat,
    source_path: &Path,
) -> Result<Question> {
    let parsed: RawQuestion = match format {
        QuestionFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?,
        QuestionFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?,
    };

    let keyword_groups = parsed
        .keyword_groups
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, g)| {
            let points = g.options.points;
            if !points.is_finite() || points < 0.0 {
                return Err(ConfigError::InvalidPoints {
                    group: index + 1,
                    points,
                });
            }

            let alternatives = g
                .alternatives
                .into_iter()
                .map(|a| Alternative {
                    text: a.alternative,
                    case_sensitive: a.options.case_sensitive,
                    forgive_mistakes: a.options.forgive_mistakes,
                })
                .collect();

            Ok(KeywordGroup {
                alternatives,
                points,
                feedback_found: g.options.feedback_found,
                feedback_missed: g.options.feedback_missed,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    let behaviour = parsed.behaviour;
    check_threshold("scoreMastering", behaviour.score_mastering)?;
    check_threshold("scorePassing", behaviour.score_passing)?;

    let options = BehaviourOptions {
        score_mastering: behaviour.score_mastering,
        score_passing: behaviour.score_passing,
        override_case_sensitive: behaviour.override_case_sensitive,
        override_forgive_mistakes: behaviour.override_forgive_mistakes,
        enable_retry: behaviour.enable_retry,
    };

    let task_description = parsed
        .task_description
        .or_else(|| parsed.input_field.and_then(|f| f.params.task_description));

    let question = Question::new(keyword_groups, options, parsed.overall_feedback);
    Ok(match task_description {
        Some(description) => question.with_task_description(description),
        None => question,
    })
}

/// NaN and negative values are rejected; `inf` reads as "unlimited".
fn check_threshold(name: &'static str, value: Option<f64>) -> Result<(), ConfigError> {
    match value {
        Some(v) if v.is_nan() || v < 0.0 => Err(ConfigError::InvalidThreshold { name, value: v }),
        _ => Ok(()),
    }
}

/// Recursively load every `.json` and `.toml` question file from a directory.
pub fn load_question_directory(dir: &Path) -> Result<Vec<(PathBuf, Question)>> {
    let mut questions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            questions.extend(load_question_directory(&path)?);
        } else if QuestionFormat::from_path(&path).is_ok() {
            match parse_question(&path) {
                Ok(question) => questions.push((path, question)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(questions)
}

/// A warning from question validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The keyword group (1-based), if applicable.
    pub group: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(message: impl Into<String>) -> Self {
        Self {
            group: None,
            message: message.into(),
        }
    }

    fn group(index: usize, message: impl Into<String>) -> Self {
        Self {
            group: Some(index + 1),
            message: message.into(),
        }
    }
}

/// Validate a question for common authoring mistakes.
pub fn validate_question(question: &Question) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let groups = question.keyword_groups();

    if groups.is_empty() {
        warnings.push(ValidationWarning::question(
            "no keyword groups; every answer scores 0",
        ));
    }

    for (index, group) in groups.iter().enumerate() {
        if group.alternatives.is_empty() {
            warnings.push(ValidationWarning::group(index, "group has no alternatives"));
        }
        if group.points == 0.0 {
            warnings.push(ValidationWarning::group(index, "group awards 0 points"));
        }

        let mut seen = std::collections::HashSet::new();
        for alternative in &group.alternatives {
            if alternative.text.trim().is_empty() {
                warnings.push(ValidationWarning::group(index, "alternative is blank"));
                continue;
            }
            if !seen.insert(alternative.text.to_lowercase()) {
                warnings.push(ValidationWarning::group(
                    index,
                    format!("duplicate alternative: {}", alternative.text),
                ));
            }
        }
    }

    // Thresholds clamped at load time
    let total = question.total_points();
    let behaviour = question.behaviour();
    if let Some(mastering) = question.options().score_mastering {
        if mastering > total {
            warnings.push(ValidationWarning::question(format!(
                "scoreMastering {mastering} exceeds total points {total}; using {total}"
            )));
        }
    }
    if let Some(passing) = question.options().score_passing {
        if passing > behaviour.score_mastering {
            warnings.push(ValidationWarning::question(format!(
                "scorePassing {passing} exceeds mastering score {}; using {}",
                behaviour.score_mastering, behaviour.score_mastering
            )));
        }
    }

    warnings.extend(validate_feedback_ranges(question.overall_feedback()));
    warnings
}

fn validate_feedback_ranges(ranges: &[FeedbackRange]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    if ranges.is_empty() {
        return warnings;
    }

    let mut covered = [false; 101];
    for range in ranges {
        if range.from > range.to {
            warnings.push(ValidationWarning::question(format!(
                "overall feedback range {}-{}% is empty",
                range.from, range.to
            )));
            continue;
        }
        if range.to > 100 {
            warnings.push(ValidationWarning::question(format!(
                "overall feedback range {}-{}% exceeds 100%",
                range.from, range.to
            )));
        }
        if range.from <= 100 {
            let to = range.to.min(100) as usize;
            covered[range.from as usize..=to]
                .iter_mut()
                .for_each(|c| *c = true);
        }
    }

    let mut percent = 0;
    while percent <= 100 {
        if covered[percent] {
            percent += 1;
            continue;
        }
        let start = percent;
        while percent <= 100 && !covered[percent] {
            percent += 1;
        }
        warnings.push(ValidationWarning::question(format!(
            "overall feedback does not cover {}-{}%",
            start,
            percent - 1
        )));
    }

    warnings
}
