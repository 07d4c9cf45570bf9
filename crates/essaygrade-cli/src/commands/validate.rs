//! The `essaygrade validate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use essaygrade_core::parser::{load_question_directory, parse_question, validate_question};
use essaygrade_core::Question;

pub fn execute(question_path: PathBuf) -> Result<()> {
    let questions = load(&question_path)?;
    anyhow::ensure!(
        !questions.is_empty(),
        "no question files found in {}",
        question_path.display()
    );

    let total_warnings: usize = questions
        .iter()
        .map(|(path, question)| report(path, question))
        .sum();

    match total_warnings {
        0 => println!("All questions valid."),
        n => println!("\n{n} warning(s) found."),
    }
    Ok(())
}

fn load(path: &Path) -> Result<Vec<(PathBuf, Question)>> {
    if path.is_dir() {
        load_question_directory(path)
    } else {
        Ok(vec![(path.to_path_buf(), parse_question(path)?)])
    }
}

/// Print one question's summary and warnings; returns the warning count.
fn report(path: &Path, question: &Question) -> usize {
    println!(
        "Question: {} ({} keyword groups, {} points)",
        path.display(),
        question.keyword_groups().len(),
        question.total_points()
    );

    let warnings = validate_question(question);
    for warning in &warnings {
        match warning.group {
            Some(group) => println!("  [group {group}] WARNING: {}", warning.message),
            None => println!("  WARNING: {}", warning.message),
        }
    }
    warnings.len()
}
