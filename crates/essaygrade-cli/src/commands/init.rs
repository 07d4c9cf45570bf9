//! The `essaygrade init` command.

use std::path::Path;

use anyhow::{Context, Result};

use essaygrade_core::settings::Settings;

const SETTINGS_PATH: &str = "essaygrade.toml";
const EXAMPLE_PATH: &str = "questions/example.json";

pub fn execute() -> Result<()> {
    let settings = format!(
        "# essaygrade settings (defaults shown)\n\n{}",
        toml::to_string_pretty(&Settings::default()).context("failed to render settings")?
    );

    let created = [(SETTINGS_PATH, settings.as_str()), (EXAMPLE_PATH, EXAMPLE_QUESTION)]
        .into_iter()
        .map(|(path, contents)| write_new(Path::new(path), contents))
        .collect::<Result<Vec<bool>>>()?;

    if created.iter().any(|&c| c) {
        println!("\nNext steps:");
        println!("  essaygrade validate --question {EXAMPLE_PATH}");
        println!("  essaygrade grade --question {EXAMPLE_PATH} --text \"...\"");
        println!("  essaygrade session --question {EXAMPLE_PATH}");
    }

    Ok(())
}

/// Write `contents` unless the file is already there. Returns whether it was written.
fn write_new(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(true)
}

const EXAMPLE_QUESTION: &str = r#"{
  "taskDescription": "Explain how plants make their food.",
  "keywordGroups": [
    {
      "alternatives": [
        { "alternative": "photosynthesis", "options": { "forgiveMistakes": true } }
      ],
      "options": {
        "points": 2,
        "feedbackFound": "You named the process.",
        "feedbackMissed": "What is the process called?"
      }
    },
    {
      "alternatives": [
        { "alternative": "sunlight", "options": {} },
        { "alternative": "light", "options": {} }
      ],
      "options": {
        "points": 1,
        "feedbackMissed": "Where does the energy come from?"
      }
    },
    {
      "alternatives": [
        { "alternative": "CO2", "options": { "caseSensitive": true } },
        { "alternative": "carbon dioxide", "options": { "forgiveMistakes": true } }
      ],
      "options": {
        "points": 1,
        "feedbackFound": "Good, you mentioned carbon dioxide."
      }
    }
  ],
  "behaviour": {
    "scorePassing": 2,
    "overrideCaseSensitive": "default",
    "overrideForgiveMistakes": "default",
    "enableRetry": true
  },
  "overallFeedback": [
    { "from": 0, "to": 49, "feedback": "You got @score of @total points. Keep at it." },
    { "from": 50, "to": 99, "feedback": "You got @score of @total points." },
    { "from": 100, "to": 100, "feedback": "Excellent! @score of @total points." }
  ]
}
"#;
