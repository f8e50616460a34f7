//! Interactive input from the learner.

use dialoguer::Input;

use crate::error::{Error, Result};

/// Asks the learner to paste a commit hash.
///
/// Blocks on stdin; there is no timeout. Surrounding whitespace is stripped
/// so a value copied from `git log` output still compares cleanly.
pub fn read_hash(message: &str) -> Result<String> {
    let answer: String = Input::new()
        .with_prompt(message)
        .interact_text()
        .map_err(|e| Error::Prompt(e.to_string()))?;
    Ok(answer.trim().to_string())
}
