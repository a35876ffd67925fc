//! Keyword extraction from resume text.
//!
//! The inference call produces a bulleted list of search terms; only the
//! bullet-line parsing is local logic. An output that does not follow the
//! expected format parses to an empty set, which callers must treat as an
//! extraction failure rather than "no skills found".

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::resume::prompts::SEARCH_TERMS_PROMPT;

/// Parses every line of the form `- <term>` into a trimmed, lower-cased
/// term, preserving order and discarding blanks.
pub fn parse_bullet_terms(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.trim_start().strip_prefix("- "))
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

/// Asks the LLM for job-search terms derived from resume text and parses the
/// bulleted response. An empty result means the model ignored the format.
pub async fn extract_search_terms(
    resume_text: &str,
    llm: &LlmClient,
) -> Result<Vec<String>, AppError> {
    let prompt = SEARCH_TERMS_PROMPT.replace("{resume_text}", resume_text);
    let content = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Search term extraction failed: {e}")))?;

    Ok(parse_bullet_terms(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bulleted_terms_in_order() {
        let input = "Search Terms:\n- python\n- sql\n";
        assert_eq!(parse_bullet_terms(input), vec!["python", "sql"]);
    }

    #[test]
    fn test_terms_are_lowercased_and_trimmed() {
        let input = "- Backend Engineering  \n-  SQL\n";
        assert_eq!(parse_bullet_terms(input), vec!["backend engineering", "sql"]);
    }

    #[test]
    fn test_no_bullet_lines_yields_empty_set() {
        let input = "I could not find any skills in this resume.";
        assert!(parse_bullet_terms(input).is_empty());
    }

    #[test]
    fn test_blank_bullets_are_discarded() {
        let input = "- python\n- \n- sql";
        assert_eq!(parse_bullet_terms(input), vec!["python", "sql"]);
    }

    #[test]
    fn test_indented_bullets_are_accepted() {
        let input = "Search Terms:\n  - rust\n  - tokio";
        assert_eq!(parse_bullet_terms(input), vec!["rust", "tokio"]);
    }

    #[test]
    fn test_non_bullet_lines_are_ignored() {
        let input = "Here are terms:\n- rust\nnot a bullet\n- axum";
        assert_eq!(parse_bullet_terms(input), vec!["rust", "axum"]);
    }
}
