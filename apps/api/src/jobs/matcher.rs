//! Relevance Matcher — ranks cached job listings against resume-derived
//! keywords. Pure, deterministic, no upstream calls.

use crate::jobs::models::JobListing;

/// Number of ranked jobs returned to callers unless they ask otherwise.
pub const DEFAULT_TOP_N: usize = 5;

/// A job listing paired with its keyword match count. Derived, never persisted.
#[derive(Debug)]
pub struct RankedJob<'a> {
    pub job: &'a JobListing,
    pub match_count: usize,
}

/// Scores each job against the keyword set and returns the top `top_n`.
///
/// `match_count` is the number of keywords appearing (case-insensitively, as
/// substrings) in the title plus the number appearing in the description; a
/// keyword present in both counts twice. Zero-count jobs are excluded. The
/// sort is stable, so ties keep the upstream fetch order.
///
/// An empty keyword set matches nothing. An empty corpus yields an empty
/// result, which callers must treat as "cache not yet warmed" rather than
/// "no relevant jobs".
pub fn rank<'a>(jobs: &'a [JobListing], keywords: &[String], top_n: usize) -> Vec<RankedJob<'a>> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let mut ranked: Vec<RankedJob<'a>> = jobs
        .iter()
        .filter_map(|job| {
            let count = match_count(job, &keywords);
            (count > 0).then_some(RankedJob {
                job,
                match_count: count,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    ranked.truncate(top_n);
    ranked
}

fn match_count(job: &JobListing, lowered_keywords: &[String]) -> usize {
    let title = job.title.to_lowercase();
    let description = job.description.to_lowercase();

    let in_title = lowered_keywords.iter().filter(|k| title.contains(*k)).count();
    let in_description = lowered_keywords
        .iter()
        .filter(|k| description.contains(*k))
        .count();

    in_title + in_description
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, description: &str) -> JobListing {
        JobListing {
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_keywords_match_nothing() {
        let jobs = vec![job("Backend Engineer", "Rust services")];
        assert!(rank(&jobs, &[], DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_empty_corpus_yields_empty_result() {
        assert!(rank(&[], &kw(&["rust"]), DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_title_match_is_case_insensitive_and_stable_on_ties() {
        let jobs = vec![
            job("Backend Engineer", ""),
            job("Data Scientist", ""),
            job("Senior Backend Lead", ""),
        ];

        let ranked = rank(&jobs, &kw(&["backend"]), DEFAULT_TOP_N);
        let titles: Vec<&str> = ranked.iter().map(|r| r.job.title.as_str()).collect();
        assert_eq!(titles, vec!["Backend Engineer", "Senior Backend Lead"]);
    }

    #[test]
    fn test_keyword_in_title_and_description_counts_twice() {
        let jobs = vec![
            job("Rust Engineer", "Rust all day"),
            job("Platform Engineer", "Some Rust on the side"),
        ];

        let ranked = rank(&jobs, &kw(&["rust"]), DEFAULT_TOP_N);
        assert_eq!(ranked[0].job.title, "Rust Engineer");
        assert_eq!(ranked[0].match_count, 2);
        assert_eq!(ranked[1].match_count, 1);
    }

    #[test]
    fn test_zero_count_jobs_are_excluded() {
        let jobs = vec![job("Accountant", "Ledgers"), job("Rust Dev", "")];
        let ranked = rank(&jobs, &kw(&["rust"]), DEFAULT_TOP_N);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].job.title, "Rust Dev");
    }

    #[test]
    fn test_higher_match_counts_sort_first() {
        let jobs = vec![
            job("Engineer", "python"),
            job("Engineer", "python sql aws"),
            job("Engineer", "sql"),
        ];

        let ranked = rank(&jobs, &kw(&["python", "sql", "aws"]), DEFAULT_TOP_N);
        assert_eq!(ranked[0].match_count, 3);
        assert_eq!(ranked[0].job.description, "python sql aws");
    }

    #[test]
    fn test_top_n_truncation_keeps_highest_counts() {
        let mut jobs = Vec::new();
        for i in 0..10 {
            // Descriptions repeat the keyword count in distinct fields so the
            // first five jobs have counts 10, 9, 8, 7, 6.
            let terms: Vec<String> = (0..(10 - i)).map(|n| format!("skill{n}")).collect();
            jobs.push(job("Engineer", &terms.join(" ")));
        }
        let keywords: Vec<String> = (0..10).map(|n| format!("skill{n}")).collect();

        let ranked = rank(&jobs, &keywords, 5);
        assert_eq!(ranked.len(), 5);
        let counts: Vec<usize> = ranked.iter().map(|r| r.match_count).collect();
        assert_eq!(counts, vec![10, 9, 8, 7, 6]);
    }
}
