//! Deterministic Extractor — regex and keyword extraction with no model call.
//!
//! This is the pipeline's safety net: pure, fast, and infallible. It only
//! attempts contact info and dictionary skills. Name, education, projects,
//! and experience stay empty on purpose; line-oriented heuristics for those
//! fields are unreliable without layout information and would report signal
//! the extraction does not actually have.

use regex::Regex;

use crate::extraction::profile::ExtractedProfile;

/// Fixed confidence assigned to every deterministic extraction.
pub const DETERMINISTIC_CONFIDENCE: f32 = 0.3;

/// Skill keywords scanned for by the deterministic path. Matching is
/// case-insensitive substring; order here is the order skills appear in
/// the output.
const DEFAULT_SKILL_TERMS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "c++",
    "c#",
    "golang",
    "kotlin",
    "swift",
    "react",
    "angular",
    "vue",
    "next.js",
    "node.js",
    "django",
    "flask",
    "spring boot",
    "html",
    "css",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "terraform",
    "git",
    "linux",
    "machine learning",
    "deep learning",
    "data analysis",
    "pandas",
    "numpy",
    "tensorflow",
    "pytorch",
    "rest api",
    "graphql",
    "agile",
];

/// Immutable skill dictionary injected into the extractor, so tests can run
/// with alternate term sets.
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    terms: Vec<String>,
}

impl SkillDictionary {
    /// Builds a dictionary from the given terms, collapsing duplicates
    /// (case-insensitive) while keeping first-occurrence order.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen_lower: Vec<String> = Vec::new();
        let mut deduped: Vec<String> = Vec::new();
        for term in terms {
            let term = term.into();
            let lower = term.to_lowercase();
            if !seen_lower.contains(&lower) {
                seen_lower.push(lower);
                deduped.push(term);
            }
        }
        Self { terms: deduped }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl Default for SkillDictionary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILL_TERMS.iter().copied())
    }
}

/// Pattern-based extractor used as the guaranteed-available fallback.
///
/// Cannot fail: any panic here is a programming defect, not an expected
/// runtime condition, so there is no error type on this path.
#[derive(Debug, Clone)]
pub struct DeterministicExtractor {
    email_re: Regex,
    phone_re: Regex,
    dictionary: SkillDictionary,
}

impl DeterministicExtractor {
    pub fn new(dictionary: SkillDictionary) -> Self {
        Self {
            // local-part @ domain . TLD, TLD at least two letters
            email_re: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
                .expect("email regex is valid"),
            // optional country code, then 3-4 digit groups split by space/hyphen/dot;
            // digit-count filtering below enforces the 10-11 digit total
            phone_re: Regex::new(r"\+?\d{1,3}[\s.-]?\d{3,4}[\s.-]?\d{3,4}(?:[\s.-]?\d{3,4})?")
                .expect("phone regex is valid"),
            dictionary,
        }
    }

    /// Extracts contact info and dictionary skills from `text`.
    /// Always returns a fully-formed profile with confidence 0.3.
    pub fn extract(&self, text: &str) -> ExtractedProfile {
        let email = self
            .email_re
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let phone = self
            .phone_re
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|candidate| {
                let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
                (10..=11).contains(&digits)
            })
            .map(str::to_string)
            .unwrap_or_default();

        let text_lower = text.to_lowercase();
        let skills: Vec<String> = self
            .dictionary
            .terms()
            .iter()
            .filter(|term| text_lower.contains(&term.to_lowercase()))
            .cloned()
            .collect();

        tracing::debug!(
            email_found = !email.is_empty(),
            phone_found = !phone.is_empty(),
            skills_found = skills.len(),
            "deterministic extraction complete"
        );

        ExtractedProfile {
            name: String::new(),
            email,
            phone,
            skills,
            education: Vec::new(),
            projects: Vec::new(),
            experience: Vec::new(),
            confidence: DETERMINISTIC_CONFIDENCE,
        }
    }
}

impl Default for DeterministicExtractor {
    fn default() -> Self {
        Self::new(SkillDictionary::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_and_single_skill() {
        let extractor = DeterministicExtractor::default();
        let profile =
            extractor.extract("Jane Doe, frontend developer. react apps. jane@example.com");
        assert_eq!(profile.email, "jane@example.com");
        assert!(profile.phone.is_empty());
        assert_eq!(profile.skills, vec!["react"]);
        assert_eq!(profile.confidence, DETERMINISTIC_CONFIDENCE);
    }

    #[test]
    fn test_first_of_multiple_emails_is_kept() {
        let extractor = DeterministicExtractor::default();
        let profile = extractor.extract("contact: first@example.com or second@example.org, both work");
        assert_eq!(profile.email, "first@example.com");
    }

    #[test]
    fn test_email_requires_two_letter_tld() {
        let extractor = DeterministicExtractor::default();
        let profile = extractor.extract("broken address someone@host.x here");
        assert!(profile.email.is_empty());
    }

    #[test]
    fn test_phone_with_country_code() {
        let extractor = DeterministicExtractor::default();
        let profile = extractor.extract("Call me at +1 415 555 0132 any weekday.");
        assert_eq!(profile.phone, "+1 415 555 0132");
    }

    #[test]
    fn test_phone_hyphen_separated() {
        let extractor = DeterministicExtractor::default();
        let profile = extractor.extract("Phone: 0415-555-0132 (mobile)");
        assert_eq!(profile.phone, "0415-555-0132");
    }

    #[test]
    fn test_short_digit_runs_are_not_phones() {
        let extractor = DeterministicExtractor::default();
        // 9 digits total: below the 10-digit floor
        let profile = extractor.extract("ref 123 456 789 in the ticket");
        assert!(profile.phone.is_empty());
    }

    #[test]
    fn test_skill_match_is_case_insensitive() {
        let extractor = DeterministicExtractor::default();
        let profile = extractor.extract("Built dashboards with React and PostgreSQL on AWS.");
        assert!(profile.skills.iter().any(|s| s == "react"));
        assert!(profile.skills.iter().any(|s| s == "postgresql"));
        assert!(profile.skills.iter().any(|s| s == "aws"));
    }

    #[test]
    fn test_skills_follow_dictionary_order() {
        let extractor = DeterministicExtractor::new(SkillDictionary::new(["rust", "docker", "sql"]));
        let profile = extractor.extract("sql and docker and rust, in that order in the text");
        assert_eq!(profile.skills, vec!["rust", "docker", "sql"]);
    }

    #[test]
    fn test_dictionary_deduplicates_terms() {
        let dictionary = SkillDictionary::new(["rust", "Rust", "sql", "rust"]);
        assert_eq!(dictionary.terms(), ["rust", "sql"]);
    }

    #[test]
    fn test_structural_fields_always_empty() {
        let extractor = DeterministicExtractor::default();
        let profile = extractor.extract(
            "John Smith\nEducation: BSc CS\nProjects: chat app\nExperience: Acme Corp 2019-2023",
        );
        assert!(profile.name.is_empty());
        assert!(profile.education.is_empty());
        assert!(profile.projects.is_empty());
        assert!(profile.experience.is_empty());
    }

    #[test]
    fn test_no_signal_still_yields_fixed_confidence() {
        let extractor = DeterministicExtractor::default();
        let profile = extractor.extract("lorem ipsum dolor sit amet");
        assert!(profile.email.is_empty());
        assert!(profile.skills.is_empty());
        assert_eq!(profile.confidence, DETERMINISTIC_CONFIDENCE);
    }
}
