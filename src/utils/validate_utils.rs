use core::fmt;

use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Deserializer,
};
use validator::ValidationError;

use crate::entities::project::rating_entity::{RATING_MAX, RATING_MIN};
use crate::utils::format_utils::parse_date;

pub const FEEDBACK_QUESTIONS: usize = 6;

pub fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    match parse_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("invalid_date")
            .with_message("Date must be YYYY-MM-DD".into())),
    }
}

pub fn validate_feedback_scores(scores: &[u8]) -> Result<(), ValidationError> {
    if scores.len() != FEEDBACK_QUESTIONS {
        return Err(ValidationError::new("invalid_feedback")
            .with_message(format!("Expected {FEEDBACK_QUESTIONS} answers").into()));
    }
    if scores.iter().any(|s| *s < RATING_MIN || *s > RATING_MAX) {
        return Err(ValidationError::new("invalid_feedback")
            .with_message(format!("Each answer must be {RATING_MIN}-{RATING_MAX}").into()));
    }
    Ok(())
}

pub fn validate_budget_order(from: Option<u64>, to: Option<u64>) -> Result<(), ValidationError> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(ValidationError::new("invalid_budget")
            .with_message("budgetFrom must not exceed budgetTo".into())),
        _ => Ok(()),
    }
}

/// Skills arrive as a JSON array or, from forms, as one comma separated string.
pub fn deserialize_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SkillsVisitor;

    impl<'de> Visitor<'de> for SkillsVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of skills or a comma separated string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Vec<String>, E>
        where
            E: de::Error,
        {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Vec<String>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut skills = Vec::new();
            while let Some(skill) = seq.next_element::<String>()? {
                let skill = skill.trim();
                if !skill.is_empty() {
                    skills.push(skill.to_string());
                }
            }
            Ok(skills)
        }

        fn visit_unit<E>(self) -> Result<Vec<String>, E>
        where
            E: de::Error,
        {
            Ok(vec![])
        }
    }

    deserializer.deserialize_any(SkillsVisitor)
}

pub fn deserialize_skills_opt<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_skills(deserializer).map(Some)
}
