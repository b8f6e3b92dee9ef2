//! Request shaping and output post-processing for the external scenario generator.

use serde::{Deserialize, Serialize};

use super::collaborators::CollaboratorError;
use super::difficulty::ProficiencyLevel;
use super::domain::{Question, QuestionId, QuestionKind};

/// Everything the generator needs, including themes to steer away from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub role: String,
    pub difficulty: ProficiencyLevel,
    pub skills: Vec<String>,
    #[serde(default)]
    pub avoid_themes: Vec<String>,
    #[serde(default)]
    pub experience_years: Option<f64>,
}

impl ScenarioRequest {
    /// Prompt text for a generative provider. Provider-agnostic.
    pub fn prompt(&self) -> String {
        let personalization = self
            .experience_years
            .map(|years| format!("The candidate has {years} years of experience."))
            .unwrap_or_default();
        let avoid = if self.avoid_themes.is_empty() {
            String::new()
        } else {
            format!(
                "Avoid these themes that were already covered: {}.",
                self.avoid_themes.join(", ")
            )
        };

        format!(
            "Generate a {complexity} workplace scenario for a {role} position.\n\
             Required skills: {skills}.\n\
             {personalization}\n\
             {avoid}\n\n\
             Create a realistic, job-specific scenario that tests problem-solving, creative \
             thinking, and decision-making.\n\n\
             Format the response as JSON with these fields:\n\
             - title: Brief descriptive title\n\
             - description: Short overview of the scenario\n\
             - context: Detailed background information\n\
             - challenges: Array of specific challenges to address\n\
             - stakeholders: Key people involved in the scenario",
            complexity = complexity_wording(self.difficulty),
            role = self.role,
            skills = self.skills.join(", "),
        )
    }
}

fn complexity_wording(level: ProficiencyLevel) -> &'static str {
    match level {
        ProficiencyLevel::Entry => "basic",
        ProficiencyLevel::Intermediate => "moderate",
        ProficiencyLevel::Advanced => "complex",
        ProficiencyLevel::Expert => "highly complex",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedScenario {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub stakeholders: Vec<String>,
}

impl GeneratedScenario {
    /// Accept the generator's JSON, or fall back to blank-line separated sections
    /// (title, description, context, then one challenge per section). Output that is valid
    /// JSON but not a scenario is rejected rather than read as text.
    pub fn parse(raw: &str) -> Result<Self, CollaboratorError> {
        let trimmed = raw.trim();
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
            return serde_json::from_value(value).map_err(|err| {
                CollaboratorError::InvalidResponse(format!(
                    "scenario JSON has the wrong shape: {err}"
                ))
            });
        }

        let sections: Vec<&str> = trimmed
            .split("\n\n")
            .map(str::trim)
            .filter(|section| !section.is_empty())
            .collect();

        let Some(title) = sections.first() else {
            return Err(CollaboratorError::InvalidResponse(
                "scenario text was empty".to_string(),
            ));
        };

        let strip = |section: Option<&&str>, label: &str| {
            section
                .map(|text| text.trim_start_matches(label).trim().to_string())
                .unwrap_or_default()
        };

        Ok(Self {
            title: strip(Some(title), "Title:"),
            description: strip(sections.get(1), "Description:"),
            context: strip(sections.get(2), "Context:"),
            challenges: sections
                .iter()
                .skip(3)
                .map(|section| section.to_string())
                .collect(),
            stakeholders: Vec::new(),
        })
    }

    /// Text fed back into theme tracking for later requests.
    pub fn theme_text(&self) -> String {
        let mut parts = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.context.as_str(),
        ];
        parts.extend(self.challenges.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Base points per question at each level.
pub const fn points_for(level: ProficiencyLevel) -> f64 {
    match level {
        ProficiencyLevel::Entry => 10.0,
        ProficiencyLevel::Intermediate => 15.0,
        ProficiencyLevel::Advanced => 20.0,
        ProficiencyLevel::Expert => 25.0,
    }
}

const ROLE_QUESTION_MULTIPLIER: f64 = 1.2;

/// Derive the question set for a generated scenario.
pub fn adaptive_questions(
    scenario: &GeneratedScenario,
    difficulty: ProficiencyLevel,
    role: &str,
) -> Vec<Question> {
    let points = points_for(difficulty);
    let slug = slugify(&scenario.title);
    let mut questions = vec![Question {
        id: QuestionId(format!("{slug}-approach")),
        prompt: format!(
            "How would you approach solving the {} challenge? Describe your step-by-step process.",
            scenario.title
        ),
        kind: QuestionKind::Behavioral,
        points,
        category: "problem_solving".to_string(),
    }];

    questions.extend(
        scenario
            .challenges
            .iter()
            .enumerate()
            .map(|(index, challenge)| Question {
                id: QuestionId(format!("{slug}-challenge-{}", index + 1)),
                prompt: format!(
                    "Regarding the challenge: \"{challenge}\", what specific actions would you take and why?"
                ),
                kind: QuestionKind::Scenario,
                points,
                category: "critical_thinking".to_string(),
            }),
    );

    let role = role.to_lowercase();
    if role.contains("developer") || role.contains("engineer") {
        questions.push(Question {
            id: QuestionId(format!("{slug}-technical")),
            prompt: "What technical approaches or technologies would you use to address this scenario? Explain your choices.".to_string(),
            kind: QuestionKind::Scenario,
            points: points * ROLE_QUESTION_MULTIPLIER,
            category: "technical_expertise".to_string(),
        });
    } else if role.contains("manager") || role.contains("lead") {
        questions.push(Question {
            id: QuestionId(format!("{slug}-leadership")),
            prompt: "How would you manage the team and stakeholders in this scenario? What leadership approaches would you employ?".to_string(),
            kind: QuestionKind::Scenario,
            points: points * ROLE_QUESTION_MULTIPLIER,
            category: "leadership_skills".to_string(),
        });
    }

    questions
}

fn slugify(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "scenario".to_string()
    } else {
        slug
    }
}
