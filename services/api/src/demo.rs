use crate::infra::TemplateScenarioGenerator;
use adaptive_assessment::config::EngineConfig;
use adaptive_assessment::engine::{
    adaptive_questions, AnswerPayload, AssessmentEngine, CodeEvaluation, IndicatorConfig,
    ProficiencyLevel, Question, QuestionId, QuestionKind, Rubric, ScenarioGenerator,
    ScoringCriterion, SubmissionSession,
};
use adaptive_assessment::error::AppError;
use chrono::Utc;
use clap::{Args, ValueEnum};
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum IndicatorPreset {
    Behavioral,
    Leadership,
    Stress,
    ProblemSolvingApproach,
    #[default]
    Assessment,
}

impl IndicatorPreset {
    fn config(self) -> IndicatorConfig {
        match self {
            IndicatorPreset::Behavioral => IndicatorConfig::behavioral(),
            IndicatorPreset::Leadership => IndicatorConfig::leadership(),
            IndicatorPreset::Stress => IndicatorConfig::stress(),
            IndicatorPreset::ProblemSolvingApproach => IndicatorConfig::problem_solving_approach(),
            IndicatorPreset::Assessment => IndicatorConfig::assessment(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Text to analyze. Ignored when --file is given.
    pub(crate) text: Option<String>,
    /// Read the response text from a file
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Keyword sets used for trait indicators
    #[arg(long, value_enum, default_value_t = IndicatorPreset::Assessment)]
    pub(crate) indicators: IndicatorPreset,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Role used for the follow-up scenario request
    #[arg(long, default_value = "Backend Engineer")]
    pub(crate) role: String,
    /// Disable step-difficulty adaptation during the session
    #[arg(long)]
    pub(crate) fixed_difficulty: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let text = match (args.file, args.text) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(text)) => text,
        (None, None) => String::new(),
    };

    let engine = AssessmentEngine::new(EngineConfig::from_env()?);
    let features = engine.extract_features(&text);
    let traits = engine.scan_indicators(&text, Some(&args.indicators.config()));

    let problem_solving = engine.analyze_problem_solving(&text);

    let report = json!({
        "features": features,
        "communication_score": features.communication_score(),
        "traits": traits,
        "problem_solving": {
            "dominant_approach": problem_solving.approaches.dominant_trait,
            "complexity": problem_solving.complexity,
            "overall_score": problem_solving.overall_score,
        },
    });
    let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = AssessmentEngine::new(EngineConfig::from_env()?);
    let questions = demo_questions();
    let answers = demo_answers();

    println!("Adaptive assessment demo");
    let mut session = SubmissionSession::new(!args.fixed_difficulty);
    let timings = [75.0, 60.0, 240.0, 180.0];
    for ((question, answer), seconds) in questions.iter().zip(answers.iter()).zip(timings) {
        let outcome =
            engine.record_answer(&session, question, answer, Some(seconds), Utc::now())?;
        println!(
            "- {} [{}] {:.0}/{:.0} points{}{}",
            question.id.0,
            question.kind.label(),
            outcome.evaluation.total_score,
            outcome.evaluation.max_score,
            if outcome.evaluation.is_verified() {
                ""
            } else {
                " (unverified)"
            },
            if outcome.difficulty_changed {
                format!(" -> difficulty now {}", outcome.session.current_difficulty)
            } else {
                String::new()
            }
        );
        session = outcome.session;
    }

    let score = engine.finish(&session, &questions, &demo_rubric());
    println!(
        "\nOverall {:.0}/{:.0} ({:.1}%)",
        score.total_score, score.max_score, score.percentage
    );
    if let Some(weighted) = score.weighted_score {
        println!("Weighted score {weighted:.1}");
    }
    if let Some(passed) = score.passed {
        println!("Result: {}", if passed { "pass" } else { "below pass mark" });
    }
    for category in &score.category_scores {
        println!(
            "  - {}: {:.1}% ({})",
            category.category,
            category.percentage,
            if category.passed { "passed" } else { "not passed" }
        );
    }
    println!("Strengths: {}", score.strengths.join(", "));
    println!(
        "Areas for improvement: {}",
        score.areas_for_improvement.join(", ")
    );
    for warning in &score.warnings {
        println!("Warning: {warning:?}");
    }

    let performance = if score.max_score > 0.0 {
        score.total_score / score.max_score
    } else {
        0.0
    };
    let level = engine.next_difficulty(&session.answers, "intermediate", performance, None)?;
    println!("\nNext proficiency level: {level}");

    let prior: Vec<String> = answers
        .iter()
        .map(|answer| answer.text().to_string())
        .collect();
    let request =
        engine.scenario_request(&args.role, level, vec!["Rust".to_string()], &prior, None);
    println!("Avoiding themes: {}", request.avoid_themes.join(", "));

    let scenario = TemplateScenarioGenerator::default().generate_scenario(&request)?;
    println!("Next scenario: {}", scenario.title);
    for question in adaptive_questions(&scenario, level, &args.role) {
        println!(
            "  - [{}] {} ({:.0} pts)",
            question.category, question.prompt, question.points
        );
    }

    Ok(())
}

fn demo_questions() -> Vec<Question> {
    vec![
        Question {
            id: QuestionId::new("http-idempotency"),
            prompt: "Which HTTP method is idempotent?".to_string(),
            kind: QuestionKind::MultipleChoice {
                options: vec!["POST".to_string(), "PUT".to_string(), "PATCH".to_string()],
                correct_answer: "PUT".to_string(),
            },
            points: 10.0,
            category: "fundamentals".to_string(),
        },
        Question {
            id: QuestionId::new("cache-eviction"),
            prompt: "Which eviction policy removes the least recently used entry?".to_string(),
            kind: QuestionKind::MultipleChoice {
                options: vec!["FIFO".to_string(), "LRU".to_string(), "LFU".to_string()],
                correct_answer: "LRU".to_string(),
            },
            points: 10.0,
            category: "fundamentals".to_string(),
        },
        Question {
            id: QuestionId::new("rate-limiter"),
            prompt: "Implement a token bucket rate limiter.".to_string(),
            kind: QuestionKind::Coding {
                test_cases: Vec::new(),
            },
            points: 20.0,
            category: "technical_expertise".to_string(),
        },
        Question {
            id: QuestionId::new("incident-lead"),
            prompt: "Describe a time you led an incident response.".to_string(),
            kind: QuestionKind::Behavioral,
            points: 20.0,
            category: "leadership".to_string(),
        },
    ]
}

fn demo_answers() -> Vec<AnswerPayload> {
    vec![
        AnswerPayload::Choice("PUT".to_string()),
        AnswerPayload::Choice("LRU".to_string()),
        AnswerPayload::Code {
            source: "struct TokenBucket { tokens: u32 }".to_string(),
            evaluation: Some(CodeEvaluation {
                passed: true,
                output: "5/5 tests passed".to_string(),
                score: Some(85.0),
            }),
        },
        AnswerPayload::Text(
            "I took the lead when our payment queue stalled. First, I set a clear plan and \
             assigned owners. Therefore the team resolved the backlog within an hour, and we \
             shared a written review so the fix would stay reliable."
                .to_string(),
        ),
    ]
}

fn demo_rubric() -> Rubric {
    Rubric {
        criteria: vec![
            ScoringCriterion {
                category: "fundamentals".to_string(),
                weight: 1.0,
                passing_score: None,
            },
            ScoringCriterion {
                category: "technical_expertise".to_string(),
                weight: 2.0,
                passing_score: Some(70.0),
            },
            ScoringCriterion {
                category: "leadership".to_string(),
                weight: 1.5,
                passing_score: None,
            },
        ],
        passing_score: Some(65.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_answers_cover_every_question() {
        let questions = demo_questions();
        let answers = demo_answers();
        let engine = AssessmentEngine::default();

        assert_eq!(questions.len(), answers.len());
        let mut session = SubmissionSession::new(true);
        for (question, answer) in questions.iter().zip(answers.iter()) {
            session = engine
                .record_answer(&session, question, answer, None, Utc::now())
                .expect("demo answer matches its question")
                .session;
        }

        let score = engine.finish(&session, &questions, &demo_rubric());
        assert!(score.warnings.is_empty());
        assert_eq!(score.category_scores.len(), 3);
    }

    #[test]
    fn presets_map_to_indicator_sets() {
        assert_eq!(IndicatorPreset::Stress.config(), IndicatorConfig::stress());
        assert_eq!(
            IndicatorPreset::ProblemSolvingApproach.config(),
            IndicatorConfig::problem_solving_approach()
        );
        assert_eq!(IndicatorPreset::default(), IndicatorPreset::Assessment);
    }

    #[test]
    fn demo_runs_end_to_end() {
        run_demo(DemoArgs {
            role: "Engineering Manager".to_string(),
            fixed_difficulty: false,
        })
        .expect("demo completes");
    }
}
