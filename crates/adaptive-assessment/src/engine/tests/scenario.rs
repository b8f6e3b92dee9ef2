use super::common::*;
use crate::engine::{
    adaptive_questions, theme_overlap, CollaboratorError, EngineError, GeneratedScenario,
    ProficiencyLevel, Question, QuestionKind, QuestionRecord, ScenarioRequest,
};

fn scenario() -> GeneratedScenario {
    GeneratedScenario {
        title: "Checkout Outage".to_string(),
        description: "Payments fail during a flash sale.".to_string(),
        context: "Traffic is five times the usual peak.".to_string(),
        challenges: vec![
            "Restore payment processing".to_string(),
            "Keep customers informed".to_string(),
        ],
        stakeholders: vec!["Support lead".to_string()],
    }
}

fn record(question_type: &str) -> QuestionRecord {
    QuestionRecord {
        id: "r-1".to_string(),
        content: "Explain your approach.".to_string(),
        question_type: question_type.to_string(),
        points: 15.0,
        category: "critical_thinking".to_string(),
        options: Vec::new(),
        correct_answer: None,
        test_cases: Vec::new(),
    }
}

#[test]
fn prompt_reflects_difficulty_and_avoid_themes() {
    let request = ScenarioRequest {
        role: "Backend Engineer".to_string(),
        difficulty: ProficiencyLevel::Expert,
        skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        avoid_themes: vec!["billing".to_string(), "migration".to_string()],
        experience_years: Some(6.0),
    };

    let prompt = request.prompt();

    assert!(prompt.contains("highly complex workplace scenario for a Backend Engineer"));
    assert!(prompt.contains("Required skills: Rust, PostgreSQL."));
    assert!(prompt.contains("already covered: billing, migration."));
    assert!(prompt.contains("6 years of experience"));
}

#[test]
fn prompt_omits_avoid_line_without_themes() {
    let request = ScenarioRequest {
        role: "Analyst".to_string(),
        difficulty: ProficiencyLevel::Entry,
        skills: vec!["SQL".to_string()],
        avoid_themes: Vec::new(),
        experience_years: None,
    };

    let prompt = request.prompt();

    assert!(prompt.contains("basic workplace scenario"));
    assert!(!prompt.contains("Avoid these themes"));
    assert!(!prompt.contains("years of experience"));
}

#[test]
fn engine_request_avoids_prior_themes() {
    let request = engine().scenario_request(
        "Data Engineer",
        ProficiencyLevel::Intermediate,
        vec!["Spark".to_string()],
        &["Pipeline latency spikes in the pipeline scheduler."],
        None,
    );

    assert_eq!(request.avoid_themes[0], "pipeline");
    assert!(request.prompt().contains("moderate workplace scenario"));
}

#[test]
fn generator_json_is_parsed() {
    let raw = r#"{
        "title": "Checkout Outage",
        "description": "Payments fail during a flash sale.",
        "context": "Traffic is five times the usual peak.",
        "challenges": ["Restore payment processing", "Keep customers informed"],
        "stakeholders": ["Support lead"]
    }"#;

    let parsed = GeneratedScenario::parse(raw).expect("json scenario");

    assert_eq!(parsed, scenario());
}

#[test]
fn sectioned_text_falls_back_to_blank_line_parsing() {
    let raw = "Title: Checkout Outage\n\nDescription: Payments fail during a flash sale.\n\n\
               Context: Traffic is five times the usual peak.\n\n\
               Restore payment processing\n\nKeep customers informed";

    let parsed = GeneratedScenario::parse(raw).expect("sectioned scenario");

    assert_eq!(parsed.title, "Checkout Outage");
    assert_eq!(parsed.description, "Payments fail during a flash sale.");
    assert_eq!(parsed.context, "Traffic is five times the usual peak.");
    assert_eq!(parsed.challenges.len(), 2);
    assert!(parsed.stakeholders.is_empty());
}

#[test]
fn json_without_a_title_is_rejected_not_read_as_text() {
    let raw = r#"{"description": "Payments fail during a flash sale.", "challenges": []}"#;

    match GeneratedScenario::parse(raw) {
        Err(CollaboratorError::InvalidResponse(message)) => {
            assert!(message.contains("title"), "unexpected message: {message}");
        }
        other => panic!("expected invalid response, got {other:?}"),
    }
}

#[test]
fn json_with_structured_challenges_is_rejected() {
    let raw = r#"{
        "title": "Checkout Outage",
        "challenges": [{"name": "Restore payment processing", "priority": 1}]
    }"#;

    match GeneratedScenario::parse(raw) {
        Err(CollaboratorError::InvalidResponse(_)) => {}
        other => panic!("expected invalid response, got {other:?}"),
    }
}

#[test]
fn blank_generator_output_is_rejected() {
    match GeneratedScenario::parse("   \n\n  ") {
        Err(CollaboratorError::InvalidResponse(_)) => {}
        other => panic!("expected invalid response, got {other:?}"),
    }
}

#[test]
fn developer_roles_get_a_weighted_technical_question() {
    let questions = adaptive_questions(&scenario(), ProficiencyLevel::Advanced, "Senior Developer");

    assert_eq!(questions.len(), 4);
    assert_eq!(questions[0].kind, QuestionKind::Behavioral);
    assert_eq!(questions[0].category, "problem_solving");
    assert_eq!(questions[0].points, 20.0);
    assert!(questions[1].prompt.contains("Restore payment processing"));
    assert_eq!(questions[1].category, "critical_thinking");
    assert_eq!(questions[3].category, "technical_expertise");
    assert!(approx(questions[3].points, 24.0));
    assert_eq!(questions[3].id.0, "checkout-outage-technical");
}

#[test]
fn manager_roles_get_a_leadership_question() {
    let questions = adaptive_questions(&scenario(), ProficiencyLevel::Entry, "Product Manager");

    let last = questions.last().expect("questions generated");
    assert_eq!(last.category, "leadership_skills");
    assert!(approx(last.points, 12.0));
}

#[test]
fn other_roles_get_only_scenario_questions() {
    let questions = adaptive_questions(&scenario(), ProficiencyLevel::Expert, "Analyst");

    assert_eq!(questions.len(), 3);
    assert!(questions.iter().all(|question| question.points == 25.0));
}

#[test]
fn generated_follow_up_types_score_as_free_text() {
    for kind in ["technical", "leadership", "scenario"] {
        let question = Question::try_from(record(kind)).expect("known type");
        assert_eq!(question.kind, QuestionKind::Scenario);
    }
}

#[test]
fn unknown_question_types_are_rejected() {
    let error = Question::try_from(record("essay")).expect_err("unknown type");

    assert_eq!(
        error,
        EngineError::UnsupportedQuestionType {
            question_id: "r-1".to_string(),
            kind: "essay".to_string(),
        }
    );
}

#[test]
fn multiple_choice_records_need_a_correct_answer() {
    let error = Question::try_from(record("multiple_choice")).expect_err("missing answer");

    assert!(matches!(
        error,
        EngineError::MissingQuestionField { field: "correct_answer", .. }
    ));
}

#[test]
fn avoiding_prior_themes_reduces_overlap() {
    let prior = vec![
        "Billing database migration stalls during the billing freeze.".to_string(),
        "Billing reconciliation fails after the database migration.".to_string(),
    ];
    let avoided = engine().extract_themes(&prior);

    let repeated = GeneratedScenario {
        title: "Billing migration rollback".to_string(),
        description: "The billing database migration must be reverted.".to_string(),
        ..GeneratedScenario::default()
    };
    let fresh = GeneratedScenario {
        title: "Warehouse robot scheduling".to_string(),
        description: "Robots collide in peak picking hours.".to_string(),
        ..GeneratedScenario::default()
    };

    let repeated_overlap =
        theme_overlap(&avoided, &engine().extract_themes(&[repeated.theme_text()]));
    let fresh_overlap = theme_overlap(&avoided, &engine().extract_themes(&[fresh.theme_text()]));

    assert!(fresh_overlap < repeated_overlap);
    assert_eq!(fresh_overlap, 0.0);
}
