use adaptive_assessment::engine::{
    theme_overlap, CodeEvaluation, CodeEvaluator, CollaboratorError, GeneratedScenario,
    ScenarioGenerator, ScenarioRequest, TestCase, ThemeTracker,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) scenarios: Arc<dyn ScenarioGenerator>,
    pub(crate) code: Arc<dyn CodeEvaluator>,
}

/// Stand-in used when no sandbox is configured. Coding answers then score as unverified.
#[derive(Debug, Default, Clone)]
pub(crate) struct UnavailableCodeEvaluator;

impl CodeEvaluator for UnavailableCodeEvaluator {
    fn evaluate_code(
        &self,
        _code: &str,
        _test_cases: &[TestCase],
    ) -> Result<CodeEvaluation, CollaboratorError> {
        Err(CollaboratorError::Unavailable(
            "no code evaluation sandbox configured".to_string(),
        ))
    }
}

struct ScenarioTemplate {
    title: &'static str,
    description: &'static str,
    context: &'static str,
    challenges: &'static [&'static str],
    stakeholders: &'static [&'static str],
}

const TEMPLATES: [ScenarioTemplate; 4] = [
    ScenarioTemplate {
        title: "Checkout outage during a flash sale",
        description: "Payments start failing minutes after a promotional launch.",
        context: "Checkout traffic is five times the usual peak and the payment provider reports partial degradation.",
        challenges: &[
            "Restore payment processing without dropping orders",
            "Keep customers and support agents informed",
        ],
        stakeholders: &["Support lead", "Payments vendor", "Marketing director"],
    },
    ScenarioTemplate {
        title: "Warehouse robots scheduling conflict",
        description: "Picking robots collide on shared aisles during the night shift.",
        context: "A firmware rollout changed routing priorities across three warehouses.",
        challenges: &[
            "Stop collisions while keeping fulfilment moving",
            "Decide whether to roll back the firmware",
        ],
        stakeholders: &["Operations manager", "Robotics vendor", "Safety officer"],
    },
    ScenarioTemplate {
        title: "Regulatory audit with missing records",
        description: "An auditor requests retention evidence that cannot be located.",
        context: "Records were migrated between archives last year and some indexes were lost.",
        challenges: &[
            "Reconstruct the evidence trail",
            "Negotiate a realistic deadline with the auditor",
        ],
        stakeholders: &["Compliance officer", "External auditor", "Archive team"],
    },
    ScenarioTemplate {
        title: "Onboarding a merged engineering team",
        description: "Two teams with different release practices must ship together.",
        context: "An acquisition closed last month and the combined roadmap is due this quarter.",
        challenges: &[
            "Agree on a shared release process",
            "Resolve overlapping ownership of core services",
        ],
        stakeholders: &["Engineering director", "Product owner", "Acquired team lead"],
    },
];

/// Offline generator that picks the built-in scenario sharing the fewest themes with the
/// request's avoid list. Ties keep catalogue order.
#[derive(Debug, Default, Clone)]
pub(crate) struct TemplateScenarioGenerator {
    themes: ThemeTracker,
}

impl ScenarioGenerator for TemplateScenarioGenerator {
    fn generate_scenario(
        &self,
        request: &ScenarioRequest,
    ) -> Result<GeneratedScenario, CollaboratorError> {
        let mut best: Option<(f64, GeneratedScenario)> = None;
        for template in &TEMPLATES {
            let scenario = render(template, request);
            let overlap = theme_overlap(
                &request.avoid_themes,
                &self.themes.extract_themes(&[scenario.theme_text()]),
            );
            if best.as_ref().map_or(true, |(lowest, _)| overlap < *lowest) {
                best = Some((overlap, scenario));
            }
        }

        best.map(|(overlap, scenario)| {
            tracing::debug!(title = %scenario.title, overlap, "selected scenario template");
            scenario
        })
        .ok_or_else(|| CollaboratorError::Unavailable("no scenario templates".to_string()))
    }
}

fn render(template: &ScenarioTemplate, request: &ScenarioRequest) -> GeneratedScenario {
    let skills = if request.skills.is_empty() {
        String::new()
    } else {
        format!(" Relevant skills: {}.", request.skills.join(", "))
    };

    GeneratedScenario {
        title: template.title.to_string(),
        description: template.description.to_string(),
        context: format!(
            "{} You join as the {} ({} level).{}",
            template.context, request.role, request.difficulty, skills
        ),
        challenges: template
            .challenges
            .iter()
            .map(|challenge| challenge.to_string())
            .collect(),
        stakeholders: template
            .stakeholders
            .iter()
            .map(|stakeholder| stakeholder.to_string())
            .collect(),
    }
}
