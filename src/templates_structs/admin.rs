use askama::Template;

use crate::models::response::SurveyResponse;
use crate::survey::aggregate::Statistics;
use crate::survey::{FieldKind, MEAL_SURVEY};

use super::{APP_NAME, PageContext};

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub app_name: &'static str,
    pub csrf_token: String,
}

impl LoginTemplate {
    pub fn new(error: Option<String>, csrf_token: String) -> Self {
        Self { error, app_name: APP_NAME, csrf_token }
    }
}

/// One line of the dashboard table.
pub struct ResponseRow {
    pub id: i64,
    pub created_at: String,
    pub ville: String,
    pub situation: String,
    pub satisfaction: i32,
    pub interet: String,
}

impl From<&SurveyResponse> for ResponseRow {
    fn from(r: &SurveyResponse) -> Self {
        let with_other = |id: &str, value: &str, other: &Option<String>| match other {
            Some(o) => format!("{value} ({o})"),
            None => MEAL_SURVEY.option_label(id, value).to_string(),
        };
        Self {
            id: r.id,
            created_at: r.created_at.format("%d/%m/%Y %H:%M").to_string(),
            ville: with_other("ville", &r.ville, &r.ville_autre),
            situation: with_other(
                "situationProfessionnelle",
                &r.situation_professionnelle,
                &r.situation_prof_autre,
            ),
            satisfaction: r.satisfaction_acces_repas,
            interet: MEAL_SURVEY
                .option_label("interetSolutionRepas", &r.interet_solution_repas)
                .to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub total: usize,
    pub rows: Vec<ResponseRow>,
}

pub struct DetailRow {
    pub title: &'static str,
    pub value: String,
}

#[derive(Template)]
#[template(path = "admin/response_detail.html")]
pub struct ResponseDetailTemplate {
    pub ctx: PageContext,
    pub id: i64,
    pub created_at: String,
    pub rows: Vec<DetailRow>,
}

impl ResponseDetailTemplate {
    pub fn new(ctx: PageContext, response: &SurveyResponse) -> Self {
        let rows = MEAL_SURVEY
            .fields()
            .filter(|f| f.kind != FieldKind::Consent)
            .filter_map(|f| {
                let value = response.display_value(f.id)?;
                let parent = MEAL_SURVEY.other_parent(f.id).and_then(|p| MEAL_SURVEY.field(p));
                let (title, value) = match parent {
                    Some(parent) => (parent.title, format!("Autre : {value}")),
                    None => (f.title, value),
                };
                Some(DetailRow { title, value })
            })
            .collect();
        Self {
            ctx,
            id: response.id,
            created_at: response.created_at.format("%d/%m/%Y %H:%M:%S UTC").to_string(),
            rows,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/statistics.html")]
pub struct StatisticsTemplate {
    pub ctx: PageContext,
    pub stats: Statistics,
    /// `stats.charts` as script-safe JSON for Chart.js.
    pub charts_json: String,
}
