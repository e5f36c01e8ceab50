//! Frequency tables over stored responses, fed to the statistics charts.
//!
//! Buckets keep first-seen order. Legends must match the order values were
//! collected in, so tables are never sorted by count.

use serde::Serialize;

use crate::models::response::SurveyResponse;

/// Labels for the fixed satisfaction scale positions 1..=5.
pub const SATISFACTION_LABELS: [&str; 5] =
    ["1 - Pas satisfait", "2", "3 - Neutre", "4", "5 - Très satisfait"];

/// Ordered `(value, count)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl FrequencyTable {
    fn bump(&mut self, value: &str) {
        match self.labels.iter().position(|l| l == value) {
            Some(i) => self.counts[i] += 1,
            None => {
                self.labels.push(value.to_string());
                self.counts.push(1);
            }
        }
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == value).map(|i| self.counts[i])
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels.iter().map(String::as_str).zip(self.counts.iter().copied())
    }
}

/// Count one scalar value per response.
pub fn count_by<'a, F>(responses: &'a [SurveyResponse], value: F) -> FrequencyTable
where
    F: Fn(&'a SurveyResponse) -> &'a str,
{
    let mut table = FrequencyTable::default();
    for r in responses {
        table.bump(value(r));
    }
    table
}

/// Count every element of a list-valued field.
pub fn count_each<'a, F>(responses: &'a [SurveyResponse], values: F) -> FrequencyTable
where
    F: Fn(&'a SurveyResponse) -> &'a [String],
{
    let mut table = FrequencyTable::default();
    for r in responses {
        for v in values(r) {
            table.bump(v);
        }
    }
    table
}

/// Exactly five buckets for scale positions 1..=5, zeros included.
/// Values outside the scale are not counted.
pub fn satisfaction_buckets(responses: &[SurveyResponse]) -> FrequencyTable {
    let mut counts = vec![0usize; SATISFACTION_LABELS.len()];
    for r in responses {
        let level = r.satisfaction_acces_repas;
        if (1..=5).contains(&level) {
            counts[(level - 1) as usize] += 1;
        }
    }
    FrequencyTable {
        labels: SATISFACTION_LABELS.iter().map(|s| s.to_string()).collect(),
        counts,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Doughnut,
    Bar,
}

/// One chart of the statistics page.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub table: FrequencyTable,
}

/// Every chart shown on the statistics page, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub charts: Vec<Chart>,
}

impl Statistics {
    pub fn from_responses(responses: &[SurveyResponse]) -> Self {
        let chart = |id, title, kind, table| Chart { id, title, kind, table };
        let charts = vec![
            chart(
                "villes",
                "Répartition par ville",
                ChartKind::Pie,
                count_by(responses, |r| r.ville.as_str()),
            ),
            chart(
                "situations",
                "Situation professionnelle",
                ChartKind::Pie,
                count_by(responses, |r| r.situation_professionnelle.as_str()),
            ),
            chart(
                "frequence",
                "Fréquence repas à l'extérieur",
                ChartKind::Bar,
                count_by(responses, |r| r.mange_exterieur_freq.as_str()),
            ),
            chart(
                "interet",
                "Intérêt pour une solution de repas",
                ChartKind::Doughnut,
                count_by(responses, |r| r.interet_solution_repas.as_str()),
            ),
            chart(
                "satisfaction",
                "Niveau de satisfaction",
                ChartKind::Bar,
                satisfaction_buckets(responses),
            ),
            chart(
                "aspects",
                "Aspects importants",
                ChartKind::Bar,
                count_each(responses, |r| r.aspects_importants.as_slice()),
            ),
            chart(
                "defis",
                "Défis alimentaires",
                ChartKind::Bar,
                count_each(responses, |r| r.defis_alimentation.as_slice()),
            ),
            chart(
                "budget",
                "Budget journalier pour repas",
                ChartKind::Bar,
                count_by(responses, |r| r.budget_journalier_repas.as_str()),
            ),
        ];
        Self { total: responses.len(), charts }
    }
}
