use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::survey::{FieldKind, SubmissionPayload, MEAL_SURVEY};

/// Separator used to flatten list answers into a single text column.
/// Some option labels contain commas, so a comma is not safe here.
pub const LIST_DELIMITER: char = '|';

pub const MISSING_FIELDS: &str = "Champs obligatoires manquants.";

/// A stored survey response, list columns already expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub ville: String,
    pub ville_autre: Option<String>,
    pub situation_professionnelle: String,
    pub situation_prof_autre: Option<String>,
    pub mange_exterieur_freq: String,
    pub temps_preparation_repas: String,
    pub types_repas: Vec<String>,
    pub types_repas_autre: Option<String>,
    pub defis_alimentation: Vec<String>,
    pub defis_alimentation_autre: Option<String>,
    pub satisfaction_acces_repas: i32,
    pub interet_solution_repas: String,
    pub aspects_importants: Vec<String>,
    pub aspects_importants_autre: Option<String>,
    pub budget_journalier_repas: String,
    pub prix_max_repas: String,
    pub budget_mensuel_abo: String,
    pub commentaires: Option<String>,
}

impl SurveyResponse {
    /// Stored value of a survey field, formatted for display with the form's
    /// option labels. `None` for unknown ids and for optional text that was
    /// left empty.
    pub fn display_value(&self, field_id: &str) -> Option<String> {
        let label = |v: &str| MEAL_SURVEY.option_label(field_id, v).to_string();
        let text = |s: &String| Some(label(s));
        let list = |items: &Vec<String>| {
            (!items.is_empty())
                .then(|| items.iter().map(|i| label(i)).collect::<Vec<_>>().join(", "))
        };
        match field_id {
            "ville" => text(&self.ville),
            "villeAutre" => self.ville_autre.clone(),
            "situationProfessionnelle" => text(&self.situation_professionnelle),
            "situationProfAutre" => self.situation_prof_autre.clone(),
            "mangeExterieurFreq" => text(&self.mange_exterieur_freq),
            "tempsPreparationRepas" => text(&self.temps_preparation_repas),
            "typesRepas" => list(&self.types_repas),
            "typesRepasAutre" => self.types_repas_autre.clone(),
            "defisAlimentation" => list(&self.defis_alimentation),
            "defisAlimentationAutre" => self.defis_alimentation_autre.clone(),
            "satisfactionAccesRepas" => Some(format!("{} / 5", self.satisfaction_acces_repas)),
            "interetSolutionRepas" => text(&self.interet_solution_repas),
            "aspectsImportants" => list(&self.aspects_importants),
            "aspectsImportantsAutre" => self.aspects_importants_autre.clone(),
            "budgetJournalierRepas" => text(&self.budget_journalier_repas),
            "prixMaxRepas" => text(&self.prix_max_repas),
            "budgetMensuelAbo" => text(&self.budget_mensuel_abo),
            "commentaires" => self.commentaires.clone(),
            _ => None,
        }
    }
}

/// Row to insert. Lists are already flattened; empty optional text is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSurveyResponse {
    pub ville: String,
    pub ville_autre: Option<String>,
    pub situation_professionnelle: String,
    pub situation_prof_autre: Option<String>,
    pub mange_exterieur_freq: String,
    pub temps_preparation_repas: String,
    pub types_repas: String,
    pub types_repas_autre: Option<String>,
    pub defis_alimentation: String,
    pub defis_alimentation_autre: Option<String>,
    pub satisfaction_acces_repas: i32,
    pub interet_solution_repas: String,
    pub aspects_importants: String,
    pub aspects_importants_autre: Option<String>,
    pub budget_journalier_repas: String,
    pub prix_max_repas: String,
    pub budget_mensuel_abo: String,
    pub commentaires: Option<String>,
}

impl TryFrom<&SubmissionPayload> for NewSurveyResponse {
    type Error = String;

    /// Checks every required answer (consent included) and the scale bounds.
    fn try_from(p: &SubmissionPayload) -> Result<Self, Self::Error> {
        if !MEAL_SURVEY.missing_required(&p.answers()).is_empty() {
            return Err(MISSING_FIELDS.to_string());
        }
        let satisfaction = p.satisfaction_acces_repas.ok_or_else(|| MISSING_FIELDS.to_string())?;
        if let Some(FieldKind::Scale { min, max }) =
            MEAL_SURVEY.field("satisfactionAccesRepas").map(|f| f.kind)
        {
            if !(min..=max).contains(&satisfaction) {
                return Err(format!("La satisfaction doit être comprise entre {min} et {max}."));
            }
        }

        Ok(Self {
            ville: p.ville.clone(),
            ville_autre: non_empty(&p.ville_autre),
            situation_professionnelle: p.situation_professionnelle.clone(),
            situation_prof_autre: non_empty(&p.situation_prof_autre),
            mange_exterieur_freq: p.mange_exterieur_freq.clone(),
            temps_preparation_repas: p.temps_preparation_repas.clone(),
            types_repas: flatten_list(&p.types_repas),
            types_repas_autre: non_empty(&p.types_repas_autre),
            defis_alimentation: flatten_list(&p.defis_alimentation),
            defis_alimentation_autre: non_empty(&p.defis_alimentation_autre),
            satisfaction_acces_repas: satisfaction as i32,
            interet_solution_repas: p.interet_solution_repas.clone(),
            aspects_importants: flatten_list(&p.aspects_importants),
            aspects_importants_autre: non_empty(&p.aspects_importants_autre),
            budget_journalier_repas: p.budget_journalier_repas.clone(),
            prix_max_repas: p.prix_max_repas.clone(),
            budget_mensuel_abo: p.budget_mensuel_abo.clone(),
            commentaires: non_empty(&p.commentaires),
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Join list answers for storage. Blank items are dropped and the
/// delimiter never appears inside an item.
pub fn flatten_list(items: &[String]) -> String {
    items
        .iter()
        .map(|s| s.trim().replace(LIST_DELIMITER, "/"))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(&LIST_DELIMITER.to_string())
}

pub fn expand_list(stored: &str) -> Vec<String> {
    stored
        .split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
