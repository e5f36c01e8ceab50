use chrono::{NaiveDate, SecondsFormat};

use super::types::SurveyResponse;

pub const CSV_HEADERS: [&str; 20] = [
    "ID",
    "Date de création",
    "Ville",
    "Ville (Autre)",
    "Situation Professionnelle",
    "Situation Pro. (Autre)",
    "Mange Extérieur Fréquence",
    "Temps Préparation Repas",
    "Types Repas",
    "Types Repas (Autre)",
    "Défis Alimentation",
    "Défis Alimentation (Autre)",
    "Satisfaction Accès Repas",
    "Intérêt Solution Repas",
    "Aspects Importants",
    "Aspects Importants (Autre)",
    "Budget Journalier Repas",
    "Prix Max Repas",
    "Budget Mensuel Abonnement",
    "Commentaires",
];

/// Separator for multi-valued answers inside one CSV cell.
const CELL_LIST_SEPARATOR: &str = "; ";

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Download name for an export made on `date`.
pub fn csv_filename(date: NaiveDate) -> String {
    format!("sondage_reponses_{}.csv", date.format("%Y-%m-%d"))
}

/// Serialize responses in the given order under the fixed header row.
pub fn to_csv(responses: &[SurveyResponse]) -> String {
    let mut csv = CSV_HEADERS.iter().map(|h| escape_csv(h)).collect::<Vec<_>>().join(",");
    csv.push('\n');

    for r in responses {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let cells = [
            r.id.to_string(),
            r.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            r.ville.clone(),
            opt(&r.ville_autre),
            r.situation_professionnelle.clone(),
            opt(&r.situation_prof_autre),
            r.mange_exterieur_freq.clone(),
            r.temps_preparation_repas.clone(),
            r.types_repas.join(CELL_LIST_SEPARATOR),
            opt(&r.types_repas_autre),
            r.defis_alimentation.join(CELL_LIST_SEPARATOR),
            opt(&r.defis_alimentation_autre),
            r.satisfaction_acces_repas.to_string(),
            r.interet_solution_repas.clone(),
            r.aspects_importants.join(CELL_LIST_SEPARATOR),
            opt(&r.aspects_importants_autre),
            r.budget_journalier_repas.clone(),
            r.prix_max_repas.clone(),
            r.budget_mensuel_abo.clone(),
            opt(&r.commentaires),
        ];
        csv.push_str(&cells.iter().map(|c| escape_csv(c)).collect::<Vec<_>>().join(","));
        csv.push('\n');
    }
    csv
}
