use serde::{Deserialize, Deserializer, Serialize};

use super::answer::{Answer, Answers};

/// Wire shape of a completed form. Keys are exactly the declared field ids;
/// unset optional text is the empty string, never missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionPayload {
    pub ville: String,
    #[serde(deserialize_with = "nullable_text")]
    pub ville_autre: String,
    pub situation_professionnelle: String,
    #[serde(deserialize_with = "nullable_text")]
    pub situation_prof_autre: String,
    pub mange_exterieur_freq: String,
    pub temps_preparation_repas: String,
    #[serde(deserialize_with = "list_or_text")]
    pub types_repas: Vec<String>,
    #[serde(deserialize_with = "nullable_text")]
    pub types_repas_autre: String,
    #[serde(deserialize_with = "list_or_text")]
    pub defis_alimentation: Vec<String>,
    #[serde(deserialize_with = "nullable_text")]
    pub defis_alimentation_autre: String,
    #[serde(deserialize_with = "number_or_text")]
    pub satisfaction_acces_repas: Option<i64>,
    pub interet_solution_repas: String,
    #[serde(deserialize_with = "list_or_text")]
    pub aspects_importants: Vec<String>,
    #[serde(deserialize_with = "nullable_text")]
    pub aspects_importants_autre: String,
    pub budget_journalier_repas: String,
    pub prix_max_repas: String,
    pub budget_mensuel_abo: String,
    #[serde(deserialize_with = "nullable_text")]
    pub commentaires: String,
    pub accepte_politique: bool,
}

impl SubmissionPayload {
    /// Snapshot of the form answers, with absent values normalized.
    pub fn from_answers(a: &Answers) -> Self {
        let text = |id: &str| a.text(id).to_string();
        let list = |id: &str| a.list(id).to_vec();
        Self {
            ville: text("ville"),
            ville_autre: text("villeAutre"),
            situation_professionnelle: text("situationProfessionnelle"),
            situation_prof_autre: text("situationProfAutre"),
            mange_exterieur_freq: text("mangeExterieurFreq"),
            temps_preparation_repas: text("tempsPreparationRepas"),
            types_repas: list("typesRepas"),
            types_repas_autre: text("typesRepasAutre"),
            defis_alimentation: list("defisAlimentation"),
            defis_alimentation_autre: text("defisAlimentationAutre"),
            satisfaction_acces_repas: a.number("satisfactionAccesRepas"),
            interet_solution_repas: text("interetSolutionRepas"),
            aspects_importants: list("aspectsImportants"),
            aspects_importants_autre: text("aspectsImportantsAutre"),
            budget_journalier_repas: text("budgetJournalierRepas"),
            prix_max_repas: text("prixMaxRepas"),
            budget_mensuel_abo: text("budgetMensuelAbo"),
            commentaires: text("commentaires"),
            accepte_politique: a.flag("acceptePolitique"),
        }
    }

    /// Inverse of [`from_answers`](Self::from_answers), used to validate
    /// payloads that arrive over the JSON API.
    pub fn answers(&self) -> Answers {
        let mut a = Answers::default();
        let texts: [(&'static str, &str); 14] = [
            ("ville", self.ville.as_str()),
            ("villeAutre", self.ville_autre.as_str()),
            ("situationProfessionnelle", self.situation_professionnelle.as_str()),
            ("situationProfAutre", self.situation_prof_autre.as_str()),
            ("mangeExterieurFreq", self.mange_exterieur_freq.as_str()),
            ("tempsPreparationRepas", self.temps_preparation_repas.as_str()),
            ("typesRepasAutre", self.types_repas_autre.as_str()),
            ("defisAlimentationAutre", self.defis_alimentation_autre.as_str()),
            ("interetSolutionRepas", self.interet_solution_repas.as_str()),
            ("aspectsImportantsAutre", self.aspects_importants_autre.as_str()),
            ("budgetJournalierRepas", self.budget_journalier_repas.as_str()),
            ("prixMaxRepas", self.prix_max_repas.as_str()),
            ("budgetMensuelAbo", self.budget_mensuel_abo.as_str()),
            ("commentaires", self.commentaires.as_str()),
        ];
        for (id, value) in texts {
            if !value.is_empty() {
                a.set(id, Answer::Text(value.to_string()));
            }
        }
        a.set("typesRepas", Answer::List(self.types_repas.clone()));
        a.set("defisAlimentation", Answer::List(self.defis_alimentation.clone()));
        a.set("aspectsImportants", Answer::List(self.aspects_importants.clone()));
        if let Some(n) = self.satisfaction_acces_repas {
            a.set("satisfactionAccesRepas", Answer::Number(n));
        }
        a.set("acceptePolitique", Answer::Flag(self.accepte_politique));
        a
    }
}

fn nullable_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrText {
    List(Vec<String>),
    Text(String),
}

/// Accepts `["a", "b"]`, a bare `"a"`, `""` or `null`.
fn list_or_text<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<ListOrText>::deserialize(d)? {
        Some(ListOrText::List(items)) => items,
        Some(ListOrText::Text(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

/// Accepts `4`, `"4"` or `null`; unparseable text is treated as absent.
fn number_or_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<NumberOrText>::deserialize(d)? {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}
