use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::types::*;
use crate::errors::AppError;

const SELECT_RESPONSE: &str = "\
    SELECT id, created_at, ville, ville_autre, situation_professionnelle, situation_prof_autre, \
           mange_exterieur_freq, temps_preparation_repas, types_repas, types_repas_autre, \
           defis_alimentation, defis_alimentation_autre, satisfaction_acces_repas, \
           interet_solution_repas, aspects_importants, aspects_importants_autre, \
           budget_journalier_repas, prix_max_repas, budget_mensuel_abo, commentaires \
    FROM survey_responses";

#[derive(sqlx::FromRow)]
struct Row {
    id: i64,
    created_at: DateTime<Utc>,
    ville: String,
    ville_autre: Option<String>,
    situation_professionnelle: String,
    situation_prof_autre: Option<String>,
    mange_exterieur_freq: String,
    temps_preparation_repas: String,
    types_repas: String,
    types_repas_autre: Option<String>,
    defis_alimentation: String,
    defis_alimentation_autre: Option<String>,
    satisfaction_acces_repas: i32,
    interet_solution_repas: String,
    aspects_importants: String,
    aspects_importants_autre: Option<String>,
    budget_journalier_repas: String,
    prix_max_repas: String,
    budget_mensuel_abo: String,
    commentaires: Option<String>,
}

impl From<Row> for SurveyResponse {
    fn from(row: Row) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            ville: row.ville,
            ville_autre: row.ville_autre,
            situation_professionnelle: row.situation_professionnelle,
            situation_prof_autre: row.situation_prof_autre,
            mange_exterieur_freq: row.mange_exterieur_freq,
            temps_preparation_repas: row.temps_preparation_repas,
            types_repas: expand_list(&row.types_repas),
            types_repas_autre: row.types_repas_autre,
            defis_alimentation: expand_list(&row.defis_alimentation),
            defis_alimentation_autre: row.defis_alimentation_autre,
            satisfaction_acces_repas: row.satisfaction_acces_repas,
            interet_solution_repas: row.interet_solution_repas,
            aspects_importants: expand_list(&row.aspects_importants),
            aspects_importants_autre: row.aspects_importants_autre,
            budget_journalier_repas: row.budget_journalier_repas,
            prix_max_repas: row.prix_max_repas,
            budget_mensuel_abo: row.budget_mensuel_abo,
            commentaires: row.commentaires,
        }
    }
}

/// Insert a response and return its new id.
pub async fn create(pool: &PgPool, r: &NewSurveyResponse) -> Result<i64, AppError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO survey_responses \
            (ville, ville_autre, situation_professionnelle, situation_prof_autre, \
             mange_exterieur_freq, temps_preparation_repas, types_repas, types_repas_autre, \
             defis_alimentation, defis_alimentation_autre, satisfaction_acces_repas, \
             interet_solution_repas, aspects_importants, aspects_importants_autre, \
             budget_journalier_repas, prix_max_repas, budget_mensuel_abo, commentaires) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) \
         RETURNING id",
    )
    .bind(&r.ville)
    .bind(&r.ville_autre)
    .bind(&r.situation_professionnelle)
    .bind(&r.situation_prof_autre)
    .bind(&r.mange_exterieur_freq)
    .bind(&r.temps_preparation_repas)
    .bind(&r.types_repas)
    .bind(&r.types_repas_autre)
    .bind(&r.defis_alimentation)
    .bind(&r.defis_alimentation_autre)
    .bind(r.satisfaction_acces_repas)
    .bind(&r.interet_solution_repas)
    .bind(&r.aspects_importants)
    .bind(&r.aspects_importants_autre)
    .bind(&r.budget_journalier_repas)
    .bind(&r.prix_max_repas)
    .bind(&r.budget_mensuel_abo)
    .bind(&r.commentaires)
    .fetch_one(pool)
    .await?;

    log::info!("Stored survey response {id}");
    Ok(id)
}

/// All responses, newest first.
pub async fn find_all(pool: &PgPool) -> Result<Vec<SurveyResponse>, AppError> {
    let sql = format!("{SELECT_RESPONSE} ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Row>(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(SurveyResponse::from).collect())
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<SurveyResponse>, AppError> {
    let row = sqlx::query_as::<_, Row>(&format!("{SELECT_RESPONSE} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(SurveyResponse::from))
}

/// Returns false when no row had that id.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM survey_responses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM survey_responses")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
