use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::denuncias::models::{
    like_pattern, AssignedAgent, Denuncia, DenunciaAction, DenunciaFilter, DenunciaStatus,
    DenunciaType, MatchMode, NewDenuncia, Severity, StatusChange,
};

use super::DenunciaRepository;

const DENUNCIA_COLUMNS: &str = "id, tipo, descricao, endereco, latitude, longitude, image_base64, \
     status, risco, assigned_agent, actions, source, created_at, updated_at";

#[derive(Debug, FromRow)]
struct DenunciaRow {
    id: Uuid,
    tipo: DenunciaType,
    descricao: String,
    endereco: Option<String>,
    latitude: String,
    longitude: String,
    image_base64: Option<String>,
    status: DenunciaStatus,
    risco: Option<Severity>,
    assigned_agent: Option<Json<AssignedAgent>>,
    actions: Json<Vec<DenunciaAction>>,
    source: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<DenunciaRow> for Denuncia {
    fn from(row: DenunciaRow) -> Self {
        Self {
            id: row.id,
            tipo: row.tipo,
            descricao: row.descricao,
            endereco: row.endereco,
            latitude: row.latitude,
            longitude: row.longitude,
            image_base64: row.image_base64,
            status: row.status,
            risco: row.risco,
            assigned_agent: row.assigned_agent.map(|agent| agent.0),
            actions: row.actions.0,
            source: row.source,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres-backed report store
pub struct PgDenunciaRepository {
    pool: PgPool,
}

impl PgDenunciaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &DenunciaFilter) {
    for (index, condition) in filter.conditions().iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        let column = condition.field.column();

        match condition.field.match_mode() {
            // Enum and text columns alike compare on their text form
            MatchMode::Exact => {
                builder.push(format!("{}::text = ", column));
                builder.push_bind(condition.value.clone());
            }
            MatchMode::Substring => {
                builder.push(format!("{} ILIKE ", column));
                builder.push_bind(like_pattern(&condition.value));
            }
        }
    }
}

#[async_trait]
impl DenunciaRepository for PgDenunciaRepository {
    async fn insert(&self, denuncia: &NewDenuncia) -> Result<Denuncia> {
        let sql = format!(
            r#"
            INSERT INTO denuncias (
                id, tipo, descricao, endereco, latitude, longitude, image_base64,
                status, risco, actions, source, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pendente', $8, '[]'::jsonb, $9, $10)
            RETURNING {}
            "#,
            DENUNCIA_COLUMNS
        );

        let row = sqlx::query_as::<_, DenunciaRow>(&sql)
            .bind(denuncia.id)
            .bind(denuncia.tipo)
            .bind(&denuncia.descricao)
            .bind(&denuncia.endereco)
            .bind(&denuncia.latitude)
            .bind(&denuncia.longitude)
            .bind(&denuncia.image_base64)
            .bind(denuncia.risco)
            .bind(&denuncia.source)
            .bind(denuncia.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert report: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Denuncia>> {
        let sql = format!("SELECT {} FROM denuncias WHERE id = $1", DENUNCIA_COLUMNS);

        let row = sqlx::query_as::<_, DenunciaRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch report {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: &DenunciaFilter) -> Result<Vec<Denuncia>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM denuncias", DENUNCIA_COLUMNS));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");

        let rows = builder
            .build_query_as::<DenunciaRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Denuncia>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM denuncias
            WHERE created_at > $1 AND created_at < $2
            ORDER BY created_at ASC
            "#,
            DENUNCIA_COLUMNS
        );

        let rows = sqlx::query_as::<_, DenunciaRow>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports in window: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Denuncia>> {
        let sql = format!(
            "SELECT {} FROM denuncias ORDER BY created_at ASC",
            DENUNCIA_COLUMNS
        );

        let rows = sqlx::query_as::<_, DenunciaRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn apply_status_change(
        &self,
        id: Uuid,
        change: &StatusChange,
    ) -> Result<Option<Denuncia>> {
        // Single statement: concurrent updates serialize on the row lock and
        // each appends its own audit entry.
        let sql = format!(
            r#"
            UPDATE denuncias
            SET status = $2,
                updated_at = $3,
                assigned_agent = COALESCE($4, assigned_agent),
                actions = COALESCE(actions, '[]'::jsonb) || jsonb_build_array($5::jsonb)
            WHERE id = $1
            RETURNING {}
            "#,
            DENUNCIA_COLUMNS
        );

        let row = sqlx::query_as::<_, DenunciaRow>(&sql)
            .bind(id)
            .bind(change.status)
            .bind(change.updated_at)
            .bind(change.assigned_agent.as_ref().map(Json))
            .bind(Json(&change.action))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update status of report {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(row.map(Into::into))
    }
}
