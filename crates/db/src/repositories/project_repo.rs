//! Repository for the `projects` table.
//!
//! Normalized text fields are resolved against live rows inside the same
//! transaction as the write. Every mutation is a single conditional
//! `UPDATE ... WHERE id = $1 AND deleted_at IS NULL`, so a soft-deleted
//! project can never be changed and concurrent note appends cannot drop
//! each other's entries.

use docket_core::fields::{AutocompleteField, NormalizedField};
use docket_core::filters::{
    effective_statuses, like_pattern, order_by_clause, resolve_sort_field, split_search_terms,
    SortDirection, SEARCH_FIELDS,
};
use docket_core::normalization::normalize_value;
use docket_core::status::ProjectStatus;
use docket_core::types::{CivilDate, DbId};
use sqlx::{PgConnection, PgPool};

use crate::models::project::{NewProject, Project, ProjectFilter, ProjectPatch};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `projects` SELECT / RETURNING clauses.
pub(crate) const COLUMNS: &str = "\
    id, project_name, project_group, department, date_to_client, \
    date_assigned_to_us, internal_deadline, delivery_deadline, \
    assigned_attorney, qcp_attorney, status, notes, \
    created_at, updated_at, deleted_at";

/// Column list for INSERT (excludes generated `id` and timestamps).
const INSERT_COLUMNS: &str = "\
    project_name, project_group, department, date_to_client, \
    date_assigned_to_us, internal_deadline, delivery_deadline, \
    assigned_attorney, qcp_attorney, status, notes";

/// Transaction-scoped advisory lock serializing normalization lookups with
/// the write that follows them.
const NORMALIZATION_LOCK_KEY: i64 = 0x646f_636b_6574;

// ---------------------------------------------------------------------------
// ProjectRepo
// ---------------------------------------------------------------------------

/// Provides CRUD, filtering and lookup operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, normalizing department and attorney names.
    pub async fn create(pool: &PgPool, input: &NewProject) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_normalization(&mut tx).await?;

        let department =
            Self::normalize_in(&mut tx, NormalizedField::Department, &input.department).await?;
        let assigned_attorney = Self::normalize_in(
            &mut tx,
            NormalizedField::AssignedAttorney,
            &input.assigned_attorney,
        )
        .await?;
        let qcp_attorney =
            Self::normalize_in(&mut tx, NormalizedField::QcpAttorney, &input.qcp_attorney)
                .await?;

        let query = format!(
            "INSERT INTO projects ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.project_name)
            .bind(&input.project_group)
            .bind(&department)
            .bind(input.date_to_client)
            .bind(input.date_assigned_to_us)
            .bind(input.internal_deadline)
            .bind(input.delivery_deadline)
            .bind(&assigned_attorney)
            .bind(&qcp_attorney)
            .bind(input.status.as_str())
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(project_id = project.id, "Project created");
        Ok(project)
    }

    /// Find a live (not soft-deleted) project by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by id, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching `filter`, ordered per its sort settings.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let (where_clause, bind_values, _) = build_project_filter(filter);
        let order_by = order_by_clause(
            resolve_sort_field(filter.sort_by.as_deref()),
            SortDirection::parse_lenient(filter.sort_dir.as_deref()),
        );

        let query = format!("SELECT {COLUMNS} FROM projects {where_clause} ORDER BY {order_by}");
        bind_project_values(sqlx::query_as::<_, Project>(&query), &bind_values)
            .fetch_all(pool)
            .await
    }

    /// Count projects matching `filter`.
    pub async fn count(pool: &PgPool, filter: &ProjectFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_project_filter(filter);
        let query = format!("SELECT COUNT(*)::BIGINT FROM projects {where_clause}");
        bind_project_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update. Absent fields keep their value; nullable
    /// fields given as `Some(None)` are cleared.
    ///
    /// Returns `None` if the project does not exist or is soft-deleted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &ProjectPatch,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_normalization(&mut tx).await?;

        let department = match &patch.department {
            Some(value) => {
                Some(Self::normalize_in(&mut tx, NormalizedField::Department, value).await?)
            }
            None => None,
        };
        let assigned_attorney = match &patch.assigned_attorney {
            Some(value) => Some(
                Self::normalize_in(&mut tx, NormalizedField::AssignedAttorney, value).await?,
            ),
            None => None,
        };
        let qcp_attorney = match &patch.qcp_attorney {
            Some(value) => {
                Some(Self::normalize_in(&mut tx, NormalizedField::QcpAttorney, value).await?)
            }
            None => None,
        };

        let query = format!(
            "UPDATE projects SET \
                project_name = COALESCE($2, project_name), \
                project_group = CASE WHEN $3 THEN $4 ELSE project_group END, \
                department = COALESCE($5, department), \
                date_to_client = COALESCE($6, date_to_client), \
                date_assigned_to_us = COALESCE($7, date_assigned_to_us), \
                internal_deadline = CASE WHEN $8 THEN $9 ELSE internal_deadline END, \
                delivery_deadline = CASE WHEN $10 THEN $11 ELSE delivery_deadline END, \
                assigned_attorney = COALESCE($12, assigned_attorney), \
                qcp_attorney = COALESCE($13, qcp_attorney), \
                status = COALESCE($14, status), \
                updated_at = GREATEST(NOW(), updated_at) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&patch.project_name)
            .bind(patch.project_group.is_some())
            .bind(patch.project_group.clone().flatten())
            .bind(&department)
            .bind(patch.date_to_client)
            .bind(patch.date_assigned_to_us)
            .bind(patch.internal_deadline.is_some())
            .bind(patch.internal_deadline.flatten())
            .bind(patch.delivery_deadline.is_some())
            .bind(patch.delivery_deadline.flatten())
            .bind(&assigned_attorney)
            .bind(&qcp_attorney)
            .bind(patch.status.map(ProjectStatus::as_str))
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Soft-delete a project. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects \
             SET deleted_at = NOW(), updated_at = GREATEST(NOW(), updated_at) \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a preformatted ledger entry to a project's notes.
    ///
    /// The concatenation happens in one statement, so concurrent appends
    /// serialize on the row lock and both survive. Returns `None` if the
    /// project does not exist or is soft-deleted.
    pub async fn append_note(
        pool: &PgPool,
        id: DbId,
        entry: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
                notes = CASE WHEN notes IS NULL OR notes = '' THEN $2 \
                             ELSE notes || E'\\n' || $2 END, \
                updated_at = GREATEST(NOW(), updated_at) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(entry)
            .fetch_optional(pool)
            .await
    }

    /// Sorted distinct non-empty values of `field` across live projects.
    pub async fn distinct_values(
        pool: &PgPool,
        field: AutocompleteField,
    ) -> Result<Vec<String>, sqlx::Error> {
        let column = field.column();
        let query = format!(
            "SELECT DISTINCT {column} FROM projects \
             WHERE deleted_at IS NULL AND {column} IS NOT NULL AND {column} <> '' \
             ORDER BY {column}"
        );
        sqlx::query_scalar::<_, String>(&query)
            .fetch_all(pool)
            .await
    }

    /// Canonical spelling of `value` for `field` (see [`Self::normalize_in`]).
    pub async fn normalize(
        pool: &PgPool,
        field: NormalizedField,
        value: &str,
    ) -> Result<String, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::normalize_in(&mut conn, field, value).await
    }

    /// Resolve `value` to the casing already used by a live project.
    ///
    /// Candidates are ordered by when the spelling first appeared, so the
    /// oldest live spelling wins. Unmatched values pass through unchanged.
    pub async fn normalize_in(
        conn: &mut PgConnection,
        field: NormalizedField,
        value: &str,
    ) -> Result<String, sqlx::Error> {
        if value.is_empty() {
            return Ok(String::new());
        }

        let column = field.column();
        let query = format!(
            "SELECT {column} FROM projects \
             WHERE deleted_at IS NULL AND LOWER({column}) = LOWER($1) \
             GROUP BY {column} \
             ORDER BY MIN(created_at), MIN(id)"
        );
        let existing: Vec<String> = sqlx::query_scalar::<_, String>(&query)
            .bind(value)
            .fetch_all(conn)
            .await?;

        let normalized = normalize_value(existing.iter().map(String::as_str), value);
        if normalized != value {
            tracing::debug!(field = column, from = value, to = %normalized, "Value normalized");
        }
        Ok(normalized)
    }
}

async fn lock_normalization(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(NORMALIZATION_LOCK_KEY)
        .execute(conn)
        .await
        .map(|_| ())
}

// ---------------------------------------------------------------------------
// Dynamic filter helpers
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built project queries.
enum BindValue {
    Text(String),
    TextArray(Vec<String>),
    Date(CivilDate),
}

/// Build the WHERE clause and bind values for a project filter.
///
/// Returns `(where_clause, bind_values, next_bind_idx)`.
fn build_project_filter(filter: &ProjectFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if !filter.include_deleted {
        conditions.push("deleted_at IS NULL".to_string());
    }

    let statuses = effective_statuses(filter.statuses.as_deref(), filter.include_completed);
    if statuses.len() < ProjectStatus::ALL.len() {
        conditions.push(format!("status = ANY(${bind_idx})"));
        bind_idx += 1;
        bind_values.push(BindValue::TextArray(
            statuses.iter().map(|s| s.as_str().to_string()).collect(),
        ));
    }

    for (column, value) in [
        ("department", &filter.department),
        ("assigned_attorney", &filter.assigned_attorney),
        ("qcp_attorney", &filter.qcp_attorney),
    ] {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            conditions.push(format!("LOWER({column}) = LOWER(${bind_idx})"));
            bind_idx += 1;
            bind_values.push(BindValue::Text(value.to_string()));
        }
    }

    if let Some(ref search) = filter.search {
        for term in split_search_terms(search) {
            let any_field: Vec<String> = SEARCH_FIELDS
                .iter()
                .map(|field| format!("{} ILIKE ${bind_idx}", field.column()))
                .collect();
            conditions.push(format!("({})", any_field.join(" OR ")));
            bind_idx += 1;
            bind_values.push(BindValue::Text(like_pattern(term)));
        }
    }

    for (condition, bound) in [
        ("delivery_deadline >=", filter.delivery_deadline_from),
        ("delivery_deadline <=", filter.delivery_deadline_to),
        ("date_assigned_to_us >=", filter.date_assigned_from),
        ("date_assigned_to_us <=", filter.date_assigned_to),
    ] {
        if let Some(date) = bound {
            conditions.push(format!("{condition} ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Date(date));
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_project_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::TextArray(v) => q = q.bind(v.as_slice()),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_project_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::TextArray(v) => q = q.bind(v.as_slice()),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}
