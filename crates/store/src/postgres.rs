//! Postgres-backed repositories.
//!
//! Criteria are translated into `WHERE` clauses with bound parameters; the
//! pure predicates in `tenderi-core` remain the semantic reference, and the
//! black-box suite runs against the in-memory implementation.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use tenderi_core::{Filter, Ponude, PonudeCriteria, Postupci, RangeFilter, StringFilter};

use crate::query::{Direction, Page, Pageable};
use crate::r#trait::{PonudeRepository, PostupciRepository, StoreError};

/// Create both tables when they do not exist yet.
///
/// Identifier assignment stays store-native (`BIGSERIAL`); the application
/// never supplies identifiers for new rows.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    for ddl in [
        "CREATE TABLE IF NOT EXISTS ponude (id BIGSERIAL PRIMARY KEY, broj INTEGER, ime TEXT)",
        "CREATE TABLE IF NOT EXISTS postupci (id BIGSERIAL PRIMARY KEY, broj INTEGER, ime TEXT)",
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

fn row_to_ponude(row: &PgRow) -> Result<Ponude, sqlx::Error> {
    Ok(Ponude {
        id: row.try_get("id")?,
        broj: row.try_get("broj")?,
        ime: row.try_get("ime")?,
    })
}

fn row_to_postupci(row: &PgRow) -> Result<Postupci, sqlx::Error> {
    Ok(Postupci {
        id: row.try_get("id")?,
        broj: row.try_get("broj")?,
        ime: row.try_get("ime")?,
    })
}

fn push_filter<'args, T>(qb: &mut QueryBuilder<'args, Postgres>, column: &str, filter: &Filter<T>)
where
    T: Clone + Send + sqlx::Type<Postgres> + sqlx::Encode<'args, Postgres> + 'args,
{
    if let Some(v) = &filter.equals {
        qb.push(" AND ").push(column).push(" = ").push_bind(v.clone());
    }
    if let Some(v) = &filter.not_equals {
        qb.push(" AND ").push(column).push(" <> ").push_bind(v.clone());
    }
    if let Some(values) = &filter.r#in {
        if values.is_empty() {
            // Membership in the empty set matches nothing.
            qb.push(" AND FALSE");
        } else {
            qb.push(" AND ").push(column).push(" IN (");
            let mut separated = qb.separated(", ");
            for v in values {
                separated.push_bind(v.clone());
            }
            separated.push_unseparated(")");
        }
    }
    if let Some(wanted) = filter.specified {
        qb.push(" AND ")
            .push(column)
            .push(if wanted { " IS NOT NULL" } else { " IS NULL" });
    }
}

fn push_range_filter<'args, T>(
    qb: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    filter: &RangeFilter<T>,
) where
    T: Clone + Send + sqlx::Type<Postgres> + sqlx::Encode<'args, Postgres> + 'args,
{
    push_filter(qb, column, &filter.filter);
    if let Some(v) = &filter.greater_than {
        qb.push(" AND ").push(column).push(" > ").push_bind(v.clone());
    }
    if let Some(v) = &filter.greater_than_or_equal {
        qb.push(" AND ").push(column).push(" >= ").push_bind(v.clone());
    }
    if let Some(v) = &filter.less_than {
        qb.push(" AND ").push(column).push(" < ").push_bind(v.clone());
    }
    if let Some(v) = &filter.less_than_or_equal {
        qb.push(" AND ").push(column).push(" <= ").push_bind(v.clone());
    }
}

/// Substring matching is case-sensitive, so plain `LIKE` with escaped
/// metacharacters.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn push_string_filter<'args>(
    qb: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    filter: &StringFilter,
) {
    push_filter(qb, column, &filter.filter);
    if let Some(needle) = &filter.contains {
        qb.push(" AND ")
            .push(column)
            .push(" LIKE ")
            .push_bind(like_pattern(needle))
            .push(" ESCAPE '\\'");
    }
    if let Some(needle) = &filter.does_not_contain {
        qb.push(" AND ")
            .push(column)
            .push(" NOT LIKE ")
            .push_bind(like_pattern(needle))
            .push(" ESCAPE '\\'");
    }
}

fn push_criteria<'args>(qb: &mut QueryBuilder<'args, Postgres>, criteria: &PonudeCriteria) {
    qb.push(" WHERE TRUE");
    if let Some(f) = &criteria.id {
        push_range_filter(qb, "id", f);
    }
    if let Some(f) = &criteria.broj {
        push_range_filter(qb, "broj", f);
    }
    if let Some(f) = &criteria.ime {
        push_string_filter(qb, "ime", f);
    }
}

fn push_order_by(qb: &mut QueryBuilder<'_, Postgres>, pageable: &Pageable) {
    let mut prefix = " ORDER BY ";
    for order in &pageable.sort {
        // Sortable properties map 1:1 onto columns; anything else was
        // rejected at the boundary.
        let column = match order.property.as_str() {
            "id" => "id",
            "broj" => "broj",
            "ime" => "ime",
            _ => continue,
        };
        qb.push(prefix).push(column).push(match order.direction {
            // NULLS FIRST ascending mirrors the in-memory comparator.
            Direction::Asc => " ASC NULLS FIRST",
            Direction::Desc => " DESC NULLS LAST",
        });
        prefix = ", ";
    }
    if prefix == " ORDER BY " {
        qb.push(" ORDER BY id ASC");
    }
}

fn push_page_window(qb: &mut QueryBuilder<'_, Postgres>, pageable: &Pageable) {
    qb.push(" LIMIT ")
        .push_bind(pageable.size as i64)
        .push(" OFFSET ")
        .push_bind(pageable.offset() as i64);
}

/// Postgres offer repository.
pub struct PgPonudeRepository {
    pool: PgPool,
}

impl PgPonudeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PonudeRepository for PgPonudeRepository {
    async fn save(&self, entity: Ponude) -> Result<Ponude, StoreError> {
        match entity.id {
            None => {
                let row = sqlx::query(
                    "INSERT INTO ponude (broj, ime) VALUES ($1, $2) RETURNING id, broj, ime",
                )
                .bind(entity.broj)
                .bind(&entity.ime)
                .fetch_one(&self.pool)
                .await?;
                Ok(row_to_ponude(&row)?)
            }
            Some(id) => {
                sqlx::query(
                    "INSERT INTO ponude (id, broj, ime) VALUES ($1, $2, $3) \
                     ON CONFLICT (id) DO UPDATE SET broj = EXCLUDED.broj, ime = EXCLUDED.ime",
                )
                .bind(id)
                .bind(entity.broj)
                .bind(&entity.ime)
                .execute(&self.pool)
                .await?;
                Ok(entity)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ponude>, StoreError> {
        let row = sqlx::query("SELECT id, broj, ime FROM ponude WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_ponude).transpose()?)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM ponude WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM ponude WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self, pageable: &Pageable) -> Result<Page<Ponude>, StoreError> {
        self.find_by_criteria(&PonudeCriteria::default(), pageable).await
    }

    async fn find_by_criteria(
        &self,
        criteria: &PonudeCriteria,
        pageable: &Pageable,
    ) -> Result<Page<Ponude>, StoreError> {
        let mut qb = QueryBuilder::new(if criteria.is_distinct() {
            "SELECT DISTINCT id, broj, ime FROM ponude"
        } else {
            "SELECT id, broj, ime FROM ponude"
        });
        push_criteria(&mut qb, criteria);
        push_order_by(&mut qb, pageable);
        push_page_window(&mut qb, pageable);

        let rows = qb.build().fetch_all(&self.pool).await?;
        let items = rows
            .iter()
            .map(row_to_ponude)
            .collect::<Result<Vec<_>, _>>()?;
        let total = self.count_by_criteria(criteria).await?;

        Ok(Page {
            items,
            total,
            pageable: pageable.clone(),
        })
    }

    async fn count_by_criteria(&self, criteria: &PonudeCriteria) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::new(if criteria.is_distinct() {
            // Rows carry their unique id, so distinct counting reduces to it.
            "SELECT COUNT(DISTINCT id) FROM ponude"
        } else {
            "SELECT COUNT(*) FROM ponude"
        });
        push_criteria(&mut qb, criteria);

        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total.max(0) as u64)
    }
}

/// Postgres procedure repository.
pub struct PgPostupciRepository {
    pool: PgPool,
}

impl PgPostupciRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostupciRepository for PgPostupciRepository {
    async fn save(&self, entity: Postupci) -> Result<Postupci, StoreError> {
        match entity.id {
            None => {
                let row = sqlx::query(
                    "INSERT INTO postupci (broj, ime) VALUES ($1, $2) RETURNING id, broj, ime",
                )
                .bind(entity.broj)
                .bind(&entity.ime)
                .fetch_one(&self.pool)
                .await?;
                Ok(row_to_postupci(&row)?)
            }
            Some(id) => {
                sqlx::query(
                    "INSERT INTO postupci (id, broj, ime) VALUES ($1, $2, $3) \
                     ON CONFLICT (id) DO UPDATE SET broj = EXCLUDED.broj, ime = EXCLUDED.ime",
                )
                .bind(id)
                .bind(entity.broj)
                .bind(&entity.ime)
                .execute(&self.pool)
                .await?;
                Ok(entity)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Postupci>, StoreError> {
        let row = sqlx::query("SELECT id, broj, ime FROM postupci WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_postupci).transpose()?)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM postupci WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM postupci WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self, pageable: &Pageable) -> Result<Page<Postupci>, StoreError> {
        let mut qb = QueryBuilder::new("SELECT id, broj, ime FROM postupci");
        push_order_by(&mut qb, pageable);
        push_page_window(&mut qb, pageable);

        let rows = qb.build().fetch_all(&self.pool).await?;
        let items = rows
            .iter()
            .map(row_to_postupci)
            .collect::<Result<Vec<_>, _>>()?;
        let total = self.count().await?;

        Ok(Page {
            items,
            total,
            pageable: pageable.clone(),
        })
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM postupci")
            .fetch_one(&self.pool)
            .await?;
        Ok(total.max(0) as u64)
    }
}
