use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::district::{Carrier, CarrierRow, District, DistrictRow};
use crate::store::{DistrictStore, StoreError};

/// Postgres-backed district store. Two queries per read: districts, then
/// the carriers belonging to them.
#[derive(Clone)]
pub struct PgDistrictStore {
    pool: PgPool,
}

impl PgDistrictStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DistrictStore for PgDistrictStore {
    async fn find_districts_by_state(
        &self,
        state: Option<&str>,
    ) -> Result<Vec<District>, StoreError> {
        let state = state.map(str::trim).filter(|s| !s.is_empty());

        let rows: Vec<DistrictRow> = sqlx::query_as(
            r#"
            SELECT id, name, state, county, city, nces_id, tpa_name
            FROM districts
            WHERE $1::TEXT IS NULL OR UPPER(state) = UPPER($1)
            ORDER BY created_at, name
            "#,
        )
        .bind(state)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let carrier_rows: Vec<CarrierRow> = sqlx::query_as(
            r#"
            SELECT id, district_id, name, carrier_type, recommended, link
            FROM carriers
            WHERE district_id = ANY($1)
            ORDER BY created_at, name
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await?;

        debug!(
            districts = rows.len(),
            carriers = carrier_rows.len(),
            "Fetched district candidates"
        );

        let mut by_district: HashMap<Uuid, Vec<CarrierRow>> = HashMap::new();
        for row in carrier_rows {
            by_district.entry(row.district_id).or_default().push(row);
        }

        rows.into_iter()
            .map(|row| {
                let carriers = by_district
                    .remove(&row.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(Carrier::try_from)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|reason| StoreError::Corrupt {
                        district: row.name.clone(),
                        reason,
                    })?;
                Ok(row.into_district(carriers))
            })
            .collect()
    }
}
