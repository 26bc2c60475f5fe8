use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::{RepositoryError, RepositoryResult, VehicleRepository};
use crate::domain::vehicle::{
    Attributes, NewVehicle, Plate, Stay, Vehicle, VehicleChanges, VehicleWithStays,
};

/// PostgreSQL implementation of VehicleRepository
///
/// Vehicles live in `veiculos` with their caller-defined attributes in a
/// JSONB column. Uniqueness of `placa` is enforced by the primary key.
pub struct PostgresVehicleRepository {
    pool: PgPool,
}

impl PostgresVehicleRepository {
    /// Creates a new PostgresVehicleRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VehicleRow {
    placa: String,
    dados: Json<Attributes>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = RepositoryError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let plate = Plate::new(row.placa)
            .map_err(|e| RepositoryError::Other(format!("Invalid plate from database: {}", e)))?;

        Ok(Vehicle {
            plate,
            attributes: row.dados.0,
        })
    }
}

#[derive(sqlx::FromRow)]
struct StayRow {
    id: Uuid,
    placa: String,
    entrada: DateTime<Utc>,
    saida: Option<DateTime<Utc>>,
    valor: Option<Decimal>,
}

impl TryFrom<StayRow> for Stay {
    type Error = RepositoryError;

    fn try_from(row: StayRow) -> Result<Self, Self::Error> {
        let plate = Plate::new(row.placa)
            .map_err(|e| RepositoryError::Other(format!("Invalid plate from database: {}", e)))?;

        Ok(Stay {
            id: row.id,
            plate,
            entered_at: row.entrada,
            left_at: row.saida,
            amount: row.valor,
        })
    }
}

/// Maps a driver error on a single-plate operation to a repository error
fn classify(err: sqlx::Error, plate: &Plate, context: &str) -> RepositoryError {
    match &err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound(plate.clone()),
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(plate.clone())
        }
        _ => RepositoryError::Other(format!("{}: {}", context, err)),
    }
}

#[async_trait]
impl VehicleRepository for PostgresVehicleRepository {
    async fn list(&self) -> RepositoryResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT placa, dados
            FROM veiculos
            ORDER BY placa
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Other(format!("Failed to list vehicles: {}", e)))?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn find_by_plate(&self, plate: &Plate) -> RepositoryResult<Option<VehicleWithStays>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT placa, dados
            FROM veiculos
            WHERE placa = $1
            "#,
        )
        .bind(plate.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, plate, "Failed to find vehicle by plate"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stays = sqlx::query_as::<_, StayRow>(
            r#"
            SELECT id, placa, entrada, saida, valor
            FROM estadias
            WHERE placa = $1
            ORDER BY entrada
            "#,
        )
        .bind(plate.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, plate, "Failed to load stays"))?
        .into_iter()
        .map(Stay::try_from)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(VehicleWithStays {
            vehicle: Vehicle::try_from(row)?,
            stays,
        }))
    }

    async fn exists(&self, plate: &Plate) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM veiculos WHERE placa = $1)")
            .bind(plate.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, plate, "Failed to check plate"))
    }

    async fn create(&self, vehicle: NewVehicle) -> RepositoryResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO veiculos (placa, dados)
            VALUES ($1, $2)
            RETURNING placa, dados
            "#,
        )
        .bind(vehicle.plate.as_str())
        .bind(Json(&vehicle.attributes))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, &vehicle.plate, "Failed to create vehicle"))?;

        Vehicle::try_from(row)
    }

    async fn update(&self, plate: &Plate, changes: VehicleChanges) -> RepositoryResult<Vehicle> {
        // `||` overwrites top-level keys and keeps the rest
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE veiculos
            SET dados = dados || $2, atualizado_em = NOW()
            WHERE placa = $1
            RETURNING placa, dados
            "#,
        )
        .bind(plate.as_str())
        .bind(Json(&changes.attributes))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, plate, "Failed to update vehicle"))?
        .ok_or_else(|| RepositoryError::NotFound(plate.clone()))?;

        Vehicle::try_from(row)
    }

    async fn delete(&self, plate: &Plate) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM veiculos WHERE placa = $1
            "#,
        )
        .bind(plate.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, plate, "Failed to delete vehicle"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(plate.clone()));
        }

        Ok(())
    }
}
