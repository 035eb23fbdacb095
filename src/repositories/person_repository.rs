use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::person::{Person, PersonFilters};
use crate::models::vehicle::page_bounds;
use crate::repositories::PersonStore;
use crate::utils::errors::{map_unique_violation, AppError, AppResult};

fn duplicate_person() -> AppError {
    AppError::Conflict("Ya existe una persona con ese número de identidad".to_string())
}

pub struct PersonRepository {
    pool: PgPool,
}

impl PersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonStore for PersonRepository {
    async fn insert(&self, person: &Person) -> AppResult<Person> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO people (
                id, first_name, last_name, birth_date, birth_place, sex, nationality,
                national_id, passport_number, address, phone, email, photo_id,
                is_wanted, status, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(person.id)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(person.birth_date)
        .bind(&person.birth_place)
        .bind(person.sex)
        .bind(&person.nationality)
        .bind(&person.national_id)
        .bind(&person.passport_number)
        .bind(&person.address)
        .bind(&person.phone)
        .bind(&person.email)
        .bind(person.photo_id)
        .bind(person.is_wanted)
        .bind(person.status)
        .bind(&person.notes)
        .bind(person.created_at)
        .bind(person.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, duplicate_person))?;

        Ok(person)
    }

    async fn update(&self, person: &Person) -> AppResult<Person> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            UPDATE people
            SET first_name = $2, last_name = $3, birth_date = $4, birth_place = $5, sex = $6,
                nationality = $7, national_id = $8, passport_number = $9, address = $10,
                phone = $11, email = $12, photo_id = $13, is_wanted = $14, status = $15,
                notes = $16, updated_at = $17
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(person.id)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(person.birth_date)
        .bind(&person.birth_place)
        .bind(person.sex)
        .bind(&person.nationality)
        .bind(&person.national_id)
        .bind(&person.passport_number)
        .bind(&person.address)
        .bind(&person.phone)
        .bind(&person.email)
        .bind(person.photo_id)
        .bind(person.is_wanted)
        .bind(person.status)
        .bind(&person.notes)
        .bind(person.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, duplicate_person))?
        .ok_or_else(|| AppError::NotFound("Persona no encontrada".to_string()))?;

        Ok(person)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>("SELECT * FROM people WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(person)
    }

    async fn find_by_national_id(&self, national_id: &str) -> AppResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>("SELECT * FROM people WHERE national_id = $1")
            .bind(national_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(person)
    }

    async fn list(&self, filters: &PersonFilters) -> AppResult<Vec<Person>> {
        let (limit, offset) = page_bounds(filters.limit, filters.offset);

        let people = sqlx::query_as::<_, Person>(
            r#"
            SELECT * FROM people
            WHERE ($1::text IS NULL OR national_id ILIKE '%' || $1 || '%')
              AND ($2::boolean IS NULL OR is_wanted = $2)
            ORDER BY national_id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filters.national_id.as_deref())
        .bind(filters.is_wanted)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(people)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
