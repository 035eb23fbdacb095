use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::dto::person_dto::PersonRequest;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::person::{Person, PersonFilters};
use crate::repositories::{MediaStore, PersonStore};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppResult};

pub struct PersonController {
    people: Arc<dyn PersonStore>,
    media: Arc<dyn MediaStore>,
}

impl PersonController {
    pub fn new(state: &AppState) -> Self {
        Self {
            people: state.people.clone(),
            media: state.media.clone(),
        }
    }

    pub async fn list(&self, filters: PersonFilters) -> AppResult<Vec<Person>> {
        self.people.list(&filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Person> {
        self.people
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Person", &id.to_string()))
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: PersonRequest,
    ) -> AppResult<ApiResponse<Person>> {
        actor.require_writer()?;
        request.check()?;
        self.ensure_photo_exists(request.photo_id).await?;

        let now = Utc::now();
        let person = build_person(Uuid::new_v4(), request, now);
        let saved = self.people.insert(&person).await?;

        tracing::info!("👤 Persona {} registrada ({})", saved.full_name(), saved.national_id);
        Ok(ApiResponse::success_with_message(saved, "Persona registrada exitosamente"))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: PersonRequest,
    ) -> AppResult<ApiResponse<Person>> {
        actor.require_writer()?;
        request.check()?;

        let previous = self.get_by_id(id).await?;
        self.ensure_photo_exists(request.photo_id).await?;

        let mut person = build_person(id, request, Utc::now());
        person.created_at = previous.created_at;
        let saved = self.people.update(&person).await?;

        Ok(ApiResponse::success_with_message(saved, "Persona actualizada exitosamente"))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<()> {
        actor.require_super_admin()?;

        if !self.people.delete(id).await? {
            return Err(not_found_error("Person", &id.to_string()));
        }

        tracing::info!("🗑️ Persona {} eliminada por {}", id, actor.email);
        Ok(())
    }

    async fn ensure_photo_exists(&self, photo_id: Option<Uuid>) -> AppResult<()> {
        if let Some(photo_id) = photo_id {
            if self.media.find_by_id(photo_id).await?.is_none() {
                return Err(validation_error("photo_id", "La photo indiquée n'existe pas"));
            }
        }
        Ok(())
    }
}

fn build_person(id: Uuid, request: PersonRequest, now: chrono::DateTime<Utc>) -> Person {
    Person {
        id,
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        birth_date: request.birth_date,
        birth_place: request.birth_place,
        sex: request.sex,
        nationality: request.nationality,
        national_id: request.national_id.trim().to_uppercase(),
        passport_number: request.passport_number,
        address: request.address,
        phone: request.phone,
        email: request.email.map(|e| e.trim().to_lowercase()),
        photo_id: request.photo_id,
        is_wanted: request.is_wanted,
        status: request.status,
        notes: request.notes,
        created_at: now,
        updated_at: now,
    }
}
