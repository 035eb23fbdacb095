//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! del registro (placas, VIN, años, tipos MIME).

use chrono::{Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Formato de placa de inmatriculación: AA-123-BB
    static ref PLATE_REGEX: Regex = Regex::new(r"^[A-Z]{2}-\d{3}-[A-Z]{2}$").unwrap();
    static ref VIN_REGEX: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
}

/// Año mínimo aceptado para un vehículo
pub const MIN_VEHICLE_YEAR: i32 = 1900;

/// Normalizar una placa: mayúsculas y sin espacios alrededor
pub fn normalize_plate(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validar el formato de placa (se acepta minúsculas, se normaliza después)
pub fn validate_plate_number(value: &str) -> Result<(), ValidationError> {
    if !PLATE_REGEX.is_match(&normalize_plate(value)) {
        let mut error = ValidationError::new("plate_format");
        error.message = Some("Veuillez utiliser le format : AA-123-BB".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar un número de serie (VIN) de 17 caracteres
pub fn validate_serial_number(value: &str) -> Result<(), ValidationError> {
    if !VIN_REGEX.is_match(&value.trim().to_uppercase()) {
        let mut error = ValidationError::new("vin_format");
        error.message = Some("Le VIN doit contenir exactement 17 caractères".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Año máximo aceptado: el año en curso más uno
pub fn max_vehicle_year() -> i32 {
    Utc::now().year() + 1
}

/// Validar el año de fabricación
pub fn validate_vehicle_year(year: i32) -> Result<(), ValidationError> {
    let max = max_vehicle_year();
    if year < MIN_VEHICLE_YEAR || year > max {
        let mut error = ValidationError::new("range");
        error.message = Some(format!("L'année doit être entre {} et {}", MIN_VEHICLE_YEAR, max).into());
        error.add_param("min".into(), &MIN_VEHICLE_YEAR);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &year);
        return Err(error);
    }
    Ok(())
}

/// Validar que una fecha no esté en el futuro
pub fn validate_not_future(date: NaiveDate) -> Result<(), ValidationError> {
    if date > Utc::now().date_naive() {
        let mut error = ValidationError::new("future_date");
        error.add_param("value".into(), &date.to_string());
        return Err(error);
    }
    Ok(())
}

/// Solo se aceptan imágenes (image/*)
pub fn validate_image_mime(mime: &str) -> Result<(), ValidationError> {
    if !mime.starts_with("image/") {
        let mut error = ValidationError::new("mime_type");
        error.add_param("value".into(), &mime.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
