//! Servicio de reportes PDF
//!
//! Genera los documentos oficiales del registro (en francés):
//! fiche d'enregistrement, déclaration de vol y attestation de
//! changement. A4, fuentes Helvetica integradas, salto de página
//! automático y pie de página en cada hoja.

use chrono::{DateTime, NaiveDate, Utc};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};
use rust_decimal::Decimal;

use crate::models::person::Person;
use crate::models::vehicle::{ChangeHistoryEntry, ChangeType, Vehicle};
use crate::utils::errors::{AppError, AppResult};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 18.0;
const BOTTOM_LIMIT: f32 = 30.0;
const NOT_AVAILABLE: &str = "N/A";

const ISSUER: &str = "DIRECTION DES DOUANES";
const COUNTRY: &str = "RÉPUBLIQUE DE CÔTE D'IVOIRE";

/// Tipo de documento, determina el nombre del archivo descargado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    VehicleSheet,
    TheftDeclaration,
    HistoryEntry(usize),
}

impl ReportKind {
    pub fn filename(&self, plate_number: &str) -> String {
        match self {
            ReportKind::VehicleSheet => format!("fiche-vehicule-{}.pdf", plate_number),
            ReportKind::TheftDeclaration => format!("declaration-vol-{}.pdf", plate_number),
            ReportKind::HistoryEntry(index) => {
                format!("changement-{}-{}.pdf", plate_number, index + 1)
            }
        }
    }
}

/// Personas referenciadas por un documento (propietarios)
#[derive(Debug, Default)]
pub struct ReportPeople<'a> {
    pub owner: Option<&'a Person>,
    pub previous_owner: Option<&'a Person>,
    pub new_owner: Option<&'a Person>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Fiche d'enregistrement du véhicule
    pub fn vehicle_sheet(&self, vehicle: &Vehicle, people: &ReportPeople<'_>) -> AppResult<Vec<u8>> {
        let mut pdf = PdfWriter::new(&format!("Fiche {}", vehicle.plate_number))?;
        pdf.official_header("FICHE D'ENREGISTREMENT VÉHICULE");

        pdf.section("INFORMATIONS GÉNÉRALES", BLACK);
        pdf.field("Numéro d'immatriculation", Some(vehicle.plate_number.clone()));
        pdf.field("Numéro de série (VIN)", Some(vehicle.serial_number.clone()));
        pdf.field("Type de véhicule", Some(vehicle.vehicle_type.label().to_string()));
        pdf.field("Statut", Some(vehicle.status.label().to_string()));
        pdf.field("Date d'enregistrement", Some(format_datetime(&vehicle.registration_date)));

        pdf.section("CARACTÉRISTIQUES TECHNIQUES", BLACK);
        pdf.field("Marque", Some(vehicle.brand.clone()));
        pdf.field("Modèle", Some(vehicle.model.clone()));
        pdf.field("Année", Some(vehicle.year.to_string()));
        pdf.field("Couleur", vehicle.color.map(|c| c.label().to_string()));
        pdf.field("Carburant", vehicle.fuel_type.map(|f| f.label().to_string()));
        pdf.field("Cylindrée", vehicle.engine_displacement_cc.map(|cc| format!("{} cm³", cc)));
        pdf.field("Poids", vehicle.weight_kg.map(|w| format!("{} kg", format_decimal(w))));
        pdf.field("Numéro moteur", vehicle.engine_number.clone());

        pdf.section("INFORMATIONS D'ACHAT", BLACK);
        pdf.field("Date d'achat", vehicle.purchase_date.map(|d| format_date(&d)));
        pdf.field("Pays d'origine", vehicle.origin_country.clone());
        pdf.field(
            "Prix d'achat",
            vehicle
                .purchase_price
                .map(|p| format!("{} {}", format_decimal(p), vehicle.currency)),
        );

        pdf.section("PROPRIÉTAIRE", BLACK);
        pdf.person_fields(people.owner);

        if let Some(theft) = &vehicle.theft_info {
            pdf.section("SIGNALEMENT DE VOL", RED);
            pdf.field("Date du vol", Some(format_date(&theft.theft_date)));
            pdf.field("Lieu du vol", Some(theft.place.clone()));
            pdf.field("Ville", theft.city.clone());
        }

        if let Some(recovery) = &vehicle.recovery_info {
            pdf.section("RÉCUPÉRATION", GREEN);
            pdf.field("Date de récupération", Some(format_date(&recovery.recovery_date)));
            pdf.field("Lieu", recovery.place.clone());
            pdf.field("État", recovery.condition.map(|c| c.label().to_string()));
        }

        pdf.section("HISTORIQUE DES CHANGEMENTS", BLACK);
        if vehicle.change_history.is_empty() {
            pdf.paragraph("Aucun changement enregistré.");
        }
        for (index, entry) in vehicle.change_history.iter().enumerate() {
            pdf.field(
                &format!("{}. {}", index + 1, format_date(&entry.change_date)),
                Some(describe_change(entry)),
            );
        }

        pdf.section("NOTES INTERNES", BLACK);
        pdf.paragraph(vehicle.internal_notes.as_deref().unwrap_or(NOT_AVAILABLE));

        pdf.finish()
    }

    /// Déclaration de vol. `NotFound` si le véhicule n'a pas de `theft_info`.
    pub fn theft_declaration(&self, vehicle: &Vehicle, people: &ReportPeople<'_>) -> AppResult<Vec<u8>> {
        let theft = vehicle.theft_info.as_ref().ok_or_else(|| {
            AppError::NotFound(format!(
                "Aucune information de vol pour le véhicule {}",
                vehicle.plate_number
            ))
        })?;

        let mut pdf = PdfWriter::new(&format!("Déclaration de vol {}", vehicle.plate_number))?;
        pdf.alert_banner("DÉCLARATION DE VOL");
        pdf.official_header("AVIS DE RECHERCHE - VÉHICULE VOLÉ");

        pdf.section("VÉHICULE CONCERNÉ", RED);
        pdf.field("Numéro d'immatriculation", Some(vehicle.plate_number.clone()));
        pdf.field("Numéro de série (VIN)", Some(vehicle.serial_number.clone()));
        pdf.field("Type de véhicule", Some(vehicle.vehicle_type.label().to_string()));
        pdf.field("Marque / Modèle", Some(format!("{} {}", vehicle.brand, vehicle.model)));
        pdf.field("Année", Some(vehicle.year.to_string()));
        pdf.field("Couleur", vehicle.color.map(|c| c.label().to_string()));
        pdf.field("Statut actuel", Some(vehicle.status.label().to_string()));

        pdf.section("CIRCONSTANCES DU VOL", RED);
        pdf.field("Date du vol", Some(format_date(&theft.theft_date)));
        pdf.field("Lieu du vol", Some(theft.place.clone()));
        pdf.field("Ville", theft.city.clone());
        pdf.paragraph(theft.circumstances.as_deref().unwrap_or(NOT_AVAILABLE));

        pdf.section("DÉCLARANT", BLACK);
        pdf.field("Nom", theft.declarant_name.clone());
        pdf.field("Téléphone", theft.declarant_phone.clone());
        pdf.field("Email", theft.declarant_email.clone());

        pdf.section("PROPRIÉTAIRE ENREGISTRÉ", BLACK);
        pdf.person_fields(people.owner);

        pdf.section("ENREGISTREMENT", BLACK);
        pdf.field("Déclaré le", theft.filed_at.as_ref().map(format_datetime));
        pdf.field("Agent", theft.filed_by.map(|id| id.to_string()));

        pdf.finish()
    }

    /// Attestation pour une entrée de l'historique (index base 0)
    pub fn history_entry(
        &self,
        vehicle: &Vehicle,
        index: usize,
        people: &ReportPeople<'_>,
    ) -> AppResult<Vec<u8>> {
        let entry = vehicle.history_entry(index).ok_or_else(|| {
            AppError::NotFound(format!(
                "Changement {} introuvable pour le véhicule {}",
                index, vehicle.plate_number
            ))
        })?;

        let mut pdf = PdfWriter::new(&format!("Changement {} {}", index + 1, vehicle.plate_number))?;
        pdf.official_header("ATTESTATION DE CHANGEMENT");
        pdf.paragraph(&format!(
            "Changement n° {} sur {}",
            index + 1,
            vehicle.change_history.len()
        ));

        pdf.section("VÉHICULE", BLACK);
        pdf.field("Numéro d'immatriculation actuel", Some(vehicle.plate_number.clone()));
        pdf.field("Numéro de série (VIN)", Some(vehicle.serial_number.clone()));
        pdf.field("Marque / Modèle", Some(format!("{} {}", vehicle.brand, vehicle.model)));

        pdf.section("DÉTAILS DU CHANGEMENT", BLUE);
        pdf.field("Type de changement", Some(entry.change_type.label().to_string()));
        pdf.field("Date du changement", Some(format_date(&entry.change_date)));
        match entry.change_type {
            ChangeType::PlateChange => {
                pdf.field("Ancienne immatriculation", entry.previous_plate.clone());
                pdf.field("Nouvelle immatriculation", entry.new_plate.clone());
            }
            ChangeType::OwnershipChange => {
                pdf.field(
                    "Ancien propriétaire",
                    owner_label(people.previous_owner, entry.previous_owner_id),
                );
                pdf.field(
                    "Nouveau propriétaire",
                    owner_label(people.new_owner, entry.new_owner_id),
                );
            }
        }

        pdf.section("MOTIF", BLACK);
        pdf.paragraph(entry.reason.as_deref().unwrap_or(NOT_AVAILABLE));

        pdf.section("ENREGISTREMENT", BLACK);
        pdf.field("Saisi le", Some(format_datetime(&entry.entered_at)));
        pdf.field("Agent", Some(entry.entered_by.to_string()));

        pdf.finish()
    }
}

// ==================== FORMATO ====================

/// Fecha en formato francés (dd/mm/aaaa)
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_datetime(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y %H:%M").to_string()
}

/// Separador de miles con espacio, coma decimal: `12 500 000,50`
pub fn format_decimal(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::new();
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{},{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn describe_change(entry: &ChangeHistoryEntry) -> String {
    match entry.change_type {
        ChangeType::PlateChange => format!(
            "{}: {} -> {}",
            entry.change_type.label(),
            entry.previous_plate.as_deref().unwrap_or(NOT_AVAILABLE),
            entry.new_plate.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
        ChangeType::OwnershipChange => entry.change_type.label().to_string(),
    }
}

fn owner_label(person: Option<&Person>, id: Option<uuid::Uuid>) -> Option<String> {
    match (person, id) {
        (Some(p), _) => Some(format!("{} ({})", p.full_name(), p.national_id)),
        (None, Some(id)) => Some(id.to_string()),
        (None, None) => None,
    }
}

/// Corta un texto en líneas de como mucho `max_chars` caracteres
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let needed = if current.is_empty() { 0 } else { 1 } + word.chars().count();
            if !current.is_empty() && current.chars().count() + needed > max_chars {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ==================== ESCRITOR PDF ====================

#[derive(Clone, Copy)]
struct Tint(f32, f32, f32);

const BLACK: Tint = Tint(0.0, 0.0, 0.0);
const RED: Tint = Tint(0.8, 0.0, 0.0);
const GREEN: Tint = Tint(0.0, 0.5, 0.2);
const BLUE: Tint = Tint(0.1, 0.25, 0.6);
const WHITE: Tint = Tint(1.0, 1.0, 1.0);

impl Tint {
    fn color(self) -> Color {
        Color::Rgb(Rgb::new(self.0, self.1, self.2, None))
    }
}

// Ancho medio de un carácter Helvetica en mm por punto de cuerpo
const CHAR_WIDTH_MM_PER_PT: f32 = 0.19;

struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    cursor: f32,
    pages: usize,
}

impl PdfWriter {
    fn new(title: &str) -> AppResult<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(report_error)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(report_error)?;
        let italic = doc.add_builtin_font(BuiltinFont::HelveticaOblique).map_err(report_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut writer = Self {
            doc,
            layer,
            regular,
            bold,
            italic,
            cursor: PAGE_HEIGHT - MARGIN,
            pages: 1,
        };
        writer.footer();
        Ok(writer)
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN;
        self.footer();
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.cursor - needed < BOTTOM_LIMIT {
            self.new_page();
        }
    }

    fn text(&self, text: &str, size: f32, x: f32, font: &IndirectFontRef, tint: Tint) {
        self.layer.set_fill_color(tint.color());
        self.layer.use_text(text, size, Mm(x), Mm(self.cursor), font);
        self.layer.set_fill_color(BLACK.color());
    }

    fn centered(&self, text: &str, size: f32, font: &IndirectFontRef, tint: Tint) {
        let width = text.chars().count() as f32 * size * CHAR_WIDTH_MM_PER_PT;
        let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN);
        self.text(text, size, x, font, tint);
    }

    fn rule(&self, tint: Tint, thickness: f32) {
        self.layer.set_outline_color(tint.color());
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(self.cursor)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(self.cursor)), false),
            ],
            is_closed: false,
        });
        self.layer.set_outline_color(BLACK.color());
    }

    fn footer(&self) {
        self.layer.set_fill_color(BLACK.color());
        self.layer.use_text(
            "Document généré automatiquement",
            8.0,
            Mm(MARGIN),
            Mm(14.0),
            &self.italic,
        );
        self.layer.use_text(
            format!("{} de Côte d'Ivoire - page {}", title_case(ISSUER), self.pages),
            8.0,
            Mm(MARGIN),
            Mm(10.0),
            &self.italic,
        );
    }

    fn official_header(&mut self, title: &str) {
        let (bold, regular) = (self.bold.clone(), self.regular.clone());

        self.centered(COUNTRY, 16.0, &bold, BLACK);
        self.cursor -= 8.0;
        self.centered(ISSUER, 13.0, &bold, BLACK);
        self.cursor -= 12.0;
        self.centered(title, 15.0, &bold, BLACK);
        self.cursor -= 3.0;
        self.rule(BLACK, 1.0);
        self.cursor -= 7.0;

        let edition = format!("Date d'édition: {}", format_date(&Utc::now().date_naive()));
        let width = edition.chars().count() as f32 * 9.0 * CHAR_WIDTH_MM_PER_PT;
        self.text(&edition, 9.0, PAGE_WIDTH - MARGIN - width, &regular, BLACK);
        self.cursor -= 10.0;
    }

    fn alert_banner(&mut self, title: &str) {
        let top = self.cursor;
        let height = 18.0;
        self.layer.set_fill_color(RED.color());
        self.layer.add_rect(Rect::new(
            Mm(MARGIN),
            Mm(top - height),
            Mm(PAGE_WIDTH - MARGIN),
            Mm(top),
        ));

        self.cursor = top - 12.0;
        let bold = self.bold.clone();
        self.centered(title, 20.0, &bold, WHITE);
        self.cursor = top - height - 8.0;
    }

    fn section(&mut self, title: &str, tint: Tint) {
        self.ensure_space(20.0);
        self.cursor -= 4.0;
        let bold = self.bold.clone();
        self.text(title, 12.0, MARGIN, &bold, tint);
        self.cursor -= 2.5;
        self.rule(tint, 1.5);
        self.cursor -= 6.0;
    }

    /// `label: valeur`, `N/A` si la valeur manque
    fn field(&mut self, label: &str, value: Option<String>) {
        let value = value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let label = format!("{}: ", label);
        let label_width = label.chars().count() as f32 * 10.0 * CHAR_WIDTH_MM_PER_PT;
        let value_x = MARGIN + label_width.min(80.0);
        let max_chars = ((PAGE_WIDTH - MARGIN - value_x) / (10.0 * CHAR_WIDTH_MM_PER_PT)) as usize;

        let (bold, regular) = (self.bold.clone(), self.regular.clone());
        for (i, line) in wrap_text(&value, max_chars.max(10)).iter().enumerate() {
            self.ensure_space(6.0);
            if i == 0 {
                self.text(&label, 10.0, MARGIN, &bold, BLACK);
            }
            self.text(line, 10.0, value_x, &regular, BLACK);
            self.cursor -= 5.5;
        }
    }

    fn paragraph(&mut self, text: &str) {
        let max_chars = ((PAGE_WIDTH - 2.0 * MARGIN) / (10.0 * CHAR_WIDTH_MM_PER_PT)) as usize;
        let regular = self.regular.clone();
        for line in wrap_text(text, max_chars) {
            self.ensure_space(6.0);
            self.text(&line, 10.0, MARGIN, &regular, BLACK);
            self.cursor -= 5.5;
        }
        self.cursor -= 2.0;
    }

    fn person_fields(&mut self, person: Option<&Person>) {
        match person {
            Some(p) => {
                self.field("Nom complet", Some(p.full_name()));
                self.field("Numéro d'identité", Some(p.national_id.clone()));
                self.field("Téléphone", p.phone.clone());
                self.field("Adresse", p.address.clone());
            }
            None => self.field("Propriétaire", None),
        }
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        self.doc.save_to_bytes().map_err(report_error)
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) if word.len() > 3 => first.to_uppercase().chain(chars).collect(),
                _ => lower,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn report_error(e: printpdf::Error) -> AppError {
    AppError::Report(format!("Error generando el PDF: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{
        RecoveryInfo, TheftInfo, VehicleStatus, VehicleType, DEFAULT_CURRENCY,
    };
    use std::str::FromStr;
    use uuid::Uuid;

    fn vehicle() -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: Uuid::new_v4(),
            plate_number: "AB-123-CD".to_string(),
            serial_number: "1HGCM82633A004352".to_string(),
            vehicle_type: VehicleType::Car,
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2018,
            color: None,
            fuel_type: None,
            engine_displacement_cc: Some(1800),
            engine_number: None,
            weight_kg: None,
            purchase_date: None,
            origin_country: Some("Japon".to_string()),
            purchase_price: Some(Decimal::from(12_500_000)),
            currency: DEFAULT_CURRENCY.to_string(),
            owner_id: None,
            registration_date: now,
            internal_notes: Some("Ligne de texte très longue ".repeat(30)),
            status: VehicleStatus::Active,
            theft_info: None,
            recovery_info: None,
            change_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_vehicle_sheet_is_pdf() {
        let bytes = ReportService::new()
            .vehicle_sheet(&vehicle(), &ReportPeople::default())
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_theft_declaration_requires_theft_info() {
        let service = ReportService::new();
        let mut v = vehicle();
        let err = service.theft_declaration(&v, &ReportPeople::default()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        v.status = VehicleStatus::Recovered;
        v.theft_info = Some(TheftInfo::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(), "Abidjan"));
        v.recovery_info = Some(RecoveryInfo::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        let bytes = service.theft_declaration(&v, &ReportPeople::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_history_entry_out_of_range() {
        let service = ReportService::new();
        let mut v = vehicle();
        let err = service.history_entry(&v, 0, &ReportPeople::default()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        v.change_history.push(ChangeHistoryEntry {
            change_type: ChangeType::PlateChange,
            change_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            previous_plate: Some("AA-111-AA".to_string()),
            new_plate: Some("AB-123-CD".to_string()),
            previous_owner_id: None,
            new_owner_id: None,
            reason: None,
            entered_by: Uuid::new_v4(),
            entered_at: Utc::now(),
        });
        let bytes = service.history_entry(&v, 0, &ReportPeople::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(service.history_entry(&v, 1, &ReportPeople::default()).is_err());
    }

    #[test]
    fn test_long_sheet_breaks_pages() {
        let mut writer = PdfWriter::new("test").unwrap();
        for i in 0..80 {
            writer.field("Ligne", Some(i.to_string()));
        }
        assert!(writer.pages > 1);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(Decimal::from(12_500_000)), "12 500 000");
        assert_eq!(format_decimal(Decimal::from_str("1500.50").unwrap()), "1 500,5");
        assert_eq!(format_decimal(Decimal::from(-950)), "-950");
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("un deux trois quatre", 9);
        assert_eq!(lines, vec!["un deux", "trois", "quatre"]);
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_report_filenames() {
        assert_eq!(ReportKind::VehicleSheet.filename("AB-123-CD"), "fiche-vehicule-AB-123-CD.pdf");
        assert_eq!(ReportKind::TheftDeclaration.filename("AB-123-CD"), "declaration-vol-AB-123-CD.pdf");
        assert_eq!(ReportKind::HistoryEntry(0).filename("AB-123-CD"), "changement-AB-123-CD-1.pdf");
    }
}
