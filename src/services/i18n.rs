//! Label lookup for display strings
//!
//! The active language is passed in explicitly; nothing here is global.

use chrono::DateTime;

use crate::models::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Display string for a key, or the key itself when there is none
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let found = match self.language {
            Language::En => english(key),
            Language::Es => spanish(key),
        };
        found.unwrap_or(key)
    }

    /// Calendar date of a millisecond timestamp (UTC), in the language's order
    pub fn date(&self, millis: i64) -> String {
        let Some(dt) = DateTime::from_timestamp_millis(millis) else {
            return String::new();
        };
        match self.language {
            Language::En => dt.format("%-m/%-d/%Y").to_string(),
            Language::Es => dt.format("%-d/%-m/%Y").to_string(),
        }
    }

    /// Overdue alert body
    pub fn overdue_message(&self, count: usize, days: u32) -> String {
        match self.language {
            Language::En => format!(
                "{} equipment item(s) have been in critical status for over {} days",
                count, days
            ),
            Language::Es => format!(
                "{} equipo(s) han estado en estado crítico por más de {} días",
                count, days
            ),
        }
    }
}

fn english(key: &str) -> Option<&'static str> {
    let label = match key {
        // Equipment types
        "PUMP" => "Pump",
        "MOTOR" => "Motor",
        "FAN" => "Fan",
        "FAN COOLER" => "Fan Cooler",
        "BLOWER" => "Blower",
        "FURNACE" => "Furnace",
        "HEAT EXCHANGER" => "Heat Exchanger",
        "CONTROL VALVE" => "Control Valve",
        "INSTRUMENT" => "Instrument",
        "DRUM" => "Drum",
        "TOWER" => "Tower",
        "TANK" => "Tank",
        // Status
        "AVAILABLE" => "Available",
        "IN OPERATION" => "In Operation",
        "NOT AVAILABLE" => "Not Available",
        "IN WORKSHOP" => "In Workshop",
        // Deletion
        "UPLOAD ERROR" => "Upload Error",
        "DEVICE DISASSEMBLED" => "Device Disassembled",
        "OTHER" => "Other",
        // Messages
        "equipmentAdded" => "Equipment added successfully",
        "newUpdate" => "Equipment status updated",
        "alertTitle" => "Equipment Alert",
        _ => return None,
    };
    Some(label)
}

fn spanish(key: &str) -> Option<&'static str> {
    let label = match key {
        "PUMP" => "Bomba",
        "MOTOR" => "Motor",
        "FAN" => "Ventilador",
        "FAN COOLER" => "Ventilador Enfriador",
        "BLOWER" => "Soplador",
        "FURNACE" => "Horno",
        "HEAT EXCHANGER" => "Intercambiador de Calor",
        "CONTROL VALVE" => "Válvula de Control",
        "INSTRUMENT" => "Instrumento",
        "DRUM" => "Tambor",
        "TOWER" => "Torre",
        "TANK" => "Tanque",
        "AVAILABLE" => "Disponible",
        "IN OPERATION" => "En Operación",
        "NOT AVAILABLE" => "No Disponible",
        "IN WORKSHOP" => "En Taller",
        "UPLOAD ERROR" => "Error de Carga",
        "DEVICE DISASSEMBLED" => "Dispositivo Desmontado",
        "OTHER" => "Otro",
        "equipmentAdded" => "Equipo agregado exitosamente",
        "newUpdate" => "Estado del equipo actualizado",
        "alertTitle" => "Alerta de Equipo",
        _ => return None,
    };
    Some(label)
}
