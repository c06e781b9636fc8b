//! Seed data for the violation catalog.
//!
//! The built-in catalog covers the three most common complaints; a YAML file
//! with the same shape can replace it at startup.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::database::models::NewViolation;
use crate::error::EcoBotError;

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    violations: Vec<NewViolation>,
}

/// The catalog seeded when no custom file is configured.
pub fn default_catalog() -> Vec<NewViolation> {
    vec![
        entry(
            "Незаконное размещение отходов",
            "Сброс мусора в неположенном месте",
            "Статья 8.2 КоАП РФ",
            "Штраф для граждан: 1,000 - 2,000 руб.",
            "Росприроднадзор, Полиция",
            "Укажите точный адрес, приложите фото/видео",
            "мусор свалка отходы",
        ),
        entry(
            "Загрязнение водных объектов",
            "Сброс сточных вод в реку",
            "Статья 8.13 КоАП РФ",
            "Штраф для граждан: 500 - 1,000 руб.",
            "Росприроднадзор",
            "Укажите координаты места сброса",
            "река вода загрязнение",
        ),
        entry(
            "Незаконная вырубка деревьев",
            "Вырубка лесных насаждений",
            "Статья 8.28 КоАП РФ",
            "Штраф для граждан: 3,000 - 4,000 руб.",
            "Рослесхоз, Полиция",
            "Укажите место вырубки, количество деревьев",
            "вырубка деревья лес",
        ),
    ]
}

fn entry(
    violation_type: &str,
    description: &str,
    law_article: &str,
    punishment: &str,
    authority: &str,
    appeal_tips: &str,
    keywords: &str,
) -> NewViolation {
    NewViolation {
        violation_type: violation_type.to_string(),
        description: description.to_string(),
        law_article: law_article.to_string(),
        punishment: punishment.to_string(),
        authority: authority.to_string(),
        appeal_tips: appeal_tips.to_string(),
        keywords: keywords.split_whitespace().map(str::to_string).collect(),
    }
}

/// Load catalog entries from a YAML file with a top-level `violations` list.
pub fn load_catalog_file(path: &Path) -> Result<Vec<NewViolation>, EcoBotError> {
    info!("Loading violation catalog from: {:?}", path);

    let contents = fs::read_to_string(path).map_err(|e| {
        EcoBotError::CatalogError(format!("Failed to read {:?}: {}", path, e))
    })?;

    let file: CatalogFile = serde_yaml::from_str(&contents)
        .map_err(|e| EcoBotError::CatalogError(format!("Failed to parse {:?}: {}", path, e)))?;

    validate_catalog(&file.violations)?;
    info!("Loaded {} catalog entries", file.violations.len());
    Ok(file.violations)
}

/// The configured file if any, otherwise the built-in catalog.
pub fn resolve_catalog(path: Option<&Path>) -> Result<Vec<NewViolation>, EcoBotError> {
    match path {
        Some(path) => load_catalog_file(path),
        None => Ok(default_catalog()),
    }
}

pub fn validate_catalog(violations: &[NewViolation]) -> Result<(), EcoBotError> {
    if violations.is_empty() {
        return Err(EcoBotError::CatalogError(
            "Catalog must contain at least one violation".to_string(),
        ));
    }

    for (index, violation) in violations.iter().enumerate() {
        let fields = [
            ("violation_type", &violation.violation_type),
            ("description", &violation.description),
            ("law_article", &violation.law_article),
            ("punishment", &violation.punishment),
            ("authority", &violation.authority),
            ("appeal_tips", &violation.appeal_tips),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(EcoBotError::empty_catalog_entry(name, index));
            }
        }
        if violation.keywords.is_empty() {
            return Err(EcoBotError::empty_catalog_entry("keywords", index));
        }

        let duplicate = violations[..index]
            .iter()
            .any(|earlier| earlier.violation_type == violation.violation_type);
        if duplicate {
            return Err(EcoBotError::CatalogError(format!(
                "Duplicate violation type: {}",
                violation.violation_type
            )));
        }
    }

    Ok(())
}
