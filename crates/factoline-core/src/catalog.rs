// ── Catalog provider ──
//
// Products and filter categories are static for a session. They come
// either from the built-in lumber catalog or from a JSON/TOML file with
// the shape `{ products = [...], categories = [...] }`.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{FilterCategory, FilterOption, Product};

/// Ordered product list plus the filter groups shown in the sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<FilterCategory>,
}

impl Catalog {
    /// Load and validate a catalog file. The format is picked from the
    /// extension (`.json` or `.toml`).
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str, &str) -> Result<Self, CoreError> = match ext.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => {
                return Err(CoreError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = parse(&raw, &path.display().to_string())?;

        info!(
            path = %path.display(),
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse and validate a JSON catalog. `origin` names the source in errors.
    pub fn from_json_str(raw: &str, origin: &str) -> Result<Self, CoreError> {
        let catalog: Self = serde_json::from_str(raw).map_err(|e| CoreError::CatalogParse {
            origin: origin.into(),
            message: e.to_string(),
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a TOML catalog. `origin` names the source in errors.
    pub fn from_toml_str(raw: &str, origin: &str) -> Result<Self, CoreError> {
        let catalog: Self = toml::from_str(raw).map_err(|e| CoreError::CatalogParse {
            origin: origin.into(),
            message: e.to_string(),
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the invariants the filter engine and the views rely on.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut ids = HashSet::new();
        for product in &self.products {
            if product.id.trim().is_empty() {
                return Err(CoreError::invalid(format!(
                    "product '{}' has an empty id",
                    product.title
                )));
            }
            if !ids.insert(product.id.as_str()) {
                return Err(CoreError::invalid(format!(
                    "duplicate product id '{}'",
                    product.id
                )));
            }
            if product.price_per_m3 < Decimal::ZERO {
                return Err(CoreError::invalid(format!(
                    "product '{}' has a negative price",
                    product.id
                )));
            }
        }

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(CoreError::invalid(format!(
                    "duplicate filter category '{}'",
                    category.id
                )));
            }
            let mut option_ids = HashSet::new();
            for option in &category.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(CoreError::invalid(format!(
                        "duplicate option '{}' in filter category '{}'",
                        option.id, category.id
                    )));
                }
            }
        }

        debug!(
            products = self.products.len(),
            categories = self.categories.len(),
            "catalog validated"
        );
        Ok(())
    }

    /// The bundled lumber catalog used when no catalog file is configured.
    pub fn builtin() -> Self {
        Self {
            products: builtin_products(),
            categories: builtin_categories(),
        }
    }
}

// ── Built-in data ───────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn lumber(
    id: &str,
    title: &str,
    essence: &str,
    kind: &str,
    quality: &str,
    drying: &str,
    thickness: &str,
    lengths: &str,
    seller: &str,
    stock: u32,
    price: i64,
) -> Product {
    Product {
        id: id.into(),
        title: title.into(),
        image: format!("https://images.factoline.fr/products/{id}.jpg"),
        essence: essence.into(),
        kind: kind.into(),
        quality: quality.into(),
        drying: drying.into(),
        thickness: thickness.into(),
        lengths: lengths.into(),
        seller: seller.into(),
        stock,
        price_per_m3: Decimal::from(price),
        currency: "EUR".into(),
    }
}

#[rustfmt::skip]
fn builtin_products() -> Vec<Product> {
    vec![
        lumber("1", "Planche de chêne avivée 27mm", "oak", "plank", "QF1a Premier choix", "Séché KD 12%", "27mm", "2.00m - 3.00m", "Scierie Moreau", 64, 1450),
        lumber("2", "Plot de chêne 54mm", "oak", "plot", "QF2 Choix courant", "Séché à l'air", "54mm", "2.50m - 4.00m", "Scierie du Morvan", 18, 1190),
        lumber("3", "Avivé de chêne 27x150mm", "oak", "avive", "QF1b Premier choix", "Séché KD 10%", "27x150mm", "2.10m - 2.70m", "Bois de Bourgogne", 35, 1620),
        lumber("4", "Poutre de chêne 80x200mm", "oak", "beam", "QF3 Charpente", "Bois vert", "80x200mm", "4.00m - 6.00m", "Charpentes Lefèvre", 12, 980),
        lumber("5", "Planche de douglas 41mm", "douglas", "plank", "QF2 Choix courant", "Séché KD 18%", "41mm", "3.00m - 5.00m", "Scierie des Vosges", 120, 540),
        lumber("6", "Poutre de douglas 80x160mm", "douglas", "beam", "QF3 Charpente", "Séché KD 18%", "80x160mm", "4.00m - 8.00m", "Scierie des Vosges", 48, 495),
        lumber("7", "Planche de pin maritime 27mm", "pine", "plank", "QF2 Menuiserie", "Séché KD 14%", "27mm", "2.40m - 4.80m", "Landes Bois", 75, 410),
        lumber("8", "Plot de hêtre étuvé 54mm", "beech", "plot", "QF1a Ébénisterie", "Séché KD 10%", "54mm", "2.00m - 3.50m", "Scierie Moreau", 22, 890),
        lumber("9", "Avivé de frêne 41x120mm", "ash", "avive", "QF1b Menuiserie", "Séché KD 12%", "41x120mm", "2.10m - 3.00m", "Bois de Bourgogne", 9, 1080),
        lumber("10", "Planche de chêne rustique 41mm", "oak", "plank", "QF3 Rustique", "Séché à l'air", "41mm", "2.00m - 3.00m", "Charpentes Lefèvre", 51, 870),
        lumber("11", "Madrier de douglas 54x225mm", "douglas", "beam", "QF2 Charpente", "Bois vert", "54x225mm", "4.00m - 6.00m", "Scierie des Vosges", 20, 460),
    ]
}

fn builtin_categories() -> Vec<FilterCategory> {
    vec![
        FilterCategory::new(
            "essence",
            "Essence",
            vec![
                FilterOption::new("oak", "Chêne").with_count(5),
                FilterOption::new("douglas", "Douglas").with_count(3),
                FilterOption::new("pine", "Pin maritime").with_count(1),
                FilterOption::new("beech", "Hêtre").with_count(1),
                FilterOption::new("ash", "Frêne").with_count(1),
            ],
        ),
        FilterCategory::new(
            "type",
            "Type de produit",
            vec![
                FilterOption::new("plank", "Planches").with_count(4),
                FilterOption::new("beam", "Poutres & madriers").with_count(3),
                FilterOption::new("avive", "Avivés").with_count(2),
                FilterOption::new("plot", "Plots").with_count(2),
            ],
        ),
        FilterCategory::new(
            "thickness",
            "Épaisseur",
            vec![
                FilterOption::new("27", "27 mm").with_count(3),
                FilterOption::new("41", "41 mm").with_count(3),
                FilterOption::new("54", "54 mm").with_count(3),
                FilterOption::new("80", "80 mm").with_count(2),
            ],
        ),
        FilterCategory::new(
            "quality",
            "Qualité",
            vec![
                FilterOption::new("qf1", "QF1 (premier choix)").with_count(4),
                FilterOption::new("qf2", "QF2 (choix courant)").with_count(4),
                FilterOption::new("qf3", "QF3 (charpente, rustique)").with_count(3),
            ],
        ),
        FilterCategory::new(
            "cert",
            "Certification",
            vec![
                FilterOption::new("pefc", "PEFC"),
                FilterOption::new("fsc", "FSC"),
            ],
        ),
    ]
}
