use crate::domain::datetime;
use crate::domain::validation::{ValidationErrors, check_length, checkbox, non_blank};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Upper bound accepted for a menu price.
pub const MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default, with = "datetime")]
    pub created_at: NaiveDateTime,
}

// Body of `POST menuitem`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItem {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub is_popular: bool,
}

// Body of `PUT menuitem/{id}`; absent fields are left unchanged upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_popular: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

// Raw menu form as posted by the browser; also used to prefill the edit page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MenuItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    pub is_popular: Option<String>,
    pub is_available: Option<String>,
}

impl From<&MenuItem> for MenuItemForm {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.round_dp(2).to_string(),
            category: item.category.clone(),
            image_url: item.image_url.clone().unwrap_or_default(),
            is_popular: item.is_popular.then(|| "on".to_string()),
            is_available: item.is_available.then(|| "on".to_string()),
        }
    }
}

impl MenuItemForm {
    pub fn is_popular(&self) -> bool {
        checkbox(self.is_popular.as_deref())
    }

    pub fn is_available(&self) -> bool {
        checkbox(self.is_available.as_deref())
    }

    pub fn validate_create(&self) -> Result<CreateMenuItem, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "is required");
        } else {
            check_length(&mut errors, "name", name, 2, 100);
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.add("description", "is required");
        } else {
            check_length(&mut errors, "description", description, 1, 500);
        }

        let price = match non_blank(Some(self.price.as_str())) {
            Some(raw) => parse_price(&mut errors, raw),
            None => {
                errors.add("price", "is required");
                None
            }
        };

        let category = self.category.trim();
        if category.is_empty() {
            errors.add("category", "is required");
        } else {
            check_length(&mut errors, "category", category, 1, 50);
        }

        let image_url = validate_image_url(&mut errors, &self.image_url);

        let create = CreateMenuItem {
            name: name.to_string(),
            description: description.to_string(),
            price: price.unwrap_or_default(),
            category: category.to_string(),
            image_url,
            is_popular: self.is_popular(),
        };
        errors.finish(create)
    }

    pub fn validate_update(&self) -> Result<UpdateMenuItem, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = non_blank(Some(self.name.as_str()));
        if let Some(name) = name {
            check_length(&mut errors, "name", name, 2, 100);
        }
        let description = non_blank(Some(self.description.as_str()));
        if let Some(description) = description {
            check_length(&mut errors, "description", description, 1, 500);
        }
        let price =
            non_blank(Some(self.price.as_str())).and_then(|raw| parse_price(&mut errors, raw));
        let category = non_blank(Some(self.category.as_str()));
        if let Some(category) = category {
            check_length(&mut errors, "category", category, 1, 50);
        }
        let image_url = validate_image_url(&mut errors, &self.image_url);

        let update = UpdateMenuItem {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            price,
            category: category.map(str::to_string),
            image_url,
            is_popular: Some(self.is_popular()),
            is_available: Some(self.is_available()),
        };
        errors.finish(update)
    }
}

fn parse_price(errors: &mut ValidationErrors, raw: &str) -> Option<Decimal> {
    // Accept a decimal comma as typed on Swedish keyboards.
    let normalized = raw.trim().replace(',', ".");
    match Decimal::from_str(&normalized) {
        Ok(price) if price >= Decimal::ZERO && price <= MAX_PRICE => Some(price.round_dp(2)),
        Ok(_) => {
            errors.add("price", "Price must be between 0 and 9999.99");
            None
        }
        Err(_) => {
            errors.add("price", "must be a number");
            None
        }
    }
}

fn validate_image_url(errors: &mut ValidationErrors, raw: &str) -> Option<String> {
    let raw = non_blank(Some(raw))?;
    match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(raw.to_string()),
        _ => {
            errors.add("imageUrl", "must be a valid http(s) URL");
            None
        }
    }
}
