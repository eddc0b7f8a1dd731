use crate::domain::validation::{ValidationErrors, checkbox, non_blank, parse_in_range};
use serde::{Deserialize, Serialize};

pub const TABLE_NUMBER_RANGE: (i32, i32) = (1, 999);
pub const CAPACITY_RANGE: (i32, i32) = (1, 20);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: i32,
    pub table_number: i32,
    pub capacity: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub current_bookings_count: i32,
}

fn default_active() -> bool {
    true
}

// Body of `POST tables`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTable {
    pub table_number: i32,
    pub capacity: i32,
}

// Body of `PUT tables/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableForm {
    #[serde(default)]
    pub table_number: String,
    #[serde(default)]
    pub capacity: String,
    pub is_active: Option<String>,
}

impl From<&Table> for TableForm {
    fn from(table: &Table) -> Self {
        Self {
            table_number: table.table_number.to_string(),
            capacity: table.capacity.to_string(),
            is_active: table.is_active.then(|| "on".to_string()),
        }
    }
}

impl TableForm {
    pub fn is_active(&self) -> bool {
        checkbox(self.is_active.as_deref())
    }

    pub fn validate_create(&self) -> Result<CreateTable, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let table_number = required_in_range(
            &mut errors,
            "tableNumber",
            &self.table_number,
            TABLE_NUMBER_RANGE,
        );
        let capacity = required_in_range(&mut errors, "capacity", &self.capacity, CAPACITY_RANGE);

        let create = CreateTable {
            table_number: table_number.unwrap_or_default(),
            capacity: capacity.unwrap_or_default(),
        };
        errors.finish(create)
    }

    pub fn validate_update(&self) -> Result<UpdateTable, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let (min, max) = TABLE_NUMBER_RANGE;
        let table_number = non_blank(Some(self.table_number.as_str()))
            .and_then(|raw| parse_in_range(&mut errors, "tableNumber", raw, min, max));
        let (min, max) = CAPACITY_RANGE;
        let capacity = non_blank(Some(self.capacity.as_str()))
            .and_then(|raw| parse_in_range(&mut errors, "capacity", raw, min, max));

        let update = UpdateTable {
            table_number,
            capacity,
            is_active: Some(self.is_active()),
        };
        errors.finish(update)
    }
}

fn required_in_range(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: &str,
    (min, max): (i32, i32),
) -> Option<i32> {
    match non_blank(Some(raw)) {
        Some(raw) => parse_in_range(errors, field, raw, min, max),
        None => {
            errors.add(field, "is required");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn when_create_form_is_valid_then_builds_camel_case_payload() {
        let form = TableForm {
            table_number: "12".to_string(),
            capacity: "4".to_string(),
            is_active: None,
        };

        let create = form.validate_create().expect("expected valid form");
        let body = serde_json::to_value(&create).expect("expected json");

        assert_eq!(body, json!({ "tableNumber": 12, "capacity": 4 }));
    }

    #[test]
    fn when_create_form_is_empty_then_both_fields_are_required() {
        let errors = TableForm::default()
            .validate_create()
            .expect_err("expected invalid form");

        assert_eq!(
            errors.for_field("tableNumber").collect::<Vec<_>>(),
            vec!["is required"]
        );
        assert_eq!(errors.for_field("capacity").collect::<Vec<_>>(), vec!["is required"]);
    }

    #[test]
    fn when_capacity_is_zero_or_table_number_too_large_then_validation_fails() {
        let form = TableForm {
            table_number: "1000".to_string(),
            capacity: "0".to_string(),
            is_active: None,
        };

        let errors = form.validate_create().expect_err("expected invalid form");

        assert_eq!(errors.iter().count(), 2);
    }

    #[test]
    fn when_update_form_unticks_active_then_sends_false() {
        let form = TableForm {
            table_number: "5".to_string(),
            capacity: String::new(),
            is_active: None,
        };

        let update = form.validate_update().expect("expected valid update");

        assert_eq!(update.table_number, Some(5));
        assert_eq!(update.capacity, None);
        assert_eq!(update.is_active, Some(false));
    }

    #[test]
    fn when_table_json_omits_active_flag_then_defaults_to_active() {
        let table: Table =
            serde_json::from_value(json!({ "id": 1, "tableNumber": 12, "capacity": 4 }))
                .expect("expected table");

        assert!(table.is_active);
        assert_eq!(table.current_bookings_count, 0);
    }
}
