use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

// Field-level failures collected before any remote call is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn for_field(&self, field: &str) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .filter(move |error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    // Ok(value) when nothing was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

// Form values arrive as text; blank means "not supplied".
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub(crate) fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.chars().count();
    if len < min || len > max {
        if min <= 1 {
            errors.add(field, format!("must be at most {max} characters"));
        } else {
            errors.add(field, format!("must be between {min} and {max} characters"));
        }
    }
}

pub(crate) fn parse_in_range(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: &str,
    min: i32,
    max: i32,
) -> Option<i32> {
    match raw.trim().parse::<i32>() {
        Ok(value) if (min..=max).contains(&value) => Some(value),
        Ok(_) => {
            errors.add(field, format!("must be between {min} and {max}"));
            None
        }
        Err(_) => {
            errors.add(field, "must be a whole number");
            None
        }
    }
}

// HTML checkboxes are only submitted when ticked.
pub(crate) fn checkbox(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_number_is_out_of_range_then_error_names_bounds() {
        let mut errors = ValidationErrors::new();

        let value = parse_in_range(&mut errors, "capacity", "21", 1, 20);

        assert_eq!(value, None);
        assert_eq!(
            errors.for_field("capacity").collect::<Vec<_>>(),
            vec!["must be between 1 and 20"]
        );
    }

    #[test]
    fn when_number_is_not_numeric_then_error_is_recorded() {
        let mut errors = ValidationErrors::new();

        assert_eq!(parse_in_range(&mut errors, "tableNumber", "abc", 1, 999), None);
        assert!(!errors.is_empty());
    }

    #[test]
    fn when_checkbox_is_missing_then_false() {
        assert!(!checkbox(None));
        assert!(checkbox(Some("on")));
        assert!(checkbox(Some("true")));
    }

    #[test]
    fn when_errors_are_displayed_then_they_are_joined() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "is required");
        errors.add("price", "must be between 0 and 9999.99");

        assert_eq!(
            errors.to_string(),
            "name: is required; price: must be between 0 and 9999.99"
        );
    }
}
