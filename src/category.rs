//! The closed vocabulary of semantic field categories.
//!
//! Every form field is assigned exactly one [`Category`]. Model responses are
//! free text, so the only way in is [`Category::from_response`], which
//! normalizes and validates against the vocabulary and collapses anything
//! unrecognized to the [`Category::Text`] catch-all. The rest of the program
//! never string-matches on category names.

use std::fmt;

/// A semantic category for a form field.
///
/// `Text` is the designated catch-all: classification failures and
/// out-of-vocabulary responses all resolve to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Name,
    FirstName,
    LastName,
    PhoneNumber,
    Email,
    Address,
    City,
    State,
    ZipCode,
    Country,
    Company,
    JobTitle,
    Date,
    VehicleYear,
    VehicleMake,
    VehicleModel,
    Vin,
    LicensePlate,
    CurrencyAmount,
    Boolean,
    Text,
}

impl Category {
    /// Every category, in the order presented to the model.
    pub const ALL: [Category; 21] = [
        Category::Name,
        Category::FirstName,
        Category::LastName,
        Category::PhoneNumber,
        Category::Email,
        Category::Address,
        Category::City,
        Category::State,
        Category::ZipCode,
        Category::Country,
        Category::Company,
        Category::JobTitle,
        Category::Date,
        Category::VehicleYear,
        Category::VehicleMake,
        Category::VehicleModel,
        Category::Vin,
        Category::LicensePlate,
        Category::CurrencyAmount,
        Category::Boolean,
        Category::Text,
    ];

    /// The snake_case label used in prompts and model responses.
    pub fn label(self) -> &'static str {
        match self {
            Category::Name => "name",
            Category::FirstName => "first_name",
            Category::LastName => "last_name",
            Category::PhoneNumber => "phone_number",
            Category::Email => "email",
            Category::Address => "address",
            Category::City => "city",
            Category::State => "state",
            Category::ZipCode => "zip_code",
            Category::Country => "country",
            Category::Company => "company",
            Category::JobTitle => "job_title",
            Category::Date => "date",
            Category::VehicleYear => "vehicle_year",
            Category::VehicleMake => "vehicle_make",
            Category::VehicleModel => "vehicle_model",
            Category::Vin => "vin",
            Category::LicensePlate => "license_plate",
            Category::CurrencyAmount => "currency_amount",
            Category::Boolean => "boolean",
            Category::Text => "text",
        }
    }

    /// Comma-separated label list for embedding in the classification prompt.
    pub fn prompt_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolve a raw model response to a category.
    ///
    /// Normalizes (trim, lowercase, spaces and hyphens to underscores) and
    /// looks the result up in the vocabulary. Anything that does not match a
    /// known label resolves to [`Category::Text`].
    pub fn from_response(raw: &str) -> Category {
        let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == normalized)
            .unwrap_or(Category::Text)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_labels_resolve() {
        assert_eq!(Category::from_response("email"), Category::Email);
        assert_eq!(Category::from_response("vin"), Category::Vin);
        assert_eq!(
            Category::from_response("currency_amount"),
            Category::CurrencyAmount
        );
    }

    #[test]
    fn normalization_handles_case_and_separators() {
        assert_eq!(Category::from_response("  First_Name "), Category::FirstName);
        assert_eq!(Category::from_response("ZIP CODE"), Category::ZipCode);
        assert_eq!(Category::from_response("license-plate"), Category::LicensePlate);
    }

    #[test]
    fn garbage_collapses_to_text() {
        assert_eq!(Category::from_response(""), Category::Text);
        assert_eq!(Category::from_response("social_security"), Category::Text);
        assert_eq!(Category::from_response("the category is email"), Category::Text);
    }

    #[test]
    fn every_label_round_trips() {
        for category in Category::ALL {
            assert_eq!(Category::from_response(category.label()), category);
        }
    }

    #[test]
    fn prompt_list_mentions_catch_all() {
        let list = Category::prompt_list();
        assert!(list.starts_with("name, "));
        assert!(list.ends_with(", text"));
    }
}
