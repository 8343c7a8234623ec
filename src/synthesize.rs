//! Value synthesis: generate one plausible value for a classified field.

use std::fmt;

use tracing::warn;

use crate::category::Category;
use crate::llm::TextCompletion;

/// Synthesis wants varied data across repeated calls for the same field.
const SYNTHESIZE_TEMPERATURE: f32 = 0.7;

const SYNTHESIZE_SYSTEM: &str = "You are a data generation engine.";

/// A value destined for a form widget.
///
/// The `boolean` category always yields `Bool`; every other category always
/// yields `Text`, even when the service fails and the text is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(true) => f.write_str("Yes"),
            FieldValue::Bool(false) => f.write_str("Off"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Synthesize one realistic value for a field.
///
/// The prompt embeds the field name, the category, and the category-specific
/// formatting rules (`YYYY-MM-DD` dates, `Yes`/`Off` booleans, bare decimal
/// currency). The response is stripped of surrounding whitespace and quotes
/// and trusted as-is; no numeric or date validation is performed.
///
/// This never fails. On a transport error the fallback is typed per category:
/// `Bool(false)` for `boolean`, an empty `Text` for everything else — a blank
/// value is an acceptable degraded result for a synthetic-data generator, so
/// there is no retry.
pub fn synthesize_value<C: TextCompletion>(
    client: &C,
    field_name: &str,
    category: Category,
) -> FieldValue {
    let prompt = format!(
        "You are an expert at generating realistic sample data for filling out forms.\n\
         Based on the field name \"{field_name}\" and its determined type \"{category}\", \
         generate a single, realistic data value.\n\
         - Your response must be ONLY the data value itself, with no extra text, labels, \
         or quotation marks.\n\
         - For a 'date', use YYYY-MM-DD format.\n\
         - For a 'boolean', respond with either 'Yes' or 'Off'.\n\
         - For a 'currency_amount', provide a number like '12345.00'.\n\
         Generate a value for a field of type: {category}"
    );

    match client.complete(SYNTHESIZE_SYSTEM, &prompt, SYNTHESIZE_TEMPERATURE) {
        Ok(response) => {
            let value = response
                .trim_matches(|c: char| c.is_whitespace() || c == '"')
                .to_string();
            if category == Category::Boolean {
                FieldValue::Bool(value.to_lowercase().contains("yes"))
            } else {
                FieldValue::Text(value)
            }
        }
        Err(e) => {
            warn!(field = field_name, error = %e, "value synthesis failed, using fallback");
            if category == Category::Boolean {
                FieldValue::Bool(false)
            } else {
                FieldValue::Text(String::new())
            }
        }
    }
}
