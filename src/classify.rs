//! Field classification: map a field name to a semantic category.

use tracing::warn;

use crate::category::Category;
use crate::llm::TextCompletion;

/// Classification must be deterministic for a given field name.
const CLASSIFY_TEMPERATURE: f32 = 0.0;

const CLASSIFY_SYSTEM: &str = "You are an expert at categorizing PDF form fields.";

/// Classify a field name into one of the fixed semantic categories.
///
/// Asks the service to answer with exactly one label from the vocabulary and
/// resolves the response through [`Category::from_response`]. This never
/// fails: transport errors and out-of-vocabulary answers both collapse to
/// [`Category::Text`], with a single attempt and no retry — the catch-all is
/// always a safe degraded result.
pub fn classify_field<C: TextCompletion>(client: &C, field_name: &str) -> Category {
    let prompt = format!(
        "You are an expert at categorizing PDF form fields into specific data types.\n\
         Based on the field name \"{field_name}\", what is the most specific data type \
         from the following list?\n\
         List: {}\n\
         Respond with only a single category from the list.",
        Category::prompt_list()
    );

    match client.complete(CLASSIFY_SYSTEM, &prompt, CLASSIFY_TEMPERATURE) {
        Ok(response) => Category::from_response(&response),
        Err(e) => {
            warn!(field = field_name, error = %e, "field classification failed, using catch-all");
            Category::Text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;

    /// Fake service that always returns the same canned response.
    struct Canned(&'static str);

    impl TextCompletion for Canned {
        fn complete(&self, _: &str, _: &str, _: f32) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    /// Fake service that always fails.
    struct AlwaysFails;

    impl TextCompletion for AlwaysFails {
        fn complete(&self, _: &str, _: &str, _: f32) -> Result<String, LlmError> {
            Err(LlmError::RequestFailed {
                message: "connection refused".into(),
            })
        }
    }

    #[test]
    fn known_label_is_returned() {
        assert_eq!(classify_field(&Canned("email"), "contact_email"), Category::Email);
    }

    #[test]
    fn response_casing_and_separators_are_normalized() {
        assert_eq!(classify_field(&Canned("  Zip Code\n"), "zip"), Category::ZipCode);
        assert_eq!(classify_field(&Canned("PHONE-NUMBER"), "tel"), Category::PhoneNumber);
    }

    #[test]
    fn garbage_response_falls_back_to_text() {
        assert_eq!(classify_field(&Canned("no idea, sorry"), "x"), Category::Text);
        assert_eq!(classify_field(&Canned(""), "x"), Category::Text);
    }

    #[test]
    fn service_failure_falls_back_to_text_every_time() {
        for _ in 0..3 {
            assert_eq!(classify_field(&AlwaysFails, "first_name"), Category::Text);
        }
    }

    #[test]
    fn classification_always_lands_in_the_vocabulary() {
        for raw in ["email", "Email!", "boolean", "garbage", "first name"] {
            let category = classify_field(&Canned(raw), "f");
            assert!(Category::ALL.contains(&category));
        }
    }
}
