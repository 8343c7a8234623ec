//! # formfill
//!
//! Fills PDF forms with AI-generated synthetic test data.
//!
//! The pipeline is linear: enumerate the fillable widget names of a form
//! (`form`), ask a chat-completion service to pick a semantic category for
//! each name (`classify`), ask it again for a plausible value formatted per
//! category (`synthesize`), then patch the values back into a fresh copy of
//! the template (`form`) and save it. One classify/synthesize round trip per
//! field, one field at a time, one document at a time.
//!
//! ## Library usage
//!
//! ```no_run
//! use formfill::classify::classify_field;
//! use formfill::form;
//! use formfill::llm::{ChatClient, ChatConfig};
//! use formfill::synthesize::synthesize_value;
//! use std::collections::BTreeMap;
//!
//! let client = ChatClient::new(ChatConfig {
//!     api_key: "sk-...".into(),
//!     ..Default::default()
//! });
//! let fields = form::read_fields("form.pdf".as_ref()).unwrap();
//! let mut values = BTreeMap::new();
//! for name in &fields {
//!     let category = classify_field(&client, name);
//!     values.insert(name.clone(), synthesize_value(&client, name, category));
//! }
//! let mut doc = form::render("form.pdf".as_ref(), &values).unwrap();
//! doc.save("filled.pdf").unwrap();
//! ```

pub mod category;
pub mod classify;
pub mod config;
pub mod error;
pub mod form;
pub mod llm;
pub mod synthesize;
