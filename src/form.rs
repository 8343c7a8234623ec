//! PDF form reading and writing.
//!
//! Fields are identified purely by the `/T` name on their `/Subtype /Widget`
//! page annotations. The same traversal drives both [`read_fields`] and
//! [`fill_fields`], so the enumerator and the writer can never disagree about
//! which names exist in a document.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use miette::Diagnostic;
use thiserror::Error;

use crate::synthesize::FieldValue;

/// Errors from PDF loading and saving.
#[derive(Debug, Error, Diagnostic)]
pub enum PdfError {
    #[error("failed to load PDF: {path}")]
    #[diagnostic(
        code(formfill::pdf::load),
        help("Check that the path exists and points to a readable, well-formed PDF.")
    )]
    Load {
        path: String,
        #[source]
        source: lopdf::Error,
    },

    #[error("failed to save PDF: {path}")]
    #[diagnostic(
        code(formfill::pdf::save),
        help("Check that the output directory is writable and the disk is not full.")
    )]
    Save {
        path: String,
        #[source]
        source: lopdf::Error,
    },
}

/// A fully-populated name-to-value mapping for one output document.
pub type FieldValues = BTreeMap<String, FieldValue>;

/// Enumerate the fillable field names of a form, in page order, deduplicated.
///
/// An empty result means the document simply has no fillable widgets; callers
/// should treat that as "nothing to do", not as a failure.
pub fn read_fields(path: &Path) -> Result<Vec<String>, PdfError> {
    let doc = load(path)?;
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for id in widget_annotations(&doc) {
        if let Some(name) = widget_field_name(&doc, id) {
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    Ok(names)
}

/// Reload the template fresh from disk and fill it.
///
/// Each output document starts from a clean, unmodified base; nothing is
/// shared across documents, so values can never bleed from one copy into the
/// next. The caller picks the output filename and serializes the result.
pub fn render(template_path: &Path, values: &FieldValues) -> Result<Document, PdfError> {
    let mut doc = load(template_path)?;
    fill_fields(&mut doc, values);
    Ok(doc)
}

/// Patch every widget whose `/T` name is a key in `values`.
///
/// Boolean values set both `/V` and `/AS` to the `Yes` or `Off` name — the
/// stored value and the rendered checkbox appearance must agree. Text values
/// set `/V` to a literal string. Widgets without a matching entry are left
/// untouched. Finally, if the document declares an interactive-form root, it
/// is marked `NeedAppearances` so viewers regenerate field appearances for
/// the programmatically-set values.
pub fn fill_fields(doc: &mut Document, values: &FieldValues) {
    for id in widget_annotations(doc) {
        let Some(name) = widget_field_name(doc, id) else {
            continue;
        };
        let Some(value) = values.get(&name) else {
            continue;
        };
        let Ok(widget) = doc.get_object_mut(id).and_then(Object::as_dict_mut) else {
            continue;
        };
        match value {
            FieldValue::Bool(on) => {
                let state: &[u8] = if *on { b"Yes" } else { b"Off" };
                widget.set("V", Object::Name(state.to_vec()));
                widget.set("AS", Object::Name(state.to_vec()));
            }
            FieldValue::Text(text) => {
                widget.set("V", Object::string_literal(text.as_str()));
            }
        }
    }
    mark_need_appearances(doc);
}

/// Serialize a filled document to its output file, overwriting any existing
/// file of the same name.
pub fn save(doc: &mut Document, path: &Path) -> Result<(), PdfError> {
    doc.save(path).map_err(|source| PdfError::Save {
        path: path.display().to_string(),
        source: lopdf::Error::IO(source),
    })?;
    Ok(())
}

fn load(path: &Path) -> Result<Document, PdfError> {
    Document::load(path).map_err(|source| PdfError::Load {
        path: path.display().to_string(),
        source,
    })
}

/// Collect the object IDs of every `/Subtype /Widget` annotation, page by
/// page. Widget annotations are indirect objects in practice; array entries
/// that are not references are skipped.
fn widget_annotations(doc: &Document) -> Vec<ObjectId> {
    let mut ids = Vec::new();
    for page_id in doc.get_pages().into_values() {
        let Ok(page) = doc.get_dictionary(page_id) else {
            continue;
        };
        let annots = match page.get(b"Annots") {
            Ok(Object::Array(array)) => array.clone(),
            // /Annots itself may be an indirect reference to the array.
            Ok(Object::Reference(id)) => match doc.get_object(*id).and_then(Object::as_array) {
                Ok(array) => array.clone(),
                Err(_) => continue,
            },
            _ => continue,
        };
        for entry in &annots {
            let Ok(id) = entry.as_reference() else {
                continue;
            };
            let is_widget = doc
                .get_dictionary(id)
                .ok()
                .and_then(|dict| dict.get(b"Subtype").ok())
                .is_some_and(|subtype| matches!(subtype, Object::Name(name) if name == b"Widget"));
            if is_widget {
                ids.push(id);
            }
        }
    }
    ids
}

/// The `/T` field name of a widget annotation, if it carries one.
fn widget_field_name(doc: &Document, id: ObjectId) -> Option<String> {
    let dict = doc.get_dictionary(id).ok()?;
    match dict.get(b"T") {
        Ok(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// Set `NeedAppearances true` on the catalog's `/AcroForm` dictionary, if the
/// document has one. The dictionary may be inline or an indirect object.
fn mark_need_appearances(doc: &mut Document) {
    let Some(catalog_id) = doc
        .trailer
        .get(b"Root")
        .ok()
        .and_then(|root| root.as_reference().ok())
    else {
        return;
    };
    let acro_form = doc
        .get_dictionary(catalog_id)
        .ok()
        .and_then(|catalog| catalog.get(b"AcroForm").ok())
        .cloned();
    match acro_form {
        Some(Object::Reference(id)) => {
            if let Ok(form) = doc.get_object_mut(id).and_then(Object::as_dict_mut) {
                form.set("NeedAppearances", true);
            }
        }
        Some(Object::Dictionary(_)) => {
            if let Ok(catalog) = doc.get_dictionary_mut(catalog_id) {
                if let Ok(Object::Dictionary(form)) = catalog.get_mut(b"AcroForm") {
                    form.set("NeedAppearances", true);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// Build a one-page form with a text field `full_name` and a checkbox
    /// `agree`, the minimal AcroForm structure a viewer accepts.
    fn sample_form() -> Document {
        let mut doc = Document::with_version("1.5");
        let text_widget = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::string_literal("full_name"),
            "Rect" => vec![50.into(), 700.into(), 250.into(), 720.into()],
        });
        let check_widget = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Btn",
            "T" => Object::string_literal("agree"),
            "V" => Object::Name(b"Off".to_vec()),
            "AS" => Object::Name(b"Off".to_vec()),
            "Rect" => vec![50.into(), 660.into(), 70.into(), 680.into()],
        });
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => vec![text_widget.into(), check_widget.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let form_id = doc.add_object(dictionary! {
            "Fields" => vec![text_widget.into(), check_widget.into()],
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
            "AcroForm" => form_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn widget_by_name<'a>(doc: &'a Document, name: &str) -> &'a lopdf::Dictionary {
        let id = widget_annotations(doc)
            .into_iter()
            .find(|&id| widget_field_name(doc, id).as_deref() == Some(name))
            .expect("widget present");
        doc.get_dictionary(id).unwrap()
    }

    #[test]
    fn enumerates_fields_in_page_order() {
        let doc = sample_form();
        let names: Vec<String> = widget_annotations(&doc)
            .into_iter()
            .filter_map(|id| widget_field_name(&doc, id))
            .collect();
        assert_eq!(names, vec!["full_name".to_string(), "agree".to_string()]);
    }

    #[test]
    fn fills_text_and_checkbox_together() {
        let mut doc = sample_form();
        let mut values = FieldValues::new();
        values.insert("agree".into(), FieldValue::Bool(true));
        values.insert("full_name".into(), FieldValue::Text("Jane Doe".into()));
        fill_fields(&mut doc, &values);

        let check = widget_by_name(&doc, "agree");
        assert_eq!(check.get(b"V").unwrap(), &Object::Name(b"Yes".to_vec()));
        assert_eq!(check.get(b"AS").unwrap(), &Object::Name(b"Yes".to_vec()));

        let text = widget_by_name(&doc, "full_name");
        assert_eq!(text.get(b"V").unwrap(), &Object::string_literal("Jane Doe"));
    }

    #[test]
    fn false_boolean_sets_off_state() {
        let mut doc = sample_form();
        let mut values = FieldValues::new();
        values.insert("agree".into(), FieldValue::Bool(false));
        fill_fields(&mut doc, &values);

        let check = widget_by_name(&doc, "agree");
        assert_eq!(check.get(b"V").unwrap(), &Object::Name(b"Off".to_vec()));
        assert_eq!(check.get(b"AS").unwrap(), &Object::Name(b"Off".to_vec()));
    }

    #[test]
    fn unmatched_widgets_are_untouched() {
        let mut doc = sample_form();
        let before = widget_by_name(&doc, "full_name").clone();

        let mut values = FieldValues::new();
        values.insert("agree".into(), FieldValue::Bool(true));
        fill_fields(&mut doc, &values);

        assert_eq!(widget_by_name(&doc, "full_name"), &before);
    }

    #[test]
    fn filling_marks_need_appearances() {
        let mut doc = sample_form();
        fill_fields(&mut doc, &FieldValues::new());

        let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        let form_id = doc
            .get_dictionary(catalog_id)
            .unwrap()
            .get(b"AcroForm")
            .unwrap()
            .as_reference()
            .unwrap();
        let form = doc.get_dictionary(form_id).unwrap();
        assert_eq!(form.get(b"NeedAppearances").unwrap(), &Object::Boolean(true));
    }

    #[test]
    fn document_without_acro_form_is_tolerated() {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        // No pages, no widgets, no AcroForm: a plain no-op.
        fill_fields(&mut doc, &FieldValues::new());
        assert!(widget_annotations(&doc).is_empty());
    }

    #[test]
    fn read_and_render_round_trip_through_a_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let template = dir.path().join("form.pdf");
        sample_form().save(&template).unwrap();

        let fields = read_fields(&template).unwrap();
        assert_eq!(fields, vec!["full_name".to_string(), "agree".to_string()]);

        let mut values = FieldValues::new();
        values.insert("full_name".into(), FieldValue::Text("Jane Doe".into()));
        values.insert("agree".into(), FieldValue::Bool(true));
        let mut filled = render(&template, &values).unwrap();

        let out = dir.path().join("filled.pdf");
        save(&mut filled, &out).unwrap();

        let reloaded = Document::load(&out).unwrap();
        let check = widget_by_name(&reloaded, "agree");
        assert_eq!(check.get(b"V").unwrap(), &Object::Name(b"Yes".to_vec()));
    }

    #[test]
    fn loading_a_missing_file_is_an_error() {
        let err = read_fields(Path::new("/nonexistent/form.pdf")).unwrap_err();
        assert!(matches!(err, PdfError::Load { .. }));
    }
}
