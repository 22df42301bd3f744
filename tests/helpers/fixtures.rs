use axum_test::multipart::{MultipartForm, Part};
use lopdf::{dictionary, Document, Object};

/// One-page PDF whose document info carries the given title and fixed
/// author/subject/keywords/producer/creator values
pub fn pdf_with_title(title: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Author" => Object::string_literal("Jane Doe"),
        "Subject" => Object::string_literal("Quarterly results"),
        "Keywords" => Object::string_literal("finance, q3"),
        "Producer" => Object::string_literal("Office Writer"),
        "Creator" => Object::string_literal("Word Processor"),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to save fixture PDF");
    bytes
}

/// Reads a document info value, `None` when the key or dictionary is absent
pub fn info_field(bytes: &[u8], key: &str) -> Option<String> {
    let doc = Document::load_mem(bytes).expect("response is not a PDF");
    let info = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };

    match info.get(key.as_bytes()).ok()? {
        Object::String(value, _) => Some(String::from_utf8_lossy(value).into_owned()),
        _ => None,
    }
}

pub fn pdf_part(bytes: Vec<u8>) -> Part {
    Part::bytes(bytes)
        .file_name("report.pdf")
        .mime_type("application/pdf")
}

/// Form with a PDF attached and the given text fields
pub fn compress_form(pdf: Vec<u8>, fields: &[(&str, &str)]) -> MultipartForm {
    fields
        .iter()
        .fold(MultipartForm::new(), |form, (name, value)| {
            form.add_text(name.to_string(), value.to_string())
        })
        .add_part("pdf", pdf_part(pdf))
}
