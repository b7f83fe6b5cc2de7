use super::layout::{layout_pages, PageLayout, PageSettings};
use super::metrics::encode_win_ansi;
use crate::error::SummarizeError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

const FONT_RESOURCE: &str = "F1";

/// Paginates `summary` and serializes it as a PDF with the standard
/// Helvetica font.
pub fn render_pdf(summary: &str, settings: &PageSettings) -> Result<Vec<u8>, SummarizeError> {
    let pages = layout_pages(summary, settings);
    write_pdf(&pages, settings)
}

pub fn write_pdf(pages: &[PageLayout], settings: &PageSettings) -> Result<Vec<u8>, SummarizeError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let page_id = add_page(&mut doc, page, settings, pages_id, resources_id)?;
        kids.push(Object::from(page_id));
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0_i64.into(),
            0_i64.into(),
            number(settings.width),
            number(settings.height),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|error| SummarizeError::render("pdf", error))?;
    Ok(bytes)
}

fn add_page(
    doc: &mut Document,
    page: &PageLayout,
    settings: &PageSettings,
    pages_id: ObjectId,
    resources_id: ObjectId,
) -> Result<ObjectId, SummarizeError> {
    let mut operations = Vec::new();
    for line in page.lines.iter().filter(|line| !line.text.is_empty()) {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), number(settings.font_size)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![number(line.x), number(settings.height - line.y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&line.text))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations }
        .encode()
        .map_err(|error| SummarizeError::render("pdf", error))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Resources" => resources_id,
        "Contents" => content_id,
    }))
}

fn number(value: f64) -> Object {
    if value.fract() == 0.0 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as _)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{extract_text, LopdfExtractor, PdfExtractor};
    use crate::models::Format;

    #[test]
    fn rendered_pdf_is_loadable_with_expected_page_count() {
        let settings = PageSettings::default();
        let bytes = render_pdf("Short summary text.", &settings).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let document = Document::load_mem(&bytes).unwrap();
        assert_eq!(document.get_pages().len(), 1);
    }

    #[test]
    fn trailing_blank_page_is_kept() {
        let settings = PageSettings::default();
        let text = vec!["line"; 38].join("\n");
        let bytes = render_pdf(&text, &settings).unwrap();

        let document = Document::load_mem(&bytes).unwrap();
        assert_eq!(document.get_pages().len(), 2);
    }

    #[test]
    fn rendered_text_can_be_extracted_again() {
        let settings = PageSettings::default();
        let bytes = render_pdf("Hello world from the summary.", &settings).unwrap();

        let pages = LopdfExtractor.extract_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].text.contains("Hello world from the summary."));
    }

    #[test]
    fn every_page_of_a_multi_page_pdf_is_extracted_in_order() {
        let settings = PageSettings::default();
        let text = (1..=40)
            .map(|n| format!("line {n:02}"))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = render_pdf(&text, &settings).unwrap();

        let pages = LopdfExtractor.extract_pages(&bytes).unwrap();
        let numbers: Vec<u32> = pages.iter().map(|page| page.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert!(pages[0].text.contains("line 01"));
        assert!(pages[0].text.contains("line 38"));
        assert!(!pages[0].text.contains("line 39"));
        assert!(pages[1].text.contains("line 39"));
        assert!(pages[1].text.contains("line 40"));

        let joined = extract_text(&bytes, Format::Pdf).unwrap();
        let first = joined.find("line 01").unwrap();
        let last_on_first = joined.find("line 38").unwrap();
        let first_on_second = joined.find("line 39").unwrap();
        assert!(first < last_on_first && last_on_first < first_on_second);
    }

    #[test]
    fn blank_trailing_page_is_still_extracted() {
        let settings = PageSettings::default();
        let text = vec!["filled"; 38].join("\n");
        let bytes = render_pdf(&text, &settings).unwrap();

        let pages = LopdfExtractor.extract_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].number, 2);
        assert!(pages[0].text.contains("filled"));
        assert!(pages[1].text.trim().is_empty());
    }

    #[test]
    fn coordinates_stay_integral_when_possible() {
        assert!(matches!(number(72.0), Object::Integer(72)));
        assert!(matches!(number(10.5), Object::Real(_)));
    }
}
