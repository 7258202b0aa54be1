//! Integration tests for the traveler parts pipeline

use std::fs;

use traveler_parts::files::{job_from_report, move_into};
use traveler_parts::{compress, page_texts_mem, summarize_pdf, summarize_pdf_mem};

// Helper to build a traveler-style PDF in memory; each page gets one text
// line per entry, so extracted text keeps the line structure.
fn traveler_pdf(pages: &[&[&str]]) -> Vec<u8> {
    use lopdf::{dictionary, Object, Stream};

    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for lines in pages {
        let mut content = String::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 720 - 20 * i as i32;
            content.push_str(&format!("BT /F1 12 Tf 72 {} Td ({}) Tj ET\n", y, line));
        }
        let stream = Stream::new(dictionary! {}, content.into_bytes());
        let content_id = doc.add_object(stream);

        let resources = dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        };

        let page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => resources,
        };
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(pages.len() as i64),
    };
    let pages_id = doc.add_object(pages_dict);

    for &pid in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(pid) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

// ============================================================================
// Page Text Extraction Tests
// ============================================================================

#[test]
fn test_page_texts_in_page_order() {
    let buf = traveler_pdf(&[
        &["Job: 500", "Part: P1"],
        &["Part: P1"],
        &["Part: P2"],
    ]);

    let texts = page_texts_mem(&buf).unwrap();
    assert_eq!(texts.len(), 3);
    assert!(texts[0].contains("Job: 500"));
    assert!(texts[1].contains("Part: P1"));
    assert!(texts[2].contains("Part: P2"));
}

#[test]
fn test_page_texts_keeps_lines_separate() {
    let buf = traveler_pdf(&[&["Asm: A1", "Part: P1"]]);

    let texts = page_texts_mem(&buf).unwrap();
    assert_eq!(texts.len(), 1);
    // Each drawn line must land on its own extracted line, or the
    // end-of-line capture would swallow the next label.
    let asm_line = texts[0]
        .lines()
        .find(|line| line.contains("Asm: A1"))
        .unwrap();
    assert!(!asm_line.contains("Part"));
}

// ============================================================================
// Summarize Tests
// ============================================================================

#[test]
fn test_summarize_end_to_end() {
    let buf = traveler_pdf(&[
        &["Job: 500", "Asm: A1", "Part: P1"],
        &["Part: P1", "Asm: A1"],
        &["Part: P2", "Asm: A1"],
    ]);

    let report = summarize_pdf_mem(&buf).unwrap();
    assert_eq!(report.job, Some("500".to_string()));
    assert_eq!(report.records.len(), 2);
    assert_eq!(
        report.render(),
        "Job: 500\nPage 1-2  Asm: A1  Part: P1\nPage 3  Asm: A1  Part: P2\n"
    );
}

#[test]
fn test_summarize_from_file_matches_mem() {
    let buf = traveler_pdf(&[&["Job: 7", "Asm: T", "Part: X"], &["Part: X", "Asm: T"]]);

    let file = tempfile::NamedTempFile::new().unwrap();
    fs::write(file.path(), &buf).unwrap();

    let from_file = summarize_pdf(file.path()).unwrap();
    let from_mem = summarize_pdf_mem(&buf).unwrap();
    assert_eq!(from_file, from_mem);
    assert_eq!(from_file.render(), "Job: 7\nPage 1-2  Asm: T  Part: X\n");
}

#[test]
fn test_summarize_skips_pages_without_part() {
    let buf = traveler_pdf(&[
        &["Job: 77", "Part: P1"],
        &["shop copy, no labels"],
        &["Part: P1"],
    ]);

    let report = summarize_pdf_mem(&buf).unwrap();
    assert_eq!(report.render(), "Job: 77\nPage 1-3  Asm:   Part: P1\n");
}

#[test]
fn test_summarize_no_part_values() {
    let buf = traveler_pdf(&[&["cover sheet"], &["notes page"]]);

    let report = summarize_pdf_mem(&buf).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.job, None);
    assert_eq!(report.render(), "");
}

#[test]
fn test_summarize_label_case_and_spacing() {
    let buf = traveler_pdf(&[&["part : p9", "ASM:top"]]);

    let report = summarize_pdf_mem(&buf).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].part, "p9");
    assert_eq!(report.records[0].asm, "top");
}

#[test]
fn test_summarize_part_list_truncated() {
    let buf = traveler_pdf(&[&["Part: A123/B456", "Asm: A1"]]);

    let report = summarize_pdf_mem(&buf).unwrap();
    assert_eq!(report.records[0].part, "A123");
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_summarize_nonexistent_file() {
    let result = summarize_pdf("/nonexistent/traveler.pdf");
    assert!(result.is_err());
}

#[test]
fn test_summarize_mem_rejects_garbage() {
    let result = summarize_pdf_mem(b"this is not a pdf");
    assert!(result.is_err());
}

// ============================================================================
// Report / Filing Workflow Tests
// ============================================================================

#[test]
fn test_report_job_roundtrip() {
    // The organize step reads the job back out of the written report.
    let report = compress(["Job: 4417\nAsm: A1\nPart: P1", "Part: P1\nAsm: A1"]);

    let dir = tempfile::TempDir::new().unwrap();
    let report_path = dir.path().join("parts.txt");
    fs::write(&report_path, report.render()).unwrap();

    assert_eq!(job_from_report(&report_path), Some("4417".to_string()));
}

#[test]
fn test_processed_pdf_filed_into_job_folder() {
    let dir = tempfile::TempDir::new().unwrap();
    let pdf_path = dir.path().join("traveler.pdf");
    fs::write(&pdf_path, traveler_pdf(&[&["Job: 9", "Part: P1"]])).unwrap();

    let dest = dir.path().join("History").join("Job - 9");
    let moved_to = move_into(&pdf_path, &dest).unwrap();

    assert!(moved_to.exists());
    assert!(!pdf_path.exists());
    assert!(summarize_pdf(&moved_to).unwrap().render().contains("Part: P1"));
}
