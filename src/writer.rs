/*!
 * Export writers for filexport
 *
 * Turns an ordered batch of file records into a single document. Output is
 * a pure function of the records and the format.
 */

use std::io;

use quick_xml::escape::escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::types::{ExportFormat, FileRecord};

/// Render `records` as a single document in the given format
pub fn convert(records: &[FileRecord], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => write_json(records),
        ExportFormat::Xml => Ok(write_xml(records)?),
        ExportFormat::Markdown => Ok(write_markdown(records)),
    }
}

/// Pretty-printed array of `{ "name", "content" }` objects
fn write_json(records: &[FileRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// `<files>` element holding one `<file name="...">` per record
fn write_xml(records: &[FileRecord]) -> io::Result<String> {
    let mut xml_writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    xml_writer.write_event(Event::Start(BytesStart::new("files")))?;

    for record in records {
        let mut start_tag = BytesStart::new("file");
        // Attribute values go through the full five-entity escape
        start_tag.push_attribute(("name", record.name()));
        xml_writer.write_event(Event::Start(start_tag))?;

        // BytesText::new only escapes `&<>`; quotes must be escaped too
        let content = escape(record.content());
        xml_writer.write_event(Event::Text(BytesText::from_escaped(content)))?;

        xml_writer.write_event(Event::End(BytesEnd::new("file")))?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("files")))?;

    String::from_utf8(xml_writer.into_inner())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// A heading and fenced block per record, trailing whitespace trimmed
fn write_markdown(records: &[FileRecord]) -> String {
    let mut output = String::new();

    for record in records {
        output.push_str("## ");
        output.push_str(record.name());
        output.push_str("\n```\n");
        output.push_str(record.content());
        output.push_str("\n```\n\n");
    }

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use quick_xml::escape::unescape;
    use quick_xml::Reader;

    fn sample_records() -> Vec<FileRecord> {
        vec![
            FileRecord::new("main.rs", "fn main() {\n    println!(\"hi\");\n}\n"),
            FileRecord::new("notes.txt", "first\nsecond"),
            FileRecord::new("notes.txt", "duplicate names are kept"),
        ]
    }

    #[test]
    fn test_json_round_trip_preserves_order_and_values() {
        let records = sample_records();
        let output = convert(&records, ExportFormat::Json).unwrap();

        let parsed: Vec<FileRecord> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_json_uses_two_space_indent() {
        let records = vec![FileRecord::new("a.txt", "hi")];
        let output = convert(&records, ExportFormat::Json).unwrap();

        assert_eq!(
            output,
            "[\n  {\n    \"name\": \"a.txt\",\n    \"content\": \"hi\"\n  }\n]"
        );
    }

    #[test]
    fn test_empty_batches() {
        assert_eq!(convert(&[], ExportFormat::Json).unwrap(), "[]");
        assert_eq!(convert(&[], ExportFormat::Xml).unwrap(), "<files>\n</files>");
        assert_eq!(convert(&[], ExportFormat::Markdown).unwrap(), "");
    }

    #[test]
    fn test_xml_layout() {
        let records = vec![FileRecord::new("a.txt", "hi"), FileRecord::new("b.txt", "")];
        let output = convert(&records, ExportFormat::Xml).unwrap();

        assert_eq!(
            output,
            "<files>\n  <file name=\"a.txt\">hi</file>\n  <file name=\"b.txt\"></file>\n</files>"
        );
    }

    #[test]
    fn test_xml_escapes_all_reserved_characters() {
        let content = r#"if a < b && c > d { say("it's") }"#;
        let records = vec![FileRecord::new("x.rs", content)];
        let output = convert(&records, ExportFormat::Xml).unwrap();

        let body_start = output.find("\">").unwrap() + 2;
        let body_end = output.find("</file>").unwrap();
        let body = &output[body_start..body_end];

        for reserved in ['<', '>', '"', '\''] {
            assert!(!body.contains(reserved), "raw {:?} in {}", reserved, body);
        }
        assert!(!body.contains("&&"));
        assert_eq!(unescape(body).unwrap(), content);
    }

    #[test]
    fn test_xml_ampersand_is_not_double_escaped() {
        let records = vec![FileRecord::new("a.txt", "&lt; is already an entity")];
        let output = convert(&records, ExportFormat::Xml).unwrap();

        assert!(output.contains("&amp;lt; is already an entity"));
        assert!(!output.contains("&amp;amp;"));
    }

    #[test]
    fn test_xml_escapes_name_attribute() {
        let records = vec![FileRecord::new("a\"b<&>.txt", "x")];
        let output = convert(&records, ExportFormat::Xml).unwrap();

        assert!(output.contains("name=\"a&quot;b&lt;&amp;&gt;.txt\""));
    }

    #[test]
    fn test_xml_parses_back() {
        let records = sample_records();
        let output = convert(&records, ExportFormat::Xml).unwrap();

        let mut reader = Reader::from_str(&output);
        let mut names = Vec::new();
        let mut contents: Vec<String> = Vec::new();
        let mut in_file = false;

        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"file" => {
                    let attr = e.try_get_attribute("name").unwrap().unwrap();
                    names.push(attr.unescape_value().unwrap().to_string());
                    contents.push(String::new());
                    in_file = true;
                }
                Event::End(e) if e.name().as_ref() == b"file" => in_file = false,
                Event::Text(t) if in_file => {
                    if let Some(current) = contents.last_mut() {
                        current.push_str(&t.unescape().unwrap());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        assert_eq!(names, vec!["main.rs", "notes.txt", "notes.txt"]);
        assert_eq!(contents[0], records[0].content());
        assert_eq!(contents[1], records[1].content());
        assert_eq!(contents[2], records[2].content());
    }

    #[test]
    fn test_markdown_single_record() {
        let records = vec![FileRecord::new("a.txt", "hi")];
        let output = convert(&records, ExportFormat::Markdown).unwrap();

        assert_eq!(output, "## a.txt\n```\nhi\n```");
    }

    #[test]
    fn test_markdown_separates_records_with_blank_line() {
        let records = vec![FileRecord::new("a.txt", "one"), FileRecord::new("b.txt", "two")];
        let output = convert(&records, ExportFormat::Markdown).unwrap();

        assert_eq!(output, "## a.txt\n```\none\n```\n\n## b.txt\n```\ntwo\n```");
    }

    #[test]
    fn test_markdown_keeps_content_verbatim() {
        let content = "line with ``` fence\n<tag> & \"quotes\"";
        let records = vec![FileRecord::new("raw.md", content)];
        let output = convert(&records, ExportFormat::Markdown).unwrap();

        assert!(output.contains(content));
    }

    #[test]
    fn test_output_is_deterministic() {
        let records = sample_records();
        for format in [ExportFormat::Json, ExportFormat::Xml, ExportFormat::Markdown] {
            assert_eq!(
                convert(&records, format).unwrap(),
                convert(&records, format).unwrap()
            );
        }
    }
}
