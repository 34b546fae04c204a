//! XSD schema document parsing and generation.
//!
//! The database ships one `.xsd` file per table role. Only the subset the
//! table contract uses is understood: a root `xs:element` naming the
//! dataset, a nested `xs:element` naming the record, and a flat sequence
//! of typed leaf `xs:element`s — one per column, `minOccurs="0"` marking
//! nullable columns. Anything beyond that subset is rejected rather than
//! guessed at.

use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::{Error, FieldType, Result, Schema};

/// Load and parse a schema file.
///
/// A missing file is reported as [`Error::MissingSchema`]; the schema is
/// load-bearing and is never inferred for tables that declare one.
pub fn load(path: &Path) -> Result<Schema> {
    if !path.is_file() {
        return Err(Error::MissingSchema { path: path.to_path_buf() });
    }
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Parse a schema document from text.
pub fn parse(xml: &str) -> Result<Schema> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut dataset: Option<String> = None;
    let mut record: Option<String> = None;
    let mut columns: Vec<(String, FieldType, bool)> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.name().as_ref() != b"xs:element" {
                    continue;
                }

                let mut name: Option<String> = None;
                let mut ty: Option<String> = None;
                let mut nullable = false;

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).into_owned();
                    match attr.key.as_ref() {
                        b"name" => name = Some(value),
                        b"type" => ty = Some(value),
                        b"minOccurs" => nullable = value == "0",
                        _ => {}
                    }
                }

                let name = name.ok_or_else(|| {
                    Error::Malformed("xs:element without a name attribute".to_string())
                })?;

                match ty {
                    // Leaf element with a type: one column.
                    Some(ty_name) => {
                        let ty = FieldType::from_xsd_name(&ty_name)
                            .ok_or(Error::UnsupportedType(ty_name))?;
                        columns.push((name, ty, nullable));
                    }
                    // Container element: dataset first, record second.
                    None => {
                        if dataset.is_none() {
                            dataset = Some(name);
                        } else if record.is_none() {
                            record = Some(name);
                        } else {
                            return Err(Error::Malformed(format!(
                                "unexpected nested table element {name}"
                            )));
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::Xml(e.to_string())),
        }
    }

    let dataset =
        dataset.ok_or_else(|| Error::Malformed("no dataset element declared".to_string()))?;
    let record =
        record.ok_or_else(|| Error::Malformed("no record element declared".to_string()))?;
    if columns.is_empty() {
        return Err(Error::Malformed(format!("record {record} declares no columns")));
    }

    let mut schema = Schema::new(dataset, record);
    for (name, ty, nullable) in columns {
        schema.push_column(name, ty, nullable);
    }
    Ok(schema)
}

/// Render a schema as an XSD document string.
pub fn to_string(schema: &Schema) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| Error::Xml(e.to_string()))?;

    let mut root = BytesStart::new("xs:schema");
    root.push_attribute(("id", schema.dataset()));
    root.push_attribute(("xmlns:xs", "http://www.w3.org/2001/XMLSchema"));
    write_start(&mut writer, root)?;

    let mut dataset = BytesStart::new("xs:element");
    dataset.push_attribute(("name", schema.dataset()));
    write_start(&mut writer, dataset)?;
    write_start(&mut writer, BytesStart::new("xs:complexType"))?;

    let mut choice = BytesStart::new("xs:choice");
    choice.push_attribute(("minOccurs", "0"));
    choice.push_attribute(("maxOccurs", "unbounded"));
    write_start(&mut writer, choice)?;

    let mut record = BytesStart::new("xs:element");
    record.push_attribute(("name", schema.record()));
    write_start(&mut writer, record)?;
    write_start(&mut writer, BytesStart::new("xs:complexType"))?;
    write_start(&mut writer, BytesStart::new("xs:sequence"))?;

    for column in schema.columns() {
        let mut elem = BytesStart::new("xs:element");
        elem.push_attribute(("name", column.name.as_str()));
        elem.push_attribute(("type", column.ty.xsd_name()));
        if column.nullable {
            elem.push_attribute(("minOccurs", "0"));
        }
        writer
            .write_event(Event::Empty(elem))
            .map_err(|e| Error::Xml(e.to_string()))?;
    }

    write_end(&mut writer, "xs:sequence")?;
    write_end(&mut writer, "xs:complexType")?;
    write_end(&mut writer, "xs:element")?;
    write_end(&mut writer, "xs:choice")?;
    write_end(&mut writer, "xs:complexType")?;
    write_end(&mut writer, "xs:element")?;
    write_end(&mut writer, "xs:schema")?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
}

fn write_start(writer: &mut Writer<Vec<u8>>, elem: BytesStart<'_>) -> Result<()> {
    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::Xml(e.to_string()))
}

fn write_end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| Error::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnSpec;

    fn sample() -> Schema {
        Schema::from_specs(
            "WCDRecords",
            "WCD",
            &[
                ColumnSpec::required("Num", FieldType::UInt16),
                ColumnSpec::optional("Strength", FieldType::Int16),
                ColumnSpec::required("Name", FieldType::String),
                ColumnSpec::group("HitChance", FieldType::Byte, 2),
            ],
        )
    }

    #[test]
    fn test_xsd_round_trip() {
        let schema = sample();
        let text = to_string(&schema).unwrap();
        let parsed = parse(&text).unwrap();

        assert_eq!(parsed.dataset(), "WCDRecords");
        assert_eq!(parsed.record(), "WCD");
        assert_eq!(parsed.columns(), schema.columns());
    }

    #[test]
    fn test_parse_marks_nullable() {
        let text = to_string(&sample()).unwrap();
        let parsed = parse(&text).unwrap();
        assert!(!parsed.column("Num").unwrap().nullable);
        assert!(parsed.column("Strength").unwrap().nullable);
        assert!(parsed.column("HitChance_0").unwrap().nullable);
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let xml = r#"<?xml version="1.0"?>
<xs:schema id="X" xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="X">
    <xs:complexType><xs:choice minOccurs="0" maxOccurs="unbounded">
      <xs:element name="R">
        <xs:complexType><xs:sequence>
          <xs:element name="When" type="xs:dateTime"/>
        </xs:sequence></xs:complexType>
      </xs:element>
    </xs:choice></xs:complexType>
  </xs:element>
</xs:schema>"#;
        assert!(matches!(parse(xml), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_parse_rejects_empty_record() {
        let xml = r#"<xs:schema id="X" xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="X">
    <xs:complexType><xs:choice minOccurs="0" maxOccurs="unbounded">
      <xs:element name="R">
        <xs:complexType><xs:sequence/></xs:complexType>
      </xs:element>
    </xs:choice></xs:complexType>
  </xs:element>
</xs:schema>"#;
        assert!(matches!(parse(xml), Err(Error::Malformed(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/WCD.xsd")).unwrap_err();
        assert!(matches!(err, Error::MissingSchema { .. }));
    }
}
