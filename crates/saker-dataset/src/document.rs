//! Whole-document XML read/write for row sets.
//!
//! A table document is structured text with one repeating element per
//! record and one child element per present column:
//!
//! ```xml
//! <WCDRecords>
//!   <WCD>
//!     <Num>0</Num>
//!     <Name>AIM-9</Name>
//!   </WCD>
//! </WCDRecords>
//! ```
//!
//! [`read`] parses against an explicit schema; [`read_inferred`]
//! discovers a de-facto schema from the document's own structure, for
//! the legacy tables that ship without a schema file.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use saker_schema::{FieldType, Schema};

use crate::{Error, Result, Row, RowSet, Value};

/// Parse a table document against a schema.
///
/// Every row is validated on insert; a single malformed row fails the
/// whole document rather than producing a partial row set.
pub fn read(xml: &str, schema: &Schema) -> Result<RowSet> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut set = RowSet::new(schema.clone());
    let mut in_root = false;
    let mut row: Option<Row> = None;
    let mut column: Option<(String, FieldType)> = None;
    let mut text = String::new();
    let mut seen_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if !in_root {
                    expect(schema.dataset(), &name)?;
                    in_root = true;
                    seen_root = true;
                } else if row.is_none() {
                    expect(schema.record(), &name)?;
                    row = Some(Row::new());
                } else if column.is_none() {
                    let col = schema.column(&name).ok_or(Error::UnknownColumn {
                        column: name.clone(),
                    })?;
                    column = Some((name, col.ty));
                    text.clear();
                } else {
                    return Err(Error::UnexpectedElement {
                        expected: "column text".to_string(),
                        found: name,
                    });
                }
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if !in_root {
                    // An empty root element is a well-formed empty table.
                    expect(schema.dataset(), &name)?;
                    seen_root = true;
                } else if row.is_none() {
                    expect(schema.record(), &name)?;
                    set.insert(Row::new())?;
                } else {
                    let col = schema.column(&name).ok_or(Error::UnknownColumn {
                        column: name.clone(),
                    })?;
                    let value = Value::parse(&name, "", col.ty)?;
                    row.as_mut().unwrap().set(name, value);
                }
            }
            Ok(Event::Text(e)) => {
                if column.is_some() {
                    let t = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    text.push_str(&t);
                }
            }
            Ok(Event::End(_)) => {
                if let Some((name, ty)) = column.take() {
                    let value = Value::parse(&name, &text, ty)?;
                    row.as_mut().unwrap().set(name, value);
                } else if let Some(finished) = row.take() {
                    set.insert(finished)?;
                } else {
                    in_root = false;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::Xml(e.to_string())),
        }
    }

    if !seen_root {
        return Err(Error::UnexpectedElement {
            expected: schema.dataset().to_string(),
            found: "end of document".to_string(),
        });
    }
    Ok(set)
}

/// Parse a table document with no external schema, discovering the
/// schema from the document's own structure.
///
/// The root element names the dataset, the first record element names
/// the record, and the column list is the union of child elements in
/// order of first appearance. Every discovered column is nullable;
/// column types are guessed from the lexical shape of the values
/// (integer, then float, then text). Downstream field access must
/// tolerate whatever this discovery produced — the row getters' numeric
/// narrowing covers the gap.
pub fn read_inferred(xml: &str) -> Result<RowSet> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut dataset: Option<String> = None;
    let mut record: Option<String> = None;
    let mut raw_rows: Vec<Vec<(String, String)>> = Vec::new();
    let mut current: Option<Vec<(String, String)>> = None;
    let mut column: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if dataset.is_none() {
                    dataset = Some(name);
                } else if current.is_none() {
                    match &record {
                        Some(r) if *r != name => {
                            return Err(Error::UnexpectedElement {
                                expected: r.clone(),
                                found: name,
                            });
                        }
                        _ => record = Some(name),
                    }
                    current = Some(Vec::new());
                } else if column.is_none() {
                    column = Some(name);
                    text.clear();
                } else {
                    return Err(Error::UnexpectedElement {
                        expected: "column text".to_string(),
                        found: name,
                    });
                }
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if dataset.is_none() {
                    // Empty root: an empty legacy table.
                    dataset = Some(name);
                } else if current.is_none() {
                    match &record {
                        Some(r) if *r != name => {
                            return Err(Error::UnexpectedElement {
                                expected: r.clone(),
                                found: name,
                            });
                        }
                        _ => record = Some(name),
                    }
                    raw_rows.push(Vec::new());
                } else if column.is_none() {
                    current.as_mut().unwrap().push((name, String::new()));
                } else {
                    return Err(Error::UnexpectedElement {
                        expected: "column text".to_string(),
                        found: name,
                    });
                }
            }
            Ok(Event::Text(e)) => {
                if column.is_some() {
                    let t = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    text.push_str(&t);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(name) = column.take() {
                    current.as_mut().unwrap().push((name, std::mem::take(&mut text)));
                } else if let Some(finished) = current.take() {
                    raw_rows.push(finished);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::Xml(e.to_string())),
        }
    }

    let dataset = dataset.ok_or_else(|| Error::UnexpectedElement {
        expected: "root element".to_string(),
        found: "end of document".to_string(),
    })?;
    let record = record.unwrap_or_else(|| dataset.clone());

    // Column order: first appearance across all rows.
    let mut order: Vec<String> = Vec::new();
    for raw in &raw_rows {
        for (name, _) in raw {
            if !order.contains(name) {
                order.push(name.clone());
            }
        }
    }

    let mut schema = Schema::new(dataset, record);
    for name in &order {
        let ty = infer_type(raw_rows.iter().flatten().filter(|(n, _)| n == name).map(|(_, v)| v.as_str()));
        schema.push_column(name.clone(), ty, true);
    }

    let mut set = RowSet::new(schema);
    for raw in raw_rows {
        let mut row = Row::new();
        for (name, value) in raw {
            let ty = set.schema().column(&name).map(|c| c.ty).unwrap_or(FieldType::String);
            row.set(name.clone(), Value::parse(&name, &value, ty)?);
        }
        set.insert(row)?;
    }
    Ok(set)
}

/// Guess a column type from its lexical values.
fn infer_type<'a>(values: impl Iterator<Item = &'a str>) -> FieldType {
    let mut ty = FieldType::Int32;
    for v in values {
        let t = v.trim();
        if ty == FieldType::Int32 && t.parse::<i32>().is_ok() {
            continue;
        }
        if t.parse::<f64>().is_ok() {
            ty = FieldType::Float;
            continue;
        }
        return FieldType::String;
    }
    ty
}

/// Serialize a row set as a complete table document.
///
/// Columns are emitted in schema order; absent columns are omitted
/// entirely (sparse encoding for packed groups).
pub fn write(set: &RowSet) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let schema = set.schema();

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| Error::Xml(e.to_string()))?;

    write_start(&mut writer, schema.dataset())?;
    for row in set.rows() {
        write_start(&mut writer, schema.record())?;
        for col in schema.columns() {
            if let Some(value) = row.get(&col.name) {
                write_start(&mut writer, &col.name)?;
                writer
                    .write_event(Event::Text(BytesText::new(&value.render())))
                    .map_err(|e| Error::Xml(e.to_string()))?;
                write_end(&mut writer, &col.name)?;
            }
        }
        write_end(&mut writer, schema.record())?;
    }
    write_end(&mut writer, schema.dataset())?;

    Ok(writer.into_inner())
}

fn write_start(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| Error::Xml(e.to_string()))
}

fn write_end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| Error::Xml(e.to_string()))
}

fn expect(expected: &str, found: &str) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::UnexpectedElement {
            expected: expected.to_string(),
            found: found.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saker_schema::ColumnSpec;

    fn schema() -> Schema {
        Schema::from_specs(
            "WCDRecords",
            "WCD",
            &[
                ColumnSpec::required("Num", FieldType::UInt16),
                ColumnSpec::required("Name", FieldType::String),
                ColumnSpec::optional("Strength", FieldType::Int16),
                ColumnSpec::group("HitChance", FieldType::Byte, 4),
            ],
        )
    }

    #[test]
    fn test_read_basic_document() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<WCDRecords>
  <WCD>
    <Num>0</Num>
    <Name>AIM-9</Name>
    <Strength>500</Strength>
    <HitChance_2>80</HitChance_2>
  </WCD>
</WCDRecords>"#;
        let set = read(xml, &schema()).unwrap();
        assert_eq!(set.len(), 1);
        let row = &set.rows()[0];
        assert_eq!(row.get_str("Name").unwrap(), "AIM-9");
        assert_eq!(row.get_i16("Strength").unwrap(), 500);
        assert_eq!(row.get("HitChance_0"), None);
        assert_eq!(row.get_u8("HitChance_2").unwrap(), 80);
    }

    #[test]
    fn test_read_rejects_unknown_column() {
        let xml = "<WCDRecords><WCD><Num>0</Num><Name>x</Name><Bogus>1</Bogus></WCD></WCDRecords>";
        assert!(matches!(
            read(xml, &schema()),
            Err(Error::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_read_rejects_wrong_root() {
        let xml = "<UCDRecords/>";
        assert!(matches!(
            read(xml, &schema()),
            Err(Error::UnexpectedElement { .. })
        ));
    }

    #[test]
    fn test_read_empty_root() {
        let set = read("<WCDRecords/>", &schema()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_write_read_round_trip() {
        let mut set = RowSet::new(schema());
        let mut row = Row::new();
        row.set("Num", Value::UInt16(0));
        row.set("Name", Value::text("AIM-9"));
        row.set("Strength", Value::Int16(500));
        row.set("HitChance_1", Value::Byte(55));
        set.insert(row).unwrap();

        let bytes = write(&set).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let reread = read(&text, &schema()).unwrap();

        assert_eq!(reread.len(), 1);
        let row = &reread.rows()[0];
        assert_eq!(row.get_str("Name").unwrap(), "AIM-9");
        assert_eq!(row.get_u8("HitChance_1").unwrap(), 55);
        assert_eq!(row.get("HitChance_0"), None);

        // A second save must be byte-identical.
        let again = write(&reread).unwrap();
        assert_eq!(text.as_bytes(), again.as_slice());
    }

    #[test]
    fn test_read_inferred_document() {
        let xml = r#"<CTRecords>
  <CT>
    <Num>0</Num>
    <Domain>4</Domain>
    <Ratio>1.5</Ratio>
    <Label>hq</Label>
  </CT>
  <CT>
    <Num>1</Num>
    <Domain>2</Domain>
    <Ratio>2</Ratio>
    <Label>depot</Label>
  </CT>
</CTRecords>"#;
        let set = read_inferred(xml).unwrap();
        assert_eq!(set.schema().dataset(), "CTRecords");
        assert_eq!(set.schema().record(), "CT");
        assert_eq!(set.len(), 2);
        assert_eq!(set.schema().column("Num").unwrap().ty, FieldType::Int32);
        assert_eq!(set.schema().column("Ratio").unwrap().ty, FieldType::Float);
        assert_eq!(set.schema().column("Label").unwrap().ty, FieldType::String);
        // Narrowing getters tolerate the discovered types.
        assert_eq!(set.rows()[0].get_u8("Domain").unwrap(), 4);
    }

    #[test]
    fn test_read_inferred_rejects_mixed_records() {
        let xml = "<Root><A><X>1</X></A><B><X>2</X></B></Root>";
        assert!(read_inferred(xml).is_err());
    }
}
