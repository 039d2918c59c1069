//! GConf schema export through the XML writer.

use chewing_core::{write_schemas, XmlTagType, XmlWriter, SETTINGS};

fn export() -> String {
    let mut writer = XmlWriter::new(Vec::new());
    write_schemas(&mut writer, SETTINGS).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn test_export_is_balanced() {
    let out = export();
    assert!(out.starts_with("<gconfschemafile>\n    <schemalist>\n"));
    assert!(out.ends_with("    </schemalist>\n</gconfschemafile>\n"));
    assert_eq!(out.matches("<schema>").count(), SETTINGS.len());
    assert_eq!(out.matches("<locale name=\"C\">").count(), SETTINGS.len());
}

#[test]
fn test_export_lists_every_key() {
    let out = export();
    for spec in SETTINGS {
        let key = format!("<key>/schemas/desktop/ibus/engine/Chewing/{}</key>", spec.key);
        assert!(out.contains(&key), "missing {}", spec.key);
    }
}

#[test]
fn test_int_and_string_defaults() {
    let out = export();
    assert!(out.contains("<type>int</type>\n            <default>10</default>"));
    assert!(out.contains("<type>string</type>\n            <default>1234567890</default>"));
}

#[test]
fn test_long_description_is_indented() {
    let out = export();
    let long = "                <long>\n                    Easy symbol input.\n                </long>\n";
    assert!(out.contains(long), "{}", out);
}

#[test]
fn test_writer_mixes_tag_types() {
    let mut writer = XmlWriter::new(Vec::new());
    writer.begin("a").unwrap();
    writer.write_tags("b", XmlTagType::Empty, Some("x=\"1\""), None).unwrap();
    writer.write_tags("", XmlTagType::NoTag, None, Some("text")).unwrap();
    writer.end("a").unwrap();
    let out = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(out, "<a>\n    <b x=\"1\"/>\n            text\n\n</a>\n");
}
