//! GConf schema export of the settings table.

use std::io::{self, Write};

use crate::settings::SettingSpec;
use crate::value::{SettingValue, ValueType};
use crate::xml::{XmlTagType, XmlWriter};

pub const SCHEMA_DIR: &str = "/schemas/desktop/ibus/engine/Chewing";
pub const APPLY_DIR: &str = "/desktop/ibus/engine/Chewing";
pub const OWNER: &str = "ibus-chewing";

/// Write a complete `<gconfschemafile>` document describing `settings`.
pub fn write_schemas<W: Write>(writer: &mut XmlWriter<W>, settings: &[SettingSpec]) -> io::Result<()> {
    writer.begin("gconfschemafile")?;
    writer.begin("schemalist")?;
    for spec in settings {
        write_schema(writer, spec)?;
    }
    writer.end("schemalist")?;
    writer.end("gconfschemafile")?;
    tracing::debug!(count = settings.len(), "schemas written");
    Ok(())
}

fn write_schema<W: Write>(writer: &mut XmlWriter<W>, spec: &SettingSpec) -> io::Result<()> {
    writer.begin("schema")?;
    writer.short("key", &format!("{}/{}", SCHEMA_DIR, spec.key))?;
    writer.short("applyto", &format!("{}/{}", APPLY_DIR, spec.key))?;
    writer.short("owner", OWNER)?;
    writer.short("type", spec.value_type.name())?;
    writer.short("default", &escape(&gconf_default(spec)))?;
    writer.write_tags("locale", XmlTagType::BeginOnly, Some("name=\"C\""), None)?;
    writer.short("short", &escape(spec.label))?;
    writer.write_tags("long", XmlTagType::Long, None, Some(&escape(spec.description)))?;
    writer.end("locale")?;
    writer.end("schema")
}

/// GConf spells boolean defaults as words.
fn gconf_default(spec: &SettingSpec) -> String {
    let parsed = SettingValue::parse(spec.value_type, spec.default).ok();
    match parsed.and_then(|value| value.as_bool()) {
        Some(on) => on.to_string(),
        None => spec.default.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
