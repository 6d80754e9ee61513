//! Emitter boundary.
//!
//! Concrete source formatting and file placement live outside this crate.
//! An [`Emitter`] receives the finished [`GeneratedTypes`] of a run;
//! [`JsonEmitter`] writes them as JSON.

use crate::artifacts::GeneratedTypes;
use crate::error::Result;
use std::io::Write;

/// Consumer of a finished generation run.
pub trait Emitter {
    /// Emits every generated type.
    ///
    /// # Errors
    /// Returns `CodegenError` if the output cannot be written.
    fn emit(&mut self, types: &GeneratedTypes) -> Result<()>;
}

/// Writes generated types as JSON.
pub struct JsonEmitter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonEmitter<W> {
    /// Creates an emitter writing compact JSON to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Enables or disables pretty printing.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Consumes the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Emitter for JsonEmitter<W> {
    fn emit(&mut self, types: &GeneratedTypes) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, types).map_err(std::io::Error::from)?;
        } else {
            serde_json::to_writer(&mut self.writer, types).map_err(std::io::Error::from)?;
        }
        self.writer.flush()?;
        tracing::debug!(types = types.len(), "emitted generated types as JSON");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use crate::settings::GeneratorSettings;
    use ironmodel_schema::{HintDictionary, parse_schema};
    use std::io::{Read, Seek, SeekFrom};

    fn generated() -> GeneratedTypes {
        let schema = parse_schema(
            r#"{ "type": "object", "properties": { "count": { "type": "integer" } } }"#,
        )
        .expect("Failed to parse schema");
        let hints = HintDictionary::new();
        let settings = GeneratorSettings::default();
        Generator::new(&schema, &hints, &settings)
            .generate()
            .expect("Failed to generate")
    }

    #[test]
    fn test_emit_to_buffer() {
        let mut emitter = JsonEmitter::new(Vec::new());
        emitter.emit(&generated()).expect("Failed to emit");
        let json: serde_json::Value =
            serde_json::from_slice(&emitter.into_inner()).expect("Failed to read output");

        let root = &json["types"]["Root"];
        assert_eq!(root["kind"], "record");
        assert_eq!(root["name"], "Root");
        assert_eq!(root["properties"][0]["serializedName"], "count");
    }

    #[test]
    fn test_emit_to_file() {
        let file = tempfile::tempfile().expect("Failed to create temp file");
        let mut emitter = JsonEmitter::new(file).pretty(true);
        emitter.emit(&generated()).expect("Failed to emit");

        let mut file = emitter.into_inner();
        file.seek(SeekFrom::Start(0)).expect("Failed to seek");
        let mut contents = String::new();
        file.read_to_string(&mut contents).expect("Failed to read file");
        assert!(contents.contains('\n'));
        assert!(contents.contains("\"Root\""));
    }
}
