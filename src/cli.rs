//! Minimal CLI: decode type documents → (necessity | reference | property)
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::Value;

use typeprop::path_de::from_value_with_path;
use typeprop::{Necessity, TypeInformation, TypeName, TypeProperty};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// inspect JSON type documents: property necessity, compact referenced form, single properties
#[derive(Parser, Debug)]
#[command(name = "typeprop", version)]
pub struct CommandLineInterface {
    /// log at debug level (RUST_LOG still wins when set)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// list every object property with its derived necessity
    Necessity(NecessityOut),
    /// emit each reachable object with its properties switched to references
    Reference(ReferenceOut),
    /// decode standalone property documents and describe them
    Property(PropertyOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /components/user)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct NecessityOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// plain output without ANSI colors
    #[arg(long)]
    no_color: bool,
}

#[derive(clap::Parser, Debug)]
struct ReferenceOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct PropertyOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// plain output without ANSI colors
    #[arg(long)]
    no_color: bool,
}

/// One JSON document plus where it came from (`file` or `file:line`).
#[derive(Debug)]
struct Document {
    source: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Reads and parses every input in parallel; order follows the inputs.
    fn load_documents(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        log::info!("loading {} input file(s)", source_paths.len());
        let per_file = source_paths
            .par_iter()
            .map(|path| self.load_file(path))
            .collect::<Result<Vec<_>>>()?;
        Ok(per_file.into_iter().flatten().collect())
    }

    fn load_file(&self, source_path: &Path) -> Result<Vec<Document>> {
        let source_path_str = source_path.to_string_lossy().to_string();
        log::debug!("reading {source_path_str}");
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read source file: {source_path_str}"))?;
        self.parse_source(&source_path_str, &source)
    }

    fn parse_source(&self, source_path_str: &str, source: &str) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        if self.ndjson {
            for (index, line) in source.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let label = format!("{source_path_str}:{}", index + 1);
                let value = serde_json::from_str::<Value>(line)
                    .with_context(|| format!("failed to parse JSON ({label})"))?;
                documents.push(self.select(label, value)?);
            }
        } else {
            let value = serde_json::from_str::<Value>(source)
                .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
            documents.push(self.select(source_path_str.to_string(), value)?);
        }
        Ok(documents)
    }

    fn select(&self, source: String, value: Value) -> Result<Document> {
        let Some(pointer) = self.json_pointer.as_deref() else {
            return Ok(Document { source, value });
        };
        match value.pointer(pointer) {
            Some(selected) => Ok(Document { source, value: selected.clone() }),
            None => Err(anyhow!("JSON pointer {pointer} matched nothing in {source}")),
        }
    }
}

impl Document {
    fn decode<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        let source = self.source;
        from_value_with_path(self.value).with_context(|| format!("failed to decode {source}"))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Necessity(target) => {
                let types = decode_all::<TypeInformation>(&target.input_settings)?;
                let mut stdout = std::io::stdout().lock();
                for ty in &types {
                    for line in necessity_lines(ty, !target.no_color) {
                        writeln!(stdout, "{line}")?;
                    }
                }
            }
            Command::Reference(target) => {
                let types = decode_all::<TypeInformation>(&target.input_settings)?;
                let compact = compact_objects(&types);
                let compact_src = serde_json::to_string_pretty(&compact)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &compact_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    log::info!("wrote {} object(s) to {}", compact.len(), out.display());
                } else {
                    println!("{compact_src}");
                }
            }
            Command::Property(target) => {
                let properties = decode_all::<TypeProperty>(&target.input_settings)?;
                let mut stdout = std::io::stdout().lock();
                for property in &properties {
                    writeln!(stdout, "{}", property_line(None, property, !target.no_color))?;
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn decode_all<T>(input_settings: &InputSettings) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned + Send,
{
    input_settings
        .load_documents()?
        .into_par_iter()
        .map(Document::decode::<T>)
        .collect()
}

/// `<Type>.<property>: <necessity> <type> [annotation]` for every property
/// of every object reachable from `ty`.
fn necessity_lines(ty: &TypeInformation, colorize: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for (name, object) in ty.reachable_objects() {
        for property in object.object_properties() {
            lines.push(property_line(Some(&name), property, colorize));
        }
    }
    lines
}

fn property_line(owner: Option<&TypeName>, property: &TypeProperty, colorize: bool) -> String {
    let necessity = property.necessity();
    let necessity_str = match (colorize, necessity) {
        (false, _) => necessity.to_string(),
        (true, Necessity::Required) => necessity.as_str().green().to_string(),
        (true, Necessity::Optional) => necessity.as_str().yellow().to_string(),
    };
    let mut line = match owner {
        Some(owner) => format!("{}.{}: {necessity_str} {}", owner.as_str(), property.name(), property.ty()),
        None => format!("{}: {necessity_str} {}", property.name(), property.ty()),
    };
    if let Some(annotation) = property.annotation() {
        line.push(' ');
        if colorize {
            line.push_str(&annotation.dimmed().to_string());
        } else {
            line.push_str(annotation);
        }
    }
    line
}

/// Every reachable object body across `types`, once per name, with its
/// properties in referenced form.
fn compact_objects(types: &[TypeInformation]) -> Vec<TypeInformation> {
    let mut seen: IndexMap<TypeName, TypeInformation> = IndexMap::new();
    for ty in types {
        for (name, object) in ty.reachable_objects() {
            seen.entry(name).or_insert_with(|| object.referenced_properties());
        }
    }
    seen.into_values().collect()
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use typeprop::PrimitiveType;

    fn settings(ndjson: bool, json_pointer: Option<&str>) -> InputSettings {
        InputSettings {
            ndjson,
            json_pointer: json_pointer.map(str::to_string),
            input: Vec::new(),
        }
    }

    fn user() -> TypeInformation {
        let address = TypeInformation::object("Address", vec![
            TypeProperty::new("street", TypeInformation::scalar(PrimitiveType::String)),
        ]);
        TypeInformation::object("User", vec![
            TypeProperty::new("age", TypeInformation::scalar(PrimitiveType::Int)),
            TypeProperty::annotated(
                "home",
                TypeInformation::optional(address),
                "@Parent",
            ),
        ])
    }

    #[test]
    fn necessity_lines_walk_nested_objects() {
        let lines = necessity_lines(&user(), false);
        assert_eq!(lines, [
            "User.age: required int",
            "User.home: optional Address? @Parent",
            "Address.street: required string",
        ]);
    }

    #[test]
    fn compact_objects_use_references() {
        let compact = compact_objects(&[user(), user()]);
        assert_eq!(compact.len(), 2);
        assert_eq!(
            compact[0].object_properties()[1].ty(),
            &TypeInformation::optional(TypeInformation::reference("Address")),
        );
        assert_eq!(compact[0].object_properties()[1].annotation(), Some("@Parent"));
    }

    #[test]
    fn ndjson_lines_are_labelled() {
        let src = "{\"a\": 1}\n\n{\"a\": 2}\n";
        let docs = settings(true, None).parse_source("in.ndjson", src).unwrap();
        let labels: Vec<&str> = docs.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(labels, ["in.ndjson:1", "in.ndjson:3"]);
    }

    #[test]
    fn json_pointer_selects_or_fails() {
        let src = json!({"components": {"age": {"name": "age", "type": {"scalar": "int"}}}}).to_string();
        let docs = settings(false, Some("/components/age")).parse_source("doc.json", &src).unwrap();
        let property: TypeProperty = docs.into_iter().next().unwrap().decode().unwrap();
        assert_eq!(property.name(), "age");

        let err = settings(false, Some("/missing")).parse_source("doc.json", &src).unwrap_err();
        assert!(err.to_string().contains("/missing"), "{err}");
    }

    #[test]
    fn decode_errors_name_the_source() {
        let docs = settings(false, None).parse_source("bad.json", r#"{"type": {"scalar": "int"}}"#).unwrap();
        let err = docs.into_iter().next().unwrap().decode::<TypeProperty>().unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("bad.json"), "{chain}");
        assert!(chain.contains("missing field `name`"), "{chain}");
    }

    #[test]
    fn empty_glob_is_an_error() {
        assert!(resolve_file_path_patterns(["/definitely/not/here/*.json"]).is_err());
        let literal = resolve_file_path_patterns(["plain.json"]).unwrap();
        assert_eq!(literal, [PathBuf::from("plain.json")]);
    }

    #[test]
    fn property_line_plain() {
        let p = TypeProperty::annotated(
            "nickname",
            TypeInformation::optional(TypeInformation::scalar(PrimitiveType::String)),
            "@Field",
        );
        assert_eq!(property_line(None, &p, false), "nickname: optional string? @Field");
    }
}
