use saphyr::Yaml;
use serde_json::{Map, Number, Value};

use crate::result_tree::ResultTree;

#[derive(PartialEq, Debug)]
pub struct Error {
    pub filename: String,
    pub message: String,
}

impl Error {
    pub fn new<S: AsRef<str>, M: AsRef<str>>(filename: S, message: M) -> Self {
        Self {
            filename: filename.as_ref().to_string(),
            message: message.as_ref().to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputFormat {
    Auto,
    Json,
    Yaml,
}

impl InputFormat {
    /// Resolves `Auto` by file extension. YAML also accepts JSON documents.
    pub fn resolve(self, filename: &str) -> Self {
        match self {
            InputFormat::Auto if filename.ends_with(".json") => InputFormat::Json,
            InputFormat::Auto => InputFormat::Yaml,
            other => other,
        }
    }
}

pub fn parse(
    filename: &str,
    mut reader: impl std::io::Read,
    format: InputFormat,
) -> Result<ResultTree<Value>, Error> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|err| Error::new(filename, format!("cannot read: {}", err)))?;

    let value = match format.resolve(filename) {
        InputFormat::Json => serde_json::from_str::<Value>(&input)
            .map_err(|err| Error::new(filename, format!("cannot parse as JSON: {}", err)))?,
        _ => load_yaml(filename, &input)?,
    };

    let tree = serde_json::from_value(value)
        .map_err(|err| Error::new(filename, format!("invalid result tree: {}", err)))?;

    tracing::debug!(filename, "loaded result tree");

    Ok(tree)
}

fn load_yaml(filename: &str, input: &str) -> Result<Value, Error> {
    let mut docs = Yaml::load_from_str(input)
        .map_err(|err| Error::new(filename, format!("cannot parse as YAML: {}", err)))?;

    if docs.len() != 1 {
        return Err(Error::new(
            filename,
            format!("expected exactly one YAML document, found {}", docs.len()),
        ));
    }

    Ok(yaml_to_json(&docs.remove(0)))
}

/// Converts a YAML node to JSON. Values JSON cannot hold, such as `.inf` or
/// non-scalar map keys, become strings so an odd failure reason never rejects
/// the whole input.
fn yaml_to_json(yaml: &Yaml) -> Value {
    match yaml {
        Yaml::Null => Value::Null,
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Integer(n) => Value::Number(Number::from(*n)),
        Yaml::Real(s) => yaml
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(s.clone())),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Array(items) => Value::Array(items.iter().map(yaml_to_json).collect()),
        Yaml::Hash(hash) => Value::Object(
            hash.iter()
                .map(|(key, value)| (map_key(key), yaml_to_json(value)))
                .collect::<Map<_, _>>(),
        ),
        _ => Value::String(format!("{:?}", yaml)),
    }
}

fn map_key(key: &Yaml) -> String {
    match key {
        Yaml::String(s) | Yaml::Real(s) => s.clone(),
        Yaml::Integer(n) => n.to_string(),
        Yaml::Boolean(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        _ => format!("{:?}", key),
    }
}
