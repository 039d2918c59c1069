use crate::value::ValueType;

/// Failure to coerce a setting value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("type incompatible: expected {expected}, found {found}")]
    TypeMismatch { expected: ValueType, found: ValueType },
    #[error("cannot parse {input:?} as {value_type}")]
    Parse { value_type: ValueType, input: String },
}

/// Failure to read, write or update the engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown setting: {0}")]
    UnknownKey(String),
    #[error("invalid value for {key}: {value:?} is not one of the valid choices")]
    InvalidChoice { key: String, value: String },
    #[error("value for {key} out of range: {value} not in {min}..={max}")]
    OutOfRange { key: String, value: i32, min: i32, max: i32 },
    #[error("setting {key}: {source}")]
    Value {
        key: String,
        #[source]
        source: ValueError,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
