//! JSON description of an option table for the `optcall` binary.

use crate::option::Opt;
use crate::registry::OptionSet;
use crate::value::Destination;
use serde::Deserialize;
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Default prefix for exported shell variables.
pub const DEFAULT_PREFIX: &str = "OPT_";

/// Errors that can occur during config parsing and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse JSON config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("duplicate option name: {0}")]
    DuplicateName(String),

    #[error("option name must not be empty")]
    EmptyName,

    #[error("invalid short option {0:?}: must not be '-' or whitespace")]
    InvalidShortOption(char),

    #[error("invalid option table: {0}")]
    Registration(#[from] crate::Error),
}

/// The type of value an option takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// No value; the option is either present or not
    #[default]
    Flag,
    /// Boolean, accepting yes/no as well as true/false
    Bool,
    /// Any string value
    String,
    /// Signed 32-bit integer
    Int32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer, with 0x/0o/0b prefixes
    Uint64,
    /// IPv4 or IPv6 address
    Ip,
}

impl ValueType {
    /// Empty storage for a value of this type.
    pub fn slot(self) -> Slot {
        match self {
            ValueType::Flag => Slot::Flag,
            ValueType::Bool => Slot::Bool(false),
            ValueType::String => Slot::Str(String::new()),
            ValueType::Int32 => Slot::Int32(0),
            ValueType::Int64 => Slot::Int64(0),
            ValueType::Uint64 => Slot::Uint64(0),
            ValueType::Ip => Slot::Ip(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
        }
    }
}

/// Storage for the converted value of one configured option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Flag,
    Bool(bool),
    Str(String),
    Int32(i32),
    Int64(i64),
    Uint64(u64),
    Ip(IpAddr),
}

impl Slot {
    /// The destination to hand to an [`Opt`], or `None` for flags.
    pub fn destination(&mut self) -> Option<Destination<'_>> {
        match self {
            Slot::Flag => None,
            Slot::Bool(v) => Some(v.into()),
            Slot::Str(v) => Some(v.into()),
            Slot::Int32(v) => Some(v.into()),
            Slot::Int64(v) => Some(v.into()),
            Slot::Uint64(v) => Some(v.into()),
            Slot::Ip(v) => Some(Destination::text(v)),
        }
    }

    /// Text form of the stored value. Flags render as `true`.
    pub fn render(&self) -> String {
        match self {
            Slot::Flag => "true".to_string(),
            Slot::Bool(v) => v.to_string(),
            Slot::Str(v) => v.clone(),
            Slot::Int32(v) => v.to_string(),
            Slot::Int64(v) => v.to_string(),
            Slot::Uint64(v) => v.to_string(),
            Slot::Ip(v) => v.to_string(),
        }
    }
}

/// Configuration for a single option.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionConfig {
    /// Name of the option (used for the exported variable)
    pub name: String,
    /// Short option character (e.g., 'v' for -v)
    pub short: Option<char>,
    /// Long option name (e.g., "verbose" for --verbose)
    pub long: Option<String>,
    /// The type of value, `flag` if omitted
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
    /// Value name for help output
    pub value_name: Option<String>,
    /// Help text for this option
    pub help: Option<String>,
}

impl OptionConfig {
    /// Build the option, storing its value in `slot`.
    pub fn to_opt<'a>(&self, slot: &'a mut Slot) -> Opt<'a> {
        let mut opt = Opt::new();
        if let Some(ref long) = self.long {
            opt = opt.long(long.clone());
        }
        if let Some(c) = self.short {
            opt = opt.short(c);
        }
        if let Some(ref value_name) = self.value_name {
            opt = opt.value_name(value_name.clone());
        }
        if let Some(ref help) = self.help {
            opt = opt.description(help.clone());
        }
        match slot.destination() {
            Some(dest) => opt.value(dest),
            None => opt,
        }
    }
}

/// Top-level configuration for an option table.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Name of the program the table belongs to
    pub name: Option<String>,
    /// Environment variable prefix (default: "OPT_")
    pub prefix: Option<String>,
    /// The options, in registration order
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

/// Result of parsing arguments against a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parsed {
    /// `(name, value)` for every option that was seen, in config order.
    pub values: Vec<(String, String)>,
    /// Arguments left after option scanning.
    pub residual: Vec<String>,
}

impl Config {
    /// Parse a JSON string into a Config.
    pub fn from_json(json: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Duplicate short or long forms and options with neither are reported
    /// by [`Config::check`], which registers the table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();

        for opt in &self.options {
            if opt.name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !names.insert(&opt.name) {
                return Err(ConfigError::DuplicateName(opt.name.clone()));
            }
            if let Some(short) = opt.short {
                if short == '-' || short.is_whitespace() {
                    return Err(ConfigError::InvalidShortOption(short));
                }
            }
        }

        Ok(())
    }

    /// Validate and register the table without parsing anything.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()?;
        let mut slots = self.slots();
        let mut set = OptionSet::new();
        set.register(self.options.iter().zip(slots.iter_mut()).map(|(o, s)| o.to_opt(s)))?;
        Ok(())
    }

    /// Parse `args` against the table.
    pub fn parse_args<S: AsRef<str>>(&self, args: &[S]) -> Result<Parsed, crate::Error> {
        let mut slots = self.slots();
        let mut set = OptionSet::new();
        set.register(self.options.iter().zip(slots.iter_mut()).map(|(o, s)| o.to_opt(s)))?;

        let residual = set.parse(args)?;
        let seen: Vec<bool> = set.options().map(|o| o.seen()).collect();
        drop(set);

        let values = self
            .options
            .iter()
            .zip(&slots)
            .zip(seen)
            .filter(|(_, seen)| *seen)
            .map(|((opt, slot), _)| (opt.name.clone(), slot.render()))
            .collect();

        Ok(Parsed { values, residual })
    }

    /// Get the effective prefix, using the default if none is set.
    pub fn effective_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    fn slots(&self) -> Vec<Slot> {
        self.options.iter().map(|o| o.value_type.slot()).collect()
    }
}
