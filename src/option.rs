//! Declaration of a single recognized option.

use crate::error::BoxError;
use crate::value::{Destination, TextValue};

/// Callback run when an option is matched. It receives the raw value text,
/// or an empty string for options without a value.
pub type Handler<'a> = Box<dyn FnMut(&str) -> Result<(), BoxError> + 'a>;

/// A recognized option.
///
/// Build one with the chained setters and hand it to
/// [`OptionSet::register`](crate::OptionSet::register). After a parse, the
/// registered option reports whether it was [`seen`](Opt::seen) and the
/// [`raw_value`](Opt::raw_value) it was given.
///
/// ```
/// use optcall::{Opt, OptionSet};
///
/// let mut level = 0i32;
/// let mut set = OptionSet::new();
/// set.register([
///     Opt::new().short('v').long("verbose"),
///     Opt::new().long("level").value_name("N").value(&mut level),
/// ])
/// .unwrap();
///
/// let rest = set.parse(&["-v", "--level=3", "input.txt"]).unwrap();
/// assert_eq!(rest, vec!["input.txt"]);
/// assert!(set.by_short('v').unwrap().seen());
/// drop(set);
/// assert_eq!(level, 3);
/// ```
#[derive(Default)]
pub struct Opt<'a> {
    pub(crate) long: Option<String>,
    pub(crate) short: Option<char>,
    pub(crate) has_value: bool,
    pub(crate) value_name: Option<String>,
    pub(crate) destination: Option<Destination<'a>>,
    pub(crate) handler: Option<Handler<'a>>,
    pub(crate) description: Option<String>,
    pub(crate) seen: bool,
    pub(crate) raw_value: String,
}

impl<'a> Opt<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the long form, without the leading `--`. An empty name clears it.
    pub fn long(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.long = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Set the short form.
    pub fn short(mut self, c: char) -> Self {
        self.short = Some(c);
        self
    }

    /// Mark the option as taking a value. Attaching a destination implies
    /// this regardless of what is set here.
    pub fn has_value(mut self, has_value: bool) -> Self {
        self.has_value = has_value;
        self
    }

    /// Name of the value, for help output.
    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_name = Some(name.into());
        self
    }

    /// Store the converted value in `dest`.
    pub fn value(mut self, dest: impl Into<Destination<'a>>) -> Self {
        self.destination = Some(dest.into());
        self
    }

    /// Store the value in any [`TextValue`], such as an `IpAddr`.
    pub fn text_value<T: TextValue>(self, slot: &'a mut T) -> Self {
        self.value(Destination::text(slot))
    }

    /// Run `f` with the raw value after it has been converted.
    pub fn handler<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str) -> Result<(), BoxError> + 'a,
    {
        self.handler = Some(Box::new(f));
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    pub fn takes_value(&self) -> bool {
        self.has_value
    }

    pub fn value_hint(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the option was matched by the last parse.
    pub fn seen(&self) -> bool {
        self.seen
    }

    /// The unconverted text of the last value given to this option.
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// `--long` if set, otherwise `-s`.
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{}", long),
            (None, Some(c)) => format!("-{}", c),
            (None, None) => String::new(),
        }
    }

    pub(crate) fn clear_state(&mut self) {
        self.seen = false;
        self.raw_value.clear();
    }

    pub(crate) fn mark_seen(&mut self, value: Option<&str>) {
        self.seen = true;
        if let Some(v) = value {
            self.raw_value = v.to_string();
        }
    }
}

impl std::fmt::Debug for Opt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Opt")
            .field("long", &self.long)
            .field("short", &self.short)
            .field("has_value", &self.has_value)
            .field("value_name", &self.value_name)
            .field("destination", &self.destination)
            .field("handler", &self.handler.is_some())
            .field("description", &self.description)
            .field("seen", &self.seen)
            .field("raw_value", &self.raw_value)
            .finish()
    }
}
