//! The table of registered options.

use crate::error::Error;
use crate::option::Opt;
use std::collections::HashMap;
use tracing::debug;

/// A set of recognized options, indexed by long name and short character.
///
/// Options are owned by the set once registered; destinations and handlers
/// attached to them borrow from the caller for `'a`.
#[derive(Debug, Default)]
pub struct OptionSet<'a> {
    pub(crate) options: Vec<Opt<'a>>,
    pub(crate) long: HashMap<String, usize>,
    pub(crate) short: HashMap<char, usize>,
}

impl<'a> OptionSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single option.
    pub fn add(&mut self, opt: Opt<'a>) -> Result<(), Error> {
        self.register([opt])
    }

    /// Register options in order.
    ///
    /// Registration is not transactional: options accepted before a failing
    /// one stay registered. An option whose long name was accepted but whose
    /// short character is a duplicate stays reachable by its long name.
    pub fn register<I>(&mut self, opts: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Opt<'a>>,
    {
        for mut opt in opts {
            if opt.destination.is_some() {
                opt.has_value = true;
            }
            if opt.long.is_none() && opt.short.is_none() {
                return Err(Error::ShortAndLongEmpty);
            }

            if let Some(long) = &opt.long {
                if self.long.contains_key(long) {
                    return Err(match opt.short {
                        Some(_) => duplicate_short(&opt),
                        None => Error::DuplicateOption(format!("--{}", long)),
                    });
                }
            }
            let short_taken = opt.short.is_some_and(|c| self.short.contains_key(&c));
            if short_taken && opt.long.is_none() {
                return Err(duplicate_short(&opt));
            }

            opt.clear_state();
            debug!(option = %opt.display_name(), has_value = opt.has_value, "registered option");

            let index = self.options.len();
            let long = opt.long.clone();
            let short = opt.short;
            let err = short_taken.then(|| duplicate_short(&opt));
            self.options.push(opt);

            if let Some(long) = long {
                self.long.insert(long, index);
            }
            if let Some(err) = err {
                return Err(err);
            }
            if let Some(c) = short {
                self.short.insert(c, index);
            }
        }
        Ok(())
    }

    /// Clear `seen` and `raw_value` on every registered option.
    pub fn reset(&mut self) {
        for opt in &mut self.options {
            opt.clear_state();
        }
    }

    /// Look up an option by its long name (without `--`).
    pub fn by_long(&self, name: &str) -> Option<&Opt<'a>> {
        self.long.get(name).map(|&i| &self.options[i])
    }

    /// Look up an option by its short character.
    pub fn by_short(&self, c: char) -> Option<&Opt<'a>> {
        self.short.get(&c).map(|&i| &self.options[i])
    }

    /// All registered options, in registration order.
    pub fn options(&self) -> impl Iterator<Item = &Opt<'a>> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

fn duplicate_short(opt: &Opt<'_>) -> Error {
    let c = opt.short.unwrap_or_default();
    Error::DuplicateOption(format!("-{}", c))
}
