//! Scanning an argument vector against an [`OptionSet`].

use crate::error::Error;
use crate::registry::OptionSet;
use tracing::{debug, trace};

impl<'a> OptionSet<'a> {
    /// Parse options from the front of `args`.
    ///
    /// Scanning stops at the first argument that does not start with `-`,
    /// after a `--` terminator (which is consumed), or when `args` runs
    /// out. Everything not consumed is returned. Options are applied as
    /// they are matched, so on error the options matched before the failing
    /// argument keep their `seen` and `raw_value` state.
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Vec<String>, Error> {
        let mut pos = 0;
        // Remainder of a short-option cluster, standing in for args[pos].
        let mut pending: Option<String> = None;

        while pos < args.len() {
            let arg = match pending.take() {
                Some(token) => token,
                None => args[pos].as_ref().to_string(),
            };
            trace!(token = %arg, "scanning argument");

            if arg == "--" {
                debug!("option terminator");
                pos += 1;
                break;
            }
            if !arg.starts_with('-') {
                debug!(token = %arg, "non-option argument ends scanning");
                break;
            }

            let (index, inline) = match arg.strip_prefix("--") {
                Some(name) => {
                    let matched = self
                        .match_long(name)
                        .ok_or_else(|| Error::NoSuchOption(arg.clone()))?;
                    pos += 1;
                    matched
                }
                None => {
                    let name = &arg[1..];
                    let mut chars = name.chars();
                    let index = chars
                        .next()
                        .and_then(|c| self.short.get(&c).copied())
                        .ok_or_else(|| Error::NoSuchOption(arg.clone()))?;
                    let rest = chars.as_str();

                    if rest.is_empty() {
                        pos += 1;
                        (index, None)
                    } else if self.options[index].has_value {
                        // -x=value, unless '=' is itself a short option
                        let value = match rest.strip_prefix('=') {
                            Some(v) if !self.short.contains_key(&'=') => v,
                            _ => rest,
                        };
                        pos += 1;
                        (index, Some(value.to_string()))
                    } else {
                        pending = Some(format!("-{}", rest));
                        (index, None)
                    }
                }
            };

            let opt = &mut self.options[index];
            let value = if opt.has_value {
                match inline {
                    Some(v) => Some(v),
                    None => {
                        let v = args
                            .get(pos)
                            .ok_or_else(|| Error::OptionRequiresValue(arg.clone()))?;
                        pos += 1;
                        Some(v.as_ref().to_string())
                    }
                }
            } else {
                None
            };

            debug!(option = %opt.display_name(), with_value = value.is_some(), "matched option");
            opt.mark_seen(value.as_deref());

            let raw = value.unwrap_or_default();
            if let Some(dest) = opt.destination.as_mut() {
                dest.assign(&raw)
                    .map_err(|source| Error::ParsingValue {
                        arg: arg.clone(),
                        source,
                    })?;
            }
            if let Some(handler) = opt.handler.as_mut() {
                handler(&raw).map_err(Error::Handler)?;
            }
        }

        Ok(args[pos..].iter().map(|a| a.as_ref().to_string()).collect())
    }

    /// Resolve `name` (the text after `--`) to an option and an optional
    /// inline value from a `name=value` form.
    fn match_long(&self, name: &str) -> Option<(usize, Option<String>)> {
        if let Some(&index) = self.long.get(name) {
            return Some((index, None));
        }
        let (key, value) = name.split_once('=')?;
        let &index = self.long.get(key)?;
        self.options[index]
            .has_value
            .then(|| (index, Some(value.to_string())))
    }
}
