//! Shield registry
//!
//! Side table from telefunction handle to shield. Telefunctions themselves
//! never carry their shield. The table is filled while the server is being
//! assembled and only read once requests are served.

use std::collections::HashMap;

use crate::observability::{log_event_with_fields, Event};
use crate::telefunction::{Telefunction, TelefunctionId};
use crate::wire::Value;

use super::errors::{ShieldError, ShieldResult};
use super::types::Shield;
use super::verify::{verify, Verdict, ROOT};

#[derive(Debug, Default, Clone)]
pub struct ShieldRegistry {
    shields: HashMap<TelefunctionId, Shield>,
}

impl ShieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `shield` to `telefunction`.
    ///
    /// A second attach overwrites the first one.
    ///
    /// # Errors
    ///
    /// `ShieldError::NotATuple` if a single node other than a tuple is given.
    pub fn attach(&mut self, telefunction: &Telefunction, shield: impl Into<Shield>) -> ShieldResult<()> {
        let shield = shield.into();
        if shield.target().is_none() {
            return Err(ShieldError::NotATuple {
                telefunction: telefunction.key(),
                given: shield.to_string(),
            });
        }

        let key = telefunction.key();
        let rendered = shield.to_string();
        match self.shields.insert(telefunction.id(), shield) {
            Some(previous) => {
                let previous = previous.to_string();
                log_event_with_fields(
                    Event::ShieldOverwritten,
                    &[
                        ("telefunction", key.as_str()),
                        ("previous", previous.as_str()),
                        ("shield", rendered.as_str()),
                    ],
                );
            }
            None => log_event_with_fields(
                Event::ShieldAttached,
                &[("telefunction", key.as_str()), ("shield", rendered.as_str())],
            ),
        }

        Ok(())
    }

    /// Same as [`attach`](Self::attach), shield first.
    pub fn attach_first(&mut self, shield: impl Into<Shield>, telefunction: &Telefunction) -> ShieldResult<()> {
        self.attach(telefunction, shield)
    }

    pub fn has_shield(&self, telefunction: &Telefunction) -> bool {
        self.shields.contains_key(&telefunction.id())
    }

    /// Human-readable form of the attached shield.
    pub fn describe(&self, telefunction: &Telefunction) -> Option<String> {
        self.shields.get(&telefunction.id()).map(|s| s.to_string())
    }

    /// Validates `args` against the attached shield.
    ///
    /// # Errors
    ///
    /// `ShieldError::Missing` when nothing is attached. That is a programming
    /// error: callers check [`has_shield`](Self::has_shield) first.
    pub fn apply(&self, telefunction: &Telefunction, args: &[Value]) -> ShieldResult<Verdict> {
        let shield = self
            .shields
            .get(&telefunction.id())
            .ok_or_else(|| ShieldError::Missing(telefunction.key()))?;

        // attach() only stores shields that have a tuple target
        let target = shield.target().ok_or_else(|| ShieldError::NotATuple {
            telefunction: telefunction.key(),
            given: shield.to_string(),
        })?;

        Ok(verify(Some(&target), &Value::Array(args.to_vec()), ROOT))
    }

    pub fn len(&self) -> usize {
        self.shields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shields.is_empty()
    }
}
