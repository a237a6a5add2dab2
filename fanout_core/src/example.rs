use serde::{Deserialize, Serialize};

/// Correction value marking a negative example: the command has no fix.
pub const NO_CORRECTION: &str = "?";

/// One (command, error output, correction) training triple.
///
/// `correction` holds a single corrective command, several alternatives joined
/// by `\n`, or [`NO_CORRECTION`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Example {
    pub command: String,
    pub stderr: String,
    pub correction: String,
}

/// Names one of the three text fields of an [`Example`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Command,
    Stderr,
    Correction,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Command, Field::Stderr, Field::Correction];
}

impl Example {
    pub fn new(
        command: impl Into<String>,
        stderr: impl Into<String>,
        correction: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            stderr: stderr.into(),
            correction: correction.into(),
        }
    }

    /// Returns `true` when the example carries no correction.
    pub fn is_negative(&self) -> bool {
        self.correction == NO_CORRECTION
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Command => &self.command,
            Field::Stderr => &self.stderr,
            Field::Correction => &self.correction,
        }
    }

    /// Replaces the text of `field` with the result of `rewrite_fn`.
    ///
    /// The correction of a negative example is left untouched, so no rule can
    /// fabricate a fix for a command that has none.
    pub fn rewrite<F>(&mut self, field: Field, rewrite_fn: F)
    where
        F: FnOnce(&str) -> String,
    {
        if field == Field::Correction && self.is_negative() {
            return;
        }
        let slot = match field {
            Field::Command => &mut self.command,
            Field::Stderr => &mut self.stderr,
            Field::Correction => &mut self.correction,
        };
        let updated = rewrite_fn(slot.as_str());
        if updated != *slot {
            *slot = updated;
        }
    }

    /// Applies `rewrite_fn` to each field in `fields`.
    pub fn rewrite_each<F>(&mut self, fields: &[Field], mut rewrite_fn: F)
    where
        F: FnMut(&str) -> String,
    {
        for &field in fields {
            self.rewrite(field, &mut rewrite_fn);
        }
    }

    /// Returns `true` if any of `fields` contains `needle` literally.
    pub fn any_contains(&self, fields: &[Field], needle: &str) -> bool {
        fields.iter().any(|&f| self.field(f).contains(needle))
    }

    /// 128-bit digest over all three fields, used to index the dedup set.
    ///
    /// Each field is length-prefixed so that text moving across a field
    /// boundary changes the digest.
    pub fn fingerprint(&self) -> [u8; 16] {
        let mut context = md5::Context::new();
        for field in Field::ALL {
            let text = self.field(field);
            context.consume((text.len() as u64).to_le_bytes());
            context.consume(text.as_bytes());
        }
        context.compute().0
    }
}
