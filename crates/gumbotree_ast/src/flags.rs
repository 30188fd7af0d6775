//! Parse flags recorded on each node.

use std::fmt;

use bitflags::bitflags;
use serde::{Serialize, Serializer};

bitflags! {
    /// How the parser came to insert a node.
    ///
    /// An empty set means the node appeared literally in the source.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParseFlags: u16 {
        const BY_PARSER = 1 << 0;
        const IMPLICIT_END_TAG = 1 << 1;
        const IMPLIED = 1 << 2;
        const CONVERTED_FROM_END_TAG = 1 << 3;
        const FROM_ISINDEX = 1 << 4;
        const FROM_IMAGE = 1 << 5;
        const RECONSTRUCTED_FORMATTING_ELEMENT = 1 << 6;
        const ADOPTION_AGENCY_CLONED = 1 << 7;
        const ADOPTION_AGENCY_MOVED = 1 << 8;
        const FOSTER_PARENTED = 1 << 9;
    }
}

impl fmt::Display for ParseFlags {
    /// Space-separated flag names, or `None` for the empty set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        for (i, (name, _)) in self.iter_names().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl Serialize for ParseFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter_names().map(|(name, _)| name))
    }
}
