//! Controller sub-type classification.

use serde::{Deserialize, Serialize};

/// Densha controller variant, chosen when the interface is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DenshaModel {
    /// Two-handle PS2 controller (TCPP-20011).
    #[default]
    Type2,
}

impl DenshaModel {
    /// Construct a model from a USB product ID, returning `None` for unknown PIDs.
    pub fn from_pid(pid: u16) -> Option<Self> {
        match pid {
            crate::ids::PRODUCT_PS2_TYPE2 => Some(Self::Type2),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Type2 => "Densha de GO! Type 2",
        }
    }

    /// Whether the model has rumble motors in its handles.
    pub fn has_rumble(self) -> bool {
        matches!(self, Self::Type2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PRODUCT_PS2_TYPE2;

    #[test]
    fn from_pid_known() {
        assert_eq!(DenshaModel::from_pid(PRODUCT_PS2_TYPE2), Some(DenshaModel::Type2));
        assert!(DenshaModel::Type2.has_rumble());
    }

    #[test]
    fn from_pid_unknown() {
        assert_eq!(DenshaModel::from_pid(0x0000), None);
    }
}
