//! Nucleus identifier: the (protons, neutrons) pair naming a run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Proton / neutron numbers identifying one WholeMap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Nucleus {
    pub protons: u32,
    pub neutrons: u32,
}

impl Nucleus {
    pub fn new(protons: u32, neutrons: u32) -> Self {
        Self { protons, neutrons }
    }

    /// Dataset name of the input WholeMap, e.g. `102_154_6D_Whole_Map.txt`.
    pub fn whole_map_name(&self) -> String {
        format!("{self}_6D_Whole_Map.txt")
    }
}

/// Renders as `Z_N`, the prefix shared by every file of a run.
impl fmt::Display for Nucleus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.protons, self.neutrons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_map_name() {
        assert_eq!(Nucleus::new(102, 154).whole_map_name(), "102_154_6D_Whole_Map.txt");
    }
}
