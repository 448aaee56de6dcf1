use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Monomer species that can be written to the placement file.
/// Only one species is placed per run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, Default)]
pub enum Species {
    /// Photo-acid generator
    #[default]
    #[serde(rename = "PAG")]
    Pag,
    #[serde(rename = "TBMA")]
    Tbma,
    #[serde(rename = "MAA")]
    Maa,
}

/// Fixed metadata columns attached to every record of a species.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeciesProps {
    pub label: &'static str,
    pub monomer_id: u32,
    pub chain_index: u32,
}

pub static SPECIES_PROPERTIES: Lazy<HashMap<Species, SpeciesProps>> = Lazy::new(|| {
    use Species::*;
    let mut m = HashMap::new();
    m.insert(
        Pag,
        SpeciesProps {
            label: "PAG",
            monomer_id: 5,
            chain_index: 1,
        },
    );
    m.insert(
        Tbma,
        SpeciesProps {
            label: "TBMA",
            monomer_id: 3,
            chain_index: 1,
        },
    );
    m.insert(
        Maa,
        SpeciesProps {
            label: "MAA",
            monomer_id: 7,
            chain_index: 1,
        },
    );
    m
});

impl Species {
    pub const ALL: [Species; 3] = [Species::Pag, Species::Tbma, Species::Maa];

    pub fn props(self) -> SpeciesProps {
        // Every variant is inserted above.
        SPECIES_PROPERTIES[&self]
    }

    pub fn label(self) -> &'static str {
        self.props().label
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Species {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .iter()
            .copied()
            .find(|sp| sp.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeneratorError::UnknownSpecies(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_species_is_pag_5_1() {
        let props = Species::default().props();
        assert_eq!(props.label, "PAG");
        assert_eq!(props.monomer_id, 5);
        assert_eq!(props.chain_index, 1);
    }

    #[test]
    fn alternative_label_triples() {
        assert_eq!(Species::Tbma.props().monomer_id, 3);
        assert_eq!(Species::Maa.props().monomer_id, 7);
        assert!(Species::ALL.iter().all(|s| s.props().chain_index == 1));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("pag".parse::<Species>().unwrap(), Species::Pag);
        assert_eq!("TBMA".parse::<Species>().unwrap(), Species::Tbma);
        assert!(matches!(
            "LiMetal".parse::<Species>(),
            Err(GeneratorError::UnknownSpecies(_))
        ));
    }
}
