use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoffeeKind {
    Espresso,
    Americano,
    Latte,
}

impl CoffeeKind {
    pub const ALL: [CoffeeKind; 3] = [
        CoffeeKind::Espresso,
        CoffeeKind::Americano,
        CoffeeKind::Latte,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoffeeKind::Espresso => "espresso",
            CoffeeKind::Americano => "americano",
            CoffeeKind::Latte => "latte",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CoffeeKind::Espresso => "Espresso",
            CoffeeKind::Americano => "Americano",
            CoffeeKind::Latte => "Latte",
        }
    }
}

impl fmt::Display for CoffeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoffeeKind {
    type Err = UnknownCoffeeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "espresso" => Ok(CoffeeKind::Espresso),
            "americano" => Ok(CoffeeKind::Americano),
            "latte" => Ok(CoffeeKind::Latte),
            other => Err(UnknownCoffeeKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coffee type '{0}'")]
pub struct UnknownCoffeeKind(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CupSize {
    Normal,
    Large,
}

impl CupSize {
    pub fn milliliters(&self) -> u32 {
        match self {
            CupSize::Normal => 120,
            CupSize::Large => 240,
        }
    }
}

/// What a single brew consumes. The catalog below is fixed; there is no
/// per-deployment recipe storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoffeeSpec {
    pub kind: CoffeeKind,
    pub grounds_dg: u32,
    pub size: CupSize,
    pub extra_water_ml: Option<u32>,
    pub contains_milk: bool,
}

impl CoffeeSpec {
    pub fn for_kind(kind: CoffeeKind) -> CoffeeSpec {
        match kind {
            CoffeeKind::Espresso => CoffeeSpec {
                kind,
                grounds_dg: 40,
                size: CupSize::Normal,
                extra_water_ml: None,
                contains_milk: false,
            },
            CoffeeKind::Americano => CoffeeSpec {
                kind,
                grounds_dg: 40,
                size: CupSize::Normal,
                extra_water_ml: Some(120),
                contains_milk: false,
            },
            CoffeeKind::Latte => CoffeeSpec {
                kind,
                grounds_dg: 40,
                size: CupSize::Normal,
                extra_water_ml: None,
                contains_milk: true,
            },
        }
    }
}

/// Recovery command a user can click while the machine reports problems.
/// The wire identifier is the control's element id, sent verbatim as the
/// `method` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionCommand {
    BeansRefill,
    WaterRefill,
    MilkRefill,
    TrashRemove,
}

impl OptionCommand {
    pub const ALL: [OptionCommand; 4] = [
        OptionCommand::BeansRefill,
        OptionCommand::WaterRefill,
        OptionCommand::MilkRefill,
        OptionCommand::TrashRemove,
    ];

    pub fn identifier(&self) -> &'static str {
        match self {
            OptionCommand::BeansRefill => "beans_options",
            OptionCommand::WaterRefill => "water_options",
            OptionCommand::MilkRefill => "milk_options",
            OptionCommand::TrashRemove => "trash_options",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<OptionCommand> {
        Self::ALL
            .into_iter()
            .find(|command| command.identifier() == identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coffee_kind_round_trips_through_form_value() {
        for kind in CoffeeKind::ALL {
            assert_eq!(kind.as_str().parse::<CoffeeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_coffee_kind_is_rejected() {
        assert!("mocha".parse::<CoffeeKind>().is_err());
    }

    #[test]
    fn option_identifiers_match_control_ids() {
        assert_eq!(
            OptionCommand::from_identifier("water_options"),
            Some(OptionCommand::WaterRefill)
        );
        assert_eq!(OptionCommand::from_identifier("sugar_options"), None);
    }

    #[test]
    fn americano_spec_carries_extra_water() {
        let spec = CoffeeSpec::for_kind(CoffeeKind::Americano);
        assert_eq!(spec.extra_water_ml, Some(120));
        assert!(!spec.contains_milk);
    }
}
