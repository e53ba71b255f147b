use std::collections::BTreeSet;

use shared::domain::{CoffeeKind, CoffeeSpec};
use tracing::debug;

use crate::devices::{CoffeeGrinder, MilkHeater, PressurePump, TrashBin, WaterHeater};

pub const ESPRESSO_IMAGE: &str = "/static/images/espresso.png";
pub const LATTE_IMAGE: &str = "/static/images/latte.png";

/// Problems that stopped a brew, in stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrewProblems(pub Vec<String>);

impl BrewProblems {
    /// The human-readable text shown in the page's status region.
    pub fn to_status_text(&self) -> String {
        self.0.join(", ")
    }
}

/// All device parts wired together. Problems accumulate across brews and
/// are only erased by the matching recovery command; nothing clears
/// itself until the user intervenes.
#[derive(Debug)]
pub struct BrewMechanism {
    pump: PressurePump,
    water_heater: WaterHeater,
    milk_heater: MilkHeater,
    grinder: CoffeeGrinder,
    trash_bin: TrashBin,
    problems: BTreeSet<String>,
}

impl BrewMechanism {
    pub fn new() -> BrewMechanism {
        BrewMechanism {
            pump: PressurePump::new(),
            water_heater: WaterHeater::new(),
            milk_heater: MilkHeater::new(),
            grinder: CoffeeGrinder::new(),
            trash_bin: TrashBin::new(),
            problems: BTreeSet::new(),
        }
    }

    pub fn problems(&self) -> &BTreeSet<String> {
        &self.problems
    }

    /// Runs the full brew pipeline for `kind`. The first failing step
    /// aborts and returns everything currently wrong with the machine;
    /// success returns the cup image path for the recipe.
    pub fn brew(&mut self, kind: CoffeeKind) -> Result<&'static str, BrewProblems> {
        let spec = CoffeeSpec::for_kind(kind);

        if !self.trash_bin.has_room() {
            return Err(self.fail_with(self.trash_bin.problems().clone()));
        }
        if !self.grinder.grind(spec.grounds_dg) {
            return Err(self.fail_with(self.grinder.problems().clone()));
        }
        if !self.water_heater.boil(spec.size.milliliters()) {
            return Err(self.fail_with(self.water_heater.problems().clone()));
        }
        self.pump.pressurize();

        // Basic cup is done: release pressure, reset the boiler, bin the puck.
        self.pump.release();
        self.water_heater.reset();
        self.trash_bin.drop_puck();

        if let Some(extra) = spec.extra_water_ml {
            if !self.water_heater.boil(extra) {
                return Err(self.fail_with(self.water_heater.problems().clone()));
            }
            self.water_heater.reset();
        }
        if spec.contains_milk && !self.milk_heater.lather(&mut self.water_heater) {
            return Err(self.fail_with(self.milk_heater.problems().clone()));
        }

        debug!(kind = kind.as_str(), "cup served");
        Ok(match kind {
            CoffeeKind::Espresso | CoffeeKind::Americano => ESPRESSO_IMAGE,
            CoffeeKind::Latte => LATTE_IMAGE,
        })
    }

    fn fail_with(&mut self, device_problems: BTreeSet<String>) -> BrewProblems {
        self.problems.extend(device_problems);
        BrewProblems(self.problems.iter().cloned().collect())
    }

    pub fn refill_beans(&mut self) {
        self.grinder.refill_beans();
        self.problems
            .remove(CoffeeGrinder::ERROR_NOT_ENOUGH_BEANS_TO_GRIND);
    }

    pub fn refill_water(&mut self) {
        self.water_heater.refill_water_tank();
        self.problems.remove(WaterHeater::ERROR_EMPTY_WATER_TANK);
        self.problems
            .remove(WaterHeater::ERROR_NOT_ENOUGH_WATER_TO_BOIL);
    }

    pub fn refill_milk(&mut self) {
        self.milk_heater.fill_milk();
        self.problems.remove(MilkHeater::ERROR_EMPTY_MILK_TANK);
    }

    pub fn remove_trash(&mut self) {
        self.trash_bin.empty();
        self.problems.remove(TrashBin::ERROR_FULL_TRASH);
    }
}

impl Default for BrewMechanism {
    fn default() -> Self {
        Self::new()
    }
}
