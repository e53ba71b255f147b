use std::collections::BTreeSet;

use crate::containers::Tank;

/// Pressurizes water for the brew group. The simulation always reaches
/// its working pressure; `release` opens the valve back to ambient.
#[derive(Debug)]
pub struct PressurePump {
    current_pressure: u32, // bar
}

impl PressurePump {
    pub const MAX_PRESSURE: u32 = 10; // bar

    pub fn new() -> PressurePump {
        PressurePump {
            current_pressure: 1,
        }
    }

    pub fn pressurize(&mut self) -> bool {
        self.current_pressure = Self::MAX_PRESSURE;
        self.current_pressure == Self::MAX_PRESSURE
    }

    pub fn release(&mut self) {
        self.current_pressure = 1;
    }

    pub fn current_pressure(&self) -> u32 {
        self.current_pressure
    }
}

impl Default for PressurePump {
    fn default() -> Self {
        Self::new()
    }
}

/// Boils water for the brew group and the pressure pump. Draws from the
/// machine's water tank; each boil also reserves a boiler-full for the
/// pump, which is why the tank drains faster than cup sizes suggest.
#[derive(Debug)]
pub struct WaterHeater {
    tank: Tank,
    water_temp: u32, // C
    boiler_level: u32,
    problems: BTreeSet<String>,
}

impl WaterHeater {
    pub const CAPACITY: u32 = 350; // ml, boiler
    pub const MIN_CAPACITY: u32 = 50; // ml
    pub const BOILING_POINT: u32 = 100; // C

    pub const ERROR_EMPTY_WATER_TANK: &'static str = "Empty water tank";
    pub const ERROR_NOT_ENOUGH_WATER_TO_BOIL: &'static str = "Not enough water in heater to boil";
    pub const ERROR_BAD_TEMP: &'static str = "Too low water temperature";

    pub fn new() -> WaterHeater {
        WaterHeater {
            tank: Tank::new(Tank::WATER_CAPACITY),
            water_temp: 20,
            boiler_level: Self::MIN_CAPACITY,
            problems: BTreeSet::new(),
        }
    }

    pub fn problems(&self) -> &BTreeSet<String> {
        &self.problems
    }

    pub fn tank(&self) -> &Tank {
        &self.tank
    }

    /// Boils `amount` ml for a brew. Fails on out-of-bounds amounts and
    /// on an exhausted tank, recording the matching problem.
    pub fn boil(&mut self, amount: u32) -> bool {
        self.boiler_level = amount;
        if !(Self::MIN_CAPACITY..=Self::CAPACITY).contains(&amount) {
            self.problems
                .insert(Self::ERROR_NOT_ENOUGH_WATER_TO_BOIL.to_string());
            return false;
        }
        // One draw for the cup, one boiler-full for the pump circuit.
        if !self.tank.draw(amount) || !self.tank.draw(Self::CAPACITY) {
            self.problems
                .insert(Self::ERROR_EMPTY_WATER_TANK.to_string());
            return false;
        }
        self.water_temp = Self::BOILING_POINT;
        if self.water_temp != Self::BOILING_POINT {
            self.problems.insert(Self::ERROR_BAD_TEMP.to_string());
            return false;
        }
        true
    }

    /// Draws hot water for the milk lather without the pump reserve.
    pub fn draw_for_lather(&mut self, amount: u32) -> bool {
        if !self.tank.draw(amount) {
            self.problems
                .insert(Self::ERROR_EMPTY_WATER_TANK.to_string());
            return false;
        }
        self.water_temp = Self::BOILING_POINT;
        true
    }

    pub fn reset(&mut self) {
        self.boiler_level = Self::MIN_CAPACITY;
        self.water_temp = 20;
    }

    pub fn refill_water_tank(&mut self) {
        self.tank.refill();
        self.problems.clear();
    }
}

impl Default for WaterHeater {
    fn default() -> Self {
        Self::new()
    }
}

/// Foams milk for lattes. Borrows the water heater for the hot water the
/// lather needs.
#[derive(Debug)]
pub struct MilkHeater {
    milk_tank: Tank,
    problems: BTreeSet<String>,
}

impl MilkHeater {
    pub const CAPACITY: u32 = 150; // ml per lather

    pub const ERROR_EMPTY_MILK_TANK: &'static str = "Empty milk tank";

    pub fn new() -> MilkHeater {
        MilkHeater {
            milk_tank: Tank::new(Tank::MILK_CAPACITY),
            problems: BTreeSet::new(),
        }
    }

    pub fn problems(&self) -> &BTreeSet<String> {
        &self.problems
    }

    pub fn lather(&mut self, water_heater: &mut WaterHeater) -> bool {
        if !water_heater.draw_for_lather(Tank::WATER_FOR_LATHER) {
            self.problems
                .insert(WaterHeater::ERROR_EMPTY_WATER_TANK.to_string());
            return false;
        }
        if !self.milk_tank.draw(Self::CAPACITY) {
            self.problems
                .insert(Self::ERROR_EMPTY_MILK_TANK.to_string());
            return false;
        }
        true
    }

    pub fn fill_milk(&mut self) {
        self.milk_tank.refill();
        self.problems.remove(Self::ERROR_EMPTY_MILK_TANK);
    }
}

impl Default for MilkHeater {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects spent pucks. Four fit before the machine refuses to brew.
#[derive(Debug)]
pub struct TrashBin {
    pucks: u32,
    problems: BTreeSet<String>,
}

impl TrashBin {
    pub const CAPACITY: u32 = 4;

    pub const ERROR_FULL_TRASH: &'static str = "Full trash bin";

    pub fn new() -> TrashBin {
        TrashBin {
            pucks: 0,
            problems: BTreeSet::new(),
        }
    }

    pub fn problems(&self) -> &BTreeSet<String> {
        &self.problems
    }

    pub fn has_room(&mut self) -> bool {
        if self.pucks >= Self::CAPACITY {
            self.problems.insert(Self::ERROR_FULL_TRASH.to_string());
            return false;
        }
        true
    }

    pub fn drop_puck(&mut self) {
        self.pucks += 1;
    }

    pub fn pucks(&self) -> u32 {
        self.pucks
    }

    pub fn empty(&mut self) {
        self.pucks = 0;
        self.problems.clear();
    }
}

impl Default for TrashBin {
    fn default() -> Self {
        Self::new()
    }
}

/// Grinds beans drawn from the beans tank.
#[derive(Debug)]
pub struct CoffeeGrinder {
    beans_tank: Tank,
    problems: BTreeSet<String>,
}

impl CoffeeGrinder {
    pub const CAPACITY: u32 = 200; // dg per grind

    pub const ERROR_NOT_ENOUGH_BEANS_TO_GRIND: &'static str = "Not enough beans to grind";

    pub fn new() -> CoffeeGrinder {
        CoffeeGrinder {
            beans_tank: Tank::new(Tank::BEANS_CAPACITY),
            problems: BTreeSet::new(),
        }
    }

    pub fn problems(&self) -> &BTreeSet<String> {
        &self.problems
    }

    pub fn beans_tank(&self) -> &Tank {
        &self.beans_tank
    }

    pub fn grind(&mut self, amount: u32) -> bool {
        if amount == 0 || amount > Self::CAPACITY {
            return false;
        }
        if !self.beans_tank.draw(amount) {
            self.problems
                .insert(Self::ERROR_NOT_ENOUGH_BEANS_TO_GRIND.to_string());
            return false;
        }
        true
    }

    pub fn refill_beans(&mut self) {
        self.beans_tank.refill();
        self.problems.clear();
    }
}

impl Default for CoffeeGrinder {
    fn default() -> Self {
        Self::new()
    }
}
