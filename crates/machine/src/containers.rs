/// A fluid or beans container with a fixed capacity. Starts full.
#[derive(Debug, Clone)]
pub struct Tank {
    capacity: u32,
    level: u32,
}

impl Tank {
    pub const WATER_CAPACITY: u32 = 1000; // ml
    pub const MILK_CAPACITY: u32 = 300; // ml
    pub const WATER_FOR_LATHER: u32 = 150; // ml
    pub const BEANS_CAPACITY: u32 = 500; // dg

    pub fn new(capacity: u32) -> Tank {
        Tank {
            capacity,
            level: capacity,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Adds `amount`, clamping at capacity. Returns whether the full
    /// amount fit without clamping.
    pub fn fill(&mut self, amount: u32) -> bool {
        if amount > self.capacity {
            return false;
        }
        if self.level + amount <= self.capacity {
            self.level += amount;
            true
        } else {
            self.level = self.capacity;
            false
        }
    }

    /// Draws `amount` out. A tank is never drawn to exactly empty; the
    /// draw fails once it would leave nothing behind.
    pub fn draw(&mut self, amount: u32) -> bool {
        if self.level > amount {
            self.level -= amount;
            true
        } else {
            false
        }
    }

    pub fn refill(&mut self) {
        self.level = self.capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_clamps_at_capacity() {
        let mut tank = Tank::new(Tank::WATER_CAPACITY);
        tank.draw(300);
        assert!(!tank.fill(Tank::WATER_CAPACITY));
        assert_eq!(tank.level(), Tank::WATER_CAPACITY);
    }

    #[test]
    fn draw_fails_when_it_would_empty_the_tank() {
        let mut tank = Tank::new(100);
        assert!(!tank.draw(100));
        assert!(tank.draw(99));
        assert_eq!(tank.level(), 1);
    }

    #[test]
    fn oversized_fill_is_rejected_without_change() {
        let mut tank = Tank::new(100);
        tank.draw(50);
        assert!(!tank.fill(101));
        assert_eq!(tank.level(), 50);
    }
}
