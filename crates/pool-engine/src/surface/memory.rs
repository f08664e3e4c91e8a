use super::{AnimationSurface, BoolInput, NumberInput, TriggerInput};

#[derive(Debug, Clone)]
struct NumberSlot {
    name: String,
    value: f32,
    writes: u32,
}

#[derive(Debug, Clone)]
struct BoolSlot {
    machine: String,
    name: String,
    value: bool,
}

#[derive(Debug, Clone)]
struct TriggerSlot {
    machine: String,
    name: String,
    fired: u32,
}

/// In-memory animation surface.
///
/// Holds whatever properties and inputs it was built with and records every
/// write, so headless runs and tests can observe what a game sent to the
/// animation layer.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    ready: bool,
    numbers: Vec<NumberSlot>,
    bools: Vec<BoolSlot>,
    triggers: Vec<TriggerSlot>,
    lookups: u32,
}

impl MemorySurface {
    /// An empty surface that reports ready.
    pub fn new() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    pub fn with_number(mut self, name: &str, value: f32) -> Self {
        self.numbers.push(NumberSlot {
            name: name.to_string(),
            value,
            writes: 0,
        });
        self
    }

    pub fn with_bool(mut self, machine: &str, name: &str) -> Self {
        self.bools.push(BoolSlot {
            machine: machine.to_string(),
            name: name.to_string(),
            value: false,
        });
        self
    }

    pub fn with_trigger(mut self, machine: &str, name: &str) -> Self {
        self.triggers.push(TriggerSlot {
            machine: machine.to_string(),
            name: name.to_string(),
            fired: 0,
        });
        self
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Value of a numeric property by name.
    pub fn number_value(&self, name: &str) -> Option<f32> {
        self.numbers.iter().find(|n| n.name == name).map(|n| n.value)
    }

    /// How many times a numeric property was written.
    pub fn number_writes(&self, name: &str) -> u32 {
        self.numbers
            .iter()
            .find(|n| n.name == name)
            .map(|n| n.writes)
            .unwrap_or(0)
    }

    pub fn bool_value(&self, machine: &str, name: &str) -> Option<bool> {
        self.bools
            .iter()
            .find(|b| b.machine == machine && b.name == name)
            .map(|b| b.value)
    }

    /// How many times a trigger fired.
    pub fn fire_count(&self, machine: &str, name: &str) -> u32 {
        self.triggers
            .iter()
            .find(|t| t.machine == machine && t.name == name)
            .map(|t| t.fired)
            .unwrap_or(0)
    }

    /// Total number of name lookups performed (successful or not).
    pub fn lookups(&self) -> u32 {
        self.lookups
    }
}

impl AnimationSurface for MemorySurface {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn resolve_number(&mut self, name: &str) -> Option<NumberInput> {
        self.lookups += 1;
        self.numbers
            .iter()
            .position(|n| n.name == name)
            .map(|i| NumberInput(i as u32))
    }

    fn resolve_bool(&mut self, machine: &str, name: &str) -> Option<BoolInput> {
        self.lookups += 1;
        self.bools
            .iter()
            .position(|b| b.machine == machine && b.name == name)
            .map(|i| BoolInput(i as u32))
    }

    fn resolve_trigger(&mut self, machine: &str, name: &str) -> Option<TriggerInput> {
        self.lookups += 1;
        self.triggers
            .iter()
            .position(|t| t.machine == machine && t.name == name)
            .map(|i| TriggerInput(i as u32))
    }

    fn number(&self, input: NumberInput) -> Option<f32> {
        self.numbers.get(input.0 as usize).map(|n| n.value)
    }

    fn set_number(&mut self, input: NumberInput, value: f32) {
        if let Some(slot) = self.numbers.get_mut(input.0 as usize) {
            slot.value = value;
            slot.writes += 1;
        }
    }

    fn set_bool(&mut self, input: BoolInput, value: bool) {
        if let Some(slot) = self.bools.get_mut(input.0 as usize) {
            slot.value = value;
        }
    }

    fn fire(&mut self, input: TriggerInput) {
        if let Some(slot) = self.triggers.get_mut(input.0 as usize) {
            slot.fired += 1;
        }
    }
}
