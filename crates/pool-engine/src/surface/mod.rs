//! Boundary to the vector animation layer.
//!
//! The animation layer is an opaque playback surface: it exposes named numeric
//! properties (view-model numbers) and, grouped by state machine, named boolean
//! and trigger inputs. Games resolve every name once into a stable handle and
//! then read/write through the handle, so name lookups never happen per frame.
//!
//! Every lookup may fail: a missing property or input returns `None`, and the
//! feature that depends on it simply degrades.

mod memory;

pub use memory::MemorySurface;

/// Handle to a resolved numeric property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberInput(pub u32);

/// Handle to a resolved boolean state-machine input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolInput(pub u32);

/// Handle to a resolved trigger state-machine input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerInput(pub u32);

/// Contract every animation backend fulfills (Rive in the browser, an
/// in-memory recorder for headless runs).
pub trait AnimationSurface {
    /// Whether the animation asset has finished loading.
    /// Nothing else is called until this returns `true`.
    fn is_ready(&self) -> bool;

    /// Resolve a numeric property by name.
    fn resolve_number(&mut self, name: &str) -> Option<NumberInput>;

    /// Resolve a boolean input of the named state machine.
    fn resolve_bool(&mut self, machine: &str, name: &str) -> Option<BoolInput>;

    /// Resolve a trigger input of the named state machine.
    fn resolve_trigger(&mut self, machine: &str, name: &str) -> Option<TriggerInput>;

    /// Current value of a numeric property.
    fn number(&self, input: NumberInput) -> Option<f32>;

    fn set_number(&mut self, input: NumberInput, value: f32);

    fn set_bool(&mut self, input: BoolInput, value: bool);

    fn fire(&mut self, input: TriggerInput);
}

/// Placeholder surface used until the host attaches a real one.
/// Never ready, so games skip all animation work.
#[derive(Debug, Default)]
pub struct NullSurface;

impl AnimationSurface for NullSurface {
    fn is_ready(&self) -> bool {
        false
    }

    fn resolve_number(&mut self, _name: &str) -> Option<NumberInput> {
        None
    }

    fn resolve_bool(&mut self, _machine: &str, _name: &str) -> Option<BoolInput> {
        None
    }

    fn resolve_trigger(&mut self, _machine: &str, _name: &str) -> Option<TriggerInput> {
        None
    }

    fn number(&self, _input: NumberInput) -> Option<f32> {
        None
    }

    fn set_number(&mut self, _input: NumberInput, _value: f32) {}

    fn set_bool(&mut self, _input: BoolInput, _value: bool) {}

    fn fire(&mut self, _input: TriggerInput) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_surface_resolves_nothing() {
        let mut s = NullSurface;
        assert!(!s.is_ready());
        assert!(s.resolve_number("CueBallX").is_none());
        assert!(s.resolve_bool("CueStick", "CueHover").is_none());
        assert!(s.resolve_trigger("CueStick", "CueStickVisibility").is_none());
    }
}
