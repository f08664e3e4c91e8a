use js_sys::{Array, Function, Reflect};
use pool_engine::{AnimationSurface, BoolInput, NumberInput, TriggerInput};
use wasm_bindgen::{JsCast, JsValue};

/// [`AnimationSurface`] over a live Rive instance.
///
/// Name lookups go through JS reflection once; the resolved JS objects
/// (view-model number properties and state-machine inputs) are kept and every
/// later read or write is a plain `value` property access.
pub struct RiveSurface {
    rive: JsValue,
    numbers: Vec<JsValue>,
    bools: Vec<JsValue>,
    triggers: Vec<JsValue>,
}

impl RiveSurface {
    pub fn new(rive: JsValue) -> Self {
        Self {
            rive,
            numbers: Vec::new(),
            bools: Vec::new(),
            triggers: Vec::new(),
        }
    }

    fn view_model(&self) -> Option<JsValue> {
        present(Reflect::get(&self.rive, &JsValue::from_str("viewModelInstance")).ok()?)
    }

    /// Find a named input of a state machine.
    fn machine_input(&self, machine: &str, name: &str) -> Option<JsValue> {
        let inputs = call(&self.rive, "stateMachineInputs", &JsValue::from_str(machine))?;
        let inputs = inputs.dyn_into::<Array>().ok()?;
        let found = inputs.iter().find(|input| {
            Reflect::get(input, &JsValue::from_str("name"))
                .ok()
                .and_then(|n| n.as_string())
                .is_some_and(|n| n == name)
        });
        if found.is_none() {
            log::debug!("Input {}/{} not found", machine, name);
        }
        found
    }
}

fn present(value: JsValue) -> Option<JsValue> {
    if value.is_null() || value.is_undefined() {
        None
    } else {
        Some(value)
    }
}

/// Call `target[method](arg)`; `None` if the method is missing, throws, or
/// returns nothing.
fn call(target: &JsValue, method: &str, arg: &JsValue) -> Option<JsValue> {
    let func = Reflect::get(target, &JsValue::from_str(method)).ok()?;
    let func = func.dyn_into::<Function>().ok()?;
    present(func.call1(target, arg).ok()?)
}

/// Rive reports `readyForPlaying` before the view model is bound; inputs are
/// only usable once both are there.
fn playable(ready_for_playing: bool, has_view_model: bool) -> bool {
    ready_for_playing && has_view_model
}

fn set_value(target: &JsValue, value: JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str("value"), &value);
}

impl AnimationSurface for RiveSurface {
    fn is_ready(&self) -> bool {
        let playing = Reflect::get(&self.rive, &JsValue::from_str("readyForPlaying"))
            .map(|v| v.is_truthy())
            .unwrap_or(false);
        playable(playing, self.view_model().is_some())
    }

    fn resolve_number(&mut self, name: &str) -> Option<NumberInput> {
        let vm = self.view_model()?;
        let prop = call(&vm, "number", &JsValue::from_str(name))?;
        self.numbers.push(prop);
        Some(NumberInput(self.numbers.len() as u32 - 1))
    }

    fn resolve_bool(&mut self, machine: &str, name: &str) -> Option<BoolInput> {
        let input = self.machine_input(machine, name)?;
        self.bools.push(input);
        Some(BoolInput(self.bools.len() as u32 - 1))
    }

    fn resolve_trigger(&mut self, machine: &str, name: &str) -> Option<TriggerInput> {
        let input = self.machine_input(machine, name)?;
        self.triggers.push(input);
        Some(TriggerInput(self.triggers.len() as u32 - 1))
    }

    fn number(&self, input: NumberInput) -> Option<f32> {
        let prop = self.numbers.get(input.0 as usize)?;
        let value = Reflect::get(prop, &JsValue::from_str("value")).ok()?;
        value.as_f64().map(|v| v as f32)
    }

    fn set_number(&mut self, input: NumberInput, value: f32) {
        if let Some(prop) = self.numbers.get(input.0 as usize) {
            set_value(prop, JsValue::from_f64(value as f64));
        }
    }

    fn set_bool(&mut self, input: BoolInput, value: bool) {
        if let Some(target) = self.bools.get(input.0 as usize) {
            set_value(target, JsValue::from_bool(value));
        }
    }

    fn fire(&mut self, input: TriggerInput) {
        let Some(trigger) = self.triggers.get(input.0 as usize) else {
            return;
        };
        if let Ok(func) = Reflect::get(trigger, &JsValue::from_str("fire")) {
            if let Ok(func) = func.dyn_into::<Function>() {
                let _ = func.call0(trigger);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_playable_until_ready_and_bound() {
        assert!(!playable(false, false));
        assert!(!playable(false, true));
        assert!(!playable(true, false));
        assert!(playable(true, true));
    }
}
