use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::composer::SceneComposer;
use crate::scene::SceneGraph;

/// Value of one tunable parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Float(f32),
}

impl ParamValue {
    pub fn as_float(self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(v),
            ParamValue::Bool(_) => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(v),
            ParamValue::Float(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    Float { min: f32, max: f32, step: f32 },
    Toggle,
}

/// Declared control: name, display label, range and default
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
}

impl ParamSpec {
    pub const fn float(
        name: &'static str,
        label: &'static str,
        min: f32,
        max: f32,
        step: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Float { min, max, step },
            default: ParamValue::Float(default),
        }
    }

    pub const fn toggle(name: &'static str, label: &'static str, default: bool) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Toggle,
            default: ParamValue::Bool(default),
        }
    }

    pub fn accepts(&self, value: ParamValue) -> bool {
        matches!(
            (self.kind, value),
            (ParamKind::Float { .. }, ParamValue::Float(_)) | (ParamKind::Toggle, ParamValue::Bool(_))
        )
    }

    /// Snap to step, then clamp into range. `None` on kind mismatch.
    pub fn constrain(&self, value: ParamValue) -> Option<ParamValue> {
        match (self.kind, value) {
            (ParamKind::Float { min, max, step }, ParamValue::Float(v)) => {
                let snapped = if step > 0.0 { (v / step).round() * step } else { v };
                Some(ParamValue::Float(snapped.clamp(min, max)))
            }
            (ParamKind::Toggle, ParamValue::Bool(v)) => Some(ParamValue::Bool(v)),
            _ => None,
        }
    }
}

/// Writes a parameter value into the scene
pub type ParamSetter = Box<dyn FnMut(&mut SceneGraph, ParamValue)>;

/// Flat name -> value map over a fixed list of specs
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    specs: Vec<ParamSpec>,
    values: HashMap<&'static str, ParamValue>,
}

impl ParameterSet {
    pub fn new(specs: Vec<ParamSpec>) -> Self {
        let values = specs.iter().map(|s| (s.name, s.default)).collect();
        Self { specs, values }
    }

    /// Specs in declaration order
    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    pub fn spec(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(ParamValue::as_float)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ParamValue::as_bool)
    }

    /// Store without any range check
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let Some(spec) = self.spec(name) else {
            bail!("Unknown parameter: {}", name);
        };
        if !spec.accepts(value) {
            bail!("Parameter {} does not accept {:?}", name, value);
        }
        let key = spec.name;
        self.values.insert(key, value);
        Ok(())
    }
}

/// Binding layer between user controls and the composer.
/// All range clamping happens here, never in the scene.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    pub title: String,
    pub visible: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            title: "Controls".to_string(),
            visible: true,
        }
    }
}

impl ControlPanel {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            ..Self::default()
        }
    }

    /// Constrain `value` to the declared range and forward it.
    /// Returns the value actually applied.
    pub fn submit(
        &self,
        composer: &mut SceneComposer,
        name: &str,
        value: ParamValue,
    ) -> Result<ParamValue> {
        let Some(spec) = composer.params().spec(name) else {
            bail!("Unknown parameter: {}", name);
        };
        let Some(constrained) = spec.constrain(value) else {
            bail!("Parameter {} does not accept {:?}", name, value);
        };

        composer.set_parameter(name, constrained)?;
        Ok(constrained)
    }
}
