use crate::Coordinate;
use crate::error::Error;
use crate::error::Result;
use crate::grid::*;
use serde::Deserialize;
use serde::Serialize;

/// Extent and resolution of one mesh axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    included: bool,
    lower: Coordinate,
    upper: Coordinate,
    steps: usize,
}

impl AxisSpec {
    /// An included axis of `steps` evenly spaced points over `bounds`.
    pub fn new(bounds: Bounds, steps: usize) -> Result<Self> {
        if steps == 0 {
            return Err(Error::configuration("an axis needs at least one step"));
        }
        if steps == 1 && bounds.lo() != bounds.hi() {
            return Err(Error::configuration(format!(
                "a single step cannot span {}",
                bounds
            )));
        }
        Ok(Self {
            included: true,
            lower: bounds.lo(),
            upper: bounds.hi(),
            steps,
        })
    }
    /// A declared axis left out of the mesh.
    pub fn excluded() -> Self {
        Self {
            included: false,
            lower: 0.,
            upper: 0.,
            steps: 1,
        }
    }
    pub fn included(&self) -> bool {
        self.included
    }
    pub fn lower(&self) -> Coordinate {
        self.lower
    }
    pub fn upper(&self) -> Coordinate {
        self.upper
    }
    pub fn steps(&self) -> usize {
        self.steps
    }
    /// Evenly spaced coordinates; both ends land exactly on the bounds.
    pub fn linspace(&self) -> Vec<Coordinate> {
        match self.steps {
            0 => Vec::new(),
            1 => vec![self.lower],
            n => {
                let delta = (self.upper - self.lower) / (n - 1) as Coordinate;
                let mut coords = (0..n)
                    .map(|i| self.lower + i as Coordinate * delta)
                    .collect::<Vec<_>>();
                coords[n - 1] = self.upper;
                coords
            }
        }
    }
}

/// Per-axis mesh declaration, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterpolationSpec {
    axes: Vec<(Axis, AxisSpec)>,
}

impl InterpolationSpec {
    pub fn new() -> Self {
        Self::default()
    }
    /// Adds an axis after those already declared. Each axis is declared once.
    pub fn declare(mut self, axis: Axis, spec: AxisSpec) -> Result<Self> {
        if self.axes.iter().any(|(a, _)| *a == axis) {
            return Err(Error::configuration(format!("{} declared twice", axis)));
        }
        self.axes.push((axis, spec));
        Ok(self)
    }
    /// Included axes only, in declaration order.
    pub fn included(&self) -> impl Iterator<Item = (Axis, &AxisSpec)> {
        self.axes
            .iter()
            .filter(|(_, s)| s.included())
            .map(|(a, s)| (*a, s))
    }
    pub fn get(&self, axis: Axis) -> Option<&AxisSpec> {
        self.axes.iter().find(|(a, _)| *a == axis).map(|(_, s)| s)
    }
    pub fn len(&self) -> usize {
        self.axes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}
