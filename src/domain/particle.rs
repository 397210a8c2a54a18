use crate::core::Vec2;
use crate::domain::fluids::{FluidId, FluidTable};
use crate::spatial::TemperatureGrid;
use crate::systems::temperature::color_for;

/// A single simulated particle
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub temperature: f64,
    pub fluid: FluidId,
    /// Anchored particles never move and ignore impulses, but still push others
    pub anchored: bool,
    /// ABGR display colour, refreshed once per tick
    pub color: u32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, temperature: f64, fluid: FluidId) -> Self {
        Self {
            position,
            velocity,
            temperature,
            fluid,
            anchored: false,
            color: 0,
        }
    }

    pub fn at_rest(x: f64, y: f64, temperature: f64, fluid: FluidId) -> Self {
        Self::new(Vec2::new(x, y), Vec2::ZERO, temperature, fluid)
    }

    pub fn anchored(mut self) -> Self {
        self.anchored = true;
        self.velocity = Vec2::ZERO;
        self
    }

    /// Exchange heat with the grid cell under the particle
    #[inline]
    pub fn exchange_heat(&mut self, fluids: &FluidTable, grid: &mut TemperatureGrid) {
        let rate = fluids.fluid(self.fluid).heat_transfer_rate;
        self.temperature =
            grid.exchange_heat(self.position.x, self.position.y, self.temperature, rate);
    }

    #[inline]
    pub fn refresh_color(&mut self, fluids: &FluidTable, heat_display: bool) {
        self.color = if heat_display {
            color_for(self.temperature)
        } else {
            fluids.fluid(self.fluid).color
        };
    }

    /// Switch to the paired state if the temperature calls for it.
    /// Returns true when the fluid changed.
    #[inline]
    pub fn update_phase(&mut self, fluids: &FluidTable) -> bool {
        let next = fluids.appropriate_fluid_for_temperature(self.fluid, self.temperature);
        let changed = next != self.fluid;
        self.fluid = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fluids::{FLUID_STEAM, FLUID_WATER};

    #[test]
    fn exchange_heat_moves_particle_towards_cell() {
        let fluids = FluidTable::from_builtin();
        let mut grid = TemperatureGrid::new(64, 64, 3, 400.0);
        let mut p = Particle::at_rest(10.0, 10.0, 300.0, FLUID_WATER);

        p.exchange_heat(&fluids, &mut grid);

        // water transfers 1% per tick
        assert!((p.temperature - 301.0).abs() < 1e-9);
        assert!((grid.read(10.0, 10.0) - 399.0).abs() < 1e-9);
    }

    #[test]
    fn update_phase_reports_change() {
        let fluids = FluidTable::from_builtin();
        let mut p = Particle::at_rest(0.0, 0.0, 380.0, FLUID_WATER);
        assert!(p.update_phase(&fluids));
        assert_eq!(p.fluid, FLUID_STEAM);
        assert!(!p.update_phase(&fluids));
    }

    #[test]
    fn refresh_color_follows_display_mode() {
        let fluids = FluidTable::from_builtin();
        let mut p = Particle::at_rest(0.0, 0.0, 300.0, FLUID_WATER);
        p.refresh_color(&fluids, false);
        assert_eq!(p.color, fluids.props(FLUID_WATER).unwrap().color);
        p.refresh_color(&fluids, true);
        assert_eq!(p.color, color_for(300.0));
    }
}
