const STATE_NAME_OFF: &str = "off";
const STATE_NAME_BRIGHTEN: &str = "brighten";
const STATE_NAME_ON: &str = "on";
const STATE_NAME_FADE: &str = "fade";

/// Phase of the fade-in, hold, fade-out sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightState {
    /// Output is dark and nothing is scheduled
    #[default]
    Off,
    /// Ramping up towards the maximum brightness
    Brighten,
    /// Holding the maximum brightness until the hold deadline passes
    On,
    /// Ramping down towards zero
    Fade,
}

impl LightState {
    /// Get the state name
    pub const fn as_str(self) -> &'static str {
        match self {
            LightState::Off => STATE_NAME_OFF,
            LightState::Brighten => STATE_NAME_BRIGHTEN,
            LightState::On => STATE_NAME_ON,
            LightState::Fade => STATE_NAME_FADE,
        }
    }

    /// Returns true if the output may be emitting light in this state
    pub const fn is_lit(self) -> bool {
        !matches!(self, LightState::Off)
    }
}

impl core::fmt::Display for LightState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
