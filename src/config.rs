//! Controller configuration and its validation.

use embassy_time::Duration;

/// Default upper bound of the brightness range
pub const DEFAULT_MAX_BRIGHTNESS: u16 = 255;
/// Default time to ramp from 0 to the maximum brightness. Fast up.
pub const DEFAULT_BRIGHTEN_DURATION: Duration = Duration::from_millis(1000);
/// Default time to ramp from the maximum brightness to 0. Slow down.
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(30 * 1000);
/// Default time the light stays at maximum brightness
pub const DEFAULT_HOLD_DURATION: Duration = Duration::from_millis(60 * 1000);

/// Default PWM range
pub const DEFAULT_PWM_RANGE: u16 = 255;
/// Default PWM frequency (1 kHz)
pub const DEFAULT_PWM_FREQUENCY_HZ: u32 = 1000;
/// Lowest supported PWM frequency
pub const MIN_PWM_FREQUENCY_HZ: u32 = 100;
/// Highest supported PWM frequency
pub const MAX_PWM_FREQUENCY_HZ: u32 = 40_000;

/// Rejected configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Maximum brightness of zero would make every ramp step divide by zero
    ZeroMaxBrightness,
    /// PWM range of zero
    ZeroPwmRange,
    /// PWM frequency outside of the supported band
    FrequencyOutOfRange { frequency_hz: u32 },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroMaxBrightness => f.write_str("max brightness must be at least 1"),
            ConfigError::ZeroPwmRange => f.write_str("PWM range must be at least 1"),
            ConfigError::FrequencyOutOfRange { frequency_hz } => write!(
                f,
                "PWM frequency {frequency_hz} Hz is outside {MIN_PWM_FREQUENCY_HZ}..={MAX_PWM_FREQUENCY_HZ} Hz"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// PWM peripheral settings applied once by `begin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmConfig {
    range: u16,
    frequency_hz: u32,
}

impl PwmConfig {
    /// Create a validated PWM config
    pub const fn new(range: u16, frequency_hz: u32) -> Result<Self, ConfigError> {
        if range == 0 {
            return Err(ConfigError::ZeroPwmRange);
        }
        if frequency_hz < MIN_PWM_FREQUENCY_HZ || frequency_hz > MAX_PWM_FREQUENCY_HZ {
            return Err(ConfigError::FrequencyOutOfRange { frequency_hz });
        }
        Ok(Self {
            range,
            frequency_hz,
        })
    }

    /// Highest level the output accepts
    pub const fn range(self) -> u16 {
        self.range
    }

    /// PWM carrier frequency
    pub const fn frequency_hz(self) -> u32 {
        self.frequency_hz
    }
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            range: DEFAULT_PWM_RANGE,
            frequency_hz: DEFAULT_PWM_FREQUENCY_HZ,
        }
    }
}

/// Durations of the three lit phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampTimings {
    /// Full ramp from 0 to max
    pub brighten: Duration,
    /// Full ramp from max to 0
    pub fade: Duration,
    /// Time spent at max before fading
    pub hold: Duration,
}

impl Default for RampTimings {
    fn default() -> Self {
        Self {
            brighten: DEFAULT_BRIGHTEN_DURATION,
            fade: DEFAULT_FADE_DURATION,
            hold: DEFAULT_HOLD_DURATION,
        }
    }
}

/// Configuration for the brightness controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub pwm: PwmConfig,
    pub max_brightness: u16,
    pub timings: RampTimings,
}

impl ControllerConfig {
    /// Check the config against the invariants the controller relies on
    pub const fn validate(&self) -> Result<(), ConfigError> {
        check_max_brightness(self.max_brightness)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            pwm: PwmConfig::default(),
            max_brightness: DEFAULT_MAX_BRIGHTNESS,
            timings: RampTimings::default(),
        }
    }
}

pub(crate) const fn check_max_brightness(max: u16) -> Result<(), ConfigError> {
    if max == 0 {
        return Err(ConfigError::ZeroMaxBrightness);
    }
    Ok(())
}
