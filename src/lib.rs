#![no_std]

pub mod clock;
pub mod config;
pub mod controller;
pub mod observer;
pub mod state;
pub mod trigger;

pub use clock::{Clock, Deadline, SystemClock};
pub use config::{ConfigError, ControllerConfig, PwmConfig, RampTimings};
pub use controller::BrightnessController;
pub use observer::{NoObserver, StateObserver, StateRecorder};
pub use state::LightState;
pub use trigger::ActivationTrigger;
pub use embassy_time::Duration;

/// Abstract dimmable output trait
///
/// Implement this trait to support different hardware platforms.
/// The controller is generic over this trait.
pub trait OutputDriver {
    /// Apply PWM range and frequency. Called once from `begin`.
    fn configure(&mut self, _pwm: PwmConfig) {}

    /// Write a brightness level to the output
    fn write(&mut self, level: u16);
}
