//! Brightness state machine.
//!
//! The controller walks through `Off -> Brighten -> On -> Fade -> Off` one
//! brightness unit at a time. Nothing here blocks: every step is gated by a
//! [`Deadline`] and the host is expected to call [`BrightnessController::process`]
//! as often as it can.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::clock::{Clock, Deadline};
use crate::config::{ConfigError, ControllerConfig, PwmConfig, RampTimings, check_max_brightness};
use crate::observer::{NoObserver, StateObserver};
use crate::trigger::ActivationTrigger;
use crate::{LightState, OutputDriver};

/// Fade-in, hold, fade-out controller for a single output
///
/// Generic over the output driver, the clock and the state observer.
pub struct BrightnessController<O: OutputDriver, C: Clock, S: StateObserver = NoObserver> {
    // External dependencies
    output: O,
    clock: C,
    observer: S,

    // Configuration
    pwm: PwmConfig,
    timings: RampTimings,
    max_brightness: u16,

    // Internal state
    state: LightState,
    brightness: u16,
    last_written: u16,
    deadline: Deadline,
}

impl<O: OutputDriver, C: Clock> BrightnessController<O, C> {
    /// Create a controller with default settings
    pub fn new(output: O, clock: C) -> Self {
        Self::from_valid_config(output, clock, ControllerConfig::default())
    }

    /// Create a controller with a custom PWM range and frequency
    ///
    /// The maximum brightness keeps its default whatever the range is.
    pub fn with_pwm(output: O, clock: C, pwm: PwmConfig) -> Self {
        let config = ControllerConfig {
            pwm,
            ..ControllerConfig::default()
        };
        Self::from_valid_config(output, clock, config)
    }

    /// Create a controller from a full configuration
    pub fn with_config(output: O, clock: C, config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(output, clock, config))
    }

    fn from_valid_config(output: O, clock: C, config: ControllerConfig) -> Self {
        Self {
            output,
            clock,
            observer: NoObserver,
            pwm: config.pwm,
            timings: config.timings,
            max_brightness: config.max_brightness,
            state: LightState::Off,
            brightness: 0,
            last_written: 0,
            deadline: Deadline::default(),
        }
    }
}

impl<O: OutputDriver, C: Clock, S: StateObserver> BrightnessController<O, C, S> {
    /// Replace the observer slot
    pub fn with_observer<T: StateObserver>(self, observer: T) -> BrightnessController<O, C, T> {
        BrightnessController {
            output: self.output,
            clock: self.clock,
            observer,
            pwm: self.pwm,
            timings: self.timings,
            max_brightness: self.max_brightness,
            state: self.state,
            brightness: self.brightness,
            last_written: self.last_written,
            deadline: self.deadline,
        }
    }

    /// Configure the output and switch it off
    ///
    /// Call once before driving the controller.
    pub fn begin(&mut self) {
        self.output.configure(self.pwm);
        self.brightness = 0;
        self.last_written = 0;
        if self.state != LightState::Off {
            self.change_state(LightState::Off);
        }
        self.output.write(0);
    }

    /// Advance the state machine
    ///
    /// Call this continuously from the host loop. Returns immediately when the
    /// light is off or the next step is not due yet.
    pub fn process(&mut self) {
        if !self.state.is_lit() {
            return;
        }
        self.step(false);
        self.flush();
    }

    /// Request light
    ///
    /// With `immediate == false` the light ramps up from its current level, or
    /// has its hold time extended if it is already on. With `immediate == true`
    /// it jumps straight to the maximum brightness and starts holding.
    pub fn activate(&mut self, immediate: bool) {
        if immediate {
            self.light_up_now();
        } else {
            self.step(true);
        }
        self.flush();
    }

    /// Apply a pending request from `trigger`, then [`process`](Self::process)
    ///
    /// Runs in the polling context. Only the trigger is shared with other
    /// contexts; the controller itself must not be touched from an interrupt.
    pub fn poll(&mut self, trigger: &ActivationTrigger) {
        if let Some(immediate) = trigger.take() {
            self.activate(immediate);
        }
        self.process();
    }

    /// Time until the next step is due
    ///
    /// Returns `None` while off, since nothing happens until activation.
    pub fn next_step_in(&self) -> Option<Duration> {
        if !self.state.is_lit() {
            return None;
        }
        Some(self.deadline.remaining(self.clock.now_millis()))
    }

    pub const fn state(&self) -> LightState {
        self.state
    }

    /// Current brightness level
    pub const fn brightness(&self) -> u16 {
        self.brightness
    }

    pub const fn pwm(&self) -> PwmConfig {
        self.pwm
    }

    pub const fn timings(&self) -> RampTimings {
        self.timings
    }

    pub const fn max_brightness(&self) -> u16 {
        self.max_brightness
    }

    /// Set the upper bound of the brightness range
    ///
    /// While on, the brightness follows the new maximum right away. While
    /// ramping, the level is only clamped if it would exceed the new maximum.
    /// Zero is rejected and the previous maximum is kept.
    pub fn set_max_brightness(&mut self, max_brightness: u16) -> Result<(), ConfigError> {
        check_max_brightness(max_brightness)?;
        if self.max_brightness == max_brightness {
            return Ok(());
        }
        self.max_brightness = max_brightness;
        if self.state == LightState::On {
            self.brightness = max_brightness;
        } else {
            self.brightness = self.brightness.min(max_brightness);
        }
        Ok(())
    }

    pub const fn brighten_duration(&self) -> Duration {
        self.timings.brighten
    }

    pub fn set_brighten_duration(&mut self, duration: Duration) {
        self.timings.brighten = duration;
    }

    pub const fn fade_duration(&self) -> Duration {
        self.timings.fade
    }

    pub fn set_fade_duration(&mut self, duration: Duration) {
        self.timings.fade = duration;
    }

    pub const fn hold_duration(&self) -> Duration {
        self.timings.hold
    }

    pub fn set_hold_duration(&mut self, duration: Duration) {
        self.timings.hold = duration;
    }

    /// Get a reference to the output driver
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output driver
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Get a reference to the observer
    pub fn observer(&self) -> &S {
        &self.observer
    }

    /// Get a mutable reference to the observer
    pub fn observer_mut(&mut self) -> &mut S {
        &mut self.observer
    }

    /// Run one time-gated step of the state machine
    fn step(&mut self, activate: bool) {
        let now = self.clock.now_millis();
        if !activate && !self.deadline.is_due(now) {
            return;
        }

        match self.state {
            LightState::Off => {
                if activate {
                    self.deadline = Deadline::at(now);
                    self.change_state(LightState::Brighten);
                }
            }
            LightState::Brighten => {
                if self.brightness >= self.max_brightness {
                    self.enter_on(now);
                    return;
                }
                self.brightness += 1;
                self.deadline = Deadline::after(now, self.step_delay(self.timings.brighten));
                if self.brightness >= self.max_brightness {
                    self.enter_on(now);
                }
            }
            LightState::On => {
                if activate {
                    #[cfg(feature = "esp32-log")]
                    println!("[BrightnessController.step] extending hold");
                    self.deadline = Deadline::after(now, self.timings.hold);
                    return;
                }
                self.deadline = Deadline::at(now);
                self.change_state(LightState::Fade);
            }
            LightState::Fade => {
                if activate {
                    self.deadline = Deadline::at(now);
                    self.change_state(LightState::Brighten);
                    return;
                }
                if self.brightness == 0 {
                    self.change_state(LightState::Off);
                    return;
                }
                self.brightness -= 1;
                self.deadline = Deadline::after(now, self.step_delay(self.timings.fade));
                if self.brightness == 0 {
                    self.change_state(LightState::Off);
                }
            }
        }
    }

    /// Skip the ramp and hold at full brightness
    fn light_up_now(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[BrightnessController.activate] immediate");
        let now = self.clock.now_millis();
        self.enter_on(now);
    }

    fn enter_on(&mut self, now: u32) {
        self.brightness = self.max_brightness;
        self.deadline = Deadline::after(now, self.timings.hold);
        if self.state != LightState::On {
            self.change_state(LightState::On);
        }
    }

    /// Delay between two single-unit steps of a ramp lasting `total`
    fn step_delay(&self, total: Duration) -> Duration {
        Duration::from_millis(total.as_millis() / u64::from(self.max_brightness))
    }

    /// Write the brightness if it changed since the last write
    fn flush(&mut self) {
        if self.brightness == self.last_written {
            return;
        }
        #[cfg(feature = "esp32-log")]
        println!(
            "[BrightnessController.flush] brightness {:?}",
            self.brightness
        );
        self.output.write(self.brightness);
        self.last_written = self.brightness;
    }

    fn change_state(&mut self, state: LightState) {
        #[cfg(feature = "esp32-log")]
        println!(
            "[BrightnessController.change_state] {:?} -> {:?}",
            self.state.as_str(),
            state.as_str()
        );
        self.state = state;
        self.observer.on_state_changed(state);
    }
}
