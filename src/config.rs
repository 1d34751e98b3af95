//! Game tuning: speed curve, scoring, obstacles, input and presentation timing.

use crate::input::Polarity;

/// A buzzer tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    /// Frequency in hertz.
    pub frequency_hz: u16,

    /// Length in milliseconds.
    pub duration_ms: u16,
}

impl Tone {
    /// Creates a tone.
    #[inline]
    pub const fn new(frequency_hz: u16, duration_ms: u16) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A step delay of zero ticks.
    ZeroStepDelay,

    /// Minimum step delay above the initial one.
    MinAboveInitial,

    /// Food worth zero points.
    ZeroFoodScore,

    /// Speed-up threshold of zero points.
    ZeroSpeedUpThreshold,

    /// Debounce threshold of zero samples.
    ZeroDebounceThreshold,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroStepDelay => {
                write!(f, "step delays must be at least one tick")
            }
            ConfigError::MinAboveInitial => {
                write!(f, "minimum step delay must not exceed the initial step delay")
            }
            ConfigError::ZeroFoodScore => {
                write!(f, "food must be worth at least one point")
            }
            ConfigError::ZeroSpeedUpThreshold => {
                write!(f, "speed-up threshold must be at least one point")
            }
            ConfigError::ZeroDebounceThreshold => {
                write!(f, "debounce threshold must be at least one sample")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated game configuration.
///
/// Durations in ticks drive the simulation; durations in milliseconds only
/// drive the blocking presentation delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    initial_step_delay: u8,
    min_step_delay: u8,
    food_score: u16,
    speed_up_every: u16,
    obstacle_count: u8,
    debounce_threshold: u8,
    polarity: Polarity,
    auto_restart: bool,
    pause_screen_ms: u32,
    game_over_ms: u32,
    growth_flashes: u8,
    growth_flash_ms: u32,
    eat_tone: Tone,
    crash_tone: Tone,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_step_delay: 24,
            min_step_delay: 10,
            food_score: 10,
            speed_up_every: 50,
            obstacle_count: 5,
            debounce_threshold: 1,
            polarity: Polarity::ActiveHigh,
            auto_restart: true,
            pause_screen_ms: 500,
            game_over_ms: 2000,
            growth_flashes: 3,
            growth_flash_ms: 100,
            eat_tone: Tone::new(1000, 100),
            crash_tone: Tone::new(500, 500),
        }
    }
}

impl GameConfig {
    /// Creates a builder starting from the default configuration.
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::new()
    }

    /// Ticks between snake steps at the start of a round.
    pub fn initial_step_delay(&self) -> u8 {
        self.initial_step_delay
    }

    /// Fastest allowed step delay.
    pub fn min_step_delay(&self) -> u8 {
        self.min_step_delay
    }

    /// Points awarded per food.
    pub fn food_score(&self) -> u16 {
        self.food_score
    }

    /// The step delay drops by one each time the score reaches a multiple of this.
    pub fn speed_up_every(&self) -> u16 {
        self.speed_up_every
    }

    /// Obstacle placement attempts per round.
    pub fn obstacle_count(&self) -> u8 {
        self.obstacle_count
    }

    /// Consecutive samples needed before a button changes state.
    pub fn debounce_threshold(&self) -> u8 {
        self.debounce_threshold
    }

    /// Button polarity.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Whether a crash starts the next round without waiting for restart.
    pub fn auto_restart(&self) -> bool {
        self.auto_restart
    }

    /// How long each paused tick holds the pause screen.
    pub fn pause_screen_ms(&self) -> u32 {
        self.pause_screen_ms
    }

    /// How long the game-over screen stays up.
    pub fn game_over_ms(&self) -> u32 {
        self.game_over_ms
    }

    /// Number of flashes in the growth animation.
    pub fn growth_flashes(&self) -> u8 {
        self.growth_flashes
    }

    /// On and off time of one growth flash.
    pub fn growth_flash_ms(&self) -> u32 {
        self.growth_flash_ms
    }

    /// Tone played when food is eaten.
    pub fn eat_tone(&self) -> Tone {
        self.eat_tone
    }

    /// Tone played on a crash.
    pub fn crash_tone(&self) -> Tone {
        self.crash_tone
    }
}

/// Builder for constructing a validated [`GameConfig`].
#[derive(Debug, Clone)]
pub struct GameConfigBuilder {
    config: GameConfig,
}

impl Default for GameConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfigBuilder {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
        }
    }

    /// Sets the ticks between steps at the start of a round.
    pub fn initial_step_delay(mut self, ticks: u8) -> Self {
        self.config.initial_step_delay = ticks;
        self
    }

    /// Sets the fastest allowed step delay.
    pub fn min_step_delay(mut self, ticks: u8) -> Self {
        self.config.min_step_delay = ticks;
        self
    }

    /// Sets the points awarded per food.
    pub fn food_score(mut self, points: u16) -> Self {
        self.config.food_score = points;
        self
    }

    /// Sets the score interval at which the game speeds up.
    pub fn speed_up_every(mut self, points: u16) -> Self {
        self.config.speed_up_every = points;
        self
    }

    /// Sets the number of obstacle placement attempts per round.
    pub fn obstacle_count(mut self, count: u8) -> Self {
        self.config.obstacle_count = count;
        self
    }

    /// Sets the debounce threshold in samples.
    pub fn debounce_threshold(mut self, samples: u8) -> Self {
        self.config.debounce_threshold = samples;
        self
    }

    /// Sets the button polarity.
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.config.polarity = polarity;
        self
    }

    /// Sets whether a crash restarts the round on its own.
    pub fn auto_restart(mut self, enabled: bool) -> Self {
        self.config.auto_restart = enabled;
        self
    }

    /// Sets the pause screen hold time.
    pub fn pause_screen_ms(mut self, ms: u32) -> Self {
        self.config.pause_screen_ms = ms;
        self
    }

    /// Sets the game-over screen hold time.
    pub fn game_over_ms(mut self, ms: u32) -> Self {
        self.config.game_over_ms = ms;
        self
    }

    /// Sets the growth animation's flash count and per-phase time.
    pub fn growth_animation(mut self, flashes: u8, flash_ms: u32) -> Self {
        self.config.growth_flashes = flashes;
        self.config.growth_flash_ms = flash_ms;
        self
    }

    /// Sets the tone played when food is eaten.
    pub fn eat_tone(mut self, tone: Tone) -> Self {
        self.config.eat_tone = tone;
        self
    }

    /// Sets the tone played on a crash.
    pub fn crash_tone(mut self, tone: Tone) -> Self {
        self.config.crash_tone = tone;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `ZeroStepDelay` - The initial or minimum step delay is zero
    /// * `MinAboveInitial` - The minimum step delay exceeds the initial one
    /// * `ZeroFoodScore` - Food is worth zero points
    /// * `ZeroSpeedUpThreshold` - The speed-up threshold is zero
    /// * `ZeroDebounceThreshold` - The debounce threshold is zero
    pub fn build(self) -> Result<GameConfig, ConfigError> {
        let config = self.config;

        if config.initial_step_delay == 0 || config.min_step_delay == 0 {
            return Err(ConfigError::ZeroStepDelay);
        }

        if config.min_step_delay > config.initial_step_delay {
            return Err(ConfigError::MinAboveInitial);
        }

        // A score stuck at zero is a multiple of every speed-up threshold.
        if config.food_score == 0 {
            return Err(ConfigError::ZeroFoodScore);
        }

        if config.speed_up_every == 0 {
            return Err(ConfigError::ZeroSpeedUpThreshold);
        }

        if config.debounce_threshold == 0 {
            return Err(ConfigError::ZeroDebounceThreshold);
        }

        Ok(config)
    }
}
