use ethers::types::U256;
use ethers::utils::format_units;
use std::fmt;
use std::num::ParseFloatError;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ReadingError {
    #[error("could not format {0} wei as gwei: {1}")]
    Format(U256, String),

    #[error("could not parse the gwei amount: {0}")]
    Parse(#[from] ParseFloatError),
}

/// Gas price in gwei.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct GasReading {
    pub gwei: f64,
}

impl GasReading {
    pub fn new(gwei: f64) -> GasReading {
        GasReading { gwei }
    }

    /// Converts a wei amount to gwei, keeping every decimal `format_units`
    /// produces.
    pub fn from_wei(wei: U256) -> Result<GasReading, ReadingError> {
        let gwei = format_units(wei, "gwei")
            .map_err(|err| ReadingError::Format(wei, err.to_string()))?
            .parse::<f64>()?;
        Ok(GasReading { gwei })
    }
}

impl fmt::Display for GasReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} Gwei", self.gwei)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Difference between two consecutive readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    pub delta: f64, // current - previous, in gwei
}

impl PriceChange {
    pub fn between(previous: GasReading, current: GasReading) -> PriceChange {
        PriceChange {
            delta: current.gwei - previous.gwei,
        }
    }

    // A zero delta is shown as a decrease.
    pub fn direction(&self) -> Direction {
        if self.delta > 0. {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

impl fmt::Display for PriceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction() {
            Direction::Up => "⬆️",
            Direction::Down => "⬇️",
        };
        write!(f, "{} {:.6} Gwei", arrow, self.delta.abs())
    }
}

/// A successful reading together with its change against the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub reading: GasReading,
    pub change: Option<PriceChange>,
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.change {
            Some(change) => write!(f, "{}  {}", self.reading, change),
            None => write!(f, "{}  —", self.reading),
        }
    }
}
