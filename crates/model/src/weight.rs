/// Whether high or low raw values of a variable count as high priority.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Polarity {
    /// Lower raw values rank higher.
    Less,
    /// The variable contributes nothing (magnitude is irrelevant).
    Neutral,
    /// Higher raw values rank higher.
    More,
}

impl Polarity {
    pub fn sign(self) -> i32 {
        match self {
            Polarity::Less => -1,
            Polarity::Neutral => 0,
            Polarity::More => 1,
        }
    }

    pub fn from_sign(value: i32) -> Self {
        match value.signum() {
            -1 => Polarity::Less,
            0 => Polarity::Neutral,
            _ => Polarity::More,
        }
    }
}

/// Effective weight of a variable: importance magnitude times polarity sign.
pub fn effective_weight(magnitude: i32, polarity: Polarity) -> i32 {
    magnitude.abs() * polarity.sign()
}

/// A weight control value: one of the fixed catalog choices, or a free-form
/// custom entry. Resolved by membership check, never by trying one
/// interpretation and catching a failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WeightValue {
    Catalog(i32),
    Custom(i32),
}

impl WeightValue {
    pub fn resolve(raw: i32, choices: &[i32]) -> Self {
        if choices.contains(&raw) {
            WeightValue::Catalog(raw)
        } else {
            WeightValue::Custom(raw)
        }
    }

    pub fn value(self) -> i32 {
        match self {
            WeightValue::Catalog(v) | WeightValue::Custom(v) => v,
        }
    }
}
