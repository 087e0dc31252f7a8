use std::fmt;

/// How the confidence badge is styled on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Confidence of the ensemble verdict, bucketed from its top probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Buckets a percentage in `0.0..=100.0`: above 80 is high, above 60 is
    /// medium, anything else (NaN included) is low.
    pub fn from_percent(percent: f64) -> Self {
        if percent > 80.0 {
            Self::High
        } else if percent > 60.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Badge text shown next to the percentage
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "Tinggi",
            Self::Medium => "Sedang",
            Self::Low => "Rendah",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::High => Severity::Success,
            Self::Medium => Severity::Warning,
            Self::Low => Severity::Error,
        }
    }

    pub fn badge(&self) -> (&'static str, Severity) {
        (self.label(), self.severity())
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shorthand for [`ConfidenceTier::from_percent`].
pub fn confidence_tier(percent: f64) -> ConfidenceTier {
    ConfidenceTier::from_percent(percent)
}
