//! Severity label classification
//!
//! Only the exact labels `High` and `Medium` are recognized. Anything else,
//! including lowercase spellings and typos, is shown with the Low variant.

use std::fmt;

/// Visual variant applied to the severity badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityVariant {
    High,
    Medium,
    Low,
}

impl SeverityVariant {
    pub const ALL: [SeverityVariant; 3] = [
        SeverityVariant::High,
        SeverityVariant::Medium,
        SeverityVariant::Low,
    ];

    /// Style class carried by the badge element
    pub fn class_name(&self) -> &'static str {
        match self {
            SeverityVariant::High => "severity-high",
            SeverityVariant::Medium => "severity-medium",
            SeverityVariant::Low => "severity-low",
        }
    }
}

impl fmt::Display for SeverityVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityVariant::High => write!(f, "High"),
            SeverityVariant::Medium => write!(f, "Medium"),
            SeverityVariant::Low => write!(f, "Low"),
        }
    }
}

/// Badge text plus the variant to style it with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub display_text: String,
    pub variant: SeverityVariant,
}

/// Map a severity label to its badge presentation.
///
/// The display text always echoes the input label verbatim, even when the
/// variant falls back to Low.
pub fn classify(label: &str) -> Classification {
    let variant = match label {
        "High" => SeverityVariant::High,
        "Medium" => SeverityVariant::Medium,
        _ => SeverityVariant::Low,
    };

    Classification {
        display_text: format!("Severity: {}", label),
        variant,
    }
}
