use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A wire string that does not match any known enum value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for {field}: {value}")]
pub struct InvalidEnumValue {
    pub field: &'static str,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnumValue {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(EvaluationStatus {
    Completed => "COMPLETED",
    Pending => "PENDING",
    Cancelled => "CANCELLED",
});

// Records persisted before the status column existed carry no status;
// they read as completed everywhere (display and counting).
impl Default for EvaluationStatus {
    fn default() -> Self {
        Self::Completed
    }
}

impl EvaluationStatus {
    /// Display label shown in status badges and the filter dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completada",
            Self::Pending => "Pendiente",
            Self::Cancelled => "Cancelada",
        }
    }
}

/// Derived classification of an assessment area, never on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaStatus {
    Unassessed,
    Normal,
    NeedsAttention,
}

impl AreaStatus {
    /// Display label for area summary chips.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unassessed => "No evaluado",
            Self::Normal => "Normal",
            Self::NeedsAttention => "Requiere atención",
        }
    }
}
