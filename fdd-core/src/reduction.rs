use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How the values of one group are reduced to a single number.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Mean,
    Sum,
}

impl Reduction {
    pub const ALL: [Reduction; 2] = [Reduction::Mean, Reduction::Sum];

    pub fn name(&self) -> &'static str {
        match self {
            Reduction::Mean => "mean",
            Reduction::Sum => "sum",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Reduction::Mean => "Average",
            Reduction::Sum => "Total",
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Reduction {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            _ => Err(DashError::invalid("reduction method", s, &["mean", "sum"])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_methods() {
        assert_eq!("mean".parse::<Reduction>().unwrap(), Reduction::Mean);
        assert_eq!("SUM".parse::<Reduction>().unwrap(), Reduction::Sum);
    }

    #[test]
    fn parse_unknown_method_is_invalid_argument() {
        assert!(matches!(
            "median".parse::<Reduction>(),
            Err(DashError::InvalidArgument(_))
        ));
    }
}
