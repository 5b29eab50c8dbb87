//! [§ 14.1 `:nth-child()`](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
//! [CSS Syntax § 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
//!
//! The `An+B` index test shared by `:nth-child`, `:nth-last-child`,
//! `:nth-of-type` and `:nth-last-of-type`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A compiled `An+B` expression.
///
/// "The An+B notation defines an integer step (A) and offset (B), and
/// represents the An+Bth elements in a list, for every positive integer or
/// zero value of n, with the first element in the list having index 1 (not 0)."
///
/// `odd`, `even` and plain integers are all expressed as the same shape:
/// `2n+1`, `2n` and `0n+B` respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NthFormula {
    /// The step, A.
    pub a: i32,
    /// The offset, B.
    pub b: i32,
}

impl NthFormula {
    /// `An+B`.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// `odd`, equivalent to `2n+1`.
    #[must_use]
    pub const fn odd() -> Self {
        Self::new(2, 1)
    }

    /// `even`, equivalent to `2n`.
    #[must_use]
    pub const fn even() -> Self {
        Self::new(2, 0)
    }

    /// A single fixed index, equivalent to `0n+B`.
    #[must_use]
    pub const fn index(b: i32) -> Self {
        Self::new(0, b)
    }

    /// Returns true if the 1-based `index` is `A*n + B` for some integer `n >= 0`.
    ///
    /// With A = 0 only index B matches. With a negative A the solutions are
    /// B, B+A, B+2A, ... down to 1, so the set is finite and may be empty.
    #[must_use]
    pub fn matches(self, index: usize) -> bool {
        let Ok(index) = i64::try_from(index) else {
            return false;
        };
        if index < 1 {
            return false;
        }

        let a = i64::from(self.a);
        let b = i64::from(self.b);
        if a == 0 {
            return index == b;
        }

        // n = (index - B) / A must be a non-negative integer
        let offset = index - b;
        offset % a == 0 && offset / a >= 0
    }
}

impl fmt::Display for NthFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.a, self.b) {
            (0, b) => write!(f, "{b}"),
            (a, b) => {
                match a {
                    1 => f.write_str("n")?,
                    -1 => f.write_str("-n")?,
                    a => write!(f, "{a}n")?,
                }
                if b > 0 {
                    write!(f, "+{b}")
                } else if b < 0 {
                    write!(f, "{b}")
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Returned when text is not a valid `An+B` expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid An+B expression '{0}'")]
pub struct ParseNthError(pub String);

impl FromStr for NthFormula {
    type Err = ParseNthError;

    /// Accepts `odd`, `even`, an integer, or `An+B` with any of the parts
    /// omitted (`n`, `-n+3`, `2n`, `+5`). Whitespace and ASCII case are ignored.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let error = || ParseNthError(raw.to_string());
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match compact.as_str() {
            "" => return Err(error()),
            "odd" => return Ok(Self::odd()),
            "even" => return Ok(Self::even()),
            _ => {}
        }

        let Some((a_part, b_part)) = compact.split_once('n') else {
            return compact.parse().map(Self::index).map_err(|_| error());
        };

        let a = match a_part {
            "" | "+" => 1,
            "-" => -1,
            _ => a_part.parse().map_err(|_| error())?,
        };

        let b = if b_part.is_empty() {
            0
        } else if b_part.starts_with(['+', '-']) {
            b_part.parse().map_err(|_| error())?
        } else {
            // "2n5" has no sign between the parts
            return Err(error());
        };

        Ok(Self::new(a, b))
    }
}
