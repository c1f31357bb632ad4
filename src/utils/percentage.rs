use std::fmt::Display;

/// A ratio shown to the user as a whole percentage, `0.5` renders as `50%`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.)
    }
}

impl Percentage {
    /// Builds a percentage out of a ratio that is known to be non negative.
    pub fn from_ratio(ratio: f64) -> Percentage {
        Percentage(ratio.max(0.))
    }
}

#[cfg(test)]
mod tests {
    use super::Percentage;

    #[test]
    fn renders_whole_percent() {
        assert_eq!(Percentage::from_ratio(0.5).to_string(), "50%");
        assert_eq!(Percentage::from_ratio(1.).to_string(), "100%");
        assert_eq!(Percentage::from_ratio(0.).to_string(), "0%");
        assert_eq!(Percentage::from_ratio(1. / 3.).to_string(), "33%");
    }
}
