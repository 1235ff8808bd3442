/// Star widget for an average review score on a 0-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StarRating {
    pub filled: u8,
    pub half: bool,
    /// Blank stars drawn underneath; always the full scale.
    pub base: u8,
}

pub const MAX_STARS: u8 = 5;

impl StarRating {
    pub fn from_average(average: f64) -> Self {
        let average = if average.is_nan() {
            0.0
        } else {
            average.clamp(0.0, f64::from(MAX_STARS))
        };
        let whole = average.floor();
        Self {
            filled: whole as u8,
            half: average - whole >= 0.5,
            base: MAX_STARS,
        }
    }
}
