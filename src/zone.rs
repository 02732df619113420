/// Page background color derived from the availability zone suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneColor {
    Green,
    Blue,
    Orange,
    Red,
}

impl ZoneColor {
    /// Maps a zone string to its color.
    ///
    /// Only the final character matters: `a`, `b`, and `c` get their own
    /// colors, everything else (unknown letters, the empty string) is red.
    pub fn for_zone(zone: &str) -> Self {
        match zone.chars().last() {
            Some('a') => Self::Green,
            Some('b') => Self::Blue,
            Some('c') => Self::Orange,
            _ => Self::Red,
        }
    }

    /// CSS color name used in the page's `<style>` rule.
    pub fn css(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_zone_letters_to_colors() {
        assert_eq!(ZoneColor::for_zone("us-east-1a"), ZoneColor::Green);
        assert_eq!(ZoneColor::for_zone("us-east-1b"), ZoneColor::Blue);
        assert_eq!(ZoneColor::for_zone("sa-east-1c"), ZoneColor::Orange);
    }

    #[test]
    fn unknown_letters_fall_back_to_red() {
        assert_eq!(ZoneColor::for_zone("us-east-1d"), ZoneColor::Red);
        assert_eq!(ZoneColor::for_zone("x"), ZoneColor::Red);
        assert_eq!(ZoneColor::for_zone("us-east-1"), ZoneColor::Red);
    }

    #[test]
    fn empty_zone_falls_back_to_red() {
        assert_eq!(ZoneColor::for_zone(""), ZoneColor::Red);
    }

    #[test]
    fn only_the_final_character_counts() {
        assert_eq!(ZoneColor::for_zone("a"), ZoneColor::Green);
        assert_eq!(ZoneColor::for_zone("completely-made-up-b"), ZoneColor::Blue);
    }

    #[test]
    fn css_names_match_variants() {
        assert_eq!(ZoneColor::Green.css(), "green");
        assert_eq!(ZoneColor::Blue.css(), "blue");
        assert_eq!(ZoneColor::Orange.css(), "orange");
        assert_eq!(ZoneColor::Red.css(), "red");
    }
}
