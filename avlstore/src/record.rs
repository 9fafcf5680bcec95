use std::fmt;

use crate::keys::identifier::Identifier;

/// A keyed payload. The identifier orders the record inside a tree; the value rides along.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record<V> {
    id: Identifier,
    value: V,
}

impl<V> Record<V> {
    pub fn new<K: Into<Identifier>>(id: K, value: V) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }

    #[inline]
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_parts(self) -> (Identifier, V) {
        (self.id, self.value)
    }
}

impl<V: fmt::Display> fmt::Display for Record<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.id, self.value)
    }
}

/// Letter grade for a percentage score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    F,
}

impl Grade {
    /// Maps a percentage to a grade. Only the `A+` band is capped at 100, so scores above
    /// 100 grade `A`. NaN grades `F`.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if (90.0..=100.0).contains(&s) => Grade::APlus,
            s if s >= 85.0 => Grade::A,
            s if s >= 80.0 => Grade::AMinus,
            s if s >= 77.0 => Grade::BPlus,
            s if s >= 73.0 => Grade::B,
            s if s >= 70.0 => Grade::BMinus,
            s if s >= 67.0 => Grade::CPlus,
            s if s >= 63.0 => Grade::C,
            s if s >= 60.0 => Grade::CMinus,
            s if s >= 57.0 => Grade::DPlus,
            s if s >= 53.0 => Grade::D,
            s if s >= 50.0 => Grade::DMinus,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bands() {
        let cases = [
            (100.0, "A+"),
            (90.0, "A+"),
            (89.9, "A"),
            (85.0, "A"),
            (80.0, "A-"),
            (77.5, "B+"),
            (73.0, "B"),
            (70.0, "B-"),
            (67.0, "C+"),
            (63.0, "C"),
            (60.0, "C-"),
            (57.0, "D+"),
            (53.0, "D"),
            (50.0, "D-"),
            (49.99, "F"),
            (0.0, "F"),
        ];
        for (score, expected) in cases {
            assert_eq!(Grade::from_score(score).as_str(), expected, "score {score}");
        }
    }

    #[test]
    fn test_grade_out_of_range() {
        assert_eq!(Grade::from_score(101.0), Grade::A);
        assert_eq!(Grade::from_score(-3.0), Grade::F);
        assert_eq!(Grade::from_score(f64::NAN), Grade::F);
    }

    #[test]
    fn test_record_display() {
        let r = Record::new("alice", 90.5);
        assert_eq!(r.to_string(), "alice,90.5");
        assert_eq!(r.id().as_str(), "alice");
        assert_eq!(*r.value(), 90.5);
    }
}
