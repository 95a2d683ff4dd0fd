use std::fmt;

pub const FIRST_DAY: i32 = 1;
pub const LAST_DAY: i32 = 25;
pub const PART_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(u8);

impl Day {
    pub fn new(value: i32) -> Result<Self, DayError> {
        if !(FIRST_DAY..=LAST_DAY).contains(&value) {
            return Err(DayError::OutOfRange { value });
        }
        Ok(Self(value as u8))
    }

    pub fn all() -> impl Iterator<Item = Day> {
        (FIRST_DAY..=LAST_DAY).map(|value| Day(value as u8))
    }

    pub fn get(self) -> i32 {
        self.0 as i32
    }

    pub fn label(self) -> String {
        format!("Day {}", self.0)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for Day {
    type Err = DayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = parse_day_value(value).ok_or_else(|| DayError::NotANumber {
            raw: value.to_string(),
        })?;
        Self::new(parsed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DayError {
    #[error("day must be between 1 and 25, got {value}")]
    OutOfRange { value: i32 },
    #[error("day '{raw}' is not a number")]
    NotANumber { raw: String },
}

// Parses a selector value the way `parseInt` does: leading whitespace, an
// optional sign and the leading digit run. Trailing garbage is ignored.
pub fn parse_day_value(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = rest[..digits_len].parse().ok()?;
    let value = if negative { -value } else { value };
    i32::try_from(value).ok()
}

pub fn part_slot(part: i32, slot_count: usize) -> Option<usize> {
    if part < 1 {
        return None;
    }
    let slot = (part - 1) as usize;
    (slot < slot_count).then_some(slot)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImplementedDays(Vec<Day>);

impl ImplementedDays {
    pub fn probe<F>(mut supported: F) -> Self
    where
        F: FnMut(Day) -> bool,
    {
        Self(Day::all().filter(|day| supported(*day)).collect())
    }

    pub fn contains(&self, value: i32) -> bool {
        self.0.iter().any(|day| day.get() == value)
    }

    pub fn find(&self, value: i32) -> Option<Day> {
        self.0.iter().copied().find(|day| day.get() == value)
    }

    pub fn as_slice(&self) -> &[Day] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Day> for ImplementedDays {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        let mut days: Vec<Day> = iter.into_iter().collect();
        days.sort();
        days.dedup();
        Self(days)
    }
}
