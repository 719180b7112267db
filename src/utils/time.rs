use std::time::Duration;

/// A measurement of a monotonically nondecreasing clock, in milliseconds.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    #[inline]
    pub fn from_millis(millis: u64) -> Timestamp {
        Timestamp(millis)
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }
}

impl std::ops::Sub for Timestamp {
    type Output = Duration;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        Duration::from_millis(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Self::Output {
        let millis = rhs.as_secs() * 1000 + u64::from(rhs.subsec_millis());
        Timestamp(self.0 + millis)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Timestamp::from_millis(100);
        let b = a + Duration::from_millis(66);
        assert_eq!(b.as_millis(), 166);
        assert_eq!(b - a, Duration::from_millis(66));
        assert_eq!(a - b, Duration::from_millis(0));
    }
}
