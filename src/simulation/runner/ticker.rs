use std::time::Duration;

/// Fixed-rate tick accumulator.
///
/// Elapsed wall time is added to a leftover budget; every whole tick period
/// in the budget becomes one tick, up to `max_ticks_per_frame`. Backlog past
/// the cap is dropped so a stalled host does not replay seconds of ticks.
#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    max_ticks_per_frame: u32,
    leftover: Duration,
}

impl Ticker {
    pub fn new(ticks_per_second: u32, max_ticks_per_frame: u32) -> Self {
        let tps = ticks_per_second.max(1);
        Self {
            period: Duration::from_secs(1) / tps,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            leftover: Duration::ZERO,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    pub fn leftover(&self) -> Duration {
        self.leftover
    }

    /// Add `elapsed` and return how many ticks are due now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.leftover += elapsed;
        let mut ticks = 0;
        while self.leftover >= self.period && ticks < self.max_ticks_per_frame {
            self.leftover -= self.period;
            ticks += 1;
        }
        if ticks == self.max_ticks_per_frame && self.leftover >= self.period {
            // keep only the partial tick
            self.leftover = Duration::from_nanos(
                (self.leftover.as_nanos() % self.period.as_nanos().max(1)) as u64,
            );
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.leftover = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_frames_accumulate_into_one_tick() {
        let mut ticker = Ticker::new(60, 1);
        assert_eq!(ticker.period(), Duration::from_nanos(16_666_666));
        assert_eq!(ticker.advance(Duration::from_millis(10)), 0);
        assert_eq!(ticker.advance(Duration::from_millis(10)), 1);
        assert_eq!(ticker.leftover(), Duration::from_nanos(3_333_334));
    }

    #[test]
    fn backlog_beyond_the_cap_is_dropped() {
        let mut ticker = Ticker::new(10, 2);
        // 5.5 periods: two ticks now, half a period carried
        assert_eq!(ticker.advance(Duration::from_millis(550)), 2);
        assert_eq!(ticker.leftover(), Duration::from_millis(50));
        assert_eq!(ticker.advance(Duration::from_millis(50)), 1);
        assert_eq!(ticker.leftover(), Duration::ZERO);
    }

    #[test]
    fn zero_rates_are_clamped() {
        let mut ticker = Ticker::new(0, 0);
        assert_eq!(ticker.period(), Duration::from_secs(1));
        assert_eq!(ticker.advance(Duration::from_secs(3)), 1);
    }
}
