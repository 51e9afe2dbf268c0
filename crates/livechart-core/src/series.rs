// File: crates/livechart-core/src/series.rs
// Summary: Candle and Series model for one (instrument, interval) price sequence.
// Notes:
// - `t` is UTC epoch seconds. Candles are kept in ascending `t` order.
// - OHLC invariants are assumed from providers; the CSV loader checks them
//   with `Candle::try_new`.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Candle {
    pub t: f64, // epoch seconds (UTC)
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
}

impl Candle {
    pub const fn new(t: f64, o: f64, h: f64, l: f64, c: f64) -> Self {
        Self { t, o, h, l, c }
    }

    /// Try to construct a candle enforcing OHLC invariants:
    /// l <= min(o,c) and h >= max(o,c), and l <= h.
    pub fn try_new(t: f64, o: f64, h: f64, l: f64, c: f64) -> Result<Self, &'static str> {
        let lo = o.min(c);
        let hi = o.max(c);
        if l > lo { return Err("low above min(open,close)"); }
        if h < hi { return Err("high below max(open,close)"); }
        if l > h { return Err("low above high"); }
        Ok(Self { t, o, h, l, c })
    }

    /// Body top, i.e. max(open, close).
    #[inline]
    pub fn body_high(&self) -> f64 { self.o.max(self.c) }

    /// Body bottom, i.e. min(open, close).
    #[inline]
    pub fn body_low(&self) -> f64 { self.o.min(self.c) }

    #[inline]
    pub fn is_up(&self) -> bool { self.c >= self.o }

    pub fn is_finite(&self) -> bool {
        self.t.is_finite() && self.o.is_finite() && self.h.is_finite() && self.l.is_finite() && self.c.is_finite()
    }
}

/// Ordered candles for one (instrument, interval) pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    candles: Vec<Candle>,
}

impl Series {
    pub fn new() -> Self {
        Self { candles: Vec::new() }
    }

    pub fn from_candles(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn candles(&self) -> &[Candle] { &self.candles }

    pub fn len(&self) -> usize { self.candles.len() }

    pub fn is_empty(&self) -> bool { self.candles.is_empty() }

    pub fn push(&mut self, candle: Candle) { self.candles.push(candle); }

    pub fn iter(&self) -> std::slice::Iter<'_, Candle> { self.candles.iter() }

    pub fn last(&self) -> Option<&Candle> { self.candles.last() }

    /// Lowest low and highest high across the series, `None` when empty.
    pub fn price_extent(&self) -> Option<(f64, f64)> {
        if self.candles.is_empty() { return None; }
        let mut min_p = f64::INFINITY;
        let mut max_p = f64::NEG_INFINITY;
        for k in &self.candles {
            min_p = min_p.min(k.l);
            max_p = max_p.max(k.h);
        }
        Some((min_p, max_p))
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;
    fn into_iter(self) -> Self::IntoIter { self.candles.iter() }
}

impl FromIterator<Candle> for Series {
    fn from_iter<I: IntoIterator<Item = Candle>>(iter: I) -> Self {
        Self { candles: iter.into_iter().collect() }
    }
}
