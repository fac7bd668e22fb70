//! Binary and JSON wire formats.
//!
//! The binary layout is a run of big-endian `i64` words:
//!
//! | Type       | Words | Order                                                   |
//! |------------|-------|---------------------------------------------------------|
//! | `Datetime` | 8     | year, month, day, hour, minute, second, offset, weekday |
//! | `Period`   | 3     | years, months, days                                     |
//! | `Duration` | 4     | hours, minutes, seconds, nanoseconds                    |
//! | `Delta`    | 7     | period, then duration                                   |
//!
//! Decoding a datetime re-runs field validation and recomputes the weekday.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::warn;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Datetime, DatetimeFields, Delta, Duration, Period};

const WORD: usize = std::mem::size_of::<i64>();

/// A type with a fixed-size big-endian binary layout.
pub trait BinaryLayout: Sized {
    /// Number of `i64` words in the layout.
    const WORDS: usize;

    /// Appends the encoded value to `buf`.
    fn encode_into<B: BufMut>(&self, buf: &mut B);

    /// Reads one value from the front of `buf`.
    fn decode_from<B: Buf>(buf: &mut B) -> CoreResult<Self>;

    /// Encodes the value into a fresh buffer.
    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::WORDS * WORD);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Decodes a value that must occupy all of `bytes`.
    fn from_bytes(mut bytes: &[u8]) -> CoreResult<Self> {
        let value = Self::decode_from(&mut bytes)?;
        if bytes.has_remaining() {
            return Err(CoreError::decode(format!(
                "{} trailing bytes after value",
                bytes.remaining()
            )));
        }
        Ok(value)
    }
}

fn read_word<B: Buf>(buf: &mut B, field: &str) -> CoreResult<i64> {
    if buf.remaining() < WORD {
        return Err(CoreError::decode(format!(
            "truncated input reading {field}: {} bytes left",
            buf.remaining()
        )));
    }
    Ok(buf.get_i64())
}

impl BinaryLayout for Datetime {
    const WORDS: usize = 8;

    fn encode_into<B: BufMut>(&self, buf: &mut B) {
        let f = self.fields();
        for word in [
            f.year,
            f.month,
            f.day,
            f.hour,
            f.minute,
            f.second,
            f.offset_minutes,
            f.weekday,
        ] {
            buf.put_i64(word);
        }
    }

    fn decode_from<B: Buf>(buf: &mut B) -> CoreResult<Self> {
        let fields = DatetimeFields {
            year: read_word(buf, "year")?,
            month: read_word(buf, "month")?,
            day: read_word(buf, "day")?,
            hour: read_word(buf, "hour")?,
            minute: read_word(buf, "minute")?,
            second: read_word(buf, "second")?,
            offset_minutes: read_word(buf, "offset")?,
            weekday: read_word(buf, "weekday")?,
        };
        fields.into_datetime().map_err(|e| {
            warn!("rejected datetime record {fields:?}: {e}");
            CoreError::decode(e.to_string())
        })
    }
}

impl BinaryLayout for Period {
    const WORDS: usize = 3;

    fn encode_into<B: BufMut>(&self, buf: &mut B) {
        buf.put_i64(self.years);
        buf.put_i64(self.months);
        buf.put_i64(self.days);
    }

    fn decode_from<B: Buf>(buf: &mut B) -> CoreResult<Self> {
        Ok(Period::new(
            read_word(buf, "years")?,
            read_word(buf, "months")?,
            read_word(buf, "days")?,
        ))
    }
}

impl BinaryLayout for Duration {
    const WORDS: usize = 4;

    fn encode_into<B: BufMut>(&self, buf: &mut B) {
        buf.put_i64(self.hours);
        buf.put_i64(self.minutes);
        buf.put_i64(self.seconds);
        buf.put_i64(self.nanoseconds);
    }

    fn decode_from<B: Buf>(buf: &mut B) -> CoreResult<Self> {
        Ok(Duration::new(
            read_word(buf, "hours")?,
            read_word(buf, "minutes")?,
            read_word(buf, "seconds")?,
            read_word(buf, "nanoseconds")?,
        ))
    }
}

impl BinaryLayout for Delta {
    const WORDS: usize = Period::WORDS + Duration::WORDS;

    fn encode_into<B: BufMut>(&self, buf: &mut B) {
        self.period.encode_into(buf);
        self.duration.encode_into(buf);
    }

    /// Reads the fields as stored; a non-canonical payload is kept as is.
    fn decode_from<B: Buf>(buf: &mut B) -> CoreResult<Self> {
        let period = Period::decode_from(buf)?;
        let duration = Duration::decode_from(buf)?;
        Ok(Delta { period, duration })
    }
}

/// JSON codec using serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Compact output.
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented output, for display.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Encodes a value.
    pub fn encode<T: Serialize>(&self, value: &T) -> CoreResult<Bytes> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        encoded
            .map(Bytes::from)
            .map_err(|e| CoreError::decode(format!("JSON encode failed: {e}")))
    }

    /// Decodes a value.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> CoreResult<T> {
        serde_json::from_slice(bytes).map_err(|e| CoreError::decode(format!("invalid JSON: {e}")))
    }

    /// Content type header value.
    pub fn content_type(&self) -> &'static str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> Datetime {
        s.parse().unwrap()
    }

    #[test]
    fn test_datetime_layout() {
        let value = dt("2014-04-05T17:25:04+05:00");
        let bytes = value.to_bytes();
        assert_eq!(bytes.len(), 64);
        let mut buf = &bytes[..];
        let words: Vec<i64> = (0..8).map(|_| buf.get_i64()).collect();
        // April 5, 2014 is a Saturday.
        assert_eq!(words, vec![2014, 4, 5, 17, 25, 4, 300, 6]);
        assert_eq!(&bytes[..8], &[0, 0, 0, 0, 0, 0, 0x07, 0xDE]);
    }

    #[test]
    fn test_datetime_decode_recomputes_weekday() {
        let mut buf = BytesMut::new();
        for word in [2014, 4, 5, 17, 25, 4, 300, 0] {
            buf.put_i64(word);
        }
        let decoded = Datetime::from_bytes(&buf).unwrap();
        assert_eq!(decoded, dt("2014-04-05T17:25:04+05:00"));
        assert_eq!(decoded.weekday().index(), 6);
    }

    #[test]
    fn test_datetime_decode_rejects_invalid_fields() {
        let cases: [[i64; 8]; 4] = [
            [2014, 13, 5, 17, 25, 4, 300, 6],
            [2014, 4, 5, 24, 25, 4, 300, 6],
            [2014, 4, 5, 17, 25, 4, 300, 7],
            [3000, 4, 5, 17, 25, 4, 0, 6],
        ];
        for words in cases {
            let mut buf = BytesMut::new();
            for word in words {
                buf.put_i64(word);
            }
            let err = Datetime::from_bytes(&buf).unwrap_err();
            assert!(matches!(err, CoreError::Decode { .. }), "{words:?}");
        }
    }

    #[test]
    fn test_truncated_and_trailing_input() {
        let bytes = Period::new(1, 2, 3).to_bytes();
        assert!(matches!(
            Period::from_bytes(&bytes[..20]),
            Err(CoreError::Decode { .. })
        ));

        let mut padded = BytesMut::from(&bytes[..]);
        padded.put_u8(0);
        assert!(Period::from_bytes(&padded).is_err());
    }

    #[test]
    fn test_delta_layout() {
        let delta = Delta::new(Period::new(1, 2, 3), Duration::new(4, 5, 6, 7));
        let bytes = delta.to_bytes();
        assert_eq!(bytes.len(), 56);
        let mut buf = &bytes[..];
        let words: Vec<i64> = (0..7).map(|_| buf.get_i64()).collect();
        assert_eq!(words, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(Delta::from_bytes(&bytes).unwrap(), delta);
    }

    #[test]
    fn test_negative_words() {
        let period = Period::new(-1, 0, -30);
        assert_eq!(Period::from_bytes(&period.to_bytes()).unwrap(), period);
    }

    #[test]
    fn test_json_codec() {
        let codec = JsonCodec::new();
        let value = dt("2014-04-05T17:25:04+05:00");
        let bytes = codec.encode(&value).unwrap();
        assert_eq!(&bytes[..], b"\"2014-04-05T17:25:04+05:00\"");
        let back: Datetime = codec.decode(&bytes).unwrap();
        assert_eq!(back, value);
        assert_eq!(back.offset_minutes(), 300);
        assert_eq!(codec.content_type(), "application/json");
    }

    #[test]
    fn test_json_codec_rejects_garbage() {
        let codec = JsonCodec::new();
        let err = codec.decode::<Datetime>(b"\"2014-13-05T17:25:04+05:00\"");
        assert!(matches!(err, Err(CoreError::Decode { .. })));
        assert!(codec.decode::<Period>(b"{").is_err());
    }
}
