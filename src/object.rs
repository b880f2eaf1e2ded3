use crate::{Decode, Encode};

/// A record that can travel as a CrossTalk frame.
///
/// Implemented by the [`object!`](crate::object) macro, which walks the
/// record's declared fields in order. The id tags the frame on the wire so
/// the receiver can dispatch to the right record type; it must be unique
/// across a deployment, which is the application's obligation. Negative ids
/// are reserved and rejected at compile time on the transmit path.
pub trait Object: Encode + Decode {
    /// Application-assigned type identifier.
    const ID: i16;
}

/// Implements [`Encode`], [`Decode`] and [`Object`] for a record by listing
/// its fields in wire order.
///
/// The record needs nothing beyond the listed fields being encodable and
/// decodable themselves; nested records compose.
///
/// ```
/// use crosstalk::{Decode, Encode, Object};
///
/// #[derive(Debug, Default, PartialEq)]
/// pub struct Telemetry {
///     pub id: i32,
///     pub value: f32,
/// }
/// crosstalk::object!(Telemetry, id = 1, fields(id, value));
///
/// let telemetry = Telemetry { id: 42, value: 3.14 };
/// let mut buf = [0u8; 8];
/// assert_eq!(telemetry.encode(&mut buf), telemetry.size());
///
/// let mut decoded = Telemetry::default();
/// assert_eq!(decoded.decode(&buf), 8);
/// assert_eq!(decoded, telemetry);
/// assert_eq!(Telemetry::ID, 1);
/// ```
#[macro_export]
macro_rules! object {
    ($ty:ty, id = $id:expr, fields($($field:ident),+ $(,)?)) => {
        impl $crate::Encode for $ty {
            fn size(&self) -> usize {
                0 $(+ $crate::Encode::size(&self.$field))+
            }

            fn encode(&self, data: &mut [u8]) -> usize {
                let mut offset = 0;
                $(
                    offset += $crate::Encode::encode(&self.$field, &mut data[offset..]);
                )+
                offset
            }
        }

        impl $crate::Decode for $ty {
            fn decode(&mut self, data: &[u8]) -> usize {
                let mut offset = 0;
                $(
                    let consumed = $crate::Decode::decode(&mut self.$field, &data[offset..]);
                    if consumed == 0 {
                        return 0;
                    }
                    offset += consumed;
                )+
                offset
            }
        }

        impl $crate::Object for $ty {
            const ID: i16 = $id;
        }
    };
}

/// Implements [`Encode`] and [`Decode`] for a fieldless `#[repr]` enum,
/// serializing it as its underlying scalar.
///
/// The enum must be `Copy` and its discriminants listed explicitly. An
/// unknown discriminant on the wire fails the decode (consumed count 0),
/// which the frame layer reports as a size mismatch.
///
/// ```
/// use crosstalk::{Decode, Encode};
///
/// #[derive(Debug, Clone, Copy, Default, PartialEq)]
/// #[repr(u8)]
/// pub enum LinkState {
///     #[default]
///     Disconnected = 0,
///     Connected = 1,
///     Error = 10,
/// }
/// crosstalk::wire_enum!(LinkState: u8 { Disconnected = 0, Connected = 1, Error = 10 });
///
/// let mut buf = [0u8; 1];
/// LinkState::Connected.encode(&mut buf);
/// assert_eq!(buf, [1]);
///
/// let mut state = LinkState::default();
/// assert_eq!(state.decode(&[10]), 1);
/// assert_eq!(state, LinkState::Error);
/// assert_eq!(state.decode(&[99]), 0);
/// ```
#[macro_export]
macro_rules! wire_enum {
    ($ty:ty : $repr:ty { $($variant:ident = $value:expr),+ $(,)? }) => {
        impl $crate::Encode for $ty {
            fn size(&self) -> usize {
                ::core::mem::size_of::<$repr>()
            }

            fn encode(&self, data: &mut [u8]) -> usize {
                $crate::Encode::encode(&(*self as $repr), data)
            }
        }

        impl $crate::Decode for $ty {
            fn decode(&mut self, data: &[u8]) -> usize {
                let mut raw: $repr = 0;
                let consumed = $crate::Decode::decode(&mut raw, data);
                if consumed == 0 {
                    return 0;
                }
                $(
                    if raw == $value {
                        *self = <$ty>::$variant;
                        return consumed;
                    }
                )+
                0
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Decode, Encode, Object};

    #[derive(Debug, Default, PartialEq)]
    struct NamedRecord {
        uuid: i32,
        name: String,
    }
    crate::object!(NamedRecord, id = 2, fields(uuid, name));

    #[derive(Debug, Default, PartialEq)]
    struct SensorReport {
        scale: f32,
        samples: Vec<i32>,
        coordinates: [f64; 3],
    }
    crate::object!(SensorReport, id = 3, fields(scale, samples, coordinates));

    #[derive(Debug, Default, PartialEq)]
    struct RecordBatch {
        id: u16,
        entries: Vec<NamedRecord>,
    }
    crate::object!(RecordBatch, id = 5, fields(id, entries));

    #[test]
    fn fields_encode_in_declared_order() {
        let record = NamedRecord {
            uuid: 7,
            name: String::from("ab"),
        };
        let mut buf = [0u8; 16];
        assert_eq!(record.encode(&mut buf), 8);
        assert_eq!(&buf[..8], &[7, 0, 0, 0, 2, 0, b'a', b'b']);
    }

    #[test]
    fn composite_round_trip() {
        let report = SensorReport {
            scale: 0.5,
            samples: vec![-1, 0, 1],
            coordinates: [4.0, 5.0, 6.0],
        };
        let mut buf = [0u8; 64];
        let written = report.encode(&mut buf);
        assert_eq!(written, report.size());

        let mut decoded = SensorReport::default();
        assert_eq!(decoded.decode(&buf[..written]), written);
        assert_eq!(decoded, report);
    }

    #[test]
    fn nested_records_round_trip() {
        let batch = RecordBatch {
            id: 456,
            entries: vec![
                NamedRecord {
                    uuid: 789,
                    name: String::from("first"),
                },
                NamedRecord {
                    uuid: 101_112,
                    name: String::from("second"),
                },
            ],
        };
        let mut buf = [0u8; 64];
        let written = batch.encode(&mut buf);
        assert_eq!(written, batch.size());

        let mut decoded = RecordBatch::default();
        assert_eq!(decoded.decode(&buf[..written]), written);
        assert_eq!(decoded, batch);
    }

    #[test]
    fn truncated_composite_fails() {
        let record = NamedRecord {
            uuid: 1,
            name: String::from("name"),
        };
        let mut buf = [0u8; 16];
        let written = record.encode(&mut buf);

        let mut decoded = NamedRecord::default();
        assert_eq!(decoded.decode(&buf[..written - 1]), 0);
    }

    #[test]
    fn object_ids_are_attached() {
        assert_eq!(NamedRecord::ID, 2);
        assert_eq!(RecordBatch::ID, 5);
    }
}
