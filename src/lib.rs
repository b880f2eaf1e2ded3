//! Framed object messaging over byte-oriented serial links.
//!
//! CrossTalk carries strongly-typed records between an embedded device and
//! a host as length-delimited, CRC-protected frames over any reliable byte
//! pipe (UART, USB CDC, an in-memory channel in tests). The transport may
//! also carry interleaved free-form bytes such as log text; the receiver
//! exposes those verbatim while frames are detected, validated and decoded
//! from a fixed-size ring buffer without dynamic allocation on the hot
//! path.
//!
//! Records list their fields with the [`object!`] macro and are dispatched
//! by a 16-bit type id:
//!
//! ```
//! use crosstalk::{Channel, CrossTalker, ReadResult, WriteResult};
//!
//! #[derive(Debug, Default, PartialEq)]
//! pub struct Telemetry {
//!     pub id: i32,
//!     pub value: f32,
//! }
//! crosstalk::object!(Telemetry, id = 1, fields(id, value));
//!
//! // A trivial loopback channel; real transports wrap a serial port.
//! #[derive(Default)]
//! struct Loopback(std::collections::VecDeque<u8>);
//!
//! impl Channel for Loopback {
//!     fn available(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn read(&mut self, buf: &mut [u8]) -> usize {
//!         let count = buf.len().min(self.0.len());
//!         for slot in &mut buf[..count] {
//!             *slot = self.0.pop_front().unwrap();
//!         }
//!         count
//!     }
//!     fn write(&mut self, buf: &[u8]) -> bool {
//!         self.0.extend(buf);
//!         true
//!     }
//! }
//!
//! let mut talker = CrossTalker::<_, 512, 256>::new(Loopback::default());
//! let sent = Telemetry { id: 42, value: 3.14 };
//! assert_eq!(talker.send_object(&sent), WriteResult::Success);
//!
//! talker.process_serial_data(true);
//! assert!(talker.has_object());
//! assert_eq!(talker.object_id(), 1);
//!
//! let mut received = Telemetry::default();
//! assert_eq!(talker.read_object(&mut received), ReadResult::Success);
//! assert_eq!(received, sent);
//! ```
//!
//! # Wire format
//!
//! Every frame is `8 + N` bytes; all multi-byte fields are little-endian.
//!
//! | Field         | Size | Description                                    |
//! |---------------|------|------------------------------------------------|
//! | `start`       | 2    | Must be [`FRAME_START`] (`0x02 0x42`).         |
//! | `type_id`     | 2    | Signed record id (see [`Object`]).             |
//! | `payload_len` | 2    | Unsigned payload byte count `N`.               |
//! | `payload`     | N    | Field-ordered record encoding.                 |
//! | `crc16`       | 2    | [`crc16`] over the first `6 + N` bytes.        |
//!
//! Bytes that do not open a frame are plain data, delivered in order
//! through [`CrossTalker::read`] and [`CrossTalker::skip`].
//!
//! # Delivery semantics
//!
//! Frames arrive in send order; there is no acknowledgement, retransmission
//! or encryption at this layer. Corrupted frames are detected by checksum,
//! consumed and reported as [`ReadResult::CrcError`] so the scanner can
//! resynchronize on the next start marker.

mod channel;
mod crc;
mod decode;
mod encode;
pub mod endian;
mod frame;
mod object;
mod ring;
#[cfg(feature = "serial")]
pub mod serial;
mod talker;

pub use channel::Channel;
pub use crc::{crc16, CROSSTALK_CRC16};
pub use decode::Decode;
pub use encode::Encode;
pub use frame::{ReadResult, WriteResult, FRAME_OVERHEAD, FRAME_START, HEADER_SIZE};
pub use object::Object;
pub use talker::CrossTalker;
