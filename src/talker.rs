use crate::{
    channel::Channel,
    crc::crc16,
    endian::{get_u16_le, put_u16_le},
    frame::{ReadResult, WriteResult, FRAME_OVERHEAD, FRAME_START, HEADER_SIZE},
    object::Object,
    ring::RingBuffer,
    Decode,
};

/// Point-to-point framed object messaging over a byte channel.
///
/// A `CrossTalker` owns its channel exclusively, a fixed-capacity receive
/// ring of `BUFFER_SIZE` bytes, and a `SERIALIZATION_BUFFER_SIZE`-byte
/// scratch buffer used to assemble outbound frames and to linearize inbound
/// frames that wrap the ring boundary. Both buffers are allocated once at
/// construction and never grow; neither receive nor transmit allocates.
///
/// All operations are non-blocking and return immediately. The caller
/// drives progress by periodically pumping
/// [`process_serial_data`](Self::process_serial_data) and polling the
/// receive API, typically from an embedded event loop. Instances are not
/// meant to be shared across threads and do not synchronize internally.
///
/// The transport may interleave frames with free-form bytes (log lines,
/// text). Frames always take precedence: [`read`](Self::read) and
/// [`skip`](Self::skip) only consume bytes up to the next start marker, and
/// the marker at the cursor must be read with
/// [`read_object`](Self::read_object) or discarded with
/// [`skip_object`](Self::skip_object) before the bytes behind it become
/// available.
pub struct CrossTalker<
    C: Channel,
    const BUFFER_SIZE: usize = 512,
    const SERIALIZATION_BUFFER_SIZE: usize = 256,
> {
    channel: C,
    ring: RingBuffer<BUFFER_SIZE>,
    scratch: [u8; SERIALIZATION_BUFFER_SIZE],
}

impl<C: Channel, const BUFFER_SIZE: usize, const SERIALIZATION_BUFFER_SIZE: usize>
    CrossTalker<C, BUFFER_SIZE, SERIALIZATION_BUFFER_SIZE>
{
    /// Creates a talker that takes exclusive ownership of `channel`.
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            ring: RingBuffer::new(),
            scratch: [0; SERIALIZATION_BUFFER_SIZE],
        }
    }

    /// Borrows the underlying channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Mutably borrows the underlying channel.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Moves pending channel bytes into the receive buffer.
    ///
    /// With `overwrite_buffer` the oldest buffered bytes are dropped when
    /// more data arrives than the buffer can hold; one byte less than the
    /// capacity is read into a non-empty buffer so a wrap overrun cannot
    /// erase a pending start marker. Without it, only the remaining free
    /// space is filled.
    pub fn process_serial_data(&mut self, overwrite_buffer: bool) {
        if overwrite_buffer {
            let max_to_read = if self.ring.is_empty() {
                BUFFER_SIZE
            } else {
                BUFFER_SIZE - 1
            };
            self.pump(max_to_read);
        } else if self.ring.len() < BUFFER_SIZE {
            self.pump(BUFFER_SIZE - self.ring.len());
        }
    }

    /// Number of non-object bytes ready for [`read`](Self::read). Bytes at
    /// and beyond the next start marker are not counted, and a trailing
    /// `0x02` is held back until its successor arrives and settles whether
    /// it opens a frame.
    pub fn available(&self) -> usize {
        self.ring.readable()
    }

    /// True when a frame starts at the read cursor.
    pub fn has_object(&self) -> bool {
        self.ring.has_frame()
    }

    /// Type id of the frame at the cursor, or -1 when there is none.
    pub fn object_id(&self) -> i16 {
        self.ring.frame_id()
    }

    /// Drops all buffered receive data, including any partial frame.
    pub fn clear_buffer(&mut self) {
        self.ring.clear();
    }

    /// Reads non-object bytes into `data`, up to the next start marker.
    /// Returns the number of bytes copied.
    pub fn read(&mut self, data: &mut [u8]) -> usize {
        self.ring.read_into(data)
    }

    /// Discards up to `length` non-object bytes, stopping at the next start
    /// marker. Pulls pending channel data into free buffer space first so a
    /// marker that just arrived is not skipped over. Returns the number of
    /// bytes discarded.
    pub fn skip(&mut self, length: usize) -> usize {
        self.process_serial_data(false);
        self.ring.skip(length)
    }

    /// [`skip`](Self::skip) with the whole buffer capacity as the bound.
    pub fn skip_all(&mut self) -> usize {
        self.skip(BUFFER_SIZE)
    }

    /// Reads the frame at the cursor into `obj`.
    ///
    /// On [`ReadResult::Success`], [`ReadResult::CrcError`] and
    /// [`ReadResult::ObjectSizeMismatch`] the frame is consumed; on
    /// [`ReadResult::ObjectIdMismatch`] and [`ReadResult::NotEnoughData`]
    /// it stays buffered, so the caller can dispatch on
    /// [`object_id`](Self::object_id), wait for the tail to arrive, or
    /// [`skip_object`](Self::skip_object).
    pub fn read_object<T: Object>(&mut self, obj: &mut T) -> ReadResult {
        if !self.has_object() {
            return ReadResult::NoObjectAvailable;
        }
        // Pull in as much pending data as fits so a frame that is
        // mid-arrival has a chance to complete.
        self.top_up();
        if self.ring.len() < HEADER_SIZE {
            return ReadResult::NotEnoughData;
        }
        if self.object_id() != T::ID {
            return ReadResult::ObjectIdMismatch;
        }
        let payload_len = self.ring.frame_payload_len() as usize;
        let total = payload_len + FRAME_OVERHEAD;
        if total > self.ring.len() {
            return ReadResult::NotEnoughData;
        }

        let (crc_ok, consumed) = if self.ring.wraps(total) {
            if total > SERIALIZATION_BUFFER_SIZE {
                // A wrapping frame larger than the scratch buffer cannot be
                // linearized for validation. Consume it to resynchronize.
                self.ring.mark_read(total);
                return ReadResult::CrcError;
            }
            self.ring.copy_into(&mut self.scratch[..total]);
            verify_and_decode(&self.scratch[..total], payload_len, obj)
        } else {
            verify_and_decode(self.ring.contiguous(total), payload_len, obj)
        };
        // The frame is consumed whether or not the CRC held, forcing the
        // scanner to resynchronize on the next marker.
        self.ring.mark_read(total);
        if !crc_ok {
            return ReadResult::CrcError;
        }
        if consumed != payload_len {
            ReadResult::ObjectSizeMismatch
        } else {
            ReadResult::Success
        }
    }

    /// Discards the frame at the cursor without checking its CRC.
    pub fn skip_object(&mut self) -> ReadResult {
        if !self.has_object() {
            return ReadResult::NoObjectAvailable;
        }
        self.top_up();
        if self.ring.len() < HEADER_SIZE {
            return ReadResult::NotEnoughData;
        }
        let total = self.ring.frame_payload_len() as usize + FRAME_OVERHEAD;
        if total > self.ring.len() {
            return ReadResult::NotEnoughData;
        }
        self.ring.mark_read(total);
        ReadResult::Success
    }

    /// Frames `obj` and hands it to the channel in a single write.
    ///
    /// The whole frame is assembled in the scratch buffer first; nothing is
    /// written when the encoded object does not fit
    /// (`SERIALIZATION_BUFFER_SIZE` minus the eight framing bytes).
    pub fn send_object<T: Object>(&mut self, obj: &T) -> WriteResult {
        const {
            assert!(
                T::ID >= 0,
                "object ids must be non-negative, negative ids are reserved"
            )
        };
        let payload_len = obj.size();
        let total = payload_len + FRAME_OVERHEAD;
        if total > SERIALIZATION_BUFFER_SIZE {
            return WriteResult::ObjectTooLarge;
        }
        self.scratch[..2].copy_from_slice(&FRAME_START);
        put_u16_le(&mut self.scratch[2..], T::ID as u16);
        put_u16_le(&mut self.scratch[4..], payload_len as u16);
        let written = obj.encode(&mut self.scratch[HEADER_SIZE..HEADER_SIZE + payload_len]);
        debug_assert_eq!(
            written, payload_len,
            "serialized length disagrees with computed size"
        );
        let crc = crc16(&self.scratch[..HEADER_SIZE + payload_len]);
        put_u16_le(&mut self.scratch[HEADER_SIZE + payload_len..], crc);
        if self.channel.write(&self.scratch[..total]) {
            WriteResult::Success
        } else {
            WriteResult::WriteError
        }
    }

    /// Reads channel bytes into the ring, bounded by `max_to_read` and by
    /// what the channel reports as immediately available.
    fn pump(&mut self, mut max_to_read: usize) {
        loop {
            let available = self.channel.available();
            if available == 0 || max_to_read == 0 {
                return;
            }
            let span = self.ring.tail_slice();
            let want = span.len().min(available).min(max_to_read);
            let count = self.channel.read(&mut span[..want]);
            if count == 0 {
                return;
            }
            self.ring.commit(count);
            max_to_read -= count;
        }
    }

    /// Fills the remaining free space without overwriting buffered bytes.
    fn top_up(&mut self) {
        self.pump(BUFFER_SIZE - self.ring.len());
    }
}

/// Checks the trailing CRC of a linear frame image and, when it holds,
/// decodes the payload into `obj`. Returns the check outcome and the number
/// of payload bytes the decoder consumed.
fn verify_and_decode<T: Decode>(frame: &[u8], payload_len: usize, obj: &mut T) -> (bool, usize) {
    let expected = get_u16_le(&frame[HEADER_SIZE + payload_len..]);
    let computed = crc16(&frame[..HEADER_SIZE + payload_len]);
    if expected != computed {
        return (false, 0);
    }
    (true, obj.decode(&frame[HEADER_SIZE..HEADER_SIZE + payload_len]))
}
