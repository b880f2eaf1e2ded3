/// Byte-oriented transport consumed by [`CrossTalker`](crate::CrossTalker).
///
/// Implementations wrap a UART, a USB CDC endpoint, or any other reliable
/// byte pipe. All three operations are expected to return immediately with
/// whatever is presently available; the codec never blocks on the channel.
///
/// A channel is exclusively owned by its `CrossTalker`.
pub trait Channel {
    /// Number of bytes immediately readable without blocking.
    fn available(&self) -> usize;

    /// Reads up to `buf.len()` bytes into `buf`, returning how many were
    /// actually read.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Attempts to send all of `buf`. Returns `true` when the transport
    /// accepted every byte.
    fn write(&mut self, buf: &[u8]) -> bool;
}
