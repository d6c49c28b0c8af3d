//! Implementation of a software loop-back device.
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::{Error, Result, Transport};

/// A software loop-back device.
///
/// Every sent frame is copied into a queue of bounded length and handed out again, in order, by
/// the following receives.
#[derive(Debug, Clone)]
pub struct Loopback {
    queue: VecDeque<Vec<u8>>,
    capacity: usize,
    mtu: usize,
}

impl Loopback {
    /// Create a loop-back device holding up to `capacity` frames of at most `mtu` octets.
    pub fn new(capacity: usize, mtu: usize) -> Self {
        Loopback {
            queue: VecDeque::with_capacity(capacity),
            capacity,
            mtu,
        }
    }

    /// The number of frames sent but not yet received.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The largest frame accepted by `send`.
    pub fn mtu(&self) -> usize {
        self.mtu
    }
}

impl Transport for Loopback {
    /// Queue a copy of the frame.
    ///
    /// Fails with `Error::BadSize` for frames longer than the mtu and with `Error::Exhausted`
    /// when `capacity` frames are already pending.
    fn send(&mut self, frame: &[u8]) -> Result<usize> {
        if frame.len() > self.mtu {
            net_debug!("loopback: frame of {} octets exceeds mtu {}", frame.len(), self.mtu);
            return Err(Error::BadSize);
        }

        if self.queue.len() == self.capacity {
            return Err(Error::Exhausted);
        }

        self.queue.push_back(frame.to_vec());
        net_trace!("loopback: queued {} octets, {} pending", frame.len(), self.queue.len());
        Ok(frame.len())
    }

    /// Dequeue the oldest frame.
    ///
    /// Fails with `Error::Exhausted` when no frame is pending.
    fn recv(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let frame = self.queue.pop_front().ok_or(Error::Exhausted)?;
        let len = frame.len().min(buffer.len());
        if len < frame.len() {
            net_debug!("loopback: truncated frame of {} octets to {}", frame.len(), len);
        }

        buffer[..len].copy_from_slice(&frame[..len]);
        Ok(len)
    }
}
