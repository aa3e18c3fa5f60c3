//! Bounded queue between host-stack callbacks and the control channel.
//!
//! Callbacks push from their own context, the dispatcher drains it. Built on
//! `critical-section` and `heapless::Deque`, so it is interrupt safe and can
//! live in a `static`. A full queue rejects the value and counts it as
//! dropped; the receiver takes that count to learn its view is incomplete.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

struct Queue<T, const SIZE: usize> {
    values: Deque<T, SIZE>,
    dropped: u32,
}

/// A bounded, interrupt-safe FIFO that remembers overflow.
pub struct Channel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Queue<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Queue {
                values: Deque::new(),
                dropped: 0,
            })),
        }
    }

    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Queue a value, or hand it back and count a drop if the queue is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.values.push_back(value).map_err(|value| {
                queue.dropped = queue.dropped.saturating_add(1);
                TrySendError(value)
            })
        })
    }

    /// Take the oldest value.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.values.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of values rejected since the last call, resets the count.
    pub fn take_dropped(&self) -> u32 {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            core::mem::take(&mut queue.dropped)
        })
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side of a [`Channel`], handed to stack callbacks.
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

/// Consumer side of a [`Channel`], owned by the dispatcher.
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    pub fn take_dropped(&self) -> u32 {
        self.channel.take_dropped()
    }
}
