//! Single-slot mailbox between an interrupt/callback context and the loop.
//!
//! Built on `critical-section` and a one-element `heapless::Deque`. The
//! first posted value wins: posting while a value is still pending hands the
//! new value back as [`Busy`] instead of overwriting the pending one.

use core::cell::RefCell;
use core::fmt;

use critical_section::Mutex;
use heapless::Deque;

/// Rejection returned when the mailbox already holds a pending value.
///
/// Carries the rejected value back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Busy<T>(pub T);

impl<T> fmt::Display for Busy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("busy: a request is already pending")
    }
}

/// A bounded single-slot mailbox, safe to share between contexts.
pub struct Mailbox<T> {
    slot: Mutex<RefCell<Deque<T, 1>>>,
}

impl<T> Mailbox<T> {
    /// Create a new empty mailbox.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a posting handle for this mailbox.
    pub const fn sender(&self) -> MailboxSender<'_, T> {
        MailboxSender { mailbox: self }
    }

    /// Get the draining handle for this mailbox.
    pub const fn receiver(&self) -> MailboxReceiver<'_, T> {
        MailboxReceiver { mailbox: self }
    }

    /// Store `value` if the slot is free.
    ///
    /// Never blocks; returns `Err(Busy(value))` if a value is already pending.
    pub fn try_post(&self, value: T) -> Result<(), Busy<T>> {
        critical_section::with(|cs| {
            let mut slot = self.slot.borrow(cs).borrow_mut();
            slot.push_back(value).map_err(Busy)
        })
    }

    /// Take the pending value, freeing the slot.
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.slot.borrow(cs).borrow_mut().pop_front())
    }

    /// Check whether a value is waiting to be taken.
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| !self.slot.borrow(cs).borrow().is_empty())
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting handle for a [`Mailbox`], used from the callback context.
pub struct MailboxSender<'a, T> {
    mailbox: &'a Mailbox<T>,
}

impl<T> Clone for MailboxSender<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MailboxSender<'_, T> {}

impl<T> MailboxSender<'_, T> {
    /// See [`Mailbox::try_post`].
    pub fn try_post(&self, value: T) -> Result<(), Busy<T>> {
        self.mailbox.try_post(value)
    }
}

/// Draining handle for a [`Mailbox`], used from the cooperative loop.
pub struct MailboxReceiver<'a, T> {
    mailbox: &'a Mailbox<T>,
}

impl<T> MailboxReceiver<'_, T> {
    /// See [`Mailbox::take`].
    pub fn take(&self) -> Option<T> {
        self.mailbox.take()
    }

    pub fn is_pending(&self) -> bool {
        self.mailbox.is_pending()
    }
}
