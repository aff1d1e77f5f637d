// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Cancellation for delayed work running on worker threads.
//!
//! A [`CancelScope`] owns the only sender of a channel that never carries
//! data. Tokens hold receivers; once the scope is dropped the channel
//! disconnects and every waiting token wakes up cancelled.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError, after, bounded, select};

/// Owner side: drop (or [`CancelScope::cancel`]) to cancel all tokens.
#[derive(Debug)]
pub struct CancelScope {
    _tx: Sender<()>,
    rx: Receiver<()>,
}

impl CancelScope {
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self { _tx: tx, rx }
    }

    /// Hand out a token tied to this scope.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.rx.clone(),
        }
    }

    /// Cancel outstanding tokens explicitly.
    pub fn cancel(self) {}
}

impl Default for CancelScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker side of a [`CancelScope`].
#[derive(Clone, Debug)]
pub struct CancelToken {
    rx: Receiver<()>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Block for `delay`. Returns `true` when the delay elapsed, `false` when cancelled first.
    pub fn sleep(&self, delay: Duration) -> bool {
        if self.is_cancelled() {
            return false;
        }
        select! {
            recv(self.rx) -> _ => false,
            recv(after(delay)) -> _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn sleep_elapses_while_scope_alive() {
        let scope = CancelScope::new();
        let token = scope.token();
        let start = Instant::now();

        assert!(token.sleep(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn dropping_scope_wakes_sleepers() {
        let scope = CancelScope::new();
        let token = scope.token();

        let handle = std::thread::spawn(move || {
            let start = Instant::now();
            let elapsed = token.sleep(Duration::from_secs(30));
            (elapsed, start.elapsed())
        });

        std::thread::sleep(Duration::from_millis(20));
        scope.cancel();

        let (elapsed, waited) = handle.join().unwrap();
        assert!(!elapsed);
        assert!(waited < Duration::from_secs(5));
    }

    #[test]
    fn tokens_from_cancelled_scope_return_immediately() {
        let scope = CancelScope::new();
        let token = scope.token();
        drop(scope);

        assert!(token.is_cancelled());
        assert!(!token.sleep(Duration::from_secs(30)));
    }
}
